//! Rule and plugin descriptors for the default configuration.
//!
//! This module handles:
//! - Encoding match patterns (regex vs literal) into the JSON tree
//! - Building the default module rules and plugin descriptors
//!
//! Descriptors are opaque to the rest of the crate; only the bundler reads them.

pub mod descriptors;
pub mod pattern;

pub use descriptors::{
	DEFAULT_TRANSPILED_DEPENDENCIES, asset_rules, css_rules, dependency_exclusion,
	minimizer_plugin, provide_plugin, resolve_extensions, script_rule, script_test,
	typescript_rule, typescript_test,
};
pub use pattern::{Pattern, compile_regex};
