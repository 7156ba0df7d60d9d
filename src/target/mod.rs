//! Target environment presets.
//!
//! This module handles:
//! - Classifying target labels into runtime families
//! - Building the configuration fragment for a target
//! - Enumerating installed dependencies for server-runtime externals
//!
//! Only two families are treated specially. Any other label is passed to the
//! bundler untouched.

pub mod externals;

pub use externals::{
	DependencyEnumerator, MODULES_DIR, NodeModulesEnumerator, StaticDependencies,
	commonjs_externals,
};

use crate::error::Result;
use serde_json::{Value, json};
use std::path::Path;

/// Output subdirectory for server-runtime builds.
pub const NODE_OUTPUT_DIR: &str = "node";

/// Output subdirectory for browser builds.
pub const WEB_OUTPUT_DIR: &str = "web";

/// Runtime family of a target label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFamily {
	/// Server runtime, labels starting with `node`.
	Node,

	/// Browsers, labels starting with `browserslist`.
	Browserslist,

	/// Anything else.
	Other,
}

impl TargetFamily {
	/// Classify a label by prefix.
	pub fn classify(label: &str) -> Self {
		if label.starts_with("node") {
			TargetFamily::Node
		} else if label.starts_with("browserslist") {
			TargetFamily::Browserslist
		} else {
			TargetFamily::Other
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			TargetFamily::Node => "node",
			TargetFamily::Browserslist => "browserslist",
			TargetFamily::Other => "other",
		}
	}
}

/// Build the configuration fragment for `label`.
///
/// The raw label is always recorded as `target`. Server-runtime labels also
/// get the node externals preset, externals for every installed dependency
/// under `root`, and output in `<dist>/node`. Browser labels get the web
/// preset and output in `<dist>/web`.
pub fn resolve_target(
	label: &str,
	dist_path: &Path,
	root: &Path,
	enumerator: &dyn DependencyEnumerator,
) -> Result<Value> {
	let fragment = match TargetFamily::classify(label) {
		TargetFamily::Node => {
			let dependencies = enumerator.dependencies(root)?;
			json!({
				"target": label,
				"externalsPresets": {"node": true},
				"externals": [commonjs_externals(&dependencies)],
				"output": {
					"path": dist_path.join(NODE_OUTPUT_DIR).to_string_lossy()
				}
			})
		}
		TargetFamily::Browserslist => json!({
			"target": label,
			"externalsPresets": {"web": true},
			"output": {
				"path": dist_path.join(WEB_OUTPUT_DIR).to_string_lossy()
			}
		}),
		TargetFamily::Other => json!({ "target": label }),
	};

	Ok(fragment)
}
