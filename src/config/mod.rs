//! Builder options and the default configuration.
//!
//! This module handles:
//! - Options file parsing and discovery
//! - Build mode selection
//! - Building the default configuration tree from options
//! - Loading override documents (JSON or TOML)
//! - The `init` template

pub mod cascade;
pub mod defaults;
pub mod parser;
pub mod template;
pub mod types;

pub use cascade::{
	LoadedOptions, OPTIONS_FILE_NAME, discover_options_file, load_options, resolve_options,
};
pub use defaults::{DEFAULT_ASSET_FILENAME, DEFAULT_CHUNK_FILENAME, build_defaults};
pub use parser::{load_overrides, parse_options_file, parse_options_str};
pub use template::generate_init_template;
pub use types::{BuildMode, BuilderOptions, DevServerPort};
