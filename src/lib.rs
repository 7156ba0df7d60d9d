//! bundle-config - layered bundler configuration builder.
//!
//! This library provides the core functionality for bundle-config, including:
//! - Building a default configuration tree from a small options record
//! - Deep merging with explicit, per-field sequence concatenation
//! - Target presets for server-runtime and browser builds
//! - A fluent builder tying these together
//!
//! # Example
//!
//! ```no_run
//! use bundle_config::builder::ConfigBuilder;
//! use bundle_config::config::{BuildMode, BuilderOptions, DevServerPort};
//! use serde_json::json;
//!
//! let options = BuilderOptions {
//!     library_name: Some("my-library".to_string()),
//!     ..BuilderOptions::new("/path/to/project")
//! };
//!
//! let mut builder = ConfigBuilder::with_mode(options, BuildMode::Production);
//! builder
//!     .add_module_rule(json!({"test": "/\\.txt$/", "type": "asset/source"}))
//!     .enable_dev_server(DevServerPort::Auto)
//!     .set_target("browserslist")
//!     .unwrap();
//!
//! println!("{}", serde_json::to_string_pretty(&builder.get()).unwrap());
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod merge;
pub mod rules;
pub mod target;

pub use builder::ConfigBuilder;
pub use error::{BundleConfigError, Result};
