use crate::error::Result;
use crate::rules::descriptors::DEFAULT_TRANSPILED_DEPENDENCIES;
use crate::rules::pattern::Pattern;
use serde::{Deserialize, Serialize, Serializer};
use std::path::PathBuf;

/// Inputs for building a configuration, typically loaded from a
/// `bundle-config.toml` file.
///
/// `root_path` should be absolute: entry and output locations are derived from
/// it and the bundler resolves them against nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BuilderOptions {
	/// Project root. Relative paths in an options file are resolved against
	/// the file's directory.
	pub root_path: PathBuf,

	/// Source directory. Defaults to `<root>/src`.
	pub src_path: Option<PathBuf>,

	/// Output directory. Defaults to `<root>/dist`.
	pub dist_path: Option<PathBuf>,

	/// Public URL of the output directory.
	pub public_path: String,

	/// Library name, used as the entry key and the exported library name.
	pub library_name: Option<String>,

	/// Enable JSX sources and the React preset.
	pub enable_react: bool,

	/// Enable TypeScript sources.
	pub enable_ts: bool,

	/// Enable code splitting into separate chunk files.
	pub should_split_chunks: bool,

	/// Regex sources of style sheets that are global CSS rather than CSS
	/// modules. Only used when `enable_react` is set.
	pub css_module_exceptions: Vec<String>,

	/// Dependency packages that are still routed through the script
	/// transformer.
	pub transpile_dependencies: Vec<String>,

	/// Worker count for the production minimizer.
	pub minimizer_parallelism: u32,
}

impl Default for BuilderOptions {
	fn default() -> Self {
		BuilderOptions {
			root_path: PathBuf::from("."),
			src_path: None,
			dist_path: None,
			public_path: "/".to_string(),
			library_name: None,
			enable_react: false,
			enable_ts: false,
			should_split_chunks: false,
			css_module_exceptions: Vec::new(),
			transpile_dependencies: DEFAULT_TRANSPILED_DEPENDENCIES
				.iter()
				.map(|name| name.to_string())
				.collect(),
			minimizer_parallelism: 2,
		}
	}
}

impl BuilderOptions {
	pub fn new(root_path: impl Into<PathBuf>) -> Self {
		BuilderOptions {
			root_path: root_path.into(),
			..Default::default()
		}
	}

	/// Source directory, explicit or `<root>/src`.
	pub fn src_dir(&self) -> PathBuf {
		self.src_path
			.clone()
			.unwrap_or_else(|| self.root_path.join("src"))
	}

	/// Output directory, explicit or `<root>/dist`.
	pub fn dist_dir(&self) -> PathBuf {
		self.dist_path
			.clone()
			.unwrap_or_else(|| self.root_path.join("dist"))
	}

	/// Library name, if one is set. An empty name counts as unset.
	pub fn library(&self) -> Option<&str> {
		self.library_name.as_deref().filter(|name| !name.is_empty())
	}

	/// Validate that every pattern source compiles.
	pub fn validate(&self) -> Result<()> {
		for source in &self.css_module_exceptions {
			Pattern::regex(source.as_str()).validate()?;
		}
		Ok(())
	}
}

/// Whether the build is for production or development.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
	#[default]
	Development,
	Production,
}

impl BuildMode {
	/// Select the mode from a `NODE_ENV`-style value. Only `production` counts.
	pub fn from_node_env(value: Option<&str>) -> Self {
		match value {
			Some("production") => BuildMode::Production,
			_ => BuildMode::Development,
		}
	}

	pub fn is_production(&self) -> bool {
		matches!(self, BuildMode::Production)
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			BuildMode::Development => "development",
			BuildMode::Production => "production",
		}
	}
}

/// Port for the development server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DevServerPort {
	/// Let the server pick a free port.
	#[default]
	Auto,
	Fixed(u16),
}

impl Serialize for DevServerPort {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		match self {
			DevServerPort::Auto => serializer.serialize_str("auto"),
			DevServerPort::Fixed(port) => serializer.serialize_u16(*port),
		}
	}
}

impl From<Option<u16>> for DevServerPort {
	fn from(port: Option<u16>) -> Self {
		port.map_or(DevServerPort::Auto, DevServerPort::Fixed)
	}
}
