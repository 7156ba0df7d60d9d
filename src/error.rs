use std::path::PathBuf;

/// Library-level structured errors for bundle-config.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum BundleConfigError {
	#[error("Options file not found: {path}")]
	OptionsNotFound { path: PathBuf },

	#[error("Failed to read options file: {path}")]
	OptionsReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse options file: {path}")]
	OptionsParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Failed to read overrides file: {path}")]
	OverridesReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse JSON overrides: {path}")]
	OverridesJsonError {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error("Failed to parse TOML overrides: {path}")]
	OverridesTomlError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Overrides must be a table/object at the top level: {path}")]
	InvalidOverrides { path: PathBuf },

	#[error("Invalid regex pattern: {pattern}")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Failed to enumerate installed dependencies in: {path}")]
	DependencyScanFailed {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

/// Result type alias using BundleConfigError.
pub type Result<T> = std::result::Result<T, BundleConfigError>;
