use crate::config::types::BuilderOptions;
use crate::error::{BundleConfigError, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Parse an options file from the given path.
///
/// A relative `path` is taken from the current directory, so relative
/// locations inside the file always resolve to absolute ones.
pub fn parse_options_file(path: &Path) -> Result<BuilderOptions> {
	let read_error = |source: std::io::Error| BundleConfigError::OptionsReadError {
		path: path.to_path_buf(),
		source,
	};

	let absolute = std::path::absolute(path).map_err(read_error)?;
	let content = std::fs::read_to_string(&absolute).map_err(read_error)?;

	parse_options_str(&content, &absolute)
}

/// Parse options from a string (useful for testing).
///
/// Relative locations are resolved against the directory containing `path`.
pub fn parse_options_str(content: &str, path: &Path) -> Result<BuilderOptions> {
	let mut options: BuilderOptions =
		toml::from_str(content).map_err(|source| BundleConfigError::OptionsParseError {
			path: path.to_path_buf(),
			source,
		})?;

	if let Some(base) = path.parent() {
		options.root_path = resolve_against(base, &options.root_path);
		for location in [&mut options.src_path, &mut options.dist_path]
			.into_iter()
			.flatten()
		{
			*location = resolve_against(base, location);
		}
	}

	// Validate the parsed options
	options.validate()?;

	Ok(options)
}

/// Join a relative `location` onto `base`, dropping `.` components.
fn resolve_against(base: &Path, location: &Path) -> PathBuf {
	if location.is_absolute() {
		return location.to_path_buf();
	}
	base.join(location).components().collect()
}

/// Load an overrides document: JSON for `.json` files, TOML otherwise.
///
/// The top level must be a mapping.
pub fn load_overrides(path: &Path) -> Result<Value> {
	let content =
		std::fs::read_to_string(path).map_err(|source| BundleConfigError::OverridesReadError {
			path: path.to_path_buf(),
			source,
		})?;

	let is_json = path
		.extension()
		.is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

	let value = if is_json {
		serde_json::from_str(&content).map_err(|source| BundleConfigError::OverridesJsonError {
			path: path.to_path_buf(),
			source,
		})?
	} else {
		let table: toml::Table =
			toml::from_str(&content).map_err(|source| BundleConfigError::OverridesTomlError {
				path: path.to_path_buf(),
				source,
			})?;
		toml_to_json(toml::Value::Table(table))
	};

	if !value.is_object() {
		return Err(BundleConfigError::InvalidOverrides {
			path: path.to_path_buf(),
		});
	}

	Ok(value)
}

/// Convert a TOML value to JSON. Non-finite floats become `null` (absent).
fn toml_to_json(value: toml::Value) -> Value {
	match value {
		toml::Value::String(s) => Value::String(s),
		toml::Value::Integer(i) => Value::Number(i.into()),
		toml::Value::Float(f) => serde_json::Number::from_f64(f)
			.map(Value::Number)
			.unwrap_or(Value::Null),
		toml::Value::Boolean(b) => Value::Bool(b),
		toml::Value::Datetime(dt) => Value::String(dt.to_string()),
		toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
		toml::Value::Table(table) => Value::Object(
			table
				.into_iter()
				.map(|(k, v)| (k, toml_to_json(v)))
				.collect::<Map<String, Value>>(),
		),
	}
}
