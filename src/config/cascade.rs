use crate::config::parser::parse_options_file;
use crate::config::types::BuilderOptions;
use crate::error::{BundleConfigError, Result};
use std::path::{Path, PathBuf};

/// Name of the options file looked up by [`discover_options_file`].
pub const OPTIONS_FILE_NAME: &str = "bundle-config.toml";

/// Find the nearest options file, starting at `start_dir` and walking up the
/// directory tree.
pub fn discover_options_file(start_dir: &Path) -> Option<PathBuf> {
	let mut current_dir = Some(start_dir);

	while let Some(dir) = current_dir {
		let candidate = dir.join(OPTIONS_FILE_NAME);
		if candidate.is_file() {
			return Some(candidate);
		}
		current_dir = dir.parent();
	}

	None
}

/// A parsed options file together with where it was found.
#[derive(Debug, Clone)]
pub struct LoadedOptions {
	/// The parsed options.
	pub options: BuilderOptions,

	/// The path these options were loaded from.
	pub path: PathBuf,
}

/// Discover and parse the nearest options file above `start_dir`.
pub fn load_options(start_dir: &Path) -> Result<LoadedOptions> {
	let path = discover_options_file(start_dir).ok_or_else(|| BundleConfigError::OptionsNotFound {
		path: start_dir.join(OPTIONS_FILE_NAME),
	})?;
	let options = parse_options_file(&path)?;
	Ok(LoadedOptions { options, path })
}

/// Parse an explicit options file, or discover one above `start_dir`.
pub fn resolve_options(explicit: Option<&Path>, start_dir: &Path) -> Result<LoadedOptions> {
	match explicit {
		Some(path) => {
			if !path.is_file() {
				return Err(BundleConfigError::OptionsNotFound {
					path: path.to_path_buf(),
				});
			}
			let options = parse_options_file(path)?;
			Ok(LoadedOptions {
				options,
				path: path.to_path_buf(),
			})
		}
		None => load_options(start_dir),
	}
}
