use crate::error::{BundleConfigError, Result};
use serde_json::{Map, Value};
use std::fmt::Debug;
use std::io::ErrorKind;
use std::path::Path;

/// Directory holding installed dependency packages.
pub const MODULES_DIR: &str = "node_modules";

/// Lists the installed dependency packages of a project.
///
/// Server-runtime builds keep these out of the bundle.
pub trait DependencyEnumerator: Debug + Send + Sync {
	/// Return the package names installed under `root`.
	fn dependencies(&self, root: &Path) -> Result<Vec<String>>;
}

/// Enumerates packages by listing `<root>/node_modules`.
///
/// Scoped packages are reported as `@scope/name`. Dot-directories (such as
/// `.bin`) are skipped. A missing directory yields no packages.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeModulesEnumerator;

impl DependencyEnumerator for NodeModulesEnumerator {
	fn dependencies(&self, root: &Path) -> Result<Vec<String>> {
		let modules_dir = root.join(MODULES_DIR);
		let mut names = Vec::new();

		for entry in read_dir_names(&modules_dir)? {
			if entry.starts_with('@') {
				for scoped in read_dir_names(&modules_dir.join(&entry))? {
					names.push(format!("{}/{}", entry, scoped));
				}
			} else {
				names.push(entry);
			}
		}

		names.sort();
		Ok(names)
	}
}

fn read_dir_names(dir: &Path) -> Result<Vec<String>> {
	let scan_error = |source: std::io::Error| BundleConfigError::DependencyScanFailed {
		path: dir.to_path_buf(),
		source,
	};

	let entries = match std::fs::read_dir(dir) {
		Ok(entries) => entries,
		Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
		Err(err) => return Err(scan_error(err)),
	};

	let mut names = Vec::new();
	for entry in entries {
		let entry = entry.map_err(scan_error)?;
		let name = entry.file_name().to_string_lossy().into_owned();
		if !name.starts_with('.') {
			names.push(name);
		}
	}
	Ok(names)
}

/// A fixed dependency list, independent of the filesystem.
#[derive(Debug, Clone, Default)]
pub struct StaticDependencies(pub Vec<String>);

impl DependencyEnumerator for StaticDependencies {
	fn dependencies(&self, _root: &Path) -> Result<Vec<String>> {
		Ok(self.0.clone())
	}
}

/// Externals entry mapping each dependency to a CommonJS `require`.
pub fn commonjs_externals(names: &[String]) -> Value {
	let map: Map<String, Value> = names
		.iter()
		.map(|name| (name.clone(), Value::String(format!("commonjs {}", name))))
		.collect();
	Value::Object(map)
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;
	use std::fs;

	#[test]
	fn test_node_modules_listing() {
		let temp_dir = tempfile::tempdir().unwrap();
		let modules = temp_dir.path().join(MODULES_DIR);
		fs::create_dir_all(modules.join("lodash")).unwrap();
		fs::create_dir_all(modules.join(".bin")).unwrap();
		fs::create_dir_all(modules.join("@babel").join("core")).unwrap();
		fs::create_dir_all(modules.join("@babel").join("runtime")).unwrap();

		let names = NodeModulesEnumerator.dependencies(temp_dir.path()).unwrap();
		assert_eq!(names, vec!["@babel/core", "@babel/runtime", "lodash"]);
	}

	#[test]
	fn test_missing_node_modules_is_empty() {
		let temp_dir = tempfile::tempdir().unwrap();
		let names = NodeModulesEnumerator.dependencies(temp_dir.path()).unwrap();
		assert!(names.is_empty());
	}

	#[test]
	fn test_static_dependencies() {
		let deps = StaticDependencies(vec!["a".to_string()]);
		assert_eq!(deps.dependencies(Path::new("/nowhere")).unwrap(), vec!["a"]);
	}

	#[test]
	fn test_commonjs_externals() {
		let names = vec!["lodash".to_string(), "@babel/core".to_string()];
		assert_eq!(
			commonjs_externals(&names),
			json!({"lodash": "commonjs lodash", "@babel/core": "commonjs @babel/core"})
		);
	}
}
