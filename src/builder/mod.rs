//! Fluent builder over one configuration tree.
//!
//! A [`ConfigBuilder`] starts from the defaults for its options and is then
//! adjusted by chained calls. `merge` replaces sequences wholesale; the
//! `add_*` operations and `extend` append to them instead.
//!
//! A builder is meant to be used from one thread at a time. Distinct builders
//! share no mutable state.

use crate::config::defaults::build_defaults;
use crate::config::types::{BuildMode, BuilderOptions, DevServerPort};
use crate::error::Result;
use crate::merge::{append_at, concat_sequences, merge_into, nest, sequence_at};
use crate::target::{DependencyEnumerator, NodeModulesEnumerator, TargetFamily, resolve_target};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, warn};

const MODULE_RULES: &[&str] = &["module", "rules"];
const PLUGINS: &[&str] = &["plugins"];
const EXTERNALS: &[&str] = &["externals"];

/// Builds a bundler configuration from defaults plus incremental changes.
#[derive(Debug)]
pub struct ConfigBuilder {
	options: BuilderOptions,
	mode: BuildMode,
	enumerator: Arc<dyn DependencyEnumerator>,
	config: Value,
}

impl ConfigBuilder {
	/// Create a development-mode builder.
	pub fn new(options: BuilderOptions) -> Self {
		Self::with_mode(options, BuildMode::Development)
	}

	/// Create a builder for the given build mode.
	pub fn with_mode(options: BuilderOptions, mode: BuildMode) -> Self {
		Self::with_enumerator(options, mode, Arc::new(NodeModulesEnumerator))
	}

	/// Create a builder that enumerates dependencies with `enumerator`.
	pub fn with_enumerator(
		options: BuilderOptions,
		mode: BuildMode,
		enumerator: Arc<dyn DependencyEnumerator>,
	) -> Self {
		if options.root_path.is_relative() {
			warn!(
				root = %options.root_path.display(),
				"root path is not absolute; the bundler may fail to resolve entry and output paths"
			);
		}

		let config = build_defaults(&options, mode);
		debug!(mode = mode.as_str(), "built default configuration");

		ConfigBuilder {
			options,
			mode,
			enumerator,
			config,
		}
	}

	/// The options this builder was created from.
	pub fn options(&self) -> &BuilderOptions {
		&self.options
	}

	pub fn mode(&self) -> BuildMode {
		self.mode
	}

	/// Snapshot of the current configuration.
	///
	/// The returned tree is an independent copy.
	pub fn get(&self) -> Value {
		self.config.clone()
	}

	/// Merge `overrides` into the configuration.
	///
	/// Sequences in `overrides` replace the current ones. An `overrides` that
	/// is not a mapping leaves the configuration unchanged.
	pub fn merge(&mut self, overrides: &Value) -> &mut Self {
		merge_into(&mut self.config, overrides);
		debug!("merged overrides");
		self
	}

	/// Apply an additions document, appending its rules and plugins.
	///
	/// Everything except `module.rules` and `plugins` merges like
	/// [`merge`](Self::merge). Those two sequences keep their current entries
	/// and get the additions' entries appended.
	pub fn extend(&mut self, additions: &Value) -> &mut Self {
		let rules = concat_sequences(
			&self.config["module"]["rules"],
			&additions["module"]["rules"],
		);
		let plugins = concat_sequences(&self.config["plugins"], &additions["plugins"]);

		merge_into(&mut self.config, additions);
		merge_into(&mut self.config, &nest(MODULE_RULES, Value::Array(rules)));
		merge_into(&mut self.config, &nest(PLUGINS, Value::Array(plugins)));
		debug!("extended configuration");
		self
	}

	/// Append a rule to `module.rules`.
	pub fn add_module_rule(&mut self, rule: Value) -> &mut Self {
		append_at(&mut self.config, MODULE_RULES, &[rule]);
		debug!(
			count = sequence_at(&self.config, MODULE_RULES).len(),
			"added module rule"
		);
		self
	}

	/// Append a plugin to `plugins`.
	pub fn add_plugin(&mut self, plugin: Value) -> &mut Self {
		append_at(&mut self.config, PLUGINS, &[plugin]);
		debug!(count = sequence_at(&self.config, PLUGINS).len(), "added plugin");
		self
	}

	/// Append entries to `externals`, creating it if needed.
	pub fn add_externals(&mut self, externals: Vec<Value>) -> &mut Self {
		append_at(&mut self.config, EXTERNALS, &externals);
		debug!(added = externals.len(), "added externals");
		self
	}

	/// Set the target environment and merge in its preset.
	///
	/// Fails only if dependency enumeration for a server-runtime target fails.
	pub fn set_target(&mut self, label: &str) -> Result<&mut Self> {
		let fragment = resolve_target(
			label,
			&self.options.dist_dir(),
			&self.options.root_path,
			self.enumerator.as_ref(),
		)?;
		debug!(
			target = label,
			family = TargetFamily::classify(label).as_str(),
			"set target"
		);
		Ok(self.merge(&fragment))
	}

	/// Enable the development server on `port`.
	pub fn enable_dev_server(&mut self, port: DevServerPort) -> &mut Self {
		self.merge(&json!({
			"devServer": {
				"client": {
					"overlay": true,
					"progress": true
				},
				"port": port
			}
		}))
	}
}

impl Clone for ConfigBuilder {
	/// Rebuild from the same options, then merge the current tree on top.
	fn clone(&self) -> Self {
		let mut cloned = ConfigBuilder::with_enumerator(
			self.options.clone(),
			self.mode,
			Arc::clone(&self.enumerator),
		);
		cloned.merge(&self.config);
		cloned
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::target::StaticDependencies;
	use std::path::Path;

	fn options() -> BuilderOptions {
		BuilderOptions {
			library_name: Some("test-library".to_string()),
			..BuilderOptions::new("/project")
		}
	}

	fn builder() -> ConfigBuilder {
		ConfigBuilder::with_enumerator(
			options(),
			BuildMode::Development,
			Arc::new(StaticDependencies(vec!["lodash".to_string()])),
		)
	}

	fn rules(config: &Value) -> Vec<Value> {
		config["module"]["rules"].as_array().unwrap().clone()
	}

	#[test]
	fn test_entry_after_construction() {
		let config = ConfigBuilder::new(options()).get();
		let entry = config["entry"]["test-library"].as_str().unwrap();
		assert!(Path::new(entry).starts_with("/project/src"));

		let custom = BuilderOptions {
			src_path: Some("/elsewhere".into()),
			..options()
		};
		let config = ConfigBuilder::new(custom).get();
		let entry = config["entry"]["test-library"].as_str().unwrap();
		assert!(Path::new(entry).starts_with("/elsewhere"));
	}

	#[test]
	fn test_merge_scalars_compose() {
		let x = json!({"devtool": "source-map", "output": {"publicPath": "/a/"}});
		let y = json!({"output": {"publicPath": "/b/", "clean": false}});

		let mut sequential = builder();
		sequential.merge(&x).merge(&y);

		let mut combined = builder();
		combined.merge(&crate::merge::merge(&x, &y));

		let a = sequential.get();
		let b = combined.get();
		assert_eq!(a["devtool"], b["devtool"]);
		assert_eq!(a["output"], b["output"]);
		assert_eq!(a["output"]["publicPath"], "/b/");
		assert_eq!(a["output"]["clean"], false);
		assert_eq!(a["output"]["filename"], "[name].js");
	}

	#[test]
	fn test_merge_replaces_sequences() {
		let mut b = builder();
		b.merge(&json!({"plugins": [{"plugin": "Only"}]}));
		assert_eq!(b.get()["plugins"], json!([{"plugin": "Only"}]));

		b.merge(&json!({"module": {"rules": []}}));
		assert_eq!(b.get()["module"]["rules"], json!([]));
	}

	#[test]
	fn test_merge_ignores_non_mapping_overrides() {
		let mut b = builder();
		let before = b.get();
		b.merge(&json!([1])).extend(&json!("production"));
		assert_eq!(b.get(), before);
	}

	#[test]
	fn test_add_module_rule_twice() {
		let mut b = builder();
		let before = rules(&b.get());
		let rule = json!({"test": "/\\.txt$/", "type": "asset/source"});

		b.add_module_rule(rule.clone()).add_module_rule(rule.clone());

		let after = rules(&b.get());
		assert_eq!(after.len(), before.len() + 2);
		assert_eq!(&after[..before.len()], &before[..]);
		assert_eq!(after[after.len() - 2], rule);
		assert_eq!(after[after.len() - 1], rule);
	}

	#[test]
	fn test_add_plugin_appends() {
		let mut b = builder();
		b.add_plugin(json!({"plugin": "First"}))
			.add_plugin(json!({"plugin": "Second"}));

		let plugins = b.get()["plugins"].as_array().unwrap().clone();
		assert_eq!(plugins.len(), 3);
		assert_eq!(plugins[0]["plugin"], "webpack.ProvidePlugin");
		assert_eq!(plugins[1]["plugin"], "First");
		assert_eq!(plugins[2]["plugin"], "Second");
	}

	#[test]
	fn test_add_externals_creates_and_appends() {
		let mut b = builder();
		assert!(b.get().get("externals").is_none());

		b.add_externals(vec![json!("react")]);
		b.add_externals(vec![json!("react-dom"), json!({"jquery": "jQuery"})]);
		assert_eq!(
			b.get()["externals"],
			json!(["react", "react-dom", {"jquery": "jQuery"}])
		);
	}

	#[test]
	fn test_get_returns_independent_copy() {
		let b = builder();
		let mut snapshot = b.get();
		snapshot["mode"] = json!("production");
		snapshot["module"]["rules"].as_array_mut().unwrap().clear();

		let fresh = b.get();
		assert_eq!(fresh["mode"], "development");
		assert!(!rules(&fresh).is_empty());
	}

	#[test]
	fn test_clone_is_independent() {
		let mut original = builder();
		original.merge(&json!({"devtool": "eval"}));

		let mut cloned = original.clone();
		assert_eq!(cloned.get(), original.get());

		cloned
			.add_plugin(json!({"plugin": "CloneOnly"}))
			.merge(&json!({"devtool": "source-map"}));
		assert_eq!(original.get()["devtool"], "eval");
		assert_eq!(original.get()["plugins"].as_array().unwrap().len(), 1);

		original.add_module_rule(json!({"loader": "original-only"}));
		assert_eq!(
			rules(&cloned.get()).len() + 1,
			rules(&original.get()).len()
		);
		assert_eq!(cloned.get()["devtool"], "source-map");
		assert_eq!(cloned.options(), original.options());
	}

	#[test]
	fn test_clone_keeps_replaced_sequences() {
		let mut original = builder();
		original.merge(&json!({"plugins": []}));

		let cloned = original.clone();
		assert_eq!(cloned.get()["plugins"], json!([]));
	}

	#[test]
	fn test_set_target_node() {
		let mut b = builder();
		b.set_target("node").unwrap();
		let config = b.get();

		assert_eq!(config["target"], "node");
		assert_eq!(config["externalsPresets"]["node"], true);
		assert_eq!(config["externals"], json!([{"lodash": "commonjs lodash"}]));
		assert!(Path::new(config["output"]["path"].as_str().unwrap()).ends_with("dist/node"));
	}

	#[test]
	fn test_set_target_browserslist() {
		let mut b = builder();
		b.set_target("browserslist").unwrap();
		let config = b.get();

		assert_eq!(config["target"], "browserslist");
		assert_eq!(config["externalsPresets"]["web"], true);
		assert!(config.get("externals").is_none());
		assert!(Path::new(config["output"]["path"].as_str().unwrap()).ends_with("dist/web"));
	}

	#[test]
	fn test_set_target_other() {
		let mut b = builder();
		let before = b.get();
		b.set_target("something-else").unwrap();
		let config = b.get();

		assert_eq!(config["target"], "something-else");
		assert!(config.get("externalsPresets").is_none());
		assert!(config.get("externals").is_none());
		assert_eq!(config["output"]["path"], before["output"]["path"]);
	}

	#[test]
	fn test_enable_dev_server() {
		let mut b = builder();
		b.enable_dev_server(DevServerPort::Auto);
		assert_eq!(
			b.get()["devServer"],
			json!({"client": {"overlay": true, "progress": true}, "port": "auto"})
		);

		b.enable_dev_server(DevServerPort::Fixed(8601));
		assert_eq!(b.get()["devServer"]["port"], 8601);
	}

	#[test]
	fn test_extend_appends_rules_and_plugins() {
		let mut b = builder();
		let before = rules(&b.get());

		b.extend(&json!({
			"target": "web",
			"output": {"publicPath": "/static/"},
			"module": {"rules": [{"loader": "raw-loader"}]},
			"plugins": [{"plugin": "Extra"}]
		}));

		let config = b.get();
		let after = rules(&config);
		assert_eq!(after.len(), before.len() + 1);
		assert_eq!(after[0], before[0]);
		assert_eq!(after[after.len() - 1], json!({"loader": "raw-loader"}));
		assert_eq!(config["plugins"].as_array().unwrap().len(), 2);
		assert_eq!(config["plugins"][1]["plugin"], "Extra");
		assert_eq!(config["target"], "web");
		assert_eq!(config["output"]["publicPath"], "/static/");
		assert_eq!(config["output"]["filename"], "[name].js");
	}

	#[test]
	fn test_extend_without_sequences_keeps_defaults() {
		let mut b = builder();
		let before = b.get();
		b.extend(&json!({"devtool": false}));

		let config = b.get();
		assert_eq!(config["devtool"], false);
		assert_eq!(config["module"], before["module"]);
		assert_eq!(config["plugins"], before["plugins"]);
	}

	#[test]
	fn test_production_builder() {
		let b = ConfigBuilder::with_mode(options(), BuildMode::Production);
		assert_eq!(b.mode(), BuildMode::Production);
		assert_eq!(b.get()["optimization"]["minimize"], true);
	}

	#[test]
	fn test_relative_root_is_accepted() {
		let b = ConfigBuilder::new(BuilderOptions::new("relative/root"));
		let entry = b.get()["entry"].as_str().unwrap().to_string();
		assert!(Path::new(&entry).starts_with("relative/root/src"));
	}
}
