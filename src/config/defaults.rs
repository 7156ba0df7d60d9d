use crate::config::types::{BuildMode, BuilderOptions};
use crate::merge::nest;
use crate::rules::descriptors::{
	asset_rules, css_rules, minimizer_plugin, provide_plugin, resolve_extensions, script_rule,
	typescript_rule,
};
use serde_json::{Map, Value, json};

/// File name pattern for split chunks.
pub const DEFAULT_CHUNK_FILENAME: &str = "chunks/[name].[chunkhash].js";

/// File name pattern for emitted assets when code splitting.
pub const DEFAULT_ASSET_FILENAME: &str = "assets/[name].[hash][ext][query]";

/// Fixed library export style.
pub const LIBRARY_TYPE: &str = "umd2";

const DEVTOOL: &str = "cheap-module-source-map";

/// Build the default configuration tree for `options` in `mode`.
///
/// Pure: the same inputs always give the same tree.
pub fn build_defaults(options: &BuilderOptions, mode: BuildMode) -> Value {
	let src_dir = options.src_dir();
	let entry_path = src_dir.join("index").to_string_lossy().into_owned();

	let entry = match options.library() {
		Some(name) => nest(&[name], json!(entry_path)),
		None => json!(entry_path),
	};

	json!({
		"mode": mode,
		"devtool": DEVTOOL,
		"entry": entry,
		"optimization": optimization(options, mode),
		"output": output(options),
		"resolve": {
			"extensions": resolve_extensions(options.enable_react, options.enable_ts)
		},
		"module": {
			"rules": module_rules(options)
		},
		"plugins": [provide_plugin()]
	})
}

fn optimization(options: &BuilderOptions, mode: BuildMode) -> Value {
	let mut optimization = Map::new();
	optimization.insert("minimize".to_string(), json!(mode.is_production()));

	if options.should_split_chunks {
		optimization.insert(
			"splitChunks".to_string(),
			json!({
				"chunks": "all",
				"filename": DEFAULT_CHUNK_FILENAME
			}),
		);
		optimization.insert("mergeDuplicateChunks".to_string(), json!(true));
	}

	if mode.is_production() {
		optimization.insert(
			"minimizer".to_string(),
			json!([minimizer_plugin(options.minimizer_parallelism)]),
		);
	}

	Value::Object(optimization)
}

fn output(options: &BuilderOptions) -> Value {
	let mut library = Map::new();
	if let Some(name) = options.library() {
		library.insert("name".to_string(), json!(name));
	}
	library.insert("type".to_string(), json!(LIBRARY_TYPE));

	let mut output = Map::new();
	output.insert("clean".to_string(), json!(true));
	output.insert("filename".to_string(), json!("[name].js"));
	if options.should_split_chunks {
		output.insert("chunkFilename".to_string(), json!(DEFAULT_CHUNK_FILENAME));
		output.insert("assetModuleFilename".to_string(), json!(DEFAULT_ASSET_FILENAME));
	}
	output.insert(
		"path".to_string(),
		json!(options.dist_dir().to_string_lossy()),
	);
	output.insert("library".to_string(), Value::Object(library));
	output.insert("publicPath".to_string(), json!(options.public_path));

	Value::Object(output)
}

fn module_rules(options: &BuilderOptions) -> Vec<Value> {
	let mut rules = vec![script_rule(
		options.enable_react,
		&options.transpile_dependencies,
	)];
	rules.extend(asset_rules());

	if options.enable_react {
		rules.extend(css_rules(&options.css_module_exceptions));
	}
	if options.enable_ts {
		rules.push(typescript_rule(options.enable_react));
	}

	rules
}
