use crate::rules::pattern::{Pattern, alternation};
use serde_json::{Value, json};

/// Dependency packages that still go through the script transformer by default.
pub const DEFAULT_TRANSPILED_DEPENDENCIES: &[&str] = &[
	"scratch-paint",
	"scratch-render",
	"scratch-svg-renderer",
	"scratch-vm",
];

/// Path fragment identifying installed dependency directories.
pub const DEPENDENCY_DIR_PATTERN: &str = r"[\\/]node_modules[\\/]";

const SCRIPT_LOADER: &str = "babel-loader";
const TYPESCRIPT_LOADER: &str = "ts-loader";
const BASE_PRESET: &str = "@babel/preset-env";
const REACT_PRESET: &str = "@babel/preset-react";
const CSS_LOCAL_IDENT_NAME: &str = "[name]_[local]_[hash:base64:5]";
const HEX_INLINE_LIMIT: u64 = 16 * 1024;

/// Source files handled by the primary script rule.
pub fn script_test(enable_react: bool) -> Pattern {
	if enable_react {
		Pattern::regex(r"\.[cm]?jsx?$")
	} else {
		Pattern::regex(r"\.[cm]?js$")
	}
}

/// Typed source files handled by the TypeScript rule.
pub fn typescript_test(enable_react: bool) -> Pattern {
	if enable_react {
		Pattern::regex(r"\.[cm]?tsx?$")
	} else {
		Pattern::regex(r"\.[cm]?ts$")
	}
}

/// Module resolution extensions, most preferred first.
///
/// Dialect extensions sit ahead of `...`, which stands for the bundler's own
/// defaults.
pub fn resolve_extensions(enable_react: bool, enable_ts: bool) -> Vec<&'static str> {
	let mut extensions = vec![".mjs", ".cjs", ".js"];
	if enable_react {
		extensions.push(".jsx");
	}
	if enable_ts {
		extensions.push(".ts");
		if enable_react {
			extensions.push(".tsx");
		}
	}
	extensions.push("...");
	extensions
}

/// Exclusion for the script rule: every dependency directory except the
/// packages listed in `transpiled`.
pub fn dependency_exclusion(transpiled: &[String]) -> Value {
	let dependencies = Pattern::regex(DEPENDENCY_DIR_PATTERN);
	if transpiled.is_empty() {
		return json!([dependencies]);
	}

	let allowed = Pattern::regex(format!(
		r"{}{}[\\/]",
		DEPENDENCY_DIR_PATTERN,
		alternation(transpiled)
	));
	json!([{
		"and": [dependencies, {"not": [allowed]}]
	}])
}

/// The primary rule routing script sources through the transformer.
pub fn script_rule(enable_react: bool, transpiled: &[String]) -> Value {
	let mut presets = vec![BASE_PRESET];
	if enable_react {
		presets.push(REACT_PRESET);
	}

	json!({
		"test": script_test(enable_react),
		"loader": SCRIPT_LOADER,
		"exclude": dependency_exclusion(transpiled),
		"options": {
			"presets": presets
		}
	})
}

/// Resource-query rules selecting how an imported asset is emitted, plus the
/// legacy `.hex` firmware rule.
pub fn asset_rules() -> Vec<Value> {
	vec![
		json!({
			"resourceQuery": Pattern::literal("?asset"),
			"type": "asset"
		}),
		json!({
			"resourceQuery": Pattern::regex(r"^\?(resource|file)$"),
			"type": "asset/resource"
		}),
		json!({
			"resourceQuery": Pattern::regex(r"^\?(inline|url)$"),
			"type": "asset/inline"
		}),
		json!({
			"resourceQuery": Pattern::regex(r"^\?(source|raw)$"),
			"type": "asset/source"
		}),
		json!({
			"resourceQuery": Pattern::literal("?arrayBuffer"),
			"type": "javascript/auto",
			"use": "arraybuffer-loader"
		}),
		json!({
			"test": Pattern::regex(r"\.hex$"),
			"use": [{
				"loader": "url-loader",
				"options": {
					"limit": HEX_INLINE_LIMIT
				}
			}]
		}),
	]
}

fn postcss_loader() -> Value {
	json!({
		"loader": "postcss-loader",
		"options": {
			"postcssOptions": {
				"plugins": ["postcss-import", "postcss-simple-vars", "autoprefixer"]
			}
		}
	})
}

/// Style-sheet rules: CSS modules for everything except `exceptions`, plain
/// global CSS for files matching `exceptions`.
pub fn css_rules(exceptions: &[String]) -> Vec<Value> {
	let exceptions: Vec<Value> = exceptions
		.iter()
		.map(|source| Pattern::regex(source.as_str()).to_value())
		.collect();
	let css = Pattern::regex(r"\.css$");

	vec![
		json!({
			"test": css,
			"exclude": exceptions,
			"use": [
				"style-loader",
				{
					"loader": "css-loader",
					"options": {
						"modules": {
							"localIdentName": CSS_LOCAL_IDENT_NAME,
							"exportLocalsConvention": "camelCase"
						},
						"importLoaders": 1,
						"esModule": false
					}
				},
				postcss_loader()
			]
		}),
		json!({
			"test": css,
			"include": exceptions,
			"use": [
				"style-loader",
				{
					"loader": "css-loader",
					"options": {
						"importLoaders": 1,
						"esModule": false
					}
				},
				postcss_loader()
			]
		}),
	]
}

/// Rule routing typed sources through the TypeScript transformer.
pub fn typescript_rule(enable_react: bool) -> Value {
	json!({
		"test": typescript_test(enable_react),
		"loader": TYPESCRIPT_LOADER,
		"exclude": [Pattern::regex(DEPENDENCY_DIR_PATTERN)]
	})
}

/// Shim exposing `Buffer` as a global for browser builds.
pub fn provide_plugin() -> Value {
	json!({
		"plugin": "webpack.ProvidePlugin",
		"options": {
			"Buffer": ["buffer", "Buffer"]
		}
	})
}

/// Minimizer with a bounded worker count.
pub fn minimizer_plugin(parallel: u32) -> Value {
	json!({
		"plugin": "terser-webpack-plugin",
		"options": {
			"parallel": parallel
		}
	})
}
