use crate::merge::deep::merge_into;
use serde_json::{Map, Value};

/// Combine two sequences: base elements first, then the additions.
///
/// Values that are not sequences (including `null`) count as empty.
pub fn concat_sequences(base: &Value, additions: &Value) -> Vec<Value> {
	as_slice(base).iter().chain(as_slice(additions)).cloned().collect()
}

/// Read the sequence currently stored at `path`.
///
/// Returns an empty slice when the path is missing or holds something else.
pub fn sequence_at<'a>(tree: &'a Value, path: &[&str]) -> &'a [Value] {
	let mut current = tree;
	for key in path {
		match current.get(*key) {
			Some(next) => current = next,
			None => return &[],
		}
	}
	as_slice(current)
}

/// Wrap `value` in nested single-key mappings following `path`.
///
/// `nest(&["module", "rules"], v)` yields `{"module": {"rules": v}}`.
pub fn nest(path: &[&str], value: Value) -> Value {
	path.iter().rev().fold(value, |inner, key| {
		let mut map = Map::new();
		map.insert((*key).to_string(), inner);
		Value::Object(map)
	})
}

/// Append `additions` to the sequence at `path`, creating it if absent.
///
/// This is the explicit second merge pass: the combined sequence is built
/// first and then merged in, replacing whatever was at `path`.
pub fn append_at<'a>(tree: &'a mut Value, path: &[&str], additions: &[Value]) -> &'a mut Value {
	let mut combined = sequence_at(tree, path).to_vec();
	combined.extend_from_slice(additions);
	merge_into(tree, &nest(path, Value::Array(combined)))
}

fn as_slice(value: &Value) -> &[Value] {
	match value {
		Value::Array(items) => items,
		_ => &[],
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_concat_keeps_order() {
		let combined = concat_sequences(&json!([1, 2]), &json!([3, 4]));
		assert_eq!(combined, vec![json!(1), json!(2), json!(3), json!(4)]);
	}

	#[test]
	fn test_concat_treats_non_sequences_as_empty() {
		assert_eq!(concat_sequences(&Value::Null, &json!([1])), vec![json!(1)]);
		assert_eq!(concat_sequences(&json!([1]), &json!({"a": 1})), vec![json!(1)]);
		assert!(concat_sequences(&Value::Null, &Value::Null).is_empty());
	}

	#[test]
	fn test_sequence_at() {
		let tree = json!({"module": {"rules": [{"loader": "a"}]}, "plugins": "oops"});
		assert_eq!(sequence_at(&tree, &["module", "rules"]).len(), 1);
		assert!(sequence_at(&tree, &["plugins"]).is_empty());
		assert!(sequence_at(&tree, &["externals"]).is_empty());
		assert!(sequence_at(&tree, &["module", "rules", "deeper"]).is_empty());
	}

	#[test]
	fn test_nest() {
		assert_eq!(
			nest(&["module", "rules"], json!([])),
			json!({"module": {"rules": []}})
		);
		assert_eq!(nest(&[], json!(1)), json!(1));
	}

	#[test]
	fn test_append_at_existing() {
		let mut tree = json!({"module": {"rules": [1], "noParse": "x"}});
		append_at(&mut tree, &["module", "rules"], &[json!(2), json!(3)]);
		assert_eq!(tree, json!({"module": {"rules": [1, 2, 3], "noParse": "x"}}));
	}

	#[test]
	fn test_append_at_creates_sequence() {
		let mut tree = json!({"mode": "development"});
		append_at(&mut tree, &["externals"], &[json!("lodash")]);
		assert_eq!(tree, json!({"mode": "development", "externals": ["lodash"]}));
	}
}
