use serde_json::{Map, Value};

/// Merge `overrides` on top of `base`, returning a new tree.
///
/// Neither argument is modified. A `null` base is treated as an empty mapping.
pub fn merge(base: &Value, overrides: &Value) -> Value {
	let mut merged = base.clone();
	merge_into(&mut merged, overrides);
	merged
}

/// Merge `overrides` into `target` in place and return `target`.
///
/// Rules, applied key by key:
/// - `null` in the override means "absent" and keeps the base value
/// - two mappings are merged recursively
/// - anything else (scalars, sequences, kind mismatches) is replaced by the
///   override's value
///
/// Both roots are mappings. An override root that is not a mapping is ignored.
pub fn merge_into<'a>(target: &'a mut Value, overrides: &Value) -> &'a mut Value {
	if target.is_null() {
		*target = Value::Object(Map::new());
	}
	if overrides.is_object() {
		merge_value(target, overrides);
	}
	target
}

fn merge_value(base: &mut Value, overrides: &Value) {
	match (base, overrides) {
		(_, Value::Null) => {}
		(Value::Object(base_map), Value::Object(override_map)) => {
			for (key, override_val) in override_map {
				if override_val.is_null() {
					continue;
				}
				match base_map.get_mut(key) {
					Some(base_val) => merge_value(base_val, override_val),
					None => {
						base_map.insert(key.clone(), without_nulls(override_val));
					}
				}
			}
		}
		(base, overrides) => *base = without_nulls(overrides),
	}
}

/// Clone a value, dropping `null` entries from every mapping.
///
/// Sequence elements are opaque and copied untouched.
fn without_nulls(value: &Value) -> Value {
	match value {
		Value::Object(map) => Value::Object(
			map.iter()
				.filter(|(_, v)| !v.is_null())
				.map(|(k, v)| (k.clone(), without_nulls(v)))
				.collect(),
		),
		other => other.clone(),
	}
}
