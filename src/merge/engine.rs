use crate::settings::Settings;
use serde_json::{Map, Value};

/// The runtime shape of a JSON node, which decides how two nodes combine.
#[derive(Debug, Clone, Copy)]
enum Shape<'a> {
	Sequence(&'a [Value]),
	Mapping(&'a Map<String, Value>),
	Scalar,
}

impl<'a> Shape<'a> {
	fn of(value: &'a Value) -> Self {
		match value {
			Value::Array(items) => Shape::Sequence(items),
			Value::Object(map) => Shape::Mapping(map),
			_ => Shape::Scalar,
		}
	}
}

/// Merge a template into existing settings.
///
/// With no existing settings the template is returned as-is. Otherwise:
/// - arrays become the union of both, template entries first, then entries
///   only the existing side had, with duplicates removed
/// - objects merge key by key; a key on one side only is copied through
/// - for scalars or mismatched shapes, the existing value wins
///
/// Neither input is modified.
pub fn merge_settings(existing: Option<&Settings>, incoming: &Settings) -> Settings {
	match existing {
		None => incoming.clone(),
		Some(existing) => Settings::from_map(merge_maps(existing.as_map(), incoming.as_map())),
	}
}

/// Merge two JSON values following the same rules as [`merge_settings`].
pub fn merge_values(existing: &Value, incoming: &Value) -> Value {
	match (Shape::of(existing), Shape::of(incoming)) {
		(Shape::Sequence(existing), Shape::Sequence(incoming)) => {
			Value::Array(union(incoming, existing))
		}
		(Shape::Mapping(existing), Shape::Mapping(incoming)) => {
			Value::Object(merge_maps(existing, incoming))
		}
		// Existing is defined here, so it wins.
		_ => existing.clone(),
	}
}

fn merge_maps(existing: &Map<String, Value>, incoming: &Map<String, Value>) -> Map<String, Value> {
	let mut merged = Map::with_capacity(existing.len().max(incoming.len()));

	for (key, incoming_value) in incoming {
		let value = match existing.get(key) {
			Some(existing_value) => merge_values(existing_value, incoming_value),
			None => incoming_value.clone(),
		};
		merged.insert(key.clone(), value);
	}

	for (key, existing_value) in existing {
		if !merged.contains_key(key) {
			merged.insert(key.clone(), existing_value.clone());
		}
	}

	merged
}

/// Ordered union: `first` in order, then anything from `second` not seen yet.
fn union(first: &[Value], second: &[Value]) -> Vec<Value> {
	let mut out: Vec<Value> = Vec::with_capacity(first.len() + second.len());
	for item in first.iter().chain(second) {
		if !out.contains(item) {
			out.push(item.clone());
		}
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use serde_json::json;

	fn settings(value: Value) -> Settings {
		match value {
			Value::Object(map) => Settings::from_map(map),
			_ => panic!("expected object"),
		}
	}

	#[test]
	fn test_no_existing_returns_template() {
		let template = settings(json!({
			"permissions": { "allow": ["Read(src/**)", "Edit(src/**)"], "defaultMode": "default" }
		}));
		assert_eq!(merge_settings(None, &template), template);
	}

	#[test]
	fn test_arrays_union_template_first() {
		let existing = settings(json!({ "permissions": { "allow": ["A", "B"] } }));
		let template = settings(json!({ "permissions": { "allow": ["B", "C"] } }));

		let merged = merge_settings(Some(&existing), &template);
		assert_eq!(merged.into_value(), json!({ "permissions": { "allow": ["B", "C", "A"] } }));
	}

	#[test]
	fn test_arrays_remove_duplicates() {
		let existing = settings(json!({ "permissions": { "allow": ["Read(src/**)", "Bash(npm test)"] } }));
		let template = settings(json!({ "permissions": { "allow": ["Read(src/**)", "Edit(src/**)"] } }));

		let merged = merge_settings(Some(&existing), &template);
		assert_eq!(
			merged.permission_rules(crate::settings::RuleList::Allow),
			vec!["Read(src/**)", "Edit(src/**)", "Bash(npm test)"]
		);
	}

	#[test]
	fn test_existing_scalars_win() {
		let existing = settings(json!({
			"permissions": { "defaultMode": "acceptEdits" },
			"model": "claude-3-sonnet"
		}));
		let template = settings(json!({
			"permissions": { "defaultMode": "default" },
			"model": "claude-3-haiku"
		}));

		let merged = merge_settings(Some(&existing), &template);
		assert_eq!(merged.default_mode(), Some("acceptEdits"));
		assert_eq!(merged.model(), Some("claude-3-sonnet"));
	}

	#[test]
	fn test_deep_merge_objects() {
		let existing = settings(json!({
			"permissions": { "allow": ["Read(src/**)"], "defaultMode": "acceptEdits" },
			"env": { "NODE_ENV": "production" }
		}));
		let template = settings(json!({
			"permissions": { "deny": ["Bash(rm -rf *)"], "defaultMode": "default" },
			"env": { "NODE_ENV": "development", "DEBUG": "true" }
		}));

		let merged = merge_settings(Some(&existing), &template);
		assert_eq!(
			merged.into_value(),
			json!({
				"permissions": {
					"deny": ["Bash(rm -rf *)"],
					"defaultMode": "acceptEdits",
					"allow": ["Read(src/**)"]
				},
				"env": { "NODE_ENV": "production", "DEBUG": "true" }
			})
		);
	}

	#[test]
	fn test_shape_mismatch_keeps_existing() {
		let existing = settings(json!({ "hooks": "disabled", "model": null }));
		let template = settings(json!({ "hooks": { "PreToolUse": { "Bash": "x" } }, "model": "opus" }));

		let merged = merge_settings(Some(&existing), &template);
		assert_eq!(merged.get("hooks"), Some(&json!("disabled")));
		assert_eq!(merged.get("model"), Some(&Value::Null));
	}

	#[test]
	fn test_unknown_keys_round_trip() {
		let existing = settings(json!({ "statusLine": { "type": "command", "command": "x" } }));
		let template = settings(json!({ "customFlag": [1, 2] }));

		let merged = merge_settings(Some(&existing), &template);
		assert_eq!(merged.get("customFlag"), Some(&json!([1, 2])));
		assert_eq!(merged.get("statusLine"), Some(&json!({ "type": "command", "command": "x" })));
	}

	#[test]
	fn test_inputs_not_modified() {
		let existing = settings(json!({ "permissions": { "allow": ["A"] } }));
		let template = settings(json!({ "permissions": { "allow": ["B"] } }));
		let before = (existing.clone(), template.clone());

		let _ = merge_settings(Some(&existing), &template);
		assert_eq!((existing, template), before);
	}

	fn rule_set() -> impl Strategy<Value = Vec<String>> {
		prop::collection::btree_set("[A-E]\\([a-c*]{1,3}\\)", 0..6)
			.prop_map(|rules| rules.into_iter().collect())
	}

	fn document() -> impl Strategy<Value = Settings> {
		(
			rule_set(),
			rule_set(),
			prop::option::of(prop::sample::select(vec!["default", "plan", "acceptEdits"])),
			prop::collection::btree_map("[A-D]", "[0-9]", 0..4),
		)
			.prop_map(|(allow, deny, mode, env)| {
				let mut permissions = Map::new();
				permissions.insert("allow".into(), json!(allow));
				permissions.insert("deny".into(), json!(deny));
				if let Some(mode) = mode {
					permissions.insert("defaultMode".into(), json!(mode));
				}
				let mut doc = Map::new();
				doc.insert("permissions".into(), Value::Object(permissions));
				doc.insert("env".into(), json!(env));
				Settings::from_map(doc)
			})
	}

	proptest! {
		#[test]
		fn prop_left_identity(template in document()) {
			prop_assert_eq!(merge_settings(None, &template), template);
		}

		#[test]
		fn prop_allow_has_no_duplicates(existing in document(), template in document()) {
			let merged = merge_settings(Some(&existing), &template);
			let allow = merged.permission_rules(crate::settings::RuleList::Allow);
			let mut deduped = allow.clone();
			deduped.sort();
			deduped.dedup();
			prop_assert_eq!(allow.len(), deduped.len());
			for rule in existing
				.permission_rules(crate::settings::RuleList::Allow)
				.into_iter()
				.chain(template.permission_rules(crate::settings::RuleList::Allow))
			{
				prop_assert!(allow.contains(&rule));
			}
		}

		#[test]
		fn prop_existing_default_mode_wins(existing in document(), template in document()) {
			let merged = merge_settings(Some(&existing), &template);
			match existing.default_mode() {
				Some(mode) => {
					prop_assert_eq!(merged.default_mode(), Some(mode));
				}
				None => {
					prop_assert_eq!(merged.default_mode(), template.default_mode());
				}
			}
		}

		#[test]
		fn prop_reapplying_template_is_stable(existing in document(), template in document()) {
			let once = merge_settings(Some(&existing), &template);
			let twice = merge_settings(Some(&once), &template);
			prop_assert_eq!(once, twice);
		}
	}
}
