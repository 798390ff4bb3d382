use crate::settings::{Settings, Template};
use serde_json::{Value, json};

/// Names of the built-in templates, in display order.
pub const BUILTIN_TEMPLATE_NAMES: &[&str] = &["default", "strict", "node"];

const DENY_DESTRUCTIVE: &[&str] = &[
	"Bash(rm -rf ~/**)",
	"Bash(rm -rf //**)",
	"Bash(git remote add:*)",
	"Bash(git remote set-url:*)",
];

fn timeout_env() -> Value {
	json!({
		"BASH_DEFAULT_TIMEOUT_MS": "300000",
		"BASH_MAX_TIMEOUT_MS": "1200000",
	})
}

fn template(name: &str, description: &str, settings: Value) -> Template {
	let settings = match settings {
		Value::Object(map) => Settings::from_map(map),
		_ => Settings::new(),
	};
	Template {
		name: name.to_string(),
		description: description.to_string(),
		settings,
	}
}

/// Look up a built-in template by name.
pub fn builtin_template(name: &str) -> Option<Template> {
	match name {
		"default" => Some(template(
			"default",
			"Casual settings.",
			json!({
				"permissions": {
					"allow": [
						"Bash(git:*)",
						"Bash(gh:*)",
						"Bash(touch:*)",
						"Bash(mkdir:*)",
						"Bash(rg:*)",
						"Bash(grep:*)",
						"Bash(cp:*)",
						"Bash(mv:*)",
						"Bash(rm:*)",
						"Read(**)",
						"Edit(**)",
						"MultiEdit(**)",
						"WebFetch(domain:*)",
						"WebSearch(domain:*)",
						"Write(**)",
					],
					"deny": DENY_DESTRUCTIVE,
					"defaultMode": "acceptEdits",
				},
				"env": timeout_env(),
			}),
		)),
		"strict" => Some(template(
			"strict",
			"Strict settings.",
			json!({
				"permissions": {
					"allow": [
						"Bash(git:*)",
						"Bash(gh:*)",
						"Read(**)",
						"Edit(**)",
						"MultiEdit(**)",
						"Write(**)",
					],
					"deny": DENY_DESTRUCTIVE,
					"defaultMode": "acceptEdits",
				},
				"env": timeout_env(),
			}),
		)),
		"node" => Some(template(
			"node",
			"Node.js development settings.",
			json!({
				"permissions": {
					"allow": ["Bash(npm:*)", "Bash(yarn:*)", "Bash(pnpm:*)"],
					"deny": ["Bash(npm publish:*)", "Bash(pnpm publish:*)", "Bash(yarn publish:*)"],
					"defaultMode": "acceptEdits",
				},
				"env": timeout_env(),
			}),
		)),
		_ => None,
	}
}

/// All built-in templates, in display order.
pub fn list_builtin_templates() -> Vec<Template> {
	BUILTIN_TEMPLATE_NAMES
		.iter()
		.filter_map(|name| builtin_template(name))
		.collect()
}
