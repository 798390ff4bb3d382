//! Line-oriented rendering of previews, settings and template listings.

use crate::merge::AttributedChangeSet;
use crate::settings::{RuleList, Settings, Template};
use std::fmt::Write;
use std::path::Path;

/// Describe which templates were loaded.
pub fn render_loaded_templates(templates: &[Template]) -> String {
	let mut out = String::new();
	match templates {
		[only] => {
			let _ = writeln!(out, "Loaded template \"{}\": {}", only.name, only.description);
		}
		_ => {
			let _ = writeln!(out, "Loaded {} templates:", templates.len());
			for (i, template) in templates.iter().enumerate() {
				let _ = writeln!(
					out,
					"  {}. \"{}\": {}",
					i + 1,
					template.name,
					template.description
				);
			}
		}
	}
	out
}

/// Render a change preview, one descriptor per line, grouped by kind.
///
/// Added and modified lines carry `[from: <template>]` when attributed.
pub fn render_changes(changes: &AttributedChangeSet, settings_label: &str) -> String {
	let mut out = String::new();
	let _ = writeln!(out, "Planned changes ({settings_label}):");

	let set = &changes.changes;
	if set.is_empty() {
		let _ = writeln!(out, "\nNo changes.");
		return out;
	}

	let attributed = |descriptor: &str| match changes.source_of(descriptor) {
		Some(source) => format!("{descriptor} [from: {source}]"),
		None => descriptor.to_string(),
	};

	if !set.added.is_empty() {
		let _ = writeln!(out, "\nSettings to be added:");
		for change in &set.added {
			let _ = writeln!(out, "  + {}", attributed(change.as_str()));
		}
	}

	if !set.modified.is_empty() {
		let _ = writeln!(out, "\nSettings to be modified:");
		for change in &set.modified {
			let _ = writeln!(out, "  ~ {}", attributed(change.as_str()));
		}
	}

	if !set.unchanged.is_empty() {
		let _ = writeln!(out, "\nExisting settings to be preserved:");
		for change in &set.unchanged {
			let _ = writeln!(out, "  = {change}");
		}
	}

	out
}

/// Human-readable summary of a settings file.
pub fn render_settings_summary(path: &Path, settings: &Settings) -> String {
	let mut out = String::new();
	let _ = writeln!(out, "Settings file: {}\n", path.display());

	if settings.get("permissions").is_some() {
		let _ = writeln!(out, "Permissions:");
		if let Some(mode) = settings.default_mode() {
			let _ = writeln!(out, "  Default mode: {mode}");
		}
		for (label, list) in [
			("Allow rules", RuleList::Allow),
			("Deny rules", RuleList::Deny),
			("Additional directories", RuleList::AdditionalDirectories),
		] {
			let rules = settings.permission_rules(list);
			if !rules.is_empty() {
				let _ = writeln!(out, "  {label}:");
				for rule in rules {
					let _ = writeln!(out, "    {rule}");
				}
			}
		}
		out.push('\n');
	}

	let env = settings.env();
	if !env.is_empty() {
		let _ = writeln!(out, "Environment variables:");
		for (key, value) in env {
			let _ = writeln!(out, "  {key}: {value}");
		}
		out.push('\n');
	}

	if let Some(model) = settings.model() {
		let _ = writeln!(out, "Model: {model}");
	}
	if let Some(enabled) = settings.include_co_authored_by() {
		let state = if enabled { "enabled" } else { "disabled" };
		let _ = writeln!(out, "Co-authored-by: {state}");
	}
	if let Some(days) = settings.cleanup_period_days() {
		let _ = writeln!(out, "Log retention period: {days} days");
	}

	let hooks = settings.hooks();
	if !hooks.is_empty() {
		let _ = writeln!(out, "\nHooks:");
		for (hook_type, commands) in hooks {
			let _ = writeln!(out, "  {hook_type}:");
			for (tool, command) in commands {
				let _ = writeln!(out, "    {tool}: {command}");
			}
		}
	}

	out
}

/// List templates with their default mode and rule counts.
pub fn render_template_list(templates: &[Template]) -> String {
	let mut out = String::from("Available built-in templates:\n\n");

	for template in templates {
		let _ = writeln!(out, "{}", template.name);
		let _ = writeln!(out, "  {}", template.description);

		let settings = &template.settings;
		if let Some(mode) = settings.default_mode() {
			let _ = writeln!(out, "  Default mode: {mode}");
		}
		let allow = settings.permission_rules(RuleList::Allow).len();
		if allow > 0 {
			let _ = writeln!(out, "  Allow rules: {allow}");
		}
		let deny = settings.permission_rules(RuleList::Deny).len();
		if deny > 0 {
			let _ = writeln!(out, "  Deny rules: {deny}");
		}
		out.push('\n');
	}

	out.push_str("Usage examples:\n");
	for template in templates {
		let _ = writeln!(out, "  ccsettings apply --template {}", template.name);
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::merge::ChangeSet;
	use crate::settings::parse_settings_str;
	use std::collections::HashMap;

	#[test]
	fn test_render_changes_with_sources() {
		let changes = AttributedChangeSet {
			changes: ChangeSet {
				added: vec!["env.X: 1".to_string()],
				modified: vec![],
				unchanged: vec!["permissions.defaultMode: plan".to_string()],
			},
			sources: HashMap::from([("env.X: 1".to_string(), "A".to_string())]),
		};

		let out = render_changes(&changes, "shared settings");
		assert!(out.starts_with("Planned changes (shared settings):"));
		assert!(out.contains("  + env.X: 1 [from: A]"));
		assert!(out.contains("  = permissions.defaultMode: plan"));
		assert!(!out.contains("modified"));
	}

	#[test]
	fn test_render_changes_empty() {
		let out = render_changes(&AttributedChangeSet::default(), "local settings");
		assert!(out.contains("No changes."));
	}

	#[test]
	fn test_render_settings_summary() {
		let settings = parse_settings_str(
			r#"{
				"permissions": { "allow": ["Read(**)"], "deny": ["Bash(sudo:*)"], "defaultMode": "plan" },
				"env": { "DEBUG": "1" },
				"model": "opus",
				"includeCoAuthoredBy": false,
				"cleanupPeriodDays": 14,
				"hooks": { "PostToolUse": { "Edit": "cargo fmt" } }
			}"#,
			"test",
		)
		.unwrap();

		let out = render_settings_summary(Path::new(".claude/settings.json"), &settings);
		assert!(out.contains("Default mode: plan"));
		assert!(out.contains("    Read(**)"));
		assert!(out.contains("    Bash(sudo:*)"));
		assert!(out.contains("  DEBUG: 1"));
		assert!(out.contains("Model: opus"));
		assert!(out.contains("Co-authored-by: disabled"));
		assert!(out.contains("Log retention period: 14 days"));
		assert!(out.contains("    Edit: cargo fmt"));
	}

	#[test]
	fn test_render_template_list() {
		let out = render_template_list(&crate::templates::list_builtin_templates());
		assert!(out.contains("default\n  Casual settings."));
		assert!(out.contains("Allow rules: 15"));
		assert!(out.contains("ccsettings apply --template node"));
	}
}
