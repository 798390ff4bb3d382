use crate::merge::engine::merge_settings;
use crate::settings::{RuleList, Settings};
use serde::Serialize;

/// Human-readable change descriptors, grouped by kind.
///
/// Each descriptor names a dotted field path and a value, e.g.
/// `permissions.allow: Read(**)`.
///
/// `modified` is part of the taxonomy but the classifier never fills it: a
/// value that differs from the template is kept and reported as unchanged
/// with a `(kept existing)` note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSet {
	pub added: Vec<String>,
	pub modified: Vec<String>,
	pub unchanged: Vec<String>,
}

impl ChangeSet {
	pub fn is_empty(&self) -> bool {
		self.added.is_empty() && self.modified.is_empty() && self.unchanged.is_empty()
	}
}

/// The merged document plus a field-by-field account of what changed.
#[derive(Debug, Clone, PartialEq)]
pub struct MergePreview {
	pub merged: Settings,
	pub changes: ChangeSet,
}

const KEPT_EXISTING: &str = "(kept existing)";

/// Merge one template into existing settings and classify the result.
///
/// Only `permissions.allow`, `permissions.deny`, `permissions.defaultMode`
/// and `env.*` are classified. Every other field is merged but not reported.
pub fn create_merge_preview(existing: Option<&Settings>, template: &Settings) -> MergePreview {
	let merged = merge_settings(existing, template);
	let mut changes = ChangeSet::default();

	classify_allow(existing, template, &merged, &mut changes);
	classify_deny(existing, template, &mut changes);
	classify_default_mode(existing, template, &mut changes);
	classify_env(existing, template, &mut changes);

	tracing::debug!(
		added = changes.added.len(),
		unchanged = changes.unchanged.len(),
		"classified merge preview"
	);

	MergePreview { merged, changes }
}

fn existing_rules(existing: Option<&Settings>, list: RuleList) -> Vec<&str> {
	existing
		.map(|s| s.permission_rules(list))
		.unwrap_or_default()
}

fn classify_allow(
	existing: Option<&Settings>,
	template: &Settings,
	merged: &Settings,
	changes: &mut ChangeSet,
) {
	let existing_allow = existing_rules(existing, RuleList::Allow);
	let merged_allow = merged.permission_rules(RuleList::Allow);

	for rule in template.permission_rules(RuleList::Allow) {
		if !existing_allow.contains(&rule) {
			changes.added.push(format!("permissions.allow: {rule}"));
		}
	}

	for rule in &existing_allow {
		if merged_allow.contains(rule) {
			changes.unchanged.push(format!("permissions.allow: {rule}"));
		}
	}
}

// Deny rules only ever accumulate, so every existing one is reported as kept.
fn classify_deny(existing: Option<&Settings>, template: &Settings, changes: &mut ChangeSet) {
	let existing_deny = existing_rules(existing, RuleList::Deny);

	for rule in template.permission_rules(RuleList::Deny) {
		if !existing_deny.contains(&rule) {
			changes.added.push(format!("permissions.deny: {rule}"));
		}
	}

	for rule in &existing_deny {
		changes.unchanged.push(format!("permissions.deny: {rule}"));
	}
}

fn classify_default_mode(
	existing: Option<&Settings>,
	template: &Settings,
	changes: &mut ChangeSet,
) {
	let existing_mode = existing.and_then(Settings::default_mode);

	match (existing_mode, template.default_mode()) {
		(None, Some(incoming)) => {
			changes.added.push(format!("permissions.defaultMode: {incoming}"));
		}
		(Some(kept), Some(incoming)) if kept != incoming => {
			changes
				.unchanged
				.push(format!("permissions.defaultMode: {kept} {KEPT_EXISTING}"));
		}
		(Some(kept), _) => {
			changes.unchanged.push(format!("permissions.defaultMode: {kept}"));
		}
		(None, None) => {}
	}
}

fn classify_env(existing: Option<&Settings>, template: &Settings, changes: &mut ChangeSet) {
	let existing_env = existing.map(Settings::env).unwrap_or_default();
	let template_env = template.env();

	for &(key, value) in &template_env {
		match env_value(&existing_env, key) {
			None => changes.added.push(format!("env.{key}: {value}")),
			Some(kept) if kept != value => {
				changes.unchanged.push(format!("env.{key}: {kept} {KEPT_EXISTING}"));
			}
			Some(kept) => changes.unchanged.push(format!("env.{key}: {kept}")),
		}
	}

	for &(key, value) in &existing_env {
		if env_value(&template_env, key).is_none() {
			changes.unchanged.push(format!("env.{key}: {value}"));
		}
	}
}

fn env_value<'a>(env: &[(&str, &'a str)], key: &str) -> Option<&'a str> {
	env.iter().find(|(k, _)| *k == key).map(|&(_, v)| v)
}
