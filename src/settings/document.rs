use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A settings document as stored in `.claude/settings.json`.
///
/// The document is kept as an ordered JSON object so that keys the tool does
/// not recognise survive a merge untouched. Typed accessors cover the fields
/// the change preview inspects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(Map<String, Value>);

/// One of the rule lists under `permissions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleList {
	Allow,
	Deny,
	AdditionalDirectories,
}

impl RuleList {
	/// The JSON key of this list inside `permissions`.
	pub fn key(self) -> &'static str {
		match self {
			RuleList::Allow => "allow",
			RuleList::Deny => "deny",
			RuleList::AdditionalDirectories => "additionalDirectories",
		}
	}
}

impl Settings {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_map(map: Map<String, Value>) -> Self {
		Self(map)
	}

	pub fn as_map(&self) -> &Map<String, Value> {
		&self.0
	}

	pub fn into_map(self) -> Map<String, Value> {
		self.0
	}

	pub fn into_value(self) -> Value {
		Value::Object(self.0)
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	fn permissions(&self) -> Option<&Map<String, Value>> {
		self.0.get("permissions").and_then(Value::as_object)
	}

	/// Returns `true` if the document carries the given permissions list at all.
	pub fn has_permission_rules(&self, list: RuleList) -> bool {
		self.permissions()
			.and_then(|p| p.get(list.key()))
			.is_some_and(Value::is_array)
	}

	/// Rule strings of a permissions list, in document order.
	pub fn permission_rules(&self, list: RuleList) -> Vec<&str> {
		self.permissions()
			.and_then(|p| p.get(list.key()))
			.and_then(Value::as_array)
			.map(|rules| rules.iter().filter_map(Value::as_str).collect())
			.unwrap_or_default()
	}

	pub fn default_mode(&self) -> Option<&str> {
		self.permissions()
			.and_then(|p| p.get("defaultMode"))
			.and_then(Value::as_str)
			.filter(|mode| !mode.is_empty())
	}

	/// Environment variables in document order.
	pub fn env(&self) -> Vec<(&str, &str)> {
		self.0
			.get("env")
			.and_then(Value::as_object)
			.map(|env| {
				env.iter()
					.filter_map(|(k, v)| v.as_str().map(|v| (k.as_str(), v)))
					.collect()
			})
			.unwrap_or_default()
	}

	pub fn has_env(&self) -> bool {
		self.0.get("env").is_some_and(Value::is_object)
	}

	pub fn model(&self) -> Option<&str> {
		self.0.get("model").and_then(Value::as_str)
	}

	pub fn include_co_authored_by(&self) -> Option<bool> {
		self.0.get("includeCoAuthoredBy").and_then(Value::as_bool)
	}

	pub fn cleanup_period_days(&self) -> Option<&serde_json::Number> {
		match self.0.get("cleanupPeriodDays") {
			Some(Value::Number(n)) => Some(n),
			_ => None,
		}
	}

	/// Hooks as `(hook type, [(tool, command)])`, in document order.
	pub fn hooks(&self) -> Vec<(&str, Vec<(&str, &str)>)> {
		self.0
			.get("hooks")
			.and_then(Value::as_object)
			.map(|hooks| {
				hooks
					.iter()
					.filter_map(|(hook_type, tools)| {
						let tools = tools.as_object()?;
						let commands = tools
							.iter()
							.filter_map(|(tool, cmd)| cmd.as_str().map(|c| (tool.as_str(), c)))
							.collect();
						Some((hook_type.as_str(), commands))
					})
					.collect()
			})
			.unwrap_or_default()
	}

	/// Pretty JSON with two-space indentation and a trailing newline.
	pub fn to_pretty_json(&self) -> String {
		let mut out = serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| "{}".to_string());
		out.push('\n');
		out
	}
}

impl From<Map<String, Value>> for Settings {
	fn from(map: Map<String, Value>) -> Self {
		Self(map)
	}
}
