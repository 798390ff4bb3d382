use crate::error::{CcsettingsError, Result};
use crate::settings::document::Settings;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Permission mode applied when a tool call matches no rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DefaultMode {
	Default,
	AcceptEdits,
	Plan,
	BypassPermissions,
}

/// The only accepted value of `disableBypassPermissionsMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
#[allow(dead_code)]
enum DisableBypass {
	Disable,
}

/// Shape check for `permissions`. Never stored; the document stays untyped.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
struct PermissionsShape {
	#[serde(default)]
	allow: Option<Vec<String>>,
	#[serde(default)]
	deny: Option<Vec<String>>,
	#[serde(default)]
	additional_directories: Option<Vec<String>>,
	#[serde(default)]
	default_mode: Option<DefaultMode>,
	#[serde(default)]
	disable_bypass_permissions_mode: Option<DisableBypass>,
}

/// Shape check for the recognised top-level fields. Unknown keys are
/// collected into `extra` and accepted as-is.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
struct SettingsShape {
	#[serde(default)]
	permissions: Option<PermissionsShape>,
	#[serde(default)]
	env: Option<BTreeMap<String, String>>,
	#[serde(default)]
	include_co_authored_by: Option<bool>,
	#[serde(default)]
	cleanup_period_days: Option<serde_json::Number>,
	#[serde(default)]
	model: Option<String>,
	#[serde(default)]
	hooks: Option<BTreeMap<String, BTreeMap<String, String>>>,
	#[serde(flatten)]
	extra: Map<String, Value>,
}

/// A named, described settings document ready to be merged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
	pub name: String,
	pub description: String,
	pub settings: Settings,
}

#[derive(Debug, Deserialize)]
struct RawTemplate {
	name: String,
	description: String,
	settings: Value,
}

/// Validate a raw JSON value against the settings wire format.
///
/// `origin` names where the value came from and is only used in errors.
pub fn validate_settings(value: Value, origin: &str) -> Result<Settings> {
	let Value::Object(map) = value else {
		return Err(CcsettingsError::InvalidSettings {
			origin: origin.to_string(),
			message: "expected a JSON object".to_string(),
		});
	};

	SettingsShape::deserialize(Value::Object(map.clone())).map_err(|e| {
		CcsettingsError::InvalidSettings {
			origin: origin.to_string(),
			message: e.to_string(),
		}
	})?;

	Ok(Settings::from_map(map))
}

/// Parse and validate settings from JSON text.
pub fn parse_settings_str(content: &str, origin: &str) -> Result<Settings> {
	let value: Value =
		serde_json::from_str(content).map_err(|source| CcsettingsError::InvalidJson {
			origin: origin.to_string(),
			source,
		})?;
	validate_settings(value, origin)
}

/// Validate a raw JSON value as a template (`name`, `description`, `settings`).
pub fn validate_template(value: Value, origin: &str) -> Result<Template> {
	let raw = RawTemplate::deserialize(value).map_err(|e| CcsettingsError::InvalidTemplate {
		origin: origin.to_string(),
		message: e.to_string(),
	})?;

	let settings = validate_settings(raw.settings, origin).map_err(|e| match e {
		CcsettingsError::InvalidSettings { origin, message } => {
			CcsettingsError::InvalidTemplate { origin, message }
		}
		other => other,
	})?;

	Ok(Template {
		name: raw.name,
		description: raw.description,
		settings,
	})
}

/// Parse and validate a template from JSON text.
pub fn parse_template_str(content: &str, origin: &str) -> Result<Template> {
	let value: Value =
		serde_json::from_str(content).map_err(|source| CcsettingsError::InvalidJson {
			origin: origin.to_string(),
			source,
		})?;
	validate_template(value, origin)
}
