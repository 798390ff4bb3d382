use crate::config::types::Config;
use crate::error::{CcsettingsError, Result};
use std::path::Path;

/// Parse a config file from the given path.
pub fn parse_config_file(path: &Path) -> Result<Config> {
	let content = std::fs::read_to_string(path).map_err(|source| CcsettingsError::ConfigReadError {
		path: path.to_path_buf(),
		source,
	})?;

	parse_config_str(&content, path)
}

/// Parse a config from a string (useful for testing).
pub fn parse_config_str(content: &str, path: &Path) -> Result<Config> {
	let config: Config =
		toml::from_str(content).map_err(|source| CcsettingsError::ConfigParseError {
			path: path.to_path_buf(),
			source,
		})?;

	Ok(config)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::PathBuf;

	#[test]
	fn test_parse_empty_config() {
		let content = "";
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert!(!config.root);
		assert!(config.backup.is_none());
		assert!(config.local.is_none());
		assert!(config.default_templates.is_empty());
		assert!(config.templates.is_empty());
	}

	#[test]
	fn test_parse_basic_config() {
		let content = r#"
root = true
backup = true
local = false
default-templates = ["default", "node"]
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert!(config.root);
		assert_eq!(config.backup, Some(true));
		assert_eq!(config.local, Some(false));
		assert_eq!(config.default_templates, vec!["default", "node"]);
	}

	#[test]
	fn test_parse_template_aliases() {
		let content = r#"
[templates]
team = "templates/team.json"
rust = "/etc/ccsettings/rust.json"
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_config_str(content, &path).unwrap();

		assert_eq!(config.templates.len(), 2);
		assert_eq!(
			config.templates.get("team"),
			Some(&PathBuf::from("templates/team.json"))
		);
		assert_eq!(
			config.templates.get("rust"),
			Some(&PathBuf::from("/etc/ccsettings/rust.json"))
		);
	}

	#[test]
	fn test_parse_invalid_toml() {
		let path = PathBuf::from("broken.toml");
		match parse_config_str("backup = [[[", &path).unwrap_err() {
			CcsettingsError::ConfigParseError { path, .. } => {
				assert_eq!(path, PathBuf::from("broken.toml"));
			}
			other => panic!("Expected ConfigParseError, got {other:?}"),
		}
	}

	#[test]
	fn test_parse_wrong_type() {
		let path = PathBuf::from("test.toml");
		assert!(parse_config_str("backup = \"yes\"", &path).is_err());
	}
}
