use crate::config::parser::parse_config_file;
use crate::config::types::{AliasWithSource, LoadedConfig, MergedConfig};
use crate::error::{CcsettingsError, Result};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".ccsettings.toml";

/// Setting this to a truthy value skips ~/.ccsettings.toml.
pub const NO_USER_CONFIG_ENV_VAR: &str = "CCSETTINGS_NO_USER_CONFIG";

/// Discover and load all config files in the cascade.
///
/// The cascade order is:
/// 1. Start from `start_dir` and look for `.ccsettings.toml`
/// 2. If found and `root = true`, skip to user config only
/// 3. Otherwise, continue up the directory tree
/// 4. Finally, check ~/.ccsettings.toml (unless disabled)
///
/// Returns configs in cascade order (most specific first).
pub fn discover_configs(start_dir: &Path) -> Result<Vec<LoadedConfig>> {
	let mut configs = Vec::new();

	for dir in start_dir.ancestors() {
		let config_path = dir.join(CONFIG_FILE_NAME);
		if !config_path.is_file() {
			continue;
		}

		let config = parse_config_file(&config_path)?;
		let is_root = config.root;
		configs.push(LoadedConfig {
			config,
			path: config_path,
		});

		if is_root {
			break;
		}
	}

	if let Some(user_config) = load_user_config(&configs)? {
		configs.push(user_config);
	}

	Ok(configs)
}

/// Load the user's ~/.ccsettings.toml if it exists, isn't disabled, and
/// wasn't already picked up by the directory walk.
fn load_user_config(existing_configs: &[LoadedConfig]) -> Result<Option<LoadedConfig>> {
	if is_env_truthy(NO_USER_CONFIG_ENV_VAR) {
		return Ok(None);
	}

	let user_config_path = match user_config_path() {
		Ok(path) => path,
		Err(CcsettingsError::HomeDirectoryNotFound) => return Ok(None),
		Err(e) => return Err(e),
	};

	if existing_configs.iter().any(|c| c.path == user_config_path) {
		return Ok(None);
	}

	if user_config_path.is_file() {
		let config = parse_config_file(&user_config_path)?;
		Ok(Some(LoadedConfig {
			config,
			path: user_config_path,
		}))
	} else {
		Ok(None)
	}
}

/// Check if an environment variable is set to a truthy value.
fn is_env_truthy(var_name: &str) -> bool {
	match std::env::var(var_name) {
		Ok(value) => {
			let lower = value.to_lowercase();
			!value.is_empty() && lower != "0" && lower != "false" && lower != "no"
		}
		Err(_) => false,
	}
}

/// Merge multiple configs into a single effective config.
///
/// Configs are in cascade order, so the first one to set a value wins.
pub fn merge_configs(configs: &[LoadedConfig]) -> MergedConfig {
	let mut merged = MergedConfig::default();
	let mut backup = None;
	let mut local = None;

	for loaded in configs {
		backup = backup.or(loaded.config.backup);
		local = local.or(loaded.config.local);

		if merged.default_templates.is_empty() {
			merged.default_templates = loaded.config.default_templates.clone();
		}

		let base_dir = loaded.path.parent().unwrap_or_else(|| Path::new("."));
		for (name, path) in &loaded.config.templates {
			merged
				.templates
				.entry(name.clone())
				.or_insert_with(|| AliasWithSource {
					path: base_dir.join(path),
					source: loaded.path.clone(),
				});
		}
	}

	merged.backup = backup.unwrap_or(false);
	merged.local = local.unwrap_or(false);
	merged
}

/// Convenience function to discover, load, and merge configs from a directory.
pub fn load_merged_config(start_dir: &Path) -> Result<MergedConfig> {
	let configs = discover_configs(start_dir)?;
	Ok(merge_configs(&configs))
}

/// Get the path to the user's config file.
pub fn user_config_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(CcsettingsError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(CONFIG_FILE_NAME))
}
