use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Top-level configuration from a `.ccsettings.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
	/// If true, stop the directory cascade here and jump to ~/.ccsettings.toml.
	#[serde(default)]
	pub root: bool,

	/// Default for `apply --backup`.
	#[serde(default)]
	pub backup: Option<bool>,

	/// Default for `apply --local`.
	#[serde(default)]
	pub local: Option<bool>,

	/// Templates applied when `apply` is given no template, file or URL.
	#[serde(default)]
	pub default_templates: Vec<String>,

	/// Template names that resolve to JSON files. Relative paths are
	/// resolved against the directory of the config file.
	#[serde(default)]
	pub templates: BTreeMap<String, PathBuf>,
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

/// Merged configuration from every config file in the cascade.
#[derive(Debug, Clone, Default)]
pub struct MergedConfig {
	pub backup: bool,
	pub local: bool,
	pub default_templates: Vec<String>,

	/// Alias name to absolute template path, with the file that defined it.
	pub templates: BTreeMap<String, AliasWithSource>,
}

/// A template alias with the config file it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasWithSource {
	pub path: PathBuf,
	pub source: PathBuf,
}

impl MergedConfig {
	/// Alias paths only, as the template loader wants them.
	pub fn template_aliases(&self) -> BTreeMap<String, PathBuf> {
		self.templates
			.iter()
			.map(|(name, alias)| (name.clone(), alias.path.clone()))
			.collect()
	}
}
