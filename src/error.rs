use std::path::PathBuf;

/// Library-level structured errors for ccsettings.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum CcsettingsError {
	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Failed to read settings file: {path}")]
	SettingsReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write settings file: {path}")]
	SettingsWriteError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Invalid JSON in {origin}")]
	InvalidJson {
		origin: String,
		#[source]
		source: serde_json::Error,
	},

	#[error("Invalid settings in {origin}: {message}")]
	InvalidSettings { origin: String, message: String },

	#[error("Invalid template in {origin}: {message}")]
	InvalidTemplate { origin: String, message: String },

	#[error("No settings file exists to backup")]
	NoSettingsToBackup,

	#[error("Failed to create backup: {path}")]
	BackupFailed {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Template file not found: {path}")]
	TemplateNotFound { path: PathBuf },

	#[error("Failed to read template file: {path}")]
	TemplateReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Built-in template not found: {name}")]
	BuiltinTemplateNotFound { name: String },

	#[error("Only HTTPS URLs are supported: {url}")]
	UnsupportedUrl { url: String },

	#[error("Network error while fetching template from URL: {url}")]
	TemplateFetchError {
		url: String,
		#[source]
		source: reqwest::Error,
	},

	#[error("Failed to fetch template from URL: {url} (status: {status})")]
	TemplateFetchStatus { url: String, status: u16 },

	#[error(
		"No templates specified. Please specify at least one template using --template, --file, or --url option."
	)]
	NoTemplatesSpecified,

	#[error("Failed to load any templates:\n{}", format_failures(.failures))]
	AllTemplatesFailed { failures: Vec<String> },

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

fn format_failures(failures: &[String]) -> String {
	failures
		.iter()
		.map(|f| format!("  - {f}"))
		.collect::<Vec<_>>()
		.join("\n")
}

/// Result type alias using CcsettingsError.
pub type Result<T> = std::result::Result<T, CcsettingsError>;
