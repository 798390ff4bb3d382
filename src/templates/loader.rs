use crate::error::{CcsettingsError, Result};
use crate::settings::{Template, parse_template_str};
use crate::templates::builtin::builtin_template;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

static GITHUB_BLOB_URL: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^https://github\.com/([^/]+)/([^/]+)/blob/(.+)$").expect("valid regex")
});

/// Where a template comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
	/// A built-in template, or an alias from the tool config.
	Builtin(String),
	File(PathBuf),
	Url(String),
}

impl std::fmt::Display for TemplateSource {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			TemplateSource::Builtin(name) => write!(f, "Built-in template \"{name}\""),
			TemplateSource::File(path) => write!(f, "File \"{}\"", path.display()),
			TemplateSource::Url(url) => write!(f, "URL \"{url}\""),
		}
	}
}

/// Fetches raw template JSON over the network.
pub trait TemplateFetcher {
	fn fetch(&self, url: &str) -> Result<String>;
}

/// Blocking HTTPS fetcher with a fixed timeout.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpFetcher;

impl TemplateFetcher for HttpFetcher {
	fn fetch(&self, url: &str) -> Result<String> {
		let fetch_error = |source: reqwest::Error| CcsettingsError::TemplateFetchError {
			url: url.to_string(),
			source,
		};

		let client = reqwest::blocking::Client::builder()
			.timeout(FETCH_TIMEOUT)
			.build()
			.map_err(fetch_error)?;
		let response = client.get(url).send().map_err(fetch_error)?;

		let status = response.status();
		if !status.is_success() {
			return Err(CcsettingsError::TemplateFetchStatus {
				url: url.to_string(),
				status: status.as_u16(),
			});
		}

		response.text().map_err(fetch_error)
	}
}

/// Templates that loaded, plus a message for each source that did not.
#[derive(Debug, Clone, Default)]
pub struct LoadedTemplates {
	pub templates: Vec<Template>,
	pub failures: Vec<String>,
}

/// Resolves template sources into validated templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateLoader<F = HttpFetcher> {
	/// Template names that map to files, from the tool config.
	aliases: BTreeMap<String, PathBuf>,
	fetcher: F,
}

impl TemplateLoader<HttpFetcher> {
	pub fn new() -> Self {
		Self::default()
	}
}

impl<F: TemplateFetcher> TemplateLoader<F> {
	pub fn with_fetcher(fetcher: F) -> Self {
		Self {
			aliases: BTreeMap::new(),
			fetcher,
		}
	}

	pub fn with_aliases(mut self, aliases: BTreeMap<String, PathBuf>) -> Self {
		self.aliases = aliases;
		self
	}

	/// Load a single template from any source.
	pub fn load(&self, source: &TemplateSource) -> Result<Template> {
		match source {
			TemplateSource::Builtin(name) => self.load_named(name),
			TemplateSource::File(path) => load_template_from_file(path),
			TemplateSource::Url(url) => self.load_from_url(url),
		}
	}

	/// Resolve a name through the config aliases first, then the built-ins.
	pub fn load_named(&self, name: &str) -> Result<Template> {
		if let Some(path) = self.aliases.get(name) {
			tracing::debug!(name, path = %path.display(), "resolved template alias");
			return load_template_from_file(path);
		}

		builtin_template(name).ok_or_else(|| CcsettingsError::BuiltinTemplateNotFound {
			name: name.to_string(),
		})
	}

	pub fn load_from_url(&self, url: &str) -> Result<Template> {
		if !url.starts_with("https://") {
			return Err(CcsettingsError::UnsupportedUrl {
				url: url.to_string(),
			});
		}

		let raw_url = convert_github_url(url);
		tracing::info!(url = %raw_url, "fetching template");
		let content = self.fetcher.fetch(&raw_url)?;
		parse_template_str(&content, url)
	}

	/// Load every source in order, collecting failures instead of stopping.
	///
	/// Errors only when nothing was requested or nothing loaded.
	pub fn load_all(&self, sources: &[TemplateSource]) -> Result<LoadedTemplates> {
		if sources.is_empty() {
			return Err(CcsettingsError::NoTemplatesSpecified);
		}

		let mut loaded = LoadedTemplates::default();
		for source in sources {
			match self.load(source) {
				Ok(template) => loaded.templates.push(template),
				Err(e) => {
					tracing::warn!(%source, error = %e, "template failed to load");
					loaded.failures.push(format!("{source}: {e}"));
				}
			}
		}

		if loaded.templates.is_empty() {
			return Err(CcsettingsError::AllTemplatesFailed {
				failures: loaded.failures,
			});
		}

		Ok(loaded)
	}
}

/// Order sources the way they are applied: built-ins, then files, then URLs.
pub fn ordered_sources(
	names: &[String],
	files: &[PathBuf],
	urls: &[String],
) -> Vec<TemplateSource> {
	names
		.iter()
		.cloned()
		.map(TemplateSource::Builtin)
		.chain(files.iter().cloned().map(TemplateSource::File))
		.chain(urls.iter().cloned().map(TemplateSource::Url))
		.collect()
}

/// Read and validate a template from a JSON file.
pub fn load_template_from_file(path: &Path) -> Result<Template> {
	let content = std::fs::read_to_string(path).map_err(|source| {
		if source.kind() == std::io::ErrorKind::NotFound {
			CcsettingsError::TemplateNotFound {
				path: path.to_path_buf(),
			}
		} else {
			CcsettingsError::TemplateReadError {
				path: path.to_path_buf(),
				source,
			}
		}
	})?;

	let template = parse_template_str(&content, &path.display().to_string())?;
	tracing::info!(name = %template.name, path = %path.display(), "loaded template file");
	Ok(template)
}

/// Rewrite a GitHub `blob` URL to its raw content URL. Other URLs pass through.
pub fn convert_github_url(url: &str) -> String {
	match GITHUB_BLOB_URL.captures(url) {
		Some(caps) => format!(
			"https://raw.githubusercontent.com/{}/{}/{}",
			&caps[1], &caps[2], &caps[3]
		),
		None => url.to_string(),
	}
}
