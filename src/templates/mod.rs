//! Template acquisition for ccsettings.
//!
//! This module handles:
//! - The built-in template registry
//! - Loading templates from files and HTTPS URLs
//! - Batch loading with per-source failure reporting

pub mod builtin;
pub mod loader;

pub use builtin::{BUILTIN_TEMPLATE_NAMES, builtin_template, list_builtin_templates};
pub use loader::{
	HttpFetcher, LoadedTemplates, TemplateFetcher, TemplateLoader, TemplateSource,
	convert_github_url, load_template_from_file, ordered_sources,
};
