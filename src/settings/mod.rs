//! Settings documents for ccsettings.
//!
//! This module handles:
//! - The untyped-but-shaped settings document
//! - Validation of the JSON wire format and templates
//! - Locating, reading, writing and backing up settings files

pub mod document;
pub mod schema;
pub mod store;

pub use document::{RuleList, Settings};
pub use schema::{
	DefaultMode, Template, parse_settings_str, parse_template_str, validate_settings,
	validate_template,
};
pub use store::{
	create_backup, find_claude_directory, read_settings, resolve_settings_path, settings_path,
	write_settings,
};
