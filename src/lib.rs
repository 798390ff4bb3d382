//! ccsettings - apply settings templates to a project's `.claude/settings.json`.
//!
//! This library provides the core functionality for ccsettings, including:
//! - A pure merge engine that folds templates into existing settings
//! - A change preview that explains what each merge adds or keeps
//! - Attribution of each change to the template that introduced it
//! - Template loading, settings storage and tool configuration
//!
//! # Example
//!
//! ```
//! use ccsettings::merge::create_multiple_merge_preview;
//! use ccsettings::templates::builtin_template;
//!
//! let default = builtin_template("default").unwrap();
//! let node = builtin_template("node").unwrap();
//!
//! let preview = create_multiple_merge_preview(
//!     None,
//!     &[default.settings, node.settings],
//!     &[default.name, node.name],
//! );
//!
//! for change in &preview.changes.changes.added {
//!     println!("+ {change} [from: {}]", preview.changes.source_of(change).unwrap_or("?"));
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod merge;
pub mod report;
pub mod settings;
pub mod templates;

pub use error::{CcsettingsError, Result};
