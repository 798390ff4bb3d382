//! The merge core for ccsettings.
//!
//! This module handles:
//! - Structural merging of two settings documents
//! - Classifying a single merge into added/modified/unchanged descriptors
//! - Folding several templates together and crediting each change to a template
//!
//! Everything here is pure: no I/O, and inputs are never modified.

pub mod attribution;
pub mod engine;
pub mod preview;

pub use attribution::{AttributedChangeSet, MultiMergePreview, create_multiple_merge_preview};
pub use engine::{merge_settings, merge_values};
pub use preview::{ChangeSet, MergePreview, create_merge_preview};
