use crate::merge::preview::{ChangeSet, MergePreview, create_merge_preview};
use crate::settings::Settings;
use std::collections::HashMap;

/// A change set where each added or modified descriptor may be credited to
/// the template that introduced it.
///
/// `sources` is only filled when two or more templates were combined.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributedChangeSet {
	pub changes: ChangeSet,
	pub sources: HashMap<String, String>,
}

impl AttributedChangeSet {
	/// The template a descriptor is credited to, if any.
	pub fn source_of(&self, descriptor: &str) -> Option<&str> {
		self.sources.get(descriptor).map(String::as_str)
	}
}

/// Result of folding several templates into existing settings.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiMergePreview {
	pub merged: Settings,
	pub changes: AttributedChangeSet,
}

/// Running state of the fold over templates.
#[derive(Default)]
struct Accumulator {
	merged: Option<Settings>,
	changes: AttributedChangeSet,
}

impl Accumulator {
	fn apply(mut self, template: &Settings, name: &str) -> Self {
		let MergePreview { merged, changes } = create_merge_preview(self.merged.as_ref(), template);

		record(
			&mut self.changes.changes.added,
			&mut self.changes.sources,
			changes.added,
			name,
		);
		record(
			&mut self.changes.changes.modified,
			&mut self.changes.sources,
			changes.modified,
			name,
		);

		tracing::debug!(template = name, "applied template step");
		self.merged = Some(merged);
		self
	}
}

// First template to introduce a descriptor keeps the credit.
fn record(
	log: &mut Vec<String>,
	sources: &mut HashMap<String, String>,
	descriptors: Vec<String>,
	name: &str,
) {
	for descriptor in descriptors {
		if log.contains(&descriptor) {
			continue;
		}
		sources
			.entry(descriptor.clone())
			.or_insert_with(|| name.to_string());
		log.push(descriptor);
	}
}

/// Merge templates, in order, into existing settings.
///
/// With one template this is [`create_merge_preview`] with no attribution.
/// With several, each step merges the next template into the result of the
/// previous one, and `unchanged` is computed once against the original
/// settings and the final result.
///
/// # Panics
///
/// Panics if `templates` and `names` differ in length.
pub fn create_multiple_merge_preview(
	existing: Option<&Settings>,
	templates: &[Settings],
	names: &[String],
) -> MultiMergePreview {
	assert_eq!(
		templates.len(),
		names.len(),
		"every template needs exactly one name"
	);

	match templates {
		[] => MultiMergePreview {
			merged: existing.cloned().unwrap_or_default(),
			changes: AttributedChangeSet::default(),
		},
		[template] => {
			let MergePreview { merged, changes } = create_merge_preview(existing, template);
			MultiMergePreview {
				merged,
				changes: AttributedChangeSet {
					changes,
					sources: HashMap::new(),
				},
			}
		}
		_ => {
			let seed = Accumulator {
				merged: existing.cloned(),
				changes: AttributedChangeSet::default(),
			};
			let Accumulator {
				merged,
				mut changes,
			} = templates
				.iter()
				.zip(names)
				.fold(seed, |acc, (template, name)| acc.apply(template, name));

			let merged = merged.unwrap_or_default();
			changes.changes.unchanged = create_merge_preview(existing, &merged).changes.unchanged;

			MultiMergePreview { merged, changes }
		}
	}
}
