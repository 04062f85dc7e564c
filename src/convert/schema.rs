//! Dataset-dialect to generic-schema translation.
//!
//! Instance and tracking conversion expect labels from a fixed category
//! vocabulary. Translation canonicalizes dataset-dialect category names
//! against the configured vocabulary and drops labels outside it.

use std::collections::HashMap;

use crate::config::DatasetConfig;
use crate::label::model::Frame;

/// Translate frames from a dataset's native label dialect into the generic
/// schema described by `config`.
///
/// - A category alias maps to its canonical name.
/// - Labels whose category is marked ignored, or is absent from the
///   vocabulary entirely, are dropped from their frame.
/// - Labels without a category pass through unchanged.
/// - Frames are never dropped or reordered.
///
/// An empty vocabulary disables translation.
pub fn translate_frames(frames: Vec<Frame>, config: &DatasetConfig) -> Vec<Frame> {
    if config.categories.is_empty() {
        return frames;
    }

    // dialect name -> (canonical name, ignored)
    let mut lookup: HashMap<&str, (&str, bool)> = HashMap::new();
    for spec in &config.categories {
        lookup.insert(&spec.name, (&spec.name, spec.ignored));
        for alias in &spec.aliases {
            lookup.insert(alias, (&spec.name, spec.ignored));
        }
    }

    frames
        .into_iter()
        .map(|mut frame| {
            if let Some(labels) = frame.labels.take() {
                let kept = labels
                    .into_iter()
                    .filter_map(|mut label| match label.category.as_deref() {
                        None => Some(label),
                        Some(category) => match lookup.get(category) {
                            Some(&(canonical, false)) => {
                                label.category = Some(canonical.to_string());
                                Some(label)
                            }
                            Some(&(_, true)) | None => None,
                        },
                    })
                    .collect();
                frame.labels = Some(kept);
            }
            frame
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/convert/schema.rs"]
mod tests;
