//! Run configuration: canvas size and category vocabulary, with built-in
//! defaults per conversion mode.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{ConvertError, ConvertResult};
use crate::label::model::ImageSize;

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// Run-wide conversion settings.
///
/// May be embedded in an annotation file under `"config"`, loaded from an
/// external JSON file, or taken from a mode's built-in default; immutable for
/// the duration of a run.
pub struct DatasetConfig {
    /// Canvas dimensions polygons are rasterized against. Required by every
    /// segmentation conversion mode.
    #[serde(default, rename = "imageSize", skip_serializing_if = "Option::is_none")]
    pub image_size: Option<ImageSize>,
    /// Category vocabulary for schema translation. Empty disables
    /// translation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<CategorySpec>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One category of the dataset vocabulary.
pub struct CategorySpec {
    /// Canonical category name.
    pub name: String,
    /// Dataset-dialect spellings mapped onto `name` during translation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Whether labels of this category are excluded from instance and
    /// tracking conversion.
    #[serde(default)]
    pub ignored: bool,
}

impl CategorySpec {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            aliases: Vec::new(),
            ignored: false,
        }
    }

    fn with_aliases(name: &str, aliases: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            ignored: false,
        }
    }

    fn ignored(name: &str) -> Self {
        Self {
            name: name.to_string(),
            aliases: Vec::new(),
            ignored: true,
        }
    }
}

/// Default 720p canvas shared by the built-in configs.
const DEFAULT_SIZE: ImageSize = ImageSize {
    width: 1280,
    height: 720,
};

/// Resolve a configuration from a file path or a built-in name.
///
/// If `name_or_path` points at an existing file it is parsed as a JSON
/// [`DatasetConfig`]; otherwise it must be one of the known mode names, whose
/// built-in default is returned. Anything else is a validation error.
pub fn load_config(name_or_path: &str) -> ConvertResult<DatasetConfig> {
    let path = Path::new(name_or_path);
    if path.is_file() {
        let file = File::open(path)
            .with_context(|| format!("open config file '{}'", path.display()))?;
        return serde_json::from_reader(BufReader::new(file))
            .map_err(|e| ConvertError::serde(format!("parse config '{}': {e}", path.display())));
    }

    match name_or_path {
        "sem_seg" | "pan_seg" => Ok(DatasetConfig {
            image_size: Some(DEFAULT_SIZE),
            categories: SEM_SEG_CATEGORIES
                .iter()
                .map(|name| CategorySpec::new(name))
                .collect(),
        }),
        "drivable" => Ok(DatasetConfig {
            image_size: Some(DEFAULT_SIZE),
            categories: DRIVABLE_CATEGORIES
                .iter()
                .map(|name| CategorySpec::new(name))
                .collect(),
        }),
        "ins_seg" | "seg_track" => Ok(DatasetConfig {
            image_size: Some(DEFAULT_SIZE),
            categories: instance_categories(),
        }),
        other => Err(ConvertError::validation(format!(
            "unknown config '{other}': not a file and not a built-in mode name"
        ))),
    }
}

const SEM_SEG_CATEGORIES: [&str; 19] = [
    "road",
    "sidewalk",
    "building",
    "wall",
    "fence",
    "pole",
    "traffic light",
    "traffic sign",
    "vegetation",
    "terrain",
    "sky",
    "person",
    "rider",
    "car",
    "truck",
    "bus",
    "train",
    "motorcycle",
    "bicycle",
];

const DRIVABLE_CATEGORIES: [&str; 3] = ["direct", "alternative", "background"];

/// The 8 instance classes plus the dialect's ignored catch-alls.
fn instance_categories() -> Vec<CategorySpec> {
    vec![
        CategorySpec::with_aliases("pedestrian", &["person"]),
        CategorySpec::new("rider"),
        CategorySpec::new("car"),
        CategorySpec::new("truck"),
        CategorySpec::new("bus"),
        CategorySpec::new("train"),
        CategorySpec::with_aliases("motorcycle", &["motor"]),
        CategorySpec::with_aliases("bicycle", &["bike"]),
        CategorySpec::ignored("other person"),
        CategorySpec::ignored("other vehicle"),
        CategorySpec::ignored("trailer"),
    ]
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
