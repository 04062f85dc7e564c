//! Mode routing: selecting and driving the conversion strategy end to end.

use std::path::Path;

use anyhow::Context as _;

use crate::config::{DatasetConfig, load_config};
use crate::convert::dispatch::dispatch_units;
use crate::convert::schema::translate_frames;
use crate::convert::unit::{ConversionUnit, rasterize_unit};
use crate::foundation::error::{ConvertError, ConvertResult};
use crate::label::io::group_and_sort;
use crate::label::model::Dataset;

/// The closed set of conversion modes.
///
/// All modes rasterize polygons to RLE masks; they differ in whether schema
/// translation runs first and whether output is a single file or one file per
/// video sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum Mode {
    /// Semantic segmentation: one output file, no schema translation.
    SemSeg,
    /// Drivable area: one output file, no schema translation.
    Drivable,
    /// Panoptic segmentation: one output file, no schema translation.
    PanSeg,
    /// Instance segmentation: schema translation, then one output file.
    InsSeg,
    /// Segmentation tracking: schema translation, then one output file per
    /// video sequence under the output directory.
    SegTrack,
}

impl Mode {
    /// Canonical mode name, as accepted on the command line and by
    /// [`load_config`].
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::SemSeg => "sem_seg",
            Mode::Drivable => "drivable",
            Mode::PanSeg => "pan_seg",
            Mode::InsSeg => "ins_seg",
            Mode::SegTrack => "seg_track",
        }
    }

    fn needs_schema_translation(self) -> bool {
        matches!(self, Mode::InsSeg | Mode::SegTrack)
    }
}

/// Run a full conversion: resolve config, translate the schema where the mode
/// requires it, and rasterize either one unit covering all frames or one unit
/// per video sequence.
///
/// `output` is a file path for single-unit modes and a directory (created if
/// absent) for [`Mode::SegTrack`]. Config resolution precedence:
/// `config_arg` > config embedded in `dataset` > the mode's built-in default.
///
/// All preconditions (image size present; for seg_track, a video name on
/// every frame) are checked before any output is written.
#[tracing::instrument(skip(dataset, config_arg))]
pub fn convert(
    mut dataset: Dataset,
    mode: Mode,
    output: &Path,
    config_arg: Option<&str>,
    nproc: usize,
) -> ConvertResult<()> {
    let config = resolve_config(dataset.config.take(), mode, config_arg)?;
    let size = config.image_size.ok_or_else(|| {
        ConvertError::validation(format!(
            "{} conversion requires imageSize in config",
            mode.as_str()
        ))
    })?;

    let frames = if mode.needs_schema_translation() {
        translate_frames(dataset.frames, &config)
    } else {
        dataset.frames
    };

    match mode {
        Mode::SemSeg | Mode::Drivable | Mode::PanSeg | Mode::InsSeg => {
            tracing::info!(frames = frames.len(), "start segmentation conversion");
            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let mut unit = ConversionUnit {
                out_path: output.to_path_buf(),
                size,
                frames,
            };
            rasterize_unit(&mut unit)
        }
        Mode::SegTrack => {
            let groups = group_and_sort(frames)?;
            std::fs::create_dir_all(output)
                .with_context(|| format!("create output dir '{}'", output.display()))?;

            let mut units = Vec::with_capacity(groups.len());
            for frames in groups {
                let video = frames
                    .first()
                    .and_then(|f| f.video_name.clone())
                    .ok_or_else(|| {
                        ConvertError::validation("sequence group has no videoName")
                    })?;
                units.push(ConversionUnit {
                    out_path: output.join(format!("{video}.json")),
                    size,
                    frames,
                });
            }
            tracing::info!(sequences = units.len(), "start tracking conversion");
            dispatch_units(units, nproc)
        }
    }
}

fn resolve_config(
    embedded: Option<DatasetConfig>,
    mode: Mode,
    config_arg: Option<&str>,
) -> ConvertResult<DatasetConfig> {
    if let Some(arg) = config_arg {
        return load_config(arg);
    }
    if let Some(config) = embedded {
        return Ok(config);
    }
    load_config(mode.as_str())
}

#[cfg(test)]
#[path = "../../tests/unit/convert/mode.rs"]
mod tests;
