//! Loading, saving, and sequence grouping of annotation collections.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rayon::prelude::*;

use crate::convert::dispatch::build_thread_pool;
use crate::foundation::error::{ConvertError, ConvertResult};
use crate::label::model::{Dataset, Frame};

/// A label document is either a full dataset object or a bare frame array.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum LabelDocument {
    Dataset(Dataset),
    Frames(Vec<Frame>),
}

/// Load an annotation collection from one JSON file or a directory of them.
///
/// Directory contents are read in deterministic name order; frames are
/// concatenated in that order and the first embedded config wins. File
/// parsing fans out over a pool of `nproc` workers (`0` uses all cores).
pub fn load(path: &Path, nproc: usize) -> ConvertResult<Dataset> {
    if !path.is_dir() {
        return load_file(path);
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(path)
        .with_context(|| format!("read label directory '{}'", path.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    if files.is_empty() {
        return Err(ConvertError::validation(format!(
            "no .json label files under '{}'",
            path.display()
        )));
    }

    let pool = build_thread_pool(nproc)?;
    let loaded: Vec<ConvertResult<Dataset>> =
        pool.install(|| files.par_iter().map(|p| load_file(p)).collect());

    let mut frames = Vec::new();
    let mut config = None;
    for dataset in loaded {
        let mut dataset = dataset?;
        frames.append(&mut dataset.frames);
        if config.is_none() {
            config = dataset.config;
        }
    }
    Ok(Dataset { frames, config })
}

fn load_file(path: &Path) -> ConvertResult<Dataset> {
    let file =
        File::open(path).with_context(|| format!("open label file '{}'", path.display()))?;
    let doc: LabelDocument = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| ConvertError::serde(format!("parse '{}': {e}", path.display())))?;
    Ok(match doc {
        LabelDocument::Dataset(dataset) => dataset,
        LabelDocument::Frames(frames) => Dataset {
            frames,
            config: None,
        },
    })
}

/// Persist a frame list as a JSON array at `path`.
///
/// The parent directory must already exist; callers create output
/// directories once, before any parallel dispatch.
pub fn save(path: &Path, frames: &[Frame]) -> ConvertResult<()> {
    let file =
        File::create(path).with_context(|| format!("create output file '{}'", path.display()))?;
    serde_json::to_writer(BufWriter::new(file), frames)
        .map_err(|e| ConvertError::serde(format!("write '{}': {e}", path.display())))?;
    Ok(())
}

/// Partition a flat frame list into per-sequence groups.
///
/// Groups are keyed by `video_name` in stable first-seen order; frames inside
/// a group keep their input order, then sort stably by `frame_index` where
/// present. Any frame without a video name fails the whole run, since
/// sequence output paths are derived from it.
pub fn group_and_sort(frames: Vec<Frame>) -> ConvertResult<Vec<Vec<Frame>>> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: std::collections::HashMap<String, Vec<Frame>> =
        std::collections::HashMap::new();

    for frame in frames {
        let video = match frame.video_name.as_deref() {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => {
                return Err(ConvertError::validation(format!(
                    "sequence grouping requires videoName on every frame, \
                     but frame '{}' has none",
                    frame.name
                )));
            }
        };
        match groups.entry(video) {
            std::collections::hash_map::Entry::Occupied(mut e) => e.get_mut().push(frame),
            std::collections::hash_map::Entry::Vacant(e) => {
                order.push(e.key().clone());
                e.insert(vec![frame]);
            }
        }
    }

    let mut out = Vec::with_capacity(order.len());
    for video in order {
        if let Some(mut group) = groups.remove(&video) {
            group.sort_by(|a, b| a.frame_index.cmp(&b.frame_index));
            out.push(group);
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/label/io.rs"]
mod tests;
