//! Per-unit rasterization: converting one output unit's frames in place and
//! persisting them.

use std::path::PathBuf;

use crate::foundation::error::ConvertResult;
use crate::label::io::save;
use crate::label::model::{Frame, ImageSize, Label, Poly2D};
use crate::mask::rasterize::frame_to_rles;
use crate::mask::rle::rle_to_box2d;

/// One independently convertible unit of work.
///
/// A unit bundles everything its conversion needs: the frames to rasterize,
/// the canvas size, and the single output path its result is written to.
/// Units own their frames, so parallel workers share no mutable state.
#[derive(Clone, Debug)]
pub struct ConversionUnit {
    /// Output file this unit's frames are persisted to.
    pub out_path: PathBuf,
    /// Canvas dimensions polygons are rasterized against.
    pub size: ImageSize,
    /// Frames converted and written as one unit.
    pub frames: Vec<Frame>,
}

/// Rasterize every frame of a unit in place, then persist the frame list to
/// the unit's output path.
///
/// Frames without labels are untouched. Within a frame, labels are composited
/// in score order when every label carries a score (ascending, so the highest
/// score is painted last and wins overlaps) and in authoring order otherwise.
/// Only shape-bearing labels receive a mask and box; the saved label order is
/// never changed.
pub fn rasterize_unit(unit: &mut ConversionUnit) -> ConvertResult<()> {
    for frame in &mut unit.frames {
        rasterize_frame(unit.size, frame)?;
    }
    save(&unit.out_path, &unit.frames)
}

fn rasterize_frame(size: ImageSize, frame: &mut Frame) -> ConvertResult<()> {
    let Some(labels) = frame.labels.as_mut() else {
        return Ok(());
    };
    if labels.is_empty() {
        return Ok(());
    }

    // Indices of shape-bearing labels, in rendering order.
    let targets: Vec<usize> = render_order(labels)
        .into_iter()
        .filter(|&i| labels[i].poly2d.is_some())
        .collect();
    if targets.is_empty() {
        return Ok(());
    }

    let rles = {
        let poly2ds: Vec<&[Poly2D]> = targets
            .iter()
            .filter_map(|&i| labels[i].poly2d.as_deref())
            .collect();
        frame_to_rles(size, &poly2ds)?
    };

    for (&i, rle) in targets.iter().zip(rles) {
        labels[i].box2d = rle_to_box2d(&rle);
        labels[i].rle = Some(rle);
    }
    Ok(())
}

/// Rendering order of a frame's labels, as indices into the label list.
///
/// When every label has a score, labels render in ascending score order so
/// higher-confidence labels paint later and win overlapping pixels. A single
/// scoreless label disables sorting for the whole frame; partial scoring
/// never triggers partial reordering.
fn render_order(labels: &[Label]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..labels.len()).collect();
    if labels.iter().all(|label| label.score.is_some()) {
        order.sort_by(|&a, &b| {
            let (sa, sb) = (labels[a].score, labels[b].score);
            sa.partial_cmp(&sb).unwrap_or(std::cmp::Ordering::Equal)
        });
    }
    order
}

#[cfg(test)]
#[path = "../../tests/unit/convert/unit.rs"]
mod tests;
