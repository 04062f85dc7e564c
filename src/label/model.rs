//! The Scalabel-style annotation schema: frames, labels, polygon shapes, and
//! the derived mask/box fields conversion fills in.

use crate::config::DatasetConfig;

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// A loaded annotation collection: an ordered list of frames plus an optional
/// embedded run configuration.
///
/// A dataset is a pure data model deserialized from one or more JSON files
/// (see [`crate::load`]). Conversion never mutates it except to fill each
/// label's `rle` and `box2d` fields.
pub struct Dataset {
    /// Ordered frames, in file order.
    #[serde(default)]
    pub frames: Vec<Frame>,
    /// Run configuration embedded in the annotation file, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<DatasetConfig>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// One unit of imagery: a still image or a single video frame.
pub struct Frame {
    /// Frame identifier, typically the image file name.
    pub name: String,
    /// Video sequence this frame belongs to. Present only for video data;
    /// required by sequence-grouped conversion.
    #[serde(default, rename = "videoName", skip_serializing_if = "Option::is_none")]
    pub video_name: Option<String>,
    /// Position of this frame within its video sequence.
    #[serde(default, rename = "frameIndex", skip_serializing_if = "Option::is_none")]
    pub frame_index: Option<u32>,
    /// Source image URL, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Frame-level attributes (weather, scene, ...), passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<serde_json::Map<String, serde_json::Value>>,
    /// Annotated objects in this frame, in authoring order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Label>>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// One annotated object or region within a frame.
///
/// Rasterization fills `rle` and `box2d` for labels that carry a `poly2d`
/// shape; labels without a shape are left untouched.
pub struct Label {
    /// Stable label identifier (unique within the frame; for tracking data,
    /// shared across frames of the same object).
    pub id: String,
    /// Object category name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Detection confidence. When every label in a frame has a score, labels
    /// are composited in ascending score order so higher scores win overlaps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Label-level attributes (occluded, truncated, crowd, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<serde_json::Map<String, serde_json::Value>>,
    /// Polygon shape description. Absent for non-polygon labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poly2d: Option<Vec<Poly2D>>,
    /// Rasterized mask, filled in by conversion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rle: Option<Rle>,
    /// Bounding box derived from the mask, filled in by conversion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box2d: Option<Box2D>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A 2D polygon boundary with optional cubic bezier segments.
///
/// `types` holds one character per vertex: `'L'` for an on-curve line vertex,
/// `'C'` for a bezier control vertex. Control vertices come in runs of three
/// (two control points followed by the segment endpoint).
pub struct Poly2D {
    /// Vertex coordinates as `[x, y]` pairs, in pixels.
    pub vertices: Vec<[f64; 2]>,
    /// Per-vertex type characters, same length as `vertices`.
    pub types: String,
    /// Whether the boundary is an explicitly closed ring.
    #[serde(default)]
    pub closed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Axis-aligned bounding box with inclusive pixel corners.
pub struct Box2D {
    /// Left edge.
    pub x1: f64,
    /// Top edge.
    pub y1: f64,
    /// Right edge (inclusive).
    pub x2: f64,
    /// Bottom edge (inclusive).
    pub y2: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// A compressed run-length encoded binary mask.
///
/// `counts` is the LEB128-style run string; runs alternate background and
/// foreground starting with background, in row-major pixel order. See
/// [`crate::RleRuns`] for the decoded representation.
pub struct Rle {
    /// Compressed run string.
    pub counts: String,
    /// Mask dimensions as `[height, width]`.
    pub size: [u32; 2],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Pixel dimensions of the canvas polygons are rasterized against.
pub struct ImageSize {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
}

#[cfg(test)]
#[path = "../../tests/unit/label/model.rs"]
mod tests;
