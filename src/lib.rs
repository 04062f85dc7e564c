//! poly2rle converts polygon-based image and video annotations into run-length
//! encoded (RLE) mask labels, and derives bounding boxes from the masks.
//!
//! Annotations use a Scalabel-style JSON schema: a flat list of [`Frame`]s,
//! each holding [`Label`]s with optional [`Poly2D`] shapes. Conversion fills
//! each shaped label's `rle` and `box2d` fields in place and persists the
//! result per output unit.
//!
//! # Pipeline overview
//!
//! 1. **Load**: one JSON file or a directory of files -> [`Dataset`]
//! 2. **Translate** (instance/tracking modes): dataset dialect -> generic schema
//! 3. **Route**: [`Mode`] selects single-unit or per-sequence conversion
//! 4. **Rasterize**: each [`ConversionUnit`] is converted and saved independently,
//!    fanned out across a worker pool for sequence data
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic outputs**: a unit's output file depends only on its own
//!   frames; worker count never changes the bytes written.
//! - **Fail fast**: any malformed shape or I/O failure aborts the whole run.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod convert;
mod foundation;
mod label;
mod mask;

pub use config::{CategorySpec, DatasetConfig, load_config};
pub use convert::dispatch::dispatch_units;
pub use convert::mode::{Mode, convert};
pub use convert::schema::translate_frames;
pub use convert::unit::{ConversionUnit, rasterize_unit};
pub use foundation::error::{ConvertError, ConvertResult};
pub use label::io::{group_and_sort, load, save};
pub use label::model::{Box2D, Dataset, Frame, ImageSize, Label, Poly2D, Rle};
pub use mask::rasterize::frame_to_rles;
pub use mask::rle::{RleRuns, rle_to_box2d};
