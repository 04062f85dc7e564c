//! The conversion pipeline: mode routing, schema translation, per-unit
//! rasterization, and parallel dispatch.

pub mod dispatch;
pub mod mode;
pub mod schema;
pub mod unit;
