//! Annotation data model and storage: the Scalabel-style frame/label schema,
//! JSON loading and saving, and sequence grouping.

pub mod io;
pub mod model;
