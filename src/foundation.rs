//! Shared foundation types: the error taxonomy.

pub mod error;
