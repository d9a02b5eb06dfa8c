//! Ready-made filters and validators
//!
//! The engine accepts any closure as a filter or validator; this module
//! gathers the common ones, plus the axum extractor when the `axum` feature
//! is enabled.

#[cfg(feature = "axum")]
pub mod extractor;
pub mod filters;
pub mod validators;

#[cfg(feature = "axum")]
pub use extractor::{ProvidesInputFilter, Validated};
