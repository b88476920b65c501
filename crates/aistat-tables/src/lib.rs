//! Derived tables over the cleaned AI-adoption dataset.
//!
//! Two stages live here. [`build::run`] derives the five summary tables
//! the report crate renders: the adoption series, the latest-year top 15,
//! the within-year ranks, the focus-country sector breakdown and the
//! technology cross-section. [`profile::run`] writes per-dimension value
//! counts and a profiling report, useful when the upstream dataset shifts
//! shape.

pub mod build;
pub mod dataset;
pub mod error;
pub mod profile;
pub mod rank;

pub use build::TablesReport;
pub use dataset::{CleanDataset, Observation};
pub use error::{Result, TablesError};
pub use profile::{DimensionProfile, ProfileReport};
pub use rank::min_ranks;
