//! Shared model types for the AI-adoption statistics pipeline.
//!
//! This crate carries the pieces every stage agrees on: the artifact
//! locations derived from one root directory, the dataset codes the
//! pipeline filters on, the focus-geography selection, and the typed rows
//! of the derived tables.

pub mod codes;
pub mod focus;
pub mod paths;
pub mod rows;

pub use focus::FocusConfig;
pub use paths::DataPaths;
pub use rows::{AdoptionRow, RankRow, SectorRow, TechRow};
