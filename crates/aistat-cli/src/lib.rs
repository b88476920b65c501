//! Library side of the `aistat` binary.
//!
//! The pipeline orchestration lives here rather than in `main.rs` so
//! integration tests can drive whole runs without spawning the binary.

pub mod logging;
pub mod pipeline;
