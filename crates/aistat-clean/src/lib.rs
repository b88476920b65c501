//! Cleaning of the raw SDMX-CSV extract.
//!
//! The raw export has no fixed schema, so the column roles (time, value,
//! geography, frequency, unit) are detected by name before any filtering.
//! Cleaning keeps only annual percentage observations with a parseable
//! year and value, appends the derived `year` and `value` columns, and
//! writes a report of every decision.

pub mod clean;
pub mod coerce;
pub mod detect;
pub mod error;

pub use clean::{CleanReport, run};
pub use coerce::{coerce_value, extract_year, format_value};
pub use detect::{ColumnMap, ColumnMatch, detect_columns};
pub use error::{CleanError, Result};
