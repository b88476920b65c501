//! CSV and file I/O shared by the pipeline stages.
//!
//! The raw download has no fixed schema, so it is read as a [`CsvTable`]
//! of strings and inspected at runtime. Derived tables have fixed columns
//! and go through the serde helpers in [`typed`].

pub mod csv_table;
pub mod error;
pub mod files;
pub mod typed;

pub use csv_table::{CsvTable, read_csv_table, write_csv_table};
pub use error::{IngestError, Result};
pub use files::{ensure_dir, read_text, write_bytes, write_text};
pub use typed::{read_rows, write_rows};
