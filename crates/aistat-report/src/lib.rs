//! Interactive views over the derived tables, with accessible fallbacks.
//!
//! The charts stage renders three Plotly figures as standalone HTML pages,
//! each paired with a CSV mirror of the plotted rows and a plain-text
//! summary. The export stage converts those fallbacks into embeddable
//! HTML fragments.

pub mod charts;
pub mod embed;
pub mod error;
mod html;
mod ranking;
mod top15;
mod trend;

pub use charts::{ChartsReport, ViewInputs, ViewOutput};
pub use embed::EmbedReport;
pub use error::{ReportError, Result};
