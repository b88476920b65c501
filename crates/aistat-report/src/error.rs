use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// A derived table exists but holds no rows, so there is nothing to plot.
    #[error("derived table {path} has no rows; run the tables stage first")]
    EmptyTable { path: PathBuf },

    #[error("none of the focus geographies {geos:?} appear in the adoption series")]
    NoFocusRows { geos: Vec<String> },

    #[error("charts directory {path} not found; run the charts stage first")]
    ChartsMissing { path: PathBuf },

    #[error("failed to encode figure JSON: {source}")]
    FigureJson {
        #[from]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Ingest(#[from] aistat_ingest::IngestError),
}

pub type Result<T> = std::result::Result<T, ReportError>;
