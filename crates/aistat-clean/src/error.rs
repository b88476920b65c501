use thiserror::Error;

#[derive(Debug, Error)]
pub enum CleanError {
    /// No recognized time column; the export layout is not SDMX-like.
    #[error("no time column detected (expected TIME_PERIOD or similar)")]
    NoTimeColumn,

    /// No column had a single parseable numeric value.
    #[error("no numeric value column detected")]
    NoValueColumn,

    #[error(transparent)]
    Ingest(#[from] aistat_ingest::IngestError),
}

pub type Result<T> = std::result::Result<T, CleanError>;
