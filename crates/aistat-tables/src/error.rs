use thiserror::Error;

#[derive(Debug, Error)]
pub enum TablesError {
    #[error("cleaned dataset is missing required columns: {columns:?}")]
    MissingColumns { columns: Vec<String> },

    #[error("cleaned dataset has no usable year values")]
    NoYears,

    #[error("no rows match indicator {indicator} with activity {activity}")]
    EmptyAdoptionSlice { indicator: String, activity: String },

    #[error(transparent)]
    Ingest(#[from] aistat_ingest::IngestError),
}

pub type Result<T> = std::result::Result<T, TablesError>;
