use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build the HTTP client")]
    Client {
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("asynchronous envelope carries no request identifier")]
    MissingRequestId,

    #[error("asynchronous extraction failed with status {status}")]
    ExtractionFailed { status: String },

    #[error("extraction still not available after {polls} status polls")]
    ExtractionTimeout { polls: u32 },

    #[error("response does not look like SDMX-CSV")]
    NotCsv,

    #[error("every dataflow candidate failed: {}", .attempts.join("; "))]
    AllCandidatesFailed { attempts: Vec<String> },

    #[error(transparent)]
    Ingest(#[from] aistat_ingest::IngestError),
}

pub type Result<T> = std::result::Result<T, FetchError>;
