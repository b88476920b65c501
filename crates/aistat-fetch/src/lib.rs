//! Dataset download over the SDMX 3.0 dissemination API.
//!
//! Large extractions come back as an asynchronous envelope instead of
//! data; [`download::run`] detects that, polls the status endpoint until
//! the extraction is available and stores whatever bytes the API finally
//! returns. Two dataflow identifiers are tried in order, so a renamed
//! dataflow degrades into a logged fallback instead of a failure.

pub mod download;
pub mod envelope;
pub mod error;
pub mod http;
pub mod status;

pub use download::{DATAFLOW_CANDIDATES, DownloadReport, PollSettings};
pub use error::{FetchError, Result};
pub use http::{HttpResponse, HttpTransport, ReqwestTransport};
pub use status::ExtractionStatus;
