//! Download the source dataset, resolving the asynchronous extraction
//! flow when the API answers with an envelope instead of data.

use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use aistat_ingest::write_bytes;
use aistat_model::DataPaths;

use crate::envelope::{contains_bytes, extract_request_id, looks_like_envelope, status_words};
use crate::error::{FetchError, Result};
use crate::http::{HttpResponse, HttpTransport};
use crate::status::ExtractionStatus;

/// Accept header for the SDMX-CSV 2.0 profile, labels pinned to codes.
pub const ACCEPT_SDMX_CSV: &str = "application/vnd.sdmx.data+csv;version=2.0.0;labels=id";

const ACCEPT_XML: &str = "application/xml";

/// SDMX 3.0 data query base.
const SDMX_BASE: &str =
    "https://ec.europa.eu/eurostat/api/dissemination/sdmx/3.0/data/dataflow/ESTAT";

/// Asynchronous extraction base.
const ASYNC_BASE: &str = "https://ec.europa.eu/eurostat/api/dissemination/1.0/async";

/// Dataflow identifiers to try, current vintage first.
pub const DATAFLOW_CANDIDATES: [&str; 2] = ["ISOC_EB_AIN2", "ISOC_E_AIN2"];

/// Bytes inspected when deciding whether a body is tabular.
const CSV_SNIFF_LEN: usize = 2000;

/// Polling cadence for the asynchronous extraction flow.
#[derive(Debug, Clone)]
pub struct PollSettings {
    pub interval: Duration,
    pub max_polls: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_polls: 120,
        }
    }
}

/// What a download run fetched. Feeds the CLI summary.
#[derive(Debug, Clone)]
pub struct DownloadReport {
    pub dataflow: String,
    pub bytes: usize,
}

fn data_url(dataflow: &str) -> String {
    format!("{SDMX_BASE}/{dataflow}/1.0?attributes=none&measures=all")
}

fn status_url(request_id: &str) -> String {
    format!("{ASYNC_BASE}/status/{request_id}")
}

fn result_url(request_id: &str) -> String {
    format!("{ASYNC_BASE}/data/{request_id}")
}

/// Whether a body plausibly is SDMX-CSV: a comma or a STRUCTURE marker
/// near the start.
fn looks_like_csv(body: &[u8]) -> bool {
    let head = &body[..body.len().min(CSV_SNIFF_LEN)];
    head.contains(&b',') || contains_bytes(&head.to_ascii_uppercase(), b"STRUCTURE")
}

fn checked_get(transport: &dyn HttpTransport, url: &str, accept: &str) -> Result<HttpResponse> {
    let response = transport.get(url, accept)?;
    if !response.is_success() {
        return Err(FetchError::HttpStatus {
            status: response.status,
            url: url.to_string(),
        });
    }
    Ok(response)
}

/// Poll the status endpoint until the extraction becomes available, then
/// fetch the result.
fn resolve_envelope(
    transport: &dyn HttpTransport,
    envelope: &[u8],
    settings: &PollSettings,
) -> Result<Vec<u8>> {
    let request_id = extract_request_id(envelope).ok_or(FetchError::MissingRequestId)?;
    info!(request_id = %request_id, "asynchronous extraction detected");

    for poll in 1..=settings.max_polls {
        let response = checked_get(transport, &status_url(&request_id), ACCEPT_XML)?;
        let status = ExtractionStatus::from_report(&status_words(&response.body));
        info!(poll, max_polls = settings.max_polls, status = %status, "extraction status");

        match status {
            ExtractionStatus::Available => {
                let data = checked_get(transport, &result_url(&request_id), ACCEPT_SDMX_CSV)?;
                return Ok(data.body);
            }
            ExtractionStatus::Failed(word) => {
                return Err(FetchError::ExtractionFailed { status: word });
            }
            _ => thread::sleep(settings.interval),
        }
    }

    Err(FetchError::ExtractionTimeout {
        polls: settings.max_polls,
    })
}

fn fetch_candidate(
    transport: &dyn HttpTransport,
    url: &str,
    settings: &PollSettings,
) -> Result<Vec<u8>> {
    let response = checked_get(transport, url, ACCEPT_SDMX_CSV)?;
    let body = if looks_like_envelope(&response.body) {
        resolve_envelope(transport, &response.body, settings)?
    } else {
        response.body
    };
    if !looks_like_csv(&body) {
        return Err(FetchError::NotCsv);
    }
    Ok(body)
}

/// Download the dataset into `data/raw`, trying each dataflow candidate
/// in order. The raw bytes are written exactly as received.
pub fn run(
    paths: &DataPaths,
    transport: &dyn HttpTransport,
    settings: &PollSettings,
) -> Result<DownloadReport> {
    let mut attempts: Vec<String> = Vec::new();

    for dataflow in DATAFLOW_CANDIDATES {
        let url = data_url(dataflow);
        info!(dataflow, url = %url, "requesting dataset");

        match fetch_candidate(transport, &url, settings) {
            Ok(body) => {
                write_bytes(&paths.raw_csv(), &body)?;
                info!(
                    dataflow,
                    bytes = body.len(),
                    path = %paths.raw_csv().display(),
                    "dataset saved"
                );
                return Ok(DownloadReport {
                    dataflow: dataflow.to_string(),
                    bytes: body.len(),
                });
            }
            Err(err) => {
                warn!(dataflow, error = %err, "dataflow candidate failed");
                attempts.push(format!("{dataflow}: {err}"));
            }
        }
    }

    Err(FetchError::AllCandidatesFailed { attempts })
}
