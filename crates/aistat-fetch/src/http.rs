//! Blocking HTTP GET abstraction.
//!
//! The download flow only needs one verb, so the trait stays minimal and
//! tests can drive the flow with a scripted transport.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::error::{FetchError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Response body plus the metadata the download flow inspects.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One blocking GET with an explicit Accept header.
pub trait HttpTransport {
    fn get(&self, url: &str, accept: &str) -> Result<HttpResponse>;
}

/// Transport backed by a shared [`reqwest`] blocking client.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("aistat/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| FetchError::Client { source })?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str, accept: &str) -> Result<HttpResponse> {
        let request_failed = |source| FetchError::Request {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url)
            .header(ACCEPT, accept)
            .send()
            .map_err(request_failed)?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = response.bytes().map_err(request_failed)?.to_vec();

        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}
