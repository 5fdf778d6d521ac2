//! Executes `HttpRequest` values against the network.
//!
//! `Transport` is the seam between the sans-IO client and real IO. The
//! default `UreqTransport` performs a blocking exchange with a `ureq` agent
//! that hands non-2xx statuses back as data, so status interpretation stays
//! in `KycClient::parse_response`.

use std::io;
use std::time::Duration;

use log::debug;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Performs one HTTP round-trip.
///
/// Implementations must not retry and must report timeouts as
/// `ApiError::Timeout`.
pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking transport backed by a shared `ureq::Agent`.
///
/// Cloning is cheap and clones share the agent's connection pool.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
            timeout,
        } = request;
        debug!("{method} {url} (timeout {}ms)", timeout.as_millis());

        let result = match method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&url);
                for (key, value) in &headers {
                    builder = builder.header(key.as_str(), value.as_str());
                }
                builder.config().timeout_global(Some(timeout)).build().call()
            }
            HttpMethod::Post => {
                let mut builder = self.agent.post(&url);
                for (key, value) in &headers {
                    builder = builder.header(key.as_str(), value.as_str());
                }
                let builder = builder.config().timeout_global(Some(timeout)).build();
                match body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = result.map_err(|e| classify(e, timeout))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
            .collect();
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_string()
            .map_err(|e| classify(e, timeout))?;
        debug!("{method} {url} -> {status}");

        Ok(HttpResponse { status, headers, body })
    }
}

fn classify(err: ureq::Error, timeout: Duration) -> ApiError {
    match err {
        ureq::Error::Timeout(_) => ApiError::Timeout(timeout),
        ureq::Error::Io(e) if e.kind() == io::ErrorKind::TimedOut => ApiError::Timeout(timeout),
        other => ApiError::TransportError(other.to_string()),
    }
}
