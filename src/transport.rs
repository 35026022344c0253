//! HTTP transport for the API client.
//!
//! The client only needs one thing from the network: send a prepared request
//! and hand back the response body, or a classified failure. `Transport` is
//! that seam; `HttpTransport` implements it on top of a blocking `reqwest`
//! client with an explicit timeout.

use crate::request::PreparedRequest;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::trace;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The server answered with a non-success status.
    #[error("server responded with HTTP status {0}")]
    Status(StatusCode),
    /// The exchange did not complete within the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),
    /// No response at all (DNS failure, connection refused, reset, ...).
    #[error("no response from server: {0}")]
    NoResponse(String),
}

pub trait Transport {
    /// Performs one HTTP exchange and returns the full response body.
    fn execute(&self, request: &PreparedRequest) -> Result<Vec<u8>, TransportError>;
}

/// Configuration for the HTTP transport
#[derive(Debug, Clone, PartialEq)]
pub struct HttpTransportConfig {
    /// Request timeout in seconds
    pub timeout: u64,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: HttpTransportConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self { client })
    }

    pub fn with_timeout(timeout: u64) -> Result<Self, reqwest::Error> {
        Self::new(HttpTransportConfig { timeout })
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: &PreparedRequest) -> Result<Vec<u8>, TransportError> {
        trace!("Sending {} request to {}...", request.method, request.url);

        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers.clone());

        // Write verbs always carry an empty body; the parameters travel in the query string.
        if request.is_write() {
            builder = builder.body(Vec::<u8>::new());
        }

        let response = builder.send().map_err(classify)?;
        let status = response.status();
        trace!("Response status: {}", status);

        if !status.is_success() {
            return Err(TransportError::Status(status));
        }

        let body = response.bytes().map_err(classify)?;
        Ok(body.to_vec())
    }
}

fn classify(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout(error_chain(&error))
    } else if let Some(status) = error.status() {
        TransportError::Status(status)
    } else {
        TransportError::NoResponse(error_chain(&error))
    }
}

/// Renders an error together with all of its sources, e.g.
/// `error sending request: client error (Connect): Connection refused`.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Replays canned results in order and records every request it is given.
    #[derive(Default)]
    pub(crate) struct MockTransport {
        responses: RefCell<VecDeque<Result<Vec<u8>, TransportError>>>,
        requests: RefCell<Vec<PreparedRequest>>,
    }

    impl MockTransport {
        pub(crate) fn respond(self, response: Result<&[u8], TransportError>) -> Self {
            self.responses
                .borrow_mut()
                .push_back(response.map(<[u8]>::to_vec));
            self
        }

        pub(crate) fn requests(&self) -> Vec<PreparedRequest> {
            self.requests.borrow().clone()
        }
    }

    impl Transport for MockTransport {
        fn execute(&self, request: &PreparedRequest) -> Result<Vec<u8>, TransportError> {
            self.requests.borrow_mut().push(request.clone());
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::NoResponse("no canned response".into())))
        }
    }
}
