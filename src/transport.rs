//! HTTP transport layer for LOGO! web communication.
//!
//! This module provides the [`Transport`] trait and [`HttpTransport`], its
//! default implementation. The transport layer is separated from the
//! protocol layer: it only knows how to POST a text body with a
//! `Security-Hint` header to a single endpoint and hand back the reply text.
//!
//! # Design
//!
//! - **Protocol agnostic** - Handles only request bodies and reply text
//! - **Synchronous** - Blocking request with configurable timeout
//! - **Simple** - One endpoint, no retries, no redirects of its own
//!
//! # Example
//!
//! ```no_run
//! use logo_web::{HttpTransport, Transport};
//! use std::time::Duration;
//!
//! let transport = HttpTransport::new("http://192.168.1.10/AJAX", Duration::from_secs(5)).unwrap();
//! let reply = transport.post("p", "UAMCHAL:3,4,1,2,3,4").unwrap();
//! ```

use std::time::Duration;

use log::trace;
use reqwest::blocking::Client as HttpClient;

use crate::error::Result;

/// Resource path of the control-plane endpoint.
pub const AJAX_PATH: &str = "/AJAX";

/// Header carrying either the handshake hint or the session token.
pub const SECURITY_HINT_HEADER: &str = "Security-Hint";

/// Default timeout for HTTP requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// The request/response capability the protocol layer needs.
///
/// Implementations send `body` as a POST to [`endpoint`](Transport::endpoint)
/// with the [`SECURITY_HINT_HEADER`] set to `security_hint`, and return the
/// reply body as text.
pub trait Transport {
    /// Returns the URL requests are sent to.
    fn endpoint(&self) -> &str;

    /// Sends one request and waits for its reply.
    ///
    /// # Errors
    ///
    /// Returns `LogoError::Transport` or `LogoError::Timeout` if the exchange
    /// does not complete.
    fn post(&self, security_hint: &str, body: &str) -> Result<String>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn endpoint(&self) -> &str {
        (**self).endpoint()
    }

    fn post(&self, security_hint: &str, body: &str) -> Result<String> {
        (**self).post(security_hint, body)
    }
}

/// Blocking HTTP transport built on `reqwest`.
#[derive(Clone)]
pub struct HttpTransport {
    client: HttpClient,
    endpoint: String,
}

impl HttpTransport {
    /// Creates a transport posting to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns `LogoError::Transport` if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Creates a transport with the default timeout.
    pub fn with_default_timeout(endpoint: impl Into<String>) -> Result<Self> {
        Self::new(endpoint, DEFAULT_TIMEOUT)
    }
}

impl Transport for HttpTransport {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn post(&self, security_hint: &str, body: &str) -> Result<String> {
        trace!("POST {} ({} bytes)", self.endpoint, body.len());

        let response = self
            .client
            .post(&self.endpoint)
            .header(SECURITY_HINT_HEADER, security_hint)
            .body(body.to_owned())
            .send()?
            .error_for_status()?;

        Ok(response.text()?)
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}
