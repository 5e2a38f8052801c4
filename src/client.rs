//! High-level client for the LOGO! web interface.
//!
//! This module provides the [`Client`] struct, the primary interface for
//! reading and writing LOGO! variables over an authenticated session.
//!
//! # Overview
//!
//! The client handles:
//! - The login handshake on construction
//! - Variable name resolution (`"VM0"` to type code and address)
//! - Request signing with the session's security token
//! - Decoding of read replies
//!
//! # Example
//!
//! ```no_run
//! use logo_web::{Client, ClientConfig};
//!
//! let client = Client::connect(ClientConfig::new("192.168.1.10"))?;
//!
//! client.set("Q1", 1)?;
//! let value = client.get("VM0")?;
//! println!("VM0 = {}", value);
//! # Ok::<(), logo_web::LogoError>(())
//! ```
//!
//! # Thread Safety
//!
//! Calls are synchronous and independent of each other; the only shared
//! state is the security token. Whether a client can be used from several
//! threads at once depends on its [`Transport`].

use std::fmt;
use std::time::Duration;

use log::{debug, warn};

use crate::auth::{Authenticator, Session, DEFAULT_PASSWORD};
use crate::command::{GetVarsRequest, SetVarsRequest};
use crate::error::Result;
use crate::response::VarsResponse;
use crate::transport::{HttpTransport, Transport, AJAX_PATH, DEFAULT_TIMEOUT};
use crate::variable::VariableRef;

/// Configuration for connecting to a controller.
#[derive(Clone)]
pub struct ClientConfig {
    /// Full URL of the control-plane endpoint.
    pub endpoint: String,
    /// Password of the `Web User` account.
    pub password: String,
    /// Timeout applied to every HTTP request.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration for the controller at `address`.
    ///
    /// `address` is a host or `host:port`; the endpoint becomes
    /// `http://{address}/AJAX`. The password defaults to `webuser`.
    ///
    /// # Example
    ///
    /// ```
    /// use logo_web::ClientConfig;
    ///
    /// let config = ClientConfig::new("192.168.1.10");
    /// assert_eq!(config.endpoint, "http://192.168.1.10/AJAX");
    /// assert_eq!(config.password, "webuser");
    /// ```
    pub fn new(address: impl fmt::Display) -> Self {
        Self {
            endpoint: format!("http://{}{}", address, AJAX_PATH),
            password: DEFAULT_PASSWORD.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the `Web User` password.
    ///
    /// ```
    /// use logo_web::ClientConfig;
    ///
    /// let config = ClientConfig::new("192.168.1.10").with_password("s3cret");
    /// assert_eq!(config.password, "s3cret");
    /// ```
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    /// Sets a custom timeout (default is 5 seconds).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replaces the endpoint with an explicit URL, e.g. for HTTPS or a proxy.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("password", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Client bound to an authenticated LOGO! session.
///
/// Each call produces exactly one request. No retries, caching, or
/// re-authentication: once the controller drops the session, calls fail
/// and a new client must be connected.
pub struct Client<T: Transport = HttpTransport> {
    transport: T,
    session: Session,
}

impl Client<HttpTransport> {
    /// Connects over HTTP and runs the login handshake.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built, a request fails,
    /// or the controller rejects the handshake.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use logo_web::{Client, ClientConfig};
    /// use std::time::Duration;
    ///
    /// let config = ClientConfig::new("192.168.1.10")
    ///     .with_password("secret")
    ///     .with_timeout(Duration::from_secs(2));
    /// let client = Client::connect(config)?;
    /// # Ok::<(), logo_web::LogoError>(())
    /// ```
    pub fn connect(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.endpoint, config.timeout)?;
        Self::with_transport(transport, &config.password)
    }
}

impl<T: Transport> Client<T> {
    /// Runs the login handshake over `transport` and binds the new session.
    ///
    /// # Errors
    ///
    /// Returns `LogoError::Authentication` if the controller rejects the
    /// handshake, or a transport error if a request fails.
    pub fn with_transport(transport: T, password: &str) -> Result<Self> {
        let session = Authenticator::new(&transport, password).authenticate()?;
        Ok(Self::from_session(transport, session))
    }

    /// Binds an already established session.
    pub fn from_session(transport: T, session: Session) -> Self {
        if transport.endpoint() != session.endpoint() {
            warn!(
                "session for {} bound to transport for {}",
                session.endpoint(),
                transport.endpoint()
            );
        }
        Self { transport, session }
    }

    /// Reads a variable by name, e.g. `"VM0"` or `"NetAI12"`.
    ///
    /// The value is returned exactly as the controller encodes it.
    ///
    /// # Errors
    ///
    /// Returns `LogoError::Variable` for an unresolvable name (no request is
    /// sent), a transport error, or `LogoError::Protocol` if the reply cannot
    /// be decoded.
    pub fn get(&self, name: &str) -> Result<String> {
        self.get_variable(VariableRef::parse(name)?)
    }

    /// Reads a variable.
    pub fn get_variable(&self, variable: VariableRef) -> Result<String> {
        let cmd = GetVarsRequest::new(variable);
        let reply = self.post(&cmd.to_body())?;

        let response = VarsResponse::parse(&reply).inspect_err(|e| {
            warn!("unreadable GETVARS reply for {}: {}", variable, e);
        })?;
        debug!("read {} = {}", variable, response.value);
        Ok(response.value)
    }

    /// Writes a variable by name.
    ///
    /// The reply is not inspected: the write is assumed to have succeeded
    /// when the request completes.
    ///
    /// # Errors
    ///
    /// Returns `LogoError::Variable` for an unresolvable name (no request is
    /// sent) or a transport error.
    pub fn set(&self, name: &str, value: impl fmt::Display) -> Result<()> {
        self.set_variable(VariableRef::parse(name)?, value)
    }

    /// Writes a variable.
    pub fn set_variable(&self, variable: VariableRef, value: impl fmt::Display) -> Result<()> {
        let cmd = SetVarsRequest::new(variable, value);
        self.post(&cmd.to_body())?;
        debug!("wrote {} = {}", variable, cmd.value());
        Ok(())
    }

    /// Returns the session this client is bound to.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn post(&self, body: &str) -> Result<String> {
        self.transport.post(self.session.security_token(), body)
    }
}

impl<T: Transport> fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
