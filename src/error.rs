//! Error types for the LOGO! web protocol.

use std::fmt;
use thiserror::Error;

/// Result type alias for LOGO! web operations.
pub type Result<T> = std::result::Result<T, LogoError>;

/// Boxed error produced by a [`Transport`](crate::Transport) implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The handshake step that was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStage {
    /// The `UAMCHAL` challenge request.
    Challenge,
    /// The `UAMLOGIN` login request.
    Login,
}

impl fmt::Display for AuthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthStage::Challenge => write!(f, "challenge"),
            AuthStage::Login => write!(f, "login"),
        }
    }
}

/// Errors that can occur while talking to a LOGO! web interface.
#[derive(Debug, Error)]
pub enum LogoError {
    /// The request/response exchange itself failed.
    #[error("Transport error: {reason}")]
    Transport {
        /// Description of the failure.
        reason: String,
        /// Underlying error reported by the transport, if any.
        #[source]
        source: Option<BoxError>,
    },

    /// The transport gave up waiting for the controller.
    #[error("Communication timeout")]
    Timeout,

    /// The controller rejected a handshake step or answered with an unexpected shape.
    #[error("Authentication failed at {stage} step: controller returned '{status}'")]
    Authentication {
        /// Handshake step that failed.
        stage: AuthStage,
        /// Raw status text returned by the controller.
        status: String,
    },

    /// A variable name could not be resolved to a kind and address.
    #[error("Variable error '{token}': {reason}")]
    Variable {
        /// The offending token.
        token: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A response could not be decoded into the expected structure.
    #[error("Protocol error: {reason}")]
    Protocol {
        /// Description of the decoding failure.
        reason: String,
    },
}

impl LogoError {
    /// Creates a new `Transport` error without an underlying source.
    ///
    /// # Example
    ///
    /// ```
    /// use logo_web::LogoError;
    ///
    /// let err = LogoError::transport("connection refused");
    /// assert_eq!(err.to_string(), "Transport error: connection refused");
    /// ```
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
            source: None,
        }
    }

    /// Creates a new `Transport` error wrapping an underlying source.
    pub fn transport_with_source(reason: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Transport {
            reason: reason.into(),
            source: Some(source.into()),
        }
    }

    /// Creates a new `Authentication` error.
    ///
    /// # Example
    ///
    /// ```
    /// use logo_web::{AuthStage, LogoError};
    ///
    /// let err = LogoError::authentication(AuthStage::Challenge, "500");
    /// ```
    pub fn authentication(stage: AuthStage, status: impl Into<String>) -> Self {
        Self::Authentication {
            stage,
            status: status.into(),
        }
    }

    /// Creates a new `Variable` error.
    ///
    /// # Example
    ///
    /// ```
    /// use logo_web::LogoError;
    ///
    /// let err = LogoError::variable("XX", "unsupported variable kind");
    /// ```
    pub fn variable(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Variable {
            token: token.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new `Protocol` error.
    pub fn protocol(reason: impl Into<String>) -> Self {
        Self::Protocol {
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for LogoError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            return Self::Timeout;
        }
        let reason = match error.status() {
            Some(status) => format!("HTTP {}", status.as_u16()),
            None => error.to_string(),
        };
        Self::transport_with_source(reason, error)
    }
}
