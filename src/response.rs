//! Response parsing for the LOGO! web protocol.
//!
//! The handshake replies are comma-separated status lines whose first field
//! is a status code (`700` on success). Variable reads come back as a small
//! XML document holding an `r` element whose `v` attribute is the value.
//!
//! # Example
//!
//! ```
//! use logo_web::{ChallengeResponse, VarsResponse};
//!
//! let challenge = ChallengeResponse::parse("700,hintX,4242").unwrap();
//! assert_eq!(challenge.security_hint, "hintX");
//! assert_eq!(challenge.server_challenge, 4242);
//!
//! let vars = VarsResponse::parse(r#"<rs><r i="0" e="0" v="1"/></rs>"#).unwrap();
//! assert_eq!(vars.value, "1");
//! ```

use crate::error::{AuthStage, LogoError, Result};

/// Status code the controller returns on success.
pub const SUCCESS_STATUS: &str = "700";

/// A comma-separated status reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine<'a> {
    fields: Vec<&'a str>,
}

impl<'a> StatusLine<'a> {
    /// Splits a reply on commas. No trimming is applied.
    pub fn parse(text: &'a str) -> Self {
        Self {
            fields: text.split(',').collect(),
        }
    }

    /// Returns the status field (the first one).
    pub fn status(&self) -> &'a str {
        self.fields.first().copied().unwrap_or_default()
    }

    /// Returns all fields.
    pub fn fields(&self) -> &[&'a str] {
        &self.fields
    }

    /// Returns whether the reply has `expected` fields and a `700` status.
    pub fn is_success(&self, expected: usize) -> bool {
        self.fields.len() == expected && self.status() == SUCCESS_STATUS
    }

    /// Checks shape and status, failing with an authentication error otherwise.
    ///
    /// # Errors
    ///
    /// Returns `LogoError::Authentication` carrying the returned status text
    /// if the field count differs from `expected` or the status is not `700`.
    pub fn check(&self, stage: AuthStage, expected: usize) -> Result<()> {
        if self.is_success(expected) {
            Ok(())
        } else {
            Err(LogoError::authentication(stage, self.status()))
        }
    }
}

/// Parsed reply to a challenge request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeResponse {
    /// Hint to echo in the `Security-Hint` header of the login request.
    pub security_hint: String,
    /// Challenge chosen by the controller.
    pub server_challenge: u32,
}

impl ChallengeResponse {
    /// Parses a `700,{hint},{challenge}` reply.
    ///
    /// # Errors
    ///
    /// Returns `LogoError::Authentication` if the reply is not a three field
    /// success line or the challenge is not an unsigned 32-bit integer.
    pub fn parse(text: &str) -> Result<Self> {
        let line = StatusLine::parse(text);
        line.check(AuthStage::Challenge, 3)?;

        let fields = line.fields();
        // the hint stays as sent; only the number tolerates surrounding whitespace
        let server_challenge = fields[2]
            .trim()
            .parse::<u32>()
            .map_err(|_| LogoError::authentication(AuthStage::Challenge, text))?;

        Ok(Self {
            security_hint: fields[1].to_string(),
            server_challenge,
        })
    }
}

/// Parsed reply to a login request.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginResponse {
    /// Token authorizing subsequent requests.
    pub security_token: String,
}

impl LoginResponse {
    /// Parses a `700,{token}` reply.
    ///
    /// # Errors
    ///
    /// Returns `LogoError::Authentication` if the reply is not a two field
    /// success line.
    pub fn parse(text: &str) -> Result<Self> {
        let line = StatusLine::parse(text);
        line.check(AuthStage::Login, 2)?;

        Ok(Self {
            security_token: line.fields()[1].to_string(),
        })
    }
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("security_token", &"[REDACTED]")
            .finish()
    }
}

/// Parsed reply to a variable read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarsResponse {
    /// Value exactly as encoded by the controller.
    pub value: String,
}

impl VarsResponse {
    /// Extracts the `v` attribute of the `r` child of the document root.
    ///
    /// # Errors
    ///
    /// Returns `LogoError::Protocol` if the text is not well-formed XML or the
    /// `r` element or its `v` attribute is absent.
    pub fn parse(text: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse(text)
            .map_err(|e| LogoError::protocol(format!("malformed XML response: {}", e)))?;

        let result = doc
            .root_element()
            .children()
            .find(|node| node.has_tag_name("r"))
            .ok_or_else(|| LogoError::protocol("response has no 'r' element"))?;

        let value = result
            .attribute("v")
            .ok_or_else(|| LogoError::protocol("'r' element has no 'v' attribute"))?;

        Ok(Self {
            value: value.to_string(),
        })
    }
}
