//! Request messages for the LOGO! web protocol.
//!
//! Every request is a short line of text POSTed to the controller's `/AJAX`
//! resource. Each message type here knows how to render its own body.
//!
//! | Message | Body |
//! |---------|------|
//! | [`ChallengeRequest`] | `UAMCHAL:3,4,{a1},{a2},{b1},{b2}` |
//! | [`LoginRequest`] | `UAMLOGIN:Web User,{pw_token},{server_challenge}` |
//! | [`GetVarsRequest`] | `GETVARS:v1,{type_code},0,{address},1,1` |
//! | [`SetVarsRequest`] | `SETVARS:v0,{type_code},0,{address},1,1,{value}` |
//!
//! # Example
//!
//! ```
//! use logo_web::{GetVarsRequest, VariableKind, VariableRef};
//!
//! let cmd = GetVarsRequest::new(VariableRef::new(VariableKind::Q, 0));
//! assert_eq!(cmd.to_body(), "GETVARS:v1,130,0,0,1,1");
//! ```

use std::fmt;

use crate::variable::VariableRef;

/// Protocol version pair sent in every challenge request.
pub(crate) const CHALLENGE_VERSION: (u8, u8) = (3, 4);

/// User name the web interface expects in the login request.
pub const WEB_USER: &str = "Web User";

/// Challenge request carrying the client's four nonces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChallengeRequest {
    /// First client nonce.
    pub a1: u32,
    /// Second client nonce.
    pub a2: u32,
    /// Third client nonce.
    pub b1: u32,
    /// Fourth client nonce.
    pub b2: u32,
}

impl ChallengeRequest {
    /// Creates a challenge request from the four client nonces.
    pub fn new(a1: u32, a2: u32, b1: u32, b2: u32) -> Self {
        Self { a1, a2, b1, b2 }
    }

    /// Renders the request body.
    ///
    /// ```
    /// use logo_web::ChallengeRequest;
    ///
    /// let cmd = ChallengeRequest::new(1, 2, 3, 4);
    /// assert_eq!(cmd.to_body(), "UAMCHAL:3,4,1,2,3,4");
    /// ```
    pub fn to_body(&self) -> String {
        let (major, minor) = CHALLENGE_VERSION;
        format!(
            "UAMCHAL:{},{},{},{},{},{}",
            major, minor, self.a1, self.a2, self.b1, self.b2
        )
    }
}

/// Login request proving knowledge of the password.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LoginRequest {
    /// CRC of the password token XORed with the server challenge.
    pub pw_token: u32,
    /// All client nonces XORed with the server challenge.
    pub server_challenge: u32,
}

impl LoginRequest {
    /// Creates a login request.
    pub fn new(pw_token: u32, server_challenge: u32) -> Self {
        Self {
            pw_token,
            server_challenge,
        }
    }

    /// Renders the request body.
    ///
    /// ```
    /// use logo_web::LoginRequest;
    ///
    /// let cmd = LoginRequest::new(10, 20);
    /// assert_eq!(cmd.to_body(), "UAMLOGIN:Web User,10,20");
    /// ```
    pub fn to_body(&self) -> String {
        format!(
            "UAMLOGIN:{},{},{}",
            WEB_USER, self.pw_token, self.server_challenge
        )
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("pw_token", &"[REDACTED]")
            .field("server_challenge", &self.server_challenge)
            .finish()
    }
}

/// Request reading a single variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetVarsRequest {
    variable: VariableRef,
}

impl GetVarsRequest {
    /// Creates a read request for `variable`.
    pub fn new(variable: VariableRef) -> Self {
        Self { variable }
    }

    /// Returns the variable being read.
    pub fn variable(&self) -> VariableRef {
        self.variable
    }

    /// Renders the request body.
    pub fn to_body(&self) -> String {
        format!(
            "GETVARS:v1,{},0,{},1,1",
            self.variable.type_code(),
            self.variable.address
        )
    }
}

/// Request writing a single variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetVarsRequest {
    variable: VariableRef,
    value: String,
}

impl SetVarsRequest {
    /// Creates a write request assigning `value` to `variable`.
    ///
    /// The value is sent exactly as rendered by its `Display` impl.
    ///
    /// ```
    /// use logo_web::{SetVarsRequest, VariableKind, VariableRef};
    ///
    /// let cmd = SetVarsRequest::new(VariableRef::new(VariableKind::VM, 10), 7);
    /// assert_eq!(cmd.to_body(), "SETVARS:v0,132,0,10,1,1,7");
    /// ```
    pub fn new(variable: VariableRef, value: impl fmt::Display) -> Self {
        Self {
            variable,
            value: value.to_string(),
        }
    }

    /// Returns the variable being written.
    pub fn variable(&self) -> VariableRef {
        self.variable
    }

    /// Returns the rendered value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Renders the request body.
    pub fn to_body(&self) -> String {
        format!(
            "SETVARS:v0,{},0,{},1,1,{}",
            self.variable.type_code(),
            self.variable.address,
            self.value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::VariableKind;

    #[test]
    fn test_challenge_body_uses_full_u32_range() {
        let cmd = ChallengeRequest::new(u32::MAX, 0, 4_000_000_000, 17);
        assert_eq!(
            cmd.to_body(),
            "UAMCHAL:3,4,4294967295,0,4000000000,17"
        );
    }

    #[test]
    fn test_login_body() {
        let cmd = LoginRequest::new(3_000_000_000, 42);
        assert_eq!(cmd.to_body(), "UAMLOGIN:Web User,3000000000,42");
    }

    #[test]
    fn test_login_debug_hides_pw_token() {
        let cmd = LoginRequest::new(123456, 42);
        let debug_str = format!("{:?}", cmd);
        assert!(!debug_str.contains("123456"));
        assert!(debug_str.contains("42"));
    }

    #[test]
    fn test_get_vars_body() {
        let cmd = GetVarsRequest::new(VariableRef::new(VariableKind::NetAI, 12));
        assert_eq!(cmd.to_body(), "GETVARS:v1,21,0,12,1,1");
    }

    #[test]
    fn test_leading_zero_address_sent_as_decimal() {
        let var = VariableRef::parse("VM007").unwrap();
        assert_eq!(GetVarsRequest::new(var).to_body(), "GETVARS:v1,132,0,7,1,1");
        assert_eq!(SetVarsRequest::new(var, 1).to_body(), "SETVARS:v0,132,0,7,1,1,1");
    }

    #[test]
    fn test_set_vars_body() {
        let cmd = SetVarsRequest::new(VariableRef::new(VariableKind::Q, 1), "1");
        assert_eq!(cmd.to_body(), "SETVARS:v0,130,0,1,1,1,1");
        assert_eq!(cmd.value(), "1");
    }

    #[test]
    fn test_get_and_set_share_addressing() {
        let var = VariableRef::parse("VM10").unwrap();
        let get = GetVarsRequest::new(var).to_body();
        let set = SetVarsRequest::new(var, 7).to_body();
        assert_eq!(get["GETVARS:v1,".len()..], set["SETVARS:v0,".len()..set.len() - 2]);
    }
}
