//! Challenge/response login for the LOGO! web interface.
//!
//! The password never travels in the clear. The handshake takes two round
//! trips:
//!
//! 1. The client sends four random nonces (`UAMCHAL`) with the hint `p` and
//!    receives a security hint plus a server challenge.
//! 2. The client derives a password token from the password and the
//!    challenge, checksums it with CRC-32 and sends the masked result
//!    (`UAMLOGIN`) under the received hint. The controller answers with the
//!    security token used for every later request.
//!
//! All arithmetic is unsigned 32-bit.
//!
//! # Example
//!
//! ```
//! use logo_web::auth::{derive_pw_token, login_pw_token, login_server_challenge};
//!
//! let token = derive_pw_token("webuser", 4242);
//! assert_eq!(token, "webuser+4242");
//!
//! // XOR of all nonces with the server challenge
//! assert_eq!(login_server_challenge([1, 2, 4, 8], 16), 31);
//!
//! // CRC-32 of the token masked with the challenge
//! let masked = login_pw_token("webuser", 4242);
//! assert_eq!(masked ^ 4242, crc32fast::hash(token.as_bytes()));
//! ```

use std::fmt;

use log::{debug, warn};
use rand::{Rng, RngCore};

use crate::command::{ChallengeRequest, LoginRequest};
use crate::error::Result;
use crate::response::{ChallengeResponse, LoginResponse};
use crate::transport::Transport;

/// Password of the LOGO! `Web User` account when none is configured.
pub const DEFAULT_PASSWORD: &str = "webuser";

/// Hint value marking the initial challenge request.
pub const CHALLENGE_HINT: &str = "p";

/// Maximum length in bytes of the password token.
pub const MAX_PW_TOKEN_LEN: usize = 32;

/// The four client nonces of one handshake attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChallengeNonces {
    /// First nonce.
    pub a1: u32,
    /// Second nonce.
    pub a2: u32,
    /// Third nonce.
    pub b1: u32,
    /// Fourth nonce.
    pub b2: u32,
}

impl ChallengeNonces {
    /// Draws four independent nonces from `rng`.
    pub fn generate<R: RngCore>(rng: &mut R) -> Self {
        Self {
            a1: rng.gen(),
            a2: rng.gen(),
            b1: rng.gen(),
            b2: rng.gen(),
        }
    }

    /// Returns the nonces in wire order.
    pub fn to_array(self) -> [u32; 4] {
        [self.a1, self.a2, self.b1, self.b2]
    }

    /// Builds the challenge request carrying these nonces.
    pub fn to_request(self) -> ChallengeRequest {
        ChallengeRequest::new(self.a1, self.a2, self.b1, self.b2)
    }
}

/// Builds the password token `"{password}+{challenge}"`, cut to 32 bytes.
///
/// If the cut lands inside a multi-byte character the incomplete tail is
/// dropped, so the result is always valid UTF-8 of at most 32 bytes.
///
/// ```
/// use logo_web::auth::derive_pw_token;
///
/// let long = "a".repeat(40);
/// assert_eq!(derive_pw_token(&long, 1).len(), 32);
///
/// // 'é' is two bytes; the 32nd byte would split it
/// let pw = format!("{}é", "a".repeat(31));
/// assert_eq!(derive_pw_token(&pw, 1), "a".repeat(31));
/// ```
pub fn derive_pw_token(password: &str, server_challenge: u32) -> String {
    let full = format!("{}+{}", password, server_challenge);
    let bytes = &full.as_bytes()[..full.len().min(MAX_PW_TOKEN_LEN)];

    match std::str::from_utf8(bytes) {
        Ok(token) => token.to_owned(),
        Err(e) => String::from_utf8_lossy(&bytes[..e.valid_up_to()]).into_owned(),
    }
}

/// CRC-32 (IEEE) of the UTF-8 bytes of a password token.
///
/// ```
/// use logo_web::auth::pw_token_checksum;
///
/// assert_eq!(pw_token_checksum(""), 0);
/// assert_eq!(pw_token_checksum("123456789"), 0xCBF4_3926);
/// ```
pub fn pw_token_checksum(pw_token: &str) -> u32 {
    crc32fast::hash(pw_token.as_bytes())
}

/// Computes the masked password token sent in the login request.
pub fn login_pw_token(password: &str, server_challenge: u32) -> u32 {
    pw_token_checksum(&derive_pw_token(password, server_challenge)) ^ server_challenge
}

/// XORs the four client nonces with the server challenge.
pub fn login_server_challenge(nonces: [u32; 4], server_challenge: u32) -> u32 {
    nonces.iter().fold(server_challenge, |acc, nonce| acc ^ nonce)
}

/// An authenticated session with a controller.
///
/// Created once per successful handshake and never refreshed. Once the
/// controller drops the session, requests using it simply fail.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    endpoint: String,
    security_token: String,
}

impl Session {
    /// Creates a session from a previously issued token.
    pub fn new(endpoint: impl Into<String>, security_token: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            security_token: security_token.into(),
        }
    }

    /// Returns the control-plane URL the session belongs to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the token to send in the `Security-Hint` header.
    pub fn security_token(&self) -> &str {
        &self.security_token
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("endpoint", &self.endpoint)
            .field("security_token", &"[REDACTED]")
            .finish()
    }
}

/// Runs the login handshake against a controller.
///
/// # Example
///
/// ```no_run
/// use logo_web::{Authenticator, HttpTransport};
///
/// let transport = HttpTransport::with_default_timeout("http://192.168.1.10/AJAX")?;
/// let session = Authenticator::new(&transport, "webuser").authenticate()?;
/// println!("logged in to {}", session.endpoint());
/// # Ok::<(), logo_web::LogoError>(())
/// ```
pub struct Authenticator<'a, T: Transport> {
    transport: T,
    password: &'a str,
}

impl<'a, T: Transport> Authenticator<'a, T> {
    /// Creates an authenticator for `password` over `transport`.
    pub fn new(transport: T, password: &'a str) -> Self {
        Self {
            transport,
            password,
        }
    }

    /// Runs the handshake with nonces from the thread-local RNG.
    ///
    /// # Errors
    ///
    /// Returns `LogoError::Authentication` if either step is rejected, or a
    /// transport error if a request fails. Nothing is retried.
    pub fn authenticate(&self) -> Result<Session> {
        self.authenticate_with_rng(&mut rand::thread_rng())
    }

    /// Runs the handshake drawing nonces from `rng`.
    ///
    /// # Errors
    ///
    /// Same as [`authenticate`](Self::authenticate).
    pub fn authenticate_with_rng<R: RngCore>(&self, rng: &mut R) -> Result<Session> {
        let nonces = ChallengeNonces::generate(rng);
        let endpoint = self.transport.endpoint();

        debug!("requesting login challenge from {}", endpoint);
        let reply = self
            .transport
            .post(CHALLENGE_HINT, &nonces.to_request().to_body())?;
        let challenge = ChallengeResponse::parse(&reply).inspect_err(|e| {
            warn!("challenge rejected by {}: {}", endpoint, e);
        })?;

        let login = LoginRequest::new(
            login_pw_token(self.password, challenge.server_challenge),
            login_server_challenge(nonces.to_array(), challenge.server_challenge),
        );

        debug!("sending login to {}", endpoint);
        let reply = self
            .transport
            .post(&challenge.security_hint, &login.to_body())?;
        let login = LoginResponse::parse(&reply).inspect_err(|e| {
            warn!("login rejected by {}: {}", endpoint, e);
        })?;

        debug!("authenticated with {}", endpoint);
        Ok(Session::new(endpoint, login.security_token))
    }
}

impl<T: Transport> fmt::Debug for Authenticator<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authenticator")
            .field("endpoint", &self.transport.endpoint())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AuthStage, LogoError};
    use crate::testing::ScriptedTransport;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_crc_known_values() {
        assert_eq!(pw_token_checksum(""), 0);
        assert_eq!(pw_token_checksum("123456789"), 0xCBF4_3926);
    }

    #[test]
    fn test_pw_token_short_password() {
        assert_eq!(derive_pw_token("webuser", 4242), "webuser+4242");
    }

    #[test]
    fn test_pw_token_truncated_to_32_bytes() {
        let token = derive_pw_token("0123456789012345678901234567", 4_294_967_295);
        assert_eq!(token, "0123456789012345678901234567+429");
    }

    #[test]
    fn test_pw_token_drops_split_character() {
        // "€" is three bytes; bytes 30..33 hold it, the cut is at 32
        let pw = format!("{}€", "x".repeat(30));
        assert_eq!(derive_pw_token(&pw, 0), "x".repeat(30));
    }

    #[test]
    fn test_login_pw_token() {
        let crc = crc32fast::hash(b"webuser+4242");
        assert_eq!(login_pw_token("webuser", 4242), crc ^ 4242);
    }

    #[test]
    fn test_login_server_challenge_wraps() {
        assert_eq!(login_server_challenge([u32::MAX; 4], u32::MAX), u32::MAX);
        assert_eq!(login_server_challenge([0; 4], 7), 7);
    }

    #[test]
    fn test_handshake_success() {
        let transport = ScriptedTransport::new(["700,hintX,4242", "700,tokenY"]);
        let mut rng = StdRng::seed_from_u64(7);
        let session = Authenticator::new(&transport, "webuser")
            .authenticate_with_rng(&mut rng)
            .unwrap();

        assert_eq!(session.security_token(), "tokenY");
        assert_eq!(session.endpoint(), transport.endpoint());

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);

        let nonces = ChallengeNonces::generate(&mut StdRng::seed_from_u64(7));
        assert_eq!(requests[0].0, "p");
        assert_eq!(requests[0].1, nonces.to_request().to_body());

        let expected_login = format!(
            "UAMLOGIN:Web User,{},{}",
            crc32fast::hash(b"webuser+4242") ^ 4242,
            login_server_challenge(nonces.to_array(), 4242)
        );
        assert_eq!(requests[1].0, "hintX");
        assert_eq!(requests[1].1, expected_login);
    }

    #[test]
    fn test_handshake_challenge_rejected() {
        let transport = ScriptedTransport::new(["500,error"]);
        let result = Authenticator::new(&transport, "webuser").authenticate();

        match result {
            Err(LogoError::Authentication { stage, status }) => {
                assert_eq!(stage, AuthStage::Challenge);
                assert_eq!(status, "500");
            }
            other => panic!("expected authentication error, got {:?}", other),
        }
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn test_handshake_login_rejected() {
        let transport = ScriptedTransport::new(["700,hintX,4242", "702"]);
        let result = Authenticator::new(&transport, "wrong").authenticate();

        assert!(matches!(
            result,
            Err(LogoError::Authentication {
                stage: AuthStage::Login,
                ..
            })
        ));
        assert_eq!(transport.requests().len(), 2);
    }

    #[test]
    fn test_handshake_transport_failure() {
        let transport = ScriptedTransport::new(Vec::<&str>::new());
        assert!(matches!(
            Authenticator::new(&transport, "webuser").authenticate(),
            Err(LogoError::Transport { .. })
        ));
    }

    #[test]
    fn test_session_debug_hides_token() {
        let session = Session::new("http://logo/AJAX", "tokenY");
        let debug_str = format!("{:?}", session);
        assert!(debug_str.contains("http://logo/AJAX"));
        assert!(!debug_str.contains("tokenY"));
    }

    proptest! {
        #[test]
        fn prop_login_server_challenge_order_independent(
            values in proptest::array::uniform5(any::<u32>()),
            rotation in 0usize..5,
        ) {
            let mut permuted = values;
            permuted.rotate_left(rotation);
            permuted.swap(0, 4);

            let a = login_server_challenge([values[0], values[1], values[2], values[3]], values[4]);
            let b = login_server_challenge(
                [permuted[0], permuted[1], permuted[2], permuted[3]],
                permuted[4],
            );
            prop_assert_eq!(a, b);
            prop_assert_eq!(a, values.iter().fold(0u32, |acc, v| acc ^ v));
        }

        #[test]
        fn prop_pw_token_bounded_and_prefix(password in "\\PC{0,40}", challenge in any::<u32>()) {
            let token = derive_pw_token(&password, challenge);
            let full = format!("{}+{}", password, challenge);

            prop_assert!(token.len() <= MAX_PW_TOKEN_LEN);
            prop_assert!(full.starts_with(&token));
            // only an incomplete trailing character may be dropped
            prop_assert!(full.len().min(MAX_PW_TOKEN_LEN) - token.len() < 4);
        }
    }
}
