//! # Siemens LOGO! Web Interface Library
//!
//! A Rust library for reading and writing Siemens LOGO! controller variables
//! through the controller's embedded web interface.
//!
//! This is a **protocol-only** library: no polling, schedulers, or
//! application-level features. Each call produces exactly 1 request and
//! 1 response. No automatic retries, caching, or re-authentication.
//!
//! ## Features
//!
//! - **Challenge/response login** - the password never leaves the client
//! - **Type-safe addressing** - variable kinds as an enum with fixed wire codes
//! - **No panics** - all errors returned as `Result<T, LogoError>`
//! - **Pluggable transport** - blocking HTTP by default, any [`Transport`] works
//!
//! ## Quick Start
//!
//! ```no_run
//! use logo_web::{Client, ClientConfig};
//!
//! fn main() -> logo_web::Result<()> {
//!     // Log in with the default Web User password ("webuser")
//!     let client = Client::connect(ClientConfig::new("192.168.1.10"))?;
//!
//!     // Switch output Q1 on
//!     client.set("Q1", 1)?;
//!
//!     // Read variable memory byte VM0
//!     let value = client.get("VM0")?;
//!     println!("VM0 = {}", value);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Variable Kinds
//!
//! | Kind | Description | Type Code |
//! |------|-------------|:---------:|
//! | [`VariableKind::VM`] | Variable Memory | 132 |
//! | [`VariableKind::I`] | Inputs | 129 |
//! | [`VariableKind::NetI`] | Network Inputs | 16 |
//! | [`VariableKind::Q`] | Outputs | 130 |
//! | [`VariableKind::NetQ`] | Network Outputs | 17 |
//! | [`VariableKind::M`] | Memory | 131 |
//! | [`VariableKind::AI`] | Analog Inputs | 18 |
//! | [`VariableKind::NetAI`] | Network Analog Inputs | 21 |
//! | [`VariableKind::AQ`] | Analog Outputs | 19 |
//! | [`VariableKind::NetAQ`] | Network Analog Outputs | 22 |
//! | [`VariableKind::AM`] | Analog Memory | 20 |
//!
//! A variable name is a kind followed by a decimal address: `"VM0"`,
//! `"Q3"`, `"NetAI12"`.
//!
//! ## Error Handling
//!
//! ```no_run
//! use logo_web::{Client, ClientConfig, LogoError};
//!
//! match Client::connect(ClientConfig::new("192.168.1.10").with_password("secret")) {
//!     Ok(client) => println!("connected: {:?}", client.session()),
//!     Err(LogoError::Authentication { stage, status }) => {
//!         println!("{} step rejected with status {}", stage, status);
//!     }
//!     Err(LogoError::Timeout) => println!("Communication timeout"),
//!     Err(e) => println!("Error: {}", e),
//! }
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: handshake steps and variable
//! access at `debug`, rejected handshakes and undecodable replies at `warn`.
//! Passwords and security tokens are never logged.

#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod auth;
mod client;
mod command;
mod error;
mod response;
mod transport;
pub mod utils;
mod variable;

#[cfg(test)]
mod testing;

// Public re-exports
pub use auth::{Authenticator, ChallengeNonces, Session, DEFAULT_PASSWORD};
pub use client::{Client, ClientConfig};
pub use command::{ChallengeRequest, GetVarsRequest, LoginRequest, SetVarsRequest, WEB_USER};
pub use error::{AuthStage, BoxError, LogoError, Result};
pub use response::{ChallengeResponse, LoginResponse, StatusLine, VarsResponse, SUCCESS_STATUS};
pub use transport::{HttpTransport, Transport, AJAX_PATH, DEFAULT_TIMEOUT, SECURITY_HINT_HEADER};
pub use variable::{VariableKind, VariableRef};
