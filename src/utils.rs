//! Helpers for converting variable values.
//!
//! [`Client::get`](crate::Client::get) returns values exactly as the
//! controller encodes them. Digital kinds (`I`, `Q`, `M`, ...) come back as
//! `"0"`/`"1"` and analog kinds as decimal text. These functions turn that
//! text into typed values and back.
//!
//! # Example
//!
//! ```
//! use logo_web::utils::{format_bool, parse_bool, parse_int};
//!
//! assert!(parse_bool("1").unwrap());
//! assert_eq!(parse_int("-250").unwrap(), -250);
//! assert_eq!(format_bool(false), "0");
//! ```

use crate::error::{LogoError, Result};

/// Parses a digital value (`"0"` or `"1"`).
///
/// # Errors
///
/// Returns `LogoError::Protocol` for any other text.
///
/// ```
/// use logo_web::utils::parse_bool;
///
/// assert!(!parse_bool("0").unwrap());
/// assert!(parse_bool("true").is_err());
/// ```
pub fn parse_bool(value: &str) -> Result<bool> {
    match value {
        "0" => Ok(false),
        "1" => Ok(true),
        other => Err(LogoError::protocol(format!(
            "'{}' is not a digital value",
            other
        ))),
    }
}

/// Parses an analog or memory value as a signed integer.
///
/// # Errors
///
/// Returns `LogoError::Protocol` if the text is not a decimal integer.
pub fn parse_int(value: &str) -> Result<i64> {
    value
        .parse::<i64>()
        .map_err(|e| LogoError::protocol(format!("'{}' is not an integer: {}", value, e)))
}

/// Renders a digital value the way the controller expects it.
#[inline]
pub fn format_bool(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}
