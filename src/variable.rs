//! Variable kinds and addressing for the LOGO! web protocol.
//!
//! This module defines the [`VariableKind`] enum, the closed set of memory and
//! I/O regions the web interface exposes, and [`VariableRef`], a kind paired
//! with an address inside that region.
//!
//! # Variable Kinds Overview
//!
//! | Kind | Description | Type Code |
//! |------|-------------|:---------:|
//! | VM | Variable Memory | 132 |
//! | I | Inputs | 129 |
//! | NetI | Network Inputs | 16 |
//! | Q | Outputs | 130 |
//! | NetQ | Network Outputs | 17 |
//! | M | Memory (flags) | 131 |
//! | AI | Analog Inputs | 18 |
//! | NetAI | Network Analog Inputs | 21 |
//! | AQ | Analog Outputs | 19 |
//! | NetAQ | Network Analog Outputs | 22 |
//! | AM | Analog Memory | 20 |
//!
//! # Example
//!
//! ```
//! use logo_web::{VariableKind, VariableRef};
//!
//! let var: VariableRef = "NetAI12".parse().unwrap();
//! assert_eq!(var.kind, VariableKind::NetAI);
//! assert_eq!(var.address, 12);
//! assert_eq!(var.kind.type_code(), 21);
//! assert_eq!(var.to_string(), "NetAI12");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{LogoError, Result};

/// Memory and I/O regions of a LOGO! controller.
///
/// The numeric type code of each kind is part of the wire protocol and
/// never varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VariableKind {
    /// Variable memory.
    VM,
    /// Digital inputs.
    I,
    /// Network digital inputs.
    NetI,
    /// Digital outputs.
    Q,
    /// Network digital outputs.
    NetQ,
    /// Memory flags.
    M,
    /// Analog inputs.
    AI,
    /// Network analog inputs.
    NetAI,
    /// Analog outputs.
    AQ,
    /// Network analog outputs.
    NetAQ,
    /// Analog memory.
    AM,
}

impl VariableKind {
    /// Every supported kind, in protocol table order.
    pub const ALL: [VariableKind; 11] = [
        VariableKind::VM,
        VariableKind::I,
        VariableKind::NetI,
        VariableKind::Q,
        VariableKind::NetQ,
        VariableKind::M,
        VariableKind::AI,
        VariableKind::NetAI,
        VariableKind::AQ,
        VariableKind::NetAQ,
        VariableKind::AM,
    ];

    /// Returns the numeric type code used on the wire for this kind.
    ///
    /// # Example
    ///
    /// ```
    /// use logo_web::VariableKind;
    ///
    /// assert_eq!(VariableKind::VM.type_code(), 132);
    /// assert_eq!(VariableKind::Q.type_code(), 130);
    /// ```
    pub const fn type_code(self) -> u8 {
        match self {
            VariableKind::VM => 132,
            VariableKind::I => 129,
            VariableKind::NetI => 16,
            VariableKind::Q => 130,
            VariableKind::NetQ => 17,
            VariableKind::M => 131,
            VariableKind::AI => 18,
            VariableKind::NetAI => 21,
            VariableKind::AQ => 19,
            VariableKind::NetAQ => 22,
            VariableKind::AM => 20,
        }
    }

    /// Looks a kind up by its wire type code.
    pub fn from_type_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_code() == code)
    }

    /// Returns the symbolic name used in variable names (`"NetAI"`, `"VM"`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            VariableKind::VM => "VM",
            VariableKind::I => "I",
            VariableKind::NetI => "NetI",
            VariableKind::Q => "Q",
            VariableKind::NetQ => "NetQ",
            VariableKind::M => "M",
            VariableKind::AI => "AI",
            VariableKind::NetAI => "NetAI",
            VariableKind::AQ => "AQ",
            VariableKind::NetAQ => "NetAQ",
            VariableKind::AM => "AM",
        }
    }

    /// Returns a human readable description of the region.
    pub const fn description(self) -> &'static str {
        match self {
            VariableKind::VM => "Variable Memory",
            VariableKind::I => "Inputs",
            VariableKind::NetI => "Network Inputs",
            VariableKind::Q => "Outputs",
            VariableKind::NetQ => "Network Outputs",
            VariableKind::M => "Memory",
            VariableKind::AI => "Analog Inputs",
            VariableKind::NetAI => "Network Analog Inputs",
            VariableKind::AQ => "Analog Outputs",
            VariableKind::NetAQ => "Network Analog Outputs",
            VariableKind::AM => "Analog Memory",
        }
    }

    /// Returns whether values of this kind are analog words rather than bits.
    ///
    /// ```
    /// use logo_web::VariableKind;
    ///
    /// assert!(VariableKind::NetAQ.is_analog());
    /// assert!(!VariableKind::Q.is_analog());
    /// ```
    pub fn is_analog(self) -> bool {
        matches!(
            self,
            VariableKind::AI
                | VariableKind::NetAI
                | VariableKind::AQ
                | VariableKind::NetAQ
                | VariableKind::AM
        )
    }

    /// Returns whether this kind lives in the network I/O image.
    pub fn is_network(self) -> bool {
        matches!(
            self,
            VariableKind::NetI
                | VariableKind::NetQ
                | VariableKind::NetAI
                | VariableKind::NetAQ
        )
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VariableKind {
    type Err = LogoError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| LogoError::variable(s, "unsupported variable kind"))
    }
}

/// A variable on the controller: a kind plus an address within it.
///
/// # Example
///
/// ```
/// use logo_web::{VariableKind, VariableRef};
///
/// let var = VariableRef::new(VariableKind::VM, 10);
/// assert_eq!(var.to_string(), "VM10");
/// assert_eq!("VM10".parse::<VariableRef>().unwrap(), var);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableRef {
    /// Region the variable lives in.
    pub kind: VariableKind,
    /// Index within the region.
    pub address: u32,
}

impl VariableRef {
    /// Creates a new variable reference.
    pub fn new(kind: VariableKind, address: u32) -> Self {
        Self { kind, address }
    }

    /// Parses a symbolic name such as `"VM0"` or `"NetAI12"`.
    ///
    /// The name is split at its first digit: everything before it is the
    /// kind, everything from it onward is the address.
    ///
    /// # Errors
    ///
    /// Returns `LogoError::Variable` if the name has no digit, the kind is
    /// not supported, or the address is not a plain decimal number.
    ///
    /// # Example
    ///
    /// ```
    /// use logo_web::{VariableKind, VariableRef};
    ///
    /// let var = VariableRef::parse("Q3").unwrap();
    /// assert_eq!(var, VariableRef::new(VariableKind::Q, 3));
    ///
    /// assert!(VariableRef::parse("Q").is_err());
    /// assert!(VariableRef::parse("XX5").is_err());
    /// ```
    pub fn parse(name: &str) -> Result<Self> {
        let split = name
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| LogoError::variable(name, "missing address digits"))?;
        let (kind_token, address_token) = name.split_at(split);

        let kind = kind_token.parse::<VariableKind>()?;

        if !address_token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(LogoError::variable(
                address_token,
                "address must be a decimal number",
            ));
        }
        let address = address_token
            .parse::<u32>()
            .map_err(|e| LogoError::variable(address_token, e.to_string()))?;

        Ok(Self { kind, address })
    }

    /// Returns the wire type code of this variable's kind.
    pub fn type_code(&self) -> u8 {
        self.kind.type_code()
    }
}

impl fmt::Display for VariableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind, self.address)
    }
}

impl FromStr for VariableRef {
    type Err = LogoError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_codes() {
        assert_eq!(VariableKind::VM.type_code(), 132);
        assert_eq!(VariableKind::I.type_code(), 129);
        assert_eq!(VariableKind::NetI.type_code(), 16);
        assert_eq!(VariableKind::Q.type_code(), 130);
        assert_eq!(VariableKind::NetQ.type_code(), 17);
        assert_eq!(VariableKind::M.type_code(), 131);
        assert_eq!(VariableKind::AI.type_code(), 18);
        assert_eq!(VariableKind::NetAI.type_code(), 21);
        assert_eq!(VariableKind::AQ.type_code(), 19);
        assert_eq!(VariableKind::NetAQ.type_code(), 22);
        assert_eq!(VariableKind::AM.type_code(), 20);
    }

    #[test]
    fn test_from_type_code() {
        for kind in VariableKind::ALL {
            assert_eq!(VariableKind::from_type_code(kind.type_code()), Some(kind));
        }
        assert_eq!(VariableKind::from_type_code(0), None);
    }

    #[test]
    fn test_kind_names_parse_back() {
        for kind in VariableKind::ALL {
            assert_eq!(kind.name().parse::<VariableKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_kind_name_is_case_sensitive() {
        assert!("vm".parse::<VariableKind>().is_err());
        assert!("NETAI".parse::<VariableKind>().is_err());
    }

    #[test]
    fn test_parse_simple() {
        let var = VariableRef::parse("VM0").unwrap();
        assert_eq!(var.kind, VariableKind::VM);
        assert_eq!(var.address, 0);
    }

    #[test]
    fn test_parse_multi_digit_address() {
        let var = VariableRef::parse("NetAI12").unwrap();
        assert_eq!(var.kind, VariableKind::NetAI);
        assert_eq!(var.address, 12);
    }

    #[test]
    fn test_parse_single_letter_kinds() {
        assert_eq!(
            VariableRef::parse("I1").unwrap(),
            VariableRef::new(VariableKind::I, 1)
        );
        assert_eq!(
            VariableRef::parse("M27").unwrap(),
            VariableRef::new(VariableKind::M, 27)
        );
    }

    #[test]
    fn test_parse_no_digit() {
        match VariableRef::parse("Q") {
            Err(LogoError::Variable { token, .. }) => assert_eq!(token, "Q"),
            other => panic!("expected variable error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_unknown_kind() {
        match VariableRef::parse("XX5") {
            Err(LogoError::Variable { token, .. }) => assert_eq!(token, "XX"),
            other => panic!("expected variable error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty_kind() {
        match VariableRef::parse("12") {
            Err(LogoError::Variable { token, .. }) => assert_eq!(token, ""),
            other => panic!("expected variable error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_trailing_garbage() {
        match VariableRef::parse("VM1a") {
            Err(LogoError::Variable { token, .. }) => assert_eq!(token, "1a"),
            other => panic!("expected variable error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_address_overflow() {
        assert!(VariableRef::parse("VM99999999999").is_err());
    }

    #[test]
    fn test_parse_leading_zeros_normalized() {
        let var = VariableRef::parse("VM007").unwrap();
        assert_eq!(var, VariableRef::new(VariableKind::VM, 7));
        assert_eq!(var.to_string(), "VM7");
    }

    #[test]
    fn test_display() {
        assert_eq!(VariableKind::NetAQ.to_string(), "NetAQ");
        assert_eq!(VariableRef::new(VariableKind::AM, 4).to_string(), "AM4");
    }

    #[test]
    fn test_analog_and_network_flags() {
        assert!(VariableKind::AM.is_analog());
        assert!(!VariableKind::VM.is_analog());
        assert!(VariableKind::NetI.is_network());
        assert!(!VariableKind::I.is_network());
    }
}
