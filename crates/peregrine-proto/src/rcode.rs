//! DNS response codes (RCODEs).

use num_enum::{FromPrimitive, IntoPrimitive};
use std::fmt;

/// DNS response code from the 4-bit RCODE header field (RFC 1035).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, FromPrimitive)]
#[repr(u8)]
pub enum Rcode {
    /// No error condition.
    NoError = 0,

    /// The server was unable to interpret the query.
    FormErr = 1,

    /// The server was unable to process the query.
    ServFail = 2,

    /// The queried domain name does not exist.
    NXDomain = 3,

    /// The server does not support the requested kind of query.
    NotImp = 4,

    /// The server refuses to perform the operation.
    Refused = 5,

    /// Any other 4-bit value.
    #[num_enum(catch_all)]
    Other(u8),
}

impl Rcode {
    /// Creates a response code from the header nibble.
    #[inline]
    pub fn from_u8(value: u8) -> Self {
        Self::from(value & 0x0F)
    }

    /// Returns the numeric value.
    #[inline]
    pub fn to_u8(self) -> u8 {
        self.into()
    }

    /// Returns true if this indicates a successful response.
    #[inline]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::NoError)
    }

    /// Returns the conventional mnemonic.
    pub const fn name(self) -> &'static str {
        match self {
            Self::NoError => "NOERROR",
            Self::FormErr => "FORMERR",
            Self::ServFail => "SERVFAIL",
            Self::NXDomain => "NXDOMAIN",
            Self::NotImp => "NOTIMP",
            Self::Refused => "REFUSED",
            Self::Other(_) => "RCODE",
        }
    }
}

impl fmt::Display for Rcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Other(v) => write!(f, "RCODE{v}"),
            other => write!(f, "{}", other.name()),
        }
    }
}

impl Default for Rcode {
    fn default() -> Self {
        Self::NoError
    }
}
