//! DNS record data (RDATA).
//!
//! Addresses are decoded from fixed-size RDATA; name-valued types go
//! through the name codec so compressed targets resolve against the full
//! message. Types outside the modeled set fall back to a best-effort name
//! decode (see [`RData::Other`]).

use crate::error::{Error, Result};
use crate::name::{Name, NameParser};
use crate::rtype::{RecordType, Type};
use data_encoding::HEXLOWER;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Decoded record data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RData {
    /// IPv4 address (A record).
    A(Ipv4Addr),

    /// IPv6 address (AAAA record).
    AAAA(Ipv6Addr),

    /// Name server (NS record).
    NS(Name),

    /// Canonical name (CNAME record).
    CNAME(Name),

    /// Start of authority (SOA record). Only the primary server name is
    /// retained; the remaining SOA fields are not modeled.
    SOA(Name),

    /// Mail exchange (MX record).
    MX {
        /// Preference value; lower is more preferred.
        preference: u16,
        /// The mail exchange domain name.
        exchange: Name,
    },

    /// Data of an unrecognized record type.
    Other(OtherData),
}

/// Best-effort payload for unrecognized record types.
///
/// The RDATA is decoded as a domain name only when a name parse consumes
/// exactly RDLENGTH; anything else stays opaque. This mirrors how the
/// resolver treats unknown types as loosely name-shaped text and is not a
/// guaranteed-correct decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OtherData {
    /// RDATA that structurally resembled a domain name.
    Name(Name),
    /// Raw RDATA bytes.
    Opaque(Vec<u8>),
}

impl RData {
    /// Parses RDATA from wire format.
    ///
    /// `message` is the complete datagram so compressed names inside the
    /// RDATA can be resolved; `offset` and `rdlength` delimit the RDATA.
    pub fn parse(rtype: Type, message: &[u8], offset: usize, rdlength: u16) -> Result<Self> {
        let len = rdlength as usize;
        let rdata = message
            .get(offset..offset + len)
            .ok_or_else(|| Error::buffer_too_short(offset + len, message.len()))?;

        match rtype.as_known() {
            Some(RecordType::A) => {
                if rdata.len() != 4 {
                    return Err(Error::RDataLengthMismatch {
                        rtype: "A",
                        expected: 4,
                        actual: rdata.len(),
                    });
                }
                let octets: [u8; 4] = rdata.try_into().unwrap();
                Ok(Self::A(Ipv4Addr::from(octets)))
            }
            Some(RecordType::AAAA) => {
                if rdata.len() != 16 {
                    return Err(Error::RDataLengthMismatch {
                        rtype: "AAAA",
                        expected: 16,
                        actual: rdata.len(),
                    });
                }
                let octets: [u8; 16] = rdata.try_into().unwrap();
                Ok(Self::AAAA(Ipv6Addr::from(octets)))
            }
            Some(RecordType::NS) => {
                let name = NameParser::new(message).parse(offset)?;
                Ok(Self::NS(name))
            }
            Some(RecordType::CNAME) => {
                let name = NameParser::new(message).parse(offset)?;
                Ok(Self::CNAME(name))
            }
            Some(RecordType::SOA) => {
                let mname = NameParser::new(message).parse(offset)?;
                Ok(Self::SOA(mname))
            }
            Some(RecordType::MX) => {
                if rdata.len() < 2 {
                    return Err(Error::RDataLengthMismatch {
                        rtype: "MX",
                        expected: 2,
                        actual: rdata.len(),
                    });
                }
                let preference = u16::from_be_bytes([rdata[0], rdata[1]]);
                let exchange = NameParser::new(message).parse(offset + 2)?;
                Ok(Self::MX {
                    preference,
                    exchange,
                })
            }
            None => {
                let parser = NameParser::new(message);
                match parser.parse_name(offset) {
                    Ok((name, consumed)) if consumed == len => {
                        Ok(Self::Other(OtherData::Name(name)))
                    }
                    _ => Ok(Self::Other(OtherData::Opaque(rdata.to_vec()))),
                }
            }
        }
    }

    /// Returns the address if this is an A or AAAA record.
    pub fn ip_addr(&self) -> Option<IpAddr> {
        match self {
            Self::A(addr) => Some(IpAddr::V4(*addr)),
            Self::AAAA(addr) => Some(IpAddr::V6(*addr)),
            _ => None,
        }
    }

    /// Returns the target name if this is a CNAME record.
    pub fn as_cname(&self) -> Option<&Name> {
        match self {
            Self::CNAME(name) => Some(name),
            _ => None,
        }
    }

    /// Returns the name server name if this is an NS record.
    pub fn as_ns(&self) -> Option<&Name> {
        match self {
            Self::NS(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for RData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A(addr) => write!(f, "{addr}"),
            Self::AAAA(addr) => write!(f, "{addr}"),
            Self::NS(name) | Self::CNAME(name) | Self::SOA(name) => write!(f, "{name}"),
            Self::MX {
                preference,
                exchange,
            } => write!(f, "{preference} {exchange}"),
            Self::Other(OtherData::Name(name)) => write!(f, "{name}"),
            // RFC 3597 form: \# <length> <hex>
            Self::Other(OtherData::Opaque(data)) => {
                write!(f, "\\# {} {}", data.len(), HEXLOWER.encode(data))
            }
        }
    }
}
