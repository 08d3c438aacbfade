//! DNS resource records.

use crate::error::{Error, Result};
use crate::name::{Name, NameParser};
use crate::rdata::RData;
use crate::rtype::{RecordType, Type};
use std::fmt;

/// A DNS resource record.
///
/// The class field is parsed past and discarded (this resolver only speaks
/// IN). Equality and hashing cover the full (name, type, TTL, data) tuple,
/// which is the identity used for duplicate elimination.
///
/// # Wire Format
///
/// ```text
/// NAME (label sequence, pointer-compressible) | TYPE(16) | CLASS(16)
///   | TTL(32) | RDLENGTH(16) | RDATA(RDLENGTH bytes)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRecord {
    /// The owner name this record is for.
    name: Name,
    /// The record type.
    rtype: Type,
    /// Time to live in seconds. Advisory here; expiry is not enforced.
    ttl: u32,
    /// The record data.
    rdata: RData,
}

impl ResourceRecord {
    /// Creates a new resource record.
    pub fn new(name: Name, rtype: Type, ttl: u32, rdata: RData) -> Self {
        Self {
            name,
            rtype,
            ttl,
            rdata,
        }
    }

    /// Creates an A record.
    pub fn a(name: Name, ttl: u32, addr: std::net::Ipv4Addr) -> Self {
        Self::new(name, Type::Known(RecordType::A), ttl, RData::A(addr))
    }

    /// Creates an AAAA record.
    pub fn aaaa(name: Name, ttl: u32, addr: std::net::Ipv6Addr) -> Self {
        Self::new(name, Type::Known(RecordType::AAAA), ttl, RData::AAAA(addr))
    }

    /// Creates an NS record.
    pub fn ns(name: Name, ttl: u32, nsdname: Name) -> Self {
        Self::new(name, Type::Known(RecordType::NS), ttl, RData::NS(nsdname))
    }

    /// Creates a CNAME record.
    pub fn cname(name: Name, ttl: u32, target: Name) -> Self {
        Self::new(
            name,
            Type::Known(RecordType::CNAME),
            ttl,
            RData::CNAME(target),
        )
    }

    /// Creates an MX record.
    pub fn mx(name: Name, ttl: u32, preference: u16, exchange: Name) -> Self {
        Self::new(
            name,
            Type::Known(RecordType::MX),
            ttl,
            RData::MX {
                preference,
                exchange,
            },
        )
    }

    /// Returns the owner name.
    #[inline]
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Returns the record type.
    #[inline]
    pub fn rtype(&self) -> Type {
        self.rtype
    }

    /// Returns the record type if known.
    #[inline]
    pub fn record_type(&self) -> Option<RecordType> {
        self.rtype.as_known()
    }

    /// Returns the TTL in seconds.
    #[inline]
    pub const fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Returns the record data.
    #[inline]
    pub fn rdata(&self) -> &RData {
        &self.rdata
    }

    /// Returns true if this is an address record (A or AAAA).
    #[inline]
    pub fn is_address(&self) -> bool {
        self.rtype.is_address()
    }

    /// Parses a resource record from wire format.
    ///
    /// Returns the record and the number of bytes consumed from `offset`.
    pub fn parse(message: &[u8], offset: usize) -> Result<(Self, usize)> {
        let parser = NameParser::new(message);
        let (name, name_len) = parser.parse_name(offset)?;

        let fixed = offset + name_len;
        if fixed + 10 > message.len() {
            return Err(Error::buffer_too_short(fixed + 10, message.len()));
        }

        let rtype = Type::from_u16(u16::from_be_bytes([message[fixed], message[fixed + 1]]));
        // class: bytes fixed+2..fixed+4, ignored
        let ttl = u32::from_be_bytes([
            message[fixed + 4],
            message[fixed + 5],
            message[fixed + 6],
            message[fixed + 7],
        ]);
        let rdlength = u16::from_be_bytes([message[fixed + 8], message[fixed + 9]]);

        let rdata = RData::parse(rtype, message, fixed + 10, rdlength)?;

        Ok((
            Self {
                name,
                rtype,
                ttl,
                rdata,
            },
            name_len + 10 + rdlength as usize,
        ))
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\tIN\t{}\t{}",
            self.name, self.ttl, self.rtype, self.rdata
        )
    }
}

/// Sequential parser for a record section.
#[derive(Debug)]
pub struct RecordParser<'a> {
    /// The message data.
    message: &'a [u8],
    /// Current offset in the message.
    offset: usize,
    /// Number of records remaining.
    remaining: u16,
}

impl<'a> RecordParser<'a> {
    /// Creates a parser for `count` records starting at `offset`.
    #[inline]
    pub const fn new(message: &'a [u8], offset: usize, count: u16) -> Self {
        Self {
            message,
            offset,
            remaining: count,
        }
    }

    /// Returns the current offset.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Parses the next record, or `None` when the section is done.
    pub fn next(&mut self) -> Result<Option<ResourceRecord>> {
        if self.remaining == 0 {
            return Ok(None);
        }

        let (record, consumed) = ResourceRecord::parse(self.message, self.offset)?;
        self.offset += consumed;
        self.remaining -= 1;

        Ok(Some(record))
    }
}
