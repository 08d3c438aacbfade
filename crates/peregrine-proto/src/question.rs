//! DNS question section.

use crate::error::{Error, Result};
use crate::name::{Name, NameParser};
use crate::rtype::{RecordType, Type};
use bytes::BytesMut;
use std::fmt;

/// The Internet class (IN). The only class this resolver speaks.
pub const CLASS_IN: u16 = 1;

/// A DNS question: the name and record type being asked about.
///
/// This doubles as the resolver's query key: it identifies a resolution
/// target and keys the record cache. It is a plain value, cloned freely and
/// never mutated after construction. The class is fixed to IN and not
/// carried.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Question {
    /// The domain name being queried.
    pub qname: Name,

    /// The record type being requested.
    pub qtype: Type,
}

impl Question {
    /// Creates a new question for a known record type.
    #[inline]
    pub fn new(qname: Name, qtype: RecordType) -> Self {
        Self {
            qname,
            qtype: Type::Known(qtype),
        }
    }

    /// Creates a new question with a generic type value.
    #[inline]
    pub fn new_generic(qname: Name, qtype: Type) -> Self {
        Self { qname, qtype }
    }

    /// Parses a question from wire format.
    ///
    /// Returns the question and the number of bytes consumed. The class
    /// field is validated for presence and otherwise ignored.
    pub fn parse(data: &[u8], offset: usize) -> Result<(Self, usize)> {
        let parser = NameParser::new(data);
        let (qname, name_len) = parser.parse_name(offset)?;

        let fixed = offset + name_len;
        if fixed + 4 > data.len() {
            return Err(Error::buffer_too_short(fixed + 4, data.len()));
        }

        let qtype = Type::from_u16(u16::from_be_bytes([data[fixed], data[fixed + 1]]));

        Ok((Self { qname, qtype }, name_len + 4))
    }

    /// Returns the wire-format length of this question.
    #[inline]
    pub fn wire_len(&self) -> usize {
        self.qname.wire_len() + 4
    }

    /// Appends the question to a buffer: QNAME, QTYPE, QCLASS=IN.
    pub fn write_to(&self, buf: &mut BytesMut) {
        self.qname.write_wire(buf);
        buf.extend_from_slice(&self.qtype.to_u16().to_be_bytes());
        buf.extend_from_slice(&CLASS_IN.to_be_bytes());
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} IN {}", self.qname, self.qtype)
    }
}
