//! # Peregrine DNS Protocol Library
//!
//! Wire-format types and codecs for the subset of DNS that an iterative
//! stub resolver needs: domain names with compression-pointer resolution,
//! the fixed message header, single-question queries, and resource records
//! across the answer, authority, and additional sections.
//!
//! Parsing never panics on malformed input: every out-of-bounds read, bad
//! compression pointer, or length violation surfaces as an [`Error`] that
//! callers can downgrade to an empty round.
//!
//! ## Example
//!
//! ```rust,ignore
//! use peregrine_proto::{Message, Name, Question, RecordType};
//! use std::str::FromStr;
//!
//! let question = Question::new(Name::from_str("example.com.")?, RecordType::A);
//! let (id, wire) = peregrine_proto::encode_query(&question)?;
//!
//! // ... exchange `wire` over UDP ...
//! let response = Message::parse(&reply_bytes)?;
//! assert_eq!(response.id(), id);
//! ```

pub mod error;
pub mod header;
pub mod message;
pub mod name;
pub mod question;
pub mod rcode;
pub mod rdata;
pub mod record;
pub mod rtype;

pub use error::{Error, Result};
pub use header::{Header, HeaderFlags};
pub use message::{encode_query, Message};
pub use name::{Name, NameParser};
pub use question::Question;
pub use rcode::Rcode;
pub use rdata::{OtherData, RData};
pub use record::ResourceRecord;
pub use rtype::{RecordType, Type};

/// Maximum length of a DNS label (63 bytes per RFC 1035).
pub const MAX_LABEL_LENGTH: usize = 63;

/// Maximum length of a domain name in wire format (255 bytes per RFC 1035).
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum size of a UDP DNS message without EDNS0 (512 bytes per RFC 1035).
pub const MAX_UDP_MESSAGE_SIZE: usize = 512;

/// DNS port (53).
pub const DNS_PORT: u16 = 53;
