//! DNS message decoding and query encoding.
//!
//! [`Message`] is the transient parse result of one response datagram:
//! header fields plus the three record sections in arrival order, and a
//! combined first-seen-ordered list with exact duplicates dropped. It is
//! discarded once the resolver has classified its contents.

use crate::error::{Error, Result};
use crate::header::{Header, HEADER_SIZE};
use crate::question::Question;
use crate::rcode::Rcode;
use crate::record::{RecordParser, ResourceRecord};
use crate::MAX_UDP_MESSAGE_SIZE;
use bytes::{Bytes, BytesMut};
use std::fmt;

/// A decoded DNS response message.
#[derive(Debug, Clone)]
pub struct Message {
    /// The message header.
    header: Header,
    /// The first question, when present.
    question: Option<Question>,
    /// The answer section.
    answers: Vec<ResourceRecord>,
    /// The authority section.
    authority: Vec<ResourceRecord>,
    /// The additional section.
    additional: Vec<ResourceRecord>,
    /// All records across the three sections, first-seen order, deduplicated.
    records: Vec<ResourceRecord>,
}

impl Message {
    /// Parses a complete DNS message from wire format.
    ///
    /// Fails with a format error on any truncation, bad pointer, or length
    /// mismatch; callers treat that the same as a transport failure.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let header = Header::parse(data)?;

        let mut offset = HEADER_SIZE;
        let mut question = None;

        for _ in 0..header.qd_count {
            let (q, consumed) = Question::parse(data, offset)?;
            offset += consumed;
            if question.is_none() {
                question = Some(q);
            }
        }

        let mut answers = Vec::with_capacity(header.an_count as usize);
        let mut authority = Vec::with_capacity(header.ns_count as usize);
        let mut additional = Vec::with_capacity(header.ar_count as usize);
        let mut records = Vec::with_capacity(header.total_record_count());

        for (count, section) in [
            (header.an_count, &mut answers),
            (header.ns_count, &mut authority),
            (header.ar_count, &mut additional),
        ] {
            let mut parser = RecordParser::new(data, offset, count);
            while let Some(record) = parser.next()? {
                if !records.contains(&record) {
                    records.push(record.clone());
                }
                section.push(record);
            }
            offset = parser.offset();
        }

        Ok(Self {
            header,
            question,
            answers,
            authority,
            additional,
            records,
        })
    }

    /// Returns the transaction id.
    #[inline]
    pub fn id(&self) -> u16 {
        self.header.id
    }

    /// Returns the message header.
    #[inline]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Returns the response code.
    #[inline]
    pub fn rcode(&self) -> Rcode {
        self.header.rcode
    }

    /// Returns the first question, if the message carried one.
    #[inline]
    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    /// Returns the answer section in arrival order.
    #[inline]
    pub fn answers(&self) -> &[ResourceRecord] {
        &self.answers
    }

    /// Returns the authority section in arrival order.
    #[inline]
    pub fn authority(&self) -> &[ResourceRecord] {
        &self.authority
    }

    /// Returns the additional section in arrival order.
    #[inline]
    pub fn additional(&self) -> &[ResourceRecord] {
        &self.additional
    }

    /// Returns every record across the three sections, first-seen order,
    /// with exact duplicates dropped.
    #[inline]
    pub fn records(&self) -> &[ResourceRecord] {
        &self.records
    }

    /// Returns true if the response is authoritative.
    #[inline]
    pub fn is_authoritative(&self) -> bool {
        self.header.is_authoritative()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, ";; {}", self.header)?;

        if let Some(q) = &self.question {
            writeln!(f, ";; QUESTION: {q}")?;
        }
        for (label, section) in [
            ("ANSWER", &self.answers),
            ("AUTHORITY", &self.authority),
            ("ADDITIONAL", &self.additional),
        ] {
            for record in section {
                writeln!(f, ";; {label}: {record}")?;
            }
        }

        Ok(())
    }
}

/// Encodes a single-question iterative query datagram.
///
/// The header carries a random transaction id, all flags clear (standard
/// query, recursion not desired), and QDCOUNT=1. Returns the id alongside
/// the bytes so the caller can correlate the eventual response.
pub fn encode_query(question: &Question) -> Result<(u16, Bytes)> {
    let id: u16 = rand::random();
    let header = Header::query(id);

    let mut buf = BytesMut::with_capacity(HEADER_SIZE + question.wire_len());
    header.write_to(&mut buf);
    question.write_to(&mut buf);

    if buf.len() > MAX_UDP_MESSAGE_SIZE {
        return Err(Error::MessageTooLarge {
            size: buf.len(),
            max_size: MAX_UDP_MESSAGE_SIZE,
        });
    }

    Ok((id, buf.freeze()))
}
