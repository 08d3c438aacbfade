//! DNS domain name representation.
//!
//! A domain name is stored as its uncompressed wire form: a sequence of
//! length-prefixed labels terminated by the zero-length root label. Names
//! compare and hash case-insensitively per RFC 1035.

mod parse;

pub use parse::{NameParser, MAX_POINTER_HOPS};

use crate::error::{Error, Result};
use crate::{MAX_LABEL_LENGTH, MAX_NAME_LENGTH};
use bytes::BytesMut;
use compact_str::CompactString;
use smallvec::SmallVec;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A DNS domain name.
///
/// # Wire Format
///
/// Each label is prefixed by its length in one byte, and the sequence ends
/// with a zero-length label (the root). `www.example.com.` is encoded as:
///
/// ```text
/// 03 'w' 'w' 'w' 07 'e' 'x' 'a' 'm' 'p' 'l' 'e' 03 'c' 'o' 'm' 00
/// ```
///
/// Compression pointers never appear in a stored `Name`; they are resolved
/// during parsing by [`NameParser`].
///
/// # Comparison
///
/// Equality, hashing, and label comparison are ASCII case-insensitive, so
/// `WWW.EXAMPLE.COM.` and `www.example.com.` are the same name.
#[derive(Clone)]
pub struct Name {
    /// Uncompressed wire form, always terminated by the root label.
    wire: SmallVec<[u8; 64]>,
}

impl Name {
    /// Creates the root domain name.
    pub fn root() -> Self {
        let mut wire = SmallVec::new();
        wire.push(0);
        Self { wire }
    }

    /// Builds a name from pre-validated wire bytes.
    ///
    /// The caller must guarantee a valid label sequence ending with the
    /// root label; the parser and `FromStr` are the only producers.
    pub(crate) fn from_wire_unchecked(wire: SmallVec<[u8; 64]>) -> Self {
        debug_assert!(wire.last() == Some(&0));
        Self { wire }
    }

    /// Returns the uncompressed wire form, including the root label.
    #[inline]
    pub fn as_wire(&self) -> &[u8] {
        &self.wire
    }

    /// Returns the wire-format length in bytes.
    #[inline]
    pub fn wire_len(&self) -> usize {
        self.wire.len()
    }

    /// Returns true if this is the root domain.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.wire.len() == 1
    }

    /// Returns an iterator over the labels, leftmost first.
    ///
    /// The terminating root label is not yielded.
    #[inline]
    pub fn labels(&self) -> LabelIter<'_> {
        LabelIter {
            wire: &self.wire,
            pos: 0,
        }
    }

    /// Returns the number of labels, excluding the root.
    pub fn label_count(&self) -> usize {
        self.labels().count()
    }

    /// Returns a lowercased copy of the name.
    ///
    /// Length bytes are below the ASCII letter range, so lowercasing the
    /// whole wire form only touches label characters.
    #[must_use]
    pub fn lowercased(&self) -> Self {
        let wire = self.wire.iter().map(u8::to_ascii_lowercase).collect();
        Self { wire }
    }

    /// Appends the wire form to a buffer.
    pub fn write_wire(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.wire);
    }

    /// Returns the dotted string form, with a trailing dot.
    pub fn to_utf8(&self) -> CompactString {
        let mut out = CompactString::const_new("");
        for label in self.labels() {
            for &b in label {
                out.push(char::from(b));
            }
            out.push('.');
        }
        if out.is_empty() {
            out.push('.');
        }
        out
    }
}

impl FromStr for Name {
    type Err = Error;

    /// Parses a dotted domain name; a missing trailing dot is implied.
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || s == "." {
            return Ok(Self::root());
        }

        let s = s.strip_suffix('.').unwrap_or(s);
        let mut wire = SmallVec::<[u8; 64]>::new();

        for part in s.split('.') {
            if part.is_empty() {
                return Err(Error::invalid_data(0, "empty label"));
            }
            if part.len() > MAX_LABEL_LENGTH {
                return Err(Error::LabelTooLong { length: part.len() });
            }
            for (i, c) in part.chars().enumerate() {
                if !c.is_ascii_alphanumeric() && c != '-' && c != '_' && c != '*' {
                    return Err(Error::InvalidLabelChar {
                        character: c,
                        position: i,
                    });
                }
            }
            wire.push(part.len() as u8);
            wire.extend_from_slice(part.as_bytes());
        }

        wire.push(0);
        if wire.len() > MAX_NAME_LENGTH {
            return Err(Error::NameTooLong { length: wire.len() });
        }

        Ok(Self { wire })
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_utf8())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name(\"{self}\")")
    }
}

impl PartialEq for Name {
    /// Case-insensitive comparison per DNS semantics.
    fn eq(&self, other: &Self) -> bool {
        self.wire.eq_ignore_ascii_case(&other.wire)
    }
}

impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for &b in &self.wire {
            state.write_u8(b.to_ascii_lowercase());
        }
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::root()
    }
}

/// Iterator over the labels of a [`Name`], leftmost first.
#[derive(Debug, Clone)]
pub struct LabelIter<'a> {
    wire: &'a [u8],
    pos: usize,
}

impl<'a> Iterator for LabelIter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let len = *self.wire.get(self.pos)? as usize;
        if len == 0 {
            return None;
        }
        let start = self.pos + 1;
        self.pos = start + len;
        self.wire.get(start..start + len)
    }
}
