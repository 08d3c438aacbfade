//! Wire-format name parsing with compression support.
//!
//! Names inside a DNS message may end in a two-byte compression pointer
//! (top two bits set, 14-bit offset into the same message) instead of the
//! root label, and pointers may chain. Parsing follows the chain with an
//! explicit loop, a hop cap, and bounds checks against the full message,
//! so adversarial input fails with a format error instead of looping or
//! reading out of bounds.

use super::Name;
use crate::error::{Error, Result};
use crate::MAX_NAME_LENGTH;
use smallvec::SmallVec;

/// Maximum compression pointer hops followed while decoding one name.
pub const MAX_POINTER_HOPS: usize = 16;

/// Parser for domain names inside a DNS message buffer.
///
/// Holds the complete message so pointer targets can be resolved.
#[derive(Debug, Clone, Copy)]
pub struct NameParser<'a> {
    message: &'a [u8],
}

impl<'a> NameParser<'a> {
    /// Creates a parser over the complete message buffer.
    #[inline]
    pub const fn new(message: &'a [u8]) -> Self {
        Self { message }
    }

    /// Parses a domain name starting at `offset`.
    ///
    /// Returns the name and the number of bytes consumed at the starting
    /// position. Consumption stops at the first pointer: a compressed tail
    /// costs two bytes no matter how long the pointed-to suffix is.
    pub fn parse_name(&self, offset: usize) -> Result<(Name, usize)> {
        let mut wire = SmallVec::<[u8; 64]>::new();
        let mut pos = offset;
        let mut consumed = 0;
        let mut hops = 0;
        let mut jumped = false;

        loop {
            let len_byte = *self
                .message
                .get(pos)
                .ok_or(Error::UnexpectedEof { offset: pos })?;

            if len_byte & 0xC0 == 0xC0 {
                let low = *self
                    .message
                    .get(pos + 1)
                    .ok_or(Error::UnexpectedEof { offset: pos + 1 })?;
                let target = usize::from(u16::from_be_bytes([len_byte & 0x3F, low]));

                if !jumped {
                    consumed = pos - offset + 2;
                    jumped = true;
                }

                hops += 1;
                if hops > MAX_POINTER_HOPS {
                    return Err(Error::TooManyPointerHops {
                        max_hops: MAX_POINTER_HOPS,
                    });
                }
                if target >= self.message.len() {
                    return Err(Error::InvalidCompressionPointer {
                        offset: pos,
                        target,
                    });
                }

                pos = target;
                continue;
            }

            // 0x40..0xBF are reserved label types
            if len_byte >= 0x40 {
                return Err(Error::invalid_data(
                    pos,
                    format!("reserved label type 0x{len_byte:02X}"),
                ));
            }

            let len = len_byte as usize;
            if len == 0 {
                wire.push(0);
                if !jumped {
                    consumed = pos - offset + 1;
                }
                break;
            }

            if pos + 1 + len > self.message.len() {
                return Err(Error::UnexpectedEof {
                    offset: pos + 1 + len,
                });
            }
            if wire.len() + 1 + len > MAX_NAME_LENGTH {
                return Err(Error::NameTooLong {
                    length: wire.len() + 1 + len,
                });
            }

            wire.push(len_byte);
            wire.extend_from_slice(&self.message[pos + 1..pos + 1 + len]);
            pos += 1 + len;
        }

        Ok((Name::from_wire_unchecked(wire), consumed))
    }

    /// Parses a name, discarding the consumed-byte count.
    #[inline]
    pub fn parse(&self, offset: usize) -> Result<Name> {
        self.parse_name(offset).map(|(name, _)| name)
    }

    /// Skips a name at `offset` without decoding it, returning the bytes
    /// consumed. A pointer terminates the name in two bytes.
    pub fn skip_name(&self, offset: usize) -> Result<usize> {
        let mut pos = offset;

        loop {
            let len_byte = *self
                .message
                .get(pos)
                .ok_or(Error::UnexpectedEof { offset: pos })?;

            if len_byte & 0xC0 == 0xC0 {
                if pos + 1 >= self.message.len() {
                    return Err(Error::UnexpectedEof { offset: pos + 1 });
                }
                return Ok(pos - offset + 2);
            }
            if len_byte >= 0x40 {
                return Err(Error::invalid_data(
                    pos,
                    format!("reserved label type 0x{len_byte:02X}"),
                ));
            }

            let len = len_byte as usize;
            if len == 0 {
                return Ok(pos - offset + 1);
            }
            pos += 1 + len;
            if pos > self.message.len() {
                return Err(Error::UnexpectedEof { offset: pos });
            }
        }
    }
}
