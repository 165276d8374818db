// Licensed under the Apache-2.0 license

//! Command header plus body record list.
//!
//! `CmdFrame` owns a command's header and its repeating body records. It is
//! the only place that touches the header length field, so the length always
//! equals `HEADER_SIZE + prefix_len + len() * T::SIZE`.

use crate::error::{HabError, HabResult};
use crate::protocol::{CmdHeader, CmdTag, HEADER_SIZE};
use alloc::vec::Vec;
use zerocopy::{FromBytes, Immutable, IntoBytes, Unaligned};

/// A fixed-size element of a command body.
pub trait BodyRecord: Sized {
    /// Wire layout of the record.
    type Wire: FromBytes + IntoBytes + Immutable + Unaligned;

    /// Encoded size in bytes.
    const SIZE: usize = core::mem::size_of::<Self::Wire>();

    /// Convert from the wire layout, validating enumerated fields.
    fn from_wire(wire: Self::Wire) -> HabResult<Self>;

    fn to_wire(&self) -> Self::Wire;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdFrame<T> {
    header: CmdHeader,
    prefix_len: usize,
    records: Vec<T>,
}

impl<T: BodyRecord> CmdFrame<T> {
    /// Create an empty frame. `prefix_len` is the size of the fixed fields
    /// between the header and the first record.
    pub(crate) fn new(tag: CmdTag, param: u8, prefix_len: usize) -> Self {
        let mut header = CmdHeader::new(tag, param);
        header.set_length((HEADER_SIZE + prefix_len) as u16);
        CmdFrame {
            header,
            prefix_len,
            records: Vec::new(),
        }
    }

    pub fn header(&self) -> &CmdHeader {
        &self.header
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total encoded size, equal to the header length field.
    pub fn size(&self) -> usize {
        usize::from(self.header.length())
    }

    pub(crate) fn set_param(&mut self, param: u8) {
        self.header.set_param(param);
    }

    pub(crate) fn push(&mut self, record: T) -> HabResult<()> {
        let length = u16::try_from(self.size() + T::SIZE).map_err(|_| HabError::LengthOverflow)?;
        self.records.push(record);
        self.header.set_length(length);
        Ok(())
    }

    pub(crate) fn remove(&mut self, index: usize) -> HabResult<T> {
        if index >= self.records.len() {
            return Err(HabError::IndexOutOfBounds {
                index,
                len: self.records.len(),
            });
        }
        let record = self.records.remove(index);
        self.header.set_length(self.header.length() - T::SIZE as u16);
        Ok(record)
    }

    pub(crate) fn clear(&mut self) {
        self.records.clear();
        self.header.set_length((HEADER_SIZE + self.prefix_len) as u16);
    }

    /// Parse a frame at `offset`, returning it together with the raw prefix
    /// bytes for the caller to decode.
    pub(crate) fn parse(
        buffer: &[u8],
        offset: usize,
        tag: CmdTag,
        prefix_len: usize,
    ) -> HabResult<(Self, &[u8])> {
        let header = CmdHeader::decode(buffer, offset)?;
        if header.tag() != tag.value() {
            return Err(HabError::UnexpectedTag {
                expected: tag.value(),
                found: header.tag(),
            });
        }

        let length = usize::from(header.length());
        let fixed = HEADER_SIZE + prefix_len;
        if length < fixed || (length - fixed) % T::SIZE != 0 {
            log::debug!(
                "{} at offset {}: length {} does not fit {}-byte records",
                tag,
                offset,
                length,
                T::SIZE
            );
            return Err(HabError::InvalidLength {
                length: header.length(),
            });
        }

        let bytes = buffer
            .get(offset..)
            .and_then(|rest| rest.get(..length))
            .ok_or(HabError::TruncatedBuffer {
                offset,
                needed: length,
                available: buffer.len().saturating_sub(offset),
            })?;
        let (prefix, body) = bytes[HEADER_SIZE..].split_at(prefix_len);

        let records = body
            .chunks_exact(T::SIZE)
            .map(|chunk| {
                let wire = T::Wire::read_from_bytes(chunk).map_err(|_| {
                    HabError::TruncatedBuffer {
                        offset,
                        needed: length,
                        available: bytes.len(),
                    }
                })?;
                T::from_wire(wire)
            })
            .collect::<HabResult<Vec<T>>>()?;

        log::trace!(
            "parsed {} at offset {}: length {}, {} records",
            tag,
            offset,
            length,
            records.len()
        );

        Ok((
            CmdFrame {
                header,
                prefix_len,
                records,
            },
            prefix,
        ))
    }

    /// Append the header, `prefix` and every record to `out`.
    pub(crate) fn write_to(&self, prefix: &[u8], out: &mut Vec<u8>) {
        out.extend_from_slice(&self.header.encode());
        out.extend_from_slice(prefix);
        for record in &self.records {
            out.extend_from_slice(record.to_wire().as_bytes());
        }
    }
}
