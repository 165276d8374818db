// Licensed under the Apache-2.0 license

use crate::error::{HabError, HabResult};
use alloc::vec::Vec;

/// A trait for encoding and decoding HAB command records.
///
/// Records are self-delimiting: the header length field tells the parser how
/// many bytes belong to the record, so several records can be chained in one
/// buffer by advancing `offset` by the previous record's `size()`.
pub trait HabCodec: core::fmt::Debug + Sized {
    /// Total encoded size in bytes, header included.
    fn size(&self) -> usize;

    /// Parses a record starting at `offset` within `buffer`.
    ///
    /// # Arguments
    ///
    /// * `buffer` - The byte slice holding the encoded record.
    /// * `offset` - Position of the record header within `buffer`.
    ///
    /// # Returns
    ///
    /// The decoded record, or a `HabError` if the bytes are truncated or malformed.
    fn parse(buffer: &[u8], offset: usize) -> HabResult<Self>;

    /// Appends the encoded record to `out`.
    fn write_to(&self, out: &mut Vec<u8>);

    /// Exports the record as a freshly allocated byte vector.
    fn export(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size());
        self.write_to(&mut out);
        out
    }

    /// Encodes the record into the provided buffer.
    ///
    /// # Returns
    ///
    /// The number of bytes written, or `BufferTooShort` if `buffer` cannot hold the record.
    fn encode(&self, buffer: &mut [u8]) -> HabResult<usize> {
        let data = self.export();
        let available = buffer.len();
        let dst = buffer
            .get_mut(..data.len())
            .ok_or(HabError::BufferTooShort {
                needed: data.len(),
                available,
            })?;
        dst.copy_from_slice(&data);
        Ok(data.len())
    }
}
