// Licensed under the Apache-2.0 license

use super::enums::{ByteWidth, CmdTag, InsKeyFlag};
use crate::error::{HabError, HabResult};
use bitfield::bitfield;
use zerocopy::byteorder::{BigEndian, U16};
use zerocopy::{FromBytes, Immutable, IntoBytes, Unaligned};

/// Length of the command header in bytes.
/// Header consists of: Tag (1 byte) + Length (2 bytes) + Parameter (1 byte)
pub const HEADER_SIZE: usize = 4;

/// Largest total command length the 16-bit length field can describe.
pub const MAX_CMD_LENGTH: usize = u16::MAX as usize;

/// HAB command header.
///
/// Layout:
/// - Byte 0    - Tag
/// - Bytes 1:2 - Total command length including the header (big-endian)
/// - Byte 3    - Parameter, interpreted by each command
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, Unaligned)]
#[repr(C)]
pub struct CmdHeader {
    tag: u8,
    length: U16<BigEndian>,
    param: u8,
}

impl CmdHeader {
    /// Create a header describing an empty command body.
    pub fn new(tag: CmdTag, param: u8) -> Self {
        CmdHeader {
            tag: tag.into(),
            length: U16::new(HEADER_SIZE as u16),
            param,
        }
    }

    /// Raw tag byte.
    pub fn tag(&self) -> u8 {
        self.tag
    }

    /// Tag byte checked against the known command tags.
    pub fn cmd_tag(&self) -> HabResult<CmdTag> {
        CmdTag::try_from(self.tag)
    }

    /// Total command length in bytes, header included.
    pub fn length(&self) -> u16 {
        self.length.get()
    }

    pub fn param(&self) -> u8 {
        self.param
    }

    pub(crate) fn set_length(&mut self, length: u16) {
        self.length.set(length);
    }

    pub(crate) fn set_param(&mut self, param: u8) {
        self.param = param;
    }

    /// Decode a header from `buffer` at `offset`.
    pub fn decode(buffer: &[u8], offset: usize) -> HabResult<Self> {
        let available = buffer.len().saturating_sub(offset);
        let bytes = buffer.get(offset..).unwrap_or(&[]);
        let (header, _) =
            CmdHeader::read_from_prefix(bytes).map_err(|_| HabError::TruncatedBuffer {
                offset,
                needed: HEADER_SIZE,
                available,
            })?;

        if usize::from(header.length()) < HEADER_SIZE {
            log::debug!(
                "rejecting header at offset {}: tag 0x{:02X}, length {}",
                offset,
                header.tag,
                header.length()
            );
            return Err(HabError::InvalidLength {
                length: header.length(),
            });
        }

        Ok(header)
    }

    /// Encode the header to its wire form.
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let length = self.length().to_be_bytes();
        [self.tag, length[0], length[1], self.param]
    }
}

bitfield! {
    /// Parameter byte of the write data and check data commands.
    /// Bits 2:0: Access width in bytes (1, 2 or 4)
    /// Bits 4:3: Operation
    /// Bits 7:5: Reserved (must be 0)
    #[derive(Copy, Clone, PartialEq, Eq, Default)]
    pub struct DataParam(u8);
    impl Debug;
    pub u8, bytes, set_bytes: 2, 0;
    pub u8, ops, set_ops: 4, 3;
}

impl DataParam {
    pub fn from_bits(bits: u8) -> Self {
        DataParam(bits)
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    /// Pack an access width and an operation code.
    pub fn pack(bytes: ByteWidth, ops: u8) -> Self {
        let mut param = DataParam(0);
        param.set_bytes(bytes.value() & 0x7);
        param.set_ops(ops & 0x3);
        param
    }
}

bitfield! {
    /// Parameter byte of the install key command. Each bit is one `InsKeyFlag`;
    /// no bits set means `InsKeyFlag::Clr`.
    #[derive(Copy, Clone, PartialEq, Eq, Default)]
    pub struct InsKeyFlags(u8);
    impl Debug;
    pub u8, abs, set_abs: 0, 0;
    pub u8, csf, set_csf: 1, 1;
    pub u8, dat, set_dat: 2, 2;
    pub u8, cfg, set_cfg: 3, 3;
    pub u8, fid, set_fid: 4, 4;
    pub u8, mid, set_mid: 5, 5;
    pub u8, cid, set_cid: 6, 6;
    pub u8, hsh, set_hsh: 7, 7;
}

impl InsKeyFlags {
    pub fn from_bits(bits: u8) -> Self {
        InsKeyFlags(bits)
    }

    pub fn from_flags(flags: &[InsKeyFlag]) -> Self {
        let mut mask = InsKeyFlags(0);
        for flag in flags {
            mask.insert(*flag);
        }
        mask
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    /// Check if `flag` is set. `Clr` is "set" only when no other flag is.
    pub fn contains(&self, flag: InsKeyFlag) -> bool {
        match flag {
            InsKeyFlag::Clr => self.0 == 0,
            _ => self.0 & flag.value() != 0,
        }
    }

    pub fn insert(&mut self, flag: InsKeyFlag) {
        self.0 |= flag.value();
    }

    /// Set flags in ascending bit order.
    pub fn flags(&self) -> impl Iterator<Item = InsKeyFlag> + '_ {
        InsKeyFlag::ALL
            .iter()
            .copied()
            .filter(move |flag| *flag != InsKeyFlag::Clr && self.contains(*flag))
    }
}

impl From<InsKeyFlag> for InsKeyFlags {
    fn from(flag: InsKeyFlag) -> Self {
        InsKeyFlags(flag.value())
    }
}

impl core::fmt::Display for InsKeyFlags {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.0 == 0 {
            return f.write_str(InsKeyFlag::Clr.name());
        }
        for (i, flag) in self.flags().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            f.write_str(flag.name())?;
        }
        Ok(())
    }
}
