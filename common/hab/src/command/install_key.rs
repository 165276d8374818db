// Licensed under the Apache-2.0 license

//! Install key command (0xBE).
//!
//! Layout after the header:
//! - Bytes 0:7 - Fixed prefix (see `InstallKeyPrefix`)
//! - Bytes 8:N - Optional hash words (u32 each) of the key being installed

use super::frame::CmdFrame;
use super::records::{InstallKeyPrefix, PREFIX_SIZE};
use super::SEPARATOR;
use crate::codec::HabCodec;
use crate::error::{HabError, HabResult};
use crate::protocol::{Algorithm, CmdHeader, CmdTag, InsKeyFlags, Protocol};
use alloc::vec::Vec;
use zerocopy::byteorder::U32;
use zerocopy::{FromBytes, IntoBytes};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallKeyCmd {
    flags: InsKeyFlags,
    protocol: Protocol,
    algorithm: Algorithm,
    source_index: u8,
    target_index: u8,
    key_address: u32,
    frame: CmdFrame<u32>,
}

impl InstallKeyCmd {
    pub fn new(
        flags: InsKeyFlags,
        protocol: Protocol,
        algorithm: Algorithm,
        source_index: u8,
        target_index: u8,
        key_address: u32,
    ) -> Self {
        InstallKeyCmd {
            flags,
            protocol,
            algorithm,
            source_index,
            target_index,
            key_address,
            frame: CmdFrame::new(CmdTag::InstallKey, flags.bits(), PREFIX_SIZE),
        }
    }

    pub fn header(&self) -> &CmdHeader {
        self.frame.header()
    }

    pub fn flags(&self) -> InsKeyFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: InsKeyFlags) {
        self.frame.set_param(flags.bits());
        self.flags = flags;
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn set_protocol(&mut self, protocol: Protocol) {
        self.protocol = protocol;
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
    }

    /// Index of the key used to verify the new key.
    pub fn source_index(&self) -> u8 {
        self.source_index
    }

    pub fn set_source_index(&mut self, index: u8) {
        self.source_index = index;
    }

    /// Key slot the new key is installed into.
    pub fn target_index(&self) -> u8 {
        self.target_index
    }

    pub fn set_target_index(&mut self, index: u8) {
        self.target_index = index;
    }

    /// Start address of the key data to install.
    pub fn key_address(&self) -> u32 {
        self.key_address
    }

    pub fn set_key_address(&mut self, address: u32) {
        self.key_address = address;
    }

    /// Hash words trailing the fixed prefix. Only populated by `parse`.
    pub fn hashes(&self) -> &[u32] {
        self.frame.records()
    }

    fn prefix(&self) -> InstallKeyPrefix {
        InstallKeyPrefix {
            protocol: self.protocol.into(),
            algorithm: self.algorithm.into(),
            source_index: self.source_index,
            target_index: self.target_index,
            key_address: U32::new(self.key_address),
        }
    }
}

impl Default for InstallKeyCmd {
    fn default() -> Self {
        Self::new(
            InsKeyFlags::default(),
            Protocol::Srk,
            Algorithm::Any,
            0,
            0,
            0,
        )
    }
}

impl HabCodec for InstallKeyCmd {
    fn size(&self) -> usize {
        self.frame.size()
    }

    fn parse(buffer: &[u8], offset: usize) -> HabResult<Self> {
        let (frame, prefix) = CmdFrame::parse(buffer, offset, CmdTag::InstallKey, PREFIX_SIZE)?;
        let prefix =
            InstallKeyPrefix::read_from_bytes(prefix).map_err(|_| HabError::TruncatedBuffer {
                offset,
                needed: PREFIX_SIZE,
                available: prefix.len(),
            })?;

        Ok(InstallKeyCmd {
            flags: InsKeyFlags::from_bits(frame.header().param()),
            protocol: Protocol::try_from(prefix.protocol)?,
            algorithm: Algorithm::try_from(prefix.algorithm)?,
            source_index: prefix.source_index,
            target_index: prefix.target_index,
            key_address: prefix.key_address.get(),
            frame,
        })
    }

    fn write_to(&self, out: &mut Vec<u8>) {
        self.frame.write_to(self.prefix().as_bytes(), out);
    }
}

impl core::fmt::Display for InstallKeyCmd {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{}", SEPARATOR)?;
        writeln!(f, "Install Key Command")?;
        writeln!(f, " Flag:   {}", self.flags)?;
        writeln!(f, " Prot:   {}", self.protocol)?;
        writeln!(f, " Algo:   {}", self.algorithm)?;
        writeln!(f, " SrcKey: {} (Source key index)", self.source_index)?;
        writeln!(f, " TgtKey: {} (Target key index)", self.target_index)?;
        writeln!(
            f,
            " Addr:   0x{:08X} (Start address of key data to install)",
            self.key_address
        )?;
        for hash in self.hashes() {
            writeln!(f, " Hash:   0x{:08X}", hash)?;
        }
        writeln!(f, "{}", SEPARATOR)
    }
}
