// Licensed under the Apache-2.0 license

//! Authenticate data command (0xCA).
//!
//! Layout after the header:
//! - Bytes 0:7 - Fixed prefix (see `AuthDataPrefix`)
//! - Bytes 8:N - Data blocks, 8 bytes each (start address, length)

use super::frame::CmdFrame;
use super::records::{AuthBlock, AuthDataPrefix, PREFIX_SIZE};
use super::SEPARATOR;
use crate::codec::HabCodec;
use crate::error::{HabError, HabResult};
use crate::protocol::{AuthFlag, CmdHeader, CmdTag, Engine, Protocol};
use alloc::vec::Vec;
use zerocopy::byteorder::U32;
use zerocopy::{FromBytes, IntoBytes};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthDataCmd {
    flag: AuthFlag,
    key: u8,
    protocol: Protocol,
    engine: Engine,
    config: u8,
    auth_start: u32,
    frame: CmdFrame<AuthBlock>,
}

impl AuthDataCmd {
    pub fn new(
        flag: AuthFlag,
        key: u8,
        protocol: Protocol,
        engine: Engine,
        config: u8,
        auth_start: u32,
    ) -> Self {
        AuthDataCmd {
            flag,
            key,
            protocol,
            engine,
            config,
            auth_start,
            frame: CmdFrame::new(CmdTag::AuthData, flag.into(), PREFIX_SIZE),
        }
    }

    pub fn header(&self) -> &CmdHeader {
        self.frame.header()
    }

    pub fn flag(&self) -> AuthFlag {
        self.flag
    }

    pub fn set_flag(&mut self, flag: AuthFlag) {
        self.frame.set_param(flag.into());
        self.flag = flag;
    }

    /// Index of the verification key. Only 8 bits wide on the wire.
    pub fn key(&self) -> u8 {
        self.key
    }

    pub fn set_key(&mut self, key: u8) {
        self.key = key;
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn set_protocol(&mut self, protocol: Protocol) {
        self.protocol = protocol;
    }

    pub fn engine(&self) -> Engine {
        self.engine
    }

    pub fn set_engine(&mut self, engine: Engine) {
        self.engine = engine;
    }

    pub fn config(&self) -> u8 {
        self.config
    }

    pub fn set_config(&mut self, config: u8) {
        self.config = config;
    }

    /// Start address of the authentication data (signature or MAC).
    pub fn auth_start(&self) -> u32 {
        self.auth_start
    }

    pub fn set_auth_start(&mut self, address: u32) {
        self.auth_start = address;
    }

    pub fn blocks(&self) -> &[AuthBlock] {
        self.frame.records()
    }

    pub fn len(&self) -> usize {
        self.frame.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.is_empty()
    }

    pub fn append(&mut self, start: u32, length: u32) -> HabResult<()> {
        self.frame.push(AuthBlock::new(start, length))
    }

    pub fn pop(&mut self, index: usize) -> HabResult<AuthBlock> {
        self.frame.remove(index)
    }

    /// Remove every block. The fixed prefix stays.
    pub fn clear(&mut self) {
        self.frame.clear();
    }

    fn prefix(&self) -> AuthDataPrefix {
        AuthDataPrefix {
            key: self.key,
            protocol: self.protocol.into(),
            engine: self.engine.into(),
            config: self.config,
            auth_start: U32::new(self.auth_start),
        }
    }
}

impl Default for AuthDataCmd {
    fn default() -> Self {
        Self::new(AuthFlag::Clr, 0, Protocol::Srk, Engine::Any, 0, 0)
    }
}

impl HabCodec for AuthDataCmd {
    fn size(&self) -> usize {
        self.frame.size()
    }

    fn parse(buffer: &[u8], offset: usize) -> HabResult<Self> {
        let (frame, prefix) = CmdFrame::parse(buffer, offset, CmdTag::AuthData, PREFIX_SIZE)?;
        let prefix =
            AuthDataPrefix::read_from_bytes(prefix).map_err(|_| HabError::TruncatedBuffer {
                offset,
                needed: PREFIX_SIZE,
                available: prefix.len(),
            })?;

        Ok(AuthDataCmd {
            flag: AuthFlag::try_from(frame.header().param())?,
            key: prefix.key,
            protocol: Protocol::try_from(prefix.protocol)?,
            engine: Engine::try_from(prefix.engine)?,
            config: prefix.config,
            auth_start: prefix.auth_start.get(),
            frame,
        })
    }

    fn write_to(&self, out: &mut Vec<u8>) {
        self.frame.write_to(self.prefix().as_bytes(), out);
    }
}

impl core::fmt::Display for AuthDataCmd {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{}", SEPARATOR)?;
        writeln!(f, "Auth Data Command")?;
        writeln!(f, " Flag:   {}", self.flag)?;
        writeln!(f, " Prot:   {}", self.protocol)?;
        writeln!(f, " Engine: {}", self.engine)?;
        writeln!(f, " Key:    {} (Key index)", self.key)?;
        writeln!(f, " Conf:   {} (Configuration)", self.config)?;
        writeln!(
            f,
            " Addr:   0x{:08X} (Start address of authentication data)",
            self.auth_start
        )?;
        writeln!(f, "{}", SEPARATOR)?;
        for block in self.blocks() {
            writeln!(
                f,
                "- Start: 0x{:08X}, Length: {} Bytes",
                block.start, block.length
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::HEADER_SIZE;

    #[test]
    fn test_auth_data_blocks_layout() {
        let mut cmd = AuthDataCmd::default();
        cmd.append(0x0000_1000, 0x200).unwrap();
        cmd.append(0x0000_2000, 0x400).unwrap();
        assert_eq!(cmd.size(), HEADER_SIZE + PREFIX_SIZE + 16);

        let bytes = cmd.export();
        assert_eq!(&bytes[..4], &[0xCA, 0x00, 0x1C, 0x00]);
        assert_eq!(&bytes[4..12], &[0x00, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(
            &bytes[12..],
            &[
                0x00, 0x00, 0x10, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x20, 0x00, 0x00,
                0x00, 0x04, 0x00
            ]
        );
    }

    #[test]
    fn test_auth_data_round_trip() {
        let mut cmd = AuthDataCmd::new(AuthFlag::Abs, 2, Protocol::Cms, Engine::Caam, 0x01, 0x1F00);
        cmd.append(0x8780_0000, 0x0004_0000).unwrap();
        let parsed = AuthDataCmd::parse(&cmd.export(), 0).unwrap();
        assert_eq!(parsed, cmd);
        assert_eq!(parsed.blocks(), &[AuthBlock::new(0x8780_0000, 0x0004_0000)]);
    }

    #[test]
    fn test_clear_keeps_prefix_length() {
        let mut cmd = AuthDataCmd::default();
        cmd.append(0x10, 0x20).unwrap();
        cmd.append(0x30, 0x40).unwrap();
        assert_eq!(cmd.pop(1), Ok(AuthBlock::new(0x30, 0x40)));
        assert_eq!(
            cmd.pop(1),
            Err(HabError::IndexOutOfBounds { index: 1, len: 1 })
        );
        cmd.clear();
        assert!(cmd.is_empty());
        assert_eq!(cmd.size(), HEADER_SIZE + PREFIX_SIZE);
        assert_eq!(cmd.export().len(), cmd.size());
    }

    #[test]
    fn test_auth_data_rejects_unknown_flag() {
        let bytes = [0xCA, 0x00, 0x0C, 0x02, 0x00, 0x03, 0x00, 0x00, 0, 0, 0, 0];
        assert_eq!(
            AuthDataCmd::parse(&bytes, 0),
            Err(HabError::InvalidValue {
                field: "auth data flag",
                value: 0x02
            })
        );
    }

    #[test]
    fn test_auth_data_truncated_block() {
        let mut cmd = AuthDataCmd::default();
        cmd.append(0x10, 0x20).unwrap();
        let bytes = cmd.export();
        assert_eq!(
            AuthDataCmd::parse(&bytes[..bytes.len() - 1], 0),
            Err(HabError::TruncatedBuffer {
                offset: 0,
                needed: 20,
                available: 19
            })
        );
    }
}
