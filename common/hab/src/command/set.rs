// Licensed under the Apache-2.0 license

//! Set command (0xB1).
//!
//! The parameter byte selects the configuration item; the body is a list of
//! 4-byte engine configuration entries.

use super::frame::CmdFrame;
use super::records::EngineConfig;
use super::SEPARATOR;
use crate::codec::HabCodec;
use crate::error::HabResult;
use crate::protocol::{Algorithm, CmdHeader, CmdTag, ConfigItem, Engine};
use alloc::vec::Vec;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCmd {
    item: ConfigItem,
    frame: CmdFrame<EngineConfig>,
}

impl SetCmd {
    pub fn new(item: ConfigItem) -> Self {
        SetCmd {
            item,
            frame: CmdFrame::new(CmdTag::Set, item.into(), 0),
        }
    }

    pub fn header(&self) -> &CmdHeader {
        self.frame.header()
    }

    pub fn item(&self) -> ConfigItem {
        self.item
    }

    pub fn set_item(&mut self, item: ConfigItem) {
        self.frame.set_param(item.into());
        self.item = item;
    }

    pub fn entries(&self) -> &[EngineConfig] {
        self.frame.records()
    }

    pub fn len(&self) -> usize {
        self.frame.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.is_empty()
    }

    pub fn append(&mut self, algorithm: Algorithm, engine: Engine, config: u8) -> HabResult<()> {
        self.frame.push(EngineConfig::new(algorithm, engine, config))
    }

    pub fn pop(&mut self, index: usize) -> HabResult<EngineConfig> {
        self.frame.remove(index)
    }

    pub fn clear(&mut self) {
        self.frame.clear();
    }
}

impl Default for SetCmd {
    fn default() -> Self {
        Self::new(ConfigItem::Eng)
    }
}

impl HabCodec for SetCmd {
    fn size(&self) -> usize {
        self.frame.size()
    }

    fn parse(buffer: &[u8], offset: usize) -> HabResult<Self> {
        let (frame, _) = CmdFrame::parse(buffer, offset, CmdTag::Set, 0)?;
        Ok(SetCmd {
            item: ConfigItem::try_from(frame.header().param())?,
            frame,
        })
    }

    fn write_to(&self, out: &mut Vec<u8>) {
        self.frame.write_to(&[], out);
    }
}

impl core::fmt::Display for SetCmd {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{}", SEPARATOR)?;
        writeln!(f, "Set Command (ITM: {})", self.item)?;
        writeln!(f, "{}", SEPARATOR)?;
        for entry in self.entries() {
            writeln!(
                f,
                "- ALG: {}, ENG: {}, CFG: {}",
                entry.algorithm, entry.engine, entry.config
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HabError;
    use crate::protocol::HEADER_SIZE;
    use alloc::vec;

    #[test]
    fn test_set_export() {
        let mut cmd = SetCmd::default();
        cmd.append(Algorithm::Sha256, Engine::Dcp, 0x00).unwrap();
        cmd.append(Algorithm::Pkcs1, Engine::Caam, 0x01).unwrap();
        assert_eq!(cmd.size(), HEADER_SIZE + 8);
        assert_eq!(
            cmd.export(),
            vec![0xB1, 0x00, 0x0C, 0x03, 0x00, 0x17, 0x1B, 0x00, 0x00, 0x21, 0x1D, 0x01]
        );
    }

    #[test]
    fn test_set_round_trip() {
        let mut cmd = SetCmd::new(ConfigItem::Mid);
        cmd.append(Algorithm::Any, Engine::Ocotp, 0x7F).unwrap();
        let parsed = SetCmd::parse(&cmd.export(), 0).unwrap();
        assert_eq!(parsed, cmd);
        assert_eq!(parsed.item(), ConfigItem::Mid);
    }

    #[test]
    fn test_set_parse_rejects_unknown_item() {
        assert_eq!(
            SetCmd::parse(&[0xB1, 0x00, 0x04, 0x02], 0),
            Err(HabError::InvalidValue {
                field: "config item",
                value: 0x02
            })
        );
    }

    #[test]
    fn test_set_parse_rejects_unknown_engine() {
        assert_eq!(
            SetCmd::parse(&[0xB1, 0x00, 0x08, 0x03, 0x00, 0x17, 0x99, 0x00], 0),
            Err(HabError::InvalidValue {
                field: "engine",
                value: 0x99
            })
        );
    }

    #[test]
    fn test_set_item_and_pop() {
        let mut cmd = SetCmd::default();
        cmd.set_item(ConfigItem::Mid);
        assert_eq!(cmd.header().param(), 0x01);
        cmd.append(Algorithm::Sha1, Engine::Sw, 3).unwrap();
        assert_eq!(
            cmd.pop(0),
            Ok(EngineConfig::new(Algorithm::Sha1, Engine::Sw, 3))
        );
        assert!(cmd.is_empty());
        assert_eq!(cmd.size(), HEADER_SIZE);
    }
}
