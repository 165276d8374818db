// Licensed under the Apache-2.0 license

//! No operation command (0xC0). Header only.

use super::SEPARATOR;
use crate::codec::HabCodec;
use crate::error::{HabError, HabResult};
use crate::protocol::{CmdHeader, CmdTag, HEADER_SIZE};
use alloc::vec::Vec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NopCmd {
    header: CmdHeader,
}

impl NopCmd {
    pub fn new(param: u8) -> Self {
        NopCmd {
            header: CmdHeader::new(CmdTag::Nop, param),
        }
    }

    pub fn header(&self) -> &CmdHeader {
        &self.header
    }

    pub fn param(&self) -> u8 {
        self.header.param()
    }
}

impl Default for NopCmd {
    fn default() -> Self {
        Self::new(0)
    }
}

impl HabCodec for NopCmd {
    fn size(&self) -> usize {
        usize::from(self.header.length())
    }

    fn parse(buffer: &[u8], offset: usize) -> HabResult<Self> {
        let header = CmdHeader::decode(buffer, offset)?;
        if header.tag() != CmdTag::Nop.value() {
            return Err(HabError::UnexpectedTag {
                expected: CmdTag::Nop.value(),
                found: header.tag(),
            });
        }
        if usize::from(header.length()) != HEADER_SIZE {
            return Err(HabError::InvalidLength {
                length: header.length(),
            });
        }
        Ok(NopCmd { header })
    }

    fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.header.encode());
    }
}

impl core::fmt::Display for NopCmd {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{}", SEPARATOR)?;
        writeln!(f, "NOP Command")?;
        writeln!(f, "{}", SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_nop_export_parse() {
        let nop = NopCmd::new(0x5A);
        let bytes = nop.export();
        assert_eq!(bytes, vec![0xC0, 0x00, 0x04, 0x5A]);
        assert_eq!(NopCmd::parse(&bytes, 0), Ok(nop));
        assert_eq!(nop.size(), HEADER_SIZE);
    }

    #[test]
    fn test_nop_rejects_body() {
        assert_eq!(
            NopCmd::parse(&[0xC0, 0x00, 0x08, 0x00, 0, 0, 0, 0], 0),
            Err(HabError::InvalidLength { length: 8 })
        );
    }

    #[test]
    fn test_nop_encode_into_buffer() {
        let mut buffer = [0u8; 2];
        assert_eq!(
            NopCmd::default().encode(&mut buffer),
            Err(HabError::BufferTooShort {
                needed: 4,
                available: 2
            })
        );
        let mut buffer = [0u8; 8];
        assert_eq!(NopCmd::default().encode(&mut buffer), Ok(4));
        assert_eq!(&buffer[..4], &[0xC0, 0x00, 0x04, 0x00]);
    }
}
