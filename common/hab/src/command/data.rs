// Licensed under the Apache-2.0 license

//! Write data (0xCC) and check data (0xCF) commands.
//!
//! Both commands share one layout: the parameter byte packs the access width
//! and the operation (see `DataParam`), and the body is a list of 8-byte
//! address/value pairs.

use super::frame::CmdFrame;
use super::records::DataItem;
use super::SEPARATOR;
use crate::codec::HabCodec;
use crate::error::{HabError, HabResult};
use crate::protocol::{ByteWidth, CheckOp, CmdHeader, CmdTag, DataParam, WriteOp};
use alloc::vec::Vec;
use core::marker::PhantomData;

/// Operation domain of a data command. It selects the command tag.
pub trait DataOp:
    Copy + Eq + core::fmt::Debug + core::fmt::Display + TryFrom<u8, Error = HabError> + Into<u8>
{
    const TAG: CmdTag;
    const DEFAULT: Self;
    const TITLE: &'static str;
}

impl DataOp for WriteOp {
    const TAG: CmdTag = CmdTag::WriteData;
    const DEFAULT: Self = WriteOp::WriteValue;
    const TITLE: &'static str = "Write Data Command";
}

impl DataOp for CheckOp {
    const TAG: CmdTag = CmdTag::CheckData;
    const DEFAULT: Self = CheckOp::AllSet;
    const TITLE: &'static str = "Check Data Command";
}

/// Width and operation live only in the header parameter byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataCmd<O> {
    frame: CmdFrame<DataItem>,
    op: PhantomData<O>,
}

/// Write data command.
pub type WriteDataCmd = DataCmd<WriteOp>;

/// Check data command.
pub type CheckDataCmd = DataCmd<CheckOp>;

impl<O: DataOp> DataCmd<O> {
    pub fn new(bytes: ByteWidth, ops: O) -> Self {
        DataCmd {
            frame: CmdFrame::new(O::TAG, DataParam::pack(bytes, ops.into()).bits(), 0),
            op: PhantomData,
        }
    }

    /// Create a command from raw width and operation values, validating both.
    pub fn try_new(bytes: u8, ops: u8) -> HabResult<Self> {
        Ok(Self::new(ByteWidth::try_from(bytes)?, O::try_from(ops)?))
    }

    pub fn header(&self) -> &CmdHeader {
        self.frame.header()
    }

    fn param(&self) -> DataParam {
        DataParam::from_bits(self.frame.header().param())
    }

    // Both bit ranges are validated whenever the parameter byte is written.
    pub fn byte_width(&self) -> ByteWidth {
        ByteWidth::try_from(self.param().bytes()).unwrap_or(ByteWidth::Bytes4)
    }

    pub fn set_byte_width(&mut self, bytes: ByteWidth) {
        let mut param = self.param();
        param.set_bytes(bytes.value());
        self.frame.set_param(param.bits());
    }

    pub fn ops(&self) -> O {
        O::try_from(self.param().ops()).unwrap_or(O::DEFAULT)
    }

    pub fn set_ops(&mut self, ops: O) {
        let mut param = self.param();
        param.set_ops(ops.into());
        self.frame.set_param(param.bits());
    }

    pub fn items(&self) -> &[DataItem] {
        self.frame.records()
    }

    pub fn len(&self) -> usize {
        self.frame.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.is_empty()
    }

    pub fn append(&mut self, address: u32, value: u32) -> HabResult<()> {
        self.frame.push(DataItem::new(address, value))
    }

    pub fn pop(&mut self, index: usize) -> HabResult<DataItem> {
        self.frame.remove(index)
    }

    pub fn clear(&mut self) {
        self.frame.clear();
    }
}

impl<O: DataOp> Default for DataCmd<O> {
    fn default() -> Self {
        Self::new(ByteWidth::Bytes4, O::DEFAULT)
    }
}

impl<O: DataOp> HabCodec for DataCmd<O> {
    fn size(&self) -> usize {
        self.frame.size()
    }

    fn parse(buffer: &[u8], offset: usize) -> HabResult<Self> {
        let (frame, _) = CmdFrame::parse(buffer, offset, O::TAG, 0)?;
        let param = DataParam::from_bits(frame.header().param());
        ByteWidth::try_from(param.bytes())?;
        O::try_from(param.ops())?;
        Ok(DataCmd {
            frame,
            op: PhantomData,
        })
    }

    fn write_to(&self, out: &mut Vec<u8>) {
        self.frame.write_to(&[], out);
    }
}

impl<O: DataOp> core::fmt::Display for DataCmd<O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{}", SEPARATOR)?;
        writeln!(
            f,
            "{} (Ops: {}, Bytes: {})",
            O::TITLE,
            self.ops(),
            self.byte_width().value()
        )?;
        writeln!(f, "{}", SEPARATOR)?;
        for item in self.items() {
            writeln!(f, "- ADDR: 0x{:08X}, VAL: 0x{:08X}", item.address, item.value)?;
        }
        Ok(())
    }
}
