// Licensed under the Apache-2.0 license

//! Initialize (0xB4) and unlock (0xB2) commands.
//!
//! The parameter byte names the engine; the body is a list of big-endian
//! 32-bit values whose meaning depends on the engine.

use super::frame::CmdFrame;
use super::SEPARATOR;
use crate::codec::HabCodec;
use crate::error::HabResult;
use crate::protocol::{CmdHeader, CmdTag, Engine};
use alloc::vec::Vec;
use core::marker::PhantomData;

/// Selects the command tag of an `EngineCmd`.
pub trait EngineCmdKind {
    const TAG: CmdTag;
    const TITLE: &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Init {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unlock {}

impl EngineCmdKind for Init {
    const TAG: CmdTag = CmdTag::Initialize;
    const TITLE: &'static str = "Initialize Command";
}

impl EngineCmdKind for Unlock {
    const TAG: CmdTag = CmdTag::Unlock;
    const TITLE: &'static str = "Unlock Command";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineCmd<K> {
    engine: Engine,
    frame: CmdFrame<u32>,
    kind: PhantomData<K>,
}

/// Initialize command.
pub type InitializeCmd = EngineCmd<Init>;

/// Unlock engine command.
pub type UnlockCmd = EngineCmd<Unlock>;

impl<K: EngineCmdKind> EngineCmd<K> {
    pub fn new(engine: Engine) -> Self {
        EngineCmd {
            engine,
            frame: CmdFrame::new(K::TAG, engine.into(), 0),
            kind: PhantomData,
        }
    }

    /// Create a command preloaded with `values`.
    pub fn with_values(engine: Engine, values: &[u32]) -> HabResult<Self> {
        let mut cmd = Self::new(engine);
        for value in values {
            cmd.append(*value)?;
        }
        Ok(cmd)
    }

    pub fn header(&self) -> &CmdHeader {
        self.frame.header()
    }

    pub fn engine(&self) -> Engine {
        self.engine
    }

    pub fn set_engine(&mut self, engine: Engine) {
        self.frame.set_param(engine.into());
        self.engine = engine;
    }

    pub fn values(&self) -> &[u32] {
        self.frame.records()
    }

    pub fn len(&self) -> usize {
        self.frame.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.is_empty()
    }

    pub fn append(&mut self, value: u32) -> HabResult<()> {
        self.frame.push(value)
    }

    pub fn pop(&mut self, index: usize) -> HabResult<u32> {
        self.frame.remove(index)
    }

    pub fn clear(&mut self) {
        self.frame.clear();
    }
}

impl<K: EngineCmdKind> Default for EngineCmd<K> {
    fn default() -> Self {
        Self::new(Engine::Any)
    }
}

impl<K: EngineCmdKind + core::fmt::Debug> HabCodec for EngineCmd<K> {
    fn size(&self) -> usize {
        self.frame.size()
    }

    fn parse(buffer: &[u8], offset: usize) -> HabResult<Self> {
        let (frame, _) = CmdFrame::parse(buffer, offset, K::TAG, 0)?;
        Ok(EngineCmd {
            engine: Engine::try_from(frame.header().param())?,
            frame,
            kind: PhantomData,
        })
    }

    fn write_to(&self, out: &mut Vec<u8>) {
        self.frame.write_to(&[], out);
    }
}

impl<K: EngineCmdKind> core::fmt::Display for EngineCmd<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{}", SEPARATOR)?;
        writeln!(f, "{} (Engine: {})", K::TITLE, self.engine)?;
        writeln!(f, "{}", SEPARATOR)?;
        for value in self.values() {
            writeln!(f, "- VAL: 0x{:08X}", value)?;
        }
        Ok(())
    }
}
