// Licensed under the Apache-2.0 license

pub mod auth_data;
pub mod data;
pub mod engine;
pub mod frame;
pub mod install_key;
pub mod nop;
pub mod records;
pub mod set;

pub use auth_data::*;
pub use data::*;
pub use engine::*;
pub use frame::*;
pub use install_key::*;
pub use nop::*;
pub use records::{AuthBlock, DataItem, EngineConfig, PREFIX_SIZE};
pub use set::*;

use crate::codec::HabCodec;
use crate::error::HabResult;
use crate::protocol::{CmdHeader, CmdTag};
use alloc::vec::Vec;

pub(crate) const SEPARATOR: &str =
    "------------------------------------------------------------";

/// Any HAB command, dispatched on the header tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    WriteData(WriteDataCmd),
    CheckData(CheckDataCmd),
    Nop(NopCmd),
    Set(SetCmd),
    Initialize(InitializeCmd),
    Unlock(UnlockCmd),
    InstallKey(InstallKeyCmd),
    AuthData(AuthDataCmd),
}

impl Command {
    pub fn tag(&self) -> CmdTag {
        match self {
            Command::WriteData(_) => CmdTag::WriteData,
            Command::CheckData(_) => CmdTag::CheckData,
            Command::Nop(_) => CmdTag::Nop,
            Command::Set(_) => CmdTag::Set,
            Command::Initialize(_) => CmdTag::Initialize,
            Command::Unlock(_) => CmdTag::Unlock,
            Command::InstallKey(_) => CmdTag::InstallKey,
            Command::AuthData(_) => CmdTag::AuthData,
        }
    }

    pub fn header(&self) -> &CmdHeader {
        match self {
            Command::WriteData(cmd) => cmd.header(),
            Command::CheckData(cmd) => cmd.header(),
            Command::Nop(cmd) => cmd.header(),
            Command::Set(cmd) => cmd.header(),
            Command::Initialize(cmd) => cmd.header(),
            Command::Unlock(cmd) => cmd.header(),
            Command::InstallKey(cmd) => cmd.header(),
            Command::AuthData(cmd) => cmd.header(),
        }
    }
}

impl HabCodec for Command {
    fn size(&self) -> usize {
        usize::from(self.header().length())
    }

    fn parse(buffer: &[u8], offset: usize) -> HabResult<Self> {
        let header = CmdHeader::decode(buffer, offset)?;
        let tag = header.cmd_tag()?;
        log::debug!(
            "dispatching {} at offset {} (length {})",
            tag,
            offset,
            header.length()
        );

        Ok(match tag {
            CmdTag::WriteData => Command::WriteData(WriteDataCmd::parse(buffer, offset)?),
            CmdTag::CheckData => Command::CheckData(CheckDataCmd::parse(buffer, offset)?),
            CmdTag::Nop => Command::Nop(NopCmd::parse(buffer, offset)?),
            CmdTag::Set => Command::Set(SetCmd::parse(buffer, offset)?),
            CmdTag::Initialize => Command::Initialize(InitializeCmd::parse(buffer, offset)?),
            CmdTag::Unlock => Command::Unlock(UnlockCmd::parse(buffer, offset)?),
            CmdTag::InstallKey => Command::InstallKey(InstallKeyCmd::parse(buffer, offset)?),
            CmdTag::AuthData => Command::AuthData(AuthDataCmd::parse(buffer, offset)?),
        })
    }

    fn write_to(&self, out: &mut Vec<u8>) {
        match self {
            Command::WriteData(cmd) => cmd.write_to(out),
            Command::CheckData(cmd) => cmd.write_to(out),
            Command::Nop(cmd) => cmd.write_to(out),
            Command::Set(cmd) => cmd.write_to(out),
            Command::Initialize(cmd) => cmd.write_to(out),
            Command::Unlock(cmd) => cmd.write_to(out),
            Command::InstallKey(cmd) => cmd.write_to(out),
            Command::AuthData(cmd) => cmd.write_to(out),
        }
    }
}

impl core::fmt::Display for Command {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Command::WriteData(cmd) => core::fmt::Display::fmt(cmd, f),
            Command::CheckData(cmd) => core::fmt::Display::fmt(cmd, f),
            Command::Nop(cmd) => core::fmt::Display::fmt(cmd, f),
            Command::Set(cmd) => core::fmt::Display::fmt(cmd, f),
            Command::Initialize(cmd) => core::fmt::Display::fmt(cmd, f),
            Command::Unlock(cmd) => core::fmt::Display::fmt(cmd, f),
            Command::InstallKey(cmd) => core::fmt::Display::fmt(cmd, f),
            Command::AuthData(cmd) => core::fmt::Display::fmt(cmd, f),
        }
    }
}

macro_rules! impl_from_cmd {
    ($($variant:ident($cmd:ty)),+ $(,)?) => {
        $(
            impl From<$cmd> for Command {
                fn from(cmd: $cmd) -> Self {
                    Command::$variant(cmd)
                }
            }
        )+
    };
}

impl_from_cmd!(
    WriteData(WriteDataCmd),
    CheckData(CheckDataCmd),
    Nop(NopCmd),
    Set(SetCmd),
    Initialize(InitializeCmd),
    Unlock(UnlockCmd),
    InstallKey(InstallKeyCmd),
    AuthData(AuthDataCmd),
);
