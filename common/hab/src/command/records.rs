// Licensed under the Apache-2.0 license

//! Body record types and their wire layouts.
//!
//! Every multi-byte field is big-endian on the wire.

use super::frame::BodyRecord;
use crate::error::HabResult;
use crate::protocol::{Algorithm, Engine};
use zerocopy::byteorder::{BigEndian, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, Unaligned};

/// Address/value pair of the write data and check data commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DataItem {
    pub address: u32,
    /// Value to write, bitmask to apply, or mask to check.
    pub value: u32,
}

impl DataItem {
    pub fn new(address: u32, value: u32) -> Self {
        DataItem { address, value }
    }
}

#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, Unaligned)]
#[repr(C)]
pub struct DataItemWire {
    address: U32<BigEndian>,
    value: U32<BigEndian>,
}

impl BodyRecord for DataItem {
    type Wire = DataItemWire;

    fn from_wire(wire: DataItemWire) -> HabResult<Self> {
        Ok(DataItem::new(wire.address.get(), wire.value.get()))
    }

    fn to_wire(&self) -> DataItemWire {
        DataItemWire {
            address: U32::new(self.address),
            value: U32::new(self.value),
        }
    }
}

/// Engine configuration entry of the set command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub algorithm: Algorithm,
    pub engine: Engine,
    /// Engine specific configuration flags.
    pub config: u8,
}

impl EngineConfig {
    pub fn new(algorithm: Algorithm, engine: Engine, config: u8) -> Self {
        EngineConfig {
            algorithm,
            engine,
            config,
        }
    }
}

/// Layout:
/// - Byte 0 - Reserved (written as 0, ignored on parse)
/// - Byte 1 - Algorithm
/// - Byte 2 - Engine
/// - Byte 3 - Configuration
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, Unaligned)]
#[repr(C)]
pub struct EngineConfigWire {
    reserved: u8,
    algorithm: u8,
    engine: u8,
    config: u8,
}

impl BodyRecord for EngineConfig {
    type Wire = EngineConfigWire;

    fn from_wire(wire: EngineConfigWire) -> HabResult<Self> {
        Ok(EngineConfig {
            algorithm: Algorithm::try_from(wire.algorithm)?,
            engine: Engine::try_from(wire.engine)?,
            config: wire.config,
        })
    }

    fn to_wire(&self) -> EngineConfigWire {
        EngineConfigWire {
            reserved: 0,
            algorithm: self.algorithm.into(),
            engine: self.engine.into(),
            config: self.config,
        }
    }
}

/// Data block covered by an authenticate data command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthBlock {
    pub start: u32,
    /// Block length in bytes.
    pub length: u32,
}

impl AuthBlock {
    pub fn new(start: u32, length: u32) -> Self {
        AuthBlock { start, length }
    }
}

#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, Unaligned)]
#[repr(C)]
pub struct AuthBlockWire {
    start: U32<BigEndian>,
    length: U32<BigEndian>,
}

impl BodyRecord for AuthBlock {
    type Wire = AuthBlockWire;

    fn from_wire(wire: AuthBlockWire) -> HabResult<Self> {
        Ok(AuthBlock::new(wire.start.get(), wire.length.get()))
    }

    fn to_wire(&self) -> AuthBlockWire {
        AuthBlockWire {
            start: U32::new(self.start),
            length: U32::new(self.length),
        }
    }
}

// Initialize/unlock values and install key hash words.
impl BodyRecord for u32 {
    type Wire = U32<BigEndian>;

    fn from_wire(wire: U32<BigEndian>) -> HabResult<Self> {
        Ok(wire.get())
    }

    fn to_wire(&self) -> U32<BigEndian> {
        U32::new(*self)
    }
}

/// Fixed prefix of the install key command.
///
/// Layout:
/// - Byte 0    - Protocol
/// - Byte 1    - Algorithm
/// - Byte 2    - Source key index
/// - Byte 3    - Target key index
/// - Bytes 4:7 - Key data address (big-endian)
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, Unaligned)]
#[repr(C)]
pub(crate) struct InstallKeyPrefix {
    pub protocol: u8,
    pub algorithm: u8,
    pub source_index: u8,
    pub target_index: u8,
    pub key_address: U32<BigEndian>,
}

/// Fixed prefix of the authenticate data command.
///
/// Layout:
/// - Byte 0    - Verification key index
/// - Byte 1    - Protocol
/// - Byte 2    - Engine
/// - Byte 3    - Engine configuration
/// - Bytes 4:7 - Start address of the authentication data (big-endian)
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, Unaligned)]
#[repr(C)]
pub(crate) struct AuthDataPrefix {
    pub key: u8,
    pub protocol: u8,
    pub engine: u8,
    pub config: u8,
    pub auth_start: U32<BigEndian>,
}

/// Size of both fixed prefixes in bytes.
pub const PREFIX_SIZE: usize = 8;
