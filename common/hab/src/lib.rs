// Licensed under the Apache-2.0 license

//! HAB Command Records
//!
//! Encoding and decoding of the commands a HAB (High Assurance Boot) boot ROM
//! executes from a command sequence file: key installation, data
//! authentication, memory writes and checks, and engine configuration.
//!
//! Every command starts with a 4-byte `CmdHeader` whose length field always
//! matches the encoded size of the command.
//!
//! Commands are plain owned values and may be sent between threads, but a
//! single instance is not safe for concurrent mutation without external
//! synchronization.

#![no_std]

extern crate alloc;

pub mod codec;
pub mod command;
pub mod error;
pub mod protocol;

pub use codec::HabCodec;
pub use command::*;
pub use error::{HabError, HabResult};
pub use protocol::*;
