// Licensed under the Apache-2.0 license

//! HAB command error types.

/// Errors that can occur while building, parsing or exporting HAB commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HabError {
    /// A field value is outside its enumerated domain.
    InvalidValue { field: &'static str, value: u32 },
    /// No symbolic name matches the requested lookup.
    UnknownName,
    /// The index does not address a record in the command body.
    IndexOutOfBounds { index: usize, len: usize },
    /// The buffer ends before the record declared by the header.
    TruncatedBuffer {
        offset: usize,
        needed: usize,
        available: usize,
    },
    /// The output buffer is too short to hold the encoded command.
    BufferTooShort { needed: usize, available: usize },
    /// The header tag does not match the command being parsed.
    UnexpectedTag { expected: u8, found: u8 },
    /// The header length does not describe a well-formed body.
    InvalidLength { length: u16 },
    /// Appending would exceed the 16-bit header length field.
    LengthOverflow,
}

impl core::fmt::Display for HabError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HabError::InvalidValue { field, value } => {
                write!(f, "Invalid {} value: 0x{:02X}", field, value)
            }
            HabError::UnknownName => write!(f, "Unknown name"),
            HabError::IndexOutOfBounds { index, len } => {
                write!(f, "Index {} out of bounds (len {})", index, len)
            }
            HabError::TruncatedBuffer {
                offset,
                needed,
                available,
            } => write!(
                f,
                "Truncated buffer at offset {}: need {} bytes, {} available",
                offset, needed, available
            ),
            HabError::BufferTooShort { needed, available } => write!(
                f,
                "Buffer too short: need {} bytes, {} available",
                needed, available
            ),
            HabError::UnexpectedTag { expected, found } => write!(
                f,
                "Unexpected tag: expected 0x{:02X}, found 0x{:02X}",
                expected, found
            ),
            HabError::InvalidLength { length } => write!(f, "Invalid length: {}", length),
            HabError::LengthOverflow => write!(f, "Command length overflow"),
        }
    }
}

impl core::error::Error for HabError {}

/// Result type for HAB command operations
pub type HabResult<T> = Result<T, HabError>;
