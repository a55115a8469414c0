//! Parse and conversion errors for the foundation types.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid decimal string: {0}")]
    InvalidDecimal(String),

    #[error("value does not fit in 256 bits")]
    Overflow,

    #[error("unknown attribute type: {0}")]
    UnknownAttribute(u8),

    #[error("unknown verification level: {0}")]
    UnknownLevel(u8),

    #[error("unknown network: {0}")]
    UnknownNetwork(String),
}
