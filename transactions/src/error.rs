use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("invalid signature on call {tx_hash}")]
    InvalidSignature { tx_hash: String },

    #[error("invalid timestamp: {reason}")]
    InvalidTimestamp { reason: String },

    #[error("encoding failed: {0}")]
    Encoding(String),
}

impl From<bincode::Error> for TransactionError {
    fn from(e: bincode::Error) -> Self {
        Self::Encoding(e.to_string())
    }
}
