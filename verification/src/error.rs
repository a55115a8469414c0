use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("invalid proof shape: {0}")]
    InvalidProofShape(&'static str),
}
