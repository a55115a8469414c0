use thiserror::Error;
use zkid_transactions::TransactionError;
use zkid_types::{AttributeType, VerificationLevel};
use zkid_verification::VerificationError;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("caller already has an active identity")]
    AlreadyRegistered,

    #[error("nullifier already used")]
    NullifierReused,

    #[error("invalid proof shape: {0}")]
    InvalidProofShape(&'static str),

    #[error("proof rejected by verifier")]
    ProofRejected,

    #[error("caller has no active identity")]
    IdentityRequired,

    #[error("no verification key registered for {0}")]
    NoVerificationKey(AttributeType),

    #[error("attribute {0} is not verified")]
    AttributeNotVerified(AttributeType),

    #[error("caller is not authorized")]
    Unauthorized,

    #[error("invalid owner: the zero address cannot own the ledger")]
    InvalidOwner,

    #[error("cannot lower verification level from {current} to {requested}")]
    LevelDowngrade {
        current: VerificationLevel,
        requested: VerificationLevel,
    },

    #[error("invalid nonce: expected {expected}, got {got}")]
    InvalidNonce { expected: u64, got: u64 },

    #[error("invalid signature")]
    InvalidSignature,

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("encoding failed: {0}")]
    Encoding(String),

    #[error("storage error: {0}")]
    Store(#[from] zkid_store::StoreError),

    #[error("ledger lock poisoned")]
    LockPoisoned,
}

impl LedgerError {
    /// Stable machine-readable code used on the wire.
    pub fn code(&self) -> &'static str {
        match self {
            Self::AlreadyRegistered => "already_registered",
            Self::NullifierReused => "nullifier_reused",
            Self::InvalidProofShape(_) => "invalid_proof_shape",
            Self::ProofRejected => "proof_rejected",
            Self::IdentityRequired => "identity_required",
            Self::NoVerificationKey(_) => "no_verification_key",
            Self::AttributeNotVerified(_) => "attribute_not_verified",
            Self::Unauthorized => "unauthorized",
            Self::InvalidOwner => "invalid_owner",
            Self::LevelDowngrade { .. } => "level_downgrade",
            Self::InvalidNonce { .. } => "invalid_nonce",
            Self::InvalidSignature => "invalid_signature",
            Self::InvalidTimestamp(_) => "invalid_timestamp",
            Self::Encoding(_) => "encoding",
            Self::Store(_) => "store",
            Self::LockPoisoned => "lock_poisoned",
        }
    }

    /// Whether the failure is caused by the call itself rather than by the
    /// node. Resubmitting an unchanged call that failed permanently fails again.
    pub fn is_permanent(&self) -> bool {
        !matches!(self, Self::Store(_) | Self::LockPoisoned)
    }
}

impl From<TransactionError> for LedgerError {
    fn from(e: TransactionError) -> Self {
        match e {
            TransactionError::InvalidSignature { .. } => Self::InvalidSignature,
            TransactionError::InvalidTimestamp { reason } => Self::InvalidTimestamp(reason),
            TransactionError::Encoding(msg) => Self::Encoding(msg),
        }
    }
}

impl From<VerificationError> for LedgerError {
    fn from(e: VerificationError) -> Self {
        match e {
            VerificationError::InvalidProofShape(reason) => Self::InvalidProofShape(reason),
        }
    }
}
