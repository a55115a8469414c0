use thiserror::Error;
use zkid_types::Hash256;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("wallet not connected")]
    NotConnected,

    /// The ledger refused the call; nothing was written.
    #[error("call rejected ({code}): {message}")]
    Rejected { code: String, message: String },

    #[error("no outcome for {0} after waiting")]
    ConfirmationTimeout(Hash256),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("signing error: {0}")]
    Signing(String),

    #[error("node RPC error: {0}")]
    Node(String),
}

impl ClientError {
    /// Ledger rejection code, if the ledger refused the call.
    pub fn rejection_code(&self) -> Option<&str> {
        match self {
            Self::Rejected { code, .. } => Some(code),
            _ => None,
        }
    }
}

impl From<zkid_ledger::LedgerError> for ClientError {
    fn from(e: zkid_ledger::LedgerError) -> Self {
        if e.is_permanent() {
            ClientError::Rejected {
                code: e.code().to_string(),
                message: e.to_string(),
            }
        } else {
            ClientError::Node(e.to_string())
        }
    }
}

impl From<zkid_transactions::TransactionError> for ClientError {
    fn from(e: zkid_transactions::TransactionError) -> Self {
        ClientError::Signing(e.to_string())
    }
}
