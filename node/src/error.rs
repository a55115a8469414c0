use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("ledger error: {0}")]
    Ledger(#[from] zkid_ledger::LedgerError),

    #[error("store error: {0}")]
    Store(#[from] zkid_store::StoreError),

    #[error("LMDB error: {0}")]
    Lmdb(#[from] zkid_store_lmdb::LmdbError),

    #[error("RPC server error: {0}")]
    Rpc(#[from] zkid_rpc::RpcError),

    #[error("config error: {0}")]
    Config(String),

    #[error("logging error: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
