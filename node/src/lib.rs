//! ZKID node.
//!
//! The node is the process that owns a ledger:
//! - Opens the LMDB store and checks its schema
//! - Installs the configured owner on first start
//! - Provisions the default verification keys on an empty registry
//! - Serves the JSON RPC until shut down

pub mod config;
pub mod error;
pub mod logging;
pub mod node;
pub mod shutdown;

pub use config::{LevelPolicyConfig, NodeConfig};
pub use error::NodeError;
pub use logging::{init_logging, LogFormat};
pub use node::ZkidNode;
pub use shutdown::ShutdownController;
