//! The running node: ledger bootstrap and RPC serving.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{debug, info, warn};
use zkid_ledger::IdentityLedger;
use zkid_rpc::{RpcServer, RpcState};
use zkid_store_lmdb::{check_data_dir, check_integrity, LmdbStore};

use crate::config::NodeConfig;
use crate::shutdown::ShutdownController;
use crate::NodeError;

pub struct ZkidNode {
    config: NodeConfig,
    ledger: Arc<IdentityLedger<LmdbStore>>,
    shutdown: ShutdownController,
}

impl ZkidNode {
    /// Open the store under `config.data_dir`, check it, and bootstrap the
    /// owner and default keys as configured.
    pub fn open(config: NodeConfig) -> Result<Self, NodeError> {
        check_data_dir(&config.data_dir).map_err(NodeError::Config)?;
        let store = LmdbStore::open(&config.data_dir, config.map_size_bytes())?;

        let report = check_integrity(store.env())?;
        if !report.is_healthy() {
            return Err(NodeError::Config(format!(
                "integrity check failed: {}",
                report.errors.join("; ")
            )));
        }
        info!(
            path = %config.data_dir.display(),
            databases = report.databases_checked,
            entries = report.total_entries,
            "ledger store opened"
        );

        let mut ledger = IdentityLedger::new(store, config.ledger_params())
            .with_policy(config.level_policy.build());
        ledger.subscribe(Box::new(|event| {
            debug!(event = event.name(), "ledger event");
        }));

        let node = Self {
            config,
            ledger: Arc::new(ledger),
            shutdown: ShutdownController::new(),
        };
        node.bootstrap()?;
        Ok(node)
    }

    fn bootstrap(&self) -> Result<(), NodeError> {
        if let Some(owner) = self.config.owner {
            if self.ledger.initialize(&owner)?.is_none() {
                debug!("ledger already initialized");
            }
        }

        if self.config.provision_verification_keys {
            let info = self.ledger.deployment_info()?;
            let registry_empty = info.verification_keys.iter().all(|(_, vk)| vk.is_zero());
            match info.owner {
                Some(owner) if registry_empty => {
                    self.ledger.provision_verification_keys(&owner)?;
                }
                Some(_) => debug!("verification keys already registered"),
                None => warn!("no owner; skipping verification key provisioning"),
            }
        }

        info!(
            network = self.config.network.as_str(),
            verifier = self.ledger.verifier_name(),
            policy = self.ledger.policy_name(),
            "ledger ready"
        );
        Ok(())
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Arc<IdentityLedger<LmdbStore>> {
        &self.ledger
    }

    /// A handle that stops [`run`](Self::run) or [`serve`](Self::serve).
    pub fn shutdown_handle(&self) -> ShutdownController {
        self.shutdown.clone()
    }

    /// Run until SIGINT/SIGTERM or a programmatic shutdown.
    pub async fn run(self) -> Result<(), NodeError> {
        let watcher = self.shutdown.clone();
        let signals = tokio::spawn(async move { watcher.wait_for_signal().await });

        let result = if self.config.enable_rpc {
            let listener = TcpListener::bind(("0.0.0.0", self.config.rpc_port())).await?;
            self.serve(listener).await
        } else {
            info!("RPC disabled; waiting for shutdown");
            self.shutdown.signalled().await;
            Ok(())
        };

        signals.abort();
        result
    }

    /// Serve RPC on `listener` until shutdown is triggered.
    pub async fn serve(self, listener: TcpListener) -> Result<(), NodeError> {
        let state = RpcState::new(Arc::clone(&self.ledger), self.config.outcome_cache_size)?;
        let port = listener.local_addr()?.port();
        RpcServer::new(port, Arc::new(state))
            .serve(listener, self.shutdown.signalled())
            .await?;
        info!("node stopped");
        Ok(())
    }
}
