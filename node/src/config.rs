//! Node configuration with TOML file support.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use zkid_types::{AccountAddress, LedgerParams, NetworkId, VerificationLevel};
use zkid_verification::{AttributeCountPolicy, LevelPolicy, ManualLevelPolicy};

use crate::logging::LogFormat;
use crate::NodeError;

/// How verification levels move when attributes are verified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LevelPolicyConfig {
    /// Levels change only through `update_verification_level`.
    #[default]
    Manual,
    /// Raise the level once enough attributes are verified.
    AttributeCount { enhanced_at: usize, premium_at: usize },
}

impl LevelPolicyConfig {
    pub fn build(&self) -> Box<dyn LevelPolicy> {
        match *self {
            Self::Manual => Box::new(ManualLevelPolicy),
            Self::AttributeCount {
                enhanced_at,
                premium_at,
            } => Box::new(AttributeCountPolicy {
                enhanced_at,
                premium_at,
            }),
        }
    }
}

/// Configuration for a ZKID node.
///
/// Can be loaded from a TOML file via [`NodeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Which deployment this node serves.
    #[serde(default = "default_network")]
    pub network: NetworkId,

    /// Data directory for ledger storage.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// LMDB map size in MiB.
    #[serde(default = "default_map_size_mb")]
    pub map_size_mb: usize,

    /// Whether to serve RPC.
    #[serde(default = "default_true")]
    pub enable_rpc: bool,

    /// RPC port. Defaults to the network's port.
    #[serde(default)]
    pub rpc_port: Option<u16>,

    /// How many submitted call outcomes the RPC keeps for `receipt`.
    #[serde(default = "default_outcome_cache_size")]
    pub outcome_cache_size: usize,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Owner installed on first start. Ignored once the ledger is initialized.
    #[serde(default)]
    pub owner: Option<AccountAddress>,

    /// Register the default key for every attribute when the registry is empty.
    #[serde(default)]
    pub provision_verification_keys: bool,

    /// Level given to a freshly registered identity.
    #[serde(default = "default_registration_level")]
    pub registration_level: VerificationLevel,

    /// Tolerated certificate timestamp skew into the future, in seconds.
    #[serde(default = "default_clock_skew_secs")]
    pub clock_skew_secs: u64,

    /// Tolerated distance between a signed call's timestamp and node time.
    #[serde(default = "default_call_time_tolerance_secs")]
    pub call_time_tolerance_secs: u64,

    /// Certificates older than this are rejected. Unset means no limit.
    #[serde(default)]
    pub certificate_max_age_secs: Option<u64>,

    #[serde(default)]
    pub level_policy: LevelPolicyConfig,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_network() -> NetworkId {
    NetworkId::Dev
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./zkid_data")
}

fn default_map_size_mb() -> usize {
    1024
}

fn default_true() -> bool {
    true
}

fn default_outcome_cache_size() -> usize {
    4096
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_registration_level() -> VerificationLevel {
    LedgerParams::default().registration_level
}

fn default_clock_skew_secs() -> u64 {
    LedgerParams::default().clock_skew_secs
}

fn default_call_time_tolerance_secs() -> u64 {
    LedgerParams::default().call_time_tolerance_secs
}

// ── Impl ───────────────────────────────────────────────────────────────

impl NodeConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, NodeError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| NodeError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, NodeError> {
        toml::to_string_pretty(self).map_err(|e| NodeError::Config(e.to_string()))
    }

    pub fn rpc_port(&self) -> u16 {
        self.rpc_port
            .unwrap_or_else(|| self.network.default_rpc_port())
    }

    pub fn map_size_bytes(&self) -> usize {
        self.map_size_mb.saturating_mul(1024 * 1024)
    }

    /// Ledger parameters this configuration describes.
    pub fn ledger_params(&self) -> LedgerParams {
        LedgerParams {
            network: self.network,
            registration_level: self.registration_level,
            clock_skew_secs: self.clock_skew_secs,
            call_time_tolerance_secs: self.call_time_tolerance_secs,
            certificate_max_age_secs: self.certificate_max_age_secs,
        }
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            network: default_network(),
            data_dir: default_data_dir(),
            map_size_mb: default_map_size_mb(),
            enable_rpc: default_true(),
            rpc_port: None,
            outcome_cache_size: default_outcome_cache_size(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            owner: None,
            provision_verification_keys: false,
            registration_level: default_registration_level(),
            clock_skew_secs: default_clock_skew_secs(),
            call_time_tolerance_secs: default_call_time_tolerance_secs(),
            certificate_max_age_secs: None,
            level_policy: LevelPolicyConfig::default(),
        }
    }
}
