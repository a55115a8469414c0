//! ZKID daemon: entry point for running a ledger node.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use zkid_node::{init_logging, LogFormat, NodeConfig, ZkidNode};
use zkid_types::{AccountAddress, NetworkId};

#[derive(Parser)]
#[command(name = "zkid-daemon", about = "ZKID identity ledger daemon")]
struct Cli {
    /// Network to serve: "live", "test", or "dev".
    /// When a config file is provided, defaults to the file's network value.
    #[arg(long, env = "ZKID_NETWORK")]
    network: Option<NetworkId>,

    /// Data directory for ledger storage.
    #[arg(long, env = "ZKID_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Disable the RPC server.
    #[arg(long, env = "ZKID_DISABLE_RPC")]
    no_rpc: bool,

    /// RPC server port (defaults to the network's port).
    #[arg(long, env = "ZKID_RPC_PORT")]
    rpc_port: Option<u16>,

    /// Owner account installed on first start.
    #[arg(long, env = "ZKID_OWNER")]
    owner: Option<AccountAddress>,

    /// Register the default verification keys when none are set.
    #[arg(long, env = "ZKID_PROVISION_KEYS")]
    provision_keys: bool,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "ZKID_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "ZKID_LOG_FORMAT")]
    log_format: Option<String>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "ZKID_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Node operations.
    #[command(name = "node")]
    Node {
        #[command(subcommand)]
        action: NodeAction,
    },
    /// Verification key registry.
    #[command(name = "keys")]
    Keys {
        #[command(subcommand)]
        action: KeysAction,
    },
    /// Print the deployment summary of the local ledger as JSON.
    Inspect,
    /// Generate an account key pair.
    Keygen {
        /// 32-byte hex seed for a reproducible key.
        #[arg(long)]
        seed: Option<String>,
    },
}

#[derive(clap::Subcommand)]
enum NodeAction {
    /// Run the node.
    Run,
}

#[derive(clap::Subcommand)]
enum KeysAction {
    /// Register the default key for every attribute.
    Provision,
}

impl Cli {
    /// File config (or defaults) with CLI flags and env vars layered on top.
    fn node_config(&self) -> anyhow::Result<NodeConfig> {
        let mut config = match &self.config {
            Some(path) => NodeConfig::from_toml_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => NodeConfig::default(),
        };
        if let Some(network) = self.network {
            config.network = network;
        }
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if self.no_rpc {
            config.enable_rpc = false;
        }
        if self.rpc_port.is_some() {
            config.rpc_port = self.rpc_port;
        }
        if self.owner.is_some() {
            config.owner = self.owner;
        }
        if self.provision_keys {
            config.provision_verification_keys = true;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.log_format = format.parse::<LogFormat>()?;
        }
        Ok(config)
    }
}

fn keygen(seed: Option<&str>) -> anyhow::Result<()> {
    let keypair = match seed {
        Some(seed) => {
            let bytes: [u8; 32] = hex::decode(seed)
                .context("seed is not hex")?
                .try_into()
                .map_err(|_| anyhow::anyhow!("seed must be 32 bytes"))?;
            zkid_crypto::keypair_from_seed(&bytes)
        }
        None => zkid_crypto::generate_keypair(),
    };
    println!("address:     {}", zkid_crypto::derive_address(&keypair.public));
    println!("public key:  {}", keypair.public);
    println!("private key: {}", hex::encode(keypair.private.0));
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Command::Keygen { seed } = &cli.command {
        return keygen(seed.as_deref());
    }

    let mut config = cli.node_config()?;
    init_logging(config.log_format, &config.log_level)?;

    match cli.command {
        Command::Node {
            action: NodeAction::Run,
        } => {
            let rpc = if config.enable_rpc {
                config.rpc_port().to_string()
            } else {
                "off".into()
            };
            tracing::info!(
                network = config.network.as_str(),
                data_dir = %config.data_dir.display(),
                %rpc,
                "starting ZKID node"
            );
            ZkidNode::open(config)?.run().await?;
            tracing::info!("ZKID daemon exited cleanly");
        }
        Command::Keys {
            action: KeysAction::Provision,
        } => {
            config.provision_verification_keys = true;
            let node = ZkidNode::open(config)?;
            let info = node.ledger().deployment_info()?;
            for (attribute, vk) in info.verification_keys {
                println!("{attribute:?}: {vk}");
            }
        }
        Command::Inspect => {
            config.owner = None;
            config.provision_verification_keys = false;
            let node = ZkidNode::open(config)?;
            let info = node.ledger().deployment_info()?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Command::Keygen { .. } => {}
    }

    Ok(())
}
