use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub rpc: RpcConfig,
    pub gateway: GatewayConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcConfig {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Prefix substituted for `ipfs://` when rewriting metadata URIs.
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Overrides the platform-specific default location when set.
    pub path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        Ok(Config {
            rpc: RpcConfig {
                url: env::var("SEPOLIA_RPC_URL")
                    .unwrap_or_else(|_| "https://1rpc.io/sepolia".to_string()),
            },
            gateway: GatewayConfig {
                base_url: env::var("IPFS_GATEWAY_URL")
                    .unwrap_or_else(|_| "https://ipfs.io/ipfs/".to_string()),
            },
            store: StoreConfig {
                path: env::var("ADDRESS_STORE_PATH").ok().map(PathBuf::from),
            },
        })
    }
}
