//! Configuration for the payment requirement resolver.

use serde::{Deserialize, Deserializer};
use solana_pubkey::{Pubkey, pubkey};
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// The well-known payment requirement program.
pub const DEFAULT_PROGRAM_ID: Pubkey = pubkey!("Av711Vs3V9i8NzxQTBycWjNpkhqFLt4Ww2faEXFhVaQ5");

/// Resolver configuration.
///
/// Fields use serde defaults that fall back to environment variables, then to
/// hardcoded defaults, so an empty JSON object is a valid config.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolverConfig {
    /// JSON-RPC endpoint the resolver fetches accounts from.
    #[serde(default = "config_defaults::default_rpc_url")]
    pub rpc_url: Url,
    /// Program the requirement accounts are derived under, as base58 text.
    #[serde(
        default = "config_defaults::default_program_id",
        deserialize_with = "pubkey_from_base58"
    )]
    pub program_id: Pubkey,
    /// How long a decoded requirement is served from cache.
    #[serde(default = "config_defaults::default_cache_ttl_ms")]
    pub cache_ttl_ms: u64,
}

impl ResolverConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            rpc_url: config_defaults::default_rpc_url(),
            program_id: config_defaults::default_program_id(),
            cache_ttl_ms: config_defaults::default_cache_ttl_ms(),
        }
    }
}

fn pubkey_from_base58<'de, D>(deserializer: D) -> Result<Pubkey, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Pubkey::from_str(&s).map_err(serde::de::Error::custom)
}

pub mod config_defaults {
    use super::DEFAULT_PROGRAM_ID;
    use solana_pubkey::Pubkey;
    use std::env;
    use url::Url;

    pub const DEFAULT_CACHE_TTL_MS: u64 = 30_000;
    pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

    /// Default RPC URL with fallback: $RPC_URL env var -> Solana mainnet.
    pub fn default_rpc_url() -> Url {
        env::var("RPC_URL")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| DEFAULT_RPC_URL.parse().unwrap())
    }

    pub fn default_program_id() -> Pubkey {
        DEFAULT_PROGRAM_ID
    }

    pub fn default_cache_ttl_ms() -> u64 {
        DEFAULT_CACHE_TTL_MS
    }
}
