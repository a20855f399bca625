//! The account fetch boundary.
//!
//! The resolver only needs "bytes at this address, or nothing"; everything
//! else about the transport (timeouts, retries, envelope deserialization) is
//! the fetcher's problem. [`RpcAccountFetcher`] is the production
//! implementation over a Solana JSON-RPC endpoint; tests substitute their own
//! [`AccountFetcher`].

use async_trait::async_trait;
use solana_account::Account;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_commitment_config::CommitmentConfig;
use solana_pubkey::Pubkey;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Transport-level fetch failure (network, timeout, malformed RPC envelope).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("account fetch failed: {0}")]
pub struct FetchError(pub String);

/// Fetches raw account data at an address.
///
/// Returns `Ok(None)` when no account exists at the address, and an error
/// only for transport failure.
#[async_trait]
pub trait AccountFetcher: Send + Sync {
    async fn fetch_account(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, FetchError>;
}

#[async_trait]
impl<F: AccountFetcher> AccountFetcher for Arc<F> {
    async fn fetch_account(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, FetchError> {
        (**self).fetch_account(address).await
    }
}

/// [`AccountFetcher`] backed by a Solana JSON-RPC endpoint.
#[derive(Clone)]
pub struct RpcAccountFetcher {
    rpc_client: Arc<RpcClient>,
    commitment: CommitmentConfig,
}

impl Debug for RpcAccountFetcher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcAccountFetcher")
            .field("rpc_url", &self.rpc_client.url())
            .field("commitment", &self.commitment)
            .finish()
    }
}

impl RpcAccountFetcher {
    pub fn new(rpc_url: String) -> Self {
        Self::with_commitment(rpc_url, CommitmentConfig::confirmed())
    }

    pub fn with_commitment(rpc_url: String, commitment: CommitmentConfig) -> Self {
        Self {
            rpc_client: Arc::new(RpcClient::new(rpc_url)),
            commitment,
        }
    }
}

#[async_trait]
impl AccountFetcher for RpcAccountFetcher {
    async fn fetch_account(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, FetchError> {
        let response = self
            .rpc_client
            .get_account_with_commitment(address, self.commitment)
            .await
            .map_err(|e| FetchError(format!("{e}")))?;
        let account: Option<Account> = response.value;
        Ok(account.map(|account| account.data))
    }
}
