//! Orchestration of the resolution pipeline.

use solana_pubkey::Pubkey;
use std::time::Duration;

use crate::cache::{CacheKey, RequirementCache};
use crate::config::ResolverConfig;
use crate::decode::{DecodeError, decode_requirement};
use crate::fetch::{AccountFetcher, FetchError, RpcAccountFetcher};
use crate::locate::{LocateError, requirement_address};
use crate::types::PaymentRequirement;

/// Category used by [`RequirementResolver::resolve_default`].
pub const DEFAULT_CATEGORY: &str = "default";

/// Why a single resolution attempt failed.
///
/// Never escapes [`RequirementResolver::resolve`]; kept as a distinct type so
/// failure reasons stay inspectable in tests and diagnostics instead of being
/// collapsed into a bare `None` internally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The derived address holds no account.
    #[error("no payment requirement account at {0}")]
    NotFound(Pubkey),
    /// The account data did not decode.
    #[error(transparent)]
    Malformed(#[from] DecodeError),
    /// The fetch collaborator failed.
    #[error(transparent)]
    Transport(#[from] FetchError),
    /// The storage address could not be derived.
    #[error(transparent)]
    Derivation(#[from] LocateError),
}

/// Resolves payment requirements for `(subject, category)` pairs.
///
/// One resolver owns one cache, constructed once per configured endpoint and
/// shared by reference across callers. Concurrent misses for the same key race
/// independently to fetch and decode; the last cache put wins. That is safe
/// (decoding is a pure function of immutable remote state) but not
/// throughput-optimal under cold-cache load.
#[derive(Debug)]
pub struct RequirementResolver<F = RpcAccountFetcher> {
    program_id: Pubkey,
    fetcher: F,
    cache: RequirementCache,
}

impl RequirementResolver<RpcAccountFetcher> {
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new(
            config.program_id,
            RpcAccountFetcher::new(config.rpc_url.to_string()),
            config.cache_ttl(),
        )
    }
}

impl<F: AccountFetcher> RequirementResolver<F> {
    pub fn new(program_id: Pubkey, fetcher: F, cache_ttl: Duration) -> Self {
        Self {
            program_id,
            fetcher,
            cache: RequirementCache::new(cache_ttl),
        }
    }

    /// Resolves the payment requirement for `subject` under `category`.
    ///
    /// Fail-soft: every failure (derivation, transport, missing account,
    /// undecodable data) is reported as a structured diagnostic event and
    /// returned as `None`, never raised. Callers that need resilience
    /// re-invoke after the cache TTL has passed.
    pub async fn resolve(&self, subject: &str, category: &str) -> Option<PaymentRequirement> {
        let key = CacheKey::new(subject, category);
        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(subject, category, "Payment requirement served from cache");
            return Some(hit);
        }
        match self.resolve_uncached(subject, category).await {
            Ok(requirement) => {
                self.cache.put(key, requirement.clone());
                Some(requirement)
            }
            Err(error) => {
                tracing::warn!(
                    subject,
                    category,
                    error = %error,
                    "Failed to resolve payment requirement"
                );
                None
            }
        }
    }

    /// [`resolve`](Self::resolve) under [`DEFAULT_CATEGORY`].
    pub async fn resolve_default(&self, subject: &str) -> Option<PaymentRequirement> {
        self.resolve(subject, DEFAULT_CATEGORY).await
    }

    /// Drops every cached requirement, forcing the next resolution of each
    /// key to fetch afresh.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    async fn resolve_uncached(
        &self,
        subject: &str,
        category: &str,
    ) -> Result<PaymentRequirement, ResolveError> {
        let address = requirement_address(&self.program_id, subject, category)?;
        let data = self
            .fetcher
            .fetch_account(&address)
            .await?
            .ok_or(ResolveError::NotFound(address))?;
        let decoded = decode_requirement(&data)?;
        tracing::debug!(
            subject,
            category,
            address = %address,
            amount = decoded.amount,
            active = decoded.active,
            "Resolved payment requirement"
        );
        Ok(decoded.into())
    }
}
