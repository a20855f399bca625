//! Resolution of on-chain payment requirement records.
//!
//! A payment requirement is an append-only, binary-encoded account stored at a
//! deterministically derived program address. Given a subject address (for
//! example a token identity) and a category label, this crate derives the
//! storage address, fetches the raw account bytes over RPC, decodes the
//! fixed-layout account data, and returns a normalized, text-addressed view to
//! the calling payment gate. Results are memoized with a bounded TTL.
//!
//! # Overview
//!
//! The resolution pipeline is: cache probe → address derivation → account
//! fetch → binary decode → base58 rendering. Every failure along the pipeline
//! is handled fail-soft: [`RequirementResolver::resolve`] returns `None` and
//! emits a structured diagnostic event instead of propagating an error, so a
//! payment gate degrades to "deny access" when on-chain state is unreachable
//! or undecodable.
//!
//! # Modules
//!
//! - [`b58`] — base58 rendering of 32-byte on-chain identifiers.
//! - [`cache`] — TTL-bounded memoization of decoded requirements.
//! - [`config`] — Resolver configuration (RPC endpoint, program id, TTL).
//! - [`decode`] — Fixed-layout account data decoding.
//! - [`fetch`] — The [`AccountFetcher`](fetch::AccountFetcher) boundary and
//!   its RPC-backed implementation.
//! - [`locate`] — Category seed table and storage address derivation.
//! - [`resolver`] — The [`RequirementResolver`] orchestration.
//! - [`types`] — The caller-facing [`PaymentRequirement`] record.
//!
//! # Example
//!
//! ```ignore
//! let config = ResolverConfig::default();
//! let resolver = RequirementResolver::from_config(&config);
//! let requirement = resolver.resolve("So11111111111111111111111111111111111111112", "api").await;
//! ```

pub mod b58;
pub mod cache;
pub mod config;
pub mod decode;
pub mod fetch;
pub mod locate;
pub mod resolver;
pub mod types;

pub use config::ResolverConfig;
pub use resolver::{DEFAULT_CATEGORY, RequirementResolver};
pub use types::PaymentRequirement;
