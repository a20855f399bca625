//! Derivation of payment requirement storage addresses.
//!
//! A requirement account lives at the program-derived address of
//! `[REQUIREMENT_SEED_TAG, subject bytes, category seed]`. Seed order is a
//! contract with the on-chain producer of these accounts: reordering or
//! omitting a segment derives a different address and resolves to "not found"
//! rather than an error.

use once_cell::sync::Lazy;
use solana_pubkey::Pubkey;
use std::collections::HashMap;
use std::str::FromStr;

/// Constant first seed segment identifying the record kind.
pub const REQUIREMENT_SEED_TAG: &[u8] = b"payreq";

/// Canonical seed strings for the well-known categories. Unknown category
/// names pass through as their own literal text, so new categories resolve
/// without a code change here.
static CATEGORY_SEEDS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("default", "default"),
        ("api", "api"),
        ("a2a", "a2a"),
        ("agent", "a2a"),
        ("mcp", "mcp"),
    ])
});

/// Returns the canonical seed string for a category label.
pub fn category_seed(category: &str) -> &str {
    CATEGORY_SEEDS.get(category).copied().unwrap_or(category)
}

/// Address derivation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocateError {
    /// The subject is not a valid base58-encoded 32-byte address.
    #[error("invalid subject address `{0}`: {1}")]
    InvalidSubject(String, String),
    /// No off-curve address exists for the given seeds.
    #[error("no derivable address for subject {0}, category {1}")]
    NoDerivableAddress(String, String),
}

/// Derives the storage address for `(subject, category)` under `program_id`.
pub fn requirement_address(
    program_id: &Pubkey,
    subject: &str,
    category: &str,
) -> Result<Pubkey, LocateError> {
    let subject_key = Pubkey::from_str(subject)
        .map_err(|e| LocateError::InvalidSubject(subject.to_string(), format!("{e}")))?;
    let seed = category_seed(category);
    let (address, _bump) = Pubkey::try_find_program_address(
        &[REQUIREMENT_SEED_TAG, subject_key.as_ref(), seed.as_bytes()],
        program_id,
    )
    .ok_or_else(|| LocateError::NoDerivableAddress(subject.to_string(), category.to_string()))?;
    Ok(address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_PROGRAM_ID;

    fn subject() -> String {
        Pubkey::new_from_array([7u8; 32]).to_string()
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = requirement_address(&DEFAULT_PROGRAM_ID, &subject(), "api").unwrap();
        let b = requirement_address(&DEFAULT_PROGRAM_ID, &subject(), "api").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn categories_derive_distinct_addresses() {
        let api = requirement_address(&DEFAULT_PROGRAM_ID, &subject(), "api").unwrap();
        let a2a = requirement_address(&DEFAULT_PROGRAM_ID, &subject(), "a2a").unwrap();
        assert_ne!(api, a2a);
    }

    #[test]
    fn alias_maps_to_canonical_seed() {
        let agent = requirement_address(&DEFAULT_PROGRAM_ID, &subject(), "agent").unwrap();
        let a2a = requirement_address(&DEFAULT_PROGRAM_ID, &subject(), "a2a").unwrap();
        assert_eq!(agent, a2a);
    }

    #[test]
    fn unknown_category_passes_through_as_literal_seed() {
        assert_eq!(category_seed("streaming"), "streaming");
        let derived = requirement_address(&DEFAULT_PROGRAM_ID, &subject(), "streaming").unwrap();
        let subject_key = Pubkey::from_str(&subject()).unwrap();
        let (expected, _) = Pubkey::try_find_program_address(
            &[REQUIREMENT_SEED_TAG, subject_key.as_ref(), b"streaming"],
            &DEFAULT_PROGRAM_ID,
        )
        .unwrap();
        assert_eq!(derived, expected);
    }

    #[test]
    fn malformed_subject_is_an_error() {
        let err = requirement_address(&DEFAULT_PROGRAM_ID, "not-a-pubkey!", "api").unwrap_err();
        assert!(matches!(err, LocateError::InvalidSubject(..)));
        let err = requirement_address(&DEFAULT_PROGRAM_ID, "abc", "api").unwrap_err();
        assert!(matches!(err, LocateError::InvalidSubject(..)));
    }
}
