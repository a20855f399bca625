//! TTL-bounded memoization of decoded payment requirements.
//!
//! Not a store of record: entries are replaced wholesale on the next
//! successful resolution and expire lazily. An expired entry stays in place
//! until overwritten; lookup simply reports a miss. There is no size bound —
//! key cardinality is bounded by the set of `(subject, category)` pairs in
//! active use.

use dashmap::DashMap;
use std::time::{Duration, Instant};

use crate::types::PaymentRequirement;

/// Composite cache key over a subject address and a category label.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct CacheKey {
    subject: String,
    category: String,
}

impl CacheKey {
    pub fn new(subject: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            category: category.into(),
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    requirement: PaymentRequirement,
    expires_at: Instant,
}

/// Concurrent requirement cache with a fixed TTL.
///
/// `DashMap` gives atomic per-key replacement, which is all the concurrency
/// the replace-wholesale entry lifecycle needs; concurrent writers for the
/// same key simply overwrite each other and the last put wins.
#[derive(Debug)]
pub struct RequirementCache {
    entries: DashMap<CacheKey, CacheEntry>,
    ttl: Duration,
}

impl RequirementCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached requirement if present and not yet expired.
    pub fn get(&self, key: &CacheKey) -> Option<PaymentRequirement> {
        self.get_at(key, Instant::now())
    }

    /// Stores `requirement` under `key`, stamped to expire one TTL from now.
    /// Unconditionally overwrites any existing entry.
    pub fn put(&self, key: CacheKey, requirement: PaymentRequirement) {
        self.put_at(key, requirement, Instant::now());
    }

    /// Drops all entries.
    pub fn clear(&self) {
        self.entries.clear();
    }

    fn get_at(&self, key: &CacheKey, now: Instant) -> Option<PaymentRequirement> {
        let entry = self.entries.get(key)?;
        if now < entry.expires_at {
            Some(entry.requirement.clone())
        } else {
            // Stale; left in place until the next put for this key.
            None
        }
    }

    fn put_at(&self, key: CacheKey, requirement: PaymentRequirement, now: Instant) {
        self.entries.insert(
            key,
            CacheEntry {
                requirement,
                expires_at: now + self.ttl,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TokenAmount;

    fn requirement(amount: u64) -> PaymentRequirement {
        PaymentRequirement {
            pay_to: "8qbHbw2BbbTHBW1sbeqakYXVKRQM8Ne7pLK7m6CVfeR".to_string(),
            amount: TokenAmount::from(amount),
            asset: "4vJ9JU1bJJE96FWSJKvHsmmFADCg4gpZQff4P3bkLKi".to_string(),
            active: true,
        }
    }

    #[test]
    fn serves_hit_before_ttl_and_miss_after() {
        let cache = RequirementCache::new(Duration::from_millis(30_000));
        let key = CacheKey::new("subject", "api");
        let t0 = Instant::now();
        cache.put_at(key.clone(), requirement(1), t0);

        let just_before = t0 + Duration::from_millis(29_999);
        assert_eq!(cache.get_at(&key, just_before), Some(requirement(1)));

        let just_after = t0 + Duration::from_millis(30_001);
        assert_eq!(cache.get_at(&key, just_after), None);
    }

    #[test]
    fn expired_entry_is_left_in_place_and_overwritten_by_put() {
        let cache = RequirementCache::new(Duration::from_millis(10));
        let key = CacheKey::new("subject", "api");
        let t0 = Instant::now();
        cache.put_at(key.clone(), requirement(1), t0);
        assert_eq!(cache.get_at(&key, t0 + Duration::from_millis(20)), None);
        assert_eq!(cache.entries.len(), 1);

        let t1 = t0 + Duration::from_millis(30);
        cache.put_at(key.clone(), requirement(2), t1);
        assert_eq!(cache.get_at(&key, t1), Some(requirement(2)));
        assert_eq!(cache.entries.len(), 1);
    }

    #[test]
    fn keys_isolate_subject_and_category() {
        let cache = RequirementCache::new(Duration::from_secs(30));
        let now = Instant::now();
        cache.put_at(CacheKey::new("subject-a", "a"), requirement(1), now);
        cache.put_at(CacheKey::new("subject-a", "b"), requirement(2), now);
        cache.put_at(CacheKey::new("subject-b", "a"), requirement(3), now);

        assert_eq!(
            cache.get_at(&CacheKey::new("subject-a", "a"), now),
            Some(requirement(1))
        );
        assert_eq!(
            cache.get_at(&CacheKey::new("subject-a", "b"), now),
            Some(requirement(2))
        );
        assert_eq!(
            cache.get_at(&CacheKey::new("subject-b", "a"), now),
            Some(requirement(3))
        );
        assert_eq!(cache.get_at(&CacheKey::new("subject-b", "b"), now), None);
    }

    #[test]
    fn clear_drops_all_entries() {
        let cache = RequirementCache::new(Duration::from_secs(30));
        cache.put(CacheKey::new("subject", "api"), requirement(1));
        cache.clear();
        assert_eq!(cache.get(&CacheKey::new("subject", "api")), None);
        assert_eq!(cache.entries.len(), 0);
    }
}
