//! Cache policy selection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use crate::error::StoreError;
use crate::frequency::FrequencyStore;
use crate::recency::RecencyStore;
use crate::store::CacheStore;
use crate::unbounded::UnboundedStore;

/// Default capacity for a policy-built store.
pub const DEFAULT_CAPACITY: usize = 8;

/// Error type for parsing a cache policy
#[derive(Debug, Clone)]
pub struct ParseCachePolicyError(String);

impl fmt::Display for ParseCachePolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid cache policy: {}", self.0)
    }
}

impl std::error::Error for ParseCachePolicyError {}

/// Eviction policy for cached artifacts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CachePolicy {
    /// No eviction; the declared capacity is advisory only
    #[serde(alias = "none")]
    Unbounded,
    /// Least Recently Used - evict the entry that was touched longest ago
    #[default]
    Lru,
    /// Frequency weighted - evict the entry with the lowest access count
    FrequencyWeighted,
}

impl CachePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CachePolicy::Unbounded => "unbounded",
            CachePolicy::Lru => "lru",
            CachePolicy::FrequencyWeighted => "frequency-weighted",
        }
    }

    /// Build the store implementing this policy.
    pub fn build<K, V>(
        &self,
        capacity: usize,
    ) -> Result<Box<dyn CacheStore<K, V> + Send>, StoreError>
    where
        K: Eq + Hash + Clone + Send + 'static,
        V: Clone + PartialEq + Send + 'static,
    {
        Ok(match self {
            CachePolicy::Unbounded => Box::new(UnboundedStore::new(capacity)?),
            CachePolicy::Lru => Box::new(RecencyStore::new(capacity)?),
            CachePolicy::FrequencyWeighted => Box::new(FrequencyStore::new(capacity)?),
        })
    }
}

impl FromStr for CachePolicy {
    type Err = ParseCachePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unbounded" | "none" => Ok(CachePolicy::Unbounded),
            "lru" => Ok(CachePolicy::Lru),
            "frequency-weighted" | "lfu" => Ok(CachePolicy::FrequencyWeighted),
            _ => Err(ParseCachePolicyError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_default_policy_is_lru() {
        assert_eq!(CachePolicy::default(), CachePolicy::Lru);
    }

    #[test]
    fn parses_every_policy_name() {
        assert_eq!("lru".parse::<CachePolicy>().unwrap(), CachePolicy::Lru);
        assert_eq!(
            "unbounded".parse::<CachePolicy>().unwrap(),
            CachePolicy::Unbounded
        );
        assert_eq!(
            "none".parse::<CachePolicy>().unwrap(),
            CachePolicy::Unbounded
        );
        assert_eq!(
            "frequency-weighted".parse::<CachePolicy>().unwrap(),
            CachePolicy::FrequencyWeighted
        );
        assert!("fifo".parse::<CachePolicy>().is_err());
    }

    #[test]
    fn serde_round_trips_through_kebab_case() {
        let json = serde_json::to_string(&CachePolicy::FrequencyWeighted).unwrap();
        assert_eq!(json, "\"frequency-weighted\"");
        let policy: CachePolicy = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(policy, CachePolicy::Unbounded);
    }

    #[test]
    fn build_rejects_zero_capacity() {
        assert!(CachePolicy::Lru.build::<&str, i32>(0).is_err());
    }

    #[test]
    fn built_stores_honor_their_policy() {
        let mut lru = CachePolicy::Lru.build::<&str, i32>(1).unwrap();
        lru.put("a", 1);
        lru.put("b", 2);
        assert_eq!(lru.len(), 1);

        let mut unbounded = CachePolicy::Unbounded.build::<&str, i32>(1).unwrap();
        unbounded.put("a", 1);
        unbounded.put("b", 2);
        assert_eq!(unbounded.len(), 2);
    }
}
