//! Lodestone cache stores
//!
//! Capacity-bounded key/value stores with interchangeable eviction
//! policies: unbounded (advisory capacity), recency-based (LRU), and
//! frequency-weighted. The lifecycle layer in `lodestone-registry` picks
//! one through [`CachePolicy`] and drives it behind the [`CacheStore`]
//! trait.

pub mod error;
pub mod frequency;
pub mod policy;
pub mod recency;
pub mod store;
pub mod unbounded;

pub use error::StoreError;
pub use frequency::FrequencyStore;
pub use policy::{CachePolicy, DEFAULT_CAPACITY, ParseCachePolicyError};
pub use recency::RecencyStore;
pub use store::{CacheStore, Insertion};
pub use unbounded::UnboundedStore;
