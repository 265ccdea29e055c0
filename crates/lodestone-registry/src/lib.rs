//! Lodestone managed artifact registry
//!
//! Lifecycle management for lazily-loaded, expensively-parsed artifacts:
//! canonical-path keying over a policy-selected cache store, last-access
//! timestamps with idle-timeout sweeping, and pinning so frequently-needed
//! entries survive automatic eviction.

pub mod error;
pub mod format;
pub mod key;
pub mod registry;
pub mod settings;
pub mod sweeper;

pub use error::RegistryError;
pub use format::{ArtifactFormat, ParseArtifactFormatError};
pub use key::{ArtifactKey, canonical_path};
pub use registry::{FlushSink, ManagedRegistry};
pub use settings::{MIN_IDLE_TIMEOUT, RegistrySettings};
pub use sweeper::IdleSweeper;
