//! Managed artifact registry
//!
//! Wraps a policy-selected [`CacheStore`] with canonical-path keying,
//! last-access timestamps, and a pin set, so expensively-parsed artifacts
//! can be loaded lazily and written back before they leave memory.

use async_trait::async_trait;
use lodestone_store::CacheStore;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::error::RegistryError;
use crate::key::ArtifactKey;
use crate::settings::{MIN_IDLE_TIMEOUT, RegistrySettings};

/// Writes a cached artifact back to its origin before it leaves memory.
///
/// The registry never retries a failed flush; retrying is the
/// implementation's call.
#[async_trait]
pub trait FlushSink<A>: Send + Sync {
    async fn flush(&self, key: &ArtifactKey, artifact: &A) -> anyhow::Result<()>;
}

/// Cached artifact handle. Equality is pointer identity, which satisfies
/// the store's `V: PartialEq` bound without requiring it of `A`.
struct Cached<A>(Arc<A>);

impl<A> Clone for Cached<A> {
    fn clone(&self) -> Self {
        Cached(Arc::clone(&self.0))
    }
}

impl<A> PartialEq for Cached<A> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

struct Inner<A> {
    store: Box<dyn CacheStore<ArtifactKey, Cached<A>> + Send>,
    last_access: HashMap<ArtifactKey, Instant>,
    pinned: HashSet<ArtifactKey>,
    idle_timeout: Duration,
}

/// Lifecycle manager for lazily-loaded artifacts of type `A`.
///
/// All mutable state sits behind one mutex shared by the caller's request
/// path and the sweeper's background path. No operation suspends while
/// holding it: loaders and flushes always run outside the critical
/// section.
pub struct ManagedRegistry<A> {
    root: PathBuf,
    inner: Mutex<Inner<A>>,
    sink: Arc<dyn FlushSink<A>>,
}

impl<A: Send + Sync + 'static> ManagedRegistry<A> {
    pub fn new(
        root: impl Into<PathBuf>,
        settings: RegistrySettings,
        sink: Arc<dyn FlushSink<A>>,
    ) -> Result<Self, RegistryError> {
        let root = root.into();
        let store: Box<dyn CacheStore<ArtifactKey, Cached<A>> + Send> =
            settings.policy.build(settings.capacity)?;

        let mut idle_timeout = settings.idle_timeout();
        if idle_timeout < MIN_IDLE_TIMEOUT {
            warn!(
                "Configured idle timeout {:?} is below the {:?} floor, using the default",
                idle_timeout, MIN_IDLE_TIMEOUT
            );
            idle_timeout = RegistrySettings::default().idle_timeout();
        }

        let pinned: HashSet<ArtifactKey> = settings
            .pinned
            .iter()
            .map(|path| ArtifactKey::of::<A>(&root, path))
            .collect();

        info!(
            "Initializing managed registry (root: {:?}, policy: {}, capacity: {}, idle timeout: {:?})",
            root,
            settings.policy.as_str(),
            settings.capacity,
            idle_timeout
        );

        Ok(Self {
            root,
            inner: Mutex::new(Inner {
                store,
                last_access: HashMap::new(),
                pinned,
                idle_timeout,
            }),
            sink,
        })
    }

    /// Canonical key for a path relative to the registry root.
    pub fn key(&self, path: impl AsRef<Path>) -> ArtifactKey {
        ArtifactKey::of::<A>(&self.root, path)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Return the cached artifact, loading it on a miss.
    ///
    /// The loader runs outside the registry lock. When two callers race on
    /// the same key, the loser discards its result and adopts the value
    /// that won, so at most one value per key is ever cached. A loader
    /// failure propagates unchanged and mutates nothing.
    pub async fn get_or_load<F, Fut>(
        &self,
        path: impl AsRef<Path>,
        loader: F,
    ) -> Result<Arc<A>, RegistryError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<A, RegistryError>>,
    {
        let key = self.key(path);
        {
            let mut guard = self.inner.lock();
            let inner = &mut *guard;
            if let Some(cached) = inner.store.get(&key) {
                let artifact = Arc::clone(&cached.0);
                inner.last_access.insert(key, Instant::now());
                return Ok(artifact);
            }
        }

        let loaded = Arc::new(loader().await?);

        let evicted = {
            let mut guard = self.inner.lock();
            let inner = &mut *guard;
            // a concurrent load may have won while ours ran; adopt it
            if let Some(cached) = inner.store.get(&key) {
                let artifact = Arc::clone(&cached.0);
                inner.last_access.insert(key, Instant::now());
                return Ok(artifact);
            }
            debug!("Caching artifact {}", key);
            let outcome = inner.store.insert(key.clone(), Cached(Arc::clone(&loaded)));
            inner.last_access.insert(key, Instant::now());
            if let Some((victim, _)) = &outcome.evicted {
                inner.last_access.remove(victim);
            }
            outcome.evicted
        };

        if let Some((victim, value)) = evicted {
            debug!("Policy evicted {}, flushing", victim);
            if let Err(e) = self.sink.flush(&victim, &value.0).await {
                warn!("Failed to flush evicted artifact {}: {}", victim, e);
            }
        }

        Ok(loaded)
    }

    /// Pin an artifact so the idle sweeper never evicts it.
    ///
    /// Pinning is independent of residency; a key may be pinned before it
    /// is ever loaded.
    pub fn pin(&self, path: impl AsRef<Path>) {
        let key = self.key(path);
        self.inner.lock().pinned.insert(key);
    }

    /// Remove a pin; returns whether the key was pinned.
    pub fn unpin(&self, path: impl AsRef<Path>) -> bool {
        let key = self.key(path);
        self.inner.lock().pinned.remove(&key)
    }

    pub fn is_pinned(&self, path: impl AsRef<Path>) -> bool {
        let key = self.key(path);
        self.inner.lock().pinned.contains(&key)
    }

    /// Flush the cached artifact back through the sink, refreshing its
    /// timestamp. Returns `false` when the artifact is not cached.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<bool, RegistryError> {
        let key = self.key(path);
        let cached = {
            let mut guard = self.inner.lock();
            let inner = &mut *guard;
            match inner.store.get(&key) {
                Some(cached) => {
                    let value = cached.clone();
                    inner.last_access.insert(key.clone(), Instant::now());
                    Some(value)
                }
                None => None,
            }
        };
        match cached {
            Some(cached) => {
                self.sink
                    .flush(&key, &cached.0)
                    .await
                    .map_err(RegistryError::Flush)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Drop an artifact from the store, the timestamp map, and the pin
    /// set. Returns whether an artifact was actually cached.
    ///
    /// With `flush` set, the sink runs with the removed value; a flush
    /// failure is reported to the caller but never undoes the removal.
    pub async fn unload(
        &self,
        path: impl AsRef<Path>,
        flush: bool,
    ) -> Result<bool, RegistryError> {
        let key = self.key(path);
        let removed = {
            let mut guard = self.inner.lock();
            let inner = &mut *guard;
            inner.last_access.remove(&key);
            inner.pinned.remove(&key);
            inner.store.remove(&key)
        };
        match removed {
            Some(cached) => {
                debug!("Unloaded artifact {}", key);
                if flush {
                    self.sink
                        .flush(&key, &cached.0)
                        .await
                        .map_err(RegistryError::Flush)?;
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Flush every cached artifact, refreshing timestamps.
    ///
    /// One artifact's failure is logged and the iteration continues.
    /// Returns the number flushed.
    pub async fn save_all(&self) -> usize {
        let snapshot: Vec<(ArtifactKey, Cached<A>)> = {
            let mut guard = self.inner.lock();
            let inner = &mut *guard;
            let entries: Vec<_> = inner
                .store
                .entries()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();
            let now = Instant::now();
            for (key, _) in &entries {
                inner.last_access.insert(key.clone(), now);
            }
            entries
        };

        let mut flushed = 0;
        for (key, cached) in snapshot {
            match self.sink.flush(&key, &cached.0).await {
                Ok(()) => flushed += 1,
                Err(e) => warn!("Failed to flush artifact {}: {}", key, e),
            }
        }
        flushed
    }

    /// Evict every unpinned artifact idle for at least the timeout,
    /// flushing each before it is dropped. Returns the number evicted.
    ///
    /// Timestamps whose store entry is already gone are cleaned up without
    /// a flush. Running the sweep twice with no intervening access changes
    /// nothing the second time.
    pub async fn sweep(&self) -> usize {
        let victims: Vec<(ArtifactKey, Option<Cached<A>>)> = {
            let mut guard = self.inner.lock();
            let inner = &mut *guard;
            let timeout = inner.idle_timeout;
            let idle: Vec<ArtifactKey> = inner
                .last_access
                .iter()
                .filter(|(key, touched)| {
                    touched.elapsed() >= timeout && !inner.pinned.contains(key)
                })
                .map(|(key, _)| key.clone())
                .collect();
            idle.into_iter()
                .map(|key| {
                    inner.last_access.remove(&key);
                    let value = inner.store.remove(&key);
                    (key, value)
                })
                .collect()
        };

        let mut evicted = 0;
        for (key, value) in victims {
            let Some(cached) = value else {
                // the timestamp outlived a policy eviction; nothing to flush
                continue;
            };
            evicted += 1;
            debug!("Sweeping idle artifact {}", key);
            if let Err(e) = self.sink.flush(&key, &cached.0).await {
                warn!("Failed to flush swept artifact {}: {}", key, e);
            }
        }
        if evicted > 0 {
            info!("Swept {} idle artifacts", evicted);
        }
        evicted
    }

    /// Replace the idle timeout. Sub-second values are ignored with a
    /// warning, keeping the previous value.
    pub fn set_idle_timeout(&self, timeout: Duration) {
        if timeout < MIN_IDLE_TIMEOUT {
            warn!(
                "Ignoring idle timeout {:?} below the {:?} floor",
                timeout, MIN_IDLE_TIMEOUT
            );
            return;
        }
        self.inner.lock().idle_timeout = timeout;
    }

    pub fn idle_timeout(&self) -> Duration {
        self.inner.lock().idle_timeout
    }

    /// Whether the artifact is currently cached. Does not refresh access
    /// metadata.
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        let key = self.key(path);
        self.inner.lock().store.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flush everything, then drop all cached state (store, timestamps,
    /// pins). Returns the number of artifacts flushed.
    pub async fn close(&self) -> usize {
        let flushed = self.save_all().await;
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        inner.store.clear();
        inner.last_access.clear();
        inner.pinned.clear();
        flushed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodestone_store::CachePolicy;
    use std::sync::atomic::{AtomicUsize, Ordering};

    type Artifact = serde_json::Value;

    #[derive(Default)]
    struct RecordingSink {
        flushed: Mutex<Vec<ArtifactKey>>,
        fail_on: Option<&'static str>,
    }

    impl RecordingSink {
        fn failing_on(file_name: &'static str) -> Self {
            Self {
                flushed: Mutex::new(Vec::new()),
                fail_on: Some(file_name),
            }
        }

        fn flush_count(&self, registry: &ManagedRegistry<Artifact>, path: &str) -> usize {
            let key = registry.key(path);
            self.flushed.lock().iter().filter(|k| **k == key).count()
        }

        fn total(&self) -> usize {
            self.flushed.lock().len()
        }
    }

    #[async_trait]
    impl FlushSink<Artifact> for RecordingSink {
        async fn flush(&self, key: &ArtifactKey, _artifact: &Artifact) -> anyhow::Result<()> {
            if let Some(name) = self.fail_on {
                if key.path().ends_with(name) {
                    anyhow::bail!("flush rejected for {}", key);
                }
            }
            self.flushed.lock().push(key.clone());
            Ok(())
        }
    }

    fn settings(policy: CachePolicy, capacity: usize) -> RegistrySettings {
        RegistrySettings {
            policy,
            capacity,
            idle_timeout_ms: 1_000,
            sweep_interval_ms: 1_000,
            pinned: Vec::new(),
        }
    }

    fn registry_with_sink(
        policy: CachePolicy,
        capacity: usize,
        sink: RecordingSink,
    ) -> (Arc<ManagedRegistry<Artifact>>, Arc<RecordingSink>) {
        let sink = Arc::new(sink);
        let registry =
            ManagedRegistry::new("/data", settings(policy, capacity), sink.clone()).unwrap();
        (Arc::new(registry), sink)
    }

    fn registry(
        policy: CachePolicy,
        capacity: usize,
    ) -> (Arc<ManagedRegistry<Artifact>>, Arc<RecordingSink>) {
        registry_with_sink(policy, capacity, RecordingSink::default())
    }

    async fn load(registry: &ManagedRegistry<Artifact>, path: &str, value: i64) -> Arc<Artifact> {
        registry
            .get_or_load(path, || async move {
                Ok::<_, RegistryError>(serde_json::json!({ "value": value }))
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn a_second_load_hits_the_cache() {
        let (registry, _) = registry(CachePolicy::Lru, 4);
        let calls = AtomicUsize::new(0);
        for _ in 0..2 {
            registry
                .get_or_load("db.yml", || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Ok::<_, RegistryError>(serde_json::json!(1)) }
                })
                .await
                .unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn relative_spellings_share_one_entry() {
        let (registry, _) = registry(CachePolicy::Lru, 4);
        load(&registry, "conf/../db.yml", 1).await;
        let calls = AtomicUsize::new(0);
        registry
            .get_or_load("db.yml", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok::<_, RegistryError>(serde_json::json!(2)) }
            })
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn a_loader_failure_mutates_nothing() {
        let (registry, sink) = registry(CachePolicy::Lru, 4);
        let err = registry
            .get_or_load("broken.json", || async {
                Err::<Artifact, _>(RegistryError::Load(anyhow::anyhow!("disk gone")))
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::Load(_)));
        assert!(registry.is_empty());
        assert_eq!(sink.total(), 0);
    }

    #[tokio::test]
    async fn an_unknown_format_propagates_unchanged() {
        let (registry, _) = registry(CachePolicy::Lru, 4);
        let err = registry
            .get_or_load("legacy.ini", || async {
                let format = crate::format::ArtifactFormat::from_path("/data/legacy.ini")?;
                Ok(serde_json::json!(format.as_str()))
            })
            .await
            .unwrap_err();
        match err {
            RegistryError::UnknownFormat(path) => {
                assert_eq!(path, PathBuf::from("/data/legacy.ini"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn a_policy_eviction_flushes_the_victim() {
        let (registry, sink) = registry(CachePolicy::Lru, 1);
        load(&registry, "a.yml", 1).await;
        load(&registry, "b.yml", 2).await;
        assert!(!registry.contains("a.yml"));
        assert!(registry.contains("b.yml"));
        assert_eq!(sink.flush_count(&registry, "a.yml"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn an_evicted_victim_leaves_no_stale_timestamp() {
        let (registry, sink) = registry(CachePolicy::Lru, 1);
        load(&registry, "a.yml", 1).await;
        load(&registry, "b.yml", 2).await; // evicts and flushes a
        tokio::time::advance(Duration::from_millis(1_500)).await;
        assert_eq!(registry.sweep().await, 1); // only b
        assert_eq!(sink.flush_count(&registry, "a.yml"), 1);
        assert_eq!(sink.flush_count(&registry, "b.yml"), 1);
    }

    #[tokio::test]
    async fn the_registry_recency_matches_the_store_policy() {
        let (registry, _) = registry(CachePolicy::Lru, 2);
        load(&registry, "a.yml", 1).await;
        load(&registry, "b.yml", 2).await;
        load(&registry, "a.yml", 0).await; // hit refreshes recency
        load(&registry, "c.yml", 3).await;
        assert!(registry.contains("a.yml"));
        assert!(!registry.contains("b.yml"));
        assert!(registry.contains("c.yml"));
    }

    #[tokio::test(start_paused = true)]
    async fn an_idle_artifact_is_swept_and_flushed_once() {
        let (registry, sink) = registry(CachePolicy::Lru, 4);
        load(&registry, "cfg.yml", 1).await;
        tokio::time::advance(Duration::from_millis(1_500)).await;
        assert_eq!(registry.sweep().await, 1);
        assert!(!registry.contains("cfg.yml"));
        assert_eq!(sink.flush_count(&registry, "cfg.yml"), 1);
        // idempotent: nothing left to sweep
        assert_eq!(registry.sweep().await, 0);
        assert_eq!(sink.total(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn a_recent_read_defers_the_sweep() {
        let (registry, _) = registry(CachePolicy::Lru, 4);
        load(&registry, "cfg.yml", 1).await;
        tokio::time::advance(Duration::from_millis(600)).await;
        load(&registry, "cfg.yml", 0).await; // hit refreshes the timestamp
        tokio::time::advance(Duration::from_millis(600)).await;
        assert_eq!(registry.sweep().await, 0);
        assert!(registry.contains("cfg.yml"));
    }

    #[tokio::test(start_paused = true)]
    async fn pinned_artifacts_survive_the_sweep() {
        let (registry, sink) = registry(CachePolicy::Lru, 4);
        load(&registry, "config.yml", 1).await;
        registry.pin("config.yml");
        tokio::time::advance(Duration::from_millis(1_500)).await;
        assert_eq!(registry.sweep().await, 0);
        assert!(registry.contains("config.yml"));

        assert!(registry.unpin("config.yml"));
        assert_eq!(registry.sweep().await, 1);
        assert!(!registry.contains("config.yml"));
        assert_eq!(sink.flush_count(&registry, "config.yml"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn the_seed_pin_list_takes_effect_at_startup() {
        let sink = Arc::new(RecordingSink::default());
        let registry: Arc<ManagedRegistry<Artifact>> = Arc::new(
            ManagedRegistry::new(
                "/data",
                RegistrySettings {
                    pinned: vec![PathBuf::from("config.yml")],
                    ..settings(CachePolicy::Lru, 4)
                },
                sink.clone(),
            )
            .unwrap(),
        );
        assert!(registry.is_pinned("config.yml"));
        load(&registry, "config.yml", 1).await;
        load(&registry, "other.yml", 2).await;
        tokio::time::advance(Duration::from_millis(1_500)).await;
        assert_eq!(registry.sweep().await, 1);
        assert!(registry.contains("config.yml"));
        assert!(!registry.contains("other.yml"));
    }

    #[tokio::test]
    async fn pinning_works_before_the_first_load() {
        let (registry, _) = registry(CachePolicy::Lru, 4);
        registry.pin("later.yml");
        assert!(registry.is_pinned("later.yml"));
        assert!(!registry.contains("later.yml"));
    }

    #[tokio::test]
    async fn save_all_isolates_a_failing_entry() {
        let (registry, sink) =
            registry_with_sink(CachePolicy::Lru, 4, RecordingSink::failing_on("bad.json"));
        load(&registry, "good.json", 1).await;
        load(&registry, "bad.json", 2).await;
        load(&registry, "other.yml", 3).await;
        assert_eq!(registry.save_all().await, 2);
        assert_eq!(sink.flush_count(&registry, "good.json"), 1);
        assert_eq!(sink.flush_count(&registry, "other.yml"), 1);
    }

    #[tokio::test]
    async fn a_failed_flush_still_unloads() {
        let (registry, sink) =
            registry_with_sink(CachePolicy::Lru, 4, RecordingSink::failing_on("bad.json"));
        load(&registry, "bad.json", 1).await;
        let err = registry.unload("bad.json", true).await.unwrap_err();
        assert!(matches!(err, RegistryError::Flush(_)));
        assert!(!registry.contains("bad.json"));
        assert_eq!(sink.total(), 0);
    }

    #[tokio::test]
    async fn unload_without_flush_skips_the_sink() {
        let (registry, sink) = registry(CachePolicy::Lru, 4);
        load(&registry, "a.yml", 1).await;
        assert!(registry.unload("a.yml", false).await.unwrap());
        assert_eq!(sink.total(), 0);
        assert!(!registry.unload("a.yml", false).await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn an_explicit_save_refreshes_the_timestamp() {
        let (registry, sink) = registry(CachePolicy::Lru, 4);
        load(&registry, "cfg.yml", 1).await;
        tokio::time::advance(Duration::from_millis(800)).await;
        assert!(registry.save("cfg.yml").await.unwrap());
        assert_eq!(sink.flush_count(&registry, "cfg.yml"), 1);
        tokio::time::advance(Duration::from_millis(800)).await;
        assert_eq!(registry.sweep().await, 0);
        tokio::time::advance(Duration::from_millis(800)).await;
        assert_eq!(registry.sweep().await, 1);
    }

    #[tokio::test]
    async fn saving_an_uncached_artifact_is_a_no_op() {
        let (registry, sink) = registry(CachePolicy::Lru, 4);
        assert!(!registry.save("missing.yml").await.unwrap());
        assert_eq!(sink.total(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn racing_loads_share_one_cached_value() {
        let (registry, _) = registry(CachePolicy::Lru, 4);
        let (first, second) = tokio::join!(
            registry.get_or_load("db.yml", || async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                Ok::<_, RegistryError>(serde_json::json!(1))
            }),
            registry.get_or_load("db.yml", || async {
                tokio::time::sleep(Duration::from_millis(80)).await;
                Ok::<_, RegistryError>(serde_json::json!(2))
            }),
        );
        assert!(Arc::ptr_eq(&first.unwrap(), &second.unwrap()));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn sub_second_timeouts_are_ignored() {
        let (registry, _) = registry(CachePolicy::Lru, 4);
        let before = registry.idle_timeout();
        registry.set_idle_timeout(Duration::from_millis(500));
        assert_eq!(registry.idle_timeout(), before);
        registry.set_idle_timeout(Duration::from_secs(5));
        assert_eq!(registry.idle_timeout(), Duration::from_secs(5));
    }

    #[tokio::test]
    async fn a_sub_second_configured_timeout_falls_back_to_the_default() {
        let sink = Arc::new(RecordingSink::default());
        let registry: ManagedRegistry<Artifact> = ManagedRegistry::new(
            "/data",
            RegistrySettings {
                idle_timeout_ms: 10,
                ..settings(CachePolicy::Lru, 4)
            },
            sink,
        )
        .unwrap();
        assert_eq!(registry.idle_timeout(), Duration::from_secs(30 * 60));
    }

    #[tokio::test]
    async fn frequency_policy_keeps_the_hot_entry() {
        let (registry, _) = registry(CachePolicy::FrequencyWeighted, 2);
        load(&registry, "a.yml", 1).await;
        load(&registry, "b.yml", 2).await;
        load(&registry, "a.yml", 0).await; // a: 2 hits
        load(&registry, "c.yml", 3).await;
        assert!(registry.contains("a.yml"));
        assert!(!registry.contains("b.yml"));
        assert!(registry.contains("c.yml"));
    }

    #[tokio::test]
    async fn close_flushes_and_drops_everything() {
        let (registry, sink) = registry(CachePolicy::Lru, 4);
        load(&registry, "a.yml", 1).await;
        load(&registry, "b.yml", 2).await;
        registry.pin("a.yml");
        assert_eq!(registry.close().await, 2);
        assert!(registry.is_empty());
        assert!(!registry.is_pinned("a.yml"));
        assert_eq!(sink.total(), 2);
    }
}
