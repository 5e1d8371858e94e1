// wordwarden-core/src/cache.rs
//! Time-bounded caching of compiled rule sets.
//!
//! Fetching and compiling a community's rules on every message would swamp
//! the store; caching them forever would make rule edits invisible. The
//! [`RuleCache`] sits between: snapshots live for a TTL, saves invalidate
//! explicitly, and concurrent rebuilds for one community coalesce into a
//! single store load.
//!
//! An invalidate racing an in-flight rebuild stores that rebuild's result;
//! the data was read after the prior write began, which the load/save
//! contract tolerates.
//!
//! License: MIT OR APACHE 2.0

use async_trait::async_trait;
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};

use crate::config::{CommunityId, FilterConfig};
use crate::patterns::compiler;
use crate::ruleset::RuleSet;

/// Default time-to-live for cached rule sets.
pub const RULE_CACHE_TTL: Duration = Duration::from_secs(300);

/// Source of truth for a community's rule configuration.
///
/// Missing configuration should come back as an empty collection rather than
/// an error; errors are for the store actually failing.
#[async_trait]
pub trait RuleStore: Send + Sync {
    async fn load(&self, community: CommunityId) -> anyhow::Result<FilterConfig>;
}

struct CacheEntry {
    rules: Arc<RuleSet>,
    built_at: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.built_at.elapsed() < ttl
    }
}

/// Keeps per-community compiled rule sets fresh without rebuilding on every
/// message. Entries are immutable snapshots replaced wholesale on refresh;
/// holders of an old `Arc` keep a consistent view.
pub struct RuleCache {
    store: Arc<dyn RuleStore>,
    ttl: Duration,
    entries: RwLock<HashMap<CommunityId, CacheEntry>>,
    /// One build lock per community so concurrent misses coalesce into a
    /// single store load.
    build_locks: Mutex<HashMap<CommunityId, Arc<Mutex<()>>>>,
}

impl RuleCache {
    pub fn new(store: Arc<dyn RuleStore>) -> Self {
        Self::with_ttl(store, RULE_CACHE_TTL)
    }

    pub fn with_ttl(store: Arc<dyn RuleStore>, ttl: Duration) -> Self {
        Self {
            store,
            ttl,
            entries: RwLock::new(HashMap::new()),
            build_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the community's rule set, rebuilding through the store when
    /// the cached snapshot is missing or older than the TTL.
    ///
    /// Infallible: when a rebuild fails, the previous snapshot is served if
    /// one exists (stale rules beat no rules), otherwise an empty set. The
    /// failure is logged and retried on the next expired `get`.
    pub async fn get(&self, community: CommunityId) -> Arc<RuleSet> {
        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(&community) {
                if entry.is_fresh(self.ttl) {
                    return Arc::clone(&entry.rules);
                }
            }
        }

        let build_lock = self.build_lock_for(community).await;
        let _guard = build_lock.lock().await;

        // Another caller may have finished the rebuild while we waited.
        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(&community) {
                if entry.is_fresh(self.ttl) {
                    return Arc::clone(&entry.rules);
                }
            }
        }

        self.rebuild(community).await
    }

    /// Forgets a community's snapshot; the next `get` reloads from the
    /// store. Collaborators that save rule changes must call this before
    /// considering the write complete.
    pub async fn invalidate(&self, community: CommunityId) {
        self.entries.write().await.remove(&community);
        debug!("Invalidated cached rules for community {}", community);
    }

    /// Drops expired snapshots and expired synthesized patterns. A memory
    /// bound for long-running hosts; correctness never depends on it.
    pub async fn sweep(&self) {
        let ttl = self.ttl;
        self.entries.write().await.retain(|_, entry| entry.is_fresh(ttl));
        compiler::purge_expired();
    }

    async fn rebuild(&self, community: CommunityId) -> Arc<RuleSet> {
        match self.store.load(community).await {
            Ok(config) => {
                let rules = Arc::new(RuleSet::compile(&config));
                debug!(
                    "Rebuilt rules for community {}: {} term(s), {} rule(s)",
                    community,
                    rules.term_count(),
                    rules.rule_count()
                );
                let mut entries = self.entries.write().await;
                entries.insert(
                    community,
                    CacheEntry { rules: Arc::clone(&rules), built_at: Instant::now() },
                );
                rules
            }
            Err(e) => {
                warn!("Rule store failed for community {}: {:#}", community, e);
                let entries = self.entries.read().await;
                match entries.get(&community) {
                    // Stale rules beat no rules; the entry stays expired so
                    // the next get retries the store.
                    Some(entry) => Arc::clone(&entry.rules),
                    None => Arc::new(RuleSet::empty()),
                }
            }
        }
    }

    async fn build_lock_for(&self, community: CommunityId) -> Arc<Mutex<()>> {
        let mut locks = self.build_locks.lock().await;
        let lock = locks.entry(community).or_insert_with(|| Arc::new(Mutex::new(())));
        Arc::clone(lock)
    }
}
