// wordwarden-core/tests/rule_cache_tests.rs
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use wordwarden_core::cache::{RuleCache, RuleStore};
use wordwarden_core::config::{CommunityId, FilterConfig};
use wordwarden_core::engine::FilterEngine;

/// A store whose contents and behavior the test scripts: rules can be swapped
/// out, loads counted, failures injected, and latency simulated.
struct ScriptedStore {
    loads: AtomicUsize,
    fail: AtomicBool,
    delay: Duration,
    config: Mutex<FilterConfig>,
}

impl ScriptedStore {
    fn new(rules_json: &str) -> Result<Arc<Self>> {
        Self::with_delay(rules_json, Duration::ZERO)
    }

    fn with_delay(rules_json: &str, delay: Duration) -> Result<Arc<Self>> {
        Ok(Arc::new(Self {
            loads: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
            delay,
            config: Mutex::new(FilterConfig::from_json_str(rules_json)?),
        }))
    }

    fn set_rules(&self, rules_json: &str) -> Result<()> {
        *self.config.lock().unwrap() = FilterConfig::from_json_str(rules_json)?;
        Ok(())
    }

    fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }

    fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RuleStore for ScriptedStore {
    async fn load(&self, _community: CommunityId) -> anyhow::Result<FilterConfig> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("store offline");
        }
        Ok(self.config.lock().unwrap().clone())
    }
}

const COMMUNITY: CommunityId = CommunityId(42);

#[tokio::test]
async fn test_engine_filters_through_cached_rules() -> Result<()> {
    let store = ScriptedStore::new(r#"{"heck": ["hell"]}"#)?;
    let engine = FilterEngine::new(RuleCache::new(store.clone()));

    let outcome = engine.filter_message(COMMUNITY, "hell no").await;
    assert_eq!(outcome.filtered, "heck no");

    let outcome = engine.filter_message(COMMUNITY, "oh hell").await;
    assert_eq!(outcome.filtered, "oh heck");
    assert_eq!(store.loads(), 1);
    Ok(())
}

#[tokio::test]
async fn test_invalidate_picks_up_rule_changes() -> Result<()> {
    let store = ScriptedStore::new(r#"{"heck": ["hell"]}"#)?;
    let engine = FilterEngine::new(RuleCache::new(store.clone()));

    let outcome = engine.filter_message(COMMUNITY, "hell and damn").await;
    assert_eq!(outcome.filtered, "heck and damn");

    store.set_rules(r#"{"heck": ["hell"], "darn": ["damn"]}"#)?;

    // The cached snapshot is still fresh, so the new rule is invisible.
    let outcome = engine.filter_message(COMMUNITY, "hell and damn").await;
    assert_eq!(outcome.filtered, "heck and damn");

    engine.cache().invalidate(COMMUNITY).await;
    let outcome = engine.filter_message(COMMUNITY, "hell and damn").await;
    assert_eq!(outcome.filtered, "heck and darn");
    assert_eq!(store.loads(), 2);
    Ok(())
}

#[tokio::test]
async fn test_failed_reload_serves_stale_rules() -> Result<()> {
    let store = ScriptedStore::new(r#"{"heck": ["hell"]}"#)?;
    let engine = FilterEngine::new(RuleCache::with_ttl(
        store.clone(),
        Duration::from_millis(5),
    ));

    let outcome = engine.filter_message(COMMUNITY, "hell").await;
    assert_eq!(outcome.filtered, "heck");

    store.set_failing(true);
    tokio::time::sleep(Duration::from_millis(20)).await;

    // The snapshot is expired and the store is down; the old rules still apply.
    let outcome = engine.filter_message(COMMUNITY, "hell").await;
    assert_eq!(outcome.filtered, "heck");
    assert_eq!(store.loads(), 2);

    // Once the store recovers, the next expired read picks up its contents.
    store.set_failing(false);
    store.set_rules(r#"{"darn": ["damn"]}"#)?;
    let outcome = engine.filter_message(COMMUNITY, "hell and damn").await;
    assert_eq!(outcome.filtered, "hell and darn");
    assert_eq!(store.loads(), 3);
    Ok(())
}

#[tokio::test]
async fn test_missing_rules_filter_nothing() -> Result<()> {
    let store = ScriptedStore::new("{}")?;
    let engine = FilterEngine::new(RuleCache::new(store.clone()));

    let outcome = engine.filter_message(COMMUNITY, "hell and damn").await;
    assert!(!outcome.changed());
    assert!(outcome.matches.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_concurrent_misses_share_one_load() -> Result<()> {
    let store = ScriptedStore::with_delay(r#"{"heck": ["hell"]}"#, Duration::from_millis(50))?;
    let engine = FilterEngine::new(RuleCache::new(store.clone()));

    let (a, b, c) = tokio::join!(
        engine.filter_message(COMMUNITY, "hell"),
        engine.filter_message(COMMUNITY, "hell"),
        engine.filter_message(COMMUNITY, "hell"),
    );
    assert_eq!(a.filtered, "heck");
    assert_eq!(b.filtered, "heck");
    assert_eq!(c.filtered, "heck");
    assert_eq!(store.loads(), 1);
    Ok(())
}

#[tokio::test]
async fn test_communities_are_cached_independently() -> Result<()> {
    let store = ScriptedStore::new(r#"{"heck": ["hell"]}"#)?;
    let cache = RuleCache::new(store.clone());

    cache.get(CommunityId(1)).await;
    cache.get(CommunityId(2)).await;
    cache.get(CommunityId(1)).await;
    assert_eq!(store.loads(), 2);

    cache.invalidate(CommunityId(1)).await;
    cache.get(CommunityId(2)).await;
    assert_eq!(store.loads(), 2);
    cache.get(CommunityId(1)).await;
    assert_eq!(store.loads(), 3);
    Ok(())
}
