//! Catalog cache tests - TTL policy, failure propagation, search semantics.
//!
//! The cache runs against a scripted source, an in-memory store, and a
//! manual clock, so no test touches the network or real time.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use pokehunt::cache::{CatalogCache, Clock};
use pokehunt::error::CatalogError;
use pokehunt::poke_api::CatalogSource;
use pokehunt::store::MemoryStore;
use pokehunt::types::PokemonSummary;

const MAX_ID: u32 = 200;

fn sample(id: u32, name: &str) -> PokemonSummary {
    PokemonSummary {
        id,
        name: name.to_string(),
        types: vec!["electric".to_string()],
        height: 4,
        weight: 60,
        base_experience: Some(112),
        sprite_url: Some(format!("https://example.test/{id}.png")),
        artwork_url: None,
        flavor_text: "It keeps its tail raised to monitor its surroundings.".to_string(),
    }
}

/// Scripted catalog source: serves `pikachu` as #25, counts every remote
/// call, and can be flipped to fail at the transport level.
struct ScriptedSource {
    id_calls: AtomicUsize,
    name_calls: AtomicUsize,
    fail: bool,
}

impl ScriptedSource {
    fn new() -> Self {
        Self {
            id_calls: AtomicUsize::new(0),
            name_calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    fn id_calls(&self) -> usize {
        self.id_calls.load(Ordering::SeqCst)
    }

    fn name_calls(&self) -> usize {
        self.name_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogSource for ScriptedSource {
    async fn fetch_by_id(&self, id: u32) -> Result<PokemonSummary, CatalogError> {
        self.id_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(CatalogError::Transport("connection refused".into()));
        }
        if id == 25 {
            Ok(sample(25, "pikachu"))
        } else {
            Err(CatalogError::NotFound)
        }
    }

    async fn fetch_by_name(&self, name: &str) -> Result<PokemonSummary, CatalogError> {
        self.name_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(CatalogError::Transport("connection refused".into()));
        }
        if name == "pikachu" {
            Ok(sample(25, "pikachu"))
        } else {
            Err(CatalogError::NotFound)
        }
    }

    async fn fetch_id_pool(&self, limit: u32) -> Result<Vec<u32>, CatalogError> {
        Ok((1..=limit).collect())
    }
}

struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    fn new() -> Self {
        Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()),
        }
    }

    fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

type TestCache = CatalogCache<Arc<ScriptedSource>, Arc<MemoryStore>, Arc<ManualClock>>;

fn test_cache() -> (TestCache, Arc<ScriptedSource>, Arc<MemoryStore>, Arc<ManualClock>) {
    let source = Arc::new(ScriptedSource::new());
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new());
    let cache = CatalogCache::with_clock(source.clone(), store.clone(), clock.clone(), MAX_ID);
    (cache, source, store, clock)
}

#[tokio::test]
async fn second_get_within_ttl_skips_remote() {
    let (cache, source, _store, _clock) = test_cache();

    let first = cache.get(25).await.unwrap();
    assert_eq!(source.id_calls(), 1);

    let second = cache.get(25).await.unwrap();
    assert_eq!(source.id_calls(), 1, "fresh entry must not refetch");
    assert_eq!(first, second, "cache hit must return the stored payload");
}

#[tokio::test]
async fn stale_entry_triggers_exactly_one_refetch() {
    let (cache, source, _store, clock) = test_cache();

    cache.get(25).await.unwrap();
    assert_eq!(source.id_calls(), 1);

    // Just inside the 24 h window: still a hit.
    clock.advance(Duration::hours(23));
    cache.get(25).await.unwrap();
    assert_eq!(source.id_calls(), 1);

    // Past it: exactly one refetch, then fresh again.
    clock.advance(Duration::hours(2));
    cache.get(25).await.unwrap();
    assert_eq!(source.id_calls(), 2);
    cache.get(25).await.unwrap();
    assert_eq!(source.id_calls(), 2);
}

#[tokio::test]
async fn failed_fetch_propagates_and_leaves_store_empty() {
    let source = Arc::new(ScriptedSource::failing());
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new());
    let cache = CatalogCache::with_clock(source.clone(), store.clone(), clock, MAX_ID);

    let err = cache.get(25).await.unwrap_err();
    assert!(matches!(err, CatalogError::Transport(_)));
    assert!(store.is_empty(), "no partial write on failure");
    assert_eq!(source.id_calls(), 1);
}

#[tokio::test]
async fn stale_data_is_not_served_when_refresh_fails() {
    let (cache, _source, store, clock) = test_cache();
    cache.get(25).await.unwrap();

    // Swap in a failing source behind the same store.
    let failing = Arc::new(ScriptedSource::failing());
    let cache = CatalogCache::with_clock(failing, store, clock.clone(), MAX_ID);

    clock.advance(Duration::hours(25));
    let err = cache.get(25).await.unwrap_err();
    assert!(matches!(err, CatalogError::Transport(_)));
}

#[tokio::test]
async fn invalid_ids_are_rejected_without_io() {
    let (cache, source, _store, _clock) = test_cache();

    assert!(matches!(
        cache.get(0).await.unwrap_err(),
        CatalogError::InvalidId(0, MAX_ID)
    ));
    assert!(matches!(
        cache.get(MAX_ID + 1).await.unwrap_err(),
        CatalogError::InvalidId(_, MAX_ID)
    ));
    assert_eq!(source.id_calls(), 0);
}

#[tokio::test]
async fn numeric_search_delegates_to_the_cache() {
    let (cache, source, _store, _clock) = test_cache();

    let results = cache.search("25").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, 25);
    assert_eq!(source.id_calls(), 1);
    assert_eq!(source.name_calls(), 0);

    // Second numeric search is a cache hit.
    cache.search(" 25 ").await.unwrap();
    assert_eq!(source.id_calls(), 1);
}

#[tokio::test]
async fn numeric_search_for_missing_id_is_empty_not_error() {
    let (cache, _source, _store, _clock) = test_cache();
    let results = cache.search("7").await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn name_search_returns_single_match_and_caches_it() {
    let (cache, source, _store, _clock) = test_cache();

    let results = cache.search("pikachu").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "pikachu");
    assert_eq!(source.name_calls(), 1);

    // The name hit was written through; a get for the id stays local.
    cache.get(25).await.unwrap();
    assert_eq!(source.id_calls(), 0);
}

#[tokio::test]
async fn unknown_name_search_is_empty_not_error() {
    let (cache, _source, _store, _clock) = test_cache();
    let results = cache.search("missingno").await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn name_search_transport_failure_is_an_error() {
    let source = Arc::new(ScriptedSource::failing());
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new());
    let cache = CatalogCache::with_clock(source, store, clock, MAX_ID);

    let err = cache.search("missingno").await.unwrap_err();
    assert!(matches!(err, CatalogError::Transport(_)));
}

#[tokio::test]
async fn out_of_range_numeric_query_falls_through_to_name_lookup() {
    let (cache, source, _store, _clock) = test_cache();

    let results = cache.search("9999").await.unwrap();
    assert!(results.is_empty());
    assert_eq!(source.id_calls(), 0);
    assert_eq!(source.name_calls(), 1);
}
