//! TTL cache over the catalog source.
//!
//! Serves reads from the key-value store while fresh; on a miss or a stale
//! entry it fetches from the source and overwrites the entry wholesale. A
//! failed refresh surfaces the error — stale data is never substituted.
//!
//! Concurrent `get`s for the same id are not deduplicated: each proceeds
//! independently and the last writer wins in the store. Callers that need
//! single-flight behavior wrap this cache themselves.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use crate::constants::cache as cache_cfg;
use crate::error::CatalogError;
use crate::poke_api::CatalogSource;
use crate::store::KvStore;
use crate::types::{CachedEntry, PokemonSummary};

/// Clock capability, injected so tests steer time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Catalog lookups with bounded staleness.
pub struct CatalogCache<S, K, C = SystemClock> {
    source: S,
    store: K,
    clock: C,
    max_id: u32,
    ttl: Duration,
}

impl<S: CatalogSource, K: KvStore> CatalogCache<S, K> {
    pub fn new(source: S, store: K, max_id: u32) -> Self {
        Self::with_clock(source, store, SystemClock, max_id)
    }
}

impl<S: CatalogSource, K: KvStore, C: Clock> CatalogCache<S, K, C> {
    pub fn with_clock(source: S, store: K, clock: C, max_id: u32) -> Self {
        Self {
            source,
            store,
            clock,
            max_id,
            ttl: Duration::milliseconds(cache_cfg::TTL_MS),
        }
    }

    /// Look up one entry, hitting the remote source only when the cached
    /// copy is absent or older than the TTL.
    pub async fn get(&self, id: u32) -> Result<PokemonSummary, CatalogError> {
        if id == 0 || id > self.max_id {
            return Err(CatalogError::InvalidId(id, self.max_id));
        }

        if let Some(entry) = self.read_fresh(id) {
            log::debug!("[cache] hit for #{id}");
            return Ok(entry.pokemon);
        }

        let pokemon = self.source.fetch_by_id(id).await?;
        self.store_entry(&pokemon);
        Ok(pokemon)
    }

    /// Free-text lookup.
    ///
    /// Numeric queries inside the id range go through [`get`](Self::get);
    /// anything else is an exact-name fetch. Not-found is an empty list, not
    /// an error; transport and shape failures still propagate.
    pub async fn search(&self, query: &str) -> Result<Vec<PokemonSummary>, CatalogError> {
        let query = query.trim();

        if let Ok(id) = query.parse::<u32>() {
            if id >= 1 && id <= self.max_id {
                return match self.get(id).await {
                    Ok(pokemon) => Ok(vec![pokemon]),
                    Err(CatalogError::NotFound) => Ok(Vec::new()),
                    Err(e) => Err(e),
                };
            }
        }

        match self.source.fetch_by_name(query).await {
            Ok(pokemon) => {
                self.store_entry(&pokemon);
                Ok(vec![pokemon])
            }
            Err(CatalogError::NotFound) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    fn entry_key(id: u32) -> String {
        format!("{}_{id}", cache_cfg::ENTRY_KEY_PREFIX)
    }

    /// Stored entry for `id`, if present and still inside the TTL window.
    ///
    /// Store errors and undecodable entries count as misses.
    fn read_fresh(&self, id: u32) -> Option<CachedEntry> {
        let key = Self::entry_key(id);

        let bytes = match self.store.read(&key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("[cache] read failed for {key}: {e}");
                return None;
            }
        };

        let entry: CachedEntry = match serde_json::from_slice(&bytes) {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("[cache] dropping undecodable entry {key}: {e}");
                return None;
            }
        };

        if self.clock.now() - entry.fetched_at < self.ttl {
            Some(entry)
        } else {
            None
        }
    }

    /// Overwrite the stored entry wholesale.
    ///
    /// Write failures are logged, not surfaced: the caller already holds the
    /// fresh payload. `fetched_at` never moves backward for an id.
    fn store_entry(&self, pokemon: &PokemonSummary) {
        let key = Self::entry_key(pokemon.id);

        let mut fetched_at = self.clock.now();
        if let Ok(Some(bytes)) = self.store.read(&key) {
            if let Ok(prev) = serde_json::from_slice::<CachedEntry>(&bytes) {
                fetched_at = fetched_at.max(prev.fetched_at);
            }
        }

        let entry = CachedEntry {
            pokemon: pokemon.clone(),
            fetched_at,
        };
        match serde_json::to_vec(&entry) {
            Ok(bytes) => {
                if let Err(e) = self.store.write(&key, &bytes) {
                    log::warn!("[cache] write failed for {key}: {e}");
                }
            }
            Err(e) => log::warn!("[cache] could not encode entry {key}: {e}"),
        }
    }
}
