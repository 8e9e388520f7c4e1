//! Application constants
//!
//! Centralized constants for the catalog API, cache policy, and encounter
//! generation used throughout the application.

/// Remote catalog API
pub mod api {
    /// Default base URL for the public catalog API
    pub const BASE_URL: &str = "https://pokeapi.co/api/v2";

    /// Default highest catalog id served
    ///
    /// Keeps the initial id pool small; the full catalog is much larger.
    pub const POKEMON_LIMIT: u32 = 200;

    /// Default remote fetch timeout (milliseconds)
    pub const FETCH_TIMEOUT_MS: u64 = 10_000;
}

/// Catalog cache policy
pub mod cache {
    /// Storage key prefix for cached catalog entries
    pub const ENTRY_KEY_PREFIX: &str = "pokemon_cache";

    /// How long a cached entry stays fresh (milliseconds)
    ///
    /// Fixed policy, not tunable per call: a stale entry always refetches.
    pub const TTL_MS: i64 = 24 * 60 * 60 * 1000;
}

/// Encounter generation
pub mod hunt {
    /// Smallest batch generated per location fix
    pub const MIN_BATCH: usize = 3;

    /// Largest batch generated per location fix
    pub const MAX_BATCH: usize = 5;

    /// Uniform jitter applied to each axis of the reference coordinate (degrees)
    ///
    /// ±0.005° is roughly half a kilometer of latitude: close enough to walk
    /// to, far enough to spread the markers out.
    pub const JITTER_RADIUS_DEG: f64 = 0.005;
}

/// User-facing message strings
pub mod messages {
    /// Notification title when a hunt scout finds a non-empty batch
    pub const DISCOVERY_TITLE: &str = "Pokemon Nearby!";
}
