use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::biome::Biome;

/// Normalized catalog record kept for one Pokemon.
///
/// This is the shape the app works with; the remote API's superset JSON is
/// reduced to it at fetch time. The cache treats it as opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,
    pub height: u32,
    pub weight: u32,
    pub base_experience: Option<u32>,
    pub sprite_url: Option<String>,
    pub artwork_url: Option<String>,
    pub flavor_text: String,
}

/// A cached catalog record plus the timestamp of its last successful fetch.
///
/// Entries are overwritten wholesale on refresh; `fetched_at` never moves
/// backward for an id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedEntry {
    pub pokemon: PokemonSummary,
    pub fetched_at: DateTime<Utc>,
}

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// One generated nearby encounter.
///
/// `pokemon_id` is a weak reference into the caller-supplied id pool;
/// resolving it to display details goes through the catalog cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    pub pokemon_id: u32,
    pub location: GeoPoint,
    pub biome: Biome,
    pub observed_at: DateTime<Utc>,
}

/// Discovery, badge, and points state for one trainer.
///
/// Owned by the caller (the identity store is external); the badge rules
/// only read and bump these counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerProfile {
    pub uid: String,
    pub discovered_pokemon: Vec<u32>,
    pub badges: Vec<String>,
    pub points: u32,
    pub created_at: DateTime<Utc>,
}

impl TrainerProfile {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            discovered_pokemon: Vec::new(),
            badges: Vec::new(),
            points: 0,
            created_at: Utc::now(),
        }
    }
}
