//! Deterministic environment classification for encounter flavor.

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::GeoPoint;

/// Closed set of environment tags a location can classify into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Biome {
    Urban,
    Rural,
    Water,
    Forest,
    Mountain,
    Desert,
}

impl Biome {
    pub const ALL: [Biome; 6] = [
        Biome::Urban,
        Biome::Rural,
        Biome::Water,
        Biome::Forest,
        Biome::Mountain,
        Biome::Desert,
    ];

    /// Pokemon type names that flavor encounters in this biome.
    pub fn type_affinities(self) -> &'static [&'static str] {
        match self {
            Biome::Urban => &["normal", "electric", "steel", "poison"],
            Biome::Rural => &["normal", "grass", "bug", "flying"],
            Biome::Water => &["water", "ice", "flying"],
            Biome::Forest => &["grass", "bug", "flying", "normal"],
            Biome::Mountain => &["rock", "ground", "fighting"],
            Biome::Desert => &["ground", "rock", "fire"],
        }
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Biome::Urban => "urban",
            Biome::Rural => "rural",
            Biome::Water => "water",
            Biome::Forest => "forest",
            Biome::Mountain => "mountain",
            Biome::Desert => "desert",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for Biome {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "urban" => Ok(Biome::Urban),
            "rural" => Ok(Biome::Rural),
            "water" => Ok(Biome::Water),
            "forest" => Ok(Biome::Forest),
            "mountain" => Ok(Biome::Mountain),
            "desert" => Ok(Biome::Desert),
            _ => Err(anyhow!("unknown biome '{s}'")),
        }
    }
}

/// Map a location to a biome.
///
/// Pure and deterministic: the same coordinate always yields the same tag.
/// The heuristic buckets on the fractional part of each axis; a real map
/// source (reverse geocoding, elevation) would slot in behind the same
/// signature.
pub fn classify(location: &GeoPoint) -> Biome {
    let lat_frac = location.latitude.fract().abs();
    let lon_frac = location.longitude.fract().abs();

    if lat_frac < 0.1 {
        Biome::Water
    } else if lon_frac < 0.1 {
        Biome::Forest
    } else if lat_frac > 0.85 && lon_frac > 0.85 {
        Biome::Mountain
    } else if lon_frac > 0.85 {
        Biome::Desert
    } else if location.latitude > 0.0 {
        Biome::Urban
    } else {
        Biome::Rural
    }
}

/// Type-affinity lookup by tag name.
///
/// Unknown names fall back to the rural set.
pub fn type_affinities_for(name: &str) -> &'static [&'static str] {
    name.parse::<Biome>()
        .map(Biome::type_affinities)
        .unwrap_or(Biome::Rural.type_affinities())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint {
            latitude,
            longitude,
        }
    }

    #[test]
    fn classify_is_deterministic() {
        let loc = point(37.7749, -122.4194);
        assert_eq!(classify(&loc), classify(&loc));
    }

    #[test]
    fn every_biome_is_reachable() {
        assert_eq!(classify(&point(10.05, 20.5)), Biome::Water);
        assert_eq!(classify(&point(10.5, 20.05)), Biome::Forest);
        assert_eq!(classify(&point(10.9, 20.9)), Biome::Mountain);
        assert_eq!(classify(&point(10.5, 20.9)), Biome::Desert);
        assert_eq!(classify(&point(10.5, 20.5)), Biome::Urban);
        assert_eq!(classify(&point(-10.5, 20.5)), Biome::Rural);
    }

    #[test]
    fn southern_water_still_classifies_as_water() {
        assert_eq!(classify(&point(-33.02, 151.5)), Biome::Water);
    }

    #[test]
    fn affinities_are_never_empty() {
        for biome in Biome::ALL {
            assert!(!biome.type_affinities().is_empty(), "{biome} has no types");
        }
    }

    #[test]
    fn unknown_tag_falls_back_to_rural() {
        assert_eq!(
            type_affinities_for("volcano"),
            Biome::Rural.type_affinities()
        );
        assert_eq!(type_affinities_for("water"), Biome::Water.type_affinities());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for biome in Biome::ALL {
            assert_eq!(biome.to_string().parse::<Biome>().unwrap(), biome);
        }
    }
}
