//! Randomized nearby-encounter generation.

use chrono::Utc;
use rand::Rng;

use crate::biome;
use crate::constants::hunt;
use crate::types::{Encounter, GeoPoint};

/// Batch generator for nearby encounters.
///
/// Randomness comes in through the `Rng` argument so callers (and tests)
/// control the seed; everything else is a pure function of the inputs.
#[derive(Debug, Clone, Copy)]
pub struct EncounterGenerator {
    jitter_radius_deg: f64,
    min_batch: usize,
    max_batch: usize,
}

impl Default for EncounterGenerator {
    fn default() -> Self {
        Self {
            jitter_radius_deg: hunt::JITTER_RADIUS_DEG,
            min_batch: hunt::MIN_BATCH,
            max_batch: hunt::MAX_BATCH,
        }
    }
}

impl EncounterGenerator {
    pub fn jitter_radius_deg(&self) -> f64 {
        self.jitter_radius_deg
    }

    /// Inclusive bounds on the default batch size.
    pub fn batch_bounds(&self) -> (usize, usize) {
        (self.min_batch, self.max_batch)
    }

    /// Produce a batch of encounters around `origin`.
    ///
    /// Ids are drawn uniformly from `pool` with replacement, so duplicates
    /// within one batch are expected. Each record's biome is classified from
    /// its jittered location, not the origin. An empty pool yields an empty
    /// batch; when `count` is `None` the size is drawn from the configured
    /// bounds.
    pub fn generate<R: Rng>(
        &self,
        rng: &mut R,
        origin: &GeoPoint,
        pool: &[u32],
        count: Option<usize>,
    ) -> Vec<Encounter> {
        if pool.is_empty() {
            return Vec::new();
        }

        let count = count.unwrap_or_else(|| rng.gen_range(self.min_batch..=self.max_batch));
        let observed_at = Utc::now();

        (0..count)
            .map(|_| {
                let pokemon_id = pool[rng.gen_range(0..pool.len())];
                let location = self.jitter(rng, origin);
                Encounter {
                    pokemon_id,
                    biome: biome::classify(&location),
                    location,
                    observed_at,
                }
            })
            .collect()
    }

    fn jitter<R: Rng>(&self, rng: &mut R, origin: &GeoPoint) -> GeoPoint {
        let r = self.jitter_radius_deg;
        GeoPoint {
            latitude: origin.latitude + rng.gen_range(-r..=r),
            longitude: origin.longitude + rng.gen_range(-r..=r),
        }
    }
}
