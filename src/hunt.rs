//! Hunt session: regenerates the nearby-encounter batch per location fix.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::constants::messages;
use crate::encounter::EncounterGenerator;
use crate::notify::{discovery_message, NotificationSink};
use crate::types::{Encounter, GeoPoint};

/// One hunt over a fixed id pool.
///
/// The session owns its RNG so consecutive scouts draw from one stream; the
/// location provider feeding `scout` stays external.
pub struct HuntSession<N> {
    pool: Vec<u32>,
    generator: EncounterGenerator,
    rng: SmallRng,
    notifier: N,
    encounters: Vec<Encounter>,
}

impl<N: NotificationSink> HuntSession<N> {
    pub fn new(pool: Vec<u32>, notifier: N) -> Self {
        Self::with_rng(pool, notifier, SmallRng::from_entropy())
    }

    pub fn with_rng(pool: Vec<u32>, notifier: N, rng: SmallRng) -> Self {
        Self {
            pool,
            generator: EncounterGenerator::default(),
            rng,
            notifier,
            encounters: Vec::new(),
        }
    }

    /// The current batch; superseded wholesale by the next scout.
    pub fn encounters(&self) -> &[Encounter] {
        &self.encounters
    }

    /// Regenerate the batch around a fresh location fix.
    ///
    /// A non-empty batch fires one notification through the sink.
    pub fn scout(&mut self, origin: &GeoPoint, count: Option<usize>) -> &[Encounter] {
        let batch = self
            .generator
            .generate(&mut self.rng, origin, &self.pool, count);

        if !batch.is_empty() {
            self.notifier
                .notify(messages::DISCOVERY_TITLE, &discovery_message(batch.len()));
        }

        self.encounters = batch;
        &self.encounters
    }
}
