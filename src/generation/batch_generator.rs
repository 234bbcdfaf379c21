//! Batch profile generator
//!
//! Materializes a whole batch of profiles before anything is written.

use rand::Rng;
use tracing::{debug, info, instrument};

use crate::profile::{Profile, ProfileBuilder};

/// Produces ordered batches of independent profiles
#[derive(Debug, Clone)]
pub struct BatchGenerator {
    builder: ProfileBuilder,
}

impl BatchGenerator {
    /// Create a batch generator around a profile builder
    pub fn new(builder: ProfileBuilder) -> Self {
        Self { builder }
    }

    /// Profile builder used for every record
    pub fn builder(&self) -> &ProfileBuilder {
        &self.builder
    }

    /// Generate exactly `count` profiles in generation order
    ///
    /// Records share nothing but the random source, which is consumed in
    /// record order.
    #[instrument(skip(self, rng), fields(kinds = self.builder.kinds().len()))]
    pub fn generate<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Profile> {
        let mut batch = Vec::with_capacity(count);
        for index in 0..count {
            batch.push(self.builder.build(rng));
            if (index + 1) % 100_000 == 0 {
                debug!("Generated {} of {} profiles", index + 1, count);
            }
        }

        info!("Generated {} profiles", batch.len());
        batch
    }
}
