//! Simulation context - the seeded randomness of one run.

use crate::keys::SeedDeriver;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Owns every source of randomness in a run.
///
/// - A ChaCha8 stream for population-level draws (construction, hours, GPA)
/// - A [`SeedDeriver`] for the per-student streams used by the major resolver
///
/// The two are seeded from separate derivations of the master seed, so
/// adding resolver draws never shifts the distribution samples.
#[derive(Debug, Clone)]
pub struct SimContext {
    /// Master seed for this run
    seed: u64,
    
    /// Population-level RNG
    rng: ChaCha8Rng,
    
    /// Per-student stream derivation
    seeds: SeedDeriver,
}

impl SimContext {
    /// Creates a context from the master seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seeds: SeedDeriver::new(seed.wrapping_mul(0x517cc1b727220a95)),
        }
    }
    
    /// Returns the master seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }
    
    /// Population-level RNG.
    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }
    
    /// Per-student stream derivation.
    pub fn seeds(&self) -> &SeedDeriver {
        &self.seeds
    }
}
