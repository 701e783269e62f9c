// motorcar_sim/src/simulation/core/prng.rs

use bevy::prelude::Resource;
use rand::{rngs::OsRng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A newtype wrapper around `ChaCha8Rng` to make it a Bevy Resource.
/// This is the central, deterministic pseudo-random number generator for the simulation.
#[derive(Resource)]
pub struct SimulationRng(pub ChaCha8Rng);

impl SimulationRng {
    /// Seeded from the scenario when it names a seed, otherwise from OS entropy.
    pub fn from_seed_or_entropy(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(ChaCha8Rng::seed_from_u64(seed)),
            None => Self(ChaCha8Rng::from_rng(OsRng).unwrap_or_else(|_| ChaCha8Rng::seed_from_u64(0))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = SimulationRng::from_seed_or_entropy(Some(42));
        let mut b = SimulationRng::from_seed_or_entropy(Some(42));
        let xs: Vec<u32> = (0..8).map(|_| a.0.gen()).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.0.gen()).collect();
        assert_eq!(xs, ys);
    }
}
