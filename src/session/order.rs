//! Problem ordering and shuffling

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::problems::Problem;

/// Order in which a session presents its problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProblemOrder {
    /// Keep the order of the source file.
    #[default]
    AsLoaded,
    /// Uniform random permutation. A seed makes it reproducible.
    Shuffled { seed: Option<u64> },
}

impl ProblemOrder {
    pub fn new(shuffle: bool, seed: Option<u64>) -> Self {
        if shuffle {
            Self::Shuffled { seed }
        } else {
            Self::AsLoaded
        }
    }

    /// Reorder `problems` in place.
    pub fn apply(&self, problems: &mut [Problem]) {
        match *self {
            Self::AsLoaded => {}
            Self::Shuffled { seed: Some(seed) } => {
                shuffle_problems(problems, &mut StdRng::seed_from_u64(seed));
            }
            Self::Shuffled { seed: None } => {
                shuffle_problems(problems, &mut rand::rng());
            }
        }
        debug!(order = ?self, count = problems.len(), "applied problem order");
    }
}

/// Shuffle problems with the given random source.
pub fn shuffle_problems<R: Rng + ?Sized>(problems: &mut [Problem], rng: &mut R) {
    problems.shuffle(rng);
}
