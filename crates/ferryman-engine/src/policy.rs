//! Scripted sorting policy.
//!
//! Stands in for a player: it knows each shade's correct afterlife and
//! picks it with a configured probability, otherwise one of the two wrong
//! ones at random.

use ferryman_shades::Shade;
use ferryman_types::Afterlife;
use rand::Rng;
use rand::seq::IndexedRandom;

/// A player stand-in with fixed accuracy.
#[derive(Debug, Clone, Copy)]
pub struct SortingPolicy {
    accuracy: f64,
}

impl SortingPolicy {
    /// Create a policy that is right with probability `accuracy`.
    ///
    /// Out-of-range values are clamped to `[0, 1]`.
    pub fn new(accuracy: f64) -> Self {
        Self {
            accuracy: accuracy.clamp(0.0, 1.0),
        }
    }

    /// Pick an afterlife for `shade`.
    pub fn choose<R: Rng + ?Sized>(self, shade: &Shade, rng: &mut R) -> Afterlife {
        let correct = shade.correct_afterlife();
        if rng.random_bool(self.accuracy) {
            return correct;
        }
        let wrong: Vec<Afterlife> = Afterlife::ALL
            .into_iter()
            .filter(|&a| a != correct)
            .collect();
        wrong.choose(rng).copied().unwrap_or(correct)
    }
}
