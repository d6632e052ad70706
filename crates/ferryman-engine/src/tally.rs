//! Running score of the Docks' verdicts.

use ferryman_events::GameEvent;

/// Counts of correctly and incorrectly judged shades.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortingTally {
    /// Shades ferried to the afterlife they belong in.
    pub correct: u32,
    /// Shades ferried to the wrong afterlife.
    pub incorrect: u32,
}

impl SortingTally {
    /// Count a `ShadeProcessed` event; other events are ignored.
    pub fn record(&mut self, event: &GameEvent) {
        if let GameEvent::ShadeProcessed { correct, .. } = event {
            if *correct {
                self.correct = self.correct.saturating_add(1);
            } else {
                self.incorrect = self.incorrect.saturating_add(1);
            }
        }
    }

    /// Return the total number of shades ferried.
    pub const fn total(&self) -> u32 {
        self.correct.saturating_add(self.incorrect)
    }

    /// Return the share judged correctly, or `None` before any verdict.
    pub fn accuracy(&self) -> Option<f64> {
        let total = self.total();
        (total > 0).then(|| f64::from(self.correct) / f64::from(total))
    }
}
