//! The Docks: a bounded-throughput FIFO of judged shades.
//!
//! Judged shades wait at the Docks until the end of the day. Each
//! [`Docks::drain`] ferries at most `daily_processing_limit` of them, oldest
//! first, and emits one `ShadeProcessed` per shade whether the judgement
//! was right or wrong. Rewarding or penalising the player is left to
//! whoever subscribes.

use std::collections::VecDeque;

use ferryman_events::{EventSink, GameEvent};
use ferryman_shades::Shade;
use ferryman_types::ShadeId;
use tracing::{debug, info, warn};

/// Errors that can occur at the Docks.
#[derive(Debug, thiserror::Error)]
pub enum DocksError {
    /// The processing limit must be positive.
    #[error("daily processing limit must be at least 1")]
    ZeroLimit,

    /// Only judged shades can board.
    #[error("shade {shade_id} has no assigned afterlife")]
    Unassigned {
        /// The rejected shade's ID.
        shade_id: ShadeId,
        /// The rejected shade, handed back to the caller.
        shade: Box<Shade>,
    },
}

/// The daily processing queue.
#[derive(Debug, Clone)]
pub struct Docks {
    queue: VecDeque<Shade>,
    daily_processing_limit: usize,
}

impl Docks {
    /// Create empty Docks with the given per-drain quota.
    ///
    /// # Errors
    ///
    /// Returns [`DocksError::ZeroLimit`] if `daily_processing_limit` is 0.
    pub fn new(daily_processing_limit: u32) -> Result<Self, DocksError> {
        if daily_processing_limit == 0 {
            return Err(DocksError::ZeroLimit);
        }
        Ok(Self {
            queue: VecDeque::new(),
            daily_processing_limit: usize::try_from(daily_processing_limit)
                .unwrap_or(usize::MAX),
        })
    }

    /// Return the per-drain quota.
    pub const fn daily_processing_limit(&self) -> usize {
        self.daily_processing_limit
    }

    /// Append a judged shade to the tail of the queue.
    ///
    /// # Errors
    ///
    /// Returns [`DocksError::Unassigned`] (carrying the shade back) if it
    /// has no assigned afterlife. The queue is unchanged.
    pub fn enqueue(&mut self, shade: Shade) -> Result<(), DocksError> {
        if shade.assigned_afterlife().is_none() {
            warn!(shade_id = %shade.id(), name = shade.name(), "Rejected unjudged shade at the Docks");
            return Err(DocksError::Unassigned {
                shade_id: shade.id(),
                shade: Box::new(shade),
            });
        }
        info!(shade_id = %shade.id(), name = shade.name(), "Shade added to the processing queue");
        self.queue.push_back(shade);
        Ok(())
    }

    /// Ferry up to `daily_processing_limit` shades, oldest first.
    ///
    /// Returns how many were processed. Shades beyond the quota stay
    /// queued, in order, for the next drain.
    pub fn drain(&mut self, sink: &mut impl EventSink) -> usize {
        let mut processed: usize = 0;

        while processed < self.daily_processing_limit {
            let Some(shade) = self.queue.pop_front() else {
                break;
            };
            let correct = shade.is_correctly_assigned();
            debug!(
                shade_id = %shade.id(),
                name = shade.name(),
                assigned = ?shade.assigned_afterlife(),
                correct_afterlife = %shade.correct_afterlife(),
                correct,
                "Processing shade"
            );
            sink.emit(GameEvent::ShadeProcessed {
                shade: Box::new(shade),
                correct,
            });
            processed = processed.saturating_add(1);
        }

        info!(processed, remaining = self.queue.len(), "Docks processed shades");
        processed
    }

    /// Return the number of shades waiting.
    pub fn queue_length(&self) -> usize {
        self.queue.len()
    }

    /// Iterate over waiting shades, head first.
    pub fn queued(&self) -> impl Iterator<Item = &Shade> {
        self.queue.iter()
    }

    /// Drop every waiting shade.
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
