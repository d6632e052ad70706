//! The pending pool and hired list.
//!
//! Freshly spawned shades wait in the pending pool. They leave it in one of
//! two ways: the player judges them (they go on to the Docks) or hires them
//! (they stay behind to work). Un-hired shades are swept away when the next
//! batch arrives.

use std::collections::BTreeMap;

use ferryman_types::{Afterlife, ShadeId};
use tracing::{debug, info};

use crate::ShadeError;
use crate::shade::Shade;

/// Head-counts of hired shades by background and by trade.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HiredSummary {
    /// Number of hired shades per origin.
    pub by_origin: BTreeMap<String, usize>,
    /// Number of hired shades per occupation.
    pub by_occupation: BTreeMap<String, usize>,
}

/// Shades that are on hand but not yet ferried.
#[derive(Debug, Default)]
pub struct ShadeRoster {
    pending: Vec<Shade>,
    hired: Vec<Shade>,
}

impl ShadeRoster {
    /// Create an empty roster.
    pub const fn new() -> Self {
        Self {
            pending: Vec::new(),
            hired: Vec::new(),
        }
    }

    /// Add a freshly spawned batch to the pending pool.
    pub fn add_batch(&mut self, shades: Vec<Shade>) {
        self.pending.extend(shades);
    }

    /// Return the shades awaiting a decision, in arrival order.
    pub fn pending(&self) -> &[Shade] {
        &self.pending
    }

    /// Return the shades the player has hired, in hiring order.
    pub fn hired(&self) -> &[Shade] {
        &self.hired
    }

    /// Look up a pending shade by ID.
    pub fn find_pending(&self, id: ShadeId) -> Option<&Shade> {
        self.pending.iter().find(|s| s.id() == id)
    }

    /// Judge a pending shade and take it out of the pool.
    ///
    /// The returned shade carries the assigned afterlife and is ready to be
    /// enqueued at the Docks. On error the pool is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ShadeError::NotPending`] if no pending shade has this ID, or
    /// [`ShadeError::AlreadyAssigned`] if it was already judged.
    pub fn assign(&mut self, id: ShadeId, afterlife: Afterlife) -> Result<Shade, ShadeError> {
        let idx = self.position(id)?;
        let shade = self
            .pending
            .get_mut(idx)
            .ok_or(ShadeError::NotPending { shade_id: id })?;
        shade.assign(afterlife)?;
        let shade = self.pending.remove(idx);
        debug!(shade_id = %id, name = shade.name(), %afterlife, "Shade assigned");
        Ok(shade)
    }

    /// Move a pending shade onto the hired list.
    ///
    /// # Errors
    ///
    /// Returns [`ShadeError::NotPending`] if no pending shade has this ID.
    pub fn hire(&mut self, id: ShadeId) -> Result<&Shade, ShadeError> {
        let idx = self.position(id)?;
        let shade = self.pending.remove(idx);
        info!(shade_id = %id, name = shade.name(), "Shade hired");
        self.hired.push(shade);
        self.hired
            .last()
            .ok_or(ShadeError::NotPending { shade_id: id })
    }

    /// Drop every shade still waiting in the pending pool.
    ///
    /// Returns how many were swept away. Hired shades are untouched.
    pub fn clear_pending(&mut self) -> usize {
        let swept = self.pending.len();
        self.pending.clear();
        if swept > 0 {
            debug!(swept, "Pending shades cleared");
        }
        swept
    }

    /// Drop everything, pending and hired.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.hired.clear();
    }

    /// Count hired shades by origin and by occupation.
    pub fn hired_summary(&self) -> HiredSummary {
        let mut summary = HiredSummary::default();
        for shade in &self.hired {
            let origin = summary
                .by_origin
                .entry(shade.origin().to_owned())
                .or_insert(0);
            *origin = origin.saturating_add(1);

            let occupation = summary
                .by_occupation
                .entry(shade.occupation().to_owned())
                .or_insert(0);
            *occupation = occupation.saturating_add(1);
        }
        summary
    }

    fn position(&self, id: ShadeId) -> Result<usize, ShadeError> {
        self.pending
            .iter()
            .position(|s| s.id() == id)
            .ok_or(ShadeError::NotPending { shade_id: id })
    }
}
