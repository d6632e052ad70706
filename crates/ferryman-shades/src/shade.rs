//! The shade record and its classification.

use ferryman_types::{Afterlife, ShadeId};

use crate::ShadeError;
use crate::catalog::is_good_action;

/// Already-drawn traits used to build a [`Shade`].
///
/// Randomness lives in the spawner; a shade is built from whatever values
/// it is handed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadeTraits {
    /// Display name.
    pub name: String,
    /// Background the shade came from.
    pub origin: String,
    /// Trade practised in life.
    pub occupation: String,
    /// One-line epitaph.
    pub life_summary: String,
    /// The two deeds the shade is judged on.
    pub life_actions: [String; 2],
    /// Level, starting at 1.
    pub level: u32,
}

/// Compute where a shade with these two life actions belongs.
///
/// Two good actions lead to Elysium, none to Tartarus, exactly one to
/// Asphodel. Order does not matter.
pub fn classify(first: &str, second: &str) -> Afterlife {
    match (is_good_action(first), is_good_action(second)) {
        (true, true) => Afterlife::Elysium,
        (false, false) => Afterlife::Tartarus,
        _ => Afterlife::Asphodel,
    }
}

/// A soul awaiting judgement.
///
/// Identity fields and the correct afterlife are fixed at construction.
/// Equality is by [`ShadeId`] only: two shades with identical traits are
/// still different shades.
#[derive(Debug, Clone)]
pub struct Shade {
    id: ShadeId,
    name: String,
    origin: String,
    occupation: String,
    life_summary: String,
    life_actions: [String; 2],
    level: u32,
    correct_afterlife: Afterlife,
    assigned_afterlife: Option<Afterlife>,
}

impl Shade {
    /// Build a shade from drawn traits, classifying it on the way.
    ///
    /// # Errors
    ///
    /// Returns [`ShadeError::InvalidLevel`] if `traits.level` is 0.
    pub fn new(traits: ShadeTraits) -> Result<Self, ShadeError> {
        if traits.level == 0 {
            return Err(ShadeError::InvalidLevel { level: 0 });
        }

        let [first, second] = traits.life_actions;
        let correct_afterlife = classify(&first, &second);

        Ok(Self {
            id: ShadeId::new(),
            name: traits.name,
            origin: traits.origin,
            occupation: traits.occupation,
            life_summary: traits.life_summary,
            life_actions: [first, second],
            level: traits.level,
            correct_afterlife,
            assigned_afterlife: None,
        })
    }

    /// Return the shade's identifier.
    pub const fn id(&self) -> ShadeId {
        self.id
    }

    /// Return the shade's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the shade's background.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Return the shade's trade.
    pub fn occupation(&self) -> &str {
        &self.occupation
    }

    /// Return the shade's epitaph.
    pub fn life_summary(&self) -> &str {
        &self.life_summary
    }

    /// Return both life actions, in draw order.
    pub const fn life_actions(&self) -> &[String; 2] {
        &self.life_actions
    }

    /// Return the shade's level.
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Return the afterlife derived from the life actions.
    pub const fn correct_afterlife(&self) -> Afterlife {
        self.correct_afterlife
    }

    /// Return the player's decision, if one has been made.
    pub const fn assigned_afterlife(&self) -> Option<Afterlife> {
        self.assigned_afterlife
    }

    /// Record the player's decision.
    ///
    /// A shade is judged once; a second assignment is rejected and leaves
    /// the first in place.
    ///
    /// # Errors
    ///
    /// Returns [`ShadeError::AlreadyAssigned`] if a decision already exists.
    pub fn assign(&mut self, afterlife: Afterlife) -> Result<(), ShadeError> {
        if let Some(existing) = self.assigned_afterlife {
            return Err(ShadeError::AlreadyAssigned {
                shade_id: self.id,
                afterlife: existing,
            });
        }
        self.assigned_afterlife = Some(afterlife);
        Ok(())
    }

    /// Return whether the player's decision matches the correct afterlife.
    ///
    /// An unassigned shade is never correct.
    pub fn is_correctly_assigned(&self) -> bool {
        self.assigned_afterlife == Some(self.correct_afterlife)
    }
}

impl PartialEq for Shade {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Shade {}

impl core::fmt::Display for Shade {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let [first, second] = &self.life_actions;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Origin: {}", self.origin)?;
        writeln!(f, "Occupation: {}", self.occupation)?;
        writeln!(f, "Life Summary: {}", self.life_summary)?;
        writeln!(f, "Life Action 1: {first}")?;
        writeln!(f, "Life Action 2: {second}")?;
        write!(f, "Level: {}", self.level)
    }
}
