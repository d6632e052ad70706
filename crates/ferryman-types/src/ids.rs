//! Type-safe identifier wrapper around [`Uuid`].
//!
//! Shades are identified by a UUID v7 assigned at construction. The
//! presentation layer keys its own sprite and bubble handles by this ID;
//! the game core never holds a reference to a visual object.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Unique identifier for a shade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ShadeId(pub Uuid);

impl ShadeId {
    /// Create a new identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for ShadeId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for ShadeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ShadeId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<ShadeId> for Uuid {
    fn from(id: ShadeId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ids_are_unique() {
        let a = ShadeId::new();
        let b = ShadeId::new();
        assert_ne!(a, b);
        assert_ne!(a.into_inner(), Uuid::nil());
    }

    #[test]
    fn uuid_round_trips_through_from() {
        let raw = Uuid::now_v7();
        let id = ShadeId::from(raw);
        assert_eq!(Uuid::from(id), raw);
        assert_eq!(id.to_string(), raw.to_string());
    }
}
