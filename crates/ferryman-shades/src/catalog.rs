//! Trait pools for generated shades.
//!
//! Classification depends only on [`GOOD_ACTIONS`]: a life action counts
//! as good exactly when it appears verbatim in that list.

/// Names a shade may carry.
pub const NAMES: &[&str] = &[
    "Ephialtes", "Ajax", "Sappho", "Leonidas", "Pythia", "Hector", "Achilles", "Orpheus",
    "Pandora", "Antigone",
];

/// Backgrounds a shade may come from.
pub const ORIGINS: &[&str] = &[
    "Hermit", "Noble", "Urchin", "Artisan", "Pilgrim", "Hero", "Iconoclast", "Outlander",
    "Apprentice",
];

/// Trades a shade may have practised in life.
pub const OCCUPATIONS: &[&str] = &[
    "Labourer", "Servant", "Scholar", "Merchant", "Entertainer", "Gladiator", "Warrior", "Sailor",
];

/// One-line epitaphs.
pub const LIFE_SUMMARIES: &[&str] = &[
    "A brave soul who met their end in a tragic battle.",
    "A kind healer known for their selfless acts of compassion.",
    "A cunning merchant who amassed great wealth.",
    "A poet whose words inspired generations.",
    "A sinner who sought redemption in their final moments.",
    "A warrior who defended their homeland against invaders.",
    "A philosopher who sought the meaning of existence.",
    "A hunter skilled in tracking and survival.",
    "A farmer who toiled the earth with dedication.",
    "A scribe who recorded the histories of their time.",
];

/// Deeds that count towards Elysium.
pub const GOOD_ACTIONS: &[&str] = &[
    "Rescued a village from invaders.",
    "Discovered a cure for a deadly disease.",
    "Built a shelter for the homeless.",
    "Taught a generation of scholars.",
    "Protected endangered wildlife.",
];

/// Deeds that count towards Tartarus.
pub const BAD_ACTIONS: &[&str] = &[
    "Stole from the royal treasury.",
    "Betrayed their comrades in battle.",
    "Burned down a sacred temple.",
    "Spread rumors that caused chaos.",
    "Sabotaged a critical mission.",
];

/// Return whether `action` is one of the [`GOOD_ACTIONS`].
pub fn is_good_action(action: &str) -> bool {
    GOOD_ACTIONS.contains(&action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn good_and_bad_pools_are_disjoint() {
        for bad in BAD_ACTIONS {
            assert!(!is_good_action(bad), "{bad} listed as both good and bad");
        }
    }

    #[test]
    fn membership_is_exact() {
        assert!(is_good_action("Protected endangered wildlife."));
        // Missing trailing period.
        assert!(!is_good_action("Protected endangered wildlife"));
    }

    #[test]
    fn pools_are_populated() {
        assert_eq!(NAMES.len(), 10);
        assert_eq!(ORIGINS.len(), 9);
        assert_eq!(OCCUPATIONS.len(), 8);
        assert_eq!(LIFE_SUMMARIES.len(), 10);
        assert_eq!(GOOD_ACTIONS.len(), 5);
        assert_eq!(BAD_ACTIONS.len(), 5);
    }
}
