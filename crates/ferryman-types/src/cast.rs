//! The Olympian cast.
//!
//! Relationship values are only tracked for these names. Anything else
//! reads as zero and cannot accrue rapport.

/// Every Olympian the player can hold a relationship with, in the order the
/// ledger registers them.
pub const OLYMPIANS: [&str; 13] = [
    "Artemis",
    "Dionysus",
    "Hermes",
    "Athena",
    "Hephaestus",
    "Ares",
    "Demeter",
    "Aphrodite",
    "Apollo",
    "Hera",
    "Hades",
    "Poseidon",
    "Zeus",
];

/// Return whether `name` belongs to the default Olympian cast.
pub fn is_olympian(name: &str) -> bool {
    OLYMPIANS.contains(&name)
}
