use crate::model::RosterEntry;

const DEMO_PLAYERS: [(&str, u8); 15] = [
    ("Bruno", 5),
    ("Caio", 4),
    ("Diego", 3),
    ("Edu", 2),
    ("Felipe", 4),
    ("Gabriel", 3),
    ("Hugo", 5),
    ("Igor", 2),
    ("João", 3),
    ("Kaique", 1),
    ("Lucas", 4),
    ("Marcos", 3),
    ("Nando", 2),
    ("Otávio", 5),
    ("Paulo", 3),
];

/// Canned roster drawn when the confirmed roster cannot be balanced.
pub(crate) fn demo_roster() -> Vec<RosterEntry> {
    DEMO_PLAYERS
        .iter()
        .zip(1000..)
        .map(|(&(name, skill), id)| RosterEntry::new(id, name).with_skill(skill))
        .collect()
}
