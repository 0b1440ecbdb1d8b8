use rand::seq::SliceRandom;
use rand::Rng;

/// Visual identity given to a drawn team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TeamIdentity {
    pub name: &'static str,
    pub color: &'static str,
    pub secondary_color: &'static str,
    pub logo: &'static str,
}

pub(crate) const PALETTE: [TeamIdentity; 6] = [
    TeamIdentity {
        name: "Leões",
        color: "#D62828",
        secondary_color: "#FCBF49",
        logo: "lion",
    },
    TeamIdentity {
        name: "Tubarões",
        color: "#1D3557",
        secondary_color: "#A8DADC",
        logo: "shark",
    },
    TeamIdentity {
        name: "Águias",
        color: "#2A9D8F",
        secondary_color: "#E9C46A",
        logo: "eagle",
    },
    TeamIdentity {
        name: "Panteras",
        color: "#222222",
        secondary_color: "#F4F4F4",
        logo: "panther",
    },
    TeamIdentity {
        name: "Falcões",
        color: "#F77F00",
        secondary_color: "#003049",
        logo: "falcon",
    },
    TeamIdentity {
        name: "Lobos",
        color: "#6C757D",
        secondary_color: "#FFFFFF",
        logo: "wolf",
    },
];

/// `count` distinct identities in random order.
pub(crate) fn pick<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<TeamIdentity> {
    PALETTE.choose_multiple(rng, count).copied().collect()
}
