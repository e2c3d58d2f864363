//! Static character catalog and rarity rates.
//!
//! # Responsibility
//! - Define collectible characters and their rarity tiers.
//! - Provide the built-in catalog and draw rate table.
//!
//! # Invariants
//! - Catalog entries are immutable and identified by a unique `id`.
//! - Default rate weights sum to 100.

use std::fmt::{Display, Formatter};

/// Rarity tier controlling draw probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 4] = [Self::Common, Self::Rare, Self::Epic, Self::Legendary];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
        }
    }
}

impl Display for Rarity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Catalog entry for one collectible character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Character {
    pub id: &'static str,
    pub name: &'static str,
    pub rarity: Rarity,
    pub element: &'static str,
    pub description: &'static str,
}

/// Weight of one rarity in the draw table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RarityRate {
    pub rarity: Rarity,
    pub weight: u32,
}

/// Built-in draw table, scanned in this order when resolving a roll.
pub const RARITY_RATES: &[RarityRate] = &[
    RarityRate {
        rarity: Rarity::Legendary,
        weight: 5,
    },
    RarityRate {
        rarity: Rarity::Epic,
        weight: 10,
    },
    RarityRate {
        rarity: Rarity::Rare,
        weight: 25,
    },
    RarityRate {
        rarity: Rarity::Common,
        weight: 60,
    },
];

/// Built-in character pool.
pub const CHARACTER_CATALOG: &[Character] = &[
    Character {
        id: "c1",
        name: "Aurora",
        rarity: Rarity::Common,
        element: "Light",
        description: "A bright spirit who cheers you on.",
    },
    Character {
        id: "c2",
        name: "Zeph",
        rarity: Rarity::Common,
        element: "Wind",
        description: "Swift breezes, swift progress.",
    },
    Character {
        id: "c3",
        name: "Marin",
        rarity: Rarity::Common,
        element: "Water",
        description: "Calm focus and steady tides.",
    },
    Character {
        id: "c4",
        name: "Bruno",
        rarity: Rarity::Rare,
        element: "Earth",
        description: "Grounded guardian of habits.",
    },
    Character {
        id: "c5",
        name: "Ignis",
        rarity: Rarity::Rare,
        element: "Fire",
        description: "Hot-headed ally that ignites action.",
    },
    Character {
        id: "c6",
        name: "Nyx",
        rarity: Rarity::Epic,
        element: "Shadow",
        description: "Strategist of late-night grinds.",
    },
    Character {
        id: "c7",
        name: "Lumen",
        rarity: Rarity::Epic,
        element: "Light",
        description: "Beacon who glows brighter with effort.",
    },
    Character {
        id: "c8",
        name: "Vera",
        rarity: Rarity::Legendary,
        element: "Void",
        description: "Mythic wanderer bending time for you.",
    },
];

/// Looks up a catalog entry by id.
pub fn find_character<'a>(catalog: &'a [Character], id: &str) -> Option<&'a Character> {
    catalog.iter().find(|character| character.id == id)
}

#[cfg(test)]
mod tests {
    use super::{find_character, Rarity, CHARACTER_CATALOG, RARITY_RATES};
    use std::collections::HashSet;

    #[test]
    fn default_rates_sum_to_one_hundred() {
        let total: u32 = RARITY_RATES.iter().map(|rate| rate.weight).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn catalog_ids_are_unique_and_cover_every_rarity() {
        let ids: HashSet<_> = CHARACTER_CATALOG.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), CHARACTER_CATALOG.len());
        for rarity in Rarity::ALL {
            assert!(
                CHARACTER_CATALOG.iter().any(|c| c.rarity == rarity),
                "no character for {rarity}"
            );
        }
    }

    #[test]
    fn find_character_by_id() {
        let vera = find_character(CHARACTER_CATALOG, "c8").expect("c8 exists");
        assert_eq!(vera.name, "Vera");
        assert!(find_character(CHARACTER_CATALOG, "c99").is_none());
    }
}
