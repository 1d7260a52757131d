//! Terrain catalog and resource kinds.
//!
//! Every cell of the terrain grid holds a [`TerrainKind`]. Static properties
//! (movement cost, resource and combat modifiers, display data) live in one
//! [`TerrainType`] definition per kind.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Resources
// ============================================================================

/// Kinds of resource produced by the empire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Food from farms and hunting.
    Food,
    /// Lumber.
    Wood,
    /// Quarried stone.
    Stone,
    /// Gold coin.
    Gold,
    /// Iron ore.
    Iron,
    /// Magical crystal.
    Crystal,
    /// Raw mana.
    Mana,
    /// Scholarly knowledge.
    Knowledge,
}

impl ResourceKind {
    /// All resource kinds.
    pub const ALL: [Self; 8] = [
        Self::Food,
        Self::Wood,
        Self::Stone,
        Self::Gold,
        Self::Iron,
        Self::Crystal,
        Self::Mana,
        Self::Knowledge,
    ];

    /// Lower-case name, as used in host data.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Wood => "wood",
            Self::Stone => "stone",
            Self::Gold => "gold",
            Self::Iron => "iron",
            Self::Crystal => "crystal",
            Self::Mana => "mana",
            Self::Knowledge => "knowledge",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown resource name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown resource kind: {0:?}")]
pub struct ParseResourceKindError(pub String);

impl FromStr for ResourceKind {
    type Err = ParseResourceKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseResourceKindError(s.to_string()))
    }
}

// ============================================================================
// Terrain kinds
// ============================================================================

/// Terrain id stored in each grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TerrainKind {
    /// Open grassland.
    Plains,
    /// Temperate woodland.
    Forest,
    /// High rocky peaks.
    Mountains,
    /// Rolling uplands.
    Hills,
    /// Hot, dry sand.
    Desert,
    /// Cold, treeless flats.
    Tundra,
    /// Hot, wet rainforest.
    Jungle,
    /// Waterlogged lowland.
    Swamp,
    /// Shallow shoreline.
    Coastal,
    /// Deep water and rivers.
    Water,
    /// Lava fields and ash.
    Volcanic,
    /// Frozen land.
    Snow,
    /// Remains of an old civilisation.
    Ruins,
    /// Ground studded with crystal.
    CrystalField,
    /// Scarred battleground.
    AncientBattlefield,
    /// Dry grassland with scattered trees.
    Savanna,
}

impl TerrainKind {
    /// Number of terrain kinds.
    pub const COUNT: usize = 16;

    /// All terrain kinds, in catalog order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Plains,
        Self::Forest,
        Self::Mountains,
        Self::Hills,
        Self::Desert,
        Self::Tundra,
        Self::Jungle,
        Self::Swamp,
        Self::Coastal,
        Self::Water,
        Self::Volcanic,
        Self::Snow,
        Self::Ruins,
        Self::CrystalField,
        Self::AncientBattlefield,
        Self::Savanna,
    ];

    /// Position of this kind in [`TerrainKind::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Static definition of this terrain.
    #[must_use]
    pub fn definition(self) -> &'static TerrainType {
        &TERRAIN_TYPES[self.index()]
    }

    /// Check if this terrain is open water.
    #[must_use]
    pub const fn is_water(self) -> bool {
        matches!(self, Self::Water)
    }
}

impl fmt::Display for TerrainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.definition().name)
    }
}

// ============================================================================
// Terrain definitions
// ============================================================================

/// Attack and defense multipliers for battles fought on a terrain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatModifiers {
    /// Attacker strength multiplier.
    pub attack: f64,
    /// Defender strength multiplier.
    pub defense: f64,
}

impl CombatModifiers {
    /// No effect on combat.
    pub const NEUTRAL: Self = Self::new(1.0, 1.0);

    /// Creates a new modifier pair.
    #[must_use]
    pub const fn new(attack: f64, defense: f64) -> Self {
        Self { attack, defense }
    }
}

/// Static description of a terrain type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainType {
    /// Terrain id.
    pub kind: TerrainKind,
    /// Display name.
    pub name: &'static str,
    /// Render color as `#rrggbb`.
    pub color: &'static str,
    /// Travel distance multiplier.
    pub movement_cost: f64,
    /// Production multipliers; resources not listed use 1.0.
    pub resource_modifiers: &'static [(ResourceKind, f64)],
    /// Combat multipliers.
    pub combat: CombatModifiers,
    /// Flavor text.
    pub description: &'static str,
    /// Map icon.
    pub icon: &'static str,
}

impl TerrainType {
    /// Production multiplier for a resource on this terrain.
    #[must_use]
    pub fn resource_modifier(&self, resource: ResourceKind) -> f64 {
        self.resource_modifiers
            .iter()
            .find(|(kind, _)| *kind == resource)
            .map_or(1.0, |(_, modifier)| *modifier)
    }
}

use ResourceKind::{Crystal, Food, Gold, Iron, Knowledge, Mana, Stone, Wood};

/// Terrain catalog, indexed by [`TerrainKind::index`].
static TERRAIN_TYPES: [TerrainType; TerrainKind::COUNT] = [
    TerrainType {
        kind: TerrainKind::Plains,
        name: "Plains",
        color: "#8fbc5a",
        movement_cost: 1.0,
        resource_modifiers: &[(Food, 1.2), (Wood, 0.8)],
        combat: CombatModifiers::NEUTRAL,
        description: "Open grassland, ideal for farming and settlement.",
        icon: "🌾",
    },
    TerrainType {
        kind: TerrainKind::Forest,
        name: "Forest",
        color: "#2e7d32",
        movement_cost: 1.5,
        resource_modifiers: &[(Wood, 1.5), (Food, 0.9)],
        combat: CombatModifiers::new(0.9, 1.2),
        description: "Dense woodland rich in timber and game.",
        icon: "🌲",
    },
    TerrainType {
        kind: TerrainKind::Mountains,
        name: "Mountains",
        color: "#7b7b7b",
        movement_cost: 3.0,
        resource_modifiers: &[(Stone, 1.5), (Iron, 1.4), (Gold, 1.2), (Food, 0.5)],
        combat: CombatModifiers::new(0.8, 1.5),
        description: "Towering peaks hiding precious ore.",
        icon: "⛰️",
    },
    TerrainType {
        kind: TerrainKind::Hills,
        name: "Hills",
        color: "#a1887f",
        movement_cost: 2.0,
        resource_modifiers: &[(Stone, 1.2), (Iron, 1.1), (Food, 0.9)],
        combat: CombatModifiers::new(0.9, 1.3),
        description: "Rolling uplands with good vantage points.",
        icon: "🏞️",
    },
    TerrainType {
        kind: TerrainKind::Desert,
        name: "Desert",
        color: "#e6c36a",
        movement_cost: 1.8,
        resource_modifiers: &[(Food, 0.4), (Wood, 0.3), (Gold, 1.2), (Crystal, 1.1)],
        combat: CombatModifiers::new(1.0, 0.9),
        description: "Scorching sands where little grows.",
        icon: "🏜️",
    },
    TerrainType {
        kind: TerrainKind::Tundra,
        name: "Tundra",
        color: "#b0bec5",
        movement_cost: 1.7,
        resource_modifiers: &[(Food, 0.6), (Wood, 0.6), (Stone, 1.1)],
        combat: CombatModifiers::new(0.9, 1.0),
        description: "Frozen flats with a short growing season.",
        icon: "🧊",
    },
    TerrainType {
        kind: TerrainKind::Jungle,
        name: "Jungle",
        color: "#1b5e20",
        movement_cost: 2.2,
        resource_modifiers: &[(Wood, 1.3), (Food, 1.1), (Knowledge, 1.1)],
        combat: CombatModifiers::new(0.8, 1.3),
        description: "Steaming rainforest teeming with life.",
        icon: "🌴",
    },
    TerrainType {
        kind: TerrainKind::Swamp,
        name: "Swamp",
        color: "#556b2f",
        movement_cost: 2.5,
        resource_modifiers: &[(Food, 0.8), (Wood, 0.9), (Mana, 1.2)],
        combat: CombatModifiers::new(0.7, 1.1),
        description: "Murky wetland that slows any army.",
        icon: "🐸",
    },
    TerrainType {
        kind: TerrainKind::Coastal,
        name: "Coastal",
        color: "#80cbc4",
        movement_cost: 1.2,
        resource_modifiers: &[(Food, 1.3), (Gold, 1.1)],
        combat: CombatModifiers::new(1.0, 0.9),
        description: "Shoreline suited to fishing and trade.",
        icon: "🏖️",
    },
    TerrainType {
        kind: TerrainKind::Water,
        name: "Water",
        color: "#1e88e5",
        movement_cost: 5.0,
        resource_modifiers: &[(Food, 1.1), (Wood, 0.0), (Stone, 0.0), (Iron, 0.0)],
        combat: CombatModifiers::new(0.5, 0.5),
        description: "Deep lakes, seas and rivers.",
        icon: "🌊",
    },
    TerrainType {
        kind: TerrainKind::Volcanic,
        name: "Volcanic",
        color: "#5d1a0b",
        movement_cost: 3.5,
        resource_modifiers: &[(Stone, 1.3), (Crystal, 1.5), (Mana, 1.2), (Food, 0.2)],
        combat: CombatModifiers::new(1.1, 0.8),
        description: "Ash and lava fields around a smoking cone.",
        icon: "🌋",
    },
    TerrainType {
        kind: TerrainKind::Snow,
        name: "Snow",
        color: "#f5f5f5",
        movement_cost: 2.5,
        resource_modifiers: &[(Food, 0.3), (Wood, 0.4)],
        combat: CombatModifiers::new(0.8, 1.1),
        description: "Deep snowfields and glaciers.",
        icon: "❄️",
    },
    TerrainType {
        kind: TerrainKind::Ruins,
        name: "Ruins",
        color: "#9e9d89",
        movement_cost: 1.5,
        resource_modifiers: &[(Stone, 1.3), (Knowledge, 1.5)],
        combat: CombatModifiers::new(0.9, 1.2),
        description: "Crumbling walls of a forgotten city.",
        icon: "🏛️",
    },
    TerrainType {
        kind: TerrainKind::CrystalField,
        name: "Crystal Field",
        color: "#b39ddb",
        movement_cost: 1.5,
        resource_modifiers: &[(Crystal, 2.0), (Mana, 1.5), (Food, 0.7)],
        combat: CombatModifiers::NEUTRAL,
        description: "Glittering shards jut from the ground.",
        icon: "💎",
    },
    TerrainType {
        kind: TerrainKind::AncientBattlefield,
        name: "Ancient Battlefield",
        color: "#6d4c41",
        movement_cost: 1.3,
        resource_modifiers: &[(Iron, 1.3), (Knowledge, 1.2), (Food, 0.8)],
        combat: CombatModifiers::new(1.1, 1.0),
        description: "Rusting arms of a war long past.",
        icon: "⚔️",
    },
    TerrainType {
        kind: TerrainKind::Savanna,
        name: "Savanna",
        color: "#c0ca33",
        movement_cost: 1.2,
        resource_modifiers: &[(Food, 1.1), (Wood, 0.7)],
        combat: CombatModifiers::new(1.1, 0.9),
        description: "Sun-baked grassland dotted with acacia.",
        icon: "🦒",
    },
];
