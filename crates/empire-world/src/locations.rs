//! Special locations: catalog entries and placed instances.
//!
//! This module provides:
//! - The special-location catalog ([`LocationKind`] / [`SpecialLocationType`])
//! - Placed [`SpecialLocation`] instances with per-family custom properties
//! - Rarity-weighted type selection

use empire_common::{GridCoord, LocationId};
use serde::{Deserialize, Serialize};

use crate::rewards::{BonusDescriptor, BonusTarget, DiscoveryBonus};
use crate::terrain::{ResourceKind, TerrainKind};

/// Rarity used for catalog entries that leave it unset.
pub const DEFAULT_RARITY: f64 = 0.5;

// ============================================================================
// Catalog
// ============================================================================

/// How the player engages with a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InteractionType {
    /// Search the site.
    Explore,
    /// Gather its resources.
    Harvest,
    /// Fight its occupants.
    Combat,
    /// Negotiate with its people.
    Diplomacy,
    /// Exchange goods.
    Trade,
    /// Use its power.
    Use,
    /// Undertake its quest.
    Quest,
}

/// Broad reward categories a location can yield, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewardCategory {
    /// Resource grants.
    Resources,
    /// Technology points.
    Technology,
    /// Artifacts.
    Artifacts,
    /// Alliances.
    Alliance,
    /// Trade offers.
    Trade,
    /// Timed bonuses.
    Bonus,
}

/// Terrain a location type prefers to be placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerrainPreference {
    /// Any terrain is a match.
    Any,
    /// Only the listed terrains match.
    Only(&'static [TerrainKind]),
}

impl TerrainPreference {
    /// Checks whether a terrain satisfies this preference.
    #[must_use]
    pub fn matches(self, terrain: TerrainKind) -> bool {
        match self {
            Self::Any => true,
            Self::Only(kinds) => kinds.contains(&terrain),
        }
    }
}

/// Which custom properties a location type carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationFamily {
    /// Ruins-like sites.
    Ruins,
    /// Resource deposits.
    Resource,
    /// Monster lairs and hostile camps.
    Lair,
    /// Inhabited settlements.
    Settlement,
    /// Places of power.
    Magical,
}

/// Special location id stored on each instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationKind {
    /// Ruins of an old city.
    AncientRuins,
    /// Overgrown temple.
    LostTemple,
    /// Drowned city on the shore.
    SunkenCity,
    /// Remains of a fallen army.
    FallenLegion,
    /// Gold deposit.
    GoldMine,
    /// Crystal-lined cavern.
    CrystalCave,
    /// Rich farmland.
    FertileValley,
    /// Ancient trees.
    ElderGrove,
    /// Exposed stone.
    Quarry,
    /// Desert spring.
    Oasis,
    /// Dragon's den.
    DragonLair,
    /// Bandit hideout.
    BanditCamp,
    /// Beast breeding ground.
    MonsterNest,
    /// Travelling tribe.
    NomadCamp,
    /// Merchant outpost.
    TradingPost,
    /// Secluded village.
    HiddenVillage,
    /// Spring of raw mana.
    MagicSpring,
    /// Mountain shrine.
    AncientShrine,
    /// Rift to elsewhere.
    Portal,
}

impl LocationKind {
    /// Number of catalog entries.
    pub const COUNT: usize = 19;

    /// All location kinds, in catalog order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::AncientRuins,
        Self::LostTemple,
        Self::SunkenCity,
        Self::FallenLegion,
        Self::GoldMine,
        Self::CrystalCave,
        Self::FertileValley,
        Self::ElderGrove,
        Self::Quarry,
        Self::Oasis,
        Self::DragonLair,
        Self::BanditCamp,
        Self::MonsterNest,
        Self::NomadCamp,
        Self::TradingPost,
        Self::HiddenVillage,
        Self::MagicSpring,
        Self::AncientShrine,
        Self::Portal,
    ];

    /// Static definition of this location type.
    #[must_use]
    pub fn definition(self) -> &'static SpecialLocationType {
        &LOCATION_TYPES[self as usize]
    }
}

/// Static description of a special location type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecialLocationType {
    /// Type id.
    pub kind: LocationKind,
    /// Display name.
    pub name: &'static str,
    /// Map icon.
    pub icon: &'static str,
    /// Flavor text.
    pub description: &'static str,
    /// How the player engages with it.
    pub interaction: InteractionType,
    /// Reward categories shown in the UI.
    pub reward_categories: &'static [RewardCategory],
    /// Preferred terrain; `None` means the type only appears in fill-in placement.
    pub terrain_preference: Option<TerrainPreference>,
    /// Relative commonness in `0..=1`; `None` uses [`DEFAULT_RARITY`].
    pub rarity: Option<f64>,
    /// Renderer effect tag.
    pub visual_effect: Option<&'static str>,
    /// Bonus granted on first interaction.
    pub discovery_bonus: Option<DiscoveryBonus>,
    /// Custom property family.
    pub family: LocationFamily,
}

impl SpecialLocationType {
    /// Selection weight (rarity, defaulted).
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.rarity.unwrap_or(DEFAULT_RARITY)
    }
}

use InteractionType as I;
use RewardCategory as R;
use TerrainKind as T;

static LOCATION_TYPES: [SpecialLocationType; LocationKind::COUNT] = [
    SpecialLocationType {
        kind: LocationKind::AncientRuins,
        name: "Ancient Ruins",
        icon: "🏛️",
        description: "The crumbling remains of a once-great city.",
        interaction: I::Explore,
        reward_categories: &[R::Resources, R::Technology, R::Artifacts],
        terrain_preference: Some(TerrainPreference::Only(&[T::Plains, T::Desert, T::Jungle, T::Ruins])),
        rarity: Some(0.5),
        visual_effect: None,
        discovery_bonus: Some(DiscoveryBonus::Resources(&[(ResourceKind::Knowledge, 25)])),
        family: LocationFamily::Ruins,
    },
    SpecialLocationType {
        kind: LocationKind::LostTemple,
        name: "Lost Temple",
        icon: "🛕",
        description: "A temple swallowed by vines, its altar still warm.",
        interaction: I::Quest,
        reward_categories: &[R::Technology, R::Artifacts],
        terrain_preference: Some(TerrainPreference::Only(&[T::Jungle, T::Forest, T::Mountains])),
        rarity: Some(0.3),
        visual_effect: Some("glow"),
        discovery_bonus: Some(DiscoveryBonus::Modifier(BonusDescriptor::new(BonusTarget::Research, 0.05))),
        family: LocationFamily::Ruins,
    },
    SpecialLocationType {
        kind: LocationKind::SunkenCity,
        name: "Sunken City",
        icon: "🏚️",
        description: "Towers rising from the shallows at low tide.",
        interaction: I::Explore,
        reward_categories: &[R::Resources, R::Artifacts],
        terrain_preference: Some(TerrainPreference::Only(&[T::Coastal, T::Swamp])),
        rarity: Some(0.2),
        visual_effect: Some("ripple"),
        discovery_bonus: None,
        family: LocationFamily::Ruins,
    },
    SpecialLocationType {
        kind: LocationKind::FallenLegion,
        name: "Fallen Legion",
        icon: "⚔️",
        description: "Rows of rusted armor where an army made its last stand.",
        interaction: I::Explore,
        reward_categories: &[R::Resources, R::Artifacts],
        terrain_preference: Some(TerrainPreference::Only(&[T::AncientBattlefield, T::Plains, T::Hills])),
        rarity: Some(0.3),
        visual_effect: None,
        discovery_bonus: None,
        family: LocationFamily::Ruins,
    },
    SpecialLocationType {
        kind: LocationKind::GoldMine,
        name: "Gold Mine",
        icon: "⛏️",
        description: "A rich vein of gold glints in the rock.",
        interaction: I::Harvest,
        reward_categories: &[R::Resources],
        terrain_preference: Some(TerrainPreference::Only(&[T::Mountains, T::Hills])),
        rarity: Some(0.4),
        visual_effect: Some("sparkle"),
        discovery_bonus: Some(DiscoveryBonus::Resources(&[(ResourceKind::Gold, 100)])),
        family: LocationFamily::Resource,
    },
    SpecialLocationType {
        kind: LocationKind::CrystalCave,
        name: "Crystal Cave",
        icon: "💎",
        description: "A cavern lined with humming crystal.",
        interaction: I::Harvest,
        reward_categories: &[R::Resources],
        terrain_preference: Some(TerrainPreference::Only(&[T::Mountains, T::CrystalField, T::Volcanic])),
        rarity: Some(0.3),
        visual_effect: Some("sparkle"),
        discovery_bonus: None,
        family: LocationFamily::Resource,
    },
    SpecialLocationType {
        kind: LocationKind::FertileValley,
        name: "Fertile Valley",
        icon: "🌻",
        description: "Sheltered bottomland with deep black soil.",
        interaction: I::Harvest,
        reward_categories: &[R::Resources, R::Bonus],
        terrain_preference: Some(TerrainPreference::Only(&[T::Plains, T::Savanna, T::Forest])),
        rarity: Some(0.6),
        visual_effect: None,
        discovery_bonus: Some(DiscoveryBonus::Modifier(BonusDescriptor::new(
            BonusTarget::Production(ResourceKind::Food),
            0.05,
        ))),
        family: LocationFamily::Resource,
    },
    SpecialLocationType {
        kind: LocationKind::ElderGrove,
        name: "Elder Grove",
        icon: "🌳",
        description: "Trees older than any kingdom.",
        interaction: I::Harvest,
        reward_categories: &[R::Resources, R::Technology],
        terrain_preference: Some(TerrainPreference::Only(&[T::Forest, T::Jungle])),
        rarity: Some(0.5),
        visual_effect: None,
        discovery_bonus: None,
        family: LocationFamily::Resource,
    },
    SpecialLocationType {
        kind: LocationKind::Quarry,
        name: "Quarry",
        icon: "🪨",
        description: "Exposed bedrock, easy to cut.",
        interaction: I::Harvest,
        reward_categories: &[R::Resources],
        terrain_preference: Some(TerrainPreference::Only(&[T::Hills, T::Mountains, T::Tundra])),
        rarity: Some(0.5),
        visual_effect: None,
        discovery_bonus: None,
        family: LocationFamily::Resource,
    },
    SpecialLocationType {
        kind: LocationKind::Oasis,
        name: "Oasis",
        icon: "🏝️",
        description: "Palms and cool water amid the dunes.",
        interaction: I::Use,
        reward_categories: &[R::Resources, R::Bonus],
        terrain_preference: Some(TerrainPreference::Only(&[T::Desert, T::Savanna])),
        rarity: Some(0.3),
        visual_effect: None,
        discovery_bonus: Some(DiscoveryBonus::Resources(&[(ResourceKind::Food, 50)])),
        family: LocationFamily::Resource,
    },
    SpecialLocationType {
        kind: LocationKind::DragonLair,
        name: "Dragon Lair",
        icon: "🐉",
        description: "Scorched bones litter the mouth of a vast cave.",
        interaction: I::Combat,
        reward_categories: &[R::Resources, R::Artifacts],
        terrain_preference: Some(TerrainPreference::Only(&[T::Mountains, T::Volcanic])),
        rarity: Some(0.1),
        visual_effect: Some("smoke"),
        discovery_bonus: None,
        family: LocationFamily::Lair,
    },
    SpecialLocationType {
        kind: LocationKind::BanditCamp,
        name: "Bandit Camp",
        icon: "🏴",
        description: "Outlaws preying on nearby roads.",
        interaction: I::Combat,
        reward_categories: &[R::Resources],
        terrain_preference: Some(TerrainPreference::Any),
        rarity: Some(0.6),
        visual_effect: None,
        discovery_bonus: None,
        family: LocationFamily::Lair,
    },
    SpecialLocationType {
        kind: LocationKind::MonsterNest,
        name: "Monster Nest",
        icon: "🕷️",
        description: "Something large breeds here.",
        interaction: I::Combat,
        reward_categories: &[R::Resources, R::Artifacts],
        terrain_preference: Some(TerrainPreference::Only(&[T::Swamp, T::Jungle, T::Forest])),
        rarity: Some(0.4),
        visual_effect: None,
        discovery_bonus: None,
        family: LocationFamily::Lair,
    },
    SpecialLocationType {
        kind: LocationKind::NomadCamp,
        name: "Nomad Camp",
        icon: "⛺",
        description: "A tribe that follows the herds.",
        interaction: I::Diplomacy,
        reward_categories: &[R::Alliance, R::Trade],
        terrain_preference: Some(TerrainPreference::Only(&[T::Desert, T::Savanna, T::Tundra])),
        rarity: Some(0.5),
        visual_effect: None,
        discovery_bonus: None,
        family: LocationFamily::Settlement,
    },
    SpecialLocationType {
        kind: LocationKind::TradingPost,
        name: "Trading Post",
        icon: "🏪",
        description: "Merchants from distant lands barter here.",
        interaction: I::Trade,
        reward_categories: &[R::Trade],
        terrain_preference: Some(TerrainPreference::Only(&[T::Coastal, T::Plains])),
        rarity: Some(0.4),
        visual_effect: None,
        discovery_bonus: Some(DiscoveryBonus::Modifier(BonusDescriptor::new(BonusTarget::Trade, 0.05))),
        family: LocationFamily::Settlement,
    },
    SpecialLocationType {
        kind: LocationKind::HiddenVillage,
        name: "Hidden Village",
        icon: "🏘️",
        description: "A village that does not appear on any chart.",
        interaction: I::Diplomacy,
        reward_categories: &[R::Alliance, R::Technology],
        terrain_preference: None,
        rarity: None,
        visual_effect: None,
        discovery_bonus: None,
        family: LocationFamily::Settlement,
    },
    SpecialLocationType {
        kind: LocationKind::MagicSpring,
        name: "Magic Spring",
        icon: "⛲",
        description: "Water that shimmers with raw mana.",
        interaction: I::Use,
        reward_categories: &[R::Resources, R::Bonus],
        terrain_preference: Some(TerrainPreference::Only(&[T::Forest, T::Swamp, T::CrystalField])),
        rarity: Some(0.3),
        visual_effect: Some("glow"),
        discovery_bonus: Some(DiscoveryBonus::Resources(&[(ResourceKind::Mana, 40)])),
        family: LocationFamily::Magical,
    },
    SpecialLocationType {
        kind: LocationKind::AncientShrine,
        name: "Ancient Shrine",
        icon: "⛩️",
        description: "A weathered shrine to a war god.",
        interaction: I::Use,
        reward_categories: &[R::Bonus, R::Technology],
        terrain_preference: Some(TerrainPreference::Only(&[T::Hills, T::Mountains, T::Snow])),
        rarity: Some(0.3),
        visual_effect: Some("glow"),
        discovery_bonus: None,
        family: LocationFamily::Magical,
    },
    SpecialLocationType {
        kind: LocationKind::Portal,
        name: "Portal",
        icon: "🌀",
        description: "A tear in the world, crackling with light.",
        interaction: I::Use,
        reward_categories: &[R::Technology, R::Bonus],
        terrain_preference: None,
        rarity: Some(0.05),
        visual_effect: Some("swirl"),
        discovery_bonus: Some(DiscoveryBonus::Modifier(BonusDescriptor::new(BonusTarget::Vision, 0.1))),
        family: LocationFamily::Magical,
    },
];

/// Picks a location type with probability proportional to its rarity.
pub fn weighted_random_location_type(rng: &mut fastrand::Rng) -> LocationKind {
    let total: f64 = LocationKind::ALL.iter().map(|k| k.definition().weight()).sum();
    let mut roll = rng.f64() * total;
    for kind in LocationKind::ALL {
        roll -= kind.definition().weight();
        if roll < 0.0 {
            return kind;
        }
    }
    LocationKind::ALL[LocationKind::COUNT - 1]
}

// ============================================================================
// Instances
// ============================================================================

/// Footprint of a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationSize {
    /// Small site.
    Small,
    /// Medium site.
    Medium,
    /// Large site.
    Large,
}

impl LocationSize {
    /// All sizes.
    pub const ALL: [Self; 3] = [Self::Small, Self::Medium, Self::Large];
}

/// Disposition of a settlement toward the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attitude {
    /// Welcoming.
    Friendly,
    /// Wary.
    Neutral,
    /// Unwelcoming.
    Hostile,
}

/// Lasting effect of a place of power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MagicEffect {
    /// Heals units.
    Healing,
    /// Reveals distant terrain.
    Foresight,
    /// Strengthens units.
    Empowerment,
    /// Protects from harm.
    Warding,
}

/// Custom properties rolled for a placed location, by family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LocationProperties {
    /// Ruins-like sites.
    Ruins {
        /// Age in years.
        age: u32,
        /// Whether the site is trapped.
        traps: bool,
        /// Treasure quality, 1-5.
        treasure_quality: u8,
    },
    /// Resource deposits.
    Resource {
        /// Yield multiplier.
        richness: f64,
        /// Fraction already exhausted.
        depletion: f64,
        /// Whether the deposit is guarded.
        guardians: bool,
    },
    /// Lairs and hostile camps.
    Lair {
        /// Monster level.
        monster_level: u8,
        /// Number of monsters.
        monster_count: u8,
        /// Treasure held.
        treasure_amount: u32,
    },
    /// Settlements.
    Settlement {
        /// Inhabitants.
        population: u32,
        /// Disposition toward the player.
        attitude: Attitude,
        /// Good the settlement specialises in.
        special_goods: ResourceKind,
    },
    /// Places of power.
    Magical {
        /// Strength of the site.
        magic_power: f64,
        /// Chance the site behaves as expected.
        stability: f64,
        /// What the site does.
        special_effect: MagicEffect,
    },
}

impl LocationProperties {
    /// Rolls properties for a family at the given difficulty (1-5).
    pub fn roll(family: LocationFamily, difficulty: u8, rng: &mut fastrand::Rng) -> Self {
        let difficulty = difficulty.clamp(1, 5);
        match family {
            LocationFamily::Ruins => Self::Ruins {
                age: rng.u32(100..=5000),
                traps: rng.f64() < 0.2 * f64::from(difficulty),
                treasure_quality: rng.u8(1..=difficulty),
            },
            LocationFamily::Resource => Self::Resource {
                richness: 0.5 + rng.f64(),
                depletion: 0.0,
                guardians: rng.f64() < 0.3,
            },
            LocationFamily::Lair => Self::Lair {
                monster_level: difficulty * 2 - rng.u8(0..=1),
                monster_count: rng.u8(1..=difficulty * 3),
                treasure_amount: u32::from(difficulty) * rng.u32(50..=150),
            },
            LocationFamily::Settlement => Self::Settlement {
                population: rng.u32(50..=500),
                attitude: [Attitude::Friendly, Attitude::Neutral, Attitude::Hostile][rng.usize(..3)],
                special_goods: ResourceKind::ALL[rng.usize(..ResourceKind::ALL.len())],
            },
            LocationFamily::Magical => Self::Magical {
                magic_power: f64::from(rng.u8(1..=10)),
                stability: 0.5 + rng.f64() * 0.5,
                special_effect: [
                    MagicEffect::Healing,
                    MagicEffect::Foresight,
                    MagicEffect::Empowerment,
                    MagicEffect::Warding,
                ][rng.usize(..4)],
            },
        }
    }

    /// The family these properties belong to.
    #[must_use]
    pub const fn family(&self) -> LocationFamily {
        match self {
            Self::Ruins { .. } => LocationFamily::Ruins,
            Self::Resource { .. } => LocationFamily::Resource,
            Self::Lair { .. } => LocationFamily::Lair,
            Self::Settlement { .. } => LocationFamily::Settlement,
            Self::Magical { .. } => LocationFamily::Magical,
        }
    }
}

/// A special location placed on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialLocation {
    /// Unique id.
    pub id: LocationId,
    /// Catalog type.
    pub kind: LocationKind,
    /// Grid position.
    pub position: GridCoord,
    /// Seen by a scout.
    pub discovered: bool,
    /// Seen up close.
    pub fully_discovered: bool,
    /// Already interacted with.
    pub interacted: bool,
    /// Discovery bonus already granted.
    pub bonus_applied: bool,
    /// Difficulty, 1-5.
    pub difficulty: u8,
    /// Footprint.
    pub size: LocationSize,
    /// Family-specific properties.
    pub properties: LocationProperties,
}

impl SpecialLocation {
    /// Creates an undiscovered location with randomized difficulty, size and properties.
    pub fn roll(id: LocationId, kind: LocationKind, position: GridCoord, rng: &mut fastrand::Rng) -> Self {
        let difficulty = rng.u8(1..=5);
        let size = LocationSize::ALL[rng.usize(..LocationSize::ALL.len())];
        let properties = LocationProperties::roll(kind.definition().family, difficulty, rng);
        Self {
            id,
            kind,
            position,
            discovered: false,
            fully_discovered: false,
            interacted: false,
            bonus_applied: false,
            difficulty,
            size,
            properties,
        }
    }

    /// Static definition of this location's type.
    #[must_use]
    pub fn definition(&self) -> &'static SpecialLocationType {
        self.kind.definition()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_indexed_by_kind() {
        for kind in LocationKind::ALL {
            assert_eq!(kind.definition().kind, kind);
        }
    }

    #[test]
    fn test_rarities_in_range() {
        for kind in LocationKind::ALL {
            let weight = kind.definition().weight();
            assert!((0.0..=1.0).contains(&weight), "{kind:?} rarity {weight}");
        }
    }

    #[test]
    fn test_preference_matching() {
        assert!(TerrainPreference::Any.matches(TerrainKind::Water));
        let pref = TerrainPreference::Only(&[TerrainKind::Hills]);
        assert!(pref.matches(TerrainKind::Hills));
        assert!(!pref.matches(TerrainKind::Plains));
    }

    #[test]
    fn test_properties_follow_family() {
        let mut rng = fastrand::Rng::with_seed(8);
        for kind in LocationKind::ALL {
            let loc = SpecialLocation::roll(LocationId::new(0), kind, GridCoord::new(1, 1), &mut rng);
            assert_eq!(loc.properties.family(), kind.definition().family);
            assert!((1..=5).contains(&loc.difficulty));
            assert!(!loc.discovered && !loc.interacted && !loc.bonus_applied);
        }
    }

    #[test]
    fn test_lair_properties_scale_with_difficulty() {
        let mut rng = fastrand::Rng::with_seed(21);
        for difficulty in 1..=5u8 {
            if let LocationProperties::Lair {
                monster_level,
                monster_count,
                ..
            } = LocationProperties::roll(LocationFamily::Lair, difficulty, &mut rng)
            {
                assert!(monster_level >= difficulty * 2 - 1);
                assert!((1..=difficulty * 3).contains(&monster_count));
            } else {
                panic!("expected lair properties");
            }
        }
    }

    #[test]
    fn test_weighted_selection_follows_rarity() {
        let mut rng = fastrand::Rng::with_seed(1234);
        let trials = 200_000;
        let mut counts = [0usize; LocationKind::COUNT];
        for _ in 0..trials {
            counts[weighted_random_location_type(&mut rng) as usize] += 1;
        }

        let total_weight: f64 = LocationKind::ALL.iter().map(|k| k.definition().weight()).sum();
        for kind in LocationKind::ALL {
            let expected = kind.definition().weight() / total_weight;
            let observed = counts[kind as usize] as f64 / f64::from(trials);
            assert!(
                (observed - expected).abs() < 0.01,
                "{kind:?}: expected {expected:.4}, observed {observed:.4}"
            );
        }
    }
}
