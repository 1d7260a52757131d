//! Reward descriptors for special-location interactions.
//!
//! Rewards are plain data. Nothing here touches player resources; the host
//! decides how to credit a [`Reward`].

use serde::{Deserialize, Serialize};

use crate::locations::LocationKind;
use crate::terrain::ResourceKind;

/// What a bonus applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusTarget {
    /// Production of one resource.
    Production(ResourceKind),
    /// Army attack strength.
    Attack,
    /// Army defense strength.
    Defense,
    /// Research speed.
    Research,
    /// Trade income.
    Trade,
    /// Scout sight radius.
    Vision,
}

/// A fractional modifier, e.g. `value = 0.1` is +10%.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BonusDescriptor {
    /// What is modified.
    pub target: BonusTarget,
    /// Fractional increase.
    pub value: f64,
}

impl BonusDescriptor {
    /// Creates a new bonus.
    #[must_use]
    pub const fn new(target: BonusTarget, value: f64) -> Self {
        Self { target, value }
    }
}

/// An artifact recovered from a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    /// Artifact name.
    pub name: String,
    /// Permanent bonus granted while held.
    pub bonus: BonusDescriptor,
}

/// A single reward produced by an interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Reward {
    /// One-off resource grant.
    Resource {
        /// Resource granted.
        resource: ResourceKind,
        /// Amount granted.
        amount: u32,
    },
    /// Technology points.
    TechPoints(u32),
    /// A unique item.
    Artifact(Artifact),
    /// An alliance offered by a local faction.
    Alliance {
        /// Faction offering the alliance.
        faction: String,
        /// Trade income bonus while allied.
        trade_bonus: f64,
    },
    /// A standing trade offer.
    TradeOffer {
        /// Resource the player gives.
        give: ResourceKind,
        /// Amount given.
        give_amount: u32,
        /// Resource the player receives.
        receive: ResourceKind,
        /// Amount received.
        receive_amount: u32,
    },
    /// A bonus that expires after a number of ticks.
    TemporaryBonus {
        /// The bonus.
        bonus: BonusDescriptor,
        /// Lifetime in game ticks.
        duration: u64,
    },
    /// A bonus that never expires (discovery bonuses).
    PermanentBonus(BonusDescriptor),
}

impl Reward {
    /// Shorthand for a resource grant.
    #[must_use]
    pub const fn resource(resource: ResourceKind, amount: u32) -> Self {
        Self::Resource { resource, amount }
    }
}

/// One-time bonus granted the first time a location type is used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiscoveryBonus {
    /// Flat resource grants.
    Resources(&'static [(ResourceKind, u32)]),
    /// A permanent modifier.
    Modifier(BonusDescriptor),
}

impl DiscoveryBonus {
    /// Expands the bonus into reward entries.
    #[must_use]
    pub fn rewards(&self) -> Vec<Reward> {
        match self {
            Self::Resources(grants) => grants
                .iter()
                .map(|&(resource, amount)| Reward::resource(resource, amount))
                .collect(),
            Self::Modifier(bonus) => vec![Reward::PermanentBonus(*bonus)],
        }
    }
}

const ARTIFACTS: &[(&str, BonusDescriptor)] = &[
    ("Crown of the First King", BonusDescriptor::new(BonusTarget::Trade, 0.10)),
    ("Sunforged Blade", BonusDescriptor::new(BonusTarget::Attack, 0.15)),
    ("Aegis of Dawn", BonusDescriptor::new(BonusTarget::Defense, 0.15)),
    ("Astrolabe of Ages", BonusDescriptor::new(BonusTarget::Research, 0.20)),
    ("Horn of Plenty", BonusDescriptor::new(BonusTarget::Production(ResourceKind::Food), 0.20)),
    ("Seeing Stone", BonusDescriptor::new(BonusTarget::Vision, 0.25)),
];

const DRAGON_HOARD: &[(&str, BonusDescriptor)] = &[
    ("Dragonscale Mantle", BonusDescriptor::new(BonusTarget::Defense, 0.25)),
    ("Wyrmfire Lance", BonusDescriptor::new(BonusTarget::Attack, 0.25)),
    ("Heart of the Mountain", BonusDescriptor::new(BonusTarget::Production(ResourceKind::Gold), 0.30)),
];

const FACTIONS: &[&str] = &[
    "Sand Riders",
    "Free Clans",
    "River Folk",
    "Hill Tribes",
    "Amber Caravan",
];

const TRADE_GOODS: [ResourceKind; 6] = [
    ResourceKind::Food,
    ResourceKind::Wood,
    ResourceKind::Stone,
    ResourceKind::Gold,
    ResourceKind::Iron,
    ResourceKind::Crystal,
];

/// Rolls rewards for interacting with a location of the given kind.
///
/// Pure apart from advancing `rng`.
pub fn generate_rewards(kind: LocationKind, rng: &mut fastrand::Rng) -> Vec<Reward> {
    use ResourceKind::{Crystal, Food, Gold, Iron, Knowledge, Mana, Stone, Wood};

    let mut rewards = Vec::new();
    match kind {
        LocationKind::AncientRuins => {
            rewards.push(Reward::resource(Gold, rng.u32(50..=150)));
            if rng.f64() < 0.5 {
                rewards.push(Reward::TechPoints(rng.u32(10..=30)));
            }
            if rng.f64() < 0.2 {
                rewards.push(roll_artifact(ARTIFACTS, rng));
            }
        },
        LocationKind::LostTemple => {
            rewards.push(Reward::TechPoints(rng.u32(30..=80)));
            rewards.push(Reward::resource(Mana, rng.u32(20..=50)));
            if rng.f64() < 0.4 {
                rewards.push(roll_artifact(ARTIFACTS, rng));
            }
        },
        LocationKind::SunkenCity => {
            rewards.push(Reward::resource(Gold, rng.u32(100..=250)));
            rewards.push(Reward::resource(Knowledge, rng.u32(20..=60)));
            if rng.f64() < 0.3 {
                rewards.push(roll_artifact(ARTIFACTS, rng));
            }
        },
        LocationKind::FallenLegion => {
            rewards.push(Reward::resource(Iron, rng.u32(40..=100)));
            if rng.f64() < 0.3 {
                rewards.push(Reward::Artifact(Artifact {
                    name: "Legion Standard".to_string(),
                    bonus: BonusDescriptor::new(BonusTarget::Attack, 0.10),
                }));
            }
        },
        LocationKind::GoldMine => {
            rewards.push(Reward::resource(Gold, rng.u32(100..=300)));
        },
        LocationKind::CrystalCave => {
            rewards.push(Reward::resource(Crystal, rng.u32(20..=60)));
            if rng.f64() < 0.3 {
                rewards.push(Reward::resource(Mana, rng.u32(10..=30)));
            }
        },
        LocationKind::FertileValley => {
            rewards.push(Reward::resource(Food, rng.u32(100..=250)));
            rewards.push(Reward::TemporaryBonus {
                bonus: BonusDescriptor::new(BonusTarget::Production(Food), 0.2),
                duration: 600,
            });
        },
        LocationKind::ElderGrove => {
            rewards.push(Reward::resource(Wood, rng.u32(100..=250)));
            if rng.f64() < 0.25 {
                rewards.push(Reward::TechPoints(rng.u32(5..=15)));
            }
        },
        LocationKind::Quarry => {
            rewards.push(Reward::resource(Stone, rng.u32(80..=200)));
        },
        LocationKind::Oasis => {
            rewards.push(Reward::resource(Food, rng.u32(50..=120)));
            rewards.push(Reward::TemporaryBonus {
                bonus: BonusDescriptor::new(BonusTarget::Production(Food), 0.1),
                duration: 900,
            });
        },
        LocationKind::DragonLair => {
            rewards.push(Reward::resource(Gold, rng.u32(300..=800)));
            rewards.push(roll_artifact(DRAGON_HOARD, rng));
            if rng.f64() < 0.5 {
                rewards.push(Reward::resource(Crystal, rng.u32(30..=80)));
            }
        },
        LocationKind::BanditCamp => {
            rewards.push(Reward::resource(Gold, rng.u32(50..=150)));
            rewards.push(Reward::resource(Iron, rng.u32(20..=60)));
        },
        LocationKind::MonsterNest => {
            rewards.push(Reward::resource(Gold, rng.u32(40..=100)));
            if rng.f64() < 0.3 {
                rewards.push(roll_artifact(ARTIFACTS, rng));
            }
        },
        LocationKind::NomadCamp => {
            rewards.push(roll_alliance(rng));
            if rng.f64() < 0.5 {
                rewards.push(roll_trade_offer(rng));
            }
        },
        LocationKind::TradingPost => {
            rewards.push(roll_trade_offer(rng));
            if rng.f64() < 0.5 {
                rewards.push(roll_trade_offer(rng));
            }
        },
        LocationKind::HiddenVillage => {
            rewards.push(roll_alliance(rng));
            rewards.push(Reward::TechPoints(rng.u32(10..=30)));
        },
        LocationKind::MagicSpring => {
            rewards.push(Reward::resource(Mana, rng.u32(30..=80)));
            rewards.push(Reward::TemporaryBonus {
                bonus: BonusDescriptor::new(BonusTarget::Production(Mana), 0.25),
                duration: 900,
            });
        },
        LocationKind::AncientShrine => {
            let target = if rng.bool() {
                BonusTarget::Attack
            } else {
                BonusTarget::Defense
            };
            rewards.push(Reward::TemporaryBonus {
                bonus: BonusDescriptor::new(target, 0.15),
                duration: 1200,
            });
            if rng.f64() < 0.3 {
                rewards.push(Reward::TechPoints(rng.u32(10..=25)));
            }
        },
        LocationKind::Portal => {
            rewards.push(Reward::TechPoints(rng.u32(50..=100)));
            rewards.push(Reward::TemporaryBonus {
                bonus: BonusDescriptor::new(BonusTarget::Vision, 0.5),
                duration: 300,
            });
        },
    }
    rewards
}

fn roll_artifact(table: &[(&str, BonusDescriptor)], rng: &mut fastrand::Rng) -> Reward {
    let (name, bonus) = table[rng.usize(..table.len())];
    Reward::Artifact(Artifact {
        name: name.to_string(),
        bonus,
    })
}

fn roll_alliance(rng: &mut fastrand::Rng) -> Reward {
    Reward::Alliance {
        faction: FACTIONS[rng.usize(..FACTIONS.len())].to_string(),
        trade_bonus: 0.05 + f64::from(rng.u8(0..=10)) / 100.0,
    }
}

fn roll_trade_offer(rng: &mut fastrand::Rng) -> Reward {
    let give = TRADE_GOODS[rng.usize(..TRADE_GOODS.len())];
    let receive = loop {
        let candidate = TRADE_GOODS[rng.usize(..TRADE_GOODS.len())];
        if candidate != give {
            break candidate;
        }
    };
    let give_amount = rng.u32(20..=100);
    Reward::TradeOffer {
        give,
        give_amount,
        receive,
        receive_amount: give_amount * rng.u32(8..=15) / 10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_rewards_something() {
        let mut rng = fastrand::Rng::with_seed(3);
        for kind in LocationKind::ALL {
            assert!(!generate_rewards(kind, &mut rng).is_empty(), "{kind:?} gave nothing");
        }
    }

    #[test]
    fn test_rewards_deterministic_for_seed() {
        let mut a = fastrand::Rng::with_seed(99);
        let mut b = fastrand::Rng::with_seed(99);
        for kind in LocationKind::ALL {
            assert_eq!(generate_rewards(kind, &mut a), generate_rewards(kind, &mut b));
        }
    }

    #[test]
    fn test_dragon_lair_always_has_artifact() {
        let mut rng = fastrand::Rng::with_seed(11);
        for _ in 0..20 {
            let rewards = generate_rewards(LocationKind::DragonLair, &mut rng);
            assert!(rewards.iter().any(|r| matches!(r, Reward::Artifact(_))));
        }
    }

    #[test]
    fn test_trade_offer_goods_differ() {
        let mut rng = fastrand::Rng::with_seed(5);
        for _ in 0..50 {
            if let Reward::TradeOffer { give, receive, .. } = roll_trade_offer(&mut rng) {
                assert_ne!(give, receive);
            }
        }
    }

    #[test]
    fn test_discovery_bonus_expansion() {
        let bonus = DiscoveryBonus::Resources(&[(ResourceKind::Gold, 100), (ResourceKind::Knowledge, 25)]);
        assert_eq!(
            bonus.rewards(),
            vec![
                Reward::resource(ResourceKind::Gold, 100),
                Reward::resource(ResourceKind::Knowledge, 25),
            ]
        );

        let modifier = DiscoveryBonus::Modifier(BonusDescriptor::new(BonusTarget::Vision, 0.1));
        assert!(matches!(modifier.rewards()[0], Reward::PermanentBonus(_)));
    }
}
