//! Interacting with special locations.

use empire_common::LocationId;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use crate::locations::{LocationKind, SpecialLocation};
use crate::rewards::{generate_rewards, Reward};

/// Errors that can occur when interacting with a location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InteractionError {
    /// No location has this id
    #[error("location {0} not found")]
    NotFound(LocationId),

    /// The location has already been used
    #[error("location {0} has already been interacted with")]
    AlreadyInteracted(LocationId),
}

/// Result type for interaction operations.
pub type InteractionResult<T> = Result<T, InteractionError>;

/// What an interaction produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionOutcome {
    /// Location interacted with
    pub location: LocationId,
    /// Its type
    pub kind: LocationKind,
    /// Rewards to credit, discovery bonus included
    pub rewards: Vec<Reward>,
    /// Whether this interaction consumed the one-time discovery bonus
    pub discovery_bonus_applied: bool,
}

/// Marks a location as used and rolls its rewards.
///
/// The discovery bonus, if the type has one, is added the first time only.
pub(crate) fn interact(location: &mut SpecialLocation, rng: &mut fastrand::Rng) -> InteractionResult<InteractionOutcome> {
    if location.interacted {
        return Err(InteractionError::AlreadyInteracted(location.id));
    }
    location.interacted = true;

    let mut rewards = generate_rewards(location.kind, rng);
    let mut discovery_bonus_applied = false;
    if !location.bonus_applied {
        if let Some(bonus) = location.definition().discovery_bonus {
            rewards.extend(bonus.rewards());
            location.bonus_applied = true;
            discovery_bonus_applied = true;
        }
    }

    trace!(
        location = %location.id,
        kind = ?location.kind,
        rewards = rewards.len(),
        discovery_bonus_applied,
        "Location interaction"
    );

    Ok(InteractionOutcome {
        location: location.id,
        kind: location.kind,
        rewards,
        discovery_bonus_applied,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use empire_common::GridCoord;

    fn location(kind: LocationKind) -> SpecialLocation {
        let mut rng = fastrand::Rng::with_seed(3);
        SpecialLocation::roll(LocationId::new(0), kind, GridCoord::new(1, 1), &mut rng)
    }

    #[test]
    fn test_interact_once() {
        let mut loc = location(LocationKind::GoldMine);
        let mut rng = fastrand::Rng::with_seed(1);

        let outcome = interact(&mut loc, &mut rng).expect("first interaction");
        assert_eq!(outcome.location, LocationId::new(0));
        assert!(!outcome.rewards.is_empty());
        assert!(loc.interacted);

        assert_eq!(
            interact(&mut loc, &mut rng),
            Err(InteractionError::AlreadyInteracted(LocationId::new(0)))
        );
    }

    #[test]
    fn test_discovery_bonus_applied_once() {
        let kind = LocationKind::ALL
            .into_iter()
            .find(|k| k.definition().discovery_bonus.is_some())
            .expect("catalog has a discovery bonus");
        let mut loc = location(kind);
        let mut rng = fastrand::Rng::with_seed(1);

        let outcome = interact(&mut loc, &mut rng).expect("first interaction");
        assert!(outcome.discovery_bonus_applied);
        assert!(loc.bonus_applied);

        // Reset the interaction flag only: the bonus must not come back.
        loc.interacted = false;
        let outcome = interact(&mut loc, &mut rng).expect("second interaction");
        assert!(!outcome.discovery_bonus_applied);
    }

    #[test]
    fn test_no_bonus_without_definition() {
        let kind = LocationKind::ALL
            .into_iter()
            .find(|k| k.definition().discovery_bonus.is_none())
            .expect("catalog has a type without bonus");
        let mut loc = location(kind);
        let mut rng = fastrand::Rng::with_seed(1);

        let outcome = interact(&mut loc, &mut rng).expect("interaction");
        assert!(!outcome.discovery_bonus_applied);
        assert!(!loc.bonus_applied);
    }
}
