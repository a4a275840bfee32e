//! Target assessment
//!
//! Before synthesizing, an empire sizes up the rivals it likes least and
//! builds pessimistic combat profiles from their tech trees. With fewer
//! known rivals than the assessed count, the empire's own tree pads the
//! list - a fleet should at least beat its own mirror.

use serde::{Deserialize, Serialize};

use crate::catalog::TechSnapshot;
use crate::core::config::tuning;

/// Rival warship profile a candidate design is scored against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyShipTarget {
    pub shield_level: u8,
    pub has_repulsor: bool,
    pub has_interdictor: bool,
}

/// Rival colony profile for bombardment scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyColonyTarget {
    pub shield_level: u8,
}

/// Assessed targets for one synthesis pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetSet {
    pub ships: Vec<EnemyShipTarget>,
    pub colonies: Vec<EnemyColonyTarget>,
}

impl From<TechSnapshot> for EnemyShipTarget {
    fn from(tech: TechSnapshot) -> Self {
        Self {
            shield_level: tech.shield_level,
            has_repulsor: tech.has_repulsor,
            has_interdictor: tech.has_interdictor,
        }
    }
}

impl From<TechSnapshot> for EnemyColonyTarget {
    fn from(tech: TechSnapshot) -> Self {
        Self {
            shield_level: tech.planet_shield_level,
        }
    }
}

/// Pick the tech trees a design pass should worry about
///
/// Rivals are sorted worst relations first (ascending score, stable) and
/// truncated to `count`; the empire's own snapshot fills any shortfall.
fn assessed_snapshots(own: TechSnapshot, rivals: &[(i32, TechSnapshot)], count: usize) -> Vec<TechSnapshot> {
    let mut sorted: Vec<&(i32, TechSnapshot)> = rivals.iter().collect();
    sorted.sort_by_key(|(score, _)| *score);

    let mut picked: Vec<TechSnapshot> = sorted.iter().take(count).map(|(_, t)| *t).collect();
    while picked.len() < count {
        picked.push(own);
    }
    picked
}

/// Build the target set for one empire's design pass
pub fn assess(own: TechSnapshot, rivals: &[(i32, TechSnapshot)]) -> TargetSet {
    let cfg = tuning();
    TargetSet {
        ships: assessed_snapshots(own, rivals, cfg.ship_target_count)
            .into_iter()
            .map(EnemyShipTarget::from)
            .collect(),
        colonies: assessed_snapshots(own, rivals, cfg.colony_target_count)
            .into_iter()
            .map(EnemyColonyTarget::from)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(shield: u8) -> TechSnapshot {
        TechSnapshot {
            shield_level: shield,
            planet_shield_level: shield * 2,
            has_repulsor: false,
            has_interdictor: false,
        }
    }

    #[test]
    fn test_worst_relations_first() {
        let own = snap(1);
        let rivals = vec![(40, snap(4)), (-20, snap(9)), (10, snap(6)), (90, snap(2))];
        let targets = assess(own, &rivals);

        // Worst three relations: -20, 10, 40
        let shields: Vec<u8> = targets.ships.iter().map(|t| t.shield_level).collect();
        assert_eq!(shields, vec![9, 6, 4]);
    }

    #[test]
    fn test_padded_with_own_tree() {
        let own = snap(3);
        let rivals = vec![(5, snap(7))];
        let targets = assess(own, &rivals);

        let shields: Vec<u8> = targets.ships.iter().map(|t| t.shield_level).collect();
        assert_eq!(shields, vec![7, 3, 3]);
    }

    #[test]
    fn test_no_rivals_yields_mirror_targets() {
        let own = snap(5);
        let targets = assess(own, &[]);
        assert_eq!(targets.ships.len(), 3);
        assert!(targets.ships.iter().all(|t| t.shield_level == 5));
        assert!(targets.colonies.iter().all(|t| t.shield_level == 10));
    }

    #[test]
    fn test_colony_targets_use_planet_shield() {
        let own = snap(2);
        let targets = assess(own, &[(0, snap(4))]);
        assert_eq!(targets.colonies[0].shield_level, 8);
    }
}
