//! Diplomatic standing toward one rival
//!
//! Relation scores and hostility arrive from the diplomacy collaborator;
//! the design engine only reads them to rank threats and gate
//! replacement timing.

use serde::{Deserialize, Serialize};

use crate::catalog::TechSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// -100 (hatred) to +100 (alliance); lower relations are assessed first
    pub score: i32,
    pub at_war: bool,
    /// Hostile fleet contact this turn; blocks risky design swaps
    pub hostile: bool,
    /// Last observed summary of the rival's tech tree
    pub tech: TechSnapshot,
}

impl Relation {
    pub fn neutral(tech: TechSnapshot) -> Self {
        Self {
            score: 0,
            at_war: false,
            hostile: false,
            tech,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_relation() {
        let rel = Relation::neutral(TechSnapshot::default());
        assert_eq!(rel.score, 0);
        assert!(!rel.at_war);
        assert!(!rel.hostile);
    }
}
