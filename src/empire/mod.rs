//! Empire state consumed by the design engine
//!
//! Models the collaborator surfaces just far enough to drive design
//! decisions: colonies for the production budget, relations for threat
//! assessment and war gating, the fleet ledger for disruption cost, and
//! the design-slot store the engine mutates.

pub mod fleet;
pub mod relations;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::catalog::{ComponentCatalog, TechSnapshot};
use crate::core::config::tuning;
use crate::core::types::EmpireId;
use crate::race::{Race, RaceDesignWeights};
use crate::shipdesign::slots::DesignSlots;
use crate::shipdesign::targets::{assess, TargetSet};

pub use fleet::FleetLedger;
pub use relations::Relation;

/// One settled world; only its industrial output matters here
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Colony {
    pub name: String,
    pub production: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Empire {
    pub id: EmpireId,
    pub name: String,
    pub race: Race,
    pub weights: RaceDesignWeights,
    pub catalog: ComponentCatalog,
    pub relations: AHashMap<EmpireId, Relation>,
    pub colonies: Vec<Colony>,
    pub fleet: FleetLedger,
    pub designs: DesignSlots,
}

impl Empire {
    pub fn new(id: EmpireId, name: impl Into<String>, race: Race, catalog: ComponentCatalog) -> Self {
        Self {
            id,
            name: name.into(),
            race,
            weights: race.design_weights(),
            catalog,
            relations: AHashMap::new(),
            colonies: Vec::new(),
            fleet: FleetLedger::default(),
            designs: DesignSlots::default(),
        }
    }

    pub fn is_at_war(&self) -> bool {
        self.relations.values().any(|r| r.at_war)
    }

    pub fn hostile_contacts(&self) -> usize {
        self.relations.values().filter(|r| r.hostile).count()
    }

    /// Build this turn's enemy profiles from the worst-relation rivals
    pub fn assess_targets(&self) -> TargetSet {
        let rivals: Vec<(i32, TechSnapshot)> =
            self.relations.values().map(|r| (r.score, r.tech)).collect();
        assess(self.catalog.snapshot(), &rivals)
    }

    /// Half the output of the top producing colonies, the share the
    /// economy lets the yards spend on new hulls
    pub fn production_budget(&self) -> f32 {
        let cfg = tuning();
        let mut output: Vec<f32> = self.colonies.iter().map(|c| c.production).collect();
        output.sort_by(|a, b| b.total_cmp(a));
        output.iter().take(cfg.budget_colony_sample).sum::<f32>() * cfg.budget_production_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ComponentCatalog;

    fn empire() -> Empire {
        Empire::new(EmpireId(1), "Dominion", Race::Terran, ComponentCatalog::with_era(10))
    }

    fn colony(name: &str, production: f32) -> Colony {
        Colony { name: name.into(), production }
    }

    #[test]
    fn test_production_budget_samples_top_colonies() {
        let mut empire = empire();
        for (i, p) in [10.0, 80.0, 30.0, 60.0, 20.0, 50.0, 40.0].iter().enumerate() {
            empire.colonies.push(colony(&format!("World {}", i), *p));
        }
        // Top five: 80 + 60 + 50 + 40 + 30 = 260, halved
        assert_eq!(empire.production_budget(), 130.0);
    }

    #[test]
    fn test_production_budget_few_colonies() {
        let mut empire = empire();
        empire.colonies.push(colony("Home", 40.0));
        assert_eq!(empire.production_budget(), 20.0);
    }

    #[test]
    fn test_war_and_hostiles() {
        let mut empire = empire();
        assert!(!empire.is_at_war());

        let mut rel = Relation::neutral(TechSnapshot::default());
        rel.at_war = true;
        rel.hostile = true;
        empire.relations.insert(EmpireId(2), rel);

        assert!(empire.is_at_war());
        assert_eq!(empire.hostile_contacts(), 1);
    }

    #[test]
    fn test_assess_uses_own_tree_when_alone() {
        let empire = empire();
        let targets = empire.assess_targets();
        let own = empire.catalog.snapshot();
        assert!(targets.ships.iter().all(|t| t.shield_level == own.shield_level));
    }
}
