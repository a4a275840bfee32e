//! Candidate selection
//!
//! Same-role candidates of different hull sizes compete on budget, not
//! raw damage: the winner is the design the yards can field in numbers.
//! Scores live in a map keyed by score, so on an exact tie the later
//! insertion wins; the active design goes in last and therefore survives
//! ties, which keeps churn down.

use std::collections::BTreeMap;

use ordered_float::OrderedFloat;

use crate::catalog::ComponentCatalog;
use crate::race::RaceDesignWeights;

use super::design::ShipDesign;

/// Hulls affordable from the production budget at this design's cost
pub fn affordable_count(
    catalog: &ComponentCatalog,
    race: &RaceDesignWeights,
    budget: f32,
    design: &ShipDesign,
) -> f32 {
    let unit = design.unit_cost(catalog) * race.cost_multiplier(design.hull);
    if unit <= 0.0 {
        return 0.0;
    }
    (budget / unit).floor().max(0.0)
}

/// Pick the best design among the hull candidates and the active design
///
/// Score = affordable count x worst-case damage per turn. Degenerate
/// candidates (zero damage) only stay in the running when nothing armed
/// exists at all.
pub fn select_candidate(
    catalog: &ComponentCatalog,
    race: &RaceDesignWeights,
    budget: f32,
    candidates: Vec<ShipDesign>,
    active: Option<ShipDesign>,
) -> Option<ShipDesign> {
    let any_armed = candidates
        .iter()
        .chain(active.iter())
        .any(|d| d.per_turn_damage > 0.0);

    let mut scored: BTreeMap<OrderedFloat<f64>, ShipDesign> = BTreeMap::new();
    for design in candidates.into_iter().chain(active) {
        if any_armed && design.per_turn_damage <= 0.0 {
            continue;
        }
        let score =
            f64::from(affordable_count(catalog, race, budget, &design)) * f64::from(design.per_turn_damage);
        scored.insert(OrderedFloat(score), design);
    }

    scored.into_iter().next_back().map(|(_, design)| design)
}
