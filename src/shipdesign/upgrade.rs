//! Upgrade decision engine
//!
//! Once per empire turn, each role answers one question: keep the fielded
//! design, flag it obsolete, or replace it outright. Replacement trades a
//! performance gain against the disruption of scrapping hulls already
//! committed to the old design, so the engine moves through guards:
//! stability first, then expiry, identity, cheapness, and finally the
//! ratio test with its war-dependent threshold.

use rayon::prelude::*;

use crate::catalog::ComponentCatalog;
use crate::core::config::tuning;
use crate::core::types::{EmpireId, HullSize, Mission, Turn};
use crate::empire::Empire;

use super::design::ShipDesign;
use super::events::DesignEvent;
use super::roles::profile;
use super::selection::select_candidate;
use super::synthesis::{synthesize, DesignContext};
use super::targets::TargetSet;
use super::weaponry::design_damage;

/// Run one empire's full design pass: assessment, synthesis, selection,
/// and the upgrade decision for every role, in that order
pub fn run_design_turn(empire: &mut Empire, turn: Turn) -> Vec<DesignEvent> {
    tracing::debug!(turn, empire = %empire.name, "design turn");
    let mut events = Vec::new();

    // Age obsolete designs; parked ones fall off here
    for (slot, name) in empire.designs.tick_countdowns() {
        empire.fleet.clear_slot(slot);
        tracing::debug!(empire = %empire.name, slot, name = %name, "countdown expired, design scrapped");
        events.push(DesignEvent::Scrapped { slot, name });
    }

    let targets = empire.assess_targets();
    let budget = empire.production_budget();

    for mission in Mission::ALL {
        match mission {
            Mission::Scout => decide_scout(empire, &targets, &mut events),
            Mission::ColonyShip => decide_colony(empire, &targets, &mut events),
            _ => decide_combat(empire, mission, &targets, budget, &mut events),
        }
    }

    events
}

/// Design pass for a whole galaxy of empires
///
/// Empires are independent: each owns its catalog and design slots, so
/// big galaxies fan out across threads.
pub fn run_all_design_turns(empires: &mut [Empire], turn: Turn) -> Vec<(EmpireId, Vec<DesignEvent>)> {
    if empires.len() >= tuning().parallel_threshold {
        empires
            .par_iter_mut()
            .map(|e| (e.id, run_design_turn(e, turn)))
            .collect()
    } else {
        empires
            .iter_mut()
            .map(|e| (e.id, run_design_turn(e, turn)))
            .collect()
    }
}

/// Fighter / bomber / destroyer decision
fn decide_combat(
    empire: &mut Empire,
    mission: Mission,
    targets: &TargetSet,
    budget: f32,
    events: &mut Vec<DesignEvent>,
) {
    let cfg = tuning();
    let role = profile(mission);

    let active_slot = match empire.designs.active_slot(mission) {
        Some(slot) => slot,
        None => {
            bootstrap_combat(empire, mission, targets, budget, events);
            return;
        }
    };

    // Stability guard: a settled design on the best drive with a packed
    // hull gains nothing from resynthesis
    let guard = match empire.designs.get(active_slot) {
        Some(active) if !active.obsolete => {
            let free = active.available_space();
            let cramped = free / active.total_space() < cfg.stability_free_ratio
                || free < (active.hull.index() as f32 + 1.0) * cfg.stability_free_per_size;
            active.engine == empire.catalog.fastest_engine() && cramped
        }
        Some(_) => false,
        None => return,
    };
    if guard {
        if let Some(active) = empire.designs.active_mut(mission) {
            active.remaining_life += 1;
        }
        tracing::debug!(empire = %empire.name, ?mission, "stability guard held the design");
        events.push(DesignEvent::StabilitySkip { mission });
        return;
    }

    // Re-score the fielded design against this turn's targets so the
    // comparison is apples to apples
    let refreshed = match empire.designs.get(active_slot) {
        Some(active) => design_damage(&empire.catalog, active, targets),
        None => return,
    };
    if let Some(active) = empire.designs.active_mut(mission) {
        active.per_turn_damage = refreshed;
    }

    let candidate = match best_candidate(empire, mission, targets, budget) {
        Some(c) => c,
        None => return,
    };
    let active = match empire.designs.get(active_slot) {
        Some(a) => a.clone(),
        None => return,
    };

    // An obsolete design out of countdown goes regardless of anything else
    if active.obsolete && active.remaining_life < 0 {
        replace_in_slot(empire, active_slot, candidate, &active.name, events);
        return;
    }

    if candidate.same_loadout(&active) {
        return;
    }

    // Nearly nothing is committed to the old design: swap now
    let built = empire.fleet.built(active_slot);
    let committed = active.unit_cost(&empire.catalog) * built as f32;
    if committed <= role.cheap_threshold {
        tracing::debug!(
            empire = %empire.name,
            ?mission,
            committed,
            "committed value under threshold, replacing immediately"
        );
        replace_in_slot(empire, active_slot, candidate, &active.name, events);
        return;
    }

    let ratio = upgrade_ratio(&empire.catalog, &active, &candidate, mission);
    let threshold = if built == 0 {
        1.0
    } else if empire.is_at_war() {
        cfg.upgrade_ratio_war
    } else {
        cfg.upgrade_ratio_peace
    };

    if ratio <= threshold && !active.obsolete {
        return;
    }

    // Re-marking an already obsolete design would reset its countdown
    if !active.obsolete {
        if let Some(active) = empire.designs.active_mut(mission) {
            active.mark_obsolete(role.obsolete_countdown);
        }
        tracing::debug!(
            empire = %empire.name,
            ?mission,
            ratio,
            threshold,
            countdown = role.obsolete_countdown,
            "active design marked obsolete"
        );
        events.push(DesignEvent::MarkedObsolete {
            mission,
            slot: active_slot,
            countdown: role.obsolete_countdown,
        });
    }

    if let Some(free) = empire.designs.free_slot() {
        let name = candidate.name.clone();
        if empire.designs.install_active(free, candidate).is_ok() {
            tracing::debug!(empire = %empire.name, ?mission, slot = free, name = %name, "candidate installed");
            events.push(DesignEvent::Installed { mission, slot: free, name });
        }
    } else if empire.hostile_contacts() == 0 {
        // No room, but no one at the gates either: eat the scrap cost
        replace_in_slot(empire, active_slot, candidate, &active.name, events);
    } else {
        tracing::debug!(empire = %empire.name, ?mission, "no free slot under hostile contact, deferring");
        events.push(DesignEvent::Deferred { mission });
    }
}

/// Colony ships avoid stranding settlers: the fielded design only goes
/// once nothing of it is in transit, or once its countdown expires
fn decide_colony(empire: &mut Empire, targets: &TargetSet, events: &mut Vec<DesignEvent>) {
    let active_slot = match empire.designs.active_slot(Mission::ColonyShip) {
        Some(slot) => slot,
        None => {
            let candidate = colony_design(empire, targets);
            install_first(empire, candidate, events);
            return;
        }
    };

    let candidate = colony_design(empire, targets);
    let active = match empire.designs.get(active_slot) {
        Some(a) => a.clone(),
        None => return,
    };

    if candidate.same_loadout(&active) {
        return;
    }

    let expired = active.obsolete && active.remaining_life < 0;
    if expired || empire.fleet.outbound(active_slot) == 0 {
        replace_in_slot(empire, active_slot, candidate, &active.name, events);
        return;
    }

    if !active.obsolete {
        let countdown = profile(Mission::ColonyShip).obsolete_countdown;
        if let Some(active) = empire.designs.active_mut(Mission::ColonyShip) {
            active.mark_obsolete(countdown);
        }
        tracing::debug!(empire = %empire.name, "colony design obsoleted, waiting for ships in transit");
        events.push(DesignEvent::MarkedObsolete {
            mission: Mission::ColonyShip,
            slot: active_slot,
            countdown,
        });
    }
}

/// Scouts have no grace period: a strictly faster drive means a new scout
fn decide_scout(empire: &mut Empire, targets: &TargetSet, events: &mut Vec<DesignEvent>) {
    let active_slot = match empire.designs.active_slot(Mission::Scout) {
        Some(slot) => slot,
        None => {
            let ctx = DesignContext { catalog: &empire.catalog, race: &empire.weights };
            let candidate = synthesize(&ctx, Mission::Scout, HullSize::Small, targets);
            install_first(empire, candidate, events);
            return;
        }
    };

    let (faster_available, active_name) = {
        let catalog = &empire.catalog;
        let active = match empire.designs.get(active_slot) {
            Some(a) => a,
            None => return,
        };
        let fastest = catalog.engines[catalog.fastest_engine()].warp;
        let current = catalog.engines[active.engine].warp;
        (fastest > current, active.name.clone())
    };
    if !faster_available {
        return;
    }

    let ctx = DesignContext { catalog: &empire.catalog, race: &empire.weights };
    let candidate = synthesize(&ctx, Mission::Scout, HullSize::Small, targets);
    let identical = match empire.designs.get(active_slot) {
        Some(active) => candidate.same_loadout(active),
        None => return,
    };
    if identical {
        return;
    }
    replace_in_slot(empire, active_slot, candidate, &active_name, events);
}

/// Synthesize all four hulls and let the selector pick, with the fielded
/// design in the running
fn best_candidate(
    empire: &Empire,
    mission: Mission,
    targets: &TargetSet,
    budget: f32,
) -> Option<ShipDesign> {
    let ctx = DesignContext { catalog: &empire.catalog, race: &empire.weights };
    let candidates: Vec<ShipDesign> = HullSize::ALL
        .iter()
        .map(|&hull| synthesize(&ctx, mission, hull, targets))
        .collect();
    let active = empire.designs.active(mission).cloned();
    select_candidate(&empire.catalog, &empire.weights, budget, candidates, active)
}

/// Smallest hull whose synthesis manages to carry the colony pod
fn colony_design(empire: &Empire, targets: &TargetSet) -> ShipDesign {
    let ctx = DesignContext { catalog: &empire.catalog, race: &empire.weights };
    let mut fallback = None;
    for hull in HullSize::ALL {
        let design = synthesize(&ctx, Mission::ColonyShip, hull, targets);
        if design.has_special(&empire.catalog, |f| f.colony_pod) {
            return design;
        }
        fallback = Some(design);
    }
    match fallback {
        Some(design) => design,
        // HullSize::ALL is never empty; keep the compiler honest
        None => synthesize(&ctx, Mission::ColonyShip, HullSize::Huge, targets),
    }
}

fn bootstrap_combat(
    empire: &mut Empire,
    mission: Mission,
    targets: &TargetSet,
    budget: f32,
    events: &mut Vec<DesignEvent>,
) {
    if let Some(candidate) = best_candidate(empire, mission, targets, budget) {
        install_first(empire, candidate, events);
    }
}

/// First design for a role goes into any free slot
fn install_first(empire: &mut Empire, candidate: ShipDesign, events: &mut Vec<DesignEvent>) {
    let mission = candidate.mission;
    if let Some(slot) = empire.designs.free_slot() {
        let name = candidate.name.clone();
        if empire.designs.install_active(slot, candidate).is_ok() {
            tracing::debug!(empire = %empire.name, ?mission, slot, name = %name, "initial design installed");
            events.push(DesignEvent::Installed { mission, slot, name });
        }
    }
}

/// Scrap the slot's occupant, field the candidate in its place
fn replace_in_slot(
    empire: &mut Empire,
    slot: usize,
    candidate: ShipDesign,
    old_name: &str,
    events: &mut Vec<DesignEvent>,
) {
    let mission = candidate.mission;
    let new_name = candidate.name.clone();
    empire.fleet.clear_slot(slot);
    empire.designs.replace_active(slot, candidate);
    tracing::debug!(
        empire = %empire.name,
        ?mission,
        slot,
        old = %old_name,
        new = %new_name,
        "design replaced"
    );
    events.push(DesignEvent::Replaced {
        mission,
        slot,
        old: old_name.to_string(),
        new: new_name,
    });
}

/// How much better the candidate is, as a multiplicative ratio
///
/// Damage carries the comparison; the speed ratio is blended toward 1.0
/// by wpn_combat_speed_factor. Fighters also weigh targeting and
/// maneuver rating since they live or die by them.
fn upgrade_ratio(
    catalog: &ComponentCatalog,
    active: &ShipDesign,
    candidate: &ShipDesign,
    mission: Mission,
) -> f32 {
    let cfg = tuning();

    let dps_ratio = if active.per_turn_damage > 0.0 {
        candidate.per_turn_damage / active.per_turn_damage
    } else if candidate.per_turn_damage > 0.0 {
        // A toothless fielded design loses to anything armed
        f32::INFINITY
    } else {
        1.0
    };

    let speed_ratio =
        candidate.combat_speed(catalog) as f32 / active.combat_speed(catalog).max(1) as f32;
    let mut ratio = dps_ratio * (1.0 + cfg.wpn_combat_speed_factor * (speed_ratio - 1.0));

    if mission == Mission::Fighter {
        let computer_ratio = (1.0 + f32::from(catalog.computers[candidate.computer].mark))
            / (1.0 + f32::from(catalog.computers[active.computer].mark));
        let maneuver_ratio = (1.0 + f32::from(catalog.maneuvers[candidate.maneuver].boost))
            / (1.0 + f32::from(catalog.maneuvers[active.maneuver].boost));
        ratio *= computer_ratio * maneuver_ratio;
    }

    ratio
}
