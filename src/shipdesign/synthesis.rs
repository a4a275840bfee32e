//! Design synthesis
//!
//! Builds one candidate blueprint per (role, hull) request: fastest drive
//! and best-fitting computer first, then the five defensive pools in the
//! role's fitting order with unspent budget carried forward, then the
//! role's weapon plan over whatever space is left, then the beam-range
//! trade. A pass never fails; a hull that cannot arm anything comes back
//! with zero damage and loses in selection.

use crate::catalog::{best_fitting, ArmorVariant, ComponentCatalog, Module};
use crate::core::types::{HullSize, Mission};
use crate::race::RaceDesignWeights;

use super::design::ShipDesign;
use super::roles::{profile, resolve_pool_weights, Pool, WeaponPlan};
use super::targets::TargetSet;
use super::weaponry::{arm_batteries, best_weapon, upgrade_beam_range, BatteryRole};

/// Everything a synthesis pass reads; passed explicitly so concurrent
/// passes for different empires cannot interfere
#[derive(Debug, Clone, Copy)]
pub struct DesignContext<'a> {
    pub catalog: &'a ComponentCatalog,
    pub race: &'a RaceDesignWeights,
}

/// Synthesize the best design this catalog can field for a role on a hull
pub fn synthesize(ctx: &DesignContext, mission: Mission, hull: HullSize, targets: &TargetSet) -> ShipDesign {
    let catalog = ctx.catalog;
    let name = format!("{} {}", hull.label(), mission.label());
    let mut design = ShipDesign::new(name, mission, hull, catalog);

    // Fastest drive that fits, then the best computer that still leaves
    // the hull solvent
    for idx in (0..catalog.engines.len()).rev() {
        if design.install_engine(catalog, idx).is_ok() {
            break;
        }
    }
    for idx in (0..catalog.computers.len()).rev() {
        if design.install_computer(catalog, idx).is_ok() {
            break;
        }
    }

    // Colony ships carry their payload before anything else claims space
    if mission == Mission::ColonyShip {
        fit_colony_pod(ctx, &mut design);
    }

    fit_pools(ctx, &mut design);
    design.per_turn_damage = fit_weapons(ctx, &mut design, targets);

    // The range trade happens after scoring; the cached damage metric is
    // the one the batteries were chosen on
    if mission.is_combat() {
        upgrade_beam_range(catalog, &mut design);
    }

    debug_assert!(design.available_space() >= -1.0e-3, "synthesis overflowed the hull");
    design
}

fn fit_colony_pod(ctx: &DesignContext, design: &mut ShipDesign) {
    let catalog = ctx.catalog;
    for idx in (0..catalog.specials.len()).rev() {
        if !catalog.specials[idx].flags.colony_pod {
            continue;
        }
        if design.install_special(catalog, idx).is_ok() {
            return;
        }
    }
}

/// Divide the module budget across the five pools and fit each in the
/// role's order, carrying unspent budget into the next pool
fn fit_pools(ctx: &DesignContext, design: &mut ShipDesign) {
    let catalog = ctx.catalog;
    let race = ctx.race;
    let hull = design.hull;

    let modules_space = (design.total_space() * race.module_space_ratio).min(design.available_space());
    let weights = resolve_pool_weights(race, design.mission, hull);
    let weight_sum: u32 = weights.iter().sum();
    if weight_sum == 0 || modules_space <= 0.0 {
        return;
    }

    let mut slack = 0.0f32;
    for pool in profile(design.mission).fit_order {
        let share = modules_space * weights[pool.index()] as f32 / weight_sum as f32;
        let budget = share + slack;
        let spent = fit_pool(ctx, design, pool, budget);
        slack = budget - spent;
    }
}

/// Fit one pool's best entry within its budget; returns the space spent
fn fit_pool(ctx: &DesignContext, design: &mut ShipDesign, pool: Pool, budget: f32) -> f32 {
    let catalog = ctx.catalog;
    let race = ctx.race;
    let hull = design.hull;

    match pool {
        Pool::Shield => {
            if let Some(idx) = best_fitting(&catalog.shields, hull, budget) {
                let spent = catalog.shields[idx].space(hull);
                if design.install_shield(catalog, idx).is_ok() {
                    return spent;
                }
            }
        }
        Pool::Ecm => {
            if let Some(idx) = best_fitting(&catalog.ecm, hull, budget) {
                let spent = catalog.ecm[idx].space(hull);
                if design.install_ecm(catalog, idx).is_ok() {
                    return spent;
                }
            }
        }
        Pool::Maneuver => {
            let current_boost = catalog.maneuvers[design.maneuver].boost;
            for idx in (0..catalog.maneuvers.len()).rev() {
                let entry = &catalog.maneuvers[idx];
                if entry.space(hull) > budget {
                    continue;
                }
                // A swap that leaves combat speed unchanged is churn
                // unless the race's doctrine tolerates it
                if entry.boost == current_boost && !race.same_speed_maneuver {
                    continue;
                }
                let spent = entry.space(hull);
                if design.install_maneuver(catalog, idx).is_ok() {
                    return spent;
                }
            }
        }
        Pool::Armor => {
            for idx in (0..catalog.armors.len()).rev() {
                let entry = &catalog.armors[idx];
                if entry.variant == ArmorVariant::Reinforced && !race.reinforced_armor {
                    continue;
                }
                if entry.space(hull) > budget {
                    continue;
                }
                let spent = entry.space(hull);
                if design.install_armor(catalog, idx).is_ok() {
                    return spent;
                }
            }
        }
        Pool::Specials => {
            return fit_special_pool(ctx, design, budget);
        }
    }
    0.0
}

/// Fit the best utility special within the pool budget
///
/// Colony pods are payload, not a pool pick. Scouts go for sensor
/// packages first; everyone else just takes the best that fits.
fn fit_special_pool(ctx: &DesignContext, design: &mut ShipDesign, budget: f32) -> f32 {
    let catalog = ctx.catalog;
    let hull = design.hull;
    if design.free_special_slot().is_none() {
        return 0.0;
    }

    let installed: Vec<usize> = design.specials.iter().flatten().copied().collect();
    let scan = |scanner_only: bool, design: &mut ShipDesign| -> f32 {
        for idx in (0..catalog.specials.len()).rev() {
            let entry = &catalog.specials[idx];
            if entry.flags.colony_pod || installed.contains(&idx) {
                continue;
            }
            if scanner_only && !entry.flags.scanner {
                continue;
            }
            if entry.space(hull) > budget {
                continue;
            }
            let spent = entry.space(hull);
            if design.install_special(catalog, idx).is_ok() {
                return spent;
            }
        }
        0.0
    };

    if design.mission == Mission::Scout {
        let spent = scan(true, design);
        if spent > 0.0 {
            return spent;
        }
    }
    scan(false, design)
}

/// Spend all remaining space on the role's weapon plan; returns the
/// summed worst-case score of the batteries as they were chosen
fn fit_weapons(ctx: &DesignContext, design: &mut ShipDesign, targets: &TargetSet) -> f32 {
    let catalog = ctx.catalog;
    let cfg = crate::core::config::tuning();
    let bio_allowed = ctx.race.bio_weapons;
    let mut damage = 0.0;

    match profile(design.mission).weapon_plan {
        WeaponPlan::Unarmed => {}
        WeaponPlan::SingleBattery { slots } => {
            let budget = design.available_space();
            if let Some(choice) =
                best_weapon(catalog, design, budget, targets, BatteryRole::AntiShip, bio_allowed)
            {
                arm_batteries(catalog, design, &choice, slots);
                damage += choice.damage;
            }
        }
        WeaponPlan::DualBattery { primary_slots, secondary_slots } => {
            let primary_budget = design.available_space() * cfg.primary_battery_ratio;
            if let Some(choice) =
                best_weapon(catalog, design, primary_budget, targets, BatteryRole::AntiShip, bio_allowed)
            {
                arm_batteries(catalog, design, &choice, primary_slots);
                damage += choice.damage;
            }
            let rest = design.available_space();
            if let Some(choice) =
                best_weapon(catalog, design, rest, targets, BatteryRole::AntiShip, bio_allowed)
            {
                arm_batteries(catalog, design, &choice, secondary_slots);
                damage += choice.damage;
            }
        }
        WeaponPlan::Bombard => {
            let bomb_budget = design.available_space() * cfg.primary_battery_ratio;
            if let Some(choice) =
                best_weapon(catalog, design, bomb_budget, targets, BatteryRole::Bombard, bio_allowed)
            {
                arm_batteries(catalog, design, &choice, 1);
                damage += choice.damage;
            }
            let rest = design.available_space();
            if let Some(choice) =
                best_weapon(catalog, design, rest, targets, BatteryRole::AntiShip, bio_allowed)
            {
                arm_batteries(catalog, design, &choice, 1);
                damage += choice.damage;
            }
        }
    }

    damage
}
