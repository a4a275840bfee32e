//! Weapon selection and battery layout
//!
//! Weapons are scored pessimistically: a candidate's value is the minimum
//! damage it manages across every assessed target, so a design is never
//! tuned to the one rival it happens to beat. Scratch damage specs are
//! plain per-call values.

use crate::catalog::{ComponentCatalog, Module, WeaponCategory, WeaponSpec};
use crate::core::config::tuning;

use super::design::{ShipDesign, WEAPON_SLOTS};
use super::targets::TargetSet;

/// Which job a battery is being picked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryRole {
    AntiShip,
    Bombard,
}

/// Best (weapon, special, count) found for one battery, with its
/// worst-case damage score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignDamageSpec {
    pub weapon: usize,
    pub special: Option<usize>,
    pub count: u32,
    pub damage: f32,
}

/// Capabilities that modify a volley's worth
#[derive(Debug, Clone, Copy, Default)]
struct StrikeContext {
    cloak: bool,
    teleporter: bool,
    range_bonus: u8,
}

impl StrikeContext {
    fn of_design(catalog: &ComponentCatalog, design: &ShipDesign) -> Self {
        Self {
            cloak: design.has_special(catalog, |f| f.cloaking),
            teleporter: design.has_special(catalog, |f| f.teleporter),
            range_bonus: design.range_bonus(catalog),
        }
    }

    fn with_special(self, catalog: &ComponentCatalog, idx: usize) -> Self {
        let flags = &catalog.specials[idx].flags;
        Self {
            cloak: self.cloak || flags.cloaking,
            teleporter: self.teleporter || flags.teleporter,
            range_bonus: self.range_bonus.max(flags.range_bonus),
        }
    }

    fn multiplier(&self) -> f32 {
        let cfg = tuning();
        let mut m = 1.0;
        if self.cloak {
            m *= cfg.wpn_cloak_factor;
        }
        if self.teleporter {
            m *= cfg.wpn_teleport_factor;
        }
        m
    }
}

/// Damage per combat turn for `count` mounts against a `shield`-level
/// target, before strike multipliers
fn volley(weapon: &WeaponSpec, count: u32, computer_mark: u8, shield: u8) -> f32 {
    let cfg = tuning();
    let mut dmg = count as f32 * weapon.firepower(shield);
    if let Some(shots) = weapon.shots {
        dmg *= f32::from(shots) / cfg.limited_shot_divisor;
    }
    dmg /= f32::from(weapon.turns_to_fire.max(1));
    dmg * (1.0 + cfg.computer_damage_bonus * f32::from(computer_mark))
}

/// Minimum damage across every assessed target
fn worst_case(
    weapon: &WeaponSpec,
    count: u32,
    computer_mark: u8,
    ctx: &StrikeContext,
    targets: &TargetSet,
    battery: BatteryRole,
) -> f32 {
    let multiplier = ctx.multiplier();
    let mut worst = f32::INFINITY;

    match battery {
        BatteryRole::AntiShip => {
            for target in &targets.ships {
                let dmg = if weapon.ground_only {
                    0.0
                } else if target.has_repulsor && weapon.range < 2 && ctx.range_bonus < 2 {
                    // Pushed out of reach before the volley lands
                    0.0
                } else {
                    volley(weapon, count, computer_mark, target.shield_level) * multiplier
                };
                worst = worst.min(dmg);
            }
        }
        BatteryRole::Bombard => {
            for target in &targets.colonies {
                let dmg = volley(weapon, count, computer_mark, target.shield_level) * multiplier;
                worst = worst.min(dmg);
            }
        }
    }

    if worst.is_finite() {
        worst
    } else {
        // No targets assessed: nothing to score against
        0.0
    }
}

/// Pick the best (weapon, special, count) for one battery
///
/// Every catalog weapon is considered unless the variety rule (at most one
/// beam, missile, and streaming type per design) or the bio-doctrine flag
/// excludes it. Each candidate is also tried paired with every
/// cloak/teleport/range special that leaves room for at least one mount.
pub fn best_weapon(
    catalog: &ComponentCatalog,
    design: &ShipDesign,
    space_budget: f32,
    targets: &TargetSet,
    battery: BatteryRole,
    bio_allowed: bool,
) -> Option<DesignDamageSpec> {
    if space_budget <= 0.0 {
        return None;
    }

    let computer_mark = catalog.computers[design.computer].mark;
    let used = design.used_categories(catalog);
    let base_ctx = StrikeContext::of_design(catalog, design);
    let can_pair = design.free_special_slot().is_some();

    let mut best: Option<DesignDamageSpec> = None;
    let consider = |spec: DesignDamageSpec, best: &mut Option<DesignDamageSpec>| {
        if best.map_or(true, |b| spec.damage > b.damage) {
            *best = Some(spec);
        }
    };

    for (wi, weapon) in catalog.weapons.iter().enumerate() {
        match battery {
            BatteryRole::AntiShip => {
                if weapon.is_bombard() || used.contains(&weapon.category) {
                    continue;
                }
            }
            BatteryRole::Bombard => {
                if !weapon.is_bombard() || (weapon.bio && !bio_allowed) {
                    continue;
                }
            }
        }

        let unit = weapon.space(design.hull);
        if unit <= 0.0 {
            continue;
        }
        let count = (space_budget / unit).floor() as u32;
        if count == 0 {
            continue;
        }

        consider(
            DesignDamageSpec {
                weapon: wi,
                special: None,
                count,
                damage: worst_case(weapon, count, computer_mark, &base_ctx, targets, battery),
            },
            &mut best,
        );

        if !can_pair {
            continue;
        }
        for (si, special) in catalog.specials.iter().enumerate() {
            if !special.pairs_with_weapons() {
                continue;
            }
            let special_space = special.space(design.hull);
            if special_space >= space_budget {
                continue;
            }
            let paired_count = ((space_budget - special_space) / unit).floor() as u32;
            if paired_count == 0 {
                continue;
            }
            let ctx = base_ctx.with_special(catalog, si);
            consider(
                DesignDamageSpec {
                    weapon: wi,
                    special: Some(si),
                    count: paired_count,
                    damage: worst_case(weapon, paired_count, computer_mark, &ctx, targets, battery),
                },
                &mut best,
            );
        }
    }

    best
}

/// Spread `total` mounts across `slots` batteries, biggest share first
///
/// Slot i takes ceil(remaining / slots left), so the result sums exactly
/// to the total and never increases along the slot order.
pub fn distribute_counts(total: u32, slots: usize) -> Vec<u32> {
    let mut counts = Vec::with_capacity(slots);
    let mut remaining = total;
    let mut left = slots as u32;
    while left > 0 {
        let share = (remaining + left - 1) / left;
        counts.push(share);
        remaining -= share;
        left -= 1;
    }
    counts
}

/// Install a chosen battery into the design's free weapon slots
///
/// Mount counts are spread over up to `slots` batteries starting at the
/// first free slot; the paired special (if any) is fitted first.
pub fn arm_batteries(
    catalog: &ComponentCatalog,
    design: &mut ShipDesign,
    choice: &DesignDamageSpec,
    slots: usize,
) {
    if let Some(si) = choice.special {
        // The guns still fit on their own if the pairing falls through
        let _ = design.install_special(catalog, si);
    }
    let start = match design.free_weapon_slot() {
        Some(s) => s,
        None => return,
    };
    let slots = slots.min(WEAPON_SLOTS - start);
    for (i, count) in distribute_counts(choice.count, slots).into_iter().enumerate() {
        if count == 0 {
            break;
        }
        if design.install_weapon(catalog, start + i, choice.weapon, count).is_err() {
            break;
        }
    }
}

/// Worst-case damage per turn of the finished design
///
/// Anti-ship batteries are scored against the ship targets, bombardment
/// batteries against the colony targets; battery scores add up.
pub fn design_damage(catalog: &ComponentCatalog, design: &ShipDesign, targets: &TargetSet) -> f32 {
    let computer_mark = catalog.computers[design.computer].mark;
    let ctx = StrikeContext::of_design(catalog, design);

    design
        .weapons
        .iter()
        .flatten()
        .map(|battery| {
            let weapon = &catalog.weapons[battery.weapon];
            let role = if weapon.is_bombard() {
                BatteryRole::Bombard
            } else {
                BatteryRole::AntiShip
            };
            worst_case(weapon, battery.count, computer_mark, &ctx, targets, role)
        })
        .sum()
}

/// Trade mounts for a beam-range special when the loss is acceptable
///
/// For a special granting `bonus` over the current `b`, the trade is taken
/// only if the surviving count stays at or above
/// ceil(count * wpn_range_factor^(bonus - b)).
pub fn upgrade_beam_range(catalog: &ComponentCatalog, design: &mut ShipDesign) -> bool {
    let cfg = tuning();
    if design.free_special_slot().is_none() {
        return false;
    }

    let current = design.range_bonus(catalog);
    let beam_slots: Vec<usize> = design
        .weapons
        .iter()
        .enumerate()
        .filter(|(_, b)| {
            b.map_or(false, |b| {
                let w = &catalog.weapons[b.weapon];
                w.category == WeaponCategory::Beam && !w.is_bombard()
            })
        })
        .map(|(i, _)| i)
        .collect();
    if beam_slots.is_empty() {
        return false;
    }

    // The variety rule means every beam battery carries the same type
    let weapon = match design.weapons[beam_slots[0]] {
        Some(b) => b.weapon,
        None => return false,
    };
    let unit = catalog.weapons[weapon].space(design.hull);
    let old_count: u32 = beam_slots
        .iter()
        .filter_map(|&s| design.weapons[s].map(|b| b.count))
        .sum();
    if old_count == 0 || unit <= 0.0 {
        return false;
    }

    // Best range special first
    for (si, special) in catalog.specials.iter().enumerate().rev() {
        let bonus = special.flags.range_bonus;
        if bonus < 2 || bonus <= current {
            continue;
        }

        let deficit = special.space(design.hull) - design.available_space();
        let cut = if deficit > 0.0 {
            (deficit / unit).ceil() as u32
        } else {
            0
        };
        if cut > old_count {
            continue;
        }

        let new_count = old_count - cut;
        let min_required =
            (old_count as f32 * cfg.wpn_range_factor.powi(i32::from(bonus - current))).ceil() as u32;
        if new_count == 0 || new_count < min_required {
            continue;
        }

        let mut trial = design.clone();
        let mut to_cut = cut;
        let mut fit = true;
        for &slot in beam_slots.iter().rev() {
            if to_cut == 0 {
                break;
            }
            let have = match trial.weapons[slot] {
                Some(b) => b.count,
                None => 0,
            };
            let take = have.min(to_cut);
            if trial.set_weapon_count(catalog, slot, have - take).is_err() {
                fit = false;
                break;
            }
            to_cut -= take;
        }
        if !fit || trial.install_special(catalog, si).is_err() {
            continue;
        }

        *design = trial;
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ComponentCatalog;
    use crate::core::types::{HullSize, Mission};
    use crate::shipdesign::targets::{EnemyColonyTarget, EnemyShipTarget};

    fn catalog() -> ComponentCatalog {
        ComponentCatalog::with_defaults()
    }

    fn ship_target(shield: u8, repulsor: bool) -> EnemyShipTarget {
        EnemyShipTarget {
            shield_level: shield,
            has_repulsor: repulsor,
            has_interdictor: false,
        }
    }

    fn targets(ships: Vec<EnemyShipTarget>) -> TargetSet {
        TargetSet {
            ships,
            colonies: vec![EnemyColonyTarget { shield_level: 0 }],
        }
    }

    #[test]
    fn test_distribute_exact_example() {
        assert_eq!(distribute_counts(22, 4), vec![6, 6, 5, 5]);
    }

    #[test]
    fn test_distribute_sums_and_never_increases() {
        for total in 0..60u32 {
            for slots in 1..=4usize {
                let counts = distribute_counts(total, slots);
                assert_eq!(counts.len(), slots);
                assert_eq!(counts.iter().sum::<u32>(), total);
                for pair in counts.windows(2) {
                    assert!(pair[0] >= pair[1], "counts must not increase: {:?}", counts);
                }
            }
        }
    }

    #[test]
    fn test_best_weapon_scores_worst_case() {
        let catalog = catalog();
        let design = ShipDesign::new("T", Mission::Fighter, HullSize::Large, &catalog);

        // One naked rival, one heavily shielded: the pick must survive the
        // shielded one
        let set = targets(vec![ship_target(0, false), ship_target(9, false)]);
        let choice = best_weapon(&catalog, &design, 200.0, &set, BatteryRole::AntiShip, false)
            .expect("an armed pick must exist");
        let w = &catalog.weapons[choice.weapon];
        assert!(
            w.firepower(9) > 0.0,
            "worst-case pick {} must still hurt a level-9 shield",
            w.name
        );
        assert!(choice.damage > 0.0);
    }

    #[test]
    fn test_repulsor_rules_out_short_beams() {
        let catalog = catalog();
        let design = ShipDesign::new("T", Mission::Fighter, HullSize::Medium, &catalog);
        let set = targets(vec![ship_target(0, true)]);

        let choice = best_weapon(&catalog, &design, 60.0, &set, BatteryRole::AntiShip, false)
            .expect("something must still score");
        let w = &catalog.weapons[choice.weapon];
        let range_ok = w.range >= 2
            || choice
                .special
                .map_or(false, |si| catalog.specials[si].flags.range_bonus >= 2);
        assert!(range_ok, "{} cannot reach past a repulsor", w.name);
    }

    #[test]
    fn test_bombard_respects_bio_doctrine() {
        let catalog = catalog();
        let design = ShipDesign::new("T", Mission::Bomber, HullSize::Medium, &catalog);
        let set = TargetSet {
            ships: vec![],
            colonies: vec![EnemyColonyTarget { shield_level: 0 }],
        };

        let with_bio = best_weapon(&catalog, &design, 100.0, &set, BatteryRole::Bombard, true);
        let without = best_weapon(&catalog, &design, 100.0, &set, BatteryRole::Bombard, false);
        assert!(with_bio.is_some() && without.is_some());
        let w = &catalog.weapons[without.unwrap().weapon];
        assert!(!w.bio, "bio pods are off the table for this doctrine");
    }

    #[test]
    fn test_variety_rule_blocks_second_beam() {
        let catalog = catalog();
        let mut design = ShipDesign::new("T", Mission::Destroyer, HullSize::Huge, &catalog);
        let laser = catalog.weapons.iter().position(|w| w.name == "Laser Cannon").unwrap();
        design.install_weapon(&catalog, 0, laser, 2).unwrap();

        let set = targets(vec![ship_target(0, false)]);
        let choice = best_weapon(&catalog, &design, 300.0, &set, BatteryRole::AntiShip, false)
            .expect("non-beam options remain");
        assert_ne!(
            catalog.weapons[choice.weapon].category,
            WeaponCategory::Beam,
            "a second beam type must not be picked"
        );
    }

    #[test]
    fn test_arm_batteries_distributes_from_first_free_slot() {
        let catalog = catalog();
        let mut design = ShipDesign::new("T", Mission::Fighter, HullSize::Huge, &catalog);
        let laser = catalog.weapons.iter().position(|w| w.name == "Laser Cannon").unwrap();
        let choice = DesignDamageSpec {
            weapon: laser,
            special: None,
            count: 22,
            damage: 1.0,
        };
        arm_batteries(&catalog, &mut design, &choice, 4);

        let counts: Vec<u32> = design.weapons.iter().flatten().map(|b| b.count).collect();
        assert_eq!(counts, vec![6, 6, 5, 5]);
    }

    #[test]
    fn test_range_trade_requires_surviving_count() {
        let catalog = catalog();
        let mut design = ShipDesign::new("T", Mission::Fighter, HullSize::Small, &catalog);
        let laser = catalog.weapons.iter().position(|w| w.name == "Laser Cannon").unwrap();
        // Two mounts and a packed hull: the focuser would eat both
        design.install_weapon(&catalog, 0, laser, 2).unwrap();
        let before = design.clone();
        let traded = upgrade_beam_range(&catalog, &mut design);
        if !traded {
            assert!(design.same_loadout(&before), "a refused trade must not touch the design");
        } else {
            let count: u32 = design.weapons.iter().flatten().map(|b| b.count).sum();
            assert!(count >= 1);
            assert!(design.range_bonus(&catalog) >= 2);
        }
    }
}
