//! Design-engine tuning with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other.

/// Tuning values for the ship design synthesis and upgrade engine
///
/// These values have been tuned to produce good fleet behavior.
/// Changing them will affect how aggressively empires rework their designs.
#[derive(Debug, Clone)]
pub struct DesignTuning {
    // === WEAPON SCORING ===
    /// Damage bonus per battle computer mark
    ///
    /// Each computer level multiplies weapon damage by (1 + bonus * mark).
    /// At 0.15, a mark-4 computer is worth a 60% damage increase.
    pub computer_damage_bonus: f32,

    /// Divisor applied to limited-ammunition weapons
    ///
    /// A weapon carrying N shots contributes N / 10 of its nominal damage,
    /// reflecting that it runs dry over a long engagement.
    pub limited_shot_divisor: f32,

    /// Score multiplier for pairing a weapon with a cloaking device
    ///
    /// Cloaked ships get their first volley off unanswered, so the pairing
    /// is worth more than the raw space it displaces.
    pub wpn_cloak_factor: f32,

    /// Score multiplier for pairing a weapon with a combat teleporter
    pub wpn_teleport_factor: f32,

    /// Geometric decay base for the beam-range trade-off
    ///
    /// Trading weapon count for +1 effective range is accepted when the
    /// remaining count stays at or above count * factor^(bonus gained).
    /// Must stay below 1.0 or the trade can never be taken.
    pub wpn_range_factor: f32,

    /// Weight of the engine-speed ratio in the upgrade ratio
    ///
    /// The speed ratio is blended toward 1.0 by this factor, so at 0.70 a
    /// candidate twice as fast as the active design contributes x1.7, not x2.
    pub wpn_combat_speed_factor: f32,

    // === SYNTHESIS ===
    /// Fraction of remaining space a bomber gives its bombardment battery
    /// (and a destroyer its primary battery); the rest goes to the
    /// secondary anti-ship battery.
    pub primary_battery_ratio: f32,

    /// Rival tech trees assessed when building enemy ship targets
    pub ship_target_count: usize,

    /// Rival tech trees assessed when building enemy colony targets
    pub colony_target_count: usize,

    // === STABILITY GUARD ===
    /// Free-space fraction below which a current-engine design is left alone
    ///
    /// Below this, no meaningfully larger component has unlocked, so a
    /// resynthesis would churn the shipyards for nothing.
    pub stability_free_ratio: f32,

    /// Absolute free-space floor per hull tier for the stability guard
    ///
    /// The guard also fires when free space < (tier index + 1) * this value.
    pub stability_free_per_size: f32,

    // === PRODUCTION BUDGET ===
    /// Number of top-producing colonies sampled for the design budget
    pub budget_colony_sample: usize,

    /// Fraction of the sampled production treated as available for ships
    pub budget_production_ratio: f32,

    // === UPGRADE THRESHOLDS ===
    /// Upgrade ratio a candidate must clear while the empire is at war
    ///
    /// Higher than peacetime: replacing a fielded design mid-war costs
    /// committed hulls, so the candidate must be clearly better.
    pub upgrade_ratio_war: f32,

    /// Upgrade ratio a candidate must clear in peacetime
    pub upgrade_ratio_peace: f32,

    // === PARALLELIZATION ===
    /// Minimum empire count before the per-turn pass uses rayon
    ///
    /// Below this threshold, thread overhead exceeds benefits.
    pub parallel_threshold: usize,
}

impl Default for DesignTuning {
    fn default() -> Self {
        Self {
            // Weapon scoring
            computer_damage_bonus: 0.15,
            limited_shot_divisor: 10.0,
            wpn_cloak_factor: 1.3,
            wpn_teleport_factor: 1.2,
            wpn_range_factor: 0.95,
            wpn_combat_speed_factor: 0.70,

            // Synthesis
            primary_battery_ratio: 0.8,
            ship_target_count: 3,
            colony_target_count: 3,

            // Stability guard
            stability_free_ratio: 0.10,
            stability_free_per_size: 25.0,

            // Production budget
            budget_colony_sample: 5,
            budget_production_ratio: 0.5,

            // Upgrade thresholds (war > peace)
            upgrade_ratio_war: 1.5,
            upgrade_ratio_peace: 1.25,

            // Parallelization
            parallel_threshold: 8,
        }
    }
}

impl DesignTuning {
    /// Create a new tuning set with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate tuning values for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.wpn_range_factor <= 0.0 || self.wpn_range_factor >= 1.0 {
            return Err(format!(
                "wpn_range_factor ({}) must be in (0, 1) for the range trade to converge",
                self.wpn_range_factor
            ));
        }

        if self.upgrade_ratio_peace > self.upgrade_ratio_war {
            return Err(format!(
                "upgrade_ratio_peace ({}) should be <= upgrade_ratio_war ({})",
                self.upgrade_ratio_peace, self.upgrade_ratio_war
            ));
        }

        if !(0.0..=1.0).contains(&self.primary_battery_ratio) {
            return Err(format!(
                "primary_battery_ratio ({}) must be in [0, 1]",
                self.primary_battery_ratio
            ));
        }

        if self.limited_shot_divisor <= 0.0 {
            return Err("limited_shot_divisor must be positive".into());
        }

        Ok(())
    }
}

// === GLOBAL TUNING ACCESS ===

use std::sync::OnceLock;

static TUNING: OnceLock<DesignTuning> = OnceLock::new();

/// Get the global design tuning (initializes with defaults if not set)
pub fn tuning() -> &'static DesignTuning {
    TUNING.get_or_init(DesignTuning::default)
}

/// Set the global design tuning (can only be called once)
///
/// Returns Err if tuning was already set.
pub fn set_tuning(tuning: DesignTuning) -> Result<(), DesignTuning> {
    TUNING.set(tuning)
}
