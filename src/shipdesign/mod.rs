//! Ship design synthesis and upgrade decisions
//!
//! The per-turn flow: assess targets, synthesize one candidate per hull
//! size, select the best under the production budget, then decide whether
//! the fielded design keeps its slot.

pub mod design;
pub mod events;
pub mod roles;
pub mod selection;
pub mod slots;
pub mod synthesis;
pub mod targets;
pub mod upgrade;
pub mod weaponry;

pub use design::{ShipDesign, WeaponBattery, SPECIAL_SLOTS, WEAPON_SLOTS};
pub use events::DesignEvent;
pub use slots::{DesignSlots, DESIGN_SLOTS};
pub use synthesis::{synthesize, DesignContext};
pub use targets::{EnemyColonyTarget, EnemyShipTarget, TargetSet};
pub use upgrade::{run_all_design_turns, run_design_turn};
