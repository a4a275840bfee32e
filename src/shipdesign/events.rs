//! Events emitted by a design turn, for logs and UI feeds

use serde::{Deserialize, Serialize};

use crate::core::types::Mission;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DesignEvent {
    /// A role got its first design, or a candidate moved into a free slot
    Installed { mission: Mission, slot: usize, name: String },
    /// The active design was scrapped and the candidate took its slot
    Replaced { mission: Mission, slot: usize, old: String, new: String },
    /// The active design was flagged for eventual replacement
    MarkedObsolete { mission: Mission, slot: usize, countdown: i32 },
    /// A worthy candidate had nowhere to go this turn
    Deferred { mission: Mission },
    /// The stability guard left a settled design alone
    StabilitySkip { mission: Mission },
    /// A parked obsolete design ran out its countdown
    Scrapped { slot: usize, name: String },
}
