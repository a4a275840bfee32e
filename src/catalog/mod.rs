pub mod catalog;
pub mod component;
pub mod weapon;

pub use catalog::{best_fitting, ComponentCatalog, TechSnapshot};
pub use component::{
    ArmorSpec, ArmorVariant, ComputerSpec, EcmSpec, EngineSpec, ManeuverSpec, Module, PerHull,
    ShieldSpec, SpecialFlags, SpecialSpec,
};
pub use weapon::{WeaponCategory, WeaponSpec};
