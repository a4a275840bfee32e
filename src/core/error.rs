use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("module needs {needed} space but only {available} is free")]
    InsufficientSpace { needed: f32, available: f32 },

    #[error("design slot {0} is already occupied")]
    SlotOccupied(usize),

    #[error("no free design slot")]
    NoFreeSlot,

    #[error("weapon slot {0} is already armed")]
    WeaponSlotOccupied(usize),

    #[error("no free special slot")]
    NoFreeSpecialSlot,

    #[error("race table parse error: {0}")]
    RaceTableError(#[from] toml::de::Error),

    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ForgeError>;
