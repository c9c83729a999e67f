use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unit not found: {0:?}")]
    UnitNotFound(crate::units::UnitId),

    #[error("Placement phase is over")]
    PlacementPhaseOver,

    #[error("Tile {0:?} is outside the placement zone for {1:?}")]
    OutsidePlacementZone(crate::core::types::TilePos, crate::core::types::Team),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FrontError>;
