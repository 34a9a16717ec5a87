//! Validation errors for configuration and scenario tables.
//!
//! The tick path itself cannot fail; these only surface when a floor is
//! being set up.

/// Raised when a config or scenario breaks an invariant the tick engine relies on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScenarioError {
    #[error("{0} must be greater than zero")]
    NonPositivePeriod(&'static str),

    #[error("world {width}x{height} leaves no walkable area with padding {padding}")]
    WorldTooSmall { width: f32, height: f32, padding: f32 },

    #[error("stability floor {floor} is above ceiling {ceiling}")]
    InvertedStabilityRange { floor: f32, ceiling: f32 },

    #[error("zone capacity must be positive, got {0}")]
    NonPositiveCapacity(f32),

    #[error("duplicate zone id: {0}")]
    DuplicateZone(String),

    #[error("duplicate asset id: {0}")]
    DuplicateAsset(String),

    #[error("duplicate person id: {0}")]
    DuplicatePerson(String),

    /// `danger_radius` must be strictly below `warning_radius`.
    #[error("asset {asset}: danger radius {danger} must be below warning radius {warning}")]
    InvalidHazardRadii {
        asset: String,
        warning: f32,
        danger: f32,
    },
}
