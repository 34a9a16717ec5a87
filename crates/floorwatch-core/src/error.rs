use floorwatch_logic::error::ScenarioError;
use thiserror::Error;

/// Errors raised at the engine's edges. Ticks themselves never fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("no person with id `{0}` on the floor")]
    UnknownPerson(String),

    #[error("controllable asset `{0}` does not exist")]
    MissingAsset(String),

    #[error("invalid scenario: {0}")]
    Scenario(#[from] ScenarioError),
}
