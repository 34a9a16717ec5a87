//! Floorwatch Core - Warehouse Floor Simulation Engine
//!
//! An ECS-based simulation of a warehouse floor: personnel wander between
//! zones while forklifts and other hazards drive around them, and every
//! person tick the floor's safety, efficiency and wellbeing indicators are
//! recomputed.
//!
//! # Architecture
//!
//! The simulation uses an Entity Component System (ECS) architecture via `hecs`:
//! - **Entities**: People and assets
//! - **Components**: Pure data attached to entities (Position, Motion, Occupancy, etc.)
//! - **Systems**: Logic that snapshots components, runs the pure rules from
//!   `floorwatch-logic`, and writes the results back
//!
//! Two clocks drive the systems: asset motion every 100 ms and person state
//! every 1000 ms, both advanced by [`engine::SimulationEngine::update`].
//!
//! # Example
//!
//! ```rust,no_run
//! use floorwatch_core::prelude::*;
//! use std::time::Duration;
//!
//! let mut engine = SimulationEngine::warehouse(42).unwrap();
//!
//! loop {
//!     engine.update(Duration::from_millis(100));
//!     let snapshot = engine.snapshot();
//!     println!("{:?}", snapshot.metrics.system_status);
//! }
//! ```

pub mod components;
pub mod control;
pub mod engine;
pub mod error;
pub mod generation;
pub mod snapshot;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::control::Direction;
    pub use crate::engine::SimulationEngine;
    pub use crate::error::EngineError;
    pub use crate::snapshot::{FloorSnapshot, PersonView};
    pub use floorwatch_logic::config::FloorConfig;
    pub use floorwatch_logic::metrics::{FloorMetrics, SystemStatus};
    pub use floorwatch_logic::model::{Asset, Person, SafetyStatus, Zone};
    pub use floorwatch_logic::scenario::Scenario;
}
