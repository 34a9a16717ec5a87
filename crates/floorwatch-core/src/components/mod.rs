//! Component definitions for the ECS simulation.
//!
//! Components are pure data structs attached to entities.
//! They have no behavior - that lives in systems. Each entity kind also has
//! a pair of helpers that convert between its components and the flat
//! record from `floorwatch-logic`, which is what the rules operate on.

mod assets;
mod common;
mod people;

pub use assets::*;
pub use common::*;
pub use people::*;
