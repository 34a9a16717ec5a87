//! Systems - logic that operates on components

mod asset_motion;
mod person_state;

pub use asset_motion::*;
pub use person_state::*;
