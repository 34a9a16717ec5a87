//! Pure simulation logic for Floorwatch.
//!
//! Everything in this crate is independent of the ECS, the clock and the
//! random source. Functions take plain data and return results, so every
//! rule can be unit-tested with hand-built people, assets and zones.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | World dimensions, tick periods, radii and thresholds |
//! | [`efficiency`] | Work/rest ratio classifier |
//! | [`error`] | Scenario and configuration validation errors |
//! | [`geometry`] | Points, zone membership, distance, world clamping, time formatting |
//! | [`hazard`] | Asset bounce motion and proximity hazard scan |
//! | [`metrics`] | Bottlenecks, system status, global efficiency, dashboard counters |
//! | [`model`] | Zones, access points, assets, people, wellbeing |
//! | [`safety`] | Standalone safety rule set and composite assessment |
//! | [`scenario`] | The default warehouse floor and its validation |
//! | [`tick`] | Per-person state step for one person tick |

pub mod config;
pub mod efficiency;
pub mod error;
pub mod geometry;
pub mod hazard;
pub mod metrics;
pub mod model;
pub mod safety;
pub mod scenario;
pub mod tick;
