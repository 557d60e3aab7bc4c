//! Balloon Pop simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied dt only
//! - Seeded RNG only
//! - Stable iteration order (by balloon ID)
//! - No rendering or platform dependencies

pub mod config;
pub mod spawn;
pub mod state;
pub mod tick;

pub use config::{BalloonConfig, DifficultyScaling, MissPenalty, Ruleset, SpawnCadence, SpawnEdges};
pub use spawn::{Edge, spawn_balloon, spawn_interval, spawn_speed};
pub use state::{Balloon, BalloonState, SimPhase, SimState};
pub use tick::Simulation;
