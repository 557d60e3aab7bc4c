//! Pop Circle - browser mini-games with a shared leaderboard
//!
//! Core modules:
//! - `circle`: Perfect Circle stroke scoring (pure, deterministic)
//! - `sim`: Balloon Pop simulation (spawning, physics, hit/miss, scoring)
//! - `leaderboard`: Score store collaborator and leaderboard aggregation
//! - `settings`: Player preferences and ruleset selection
//! - `web`: wasm-bindgen handles for the browser presentation layer

pub mod circle;
pub mod error;
pub mod leaderboard;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use circle::{CircleFit, Grade, Stroke, evaluate};
pub use error::{ConfigError, StoreError};
pub use leaderboard::{GameKind, MemoryStore, ScoreStore};
pub use settings::Settings;
pub use sim::{BalloonConfig, Ruleset, Simulation};

/// A point in canvas pixel coordinates
pub type Point = glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal frame duration the presentation layer drives at (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Largest dt accepted by a single tick (tab-switch hitches are clamped)
    pub const MAX_TICK_DT: f32 = 0.1;

    /// Strokes shorter than this are not scored
    pub const MIN_STROKE_POINTS: usize = 5;

    /// Default play area (CSS pixels)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Balloons spawn this far outside the arena edge
    pub const SPAWN_OFFSET: f32 = 50.0;
    /// Balloons are missed once this far outside the arena
    pub const EXIT_MARGIN: f32 = 100.0;

    /// Balloon radius range (35-50 px diameter)
    pub const BALLOON_MIN_RADIUS: f32 = 17.5;
    pub const BALLOON_MAX_RADIUS: f32 = 25.0;

    /// Inward speed range (pixels/s, 1-3 px per frame at 60 Hz)
    pub const BALLOON_MIN_SPEED: f32 = 60.0;
    pub const BALLOON_MAX_SPEED: f32 = 180.0;
    /// Maximum sideways drift (pixels/s)
    pub const BALLOON_DRIFT: f32 = 60.0;

    /// Time a popped balloon stays visible before removal (seconds)
    pub const POP_GRACE: f32 = 0.2;

    /// Number of balloon tints
    pub const PALETTE_SIZE: u8 = 6;

    /// Fixed-duration round length used by timed rulesets (seconds)
    pub const ROUND_SECONDS: f32 = 30.0;
}

/// Arithmetic mean of a set of points (None when empty)
#[inline]
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(Point::ZERO, |acc, p| acc + *p);
    Some(sum / points.len() as f32)
}
