//! Balloon Pop state and entity types
//!
//! Everything the presentation layer renders lives here. The state is owned by
//! [`Simulation`](super::Simulation) and only handed out by shared reference.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Point;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SimPhase {
    /// Not started yet
    #[default]
    Idle,
    /// Balloons are moving and spawning
    Running,
    /// Round over, score is final
    Ended,
}

/// Balloon lifecycle
///
/// Only `Active -> Popping` and `Active -> Missed` are allowed; both terminal
/// states are removed by a later tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BalloonState {
    Active,
    /// Popped, playing the pop animation for `remaining` seconds
    Popping { remaining: f32 },
    /// Left the arena unpopped
    Missed,
}

/// A single balloon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balloon {
    pub id: u32,
    pub pos: Vec2,
    /// Velocity (pixels/s); x is horizontal drift, y is vertical speed
    pub vel: Vec2,
    pub radius: f32,
    /// Palette index for rendering
    pub tint: u8,
    pub state: BalloonState,
}

impl Balloon {
    pub fn is_active(&self) -> bool {
        self.state == BalloonState::Active
    }

    /// True when `point` is on the balloon
    pub fn contains(&self, point: Point) -> bool {
        self.pos.distance_squared(point) <= self.radius * self.radius
    }

    /// Integrate position (active balloons only)
    pub fn advance(&mut self, dt: f32) {
        if self.is_active() {
            self.pos += self.vel * dt;
        }
    }
}

/// Complete round state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimState {
    /// Live balloons, ascending by id
    pub balloons: Vec<Balloon>,
    pub score: u32,
    /// Balloons that left the arena unpopped
    pub missed: u32,
    /// Successful pops (equals score when misses carry no penalty)
    pub popped: u32,
    /// Balloons spawned so far, the accuracy denominator
    pub total_spawned: u32,
    pub phase: SimPhase,
    /// Seconds of running time
    pub elapsed: f32,
    /// Seconds left on the countdown, None for an endless round
    pub time_left: Option<f32>,
    /// Next balloon ID
    next_id: u32,
}

impl SimState {
    /// Fresh state for a round that has just started
    pub fn running(countdown: Option<f32>) -> Self {
        Self {
            phase: SimPhase::Running,
            time_left: countdown,
            next_id: 1,
            ..Self::default()
        }
    }

    /// Allocate a new balloon ID
    pub fn next_balloon_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn get(&self, id: u32) -> Option<&Balloon> {
        self.balloons
            .binary_search_by_key(&id, |b| b.id)
            .ok()
            .map(|i| &self.balloons[i])
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Balloon> {
        self.balloons
            .binary_search_by_key(&id, |b| b.id)
            .ok()
            .map(|i| &mut self.balloons[i])
    }

    /// Balloons still in play
    pub fn active(&self) -> impl Iterator<Item = &Balloon> {
        self.balloons.iter().filter(|b| b.is_active())
    }

    /// Percentage of spawned balloons turned into points, 100 before any spawn
    pub fn accuracy(&self) -> u32 {
        if self.total_spawned == 0 {
            return 100;
        }
        let pct = (100.0 * self.score as f64 / self.total_spawned as f64).round() as u32;
        pct.min(100)
    }
}
