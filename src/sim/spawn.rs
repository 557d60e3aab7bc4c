//! Balloon spawn rules

use glam::Vec2;
use rand::Rng;

use super::config::{BalloonConfig, DifficultyScaling, SpawnCadence, SpawnEdges};
use super::state::{Balloon, BalloonState};
use crate::consts::{FRAME_DT, PALETTE_SIZE, SPAWN_OFFSET};

/// Arena edge a balloon enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    fn pick<R: Rng>(edges: SpawnEdges, rng: &mut R) -> Self {
        match edges {
            SpawnEdges::TopOnly => Edge::Top,
            SpawnEdges::All => match rng.random_range(0..4u8) {
                0 => Edge::Top,
                1 => Edge::Right,
                2 => Edge::Bottom,
                _ => Edge::Left,
            },
        }
    }
}

/// Inward speed for a new balloon at the given score
pub fn spawn_speed<R: Rng>(config: &BalloonConfig, score: u32, rng: &mut R) -> f32 {
    let base = rng.random_range(config.min_speed..=config.max_speed);
    match config.difficulty {
        DifficultyScaling::None => base,
        DifficultyScaling::ScoreLinear {
            per_point,
            max_speed,
        } => (base + score as f32 * per_point).min(max_speed),
    }
}

/// Delay until the next spawn tick
///
/// Probabilistic cadence rolls once per frame. Scheduled cadence shrinks the
/// interval as the score rises and never goes below `min_interval`.
pub fn spawn_interval<R: Rng>(config: &BalloonConfig, score: u32, rng: &mut R) -> f32 {
    match config.cadence {
        SpawnCadence::Probabilistic { .. } => FRAME_DT,
        SpawnCadence::Scheduled {
            initial_interval,
            min_interval,
            shrink_per_point,
            jitter,
        } => {
            let base = (initial_interval - score as f32 * shrink_per_point).max(min_interval);
            let spread = if jitter > 0.0 {
                rng.random_range(-jitter..=jitter)
            } else {
                0.0
            };
            (base * (1.0 + spread)).max(min_interval)
        }
    }
}

/// Build a balloon just outside a randomly chosen edge, heading inward
pub fn spawn_balloon<R: Rng>(config: &BalloonConfig, id: u32, score: u32, rng: &mut R) -> Balloon {
    let edge = Edge::pick(config.spawn_edges, rng);
    let speed = spawn_speed(config, score, rng);
    let drift = match config.spawn_edges {
        SpawnEdges::All if config.drift > 0.0 => rng.random_range(-config.drift..=config.drift),
        _ => 0.0,
    };

    let (w, h) = (config.width, config.height);
    let (pos, vel) = match edge {
        Edge::Top => (
            Vec2::new(rng.random_range(0.0..=w), -SPAWN_OFFSET),
            Vec2::new(drift, speed),
        ),
        Edge::Right => (
            Vec2::new(w + SPAWN_OFFSET, rng.random_range(0.0..=h)),
            Vec2::new(-speed, drift),
        ),
        Edge::Bottom => (
            Vec2::new(rng.random_range(0.0..=w), h + SPAWN_OFFSET),
            Vec2::new(drift, -speed),
        ),
        Edge::Left => (
            Vec2::new(-SPAWN_OFFSET, rng.random_range(0.0..=h)),
            Vec2::new(speed, drift),
        ),
    };

    Balloon {
        id,
        pos,
        vel,
        radius: rng.random_range(config.min_radius..=config.max_radius),
        tint: rng.random_range(0..PALETTE_SIZE),
        state: BalloonState::Active,
    }
}
