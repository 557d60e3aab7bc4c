//! Balloon Pop simulation
//!
//! The presentation layer owns the clock. It calls [`Simulation::tick`] once
//! per frame and [`Simulation::spawn_tick`] on its own schedule, or lets
//! [`Simulation::advance`] do both. Pops arrive between ticks from input events.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::config::{BalloonConfig, MissPenalty, Ruleset, SpawnCadence, SpawnEdges};
use super::spawn::{spawn_balloon, spawn_interval};
use super::state::{Balloon, BalloonState, SimPhase, SimState};
use crate::Point;
use crate::consts::{EXIT_MARGIN, MAX_TICK_DT};
use crate::error::ConfigError;

/// Maximum spawns a single `advance` may trigger
const MAX_SPAWNS_PER_ADVANCE: u32 = 8;

/// A Balloon Pop round
#[derive(Debug, Clone)]
pub struct Simulation {
    config: BalloonConfig,
    seed: u64,
    rng: Pcg32,
    state: SimState,
    /// Seconds until `advance` runs the next spawn tick
    spawn_timer: f32,
}

impl Simulation {
    /// Create an idle simulation, rejecting unplayable configurations
    pub fn new(config: BalloonConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            state: SimState::default(),
            spawn_timer: 0.0,
        })
    }

    pub fn from_ruleset(ruleset: Ruleset, seed: u64) -> Result<Self, ConfigError> {
        Self::new(ruleset.config(), seed)
    }

    pub fn config(&self) -> &BalloonConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Read-only snapshot for rendering
    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn phase(&self) -> SimPhase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.phase == SimPhase::Running
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn balloons(&self) -> &[Balloon] {
        &self.state.balloons
    }

    /// Percentage of spawned balloons popped (100 before the first spawn)
    pub fn accuracy(&self) -> u32 {
        self.state.accuracy()
    }

    /// Begin a new round, discarding any previous one
    pub fn start(&mut self) {
        self.state = SimState::running(self.config.countdown);
        self.spawn_timer = spawn_interval(&self.config, 0, &mut self.rng);
        log::info!(
            "Balloon round started (edges={:?}, penalty={:?}, countdown={:?})",
            self.config.spawn_edges,
            self.config.miss_penalty,
            self.config.countdown
        );
    }

    /// End the round; the score is final from here on
    pub fn stop(&mut self) {
        if self.state.phase != SimPhase::Running {
            return;
        }
        self.state.phase = SimPhase::Ended;
        log::info!(
            "Balloon round ended: score={}, spawned={}, missed={}, accuracy={}%",
            self.state.score,
            self.state.total_spawned,
            self.state.missed,
            self.state.accuracy()
        );
    }

    /// Advance balloon positions by `dt` seconds and resolve misses
    pub fn tick(&mut self, dt: f32) {
        if !self.is_running() {
            return;
        }
        let dt = clamp_dt(dt);
        self.state.elapsed += dt;

        // Retire balloons that finished their terminal state last tick
        self.state.balloons.retain_mut(|b| match &mut b.state {
            BalloonState::Active => true,
            BalloonState::Missed => false,
            BalloonState::Popping { remaining } => {
                *remaining -= dt;
                *remaining > 0.0
            }
        });

        let (width, height) = (self.config.width, self.config.height);
        let edges = self.config.spawn_edges;
        let penalty = self.config.miss_penalty;
        let mut missed = 0;

        self.state.balloons.retain_mut(|b| {
            if !b.is_active() {
                return true;
            }
            b.advance(dt);
            if !has_exited(b, edges, width, height) {
                return true;
            }
            missed += 1;
            log::debug!("Balloon {} missed at ({:.0}, {:.0})", b.id, b.pos.x, b.pos.y);
            match penalty {
                MissPenalty::None => false,
                MissPenalty::MinusOne => {
                    b.state = BalloonState::Missed;
                    true
                }
            }
        });

        self.state.missed += missed;
        if penalty == MissPenalty::MinusOne {
            self.state.score = self.state.score.saturating_sub(missed);
        }
    }

    /// Run one spawn decision; returns the new balloon's ID if one appeared
    ///
    /// Probabilistic cadence rolls its per-frame chance; scheduled cadence
    /// always spawns since the caller only invokes it when the interval elapses.
    pub fn spawn_tick(&mut self) -> Option<u32> {
        if !self.is_running() {
            return None;
        }
        if let SpawnCadence::Probabilistic { chance } = self.config.cadence {
            if self.rng.random::<f32>() >= chance {
                return None;
            }
        }
        self.spawn()
    }

    /// Spawn a balloon unconditionally (while running)
    pub fn spawn(&mut self) -> Option<u32> {
        if !self.is_running() {
            return None;
        }
        let id = self.state.next_balloon_id();
        let balloon = spawn_balloon(&self.config, id, self.state.score, &mut self.rng);
        log::debug!(
            "Spawned balloon {} at ({:.0}, {:.0}) vel=({:.0}, {:.0})",
            id,
            balloon.pos.x,
            balloon.pos.y,
            balloon.vel.x,
            balloon.vel.y
        );
        self.state.balloons.push(balloon);
        self.state.total_spawned += 1;
        Some(id)
    }

    /// Seconds until the next spawn tick at the current score
    pub fn next_spawn_interval(&mut self) -> f32 {
        spawn_interval(&self.config, self.state.score, &mut self.rng)
    }

    /// Pop balloon `id`; false if it is unknown, already terminal, or the round is not running
    pub fn pop(&mut self, id: u32) -> bool {
        if !self.is_running() {
            return false;
        }
        let grace = self.config.pop_grace;
        let Some(balloon) = self.state.get_mut(id) else {
            return false;
        };
        if !balloon.is_active() {
            return false;
        }
        balloon.state = BalloonState::Popping { remaining: grace };
        self.state.score += 1;
        self.state.popped += 1;
        true
    }

    /// Pop the topmost active balloon under `point`
    ///
    /// Later spawns are drawn on top, so they win overlapping taps.
    pub fn pop_at(&mut self, point: Point) -> Option<u32> {
        if !self.is_running() {
            return None;
        }
        let id = self
            .state
            .balloons
            .iter()
            .rev()
            .find(|b| b.is_active() && b.contains(point))
            .map(|b| b.id)?;
        self.pop(id).then_some(id)
    }

    /// Frame driver: tick, run the countdown, then any due spawn ticks
    pub fn advance(&mut self, dt: f32) {
        if !self.is_running() {
            return;
        }
        let dt = clamp_dt(dt);

        self.tick(dt);

        if let Some(left) = self.state.time_left.as_mut() {
            *left = (*left - dt).max(0.0);
            if *left <= 0.0 {
                log::info!("Countdown expired");
                self.stop();
                return;
            }
        }

        self.spawn_timer -= dt;
        let mut spawns = 0;
        while self.spawn_timer <= 0.0 {
            if spawns >= MAX_SPAWNS_PER_ADVANCE {
                self.spawn_timer = self.next_spawn_interval();
                break;
            }
            self.spawn_tick();
            self.spawn_timer += self.next_spawn_interval();
            spawns += 1;
        }
    }
}

/// Clamp a frame time to `[0, MAX_TICK_DT]`; non-finite input counts as no time
fn clamp_dt(dt: f32) -> f32 {
    if dt.is_finite() {
        dt.clamp(0.0, MAX_TICK_DT)
    } else {
        0.0
    }
}

/// True once a balloon has fully left through an exit edge
fn has_exited(b: &Balloon, edges: SpawnEdges, width: f32, height: f32) -> bool {
    let below = b.pos.y > height + EXIT_MARGIN;
    match edges {
        SpawnEdges::TopOnly => below,
        SpawnEdges::All => {
            below
                || b.pos.y < -EXIT_MARGIN
                || b.pos.x < -EXIT_MARGIN
                || b.pos.x > width + EXIT_MARGIN
        }
    }
}
