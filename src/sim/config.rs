//! Balloon Pop ruleset
//!
//! The game has shipped in several flavours (omnidirectional drift, top-only
//! rain, with and without miss penalties). They are all one simulation driven
//! by this configuration.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Which arena edges balloons enter from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpawnEdges {
    /// Any of the four edges, moving inward with some sideways drift
    #[default]
    All,
    /// Top edge only, falling straight down
    TopOnly,
}

/// What happens when a balloon leaves the arena unpopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MissPenalty {
    /// Silently removed, only counted for accuracy
    #[default]
    None,
    /// Costs one point (score never drops below zero)
    MinusOne,
}

/// How balloon speed reacts to the current score
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum DifficultyScaling {
    #[default]
    None,
    /// Each point adds `per_point` px/s, capped at `max_speed`
    ScoreLinear { per_point: f32, max_speed: f32 },
}

/// When new balloons appear
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpawnCadence {
    /// Each frame-sized spawn tick rolls `chance`
    Probabilistic { chance: f32 },
    /// One balloon per interval; the interval shrinks with score down to `min_interval`
    Scheduled {
        initial_interval: f32,
        min_interval: f32,
        shrink_per_point: f32,
        /// Random spread applied to each interval (0.25 = +/-25%)
        jitter: f32,
    },
}

impl Default for SpawnCadence {
    fn default() -> Self {
        SpawnCadence::Probabilistic { chance: 0.04 }
    }
}

/// Named rulesets offered to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Ruleset {
    /// Balloons drift in from every side, no penalty, no time limit
    #[default]
    Drift,
    /// Balloons rain from the top, speed up with score, misses cost a point, 30s round
    Rain,
}

impl Ruleset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ruleset::Drift => "drift",
            Ruleset::Rain => "rain",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "drift" | "classic" => Some(Ruleset::Drift),
            "rain" | "timed" => Some(Ruleset::Rain),
            _ => None,
        }
    }

    /// Configuration for this ruleset in the default arena
    pub fn config(&self) -> BalloonConfig {
        match self {
            Ruleset::Drift => BalloonConfig::default(),
            Ruleset::Rain => BalloonConfig {
                spawn_edges: SpawnEdges::TopOnly,
                miss_penalty: MissPenalty::MinusOne,
                difficulty: DifficultyScaling::ScoreLinear {
                    per_point: 4.0,
                    max_speed: 360.0,
                },
                cadence: SpawnCadence::Scheduled {
                    initial_interval: 1.0,
                    min_interval: 0.3,
                    shrink_per_point: 0.02,
                    jitter: 0.25,
                },
                countdown: Some(ROUND_SECONDS),
                ..BalloonConfig::default()
            },
        }
    }
}

/// Full simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalloonConfig {
    /// Play area size (pixels)
    pub width: f32,
    pub height: f32,

    pub spawn_edges: SpawnEdges,
    pub miss_penalty: MissPenalty,
    pub difficulty: DifficultyScaling,
    pub cadence: SpawnCadence,

    /// Inward speed range (pixels/s)
    pub min_speed: f32,
    pub max_speed: f32,
    /// Maximum sideways drift for `SpawnEdges::All` (pixels/s)
    pub drift: f32,

    /// Balloon radius range (pixels)
    pub min_radius: f32,
    pub max_radius: f32,

    /// Seconds a popped balloon lingers before removal
    pub pop_grace: f32,
    /// Round length in seconds, None for an endless round
    #[serde(default)]
    pub countdown: Option<f32>,
}

impl Default for BalloonConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,

            spawn_edges: SpawnEdges::All,
            miss_penalty: MissPenalty::None,
            difficulty: DifficultyScaling::None,
            cadence: SpawnCadence::default(),

            min_speed: BALLOON_MIN_SPEED,
            max_speed: BALLOON_MAX_SPEED,
            drift: BALLOON_DRIFT,

            min_radius: BALLOON_MIN_RADIUS,
            max_radius: BALLOON_MAX_RADIUS,

            pop_grace: POP_GRACE,
            countdown: None,
        }
    }
}

fn finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { name, value })
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

fn ordered(name: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { name, min, max })
    }
}

impl BalloonConfig {
    /// Same ruleset in a different arena size
    pub fn with_arena(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Reject any parameters that could yield a non-positive speed, size or interval
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("width", self.width)?;
        positive("height", self.height)?;

        positive("min_speed", self.min_speed)?;
        positive("max_speed", self.max_speed)?;
        ordered("speed", self.min_speed, self.max_speed)?;
        non_negative("drift", self.drift)?;
        // Drift is sampled from [-drift, drift]
        finite("drift span", self.drift * 2.0)?;

        positive("min_radius", self.min_radius)?;
        positive("max_radius", self.max_radius)?;
        ordered("radius", self.min_radius, self.max_radius)?;

        non_negative("pop_grace", self.pop_grace)?;
        if let Some(seconds) = self.countdown {
            positive("countdown", seconds)?;
        }

        if let DifficultyScaling::ScoreLinear {
            per_point,
            max_speed,
        } = self.difficulty
        {
            non_negative("per_point", per_point)?;
            positive("difficulty max_speed", max_speed)?;
            ordered("difficulty speed", self.min_speed, max_speed)?;
        }

        match self.cadence {
            SpawnCadence::Probabilistic { chance } => {
                if !(chance > 0.0 && chance <= 1.0) {
                    return Err(ConfigError::ProbabilityOutOfRange { value: chance });
                }
            }
            SpawnCadence::Scheduled {
                initial_interval,
                min_interval,
                shrink_per_point,
                jitter,
            } => {
                positive("initial_interval", initial_interval)?;
                positive("min_interval", min_interval)?;
                ordered("spawn interval", min_interval, initial_interval)?;
                non_negative("shrink_per_point", shrink_per_point)?;
                non_negative("jitter", jitter)?;
            }
        }

        Ok(())
    }

    /// Speed cap in effect for this ruleset
    pub fn speed_cap(&self) -> f32 {
        match self.difficulty {
            DifficultyScaling::None => self.max_speed,
            DifficultyScaling::ScoreLinear { max_speed, .. } => max_speed,
        }
    }
}
