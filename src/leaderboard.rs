//! Shared leaderboard
//!
//! The hosted score database sits behind [`ScoreStore`]. Only personal bests
//! are kept, and the leaderboard shows each player's best per game.
//! [`MemoryStore`] is the in-process implementation, persisted to
//! LocalStorage in the browser.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::sim::{SimPhase, Simulation};

/// Default number of leaderboard rows
pub const LEADERBOARD_SIZE: usize = 10;

/// Which mini-game a score belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    PerfectCircle,
    BalloonPop,
}

impl GameKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::PerfectCircle => "perfect_circle",
            GameKind::BalloonPop => "balloon_pop",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "perfect_circle" => Some(GameKind::PerfectCircle),
            "balloon_pop" => Some(GameKind::BalloonPop),
            _ => None,
        }
    }
}

/// Someone who submits scores
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    /// ISO 3166 alpha-2 code, if the player picked one
    #[serde(default)]
    pub country_code: Option<String>,
}

impl Player {
    /// Player whose ID is derived from the display name
    pub fn from_name(name: &str) -> Self {
        let slug = name
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-");
        Self {
            id: format!("player-{slug}"),
            name: name.trim().to_string(),
            country_code: None,
        }
    }
}

/// A stored score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub player_id: String,
    pub player_name: String,
    #[serde(default)]
    pub country_code: Option<String>,
    pub score: f64,
    pub game: GameKind,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Score persistence collaborator
pub trait ScoreStore {
    /// Record a score. Scores that do not beat the player's best are not
    /// stored but still count as a successful submission.
    fn submit_score(
        &mut self,
        player: &Player,
        score: f64,
        game: GameKind,
        timestamp: f64,
    ) -> Result<bool, StoreError>;

    /// Player's best score for a game, 0 if they have none
    fn best_score(&self, player_id: &str, game: GameKind) -> Result<f64, StoreError>;

    /// Best score per player and game, highest first
    fn leaderboard(&self, game: Option<GameKind>, limit: usize)
    -> Result<Vec<ScoreEntry>, StoreError>;
}

/// Keep each player's best entry per game, sort descending, truncate
pub fn best_per_player<'a>(
    entries: impl IntoIterator<Item = &'a ScoreEntry>,
    game: Option<GameKind>,
    limit: usize,
) -> Vec<ScoreEntry> {
    let mut best: Vec<ScoreEntry> = Vec::new();
    for entry in entries {
        if game.is_some_and(|g| g != entry.game) {
            continue;
        }
        let existing = best
            .iter()
            .position(|b| b.player_id == entry.player_id && b.game == entry.game);
        match existing {
            Some(i) if entry.score > best[i].score => best[i] = entry.clone(),
            Some(_) => {}
            None => best.push(entry.clone()),
        }
    }
    // Stable sort keeps the earlier achiever ahead on ties
    best.sort_by(|a, b| b.score.total_cmp(&a.score));
    best.truncate(limit);
    best
}

/// In-process score store
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MemoryStore {
    pub entries: Vec<ScoreEntry>,
}

impl MemoryStore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "pop_circle_scores";

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load scores from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(store) => {
                        log::info!("Loaded {} scores", store.entries.len());
                        return store;
                    }
                    Err(err) => log::warn!("Discarding stored scores: {}", err),
                }
            }
        }

        log::info!("No scores found, starting fresh");
        Self::new()
    }

    /// Save scores to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> Result<(), StoreError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StoreError::Unavailable("no LocalStorage".to_string()))?;

        let json = self.to_json()?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|_| StoreError::Unavailable("LocalStorage write failed".to_string()))?;
        log::info!("Scores saved ({} entries)", self.entries.len());
        Ok(())
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) -> Result<(), StoreError> {
        // No-op for native
        Ok(())
    }
}

impl ScoreStore for MemoryStore {
    fn submit_score(
        &mut self,
        player: &Player,
        score: f64,
        game: GameKind,
        timestamp: f64,
    ) -> Result<bool, StoreError> {
        let current_best = self.best_score(&player.id, game)?;
        if score <= current_best {
            log::info!(
                "Score {} not saved - current {} best is {}",
                score,
                game.as_str(),
                current_best
            );
            return Ok(true);
        }

        self.entries.push(ScoreEntry {
            player_id: player.id.clone(),
            player_name: player.name.clone(),
            country_code: player.country_code.clone(),
            score,
            game,
            timestamp,
        });
        log::info!("New personal best saved: {} ({})", score, game.as_str());
        Ok(true)
    }

    fn best_score(&self, player_id: &str, game: GameKind) -> Result<f64, StoreError> {
        Ok(self
            .entries
            .iter()
            .filter(|e| e.player_id == player_id && e.game == game)
            .map(|e| e.score)
            .fold(0.0, f64::max))
    }

    fn leaderboard(
        &self,
        game: Option<GameKind>,
        limit: usize,
    ) -> Result<Vec<ScoreEntry>, StoreError> {
        Ok(best_per_player(&self.entries, game, limit))
    }
}

/// Outcome of submitting a finished game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub score: f64,
    pub previous_best: f64,
    pub is_new_best: bool,
    /// Store accepted the submission
    pub submitted: bool,
}

/// Submit a final score, noting whether it beat the player's previous best
///
/// Zero scores are never sent to the store.
pub fn submit_run<S: ScoreStore + ?Sized>(
    store: &mut S,
    player: &Player,
    game: GameKind,
    score: f64,
    timestamp: f64,
) -> Result<RunSummary, StoreError> {
    let previous_best = store.best_score(&player.id, game)?;
    let is_new_best = score > previous_best;
    let submitted = if score > 0.0 {
        store.submit_score(player, score, game, timestamp)?
    } else {
        false
    };
    Ok(RunSummary {
        score,
        previous_best,
        is_new_best: is_new_best && submitted,
        submitted,
    })
}

/// Submit a Balloon Pop round once it has ended; None while still running
pub fn submit_round<S: ScoreStore + ?Sized>(
    store: &mut S,
    player: &Player,
    sim: &Simulation,
    timestamp: f64,
) -> Result<Option<RunSummary>, StoreError> {
    if sim.phase() != SimPhase::Ended {
        return Ok(None);
    }
    submit_run(store, player, GameKind::BalloonPop, sim.score() as f64, timestamp).map(Some)
}
