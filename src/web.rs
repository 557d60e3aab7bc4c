//! Browser bindings
//!
//! The page owns the canvas, the animation frame loop and input events. It
//! forwards pointer positions and frame times here and renders the JSON
//! snapshots it gets back.

use wasm_bindgen::prelude::*;

use crate::circle::{CircleFit, Stroke};
use crate::leaderboard::{GameKind, LEADERBOARD_SIZE, MemoryStore, ScoreStore, submit_run};
use crate::settings::Settings;
use crate::sim::{Ruleset, Simulation};
use crate::Point;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("Pop Circle loaded");
}

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Perfect Circle canvas session
#[wasm_bindgen]
#[derive(Default)]
pub struct CircleGame {
    stroke: Stroke,
    last_fit: Option<CircleFit>,
}

#[wasm_bindgen]
impl CircleGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer down
    pub fn begin(&mut self, x: f32, y: f32) {
        self.last_fit = None;
        self.stroke.begin(Point::new(x, y));
    }

    /// Pointer move
    pub fn push(&mut self, x: f32, y: f32) {
        self.stroke.push(Point::new(x, y));
    }

    /// Pointer up; the score, or undefined when the stroke was too short
    pub fn finish(&mut self) -> Option<f32> {
        self.last_fit = self.stroke.finish();
        self.last_fit.map(|fit| fit.score)
    }

    pub fn reset(&mut self) {
        self.stroke.clear();
        self.last_fit = None;
    }

    /// Fitted circle and grade message as JSON, for the overlay
    #[wasm_bindgen(js_name = fitJson)]
    pub fn fit_json(&self) -> Result<String, JsValue> {
        let Some(fit) = self.last_fit else {
            return Ok("null".to_string());
        };
        let view = serde_json::json!({
            "fit": fit,
            "message": fit.grade().message(),
        });
        serde_json::to_string(&view).map_err(js_err)
    }

    /// Captured points as a flat [x0, y0, x1, y1, ...] array
    pub fn points(&self) -> Vec<f32> {
        self.stroke.points().iter().flat_map(|p| [p.x, p.y]).collect()
    }
}

/// Balloon Pop round
#[wasm_bindgen]
pub struct BalloonGame {
    sim: Simulation,
}

#[wasm_bindgen]
impl BalloonGame {
    /// Build a round for the given arena; uses the saved ruleset when `ruleset` is empty
    #[wasm_bindgen(constructor)]
    pub fn new(ruleset: &str, width: f32, height: f32, seed: f64) -> Result<BalloonGame, JsValue> {
        let settings = Settings::load();
        let config = match Ruleset::from_str(ruleset) {
            Some(preset) => preset.config().with_arena(width, height),
            None => settings.balloon_config(width, height).map_err(js_err)?,
        };
        let sim = Simulation::new(config, seed as u64).map_err(js_err)?;
        Ok(Self { sim })
    }

    pub fn start(&mut self) {
        self.sim.start();
    }

    pub fn stop(&mut self) {
        self.sim.stop();
    }

    /// Animation frame; `dt` in seconds
    pub fn advance(&mut self, dt: f32) {
        self.sim.advance(dt);
    }

    pub fn pop(&mut self, id: u32) -> bool {
        self.sim.pop(id)
    }

    /// Tap at canvas coordinates; the popped balloon ID if any
    #[wasm_bindgen(js_name = popAt)]
    pub fn pop_at(&mut self, x: f32, y: f32) -> Option<u32> {
        self.sim.pop_at(Point::new(x, y))
    }

    pub fn score(&self) -> u32 {
        self.sim.score()
    }

    pub fn accuracy(&self) -> u32 {
        self.sim.accuracy()
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.sim.is_running()
    }

    /// Full round state for rendering
    #[wasm_bindgen(js_name = stateJson)]
    pub fn state_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.sim.state()).map_err(js_err)
    }
}

/// Submit a finished game's score; resolves to true on a new personal best
#[wasm_bindgen(js_name = submitScore)]
pub fn submit_score(game: &str, score: f64) -> Result<bool, JsValue> {
    let game = GameKind::from_str(game).ok_or_else(|| js_err(format!("unknown game {game}")))?;
    let player = Settings::load().player();
    let mut store = MemoryStore::load();
    let summary = submit_run(&mut store, &player, game, score, js_sys::Date::now()).map_err(js_err)?;
    store.save().map_err(js_err)?;
    Ok(summary.is_new_best)
}

/// Player's best score for a game
#[wasm_bindgen(js_name = bestScore)]
pub fn best_score(game: &str) -> Result<f64, JsValue> {
    let game = GameKind::from_str(game).ok_or_else(|| js_err(format!("unknown game {game}")))?;
    let player = Settings::load().player();
    MemoryStore::load().best_score(&player.id, game).map_err(js_err)
}

/// Leaderboard rows as JSON; all games when `game` is undefined
#[wasm_bindgen(js_name = leaderboardJson)]
pub fn leaderboard_json(game: Option<String>) -> Result<String, JsValue> {
    let game = game.as_deref().and_then(GameKind::from_str);
    let rows = MemoryStore::load()
        .leaderboard(game, LEADERBOARD_SIZE)
        .map_err(js_err)?;
    serde_json::to_string(&rows).map_err(js_err)
}

/// Update the player's name and country
#[wasm_bindgen(js_name = setPlayer)]
pub fn set_player(name: &str, country: Option<String>) -> Result<bool, JsValue> {
    let mut settings = Settings::load();
    let mut changed = settings.set_player_name(name);
    if let Some(code) = country.as_deref() {
        changed |= settings.set_country(code);
    }
    if changed {
        settings.save().map_err(js_err)?;
    }
    Ok(changed)
}
