//! Pop Circle entry point
//!
//! The browser build is driven from JavaScript through `pop_circle::web`.
//! Natively this runs a headless demo: a few scored strokes and one
//! Balloon Pop round played by a simple bot, submitted to an in-memory
//! leaderboard.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pop Circle (native) starting...");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(12345);
    log::info!("Using seed: {}", seed);

    if let Err(err) = demo::run(seed) {
        log::error!("Demo failed: {}", err);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is pop_circle::web::init, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::error::Error;
    use std::f32::consts::TAU;

    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use pop_circle::consts::FRAME_DT;
    use pop_circle::leaderboard::{
        GameKind, LEADERBOARD_SIZE, MemoryStore, Player, ScoreStore, submit_round, submit_run,
    };
    use pop_circle::sim::{Ruleset, Simulation};
    use pop_circle::{Point, Stroke};

    /// Average seconds before the bot taps a visible balloon
    const BOT_REACTION: f32 = 0.6;
    /// Chance the bot taps beside the balloon
    const BOT_FUMBLE: f32 = 0.2;

    pub fn run(seed: u64) -> Result<(), Box<dyn Error>> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut store = MemoryStore::new();
        let player = Player::from_name("Demo Bot");

        // Perfect Circle: progressively shakier hands
        for wobble in [0.0_f32, 0.05, 0.15, 0.4] {
            let mut stroke = Stroke::new();
            for i in 0..64 {
                let theta = i as f32 / 64.0 * TAU;
                let r = 120.0 * (1.0 + rng.random_range(-wobble..=wobble));
                let p = Point::new(300.0, 300.0) + r * Point::new(theta.cos(), theta.sin());
                if i == 0 {
                    stroke.begin(p);
                } else {
                    stroke.push(p);
                }
            }
            let Some(fit) = stroke.finish() else {
                continue;
            };
            println!(
                "Circle wobble {:>4.2}: {:>5.1}%  {}",
                wobble,
                fit.score,
                fit.grade().message()
            );
            let summary = submit_run(&mut store, &player, GameKind::PerfectCircle, fit.score as f64, 0.0)?;
            if summary.is_new_best {
                log::info!("New circle best: {:.1}", fit.score);
            }
        }

        // Balloon Pop: one timed round
        let mut sim = Simulation::from_ruleset(Ruleset::Rain, seed)?;
        sim.start();
        let mut frames = 0u32;
        while sim.is_running() {
            sim.advance(FRAME_DT);
            frames += 1;

            let targets: Vec<(Point, f32)> = sim
                .state()
                .active()
                .filter(|b| b.pos.y >= b.radius)
                .map(|b| (b.pos, b.radius))
                .collect();
            for (pos, radius) in targets {
                if rng.random::<f32>() >= FRAME_DT / BOT_REACTION {
                    continue;
                }
                let tap = if rng.random::<f32>() < BOT_FUMBLE {
                    pos + Point::new(radius * 1.5, 0.0)
                } else {
                    pos
                };
                sim.pop_at(tap);
            }
        }

        let state = sim.state();
        println!(
            "Balloon round: {} frames, score {}, spawned {}, missed {}, accuracy {}%",
            frames,
            state.score,
            state.total_spawned,
            state.missed,
            sim.accuracy()
        );
        if let Some(summary) = submit_round(&mut store, &player, &sim, 0.0)? {
            log::info!("Balloon submission: {:?}", summary);
        }

        println!("\nLeaderboard:");
        for (rank, entry) in store.leaderboard(None, LEADERBOARD_SIZE)?.iter().enumerate() {
            println!(
                "{:>2}. {:<12} {:<15} {:>6.1}",
                rank + 1,
                entry.player_name,
                entry.game.as_str(),
                entry.score
            );
        }
        Ok(())
    }
}
