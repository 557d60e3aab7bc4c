use pop_circle::consts::FRAME_DT;
use pop_circle::leaderboard::{GameKind, MemoryStore, Player, ScoreStore, submit_round, submit_run};
use pop_circle::sim::{BalloonState, Ruleset, SimPhase, Simulation};
use pop_circle::{Point, Stroke};

/// Play a timed round, popping every balloon as soon as it is on screen
fn play_rain_round(seed: u64) -> Simulation {
    let mut sim = Simulation::from_ruleset(Ruleset::Rain, seed).unwrap();
    sim.start();
    let mut frames = 0;
    while sim.is_running() {
        sim.advance(FRAME_DT);
        let visible: Vec<u32> = sim
            .state()
            .active()
            .filter(|b| b.pos.y > 0.0)
            .map(|b| b.id)
            .collect();
        for id in visible {
            assert!(sim.pop(id));
        }
        frames += 1;
        assert!(frames < 60 * 60, "round never ended");
    }
    sim
}

#[test]
fn timed_round_ends_and_submits() {
    let sim = play_rain_round(2024);
    assert_eq!(sim.phase(), SimPhase::Ended);
    assert_eq!(sim.state().missed, 0);
    assert!(sim.score() > 0);
    assert!(sim.state().total_spawned >= sim.score());

    let mut store = MemoryStore::new();
    let player = Player::from_name("Tester");
    let summary = submit_round(&mut store, &player, &sim, 1.0)
        .unwrap()
        .expect("ended rounds are submitted");
    assert!(summary.is_new_best);
    assert_eq!(
        store.best_score(&player.id, GameKind::BalloonPop).unwrap(),
        sim.score() as f64
    );
}

#[test]
fn running_round_is_not_submitted() {
    let mut sim = Simulation::from_ruleset(Ruleset::Drift, 1).unwrap();
    sim.start();
    sim.advance(FRAME_DT);

    let mut store = MemoryStore::new();
    let result = submit_round(&mut store, &Player::from_name("Tester"), &sim, 1.0).unwrap();
    assert!(result.is_none());
    assert!(store.is_empty());
}

#[test]
fn stop_freezes_the_round() {
    let mut sim = Simulation::from_ruleset(Ruleset::Drift, 77).unwrap();
    sim.start();
    for _ in 0..600 {
        sim.advance(FRAME_DT);
    }
    sim.stop();

    let before: Vec<(u32, Point, BalloonState)> = sim
        .balloons()
        .iter()
        .map(|b| (b.id, b.pos, b.state))
        .collect();
    let score = sim.score();

    for _ in 0..100 {
        sim.advance(FRAME_DT);
        sim.tick(FRAME_DT);
        sim.spawn_tick();
    }
    if let Some(&(id, _, _)) = before.first() {
        assert!(!sim.pop(id));
    }

    let after: Vec<(u32, Point, BalloonState)> = sim
        .balloons()
        .iter()
        .map(|b| (b.id, b.pos, b.state))
        .collect();
    assert_eq!(before, after);
    assert_eq!(sim.score(), score);
}

#[test]
fn restart_resets_everything() {
    let mut sim = play_rain_round(5);
    assert!(sim.score() > 0);

    sim.start();
    assert_eq!(sim.phase(), SimPhase::Running);
    assert_eq!(sim.score(), 0);
    assert_eq!(sim.state().missed, 0);
    assert_eq!(sim.state().total_spawned, 0);
    assert!(sim.balloons().is_empty());
    assert_eq!(sim.accuracy(), 100);
}

#[test]
fn circle_scores_reach_the_leaderboard() {
    let mut store = MemoryStore::new();
    let players = [("Ada", 0.0_f32), ("Bob", 0.08), ("Cy", 0.25)];

    for (name, squash) in players {
        let mut stroke = Stroke::new();
        for i in 0..48 {
            let theta = i as f32 / 48.0 * std::f32::consts::TAU;
            let p = Point::new(
                250.0 + 100.0 * (1.0 + squash) * theta.cos(),
                250.0 + 100.0 * (1.0 - squash) * theta.sin(),
            );
            if i == 0 {
                stroke.begin(p);
            } else {
                stroke.push(p);
            }
        }
        let fit = stroke.finish().unwrap();
        submit_run(
            &mut store,
            &Player::from_name(name),
            GameKind::PerfectCircle,
            fit.score as f64,
            0.0,
        )
        .unwrap();
    }

    let board = store.leaderboard(Some(GameKind::PerfectCircle), 10).unwrap();
    let names: Vec<&str> = board.iter().map(|e| e.player_name.as_str()).collect();
    assert_eq!(names, vec!["Ada", "Bob", "Cy"]);
    assert!(board[0].score > 99.0);
}
