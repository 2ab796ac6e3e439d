//! End-to-end sessions driven through the public `Game` API

use rocket_dodge::platform::{KeyValueStore, MemoryStore, PinLog};
use rocket_dodge::renderer::{Command, Recorder, hud_text};
use rocket_dodge::sim::{FlashKind, GameEvent, InputEvent, Key, Obstacle, ObstacleKind, SequenceSource};
use rocket_dodge::{Game, Theme, Tuning};

const FRAME: f32 = 1.0 / 60.0;

type TestGame = Game<MemoryStore, PinLog>;

fn quiet_tuning() -> Tuning {
    Tuning {
        spawn_interval_ms: 1.0e9,
        ..Tuning::default()
    }
}

fn new_game(tuning: Tuning, store: MemoryStore) -> TestGame {
    let mut game = Game::with_rng(tuning, store, PinLog::default(), Box::new(SequenceSource::new([0.5])));
    game.resize(500.0, 500.0);
    game
}

fn run_for(game: &mut TestGame, seconds: f32) -> Vec<GameEvent> {
    let frames = (seconds / FRAME).round() as usize;
    let mut events = Vec::new();
    for _ in 0..frames {
        events.extend(game.tick(FRAME, true));
    }
    events
}

/// Obstacle sitting on the rocket, `lift` offset units above it
fn obstacle_at_rocket(game: &TestGame, lift: f32, size: f32) -> Obstacle {
    let rocket = game.state().rocket;
    Obstacle {
        pos: rocket.pos,
        offset: rocket.offset + lift,
        size,
        kind: ObstacleKind::Ring,
    }
}

#[test]
fn test_quiet_run_scores_without_writes() {
    let mut game = new_game(quiet_tuning(), MemoryStore::new());
    let events = run_for(&mut game, 10.0);

    assert!(events.is_empty());
    assert!((game.state().score - 180.0).abs() < 0.5);
    assert!(!game.state().game_over);
    assert_eq!(game.store().writes, 0);
}

#[test]
fn test_obstacle_travels_then_culls() {
    let mut game = new_game(quiet_tuning(), MemoryStore::new());
    // Well below the rocket, never in contact
    game.state_mut().obstacles.push(Obstacle {
        pos: 0.9,
        offset: -0.15,
        size: 5.0,
        kind: ObstacleKind::Rock,
    });

    run_for(&mut game, 1.0);
    let pos = game.state().obstacles[0].pos;
    assert!((pos - 0.68).abs() < 1e-3);

    let events = run_for(&mut game, 4.5);
    assert!(events.is_empty());
    assert!(game.state().obstacles.is_empty());
}

#[test]
fn test_spawned_obstacles_appear_ahead_of_rocket() {
    let mut game = new_game(Tuning::default(), MemoryStore::new());
    run_for(&mut game, 1.45);

    let state = game.state();
    assert_eq!(state.obstacles.len(), 1);
    let obstacle = &state.obstacles[0];
    assert!(obstacle.pos > state.rocket.pos);
    assert_eq!(obstacle.kind, ObstacleKind::Ring);
}

#[test]
fn test_hit_ends_run_and_persists_best() {
    let mut game = new_game(quiet_tuning(), MemoryStore::with("rocketHighScore", "12"));
    game.state_mut().score = 42.9;
    let obstacle = obstacle_at_rocket(&game, 0.0, 8.0);
    game.state_mut().obstacles.push(obstacle);

    let events = game.tick(0.0, true);
    assert_eq!(events, vec![GameEvent::Hit, GameEvent::NewHighScore(42)]);
    assert!(game.state().game_over);
    assert!(game.state().obstacles.is_empty());
    assert_eq!(game.state().flash.map(|f| f.kind), Some(FlashKind::Hit));
    assert_eq!(game.store().get("rocketHighScore").as_deref(), Some("42"));
}

#[test]
fn test_near_miss_only_flashes() {
    let mut game = new_game(quiet_tuning(), MemoryStore::new());
    // 25px off the rocket: outside 19px hit radius, inside the 30.2px ring
    let obstacle = obstacle_at_rocket(&game, 0.05, 5.0);
    game.state_mut().obstacles.push(obstacle);

    let events = game.tick(0.0, true);
    assert_eq!(events, vec![GameEvent::NearMiss]);
    assert!(!game.state().game_over);
    assert_eq!(game.state().obstacles.len(), 1);
    assert_eq!(game.state().flash.map(|f| f.kind), Some(FlashKind::Near));
}

#[test]
fn test_game_over_freezes_all_but_flash() {
    let mut game = new_game(Tuning::default(), MemoryStore::new());
    game.state_mut().score = 7.0;
    let hit = obstacle_at_rocket(&game, 0.0, 8.0);
    let bystander = Obstacle {
        pos: 0.8,
        offset: -0.1,
        size: 6.0,
        kind: ObstacleKind::Spike,
    };
    game.state_mut().obstacles.push(bystander);
    game.state_mut().obstacles.push(hit);
    game.tick(0.0, true);
    assert!(game.state().game_over);

    let before = game.state().clone();
    run_for(&mut game, 1.0);
    let after = game.state();

    assert_eq!(after.score, before.score);
    assert_eq!(after.obstacles, before.obstacles);
    assert_eq!(after.progress, before.progress);
    assert_eq!(after.grid_offset, before.grid_offset);
    assert!(after.flash.is_none());
}

#[test]
fn test_restart_keeps_high_score() {
    let mut game = new_game(quiet_tuning(), MemoryStore::new());
    game.state_mut().score = 55.0;
    let obstacle = obstacle_at_rocket(&game, 0.0, 8.0);
    game.state_mut().obstacles.push(obstacle);
    game.tick(0.0, true);
    assert!(game.handles_key(Key::Confirm));

    game.push_input(InputEvent::Key(Key::Confirm));
    game.tick(0.0, true);

    let state = game.state();
    assert!(!state.game_over);
    assert_eq!(state.score, 0.0);
    assert_eq!(state.high_score, 55);
    assert!(state.obstacles.is_empty());
    assert_eq!(hud_text(state), "HI 00055  00000");
}

#[test]
fn test_frame_renders_hud_and_game_over() {
    let mut game = new_game(quiet_tuning(), MemoryStore::new());
    run_for(&mut game, 1.0);

    let mut recorder = Recorder::default();
    game.render(&mut recorder, Theme::Dark.palette());
    assert!(recorder.balanced());
    assert!(recorder.texts().iter().any(|t| t.starts_with("HI ")));
    assert!(!recorder.texts().contains(&"GAME OVER"));

    let obstacle = obstacle_at_rocket(&game, 0.0, 8.0);
    game.state_mut().obstacles.push(obstacle);
    game.tick(0.0, true);

    let mut recorder = Recorder::default();
    game.render(&mut recorder, Theme::Light.palette());
    assert!(recorder.texts().contains(&"GAME OVER"));
    assert!(matches!(recorder.commands.first(), Some(Command::Clear)));
}
