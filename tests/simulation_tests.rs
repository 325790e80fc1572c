//! End-to-end frame scenarios for the simulation core.
//!
//! Every test builds its own [`Simulation`] with a fixed seed and a config
//! whose random power-up drops are switched off, so the only things in the
//! field are the ones the test puts there.
//!
//! Covered scenarios:
//! 1. Integration: N ticks move an entity by exactly V·ΣΔt.
//! 2. Wrap: leaving one edge re-enters at the mirrored edge, offset by radius.
//! 3. Fragmentation: Large → 2 Medium at the parent's position; Small → none.
//! 4. Triple shot with one free bullet fires the centre shot only.
//! 5. High-score qualification and rank after insertion.
//! 6. Life loss with lives = 2: freeze, respawn at centre, then a fatal hit.
//! 7. Bullet vs. one Large asteroid: +2 Medium, +20 score, bystanders untouched.

use bevy::math::Vec2;
use disasteroids::asteroid::{Asteroid, AsteroidSize};
use disasteroids::audio::{NullSink, SoundId, SoundSink};
use disasteroids::config::GameConfig;
use disasteroids::high_scores::{HighScoreEntry, HighScoreStore, HighScoreTable};
use disasteroids::input::{GameKey, InputSnapshot, InputState};
use disasteroids::menu::{GameFlow, GameState};
use disasteroids::player::{fire_weapon, BulletTuning, Ship, WeaponMode};
use disasteroids::pool::Pool;
use disasteroids::rigid_body::{Body, Viewport, WrapMode};
use disasteroids::simulation::Simulation;
use rand::rngs::StdRng;
use rand::SeedableRng;

const DT: f32 = 1.0 / 60.0;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn quiet_config() -> GameConfig {
    GameConfig {
        power_up_spawn_rate: 0.0,
        ..GameConfig::default()
    }
}

/// A started game with an empty field except for one parked Small rock in a
/// corner, so clearing never triggers a new wave mid-test.
fn quiet_game(seed: u64) -> Simulation {
    let mut sim = Simulation::new(&quiet_config(), seed);
    sim.start_new_game();
    sim.asteroids_mut().clear();
    park_rock(&mut sim, AsteroidSize::Small, Vec2::new(40.0, 40.0));
    sim
}

fn park_rock(sim: &mut Simulation, size: AsteroidSize, at: Vec2) {
    let rock = Asteroid::new(size, at, Vec2::ZERO, sim.rng_mut());
    sim.add_asteroid(rock);
}

/// Records every cue it receives.
#[derive(Default)]
struct RecordingSink {
    played: Vec<SoundId>,
    thrust: bool,
}

impl SoundSink for RecordingSink {
    fn play(&mut self, sound: SoundId, _volume: f32) {
        self.played.push(sound);
    }

    fn set_thrust(&mut self, on: bool) {
        self.thrust = on;
    }
}

// ── 1. Integration ────────────────────────────────────────────────────────────

#[test]
fn position_advances_by_velocity_times_elapsed_time() {
    let viewport = Viewport::new(10_000.0, 10_000.0);
    let velocity = Vec2::new(37.5, -12.25);
    let start = Vec2::new(5_000.0, 5_000.0);
    let mut body = Body::new(start, velocity);

    let steps = [DT, DT, 0.02, 0.05, DT, 0.001];
    for dt in steps {
        body.advance(dt, viewport, WrapMode::Margin(30.0));
    }
    let elapsed: f32 = steps.iter().sum();
    assert!((body.position - (start + velocity * elapsed)).length() < 1e-3);
}

#[test]
fn asteroids_drift_exactly_with_their_velocity() {
    let viewport = Viewport::new(10_000.0, 10_000.0);
    let mut rng = StdRng::seed_from_u64(11);
    let start = Vec2::new(4_000.0, 4_000.0);
    let velocity = Vec2::new(60.0, 25.0);
    let mut rock = Asteroid::new(AsteroidSize::Large, start, velocity, &mut rng);
    for _ in 0..120 {
        rock.update(DT, viewport);
    }
    assert!((rock.position() - (start + velocity * 120.0 * DT)).length() < 1e-2);
}

// ── 2. Wrap ───────────────────────────────────────────────────────────────────

#[test]
fn crossing_right_edge_reappears_past_left_edge() {
    let viewport = Viewport::new(1024.0, 768.0);
    let radius = AsteroidSize::Large.radius();
    let velocity = Vec2::new(120.0, 0.0);
    let y = 200.0;
    let mut body = Body::new(Vec2::new(1024.0 + radius - 0.5, y), velocity);

    body.advance(DT, viewport, WrapMode::Margin(radius));
    assert_eq!(body.position, Vec2::new(-radius, y));

    // Keep flying until the next wrap: the distance covered is one full
    // period of the torus, width + 2·radius.
    let step = velocity.x * DT;
    let mut frames = 0usize;
    loop {
        let prev = body.position.x;
        body.advance(DT, viewport, WrapMode::Margin(radius));
        frames += 1;
        if body.position.x < prev {
            break;
        }
        assert!(frames < 10_000, "never wrapped again");
    }
    let travelled = frames as f32 * step;
    let period = viewport.width + 2.0 * radius;
    assert!((travelled - period).abs() <= step + 1e-2);
    assert_eq!(body.position, Vec2::new(-radius, y));
}

#[test]
fn bullets_wrap_flush_to_the_edge() {
    let viewport = Viewport::new(1024.0, 768.0);
    let mut body = Body::new(Vec2::new(10.0, -0.5), Vec2::new(0.0, -400.0));
    body.advance(DT, viewport, WrapMode::Flush);
    assert_eq!(body.position, Vec2::new(10.0, 768.0));
}

// ── 3. Fragmentation ──────────────────────────────────────────────────────────

#[test]
fn large_splits_into_two_mediums_with_fresh_velocities() {
    let mut rng = StdRng::seed_from_u64(3);
    let at = Vec2::new(300.0, 300.0);
    let parent_velocity = Vec2::new(500.0, 500.0);
    let mut large = Asteroid::new(AsteroidSize::Large, at, parent_velocity, &mut rng);

    let fragments = large.split(&mut rng);

    assert!(!large.active);
    assert_eq!(fragments.len(), 2);
    for f in &fragments {
        assert_eq!(f.size, AsteroidSize::Medium);
        assert!(f.active);
        assert_eq!(f.position(), at);
        let speed = f.body.velocity.length();
        assert!((50.0..150.0 + 1e-3).contains(&speed), "speed {speed}");
    }
    assert_ne!(fragments[0].body.velocity, fragments[1].body.velocity);
}

#[test]
fn small_split_is_terminal() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut small = Asteroid::new(AsteroidSize::Small, Vec2::ZERO, Vec2::ZERO, &mut rng);
    assert!(small.split(&mut rng).is_empty());
    assert!(!small.active);
}

// ── 4. Partial patterns ───────────────────────────────────────────────────────

#[test]
fn triple_with_one_free_bullet_fires_the_centre_shot() {
    let mut ship = Ship::new(Vec2::new(512.0, 384.0), 3, 12.0, 15.0);
    ship.weapon = WeaponMode::Triple;
    ship.weapon_timer = 10.0;

    let mut bullets: Pool<disasteroids::player::Bullet> = Pool::with_capacity(4);
    for _ in 0..3 {
        bullets.acquire();
    }
    assert_eq!(bullets.free_count(), 1);

    let tuning = BulletTuning {
        speed: 400.0,
        lifetime: 2.0,
    };
    let fired = fire_weapon(&ship, &mut bullets, tuning);

    assert_eq!(fired, 1);
    let shot = bullets.get(3).expect("last slot");
    assert!(shot.active);
    assert_eq!(shot.position(), ship.gun_position());
    let dir = shot.body.velocity.normalize();
    assert!((dir - ship.gun_direction()).length() < 1e-5);
    assert_eq!(bullets.free_count(), 0);
    assert_eq!(fire_weapon(&ship, &mut bullets, tuning), 0);
}

// ── 5. High scores ────────────────────────────────────────────────────────────

#[test]
fn fifty_thousand_beats_a_forty_five_thousand_floor_and_ranks_first() {
    let entries = (0..10)
        .map(|i| HighScoreEntry {
            name: format!("P{i}"),
            score: 45_000 + i * 100,
            level: 5,
            recorded_at_unix: 0,
        })
        .collect();
    let mut table = HighScoreTable::from_entries(entries);
    assert_eq!(table.lowest(), Some(45_000));

    assert!(table.is_high_score(50_000));
    table.add("ace", 50_000, 9);

    assert_eq!(table.rank(50_000), 1);
    assert_eq!(table.highest(), 50_000);
    assert_eq!(table.list().len(), 10);
    assert_eq!(table.list()[0].name, "ACE");
}

// ── 6. Life loss ──────────────────────────────────────────────────────────────

fn start_playing(flow: &mut GameFlow, sim: &mut Simulation, table: &mut HighScoreTable) {
    let mut input = InputState::new();
    input.advance(InputSnapshot::new().with(GameKey::Start));
    flow.update(&input, sim, table, &mut NullSink, DT);
    assert_eq!(flow.state(), GameState::Playing);
}

fn run_frames(
    flow: &mut GameFlow,
    sim: &mut Simulation,
    table: &mut HighScoreTable,
    sink: &mut RecordingSink,
    seconds: f32,
) {
    let input = InputState::new();
    let frames = (seconds / DT).ceil() as usize;
    for _ in 0..frames {
        flow.update(&input, sim, table, sink, DT);
    }
}

#[test]
fn losing_a_life_freezes_respawns_then_the_last_life_ends_the_game() {
    let mut flow = GameFlow::new();
    let mut sim = Simulation::new(&quiet_config(), 21);
    let mut table = HighScoreTable::with_defaults();
    let mut sink = RecordingSink::default();
    start_playing(&mut flow, &mut sim, &mut table);

    sim.asteroids_mut().clear();
    park_rock(&mut sim, AsteroidSize::Small, Vec2::new(40.0, 40.0));
    sim.ship_mut().lives = 2;
    let hit_at = Vec2::new(200.0, 200.0);
    sim.ship_mut().body.position = hit_at;
    sim.ship_mut().body.velocity = Vec2::new(80.0, 0.0);
    park_rock(&mut sim, AsteroidSize::Large, hit_at);

    // Contact frame.
    run_frames(&mut flow, &mut sim, &mut table, &mut sink, DT);
    assert_eq!(sim.ship().lives, 1);
    assert!(sim.ship().alive);
    assert!(sim.is_frozen());
    assert!(!sim.ship_visible());
    assert_eq!(sim.ship().body.velocity, Vec2::ZERO);
    assert!(sim.life_loss_effect().is_active());
    assert!(!sim.death_effect().is_active());
    assert!(sink.played.contains(&SoundId::PlayerHit));

    // Holding thrust while frozen does nothing.
    let mut held = InputState::new();
    held.advance(InputSnapshot::new().with(GameKey::Thrust).with(GameKey::Fire));
    flow.update(&held, &mut sim, &mut table, &mut sink, DT);
    assert_eq!(sim.ship().body.velocity, Vec2::ZERO);
    assert_eq!(sim.bullets().active_count(), 0);
    assert!(!sink.thrust);

    // Freeze runs out: back at the centre, at rest, still playing.
    run_frames(&mut flow, &mut sim, &mut table, &mut sink, 1.6);
    assert_eq!(flow.state(), GameState::Playing);
    assert!(!sim.is_frozen());
    assert!(sim.ship_visible());
    assert_eq!(sim.ship().position(), sim.viewport().center());
    assert_eq!(sim.ship().body.velocity, Vec2::ZERO);
    assert_eq!(sim.ship().lives, 1);

    // Fatal hit.
    let centre = sim.viewport().center();
    park_rock(&mut sim, AsteroidSize::Medium, centre);
    run_frames(&mut flow, &mut sim, &mut table, &mut sink, DT);
    assert_eq!(sim.ship().lives, 0);
    assert!(!sim.ship().alive);
    assert!(sim.death_effect().is_active());
    assert!(!sim.life_loss_effect().is_active());
    assert_eq!(flow.state(), GameState::Playing);

    // The explosion plays out before the game ends.
    run_frames(&mut flow, &mut sim, &mut table, &mut sink, 1.0);
    assert_eq!(flow.state(), GameState::Playing);
    run_frames(&mut flow, &mut sim, &mut table, &mut sink, 2.2);
    assert_eq!(flow.state(), GameState::GameOver);
    assert!(sim.death_sequence_finished());
}

#[test]
fn qualifying_score_goes_to_name_entry() {
    let mut flow = GameFlow::new();
    let mut sim = Simulation::new(&quiet_config(), 22);
    let mut table = HighScoreTable::empty();
    let mut sink = RecordingSink::default();
    start_playing(&mut flow, &mut sim, &mut table);

    sim.asteroids_mut().clear();
    park_rock(&mut sim, AsteroidSize::Small, Vec2::new(40.0, 40.0));
    sim.ship_mut().lives = 1;
    let centre = sim.viewport().center();
    park_rock(&mut sim, AsteroidSize::Large, centre);

    run_frames(&mut flow, &mut sim, &mut table, &mut sink, 3.5);
    assert_eq!(flow.state(), GameState::HighScoreEntry);
}

// ── 7. End-to-end bullet hit ──────────────────────────────────────────────────

#[test]
fn bullet_splits_one_large_asteroid_and_nothing_else() {
    let mut sim = quiet_game(31);
    let mut sink = RecordingSink::default();
    let centre = sim.viewport().center();
    let target_at = centre + Vec2::new(0.0, -90.0);
    park_rock(&mut sim, AsteroidSize::Large, target_at);
    let bystander_at = Vec2::new(900.0, 700.0);
    park_rock(&mut sim, AsteroidSize::Large, bystander_at);
    let before = sim.asteroids().len();
    assert_eq!(before, 3);

    // Rotation 0 faces up the screen, straight at the target.
    let mut input = InputState::new();
    input.advance(InputSnapshot::new().with(GameKey::Fire));
    let first = sim.step(DT, &input, &mut sink);
    assert_eq!(first.shots_fired, 1);
    assert_eq!(sim.bullets().active_count(), 1);
    input.advance(InputSnapshot::new());

    let mut hit_frame = None;
    for frame in 0..60 {
        let events = sim.step(DT, &input, &mut sink);
        if !events.asteroid_hits.is_empty() {
            assert_eq!(events.asteroid_hits.len(), 1);
            assert_eq!(events.asteroid_hits[0].size, AsteroidSize::Large);
            hit_frame = Some(frame);
            break;
        }
    }
    assert!(hit_frame.is_some(), "bullet never reached the asteroid");

    assert_eq!(sim.score(), 20);
    assert_eq!(sim.bullets().active_count(), 0);
    let asteroids = sim.asteroids().as_slice();
    assert_eq!(asteroids.len(), before - 1 + 2);
    let mediums: Vec<_> = asteroids
        .iter()
        .filter(|a| a.size == AsteroidSize::Medium)
        .collect();
    assert_eq!(mediums.len(), 2);

    let bystander = asteroids
        .iter()
        .find(|a| a.size == AsteroidSize::Large)
        .expect("bystander survives");
    assert_eq!(bystander.position(), bystander_at);
    assert!(bystander.active);

    assert_eq!(sink.played.iter().filter(|&&s| s == SoundId::Shoot).count(), 1);
    assert_eq!(
        sink.played.iter().filter(|&&s| s == SoundId::AsteroidHit).count(),
        1
    );
}

#[test]
fn held_fire_shoots_once() {
    let mut sim = quiet_game(32);
    let mut input = InputState::new();
    let held = InputSnapshot::new().with(GameKey::Fire);
    let mut total = 0;
    for _ in 0..30 {
        input.advance(held);
        total += sim.step(DT, &input, &mut NullSink).shots_fired;
    }
    assert_eq!(total, 1);
}

#[test]
fn same_seed_and_input_replay_identically() {
    let script = |sim: &mut Simulation| {
        let mut input = InputState::new();
        let mut trace = Vec::new();
        for frame in 0..240 {
            let mut snap = InputSnapshot::new().with(GameKey::RotateLeft);
            if frame % 20 == 0 {
                snap.press(GameKey::Fire);
            }
            if frame % 3 == 0 {
                snap.press(GameKey::Thrust);
            }
            input.advance(snap);
            sim.step(DT, &input, &mut NullSink);
            trace.push((sim.score(), sim.ship().position(), sim.asteroids().len()));
        }
        trace
    };
    let mut a = Simulation::new(&GameConfig::default(), 77);
    let mut b = Simulation::new(&GameConfig::default(), 77);
    a.start_new_game();
    b.start_new_game();
    assert_eq!(script(&mut a), script(&mut b));
}
