//! The simulation context: every entity, the score, the level and the RNG,
//! advanced one frame at a time by [`Simulation::step`].
//!
//! ## Frame order
//!
//! | # | Stage                                                        |
//! |---|--------------------------------------------------------------|
//! | 1 | life-loss freeze countdown (respawn at centre when it ends)  |
//! | 2 | ship movement, weapon timer, trigger pull                    |
//! | 3 | terminal death effect                                        |
//! | 4 | bullets, asteroids, power-ups integrate and wrap             |
//! | 5 | random power-up roll                                         |
//! | 6 | collisions: bullet–asteroid, ship–asteroid, bullet–power-up, ship–power-up |
//! | 7 | prune destroyed asteroids; next wave if the field is empty   |
//! | 8 | arm the terminal death effect on the alive → dead edge       |
//!
//! Nothing in a step can fail.  All randomness comes from the owned seeded
//! `StdRng`, so two simulations built with the same seed and fed the same
//! input produce identical frames.

use crate::asteroid::{wave_size, Asteroid, AsteroidField};
use crate::audio::{SoundId, SoundSink};
use crate::collision::{
    find_ship_asteroid_contact, resolve_bullets_vs_asteroids, resolve_bullets_vs_power_ups,
    resolve_ship_vs_power_ups, AsteroidHit,
};
use crate::config::GameConfig;
use crate::input::InputState;
use crate::particles::DeathEffect;
use crate::player::combat::{apply_power_up, fire_weapon, BulletTuning};
use crate::player::control::{apply_ship_intent, tick_weapon_timer, ShipIntent, ShipTuning};
use crate::player::state::{Bullet, Ship};
use crate::pool::Pool;
use crate::power_up::{maybe_spawn, PowerUp, PowerUpKind};
use crate::rigid_body::Viewport;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{SystemTime, UNIX_EPOCH};

/// Everything notable that happened during one [`Simulation::step`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameEvents {
    pub shots_fired: usize,
    pub asteroid_hits: Vec<AsteroidHit>,
    pub power_ups_collected: Vec<PowerUpKind>,
    /// The ship touched an asteroid and lost a life.
    pub ship_hit: bool,
    /// The hit took the last life.
    pub ship_destroyed: bool,
    pub free_lives: u32,
    /// The field was cleared and the next wave spawned.
    pub level_cleared: bool,
    /// The life-loss freeze ended and the ship is back at the centre.
    pub respawned: bool,
}

/// Tunables the step reads every frame, copied once from [`GameConfig`].
#[derive(Debug, Clone, PartialEq)]
struct Rules {
    starting_lives: u32,
    ship: ShipTuning,
    bullets: BulletTuning,
    weapon_duration: f32,
    initial_asteroids: u32,
    asteroid_spawn_clearance: f32,
    free_life_score_step: u32,
    power_up_lifetime: f32,
    power_up_spawn_rate: f32,
}

impl From<&GameConfig> for Rules {
    fn from(config: &GameConfig) -> Self {
        Self {
            starting_lives: config.starting_lives,
            ship: ShipTuning::from(config),
            bullets: BulletTuning {
                speed: config.bullet_speed,
                lifetime: config.bullet_lifetime,
            },
            weapon_duration: config.weapon_duration,
            initial_asteroids: config.initial_asteroids,
            asteroid_spawn_clearance: config.asteroid_spawn_clearance,
            free_life_score_step: config.free_life_score_step.max(1),
            power_up_lifetime: config.power_up_lifetime,
            power_up_spawn_rate: config.power_up_spawn_rate,
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct Simulation {
    viewport: Viewport,
    rules: Rules,
    ship: Ship,
    bullets: Pool<Bullet>,
    asteroids: AsteroidField,
    power_ups: Pool<PowerUp>,
    /// Game-ending explosion.
    death_effect: DeathEffect,
    /// Short freeze after losing a non-final life.
    life_loss_effect: DeathEffect,
    score: u32,
    /// Score at the last free-life award.
    last_life_score: u32,
    level: u32,
    ship_was_alive: bool,
    rng: StdRng,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(&GameConfig::default(), 0)
    }
}

impl Simulation {
    /// Build every pool from `config` with a fixed RNG seed.  The ship starts
    /// alive at the centre with an empty field; call
    /// [`start_new_game`](Self::start_new_game) to deal the first wave.
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let viewport = Viewport::new(config.viewport_width, config.viewport_height);
        let rules = Rules::from(config);
        Self {
            viewport,
            ship: Ship::new(
                viewport.center(),
                rules.starting_lives,
                config.ship_radius,
                config.ship_gun_offset,
            ),
            bullets: Pool::with_capacity(config.bullet_pool_size),
            asteroids: AsteroidField::new(),
            power_ups: Pool::with_capacity(config.power_up_pool_size),
            death_effect: DeathEffect::new(
                config.death_effect_duration,
                config.particle_pool_size,
                config.fragment_pool_size,
            ),
            life_loss_effect: DeathEffect::new(
                config.life_loss_duration,
                config.particle_pool_size,
                config.fragment_pool_size,
            ),
            score: 0,
            last_life_score: 0,
            level: 1,
            ship_was_alive: true,
            rng: StdRng::seed_from_u64(seed),
            rules,
        }
    }

    /// Seed from `config.seed`, or from the clock when none is set.
    pub fn from_config(config: &GameConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        });
        Self::new(config, seed)
    }

    // ── Session lifecycle ─────────────────────────────────────────────────────

    /// Reset score, level, ship and every pool, then deal the level-1 wave.
    pub fn start_new_game(&mut self) {
        self.score = 0;
        self.last_life_score = 0;
        self.level = 1;
        self.ship
            .reset(self.viewport.center(), self.rules.starting_lives);
        self.ship_was_alive = true;
        self.bullets.clear();
        self.power_ups.clear();
        self.death_effect.reset();
        self.life_loss_effect.reset();
        self.asteroids.clear();
        self.spawn_wave();
        info!(
            "New game: {} lives, {} asteroids",
            self.ship.lives,
            self.asteroids.len()
        );
    }

    fn spawn_wave(&mut self) {
        let count = wave_size(self.rules.initial_asteroids, self.level);
        self.asteroids.spawn_wave(
            count,
            self.viewport,
            self.ship.position(),
            self.rules.asteroid_spawn_clearance,
            &mut self.rng,
        );
    }

    // ── Frame step ────────────────────────────────────────────────────────────

    /// Advance one frame of play by `dt` seconds.
    pub fn step(&mut self, dt: f32, input: &InputState, sound: &mut dyn SoundSink) -> FrameEvents {
        let mut events = FrameEvents::default();

        // 1. Life-loss freeze.
        if self.life_loss_effect.is_active() {
            self.life_loss_effect.update(dt, &mut self.rng);
            if !self.life_loss_effect.is_active() {
                self.ship.respawn(self.viewport.center());
                events.respawned = true;
                debug!("Ship respawned at centre");
            }
        }
        let frozen = self.life_loss_effect.is_active();

        // 2. Ship.
        let intent = if frozen {
            ShipIntent::default()
        } else {
            ShipIntent::from_input(input)
        };
        if !frozen {
            apply_ship_intent(
                &mut self.ship,
                &intent,
                &self.rules.ship,
                dt,
                self.viewport,
            );
            if self.ship.alive {
                tick_weapon_timer(&mut self.ship, dt);
            }
        } else {
            self.ship.thrusting = false;
        }
        sound.set_thrust(self.ship.thrusting);

        if self.ship.alive && !frozen && intent.fire {
            events.shots_fired = fire_weapon(&self.ship, &mut self.bullets, self.rules.bullets);
            if events.shots_fired > 0 {
                sound.play(SoundId::Shoot, SoundId::Shoot.default_volume());
            }
        }

        // 3. Terminal effect.
        self.death_effect.update(dt, &mut self.rng);

        // 4. Everything else that moves.
        for bullet in self.bullets.iter_active_mut() {
            bullet.update(dt, self.viewport);
        }
        self.asteroids.update(dt, self.viewport);
        for power_up in self.power_ups.iter_active_mut() {
            power_up.update(dt, self.viewport);
        }

        // 5. Random drop.
        maybe_spawn(
            &mut self.power_ups,
            self.rules.power_up_spawn_rate,
            self.rules.power_up_lifetime,
            dt,
            self.viewport,
            &mut self.rng,
        );

        // 6. Collisions.
        self.resolve_collisions(frozen, sound, &mut events);

        // 7. Field bookkeeping.
        self.asteroids.prune();
        if self.asteroids.is_cleared() {
            self.level += 1;
            self.spawn_wave();
            events.level_cleared = true;
            info!(
                "Level {} begins with {} asteroids",
                self.level,
                self.asteroids.len()
            );
        }

        // 8. Terminal death edge.
        if self.ship_was_alive && !self.ship.alive {
            self.death_effect
                .trigger(self.ship.position(), self.ship.body.velocity, &mut self.rng);
            self.ship_was_alive = false;
            info!("Ship destroyed at score {}", self.score);
        }

        events
    }

    fn resolve_collisions(
        &mut self,
        frozen: bool,
        sound: &mut dyn SoundSink,
        events: &mut FrameEvents,
    ) {
        let hits =
            resolve_bullets_vs_asteroids(&mut self.bullets, &mut self.asteroids, &mut self.rng);
        for hit in &hits {
            sound.play(SoundId::AsteroidHit, SoundId::AsteroidHit.default_volume());
            if self.award(hit.size.score()) {
                events.free_lives += 1;
            }
        }
        events.asteroid_hits = hits;

        if !frozen {
            if let Some(_index) = find_ship_asteroid_contact(&self.ship, &self.asteroids) {
                self.lose_life(sound, events);
            }
        }

        let collected = resolve_bullets_vs_power_ups(&mut self.bullets, &mut self.power_ups);
        for &kind in &collected {
            self.collect(kind, sound);
        }
        events.power_ups_collected = collected;

        if !self.life_loss_effect.is_active() {
            if let Some(kind) = resolve_ship_vs_power_ups(&self.ship, &mut self.power_ups) {
                self.collect(kind, sound);
                events.power_ups_collected.push(kind);
            }
        }
    }

    /// Add `points`; returns `true` if the score crossed a free-life threshold.
    fn award(&mut self, points: u32) -> bool {
        self.score = self.score.saturating_add(points);
        let step = self.rules.free_life_score_step;
        if self.score / step > self.last_life_score / step {
            self.ship.lives += 1;
            self.last_life_score = self.score;
            debug!("Free life at {} points", self.score);
            true
        } else {
            false
        }
    }

    fn collect(&mut self, kind: PowerUpKind, sound: &mut dyn SoundSink) {
        apply_power_up(&mut self.ship, kind, self.rules.weapon_duration);
        sound.play(SoundId::PowerUp, SoundId::PowerUp.default_volume());
        debug!("Collected {:?}", kind);
    }

    fn lose_life(&mut self, sound: &mut dyn SoundSink, events: &mut FrameEvents) {
        self.ship.lives = self.ship.lives.saturating_sub(1);
        sound.play(SoundId::PlayerHit, SoundId::PlayerHit.default_volume());
        events.ship_hit = true;

        if self.ship.lives == 0 {
            self.ship.alive = false;
            self.ship.thrusting = false;
            events.ship_destroyed = true;
        } else {
            self.life_loss_effect
                .trigger(self.ship.position(), self.ship.body.velocity, &mut self.rng);
            self.ship.body.velocity = Vec2::ZERO;
            self.ship.thrusting = false;
            debug!("Life lost, {} remaining", self.ship.lives);
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    /// The ship is gone and its explosion has played out.
    pub fn death_sequence_finished(&self) -> bool {
        !self.ship.alive && !self.ship_was_alive && !self.death_effect.is_active()
    }

    /// The ship is drawn only while alive and not frozen after a hit.
    pub fn ship_visible(&self) -> bool {
        self.ship.alive && !self.life_loss_effect.is_active()
    }

    pub fn is_frozen(&self) -> bool {
        self.life_loss_effect.is_active()
    }

    /// Camera offset: the larger of the two effects' shakes.
    pub fn screen_shake(&self) -> Vec2 {
        let a = self.death_effect.screen_shake();
        let b = self.life_loss_effect.screen_shake();
        if a.length_squared() >= b.length_squared() {
            a
        } else {
            b
        }
    }

    /// Overlay alpha: the stronger of the two effects' flashes.
    pub fn flash_alpha(&self) -> f32 {
        self.death_effect
            .flash_alpha()
            .max(self.life_loss_effect.flash_alpha())
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn ship_mut(&mut self) -> &mut Ship {
        &mut self.ship
    }

    pub fn bullets(&self) -> &Pool<Bullet> {
        &self.bullets
    }

    pub fn bullets_mut(&mut self) -> &mut Pool<Bullet> {
        &mut self.bullets
    }

    pub fn asteroids(&self) -> &AsteroidField {
        &self.asteroids
    }

    pub fn asteroids_mut(&mut self) -> &mut AsteroidField {
        &mut self.asteroids
    }

    /// Place a hand-built asteroid in the field.
    pub fn add_asteroid(&mut self, asteroid: Asteroid) {
        self.asteroids.push(asteroid);
    }

    pub fn power_ups(&self) -> &Pool<PowerUp> {
        &self.power_ups
    }

    pub fn power_ups_mut(&mut self) -> &mut Pool<PowerUp> {
        &mut self.power_ups
    }

    pub fn death_effect(&self) -> &DeathEffect {
        &self.death_effect
    }

    pub fn life_loss_effect(&self) -> &DeathEffect {
        &self.life_loss_effect
    }

    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers the simulation resources and the collaborators around them:
/// config, input, sound queue and high-score board.
///
/// The frame step itself is driven by [`crate::menu::flow::game_flow_system`],
/// which owns the decision of whether this frame is a play frame.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameConfig>()
            .init_resource::<Simulation>()
            .init_resource::<crate::input::InputState>()
            .init_resource::<crate::audio::SoundQueue>()
            .init_resource::<crate::audio::SoundCatalog>()
            .init_resource::<crate::high_scores::HighScoreBoard>()
            .add_systems(
                Startup,
                (
                    crate::config::load_game_config,
                    rebuild_simulation_system.after(crate::config::load_game_config),
                    crate::high_scores::load_high_scores,
                    crate::audio::scan_sound_files,
                ),
            )
            .add_systems(
                PreUpdate,
                crate::input::keyboard_input_system
                    .run_if(resource_exists::<ButtonInput<KeyCode>>),
            )
            .add_systems(
                PostUpdate,
                crate::audio::play_queued_sounds_system.run_if(resource_exists::<AssetServer>),
            );
    }
}

/// Startup system: rebuild the simulation once the config file has been read.
pub fn rebuild_simulation_system(config: Res<GameConfig>, mut sim: ResMut<Simulation>) {
    *sim = Simulation::from_config(&config);
    info!(
        "Simulation ready: {}x{} field, {} bullets, {} power-ups",
        config.viewport_width,
        config.viewport_height,
        config.bullet_pool_size,
        config.power_up_pool_size
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asteroid::AsteroidSize;
    use crate::audio::NullSink;

    fn quiet_config() -> GameConfig {
        GameConfig {
            power_up_spawn_rate: 0.0,
            ..GameConfig::default()
        }
    }

    #[test]
    fn new_game_deals_first_wave_away_from_ship() {
        let mut sim = Simulation::new(&quiet_config(), 1);
        sim.start_new_game();
        assert_eq!(sim.asteroids().len(), 4);
        assert_eq!(sim.level(), 1);
        assert_eq!(sim.ship().lives, 3);
        for a in sim.asteroids().iter() {
            assert!(a.position().distance(sim.ship().position()) >= 150.0);
        }
    }

    #[test]
    fn free_life_every_ten_thousand_points() {
        let mut sim = Simulation::new(&quiet_config(), 2);
        sim.start_new_game();
        sim.score = 9_990;
        sim.last_life_score = 9_990;
        assert!(sim.award(AsteroidSize::Small.score()));
        assert_eq!(sim.ship().lives, 4);
        assert!(!sim.award(AsteroidSize::Small.score()));
        assert_eq!(sim.ship().lives, 4);
    }

    #[test]
    fn clearing_the_field_advances_the_level() {
        let mut sim = Simulation::new(&quiet_config(), 3);
        sim.start_new_game();
        sim.asteroids_mut().clear();
        let events = sim.step(1.0 / 60.0, &InputState::new(), &mut NullSink);
        assert!(events.level_cleared);
        assert_eq!(sim.level(), 2);
        assert_eq!(sim.asteroids().len(), 4);
    }

    #[test]
    fn same_seed_same_field() {
        let mut a = Simulation::new(&quiet_config(), 42);
        let mut b = Simulation::new(&quiet_config(), 42);
        a.start_new_game();
        b.start_new_game();
        let pa: Vec<_> = a.asteroids().iter().map(|x| x.position()).collect();
        let pb: Vec<_> = b.asteroids().iter().map(|x| x.position()).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn last_life_kills_the_ship_and_arms_the_terminal_effect() {
        let mut sim = Simulation::new(&quiet_config(), 4);
        sim.start_new_game();
        sim.ship_mut().lives = 1;
        let center = sim.ship().position();
        sim.asteroids_mut().clear();
        let rock = Asteroid::new(AsteroidSize::Large, center, Vec2::ZERO, sim.rng_mut());
        sim.add_asteroid(rock);

        let events = sim.step(1.0 / 60.0, &InputState::new(), &mut NullSink);

        assert!(events.ship_destroyed);
        assert!(!sim.ship().alive);
        assert!(sim.death_effect().is_active());
        assert!(!sim.life_loss_effect().is_active());
        assert!(!sim.death_sequence_finished());
    }
}
