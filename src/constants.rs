//! Centralised gameplay constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! [`crate::config::GameConfig::default`] mirrors every value below, so a
//! runtime `assets/game.toml` can override any subset of them.
//!
//! Units: world units are pixels of the logical viewport, times are seconds,
//! angles are radians.

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Logical viewport width.  The toroidal play field is exactly this wide.
pub const VIEWPORT_WIDTH: f32 = 1024.0;

/// Logical viewport height.
pub const VIEWPORT_HEIGHT: f32 = 768.0;

/// Largest frame delta the host loop will ever hand to the simulation.
///
/// A stalled window (drag, breakpoint) would otherwise integrate a full second
/// of motion in one step and tunnel bullets straight through asteroids.
pub const MAX_FRAME_DT: f32 = 1.0 / 20.0;

/// Reference frame rate used to turn the original per-frame drag factors into
/// frame-rate independent decay (`factor.powf(dt * REFERENCE_FPS)`).
pub const REFERENCE_FPS: f32 = 60.0;

// ── Ship ──────────────────────────────────────────────────────────────────────

/// Lives granted at the start of every game.
pub const STARTING_LIVES: u32 = 3;

/// Forward acceleration while thrusting (u/s²).
pub const SHIP_THRUST: f32 = 200.0;

/// Turn rate while a rotate key is held (rad/s).
pub const SHIP_ROTATION_SPEED: f32 = 5.0;

/// Hard cap on ship speed (u/s).
pub const SHIP_MAX_SPEED: f32 = 300.0;

/// Fraction of velocity kept per reference frame.
pub const SHIP_DRAG: f32 = 0.98;

/// Collision radius of the ship: half the narrow side of its 24 × 30 sprite.
pub const SHIP_RADIUS: f32 = 12.0;

/// Distance from the ship centre to the gun muzzle along the facing.
pub const SHIP_GUN_OFFSET: f32 = 15.0;

// ── Bullets ───────────────────────────────────────────────────────────────────

/// Fixed-capacity bullet pool.
pub const BULLET_POOL_SIZE: usize = 25;

/// Bullet travel speed (u/s).
pub const BULLET_SPEED: f32 = 400.0;

/// Seconds before an unspent bullet retires itself.
pub const BULLET_LIFETIME: f32 = 2.0;

/// Side length of the square bullet bounding box.
pub const BULLET_SIZE: f32 = 4.0;

// ── Weapons ───────────────────────────────────────────────────────────────────

/// Seconds a collected weapon power-up stays active before reverting to Single.
pub const WEAPON_DURATION: f32 = 10.0;

/// Perpendicular offset of each barrel of the Double pattern.
pub const DOUBLE_SHOT_OFFSET: f32 = 8.0;

/// Angle between the centre shot and each side shot of the Triple pattern (≈15°).
pub const TRIPLE_SHOT_ANGLE: f32 = 0.26;

/// Angular spacing between neighbouring Spread shots; five shots cover ±0.6 rad.
pub const SPREAD_SHOT_STEP: f32 = 0.3;

// ── Asteroids ─────────────────────────────────────────────────────────────────

/// Radius of the unscaled asteroid sprite; size classes multiply this.
pub const ASTEROID_BASE_RADIUS: f32 = 20.0;

/// Scale factor of a Large asteroid.
pub const ASTEROID_SCALE_LARGE: f32 = 1.5;

/// Scale factor of a Medium asteroid.
pub const ASTEROID_SCALE_MEDIUM: f32 = 0.9;

/// Scale factor of a Small asteroid.
pub const ASTEROID_SCALE_SMALL: f32 = 0.45;

/// Large asteroids spawned for level 1; later levels add `(level - 1) / 4`.
pub const INITIAL_ASTEROIDS: u32 = 4;

/// New waves keep at least this much distance from the ship.
pub const ASTEROID_SPAWN_CLEARANCE: f32 = 150.0;

/// Wave asteroid speed range (u/s), lower bound inclusive.
pub const ASTEROID_WAVE_SPEED_MIN: f32 = 30.0;
pub const ASTEROID_WAVE_SPEED_MAX: f32 = 80.0;

/// Fragment speed range (u/s) used by `split`.
pub const FRAGMENT_SPEED_MIN: f32 = 50.0;
pub const FRAGMENT_SPEED_MAX: f32 = 150.0;

/// Largest absolute asteroid spin (rad/s).
pub const ASTEROID_MAX_SPIN: f32 = 2.0;

/// Score for destroying each size class.  Smaller rocks are worth more.
pub const SCORE_LARGE: u32 = 20;
pub const SCORE_MEDIUM: u32 = 50;
pub const SCORE_SMALL: u32 = 100;

/// A free life is awarded every time the score crosses a multiple of this.
pub const FREE_LIFE_SCORE_STEP: u32 = 10_000;

// ── Power-ups ─────────────────────────────────────────────────────────────────

/// Fixed-capacity power-up pool.
pub const POWER_UP_POOL_SIZE: usize = 5;

/// Seconds a power-up drifts before expiring.
pub const POWER_UP_LIFETIME: f32 = 20.0;

/// Collision radius: 16 px sprite drawn at 0.8 scale.
pub const POWER_UP_RADIUS: f32 = 6.4;

/// Power-up drift speed range (u/s).
pub const POWER_UP_SPEED_MIN: f32 = 40.0;
pub const POWER_UP_SPEED_MAX: f32 = 100.0;

/// Largest absolute power-up spin (rad/s).
pub const POWER_UP_MAX_SPIN: f32 = 3.0;

/// Expected random spawns per second (0.1 % per 60 Hz frame).
pub const POWER_UP_SPAWN_RATE: f32 = 0.06;

/// Random spawns stay this far inside the viewport edges.
pub const POWER_UP_SPAWN_INSET: f32 = 50.0;

// ── Death effects ─────────────────────────────────────────────────────────────

/// Particle pool capacity per effect instance.
pub const PARTICLE_POOL_SIZE: usize = 50;

/// Ship-fragment pool capacity per effect instance.
pub const FRAGMENT_POOL_SIZE: usize = 8;

/// Explosion particles requested per trigger.
pub const EXPLOSION_PARTICLES: usize = 30;

/// Ship fragments requested per trigger.
pub const SHIP_FRAGMENTS: usize = 6;

/// Duration of the terminal (game-ending) death sequence.
pub const DEATH_EFFECT_DURATION: f32 = 3.0;

/// Duration of the non-terminal life-loss freeze.
pub const LIFE_LOSS_DURATION: f32 = 1.5;

/// Peak screen-shake offset and its decay window.
pub const SHAKE_INTENSITY: f32 = 15.0;
pub const SHAKE_DURATION: f32 = 0.8;

/// Peak flash alpha and its decay window.
pub const FLASH_INTENSITY: f32 = 0.8;
pub const FLASH_DURATION: f32 = 0.3;

/// Per-reference-frame drag for explosion particles and ship fragments.
pub const PARTICLE_DRAG: f32 = 0.98;
pub const FRAGMENT_DRAG: f32 = 0.95;

// ── High scores ───────────────────────────────────────────────────────────────

/// Entries kept in the high-score table.
pub const MAX_HIGH_SCORES: usize = 10;

/// Longest accepted player name.
pub const MAX_NAME_LENGTH: usize = 10;

// ── Audio ─────────────────────────────────────────────────────────────────────

pub const VOLUME_SHOOT: f32 = 0.4;
pub const VOLUME_ASTEROID_HIT: f32 = 0.6;
pub const VOLUME_PLAYER_HIT: f32 = 0.8;
pub const VOLUME_POWER_UP: f32 = 0.7;
pub const VOLUME_THRUST: f32 = 0.3;

// ── Rendering ─────────────────────────────────────────────────────────────────

/// HUD text size.
pub const HUD_FONT_SIZE: f32 = 20.0;
