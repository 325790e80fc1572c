//! Drifting weapon / life pickups.
//!
//! Power-ups live in a fixed [`Pool`] and spawn at random with a small
//! per-second probability.  They drift like asteroids, wrap with their radius
//! as margin, and expire after their lifetime (20 s by default) unless a bullet
//! or the ship collects them first.

use crate::constants::{
    POWER_UP_MAX_SPIN, POWER_UP_RADIUS, POWER_UP_SPAWN_INSET,
    POWER_UP_SPEED_MAX, POWER_UP_SPEED_MIN,
};
use crate::pool::{Pool, Poolable};
use crate::rigid_body::{direction_from_angle, Body, Viewport, WrapMode};
use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PowerUpKind {
    #[default]
    DoubleShot,
    TripleShot,
    SpreadShot,
    ExtraLife,
}

impl PowerUpKind {
    /// Kinds eligible for random spawning.  `ExtraLife` is never dropped at
    /// random; it is still honoured if one is placed in the field.
    pub const RANDOM_SPAWN: [PowerUpKind; 3] = [
        PowerUpKind::DoubleShot,
        PowerUpKind::TripleShot,
        PowerUpKind::SpreadShot,
    ];

    pub fn color(self) -> Color {
        match self {
            PowerUpKind::DoubleShot => Color::srgb(1.0, 1.0, 0.0),
            PowerUpKind::TripleShot => Color::srgb(1.0, 0.65, 0.0),
            PowerUpKind::SpreadShot => Color::srgb(1.0, 0.0, 0.0),
            PowerUpKind::ExtraLife => Color::srgb(0.0, 0.5, 0.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PowerUpKind::DoubleShot => "DOUBLE",
            PowerUpKind::TripleShot => "TRIPLE",
            PowerUpKind::SpreadShot => "SPREAD",
            PowerUpKind::ExtraLife => "LIFE",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PowerUp {
    pub body: Body,
    pub kind: PowerUpKind,
    pub active: bool,
    /// Seconds left before expiry.
    pub life: f32,
    pub max_life: f32,
}

impl Poolable for PowerUp {
    fn is_active(&self) -> bool {
        self.active
    }
    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl PowerUp {
    /// Reset every field for a fresh spawn at `position`.
    pub fn initialize<R: Rng + ?Sized>(
        &mut self,
        position: Vec2,
        kind: PowerUpKind,
        lifetime: f32,
        rng: &mut R,
    ) {
        let angle = rng.gen_range(0.0..TAU);
        let speed = rng.gen_range(POWER_UP_SPEED_MIN..POWER_UP_SPEED_MAX);
        self.body = Body::new(position, direction_from_angle(angle) * speed);
        self.body.rotation = rng.gen_range(0.0..TAU);
        self.body.spin = rng.gen_range(-POWER_UP_MAX_SPIN..POWER_UP_MAX_SPIN);
        self.kind = kind;
        self.life = lifetime;
        self.max_life = lifetime;
        self.active = true;
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        POWER_UP_RADIUS
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    /// Integrate, count down, and wrap.  Expiry takes effect before wrapping.
    pub fn update(&mut self, dt: f32, viewport: Viewport) {
        if !self.active {
            return;
        }
        self.body.integrate(dt);
        self.life -= dt;
        if self.life <= 0.0 {
            self.active = false;
            return;
        }
        self.body.wrap(viewport, WrapMode::Margin(self.radius()));
    }

    /// Render alpha: a steady pulse, flickering faster in the last second.
    pub fn pulse_alpha(&self) -> f32 {
        let mut alpha = 0.7 + 0.3 * (self.life * 8.0).sin();
        if self.life < 1.0 {
            alpha *= 0.5 + 0.5 * (self.life * 20.0).sin();
        }
        alpha.clamp(0.0, 1.0)
    }
}

/// Roll the per-frame spawn chance and, on success, activate one power-up of
/// a random weapon kind somewhere inside the inset play area.
///
/// Returns `true` when a power-up was actually placed.  A full pool makes the
/// roll a no-op.
pub fn maybe_spawn<R: Rng + ?Sized>(
    pool: &mut Pool<PowerUp>,
    rate_per_second: f32,
    lifetime: f32,
    dt: f32,
    viewport: Viewport,
    rng: &mut R,
) -> bool {
    let chance = (rate_per_second * dt).clamp(0.0, 1.0) as f64;
    if !rng.gen_bool(chance) {
        return false;
    }
    spawn_random(pool, lifetime, viewport, rng)
}

/// Place one random weapon power-up unconditionally (if the pool has room).
pub fn spawn_random<R: Rng + ?Sized>(
    pool: &mut Pool<PowerUp>,
    lifetime: f32,
    viewport: Viewport,
    rng: &mut R,
) -> bool {
    let Some(slot) = pool.acquire() else {
        return false;
    };
    let inset = POWER_UP_SPAWN_INSET
        .min(viewport.width / 2.0 - 1.0)
        .min(viewport.height / 2.0 - 1.0)
        .max(0.0);
    let position = Vec2::new(
        rng.gen_range(inset..viewport.width - inset),
        rng.gen_range(inset..viewport.height - inset),
    );
    let kind = PowerUpKind::RANDOM_SPAWN[rng.gen_range(0..PowerUpKind::RANDOM_SPAWN.len())];
    slot.initialize(position, kind, lifetime, rng);
    true
}
