//! Destruction feedback: explosion particles, ship fragments, screen shake and
//! a full-viewport colour flash.
//!
//! ## Design
//!
//! A [`DeathEffect`] owns its own particle and fragment pools plus three
//! timers.  The simulation keeps two independent instances: one for the
//! game-ending death, one for the short life-loss freeze.  They never share
//! slots or timers.
//!
//! | Timer   | Default | Decay                                         |
//! |---------|---------|-----------------------------------------------|
//! | effect  | 3.0 s / 1.5 s | hard stop; every slot is retired        |
//! | shake   | 0.8 s   | random jitter scaled by remaining / total     |
//! | flash   | 0.3 s   | red overlay alpha scaled by remaining / total |
//!
//! Particles and fragments fade with `life / max_life` and retire at zero.
//! Velocity decays by a per-60 Hz-frame factor converted to the actual Δt.

use crate::constants::{
    EXPLOSION_PARTICLES, FLASH_DURATION, FLASH_INTENSITY, FRAGMENT_DRAG, PARTICLE_DRAG,
    SHAKE_DURATION, SHAKE_INTENSITY, SHIP_FRAGMENTS,
};
use crate::pool::{Pool, Poolable};
use crate::rigid_body::{direction_from_angle, Body};
use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

/// Palette explosion particles draw from.
pub const FIRE_COLORS: [Color; 4] = [
    Color::srgb(1.0, 0.0, 0.0),
    Color::srgb(1.0, 0.65, 0.0),
    Color::srgb(1.0, 1.0, 0.0),
    Color::srgb(1.0, 1.0, 1.0),
];

/// Overlay colour of the flash at full intensity.
pub const FLASH_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);

// ── Particle ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Particle {
    pub body: Body,
    pub active: bool,
    pub life: f32,
    pub max_life: f32,
    pub color: Color,
    /// Uniform draw scale.
    pub size: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            body: Body::default(),
            active: false,
            life: 0.0,
            max_life: 0.0,
            color: Color::WHITE,
            size: 1.0,
        }
    }
}

impl Poolable for Particle {
    fn is_active(&self) -> bool {
        self.active
    }
    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl Particle {
    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.body.integrate(dt);
        self.body.apply_drag(PARTICLE_DRAG, dt);
        self.life -= dt;
        if self.life <= 0.0 {
            self.active = false;
        }
    }

    #[inline]
    pub fn alpha(&self) -> f32 {
        fade_alpha(self.life, self.max_life)
    }
}

// ── Ship fragment ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct ShipFragment {
    pub body: Body,
    pub active: bool,
    pub life: f32,
    pub max_life: f32,
}

impl Poolable for ShipFragment {
    fn is_active(&self) -> bool {
        self.active
    }
    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl ShipFragment {
    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.body.integrate(dt);
        self.body.apply_drag(FRAGMENT_DRAG, dt);
        self.life -= dt;
        if self.life <= 0.0 {
            self.active = false;
        }
    }

    #[inline]
    pub fn alpha(&self) -> f32 {
        fade_alpha(self.life, self.max_life)
    }
}

#[inline]
fn fade_alpha(life: f32, max_life: f32) -> f32 {
    if max_life <= 0.0 {
        0.0
    } else {
        (life / max_life).clamp(0.0, 1.0)
    }
}

// ── Death effect ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct DeathEffect {
    particles: Pool<Particle>,
    fragments: Pool<ShipFragment>,
    active: bool,
    duration: f32,
    timer: f32,
    shake_timer: f32,
    shake_offset: Vec2,
    flash_timer: f32,
    flash_alpha: f32,
}

impl DeathEffect {
    pub fn new(duration: f32, particle_capacity: usize, fragment_capacity: usize) -> Self {
        Self {
            particles: Pool::with_capacity(particle_capacity),
            fragments: Pool::with_capacity(fragment_capacity),
            active: false,
            duration,
            timer: 0.0,
            shake_timer: 0.0,
            shake_offset: Vec2::ZERO,
            flash_timer: 0.0,
            flash_alpha: 0.0,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Seconds until the effect ends; `0` while idle.
    #[inline]
    pub fn remaining(&self) -> f32 {
        self.timer
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Camera offset to apply this frame.
    #[inline]
    pub fn screen_shake(&self) -> Vec2 {
        self.shake_offset
    }

    /// Overlay alpha to apply this frame.
    #[inline]
    pub fn flash_alpha(&self) -> f32 {
        self.flash_alpha
    }

    pub fn flash_color(&self) -> Color {
        FLASH_COLOR.with_alpha(self.flash_alpha)
    }

    pub fn particles(&self) -> &Pool<Particle> {
        &self.particles
    }

    pub fn fragments(&self) -> &Pool<ShipFragment> {
        &self.fragments
    }

    /// Arm (or re-arm) the effect at `position`.
    ///
    /// `velocity` is the source's velocity; particles inherit half of it and
    /// fragments 70 %.  Particles and fragments only fill free slots, so a
    /// re-trigger while busy adds what fits.
    pub fn trigger<R: Rng + ?Sized>(&mut self, position: Vec2, velocity: Vec2, rng: &mut R) {
        self.active = true;
        self.timer = self.duration;

        self.particles.acquire_many(EXPLOSION_PARTICLES, |_, p| {
            let angle = rng.gen_range(0.0..TAU);
            let speed = rng.gen_range(50.0..250.0);
            p.body = Body::new(
                position,
                direction_from_angle(angle) * speed + velocity * 0.5,
            );
            p.color = FIRE_COLORS[rng.gen_range(0..FIRE_COLORS.len())];
            p.life = rng.gen_range(0.5..2.0);
            p.max_life = p.life;
            p.size = rng.gen_range(0.3..1.0);
            p.body.spin = rng.gen_range(-5.0..5.0);
        });

        self.fragments.acquire_many(SHIP_FRAGMENTS, |_, f| {
            let angle = rng.gen_range(0.0..TAU);
            let speed = rng.gen_range(30.0..130.0);
            f.body = Body::new(
                position,
                direction_from_angle(angle) * speed + velocity * 0.7,
            );
            f.life = rng.gen_range(2.0..4.0);
            f.max_life = f.life;
            f.body.spin = rng.gen_range(-4.0..4.0);
        });

        self.shake_timer = SHAKE_DURATION;
        self.shake_offset = Vec2::ZERO;
        self.flash_timer = FLASH_DURATION;
        self.flash_alpha = FLASH_INTENSITY;
    }

    /// Advance every timer and live slot.  When the effect timer runs out the
    /// whole effect resets to idle.
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        if !self.active {
            return;
        }

        self.timer -= dt;
        if self.timer <= 0.0 {
            self.reset();
            return;
        }

        for p in self.particles.iter_active_mut() {
            p.update(dt);
        }
        for f in self.fragments.iter_active_mut() {
            f.update(dt);
        }

        if self.shake_timer > 0.0 {
            self.shake_timer = (self.shake_timer - dt).max(0.0);
            let amount = SHAKE_INTENSITY * (self.shake_timer / SHAKE_DURATION);
            self.shake_offset = Vec2::new(
                rng.gen_range(-1.0..=1.0) * amount,
                rng.gen_range(-1.0..=1.0) * amount,
            );
        } else {
            self.shake_offset = Vec2::ZERO;
        }

        if self.flash_timer > 0.0 {
            self.flash_timer = (self.flash_timer - dt).max(0.0);
            self.flash_alpha = FLASH_INTENSITY * (self.flash_timer / FLASH_DURATION);
        } else {
            self.flash_alpha = 0.0;
        }
    }

    /// Return to idle and retire every particle and fragment.
    pub fn reset(&mut self) {
        self.active = false;
        self.timer = 0.0;
        self.shake_timer = 0.0;
        self.shake_offset = Vec2::ZERO;
        self.flash_timer = 0.0;
        self.flash_alpha = 0.0;
        self.particles.clear();
        self.fragments.clear();
    }
}
