//! Asteroids: size classes, fragmentation and the per-level field.
//!
//! Unlike bullets and particles, the asteroid field is a growable `Vec`.  A
//! hit on a Large asteroid appends two Medium fragments, a hit on a Medium
//! appends two Small ones, and a Small simply disappears.  The population is
//! bounded by level design (at most `wave × 7` rocks per wave), not by memory
//! pressure, so a fixed pool would only get in the way.
//!
//! ## Split rule
//!
//! | Parent | Fragments      | Score |
//! |--------|----------------|-------|
//! | Large  | 2 × Medium     | 20    |
//! | Medium | 2 × Small      | 50    |
//! | Small  | none           | 100   |

use crate::constants::{
    ASTEROID_BASE_RADIUS, ASTEROID_MAX_SPIN, ASTEROID_SCALE_LARGE, ASTEROID_SCALE_MEDIUM,
    ASTEROID_SCALE_SMALL, ASTEROID_WAVE_SPEED_MAX, ASTEROID_WAVE_SPEED_MIN, FRAGMENT_SPEED_MAX,
    FRAGMENT_SPEED_MIN, SCORE_LARGE, SCORE_MEDIUM, SCORE_SMALL,
};
use crate::rigid_body::{direction_from_angle, Body, Viewport, WrapMode};
use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

/// Size class.  Ordered from largest to smallest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AsteroidSize {
    Large,
    Medium,
    Small,
}

impl AsteroidSize {
    /// Sprite scale factor relative to [`ASTEROID_BASE_RADIUS`].
    pub fn scale(self) -> f32 {
        match self {
            AsteroidSize::Large => ASTEROID_SCALE_LARGE,
            AsteroidSize::Medium => ASTEROID_SCALE_MEDIUM,
            AsteroidSize::Small => ASTEROID_SCALE_SMALL,
        }
    }

    #[inline]
    pub fn radius(self) -> f32 {
        ASTEROID_BASE_RADIUS * self.scale()
    }

    /// Successor size class, or `None` for the terminal Small class.
    pub fn smaller(self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }

    /// Points awarded for destroying an asteroid of this class.
    pub fn score(self) -> u32 {
        match self {
            AsteroidSize::Large => SCORE_LARGE,
            AsteroidSize::Medium => SCORE_MEDIUM,
            AsteroidSize::Small => SCORE_SMALL,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    pub body: Body,
    pub size: AsteroidSize,
    pub active: bool,
}

impl Asteroid {
    /// Build an active asteroid with a random initial rotation and spin.
    pub fn new<R: Rng + ?Sized>(
        size: AsteroidSize,
        position: Vec2,
        velocity: Vec2,
        rng: &mut R,
    ) -> Self {
        let mut body = Body::new(position, velocity);
        body.spin = rng.gen_range(-ASTEROID_MAX_SPIN..ASTEROID_MAX_SPIN);
        body.rotation = rng.gen_range(0.0..TAU);
        Self {
            body,
            size,
            active: true,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size.radius()
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    /// Integrate and wrap with the asteroid's own radius as margin.
    pub fn update(&mut self, dt: f32, viewport: Viewport) {
        if !self.active {
            return;
        }
        self.body.advance(dt, viewport, WrapMode::Margin(self.radius()));
    }

    /// Break this asteroid apart.
    ///
    /// The asteroid is deactivated and zero or two fragments of the next
    /// smaller class are returned, each at the parent's position with a fresh
    /// random heading and speed; the parent's velocity is not inherited.
    pub fn split<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<Asteroid> {
        self.active = false;
        let Some(next) = self.size.smaller() else {
            return Vec::new();
        };
        let origin = self.body.position;
        (0..2)
            .map(|_| {
                let angle = rng.gen_range(0.0..TAU);
                let speed = rng.gen_range(FRAGMENT_SPEED_MIN..FRAGMENT_SPEED_MAX);
                Asteroid::new(next, origin, direction_from_angle(angle) * speed, rng)
            })
            .collect()
    }
}

/// Number of Large asteroids in the wave for `level` (1-based).
///
/// One extra rock every four levels: levels 1–4 get `base`, 5–8 get
/// `base + 1`, and so on.
pub fn wave_size(base: u32, level: u32) -> u32 {
    base + level.saturating_sub(1) / 4
}

/// Every asteroid in play for the current level.
#[derive(Debug, Clone, Default)]
pub struct AsteroidField {
    asteroids: Vec<Asteroid>,
}

impl AsteroidField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.asteroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.asteroids.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.asteroids.iter().filter(|a| a.active).count()
    }

    /// `true` once every asteroid of the wave has been destroyed and pruned.
    pub fn is_cleared(&self) -> bool {
        self.asteroids.is_empty()
    }

    pub fn push(&mut self, asteroid: Asteroid) {
        self.asteroids.push(asteroid);
    }

    pub fn extend(&mut self, fragments: impl IntoIterator<Item = Asteroid>) {
        self.asteroids.extend(fragments);
    }

    pub fn clear(&mut self) {
        self.asteroids.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Asteroid> {
        self.asteroids.iter()
    }

    pub fn as_slice(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn as_mut_slice(&mut self) -> &mut [Asteroid] {
        &mut self.asteroids
    }

    pub fn update(&mut self, dt: f32, viewport: Viewport) {
        for asteroid in &mut self.asteroids {
            asteroid.update(dt, viewport);
        }
    }

    /// Drop destroyed asteroids, keeping the survivors in their original order.
    pub fn prune(&mut self) {
        self.asteroids.retain(|a| a.active);
    }

    /// Spawn `count` Large asteroids at random positions that keep at least
    /// `clearance` distance from `avoid` (the ship).
    ///
    /// Positions are rejection-sampled; if the viewport is too small to ever
    /// satisfy the clearance, the last candidate is used after a bounded number
    /// of attempts.
    pub fn spawn_wave<R: Rng + ?Sized>(
        &mut self,
        count: u32,
        viewport: Viewport,
        avoid: Vec2,
        clearance: f32,
        rng: &mut R,
    ) {
        const MAX_ATTEMPTS: usize = 64;

        for _ in 0..count {
            let mut position = Vec2::ZERO;
            for _ in 0..MAX_ATTEMPTS {
                position = Vec2::new(
                    rng.gen_range(0.0..viewport.width),
                    rng.gen_range(0.0..viewport.height),
                );
                if position.distance(avoid) >= clearance {
                    break;
                }
            }
            let angle = rng.gen_range(0.0..TAU);
            let speed = rng.gen_range(ASTEROID_WAVE_SPEED_MIN..ASTEROID_WAVE_SPEED_MAX);
            self.asteroids.push(Asteroid::new(
                AsteroidSize::Large,
                position,
                direction_from_angle(angle) * speed,
                rng,
            ));
        }
    }
}
