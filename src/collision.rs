//! Shape tests and pairwise collision resolution.
//!
//! ## Resolution order (once per frame)
//!
//! | # | Pair                | Test                                   | On hit |
//! |---|---------------------|----------------------------------------|--------|
//! | 1 | bullet – asteroid   | asteroid circle vs bullet box centre + ½ min side | bullet retired, asteroid split |
//! | 2 | ship – asteroid     | circle vs circle                       | reported; life policy is the caller's |
//! | 3 | bullet – power-up   | AABB vs AABB                           | bullet retired, power-up collected |
//! | 4 | ship – power-up     | circle vs circle                       | power-up collected |
//!
//! Only active entities take part.  Within a pair, the first qualifying
//! partner wins and the inner loop breaks, so one bullet never destroys two
//! asteroids and one ship contact never costs two lives.  Fragments produced
//! by pass 1 are appended after the pre-pass population and are not tested
//! again until the next frame.

use crate::asteroid::{AsteroidField, AsteroidSize};
use crate::player::state::{Bullet, Ship};
use crate::pool::Pool;
use crate::power_up::{PowerUp, PowerUpKind};
use bevy::prelude::*;
use rand::Rng;

// ── Shapes ────────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Half of the shorter side; the radius of the largest inscribed circle.
    #[inline]
    pub fn inscribed_radius(&self) -> f32 {
        let size = self.size();
        size.x.min(size.y) * 0.5
    }

    /// Strict overlap: touching edges do not count.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// `distance(a, b) < ra + rb`.
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    let reach = radius_a + radius_b;
    a.distance_squared(b) < reach * reach
}

/// Circle against a box treated as its inscribed circle.
#[inline]
pub fn circle_hits_box(center: Vec2, radius: f32, bounds: &Aabb) -> bool {
    circles_overlap(center, radius, bounds.center(), bounds.inscribed_radius())
}

// ── Pair resolution ───────────────────────────────────────────────────────────

/// One asteroid destroyed by a bullet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsteroidHit {
    pub size: AsteroidSize,
    pub position: Vec2,
}

/// Pass 1: bullets against asteroids.
///
/// Each colliding bullet is retired, the first asteroid it touches is split,
/// and the fragments are appended to the field.  Returns one [`AsteroidHit`]
/// per destroyed asteroid in resolution order.
pub fn resolve_bullets_vs_asteroids<R: Rng + ?Sized>(
    bullets: &mut Pool<Bullet>,
    field: &mut AsteroidField,
    rng: &mut R,
) -> Vec<AsteroidHit> {
    let mut hits = Vec::new();
    let mut fragments = Vec::new();
    // Fragments are only appended after the pass, so the slice below is the
    // pre-pass population.
    let asteroids = field.as_mut_slice();

    for bullet in bullets.slots_mut().iter_mut().filter(|b| b.active) {
        let bounds = bullet.bounds();
        let target = asteroids
            .iter_mut()
            .find(|a| a.active && circle_hits_box(a.position(), a.radius(), &bounds));
        if let Some(asteroid) = target {
            bullet.active = false;
            hits.push(AsteroidHit {
                size: asteroid.size,
                position: asteroid.position(),
            });
            fragments.extend(asteroid.split(rng));
        }
    }

    field.extend(fragments);
    hits
}

/// Pass 2: the ship against asteroids.  Returns the index of the first
/// asteroid touching the ship, or `None`.  A dead ship collides with nothing.
pub fn find_ship_asteroid_contact(ship: &Ship, field: &AsteroidField) -> Option<usize> {
    if !ship.alive {
        return None;
    }
    field.as_slice().iter().position(|a| {
        a.active && circles_overlap(ship.position(), ship.radius, a.position(), a.radius())
    })
}

/// Pass 3: bullets against power-ups.  Each colliding bullet collects at most
/// one power-up.  Returns the collected kinds in resolution order.
pub fn resolve_bullets_vs_power_ups(
    bullets: &mut Pool<Bullet>,
    power_ups: &mut Pool<PowerUp>,
) -> Vec<PowerUpKind> {
    let mut collected = Vec::new();
    let power_ups = power_ups.slots_mut();

    for bullet in bullets.slots_mut().iter_mut().filter(|b| b.active) {
        let bounds = bullet.bounds();
        let target = power_ups.iter_mut().find(|p| {
            p.active
                && Aabb::from_center_size(p.position(), Vec2::splat(p.radius() * 2.0))
                    .intersects(&bounds)
        });
        if let Some(power_up) = target {
            bullet.active = false;
            power_up.active = false;
            collected.push(power_up.kind);
        }
    }
    collected
}

/// Pass 4: the ship against power-ups.  At most one pickup per frame.
pub fn resolve_ship_vs_power_ups(ship: &Ship, power_ups: &mut Pool<PowerUp>) -> Option<PowerUpKind> {
    if !ship.alive {
        return None;
    }
    let power_up = power_ups.slots_mut().iter_mut().find(|p| {
        p.active && circles_overlap(ship.position(), ship.radius, p.position(), p.radius())
    })?;
    power_up.active = false;
    Some(power_up.kind)
}
