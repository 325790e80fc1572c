//! Ship and bullet state.
//!
//! Systems that mutate this state are in the sibling modules:
//! - [`super::control`]: input intent + movement
//! - [`super::combat`]: weapon patterns + power-up effects
//! - [`super::rendering`]: gizmo drawing

use crate::collision::Aabb;
use crate::constants::BULLET_SIZE;
use crate::pool::Poolable;
use crate::rigid_body::{facing_vector, Body, Viewport, WrapMode};
use bevy::prelude::*;

// ── Weapon mode ───────────────────────────────────────────────────────────────

/// Active firing pattern.  Everything except `Single` is timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WeaponMode {
    #[default]
    Single,
    Double,
    Triple,
    Spread,
}

impl WeaponMode {
    /// Bullets requested per trigger pull.
    pub fn shot_count(self) -> usize {
        match self {
            WeaponMode::Single => 1,
            WeaponMode::Double => 2,
            WeaponMode::Triple => 3,
            WeaponMode::Spread => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WeaponMode::Single => "SINGLE",
            WeaponMode::Double => "DOUBLE",
            WeaponMode::Triple => "TRIPLE",
            WeaponMode::Spread => "SPREAD",
        }
    }
}

// ── Ship ──────────────────────────────────────────────────────────────────────

/// The player ship.  A singleton reset on every new game.
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    pub body: Body,
    /// `false` only once the last life is gone.
    pub alive: bool,
    pub lives: u32,
    pub weapon: WeaponMode,
    /// Seconds left on a timed weapon; `0` while `Single`.
    pub weapon_timer: f32,
    /// Set by the control step while thrust is applied; drives audio and the
    /// exhaust flame.
    pub thrusting: bool,
    pub radius: f32,
    /// Distance from centre to muzzle along the facing.
    pub gun_offset: f32,
}

impl Ship {
    pub fn new(position: Vec2, lives: u32, radius: f32, gun_offset: f32) -> Self {
        Self {
            body: Body::new(position, Vec2::ZERO),
            alive: true,
            lives,
            weapon: WeaponMode::Single,
            weapon_timer: 0.0,
            thrusting: false,
            radius,
            gun_offset,
        }
    }

    /// Restore new-game state at `position`.
    pub fn reset(&mut self, position: Vec2, lives: u32) {
        self.body = Body::new(position, Vec2::ZERO);
        self.alive = true;
        self.lives = lives;
        self.weapon = WeaponMode::Single;
        self.weapon_timer = 0.0;
        self.thrusting = false;
    }

    /// Put the ship back at `position`, at rest, keeping its facing, lives and
    /// weapon.
    pub fn respawn(&mut self, position: Vec2) {
        self.body.position = position;
        self.body.velocity = Vec2::ZERO;
        self.thrusting = false;
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    /// Unit vector the nose points along.
    #[inline]
    pub fn gun_direction(&self) -> Vec2 {
        facing_vector(self.body.rotation)
    }

    /// Muzzle position: a fixed offset ahead of the centre.
    #[inline]
    pub fn gun_position(&self) -> Vec2 {
        self.body.position + self.gun_direction() * self.gun_offset
    }
}

// ── Bullet ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct Bullet {
    pub body: Body,
    pub active: bool,
    /// Seconds until the bullet retires on its own.
    pub time_to_live: f32,
}

impl Poolable for Bullet {
    fn is_active(&self) -> bool {
        self.active
    }
    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl Bullet {
    /// Launch from `position` along the unit vector `direction`.
    pub fn fire(&mut self, position: Vec2, direction: Vec2, speed: f32, lifetime: f32) {
        self.body = Body::new(position, direction * speed);
        self.time_to_live = lifetime;
        self.active = true;
    }

    /// Move, wrap flush with the viewport, and retire once the lifetime is spent.
    pub fn update(&mut self, dt: f32, viewport: Viewport) {
        if !self.active {
            return;
        }
        self.body.advance(dt, viewport, WrapMode::Flush);
        self.time_to_live -= dt;
        if self.time_to_live <= 0.0 {
            self.active = false;
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    /// Square hit box centred on the bullet.
    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.body.position, Vec2::splat(BULLET_SIZE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Viewport = Viewport {
        width: 1024.0,
        height: 768.0,
    };

    #[test]
    fn gun_sits_ahead_of_the_nose() {
        let ship = Ship::new(Vec2::new(100.0, 100.0), 3, 12.0, 15.0);
        assert!((ship.gun_position() - Vec2::new(100.0, 85.0)).length() < 1e-4);
    }

    #[test]
    fn bullet_retires_after_its_lifetime() {
        let mut bullet = Bullet::default();
        bullet.fire(Vec2::new(10.0, 10.0), Vec2::X, 400.0, 0.1);
        let mut last_ttl = bullet.time_to_live;
        for _ in 0..5 {
            bullet.update(0.016, VIEW);
            assert!(bullet.time_to_live < last_ttl);
            last_ttl = bullet.time_to_live;
        }
        assert!(bullet.active);
        bullet.update(0.05, VIEW);
        assert!(!bullet.active);
    }

    #[test]
    fn bullet_wraps_flush() {
        let mut bullet = Bullet::default();
        bullet.fire(Vec2::new(1023.0, 300.0), Vec2::X, 400.0, 2.0);
        bullet.update(0.01, VIEW);
        assert_eq!(bullet.position(), Vec2::new(0.0, 300.0));
    }

    #[test]
    fn respawn_keeps_lives_and_weapon() {
        let mut ship = Ship::new(Vec2::new(5.0, 5.0), 2, 12.0, 15.0);
        ship.body.velocity = Vec2::new(80.0, 0.0);
        ship.weapon = WeaponMode::Spread;
        ship.respawn(VIEW.center());
        assert_eq!(ship.position(), VIEW.center());
        assert_eq!(ship.body.velocity, Vec2::ZERO);
        assert_eq!(ship.lives, 2);
        assert_eq!(ship.weapon, WeaponMode::Spread);
    }
}
