//! Weapon patterns and power-up effects.
//!
//! ## Firing patterns
//!
//! | Mode   | Shots | Geometry                                              |
//! |--------|-------|-------------------------------------------------------|
//! | Single | 1     | straight ahead                                        |
//! | Double | 2     | parallel, ± `DOUBLE_SHOT_OFFSET` perpendicular to nose |
//! | Triple | 3     | centre, then heading − 0.26 rad, then heading + 0.26 rad |
//! | Spread | 5     | heading + (i − 2) · 0.3 rad for i = 0‥4               |
//!
//! Every pattern acquires its bullets in index order from the pool and fires
//! as many shots as there are free slots; a partial volley is still a volley.

use super::state::{Bullet, Ship, WeaponMode};
use crate::constants::{DOUBLE_SHOT_OFFSET, SPREAD_SHOT_STEP, TRIPLE_SHOT_ANGLE};
use crate::pool::Pool;
use crate::power_up::PowerUpKind;
use crate::rigid_body::direction_from_angle;
use bevy::prelude::*;

/// Bullet speed and lifetime for a volley.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletTuning {
    pub speed: f32,
    pub lifetime: f32,
}

/// Muzzle position and unit direction for shot `index` of `mode`.
pub fn shot_origin(mode: WeaponMode, index: usize, gun: Vec2, heading: Vec2) -> (Vec2, Vec2) {
    let base_angle = heading.y.atan2(heading.x);
    match mode {
        WeaponMode::Single => (gun, heading),
        WeaponMode::Double => {
            let perpendicular = Vec2::new(-heading.y, heading.x) * DOUBLE_SHOT_OFFSET;
            if index == 0 {
                (gun + perpendicular, heading)
            } else {
                (gun - perpendicular, heading)
            }
        }
        WeaponMode::Triple => match index {
            0 => (gun, heading),
            1 => (gun, direction_from_angle(base_angle - TRIPLE_SHOT_ANGLE)),
            _ => (gun, direction_from_angle(base_angle + TRIPLE_SHOT_ANGLE)),
        },
        WeaponMode::Spread => {
            let offset = index as f32 - 2.0;
            (gun, direction_from_angle(base_angle + offset * SPREAD_SHOT_STEP))
        }
    }
}

/// Fire the ship's current pattern.  Returns the number of bullets launched,
/// which is zero when the pool is exhausted.
pub fn fire_weapon(ship: &Ship, bullets: &mut Pool<Bullet>, tuning: BulletTuning) -> usize {
    let mode = ship.weapon;
    let gun = ship.gun_position();
    let heading = ship.gun_direction();
    bullets.acquire_many(mode.shot_count(), |index, bullet| {
        let (position, direction) = shot_origin(mode, index, gun, heading);
        bullet.fire(position, direction, tuning.speed, tuning.lifetime);
    })
}

/// Apply a collected power-up.  Weapon pickups replace the current mode and
/// restart the timer rather than stacking.
pub fn apply_power_up(ship: &mut Ship, kind: PowerUpKind, weapon_duration: f32) {
    let mode = match kind {
        PowerUpKind::DoubleShot => WeaponMode::Double,
        PowerUpKind::TripleShot => WeaponMode::Triple,
        PowerUpKind::SpreadShot => WeaponMode::Spread,
        PowerUpKind::ExtraLife => {
            ship.lives += 1;
            return;
        }
    };
    ship.weapon = mode;
    ship.weapon_timer = weapon_duration;
}

#[cfg(test)]
mod tests {
    use super::*;

    const TUNING: BulletTuning = BulletTuning {
        speed: 400.0,
        lifetime: 2.0,
    };

    fn ship(mode: WeaponMode) -> Ship {
        let mut s = Ship::new(Vec2::new(512.0, 384.0), 3, 12.0, 15.0);
        s.weapon = mode;
        s
    }

    fn fired(pool: &Pool<Bullet>) -> Vec<&Bullet> {
        pool.iter_active().collect()
    }

    #[test]
    fn double_fires_two_parallel_offset_shots() {
        let mut pool: Pool<Bullet> = Pool::with_capacity(25);
        assert_eq!(fire_weapon(&ship(WeaponMode::Double), &mut pool, TUNING), 2);
        let shots = fired(&pool);
        assert_eq!(shots[0].body.velocity, shots[1].body.velocity);
        let gap = shots[0].position().distance(shots[1].position());
        assert!((gap - 2.0 * DOUBLE_SHOT_OFFSET).abs() < 1e-3);
    }

    #[test]
    fn triple_with_one_free_slot_fires_the_centre_shot() {
        let mut pool: Pool<Bullet> = Pool::with_capacity(3);
        pool.acquire_many(2, |_, b| b.fire(Vec2::ZERO, Vec2::X, 1.0, 10.0));

        let s = ship(WeaponMode::Triple);
        assert_eq!(fire_weapon(&s, &mut pool, TUNING), 1);
        let centre = pool.get(2).unwrap();
        assert!(centre.active);
        let expected = s.gun_direction() * TUNING.speed;
        assert!((centre.body.velocity - expected).length() < 1e-3);
    }

    #[test]
    fn spread_fans_five_shots_across_sixty_degrees_of_arc() {
        let mut pool: Pool<Bullet> = Pool::with_capacity(25);
        let s = ship(WeaponMode::Spread);
        assert_eq!(fire_weapon(&s, &mut pool, TUNING), 5);
        let heading = s.gun_direction();
        let angles: Vec<f32> = fired(&pool)
            .iter()
            .map(|b| heading.angle_to(b.body.velocity))
            .collect();
        let expected = [-0.6, -0.3, 0.0, 0.3, 0.6];
        for (a, e) in angles.iter().zip(expected) {
            assert!((a - e).abs() < 1e-4, "{a} vs {e}");
        }
    }

    #[test]
    fn exhausted_pool_fires_nothing() {
        let mut pool: Pool<Bullet> = Pool::with_capacity(1);
        assert_eq!(fire_weapon(&ship(WeaponMode::Single), &mut pool, TUNING), 1);
        assert_eq!(fire_weapon(&ship(WeaponMode::Single), &mut pool, TUNING), 0);
    }

    #[test]
    fn new_weapon_pickup_replaces_and_resets_timer() {
        let mut s = ship(WeaponMode::Single);
        apply_power_up(&mut s, PowerUpKind::DoubleShot, 10.0);
        s.weapon_timer = 3.0;
        apply_power_up(&mut s, PowerUpKind::SpreadShot, 10.0);
        assert_eq!(s.weapon, WeaponMode::Spread);
        assert_eq!(s.weapon_timer, 10.0);
    }

    #[test]
    fn extra_life_leaves_weapon_alone() {
        let mut s = ship(WeaponMode::Triple);
        s.weapon_timer = 4.0;
        apply_power_up(&mut s, PowerUpKind::ExtraLife, 10.0);
        assert_eq!(s.lives, 4);
        assert_eq!(s.weapon, WeaponMode::Triple);
        assert_eq!(s.weapon_timer, 4.0);
    }
}
