//! Ship movement from a per-frame intent.
//!
//! ## Pipeline (runs once per simulation step)
//!
//! 1. [`ShipIntent::from_input`]: translate held / just-pressed keys.
//! 2. [`apply_ship_intent`]: rotate, quick-turn, thrust, drag, speed cap,
//!    integrate, flush wrap.
//! 3. [`tick_weapon_timer`]: revert a timed weapon to `Single` on expiry.
//!
//! The intent layer keeps movement testable: tests build a `ShipIntent`
//! directly instead of faking a keyboard.

use super::state::{Ship, WeaponMode};
use crate::config::GameConfig;
use crate::input::{GameKey, InputState};
use crate::rigid_body::{Viewport, WrapMode};
use std::f32::consts::PI;

/// What the pilot wants this frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShipIntent {
    /// -1 turns counter-clockwise, +1 clockwise, 0 holds heading.
    pub turn: f32,
    pub thrust: bool,
    /// Edge-triggered 180° flip.
    pub quick_turn: bool,
    /// Edge-triggered trigger pull.
    pub fire: bool,
}

impl ShipIntent {
    pub fn from_input(input: &InputState) -> Self {
        let mut turn = 0.0;
        if input.is_down(GameKey::RotateLeft) {
            turn -= 1.0;
        }
        if input.is_down(GameKey::RotateRight) {
            turn += 1.0;
        }
        Self {
            turn,
            thrust: input.is_down(GameKey::Thrust),
            quick_turn: input.just_pressed(GameKey::QuickTurn),
            fire: input.just_pressed(GameKey::Fire),
        }
    }
}

/// Movement tunables copied out of [`GameConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipTuning {
    pub thrust: f32,
    pub rotation_speed: f32,
    pub max_speed: f32,
    /// Velocity retained per 60 Hz frame.
    pub drag: f32,
}

impl From<&GameConfig> for ShipTuning {
    fn from(config: &GameConfig) -> Self {
        Self {
            thrust: config.ship_thrust,
            rotation_speed: config.ship_rotation_speed,
            max_speed: config.ship_max_speed,
            drag: config.ship_drag,
        }
    }
}

impl Default for ShipTuning {
    fn default() -> Self {
        Self::from(&GameConfig::default())
    }
}

/// Advance the ship one frame under `intent`.  A dead ship does not move.
pub fn apply_ship_intent(
    ship: &mut Ship,
    intent: &ShipIntent,
    tuning: &ShipTuning,
    dt: f32,
    viewport: Viewport,
) {
    ship.thrusting = false;
    if !ship.alive {
        return;
    }

    ship.body.rotation += intent.turn * tuning.rotation_speed * dt;
    if intent.quick_turn {
        ship.body.rotation += PI;
    }

    if intent.thrust {
        ship.body.velocity += ship.gun_direction() * tuning.thrust * dt;
        ship.thrusting = true;
    }

    ship.body.apply_drag(tuning.drag, dt);
    ship.body.velocity = ship.body.velocity.clamp_length_max(tuning.max_speed);

    ship.body.position += ship.body.velocity * dt;
    ship.body.wrap(viewport, WrapMode::Flush);
}

/// Count down a timed weapon and fall back to `Single` when it runs out.
pub fn tick_weapon_timer(ship: &mut Ship, dt: f32) {
    if ship.weapon_timer <= 0.0 {
        return;
    }
    ship.weapon_timer -= dt;
    if ship.weapon_timer <= 0.0 {
        ship.weapon_timer = 0.0;
        ship.weapon = WeaponMode::Single;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::prelude::Vec2;

    const VIEW: Viewport = Viewport {
        width: 1024.0,
        height: 768.0,
    };

    fn ship() -> Ship {
        Ship::new(VIEW.center(), 3, 12.0, 15.0)
    }

    #[test]
    fn thrust_accelerates_along_the_nose() {
        let mut s = ship();
        let intent = ShipIntent {
            thrust: true,
            ..Default::default()
        };
        apply_ship_intent(&mut s, &intent, &ShipTuning::default(), 1.0 / 60.0, VIEW);
        assert!(s.body.velocity.y < 0.0);
        assert!(s.body.velocity.x.abs() < 1e-4);
        assert!(s.thrusting);
    }

    #[test]
    fn speed_never_exceeds_cap() {
        let mut s = ship();
        let tuning = ShipTuning {
            drag: 1.0,
            ..ShipTuning::default()
        };
        let intent = ShipIntent {
            thrust: true,
            ..Default::default()
        };
        for _ in 0..600 {
            apply_ship_intent(&mut s, &intent, &tuning, 1.0 / 60.0, VIEW);
        }
        assert!(s.body.velocity.length() <= tuning.max_speed + 1e-3);
    }

    #[test]
    fn quick_turn_flips_heading() {
        let mut s = ship();
        let intent = ShipIntent {
            quick_turn: true,
            ..Default::default()
        };
        apply_ship_intent(&mut s, &intent, &ShipTuning::default(), 1.0 / 60.0, VIEW);
        assert!((s.gun_direction() - Vec2::Y).length() < 1e-4);
    }

    #[test]
    fn dead_ship_ignores_intent() {
        let mut s = ship();
        s.alive = false;
        let intent = ShipIntent {
            thrust: true,
            turn: 1.0,
            ..Default::default()
        };
        apply_ship_intent(&mut s, &intent, &ShipTuning::default(), 0.1, VIEW);
        assert_eq!(s.body.velocity, Vec2::ZERO);
        assert_eq!(s.body.rotation, 0.0);
    }

    #[test]
    fn timed_weapon_reverts_to_single() {
        let mut s = ship();
        s.weapon = WeaponMode::Triple;
        s.weapon_timer = 0.5;
        tick_weapon_timer(&mut s, 0.3);
        assert_eq!(s.weapon, WeaponMode::Triple);
        tick_weapon_timer(&mut s, 0.3);
        assert_eq!(s.weapon, WeaponMode::Single);
        assert_eq!(s.weapon_timer, 0.0);
    }
}
