//! Ship and bullet gizmos.
//!
//! | Layer          | Technology | Shown when                                  |
//! |----------------|------------|---------------------------------------------|
//! | Ship outline   | Gizmos     | ship alive and not frozen after a hit       |
//! | Thrust flame   | Gizmos     | thrust held this frame                      |
//! | Weapon ring    | Gizmos     | a timed weapon mode is active               |
//! | Bullets        | Gizmos     | active pool slots                           |
//!
//! Everything is computed in simulation (screen) space and mapped through
//! [`crate::graphics::to_world`] at the last moment.

use super::state::{Ship, WeaponMode};
use crate::graphics::to_world;
use crate::menu::GameState;
use crate::rigid_body::{facing_vector, Viewport};
use crate::simulation::Simulation;
use bevy::prelude::*;

// ── Ship geometry ─────────────────────────────────────────────────────────────

/// Dart outline in ship-local units, nose along local "forward".
///
/// `(forward, right)` pairs scaled by the ship radius.
const SHIP_OUTLINE: [(f32, f32); 5] = [
    (1.25, 0.0),
    (-0.85, -0.75),
    (-0.45, 0.0),
    (-0.85, 0.75),
    (1.25, 0.0),
];

fn ship_color() -> Color {
    Color::srgb(0.85, 0.95, 1.0)
}
fn flame_color() -> Color {
    Color::srgb(1.0, 0.55, 0.10)
}
fn bullet_color() -> Color {
    Color::srgb(1.0, 1.0, 0.75)
}

/// Screen-space outline of `ship`.
pub fn ship_outline(ship: &Ship) -> Vec<Vec2> {
    let forward = facing_vector(ship.body.rotation);
    let right = Vec2::new(-forward.y, forward.x);
    SHIP_OUTLINE
        .iter()
        .map(|&(f, r)| ship.position() + (forward * f + right * r) * ship.radius)
        .collect()
}

fn weapon_ring_color(mode: WeaponMode) -> Option<Color> {
    match mode {
        WeaponMode::Single => None,
        WeaponMode::Double => Some(Color::srgba(0.3, 0.6, 1.0, 0.6)),
        WeaponMode::Triple => Some(Color::srgba(0.3, 1.0, 0.4, 0.6)),
        WeaponMode::Spread => Some(Color::srgba(1.0, 0.4, 1.0, 0.6)),
    }
}

fn draw_ship(gizmos: &mut Gizmos, ship: &Ship, viewport: Viewport, t: f32) {
    let points: Vec<Vec2> = ship_outline(ship)
        .into_iter()
        .map(|p| to_world(viewport, p))
        .collect();
    gizmos.linestrip_2d(points, ship_color());

    if ship.thrusting {
        let back = -facing_vector(ship.body.rotation);
        let right = Vec2::new(back.y, -back.x);
        let tail = ship.position() + back * ship.radius * 0.45;
        // Flicker the flame length a little every frame.
        let len = ship.radius * (0.9 + 0.35 * (t * 40.0).sin().abs());
        let tip = tail + back * len;
        let l = tail + right * ship.radius * 0.3;
        let r = tail - right * ship.radius * 0.3;
        gizmos.linestrip_2d(
            [l, tip, r].map(|p| to_world(viewport, p)),
            flame_color(),
        );
    }

    if let Some(color) = weapon_ring_color(ship.weapon) {
        gizmos.circle_2d(
            to_world(viewport, ship.position()),
            ship.radius * 1.6,
            color,
        );
    }
}

// ── Update ────────────────────────────────────────────────────────────────────

/// Draw the ship and every live bullet.
pub fn player_gizmo_system(
    mut gizmos: Gizmos,
    sim: Res<Simulation>,
    state: Res<State<GameState>>,
    time: Res<Time>,
) {
    if !state.get().shows_world() {
        return;
    }
    let viewport = sim.viewport();

    if sim.ship_visible() {
        draw_ship(&mut gizmos, sim.ship(), viewport, time.elapsed_secs());
    }

    for bullet in sim.bullets().iter_active() {
        let bounds = bullet.bounds();
        gizmos.rect_2d(
            Isometry2d::from_translation(to_world(viewport, bounds.center())),
            bounds.size(),
            bullet_color(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nose_points_along_facing() {
        let ship = Ship::new(Vec2::new(100.0, 100.0), 3, 12.0, 15.0);
        let outline = ship_outline(&ship);
        // Rotation 0 faces up the screen.
        assert!((outline[0] - Vec2::new(100.0, 85.0)).length() < 1e-4);
        assert_eq!(outline.first(), outline.last());
    }
}
