//! Rendering systems: HUD, world gizmos, screen shake and the damage flash.
//!
//! ## Layer Model
//!
//! | Layer              | Technology   | Shown when                              |
//! |--------------------|--------------|-----------------------------------------|
//! | Asteroids          | Gizmos       | world visible                           |
//! | Power-ups          | Gizmos       | world visible; alpha pulses             |
//! | Particles          | Gizmos       | either death effect running             |
//! | Ship fragments     | Gizmos       | either death effect running             |
//! | Ship / bullets     | Gizmos       | see [`crate::player::rendering`]        |
//! | Flash overlay      | Bevy UI      | alpha follows the active flash          |
//! | HUD                | Bevy UI      | world visible                           |
//!
//! "World visible" means [`GameState::shows_world`].
//!
//! ## System Responsibilities
//!
//! | System                     | Schedule | Purpose                            |
//! |----------------------------|----------|------------------------------------|
//! | `setup_hud`                | Startup  | Spawn the permanent HUD node       |
//! | `setup_flash_overlay`      | Startup  | Spawn the full-viewport flash node |
//! | `hud_display_system`       | Update   | Refresh HUD text and visibility    |
//! | `flash_overlay_system`     | Update   | Tint the flash node                |
//! | `camera_shake_system`      | Update   | Offset the camera by the shake     |
//! | `world_gizmo_system`       | Update   | Draw asteroids, pickups, debris    |

use crate::asteroid::Asteroid;
use crate::config::GameConfig;
use crate::graphics::{to_world, GameFont, MainCamera};
use crate::high_scores::{HighScoreBoard, HighScoreStore};
use crate::menu::GameState;
use crate::particles::{DeathEffect, FLASH_COLOR};
use crate::player::state::WeaponMode;
use crate::power_up::PowerUp;
use crate::rigid_body::{direction_from_angle, facing_vector, Viewport};
use crate::simulation::Simulation;
use bevy::prelude::*;
use std::f32::consts::TAU;

// ── Component markers ─────────────────────────────────────────────────────────

/// Root of the top-left HUD.
#[derive(Component)]
pub struct HudDisplay;

/// Full-viewport node tinted by the damage flash.
#[derive(Component)]
pub struct FlashOverlay;

// ── Startup ───────────────────────────────────────────────────────────────────

/// Spawn the top-left HUD.  Hidden until a game starts.
pub fn setup_hud(mut commands: Commands, config: Res<GameConfig>, font: Res<GameFont>) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                ..default()
            },
            Visibility::Hidden,
            HudDisplay,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font: font.0.clone(),
                    font_size: config.hud_font_size,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.88, 0.45)),
            ));
        });
}

/// Spawn the flash overlay, fully transparent.
pub fn setup_flash_overlay(mut commands: Commands) {
    commands.spawn((
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            left: Val::Px(0.0),
            top: Val::Px(0.0),
            ..default()
        },
        BackgroundColor(FLASH_COLOR.with_alpha(0.0)),
        ZIndex(100),
        FlashOverlay,
    ));
}

// ── HUD ───────────────────────────────────────────────────────────────────────

/// Two-line HUD body.
pub fn hud_text(sim: &Simulation, best: u32) -> String {
    let ship = sim.ship();
    let weapon = if ship.weapon == WeaponMode::Single {
        ship.weapon.label().to_string()
    } else {
        format!("{} {:.1}s", ship.weapon.label(), ship.weapon_timer.max(0.0))
    };
    format!(
        "Score: {}   Lives: {}   Level: {}   Best: {}\nWeapon: {}",
        sim.score(),
        ship.lives,
        sim.level(),
        best.max(sim.score()),
        weapon
    )
}

/// Refresh the HUD text and show it only while the world is on screen.
pub fn hud_display_system(
    sim: Res<Simulation>,
    scores: Res<HighScoreBoard>,
    state: Res<State<GameState>>,
    mut parent_query: Query<(&Children, &mut Visibility), With<HudDisplay>>,
    mut text_query: Query<&mut Text>,
) {
    let visible = state.get().shows_world();
    for (children, mut visibility) in parent_query.iter_mut() {
        let wanted = if visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if *visibility != wanted {
            *visibility = wanted;
        }
        if !visible || !sim.is_changed() {
            continue;
        }
        let body = hud_text(&sim, scores.highest());
        for child in children.iter() {
            if let Ok(mut text) = text_query.get_mut(child) {
                if text.0 != body {
                    text.0.clone_from(&body);
                }
            }
        }
    }
}

// ── Feedback ──────────────────────────────────────────────────────────────────

pub fn flash_overlay_system(
    sim: Res<Simulation>,
    mut query: Query<&mut BackgroundColor, With<FlashOverlay>>,
) {
    let alpha = sim.flash_alpha();
    for mut bg in query.iter_mut() {
        bg.0 = FLASH_COLOR.with_alpha(alpha);
    }
}

/// Offset the camera by the current shake.  Simulation +Y is down, so the
/// vertical component flips.
pub fn camera_shake_system(
    sim: Res<Simulation>,
    state: Res<State<GameState>>,
    mut camera: Query<&mut Transform, With<MainCamera>>,
) {
    let shake = if *state.get() == GameState::Playing {
        sim.screen_shake()
    } else {
        Vec2::ZERO
    };
    for mut transform in camera.iter_mut() {
        transform.translation.x = shake.x;
        transform.translation.y = -shake.y;
    }
}

// ── World gizmos ──────────────────────────────────────────────────────────────

/// Radius multipliers for the jagged asteroid outline.
const ROCK_PROFILE: [f32; 11] = [
    1.0, 0.86, 0.97, 0.78, 0.93, 1.05, 0.82, 0.95, 0.88, 1.02, 0.9,
];

fn rock_color() -> Color {
    Color::srgb(0.72, 0.66, 0.60)
}
fn fragment_color() -> Color {
    Color::srgb(0.85, 0.95, 1.0)
}

/// Screen-space outline of `asteroid`, closed.
pub fn asteroid_outline(asteroid: &Asteroid) -> Vec<Vec2> {
    let n = ROCK_PROFILE.len();
    let center = asteroid.position();
    let radius = asteroid.radius();
    (0..=n)
        .map(|i| {
            let k = i % n;
            let angle = asteroid.body.rotation + k as f32 * TAU / n as f32;
            center + direction_from_angle(angle) * radius * ROCK_PROFILE[k]
        })
        .collect()
}

fn draw_power_up(gizmos: &mut Gizmos, power_up: &PowerUp, viewport: Viewport) {
    let color = power_up.kind.color().with_alpha(power_up.pulse_alpha());
    let center = to_world(viewport, power_up.position());
    let side = power_up.radius() * 2.0;
    gizmos.rect_2d(
        Isometry2d::new(center, Rot2::radians(-power_up.body.rotation)),
        Vec2::splat(side),
        color,
    );
    gizmos.circle_2d(center, power_up.radius() * 0.45, color);
}

fn draw_death_effect(gizmos: &mut Gizmos, effect: &DeathEffect, viewport: Viewport) {
    for particle in effect.particles().iter_active() {
        gizmos.circle_2d(
            to_world(viewport, particle.body.position),
            1.0 + 2.5 * particle.size,
            particle.color.with_alpha(particle.alpha()),
        );
    }
    for fragment in effect.fragments().iter_active() {
        let half = facing_vector(fragment.body.rotation) * 5.0;
        let a = to_world(viewport, fragment.body.position - half);
        let b = to_world(viewport, fragment.body.position + half);
        gizmos.line_2d(a, b, fragment_color().with_alpha(fragment.alpha()));
    }
}

/// Draw everything in the field except the ship and bullets.
pub fn world_gizmo_system(
    mut gizmos: Gizmos,
    sim: Res<Simulation>,
    state: Res<State<GameState>>,
) {
    if !state.get().shows_world() {
        return;
    }
    let viewport = sim.viewport();

    for asteroid in sim.asteroids().iter().filter(|a| a.active) {
        let points: Vec<Vec2> = asteroid_outline(asteroid)
            .into_iter()
            .map(|p| to_world(viewport, p))
            .collect();
        gizmos.linestrip_2d(points, rock_color());
    }

    for power_up in sim.power_ups().iter_active() {
        draw_power_up(&mut gizmos, power_up, viewport);
    }

    draw_death_effect(&mut gizmos, sim.death_effect(), viewport);
    draw_death_effect(&mut gizmos, sim.life_loss_effect(), viewport);
}
