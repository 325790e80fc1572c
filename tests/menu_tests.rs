//! Headless tests for the [`GameState`] state machine inside a Bevy app.
//!
//! These tests use [`MinimalPlugins`]: no window, no rendering, no audio
//! output, so they run fast and deterministically in CI.  Keys are fed by
//! writing [`InputState`] directly, since there is no keyboard.
//!
//! Covered scenarios:
//! 1. Default initial state is `MainMenu`, and the title screen is spawned.
//! 2. S on the title screen starts a game and mirrors `Playing`.
//! 3. P toggles `Playing` ↔ `Paused`; the pause overlay comes and goes.
//! 4. H opens the high-score table; Enter returns to the title screen.
//! 5. Escape asks the app to exit.
//! 6. `insert_state` can force the Bevy state without the controller.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use disasteroids::graphics::GameFont;
use disasteroids::input::{GameKey, InputSnapshot, InputState};
use disasteroids::menu::{
    GameFlow, GameState, HighScoreDisplayRoot, MainMenuRoot, MenuPlugin, PauseMenuRoot,
};
use disasteroids::simulation::{Simulation, SimulationPlugin};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Build a headless app with the simulation and menu plugins.
///
/// `MinimalPlugins` provides the scheduling infrastructure and `Time`.
/// `StatesPlugin` adds the `StateTransition` schedule needed by `init_state`.
fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .init_resource::<GameFont>()
        .add_plugins(SimulationPlugin)
        .add_plugins(MenuPlugin);
    app.update(); // Startup + settle into MainMenu
    app
}

/// Press and release `key`, then run one more frame so the mirrored Bevy
/// state catches up.
fn tap(app: &mut App, key: GameKey) {
    app.world_mut()
        .resource_mut::<InputState>()
        .advance(InputSnapshot::new().with(key));
    app.update();
    app.world_mut()
        .resource_mut::<InputState>()
        .advance(InputSnapshot::new());
    app.update();
}

fn bevy_state(app: &App) -> GameState {
    *app.world().resource::<State<GameState>>().get()
}

fn flow_state(app: &App) -> GameState {
    app.world().resource::<GameFlow>().state()
}

fn count<M: Component>(app: &mut App) -> usize {
    let world = app.world_mut();
    world.query_filtered::<Entity, With<M>>().iter(world).count()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn default_state_is_main_menu() {
    let mut app = headless_app();
    assert_eq!(bevy_state(&app), GameState::MainMenu);
    assert_eq!(flow_state(&app), GameState::MainMenu);
    assert_eq!(count::<MainMenuRoot>(&mut app), 1);
}

#[test]
fn start_key_begins_play() {
    let mut app = headless_app();
    tap(&mut app, GameKey::Start);

    assert_eq!(flow_state(&app), GameState::Playing);
    assert_eq!(bevy_state(&app), GameState::Playing);
    assert_eq!(count::<MainMenuRoot>(&mut app), 0);

    let sim = app.world().resource::<Simulation>();
    assert!(sim.ship().alive);
    assert!(!sim.asteroids().is_empty());
}

#[test]
fn pause_overlay_follows_the_toggle() {
    let mut app = headless_app();
    tap(&mut app, GameKey::Start);

    tap(&mut app, GameKey::Pause);
    assert_eq!(bevy_state(&app), GameState::Paused);
    assert_eq!(count::<PauseMenuRoot>(&mut app), 1);

    tap(&mut app, GameKey::Pause);
    assert_eq!(bevy_state(&app), GameState::Playing);
    assert_eq!(count::<PauseMenuRoot>(&mut app), 0);
}

#[test]
fn high_score_table_round_trip() {
    let mut app = headless_app();
    tap(&mut app, GameKey::HighScores);
    assert_eq!(bevy_state(&app), GameState::HighScoreDisplay);
    assert_eq!(count::<HighScoreDisplayRoot>(&mut app), 1);

    tap(&mut app, GameKey::Confirm);
    assert_eq!(bevy_state(&app), GameState::MainMenu);
    assert_eq!(count::<HighScoreDisplayRoot>(&mut app), 0);
    assert_eq!(count::<MainMenuRoot>(&mut app), 1);
}

#[test]
fn escape_requests_app_exit() {
    let mut app = headless_app();
    app.world_mut()
        .resource_mut::<InputState>()
        .advance(InputSnapshot::new().with(GameKey::Exit));
    app.update();
    assert_eq!(app.should_exit(), Some(AppExit::Success));
}

#[test]
fn insert_state_starts_in_playing() {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_state(GameState::Playing);
    app.update();
    assert_eq!(bevy_state(&app), GameState::Playing);
}
