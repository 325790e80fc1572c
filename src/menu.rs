//! Game flow and its screens.
//!
//! ## States
//!
//! | State              | Description                                   |
//! |--------------------|-----------------------------------------------|
//! | `MainMenu`         | Initial state; title screen shown             |
//! | `Playing`          | Simulation stepping every frame               |
//! | `Paused`           | World frozen under the pause overlay          |
//! | `GameOver`         | Ship destroyed, score did not qualify         |
//! | `HighScoreEntry`   | Ship destroyed, name prompt shown             |
//! | `HighScoreDisplay` | Top-ten table                                 |
//!
//! [`GameFlow`] decides every transition; the Bevy `GameState` only mirrors
//! it so each overlay can be spawned on `OnEnter` and despawned on `OnExit`.
//!
//! ## Systems (registered by `MenuPlugin`)
//!
//! | System                     | Schedule                      | Purpose                        |
//! |----------------------------|-------------------------------|--------------------------------|
//! | `game_flow_system`         | `Update`                      | Run the controller, mirror state |
//! | `setup_main_menu`          | `OnEnter(MainMenu)`           | Title screen                   |
//! | `setup_pause_menu`         | `OnEnter(Paused)`             | Pause overlay                  |
//! | `setup_game_over`          | `OnEnter(GameOver)`           | Game-over overlay              |
//! | `setup_high_score_entry`   | `OnEnter(HighScoreEntry)`     | Name prompt                    |
//! | `name_entry_text_system`   | `Update / in HighScoreEntry`  | Echo the typed name            |
//! | `setup_high_score_display` | `OnEnter(HighScoreDisplay)`   | Top-ten table                  |
//! | `despawn_all::<Root>`      | `OnExit(..)`                  | Remove the overlay             |

use crate::constants::MAX_NAME_LENGTH;
use crate::graphics::GameFont;
use crate::high_scores::{HighScoreBoard, HighScoreStore};
use crate::simulation::Simulation;
use bevy::prelude::*;

mod common;
pub mod flow;
mod game_over;
mod high_score_screens;
mod main_menu;
mod pause;
mod types;

use common::*;
pub use flow::{game_flow_system, GameFlow};
use game_over::*;
use high_score_screens::*;
use main_menu::*;
use pause::*;
pub use types::*;

/// Registers `GameState`, the flow controller and every overlay.
///
/// Must be added after [`crate::simulation::SimulationPlugin`], whose
/// resources the flow system reads.
pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<GameFlow>()
            .add_systems(Update, game_flow_system)
            .add_systems(OnEnter(GameState::MainMenu), setup_main_menu)
            .add_systems(OnExit(GameState::MainMenu), despawn_all::<MainMenuRoot>)
            .add_systems(OnEnter(GameState::Paused), setup_pause_menu)
            .add_systems(OnExit(GameState::Paused), despawn_all::<PauseMenuRoot>)
            .add_systems(OnEnter(GameState::GameOver), setup_game_over)
            .add_systems(OnExit(GameState::GameOver), despawn_all::<GameOverRoot>)
            .add_systems(OnEnter(GameState::HighScoreEntry), setup_high_score_entry)
            .add_systems(
                Update,
                name_entry_text_system
                    .after(game_flow_system)
                    .run_if(in_state(GameState::HighScoreEntry)),
            )
            .add_systems(
                OnExit(GameState::HighScoreEntry),
                despawn_all::<HighScoreEntryRoot>,
            )
            .add_systems(
                OnEnter(GameState::HighScoreDisplay),
                setup_high_score_display,
            )
            .add_systems(
                OnExit(GameState::HighScoreDisplay),
                despawn_all::<HighScoreDisplayRoot>,
            );
    }
}
