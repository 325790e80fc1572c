//! Game-flow controller: which phase the session is in and what each phase
//! does with this frame's input.
//!
//! | From               | Key (edge)          | To                  |
//! |--------------------|---------------------|---------------------|
//! | `MainMenu`         | S                   | `Playing` (new game)|
//! | `MainMenu`         | H                   | `HighScoreDisplay`  |
//! | `MainMenu`         | Q                   | exit                |
//! | `Playing`          | P                   | `Paused`            |
//! | `Paused`           | P                   | `Playing`           |
//! | `Playing`          | death effect over, qualifying score | `HighScoreEntry` |
//! | `Playing`          | death effect over, otherwise        | `GameOver`       |
//! | `GameOver`         | Y / N / H           | `Playing` / exit / `HighScoreDisplay` |
//! | `HighScoreEntry`   | Enter (name typed)  | `HighScoreDisplay`  |
//! | `HighScoreDisplay` | Enter               | `MainMenu`          |
//! | any                | Escape              | exit                |
//!
//! At most one transition happens per frame.

use super::GameState;
use crate::audio::{SoundQueue, SoundSink};
use crate::config::GameConfig;
use crate::constants::MAX_NAME_LENGTH;
use crate::high_scores::{HighScoreBoard, HighScoreStore};
use crate::input::{GameKey, InputState};
use crate::simulation::{FrameEvents, Simulation};
use bevy::prelude::*;

#[derive(Resource, Debug, Clone, Default)]
pub struct GameFlow {
    state: GameState,
    name_input: String,
    /// Table position of the most recently submitted score.
    last_rank: Option<usize>,
    exit_requested: bool,
}

impl GameFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Name typed so far on the entry screen.
    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    pub fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Returns `true` once after an exit was requested.
    pub fn take_exit_request(&mut self) -> bool {
        std::mem::take(&mut self.exit_requested)
    }

    /// Handle one frame.  Returns the simulation's events when this was a
    /// play frame.
    pub fn update(
        &mut self,
        input: &InputState,
        sim: &mut Simulation,
        scores: &mut dyn HighScoreStore,
        sound: &mut dyn SoundSink,
        dt: f32,
    ) -> Option<FrameEvents> {
        if input.just_pressed(GameKey::Exit) {
            self.request_exit();
            return None;
        }

        if self.state != GameState::Playing {
            sound.set_thrust(false);
        }

        match self.state {
            GameState::MainMenu => {
                if input.just_pressed(GameKey::Start) {
                    self.start_game(sim);
                } else if input.just_pressed(GameKey::HighScores) {
                    self.state = GameState::HighScoreDisplay;
                } else if input.just_pressed(GameKey::Quit) {
                    self.request_exit();
                }
                None
            }
            GameState::Playing => {
                if input.just_pressed(GameKey::Pause) {
                    self.state = GameState::Paused;
                    sound.set_thrust(false);
                    return None;
                }
                let events = sim.step(dt, input, sound);
                if sim.death_sequence_finished() {
                    sound.set_thrust(false);
                    self.finish_game(sim, scores);
                }
                Some(events)
            }
            GameState::Paused => {
                if input.just_pressed(GameKey::Pause) {
                    self.state = GameState::Playing;
                }
                None
            }
            GameState::GameOver => {
                if input.just_pressed(GameKey::Yes) {
                    self.start_game(sim);
                } else if input.just_pressed(GameKey::No) {
                    self.request_exit();
                } else if input.just_pressed(GameKey::HighScores) {
                    self.state = GameState::HighScoreDisplay;
                }
                None
            }
            GameState::HighScoreEntry => {
                self.handle_name_entry(input, sim, scores);
                None
            }
            GameState::HighScoreDisplay => {
                if input.just_pressed(GameKey::Confirm) {
                    self.state = GameState::MainMenu;
                }
                None
            }
        }
    }

    fn start_game(&mut self, sim: &mut Simulation) {
        sim.start_new_game();
        self.name_input.clear();
        self.state = GameState::Playing;
    }

    fn finish_game(&mut self, sim: &Simulation, scores: &dyn HighScoreStore) {
        if scores.is_high_score(sim.score()) {
            info!(
                "Game over with {} points: rank {}",
                sim.score(),
                scores.rank(sim.score())
            );
            self.name_input.clear();
            self.state = GameState::HighScoreEntry;
        } else {
            info!("Game over with {} points", sim.score());
            self.state = GameState::GameOver;
        }
    }

    fn handle_name_entry(
        &mut self,
        input: &InputState,
        sim: &Simulation,
        scores: &mut dyn HighScoreStore,
    ) {
        if input.just_pressed(GameKey::Confirm) && !self.name_input.trim().is_empty() {
            scores.add(&self.name_input, sim.score(), sim.level());
            self.last_rank = Some(scores.rank(sim.score()));
            self.state = GameState::HighScoreDisplay;
            return;
        }
        if input.just_pressed(GameKey::Backspace) {
            self.name_input.pop();
        }
        for c in input.just_typed() {
            if self.name_input.len() >= MAX_NAME_LENGTH {
                break;
            }
            self.name_input.push(c);
        }
    }

    fn request_exit(&mut self) {
        info!("Exit requested from {:?}", self.state);
        self.exit_requested = true;
    }
}

// ── Bevy driver ───────────────────────────────────────────────────────────────

/// Run the controller once per frame and mirror its phase into the Bevy
/// [`GameState`].  Δt is clamped to `max_frame_dt`.
#[allow(clippy::too_many_arguments)]
pub fn game_flow_system(
    time: Res<Time>,
    config: Res<GameConfig>,
    input: Res<InputState>,
    mut flow: ResMut<GameFlow>,
    mut sim: ResMut<Simulation>,
    mut scores: ResMut<HighScoreBoard>,
    mut sound: ResMut<SoundQueue>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: MessageWriter<AppExit>,
) {
    let dt = time.delta_secs().min(config.max_frame_dt);
    flow.update(&input, &mut sim, &mut *scores, &mut *sound, dt);

    if flow.state() != *state.get() {
        next_state.set(flow.state());
    }
    if flow.take_exit_request() {
        exit.write(AppExit::Success);
    }
}
