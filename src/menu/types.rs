use bevy::prelude::*;

/// Top-level application state machine.
///
/// [`super::GameFlow`] owns the authoritative copy; this Bevy state mirrors it
/// so overlays can hook `OnEnter` / `OnExit`.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Title screen; shown on startup.
    #[default]
    MainMenu,
    /// Active simulation.
    Playing,
    /// Simulation frozen; pause overlay is visible.
    Paused,
    /// Ship destroyed without a qualifying score.
    GameOver,
    /// Ship destroyed with a qualifying score; name prompt is visible.
    HighScoreEntry,
    /// Top-ten table.
    HighScoreDisplay,
}

impl GameState {
    pub const ALL: [GameState; 6] = [
        GameState::MainMenu,
        GameState::Playing,
        GameState::Paused,
        GameState::GameOver,
        GameState::HighScoreEntry,
        GameState::HighScoreDisplay,
    ];

    /// The world (ship, rocks, effects) is drawn behind this state.
    pub fn shows_world(self) -> bool {
        matches!(
            self,
            GameState::Playing | GameState::Paused | GameState::GameOver | GameState::HighScoreEntry
        )
    }
}

/// Root node of the title screen; despawned on `OnExit(MainMenu)`.
#[derive(Component)]
pub struct MainMenuRoot;

/// Root node of the pause overlay; despawned on `OnExit(Paused)`.
#[derive(Component)]
pub struct PauseMenuRoot;

/// Root node of the game-over overlay; despawned on `OnExit(GameOver)`.
#[derive(Component)]
pub struct GameOverRoot;

/// Root node of the name prompt; despawned on `OnExit(HighScoreEntry)`.
#[derive(Component)]
pub struct HighScoreEntryRoot;

/// The text node echoing the name being typed.
#[derive(Component)]
pub struct HighScoreNameText;

/// Root node of the table screen; despawned on `OnExit(HighScoreDisplay)`.
#[derive(Component)]
pub struct HighScoreDisplayRoot;
