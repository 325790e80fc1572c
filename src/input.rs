//! Logical keys, per-frame snapshots and edge detection.
//!
//! The simulation never polls a keyboard.  Once per frame the host takes an
//! [`InputSnapshot`] from an [`InputSource`] (the Bevy adapter below, or a
//! scripted source in tests) and feeds it to [`InputState::advance`], which
//! keeps the previous snapshot so that [`InputState::just_pressed`] is true
//! only on the frame a key goes from up to down.
//!
//! ## Default bindings
//!
//! | Key            | Logical key                |
//! |----------------|----------------------------|
//! | ← / A          | `RotateLeft`               |
//! | → / D          | `RotateRight`              |
//! | ↑ / W          | `Thrust`                   |
//! | Space          | `Fire`                     |
//! | V              | `QuickTurn`                |
//! | P              | `Pause`                    |
//! | S              | `Start`                    |
//! | H              | `HighScores`               |
//! | Q              | `Quit`                     |
//! | Y / N          | `Yes` / `No`               |
//! | Enter          | `Confirm`                  |
//! | Backspace      | `Backspace`                |
//! | Escape         | `Exit`                     |
//!
//! Letters, digits and space are additionally reported as text keys for name
//! entry.

use bevy::prelude::*;

/// Commands the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKey {
    RotateLeft,
    RotateRight,
    Thrust,
    Fire,
    QuickTurn,
    Pause,
    Start,
    HighScores,
    Quit,
    Yes,
    No,
    Confirm,
    Backspace,
    Exit,
}

impl GameKey {
    pub const ALL: [GameKey; 14] = [
        GameKey::RotateLeft,
        GameKey::RotateRight,
        GameKey::Thrust,
        GameKey::Fire,
        GameKey::QuickTurn,
        GameKey::Pause,
        GameKey::Start,
        GameKey::HighScores,
        GameKey::Quit,
        GameKey::Yes,
        GameKey::No,
        GameKey::Confirm,
        GameKey::Backspace,
        GameKey::Exit,
    ];

    #[inline]
    fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

/// Characters accepted during name entry, in bit order.
const TEXT_CHARS: &[u8; 37] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789 ";

fn text_bit(c: char) -> Option<u64> {
    let upper = c.to_ascii_uppercase();
    TEXT_CHARS
        .iter()
        .position(|&b| b as char == upper)
        .map(|i| 1u64 << i)
}

/// Which keys are down at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    keys: u32,
    text: u64,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper for scripted input.
    pub fn with(mut self, key: GameKey) -> Self {
        self.press(key);
        self
    }

    /// Builder-style helper for scripted name entry.
    pub fn with_char(mut self, c: char) -> Self {
        self.press_char(c);
        self
    }

    pub fn press(&mut self, key: GameKey) {
        self.keys |= key.bit();
    }

    /// Mark a text key as down.  Characters outside A–Z, 0–9 and space are
    /// ignored.
    pub fn press_char(&mut self, c: char) {
        if let Some(bit) = text_bit(c) {
            self.text |= bit;
        }
    }

    #[inline]
    pub fn is_down(&self, key: GameKey) -> bool {
        self.keys & key.bit() != 0
    }

    #[inline]
    pub fn is_char_down(&self, c: char) -> bool {
        text_bit(c).is_some_and(|bit| self.text & bit != 0)
    }
}

/// Anything that can report the keys currently held.
pub trait InputSource {
    fn snapshot(&self) -> InputSnapshot;
}

impl InputSource for InputSnapshot {
    fn snapshot(&self) -> InputSnapshot {
        *self
    }
}

/// Current and previous snapshot.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct InputState {
    current: InputSnapshot,
    previous: InputSnapshot,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame with `snapshot` as the current key state.
    pub fn advance(&mut self, snapshot: InputSnapshot) {
        self.previous = self.current;
        self.current = snapshot;
    }

    /// Take the snapshot from a source and advance.
    pub fn poll(&mut self, source: &impl InputSource) {
        self.advance(source.snapshot());
    }

    #[inline]
    pub fn is_down(&self, key: GameKey) -> bool {
        self.current.is_down(key)
    }

    /// `true` only on the frame `key` goes from up to down.
    #[inline]
    pub fn just_pressed(&self, key: GameKey) -> bool {
        self.current.is_down(key) && !self.previous.is_down(key)
    }

    /// Text keys that went down this frame, in A–Z, 0–9, space order.
    pub fn just_typed(&self) -> impl Iterator<Item = char> + '_ {
        let fresh = self.current.text & !self.previous.text;
        TEXT_CHARS
            .iter()
            .enumerate()
            .filter(move |(i, _)| fresh & (1u64 << i) != 0)
            .map(|(_, &b)| b as char)
    }
}

// ── Bevy keyboard adapter ─────────────────────────────────────────────────────

fn bindings(key: GameKey) -> &'static [KeyCode] {
    match key {
        GameKey::RotateLeft => &[KeyCode::ArrowLeft, KeyCode::KeyA],
        GameKey::RotateRight => &[KeyCode::ArrowRight, KeyCode::KeyD],
        GameKey::Thrust => &[KeyCode::ArrowUp, KeyCode::KeyW],
        GameKey::Fire => &[KeyCode::Space],
        GameKey::QuickTurn => &[KeyCode::KeyV],
        GameKey::Pause => &[KeyCode::KeyP],
        GameKey::Start => &[KeyCode::KeyS],
        GameKey::HighScores => &[KeyCode::KeyH],
        GameKey::Quit => &[KeyCode::KeyQ],
        GameKey::Yes => &[KeyCode::KeyY],
        GameKey::No => &[KeyCode::KeyN],
        GameKey::Confirm => &[KeyCode::Enter, KeyCode::NumpadEnter],
        GameKey::Backspace => &[KeyCode::Backspace],
        GameKey::Exit => &[KeyCode::Escape],
    }
}

const TEXT_KEYS: [(KeyCode, char); 37] = [
    (KeyCode::KeyA, 'A'),
    (KeyCode::KeyB, 'B'),
    (KeyCode::KeyC, 'C'),
    (KeyCode::KeyD, 'D'),
    (KeyCode::KeyE, 'E'),
    (KeyCode::KeyF, 'F'),
    (KeyCode::KeyG, 'G'),
    (KeyCode::KeyH, 'H'),
    (KeyCode::KeyI, 'I'),
    (KeyCode::KeyJ, 'J'),
    (KeyCode::KeyK, 'K'),
    (KeyCode::KeyL, 'L'),
    (KeyCode::KeyM, 'M'),
    (KeyCode::KeyN, 'N'),
    (KeyCode::KeyO, 'O'),
    (KeyCode::KeyP, 'P'),
    (KeyCode::KeyQ, 'Q'),
    (KeyCode::KeyR, 'R'),
    (KeyCode::KeyS, 'S'),
    (KeyCode::KeyT, 'T'),
    (KeyCode::KeyU, 'U'),
    (KeyCode::KeyV, 'V'),
    (KeyCode::KeyW, 'W'),
    (KeyCode::KeyX, 'X'),
    (KeyCode::KeyY, 'Y'),
    (KeyCode::KeyZ, 'Z'),
    (KeyCode::Digit0, '0'),
    (KeyCode::Digit1, '1'),
    (KeyCode::Digit2, '2'),
    (KeyCode::Digit3, '3'),
    (KeyCode::Digit4, '4'),
    (KeyCode::Digit5, '5'),
    (KeyCode::Digit6, '6'),
    (KeyCode::Digit7, '7'),
    (KeyCode::Digit8, '8'),
    (KeyCode::Digit9, '9'),
    (KeyCode::Space, ' '),
];

impl InputSource for ButtonInput<KeyCode> {
    fn snapshot(&self) -> InputSnapshot {
        let mut snapshot = InputSnapshot::new();
        for key in GameKey::ALL {
            if self.any_pressed(bindings(key).iter().copied()) {
                snapshot.press(key);
            }
        }
        for (code, c) in TEXT_KEYS {
            if self.pressed(code) {
                snapshot.press_char(c);
            }
        }
        snapshot
    }
}

/// `PreUpdate` system: roll the keyboard into [`InputState`].
pub fn keyboard_input_system(keys: Res<ButtonInput<KeyCode>>, mut input: ResMut<InputState>) {
    input.poll(&*keys);
}
