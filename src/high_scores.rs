//! High-score table and its on-disk store.
//!
//! The game-flow controller only needs the four queries of [`HighScoreStore`].
//! [`HighScoreTable`] answers them in memory; [`HighScoreBoard`] wraps a table
//! with a TOML file and rewrites it after every insertion.  Disk failures are
//! logged and otherwise ignored: a broken file never blocks play.
//!
//! File layout (`highscores.toml`):
//!
//! ```toml
//! version = 1
//!
//! [[entries]]
//! name = "ACE"
//! score = 50000
//! level = 8
//! recorded_at_unix = 1700000000
//! ```

use crate::constants::{MAX_HIGH_SCORES, MAX_NAME_LENGTH};
use crate::error::{SimError, SimResult};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub const HIGH_SCORE_PATH: &str = "highscores.toml";
const HIGH_SCORE_VERSION: u32 = 1;
const SECONDS_PER_DAY: u64 = 86_400;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u32,
    pub level: u32,
    pub recorded_at_unix: u64,
}

/// Queries the game flow makes against the table.
pub trait HighScoreStore {
    /// Would `score` earn a place in the table?
    fn is_high_score(&self, score: u32) -> bool;
    /// 1-based position `score` would take: one more than the number of
    /// entries strictly above it.
    fn rank(&self, score: u32) -> usize;
    fn add(&mut self, name: &str, score: u32, level: u32);
    /// Entries, best first, at most ten.
    fn list(&self) -> Vec<HighScoreEntry>;
    fn highest(&self) -> u32;
}

/// Uppercase, keep only A–Z / 0–9 / space, and cap the length.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| c.to_ascii_uppercase())
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || *c == ' ')
        .take(MAX_NAME_LENGTH)
        .collect()
}

fn current_unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

// ── In-memory table ───────────────────────────────────────────────────────────

/// Sorted best-first, never longer than [`MAX_HIGH_SCORES`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreTable {
    entries: Vec<HighScoreEntry>,
}

impl Default for HighScoreTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl HighScoreTable {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The stock table shipped with the game.
    pub fn with_defaults() -> Self {
        let now = current_unix_timestamp();
        let seed = [
            ("ACE", 50_000, 8, 30),
            ("PILOT", 40_000, 7, 25),
            ("HERO", 30_000, 6, 20),
            ("STAR", 25_000, 5, 15),
            ("NOVA", 20_000, 4, 10),
            ("COMET", 15_000, 4, 8),
            ("ROCKET", 12_000, 3, 6),
            ("SPACE", 10_000, 3, 4),
            ("ORBIT", 8_000, 2, 2),
            ("MOON", 5_000, 2, 1),
        ];
        let entries = seed
            .into_iter()
            .map(|(name, score, level, days_ago)| HighScoreEntry {
                name: name.to_string(),
                score,
                level,
                recorded_at_unix: now.saturating_sub(days_ago * SECONDS_PER_DAY),
            })
            .collect();
        Self { entries }
    }

    /// Build from arbitrary entries, sorting and truncating.  An empty list
    /// falls back to the stock table.
    pub fn from_entries(mut entries: Vec<HighScoreEntry>) -> Self {
        if entries.is_empty() {
            return Self::with_defaults();
        }
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lowest(&self) -> Option<u32> {
        self.entries.last().map(|e| e.score)
    }

    fn insert(&mut self, entry: HighScoreEntry) {
        // Ties go after existing entries with the same score.
        let index = self.entries.partition_point(|e| e.score >= entry.score);
        self.entries.insert(index, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
    }
}

impl HighScoreStore for HighScoreTable {
    fn is_high_score(&self, score: u32) -> bool {
        self.entries.len() < MAX_HIGH_SCORES || self.lowest().is_some_and(|low| score > low)
    }

    fn rank(&self, score: u32) -> usize {
        1 + self.entries.iter().filter(|e| e.score > score).count()
    }

    fn add(&mut self, name: &str, score: u32, level: u32) {
        self.insert(HighScoreEntry {
            name: sanitize_name(name),
            score,
            level,
            recorded_at_unix: current_unix_timestamp(),
        });
    }

    fn list(&self) -> Vec<HighScoreEntry> {
        self.entries.clone()
    }

    fn highest(&self) -> u32 {
        self.entries.first().map(|e| e.score).unwrap_or(0)
    }
}

// ── TOML persistence ──────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize, Debug, Clone)]
struct HighScoreFile {
    version: u32,
    #[serde(default)]
    entries: Vec<HighScoreEntry>,
}

/// Parse a high-score document.
pub fn parse_table(contents: &str, path: &Path) -> SimResult<HighScoreTable> {
    let file: HighScoreFile = toml::from_str(contents).map_err(|e| SimError::HighScoreParse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    if file.version != HIGH_SCORE_VERSION {
        return Err(SimError::HighScoreParse {
            path: path.display().to_string(),
            message: format!(
                "unsupported version {} (expected {})",
                file.version, HIGH_SCORE_VERSION
            ),
        });
    }
    Ok(HighScoreTable::from_entries(file.entries))
}

pub fn encode_table(table: &HighScoreTable) -> SimResult<String> {
    let file = HighScoreFile {
        version: HIGH_SCORE_VERSION,
        entries: table.entries.clone(),
    };
    toml::to_string_pretty(&file).map_err(|e| SimError::HighScoreEncode {
        message: e.to_string(),
    })
}

pub fn load_table(path: &Path) -> SimResult<HighScoreTable> {
    let contents = fs::read_to_string(path).map_err(|source| SimError::HighScoreIo {
        path: path.display().to_string(),
        source,
    })?;
    parse_table(&contents, path)
}

pub fn save_table(path: &Path, table: &HighScoreTable) -> SimResult<()> {
    let serialized = encode_table(table)?;
    fs::write(path, serialized).map_err(|source| SimError::HighScoreIo {
        path: path.display().to_string(),
        source,
    })
}

/// A table bound to a file.
#[derive(Resource, Debug, Clone)]
pub struct HighScoreBoard {
    table: HighScoreTable,
    path: Option<PathBuf>,
}

impl Default for HighScoreBoard {
    fn default() -> Self {
        Self::in_memory(HighScoreTable::with_defaults())
    }
}

impl HighScoreBoard {
    /// A board that never touches the disk.
    pub fn in_memory(table: HighScoreTable) -> Self {
        Self { table, path: None }
    }

    /// Load from `path`, falling back to the stock table if the file is
    /// missing or unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let table = if path.exists() {
            match load_table(&path) {
                Ok(table) => {
                    info!("Loaded {} high scores from {}", table.len(), path.display());
                    table
                }
                Err(e) => {
                    warn!("{e}; using default high scores");
                    HighScoreTable::with_defaults()
                }
            }
        } else {
            info!("No {} found; using default high scores", path.display());
            HighScoreTable::with_defaults()
        };
        Self {
            table,
            path: Some(path),
        }
    }

    pub fn table(&self) -> &HighScoreTable {
        &self.table
    }

    fn persist(&self) {
        let Some(path) = &self.path else {
            return;
        };
        if let Err(e) = save_table(path, &self.table) {
            warn!("{e}; high score kept in memory only");
        }
    }
}

impl HighScoreStore for HighScoreBoard {
    fn is_high_score(&self, score: u32) -> bool {
        self.table.is_high_score(score)
    }

    fn rank(&self, score: u32) -> usize {
        self.table.rank(score)
    }

    fn add(&mut self, name: &str, score: u32, level: u32) {
        self.table.add(name, score, level);
        info!("High score recorded: {} {} (level {})", sanitize_name(name), score, level);
        self.persist();
    }

    fn list(&self) -> Vec<HighScoreEntry> {
        self.table.list()
    }

    fn highest(&self) -> u32 {
        self.table.highest()
    }
}

/// Startup system: replace the default board with the one on disk.
pub fn load_high_scores(mut board: ResMut<HighScoreBoard>) {
    *board = HighScoreBoard::open(HIGH_SCORE_PATH);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with_floor(floor: u32) -> HighScoreTable {
        let entries = (0..MAX_HIGH_SCORES as u32)
            .map(|i| HighScoreEntry {
                name: format!("P{i}"),
                score: floor + i * 500,
                level: 1,
                recorded_at_unix: 0,
            })
            .collect();
        HighScoreTable::from_entries(entries)
    }

    #[test]
    fn defaults_are_sorted_best_first() {
        let table = HighScoreTable::with_defaults();
        assert_eq!(table.len(), MAX_HIGH_SCORES);
        assert_eq!(table.highest(), 50_000);
        assert_eq!(table.lowest(), Some(5_000));
        assert!(table.entries().windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn beating_the_floor_qualifies_and_tops_the_table() {
        let mut table = table_with_floor(45_000);
        assert_eq!(table.highest(), 49_500);
        assert!(table.is_high_score(50_000));
        assert!(!table.is_high_score(45_000));

        table.add("winner", 50_000, 9);
        assert_eq!(table.rank(50_000), 1);
        assert_eq!(table.list()[0].name, "WINNER");
        assert_eq!(table.len(), MAX_HIGH_SCORES);
        assert_eq!(table.lowest(), Some(45_500));
    }

    #[test]
    fn short_table_accepts_any_score() {
        let mut table = HighScoreTable::empty();
        assert!(table.is_high_score(0));
        table.add("a", 10, 1);
        assert_eq!(table.rank(5), 2);
        assert_eq!(table.rank(10), 1);
    }

    #[test]
    fn names_are_uppercased_filtered_and_capped() {
        assert_eq!(sanitize_name("ab c-9!"), "AB C9");
        assert_eq!(sanitize_name("abcdefghijklmnop"), "ABCDEFGHIJ");
    }

    #[test]
    fn encoded_table_parses_back() {
        let table = HighScoreTable::with_defaults();
        let text = encode_table(&table).expect("encode");
        let parsed = parse_table(&text, Path::new("mem")).expect("parse");
        assert_eq!(parsed, table);
    }

    #[test]
    fn wrong_version_is_rejected() {
        let err = parse_table("version = 99\n", Path::new("mem")).unwrap_err();
        assert!(matches!(err, SimError::HighScoreParse { .. }));
    }

    #[test]
    fn unwritable_path_is_swallowed() {
        let mut board = HighScoreBoard {
            table: HighScoreTable::empty(),
            path: Some(PathBuf::from("/nonexistent-dir/for/sure/highscores.toml")),
        };
        board.add("ace", 100, 1);
        assert_eq!(board.highest(), 100);
    }
}
