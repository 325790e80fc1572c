//! Error types for the collaborators around the simulation core.
//!
//! Nothing inside a frame step can fail: pool exhaustion is a silent no-op and
//! invalid state transitions are unreachable by construction.  The errors here
//! come from the edges (config file, high-score file, numeric validation) and
//! are logged and swallowed at the call site so gameplay always proceeds.
//!
//! ## Usage
//!
//! ```rust
//! use disasteroids::error::{validate_viewport, SimResult};
//!
//! fn check() -> SimResult<()> {
//!     validate_viewport(1024.0, 768.0)?;
//!     Ok(())
//! }
//! # check().unwrap();
//! ```

use std::fmt;

/// Top-level error enum for the Disasteroids collaborators.
#[derive(Debug)]
pub enum SimError {
    /// `assets/game.toml` exists but could not be parsed.
    ConfigParse {
        /// Path that was read.
        path: String,
        /// Parser message.
        message: String,
    },

    /// Reading or writing the high-score file failed.
    HighScoreIo {
        /// Path that was accessed.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The high-score file exists but is not a valid table.
    HighScoreParse {
        /// Path that was read.
        path: String,
        /// Parser message.
        message: String,
    },

    /// The in-memory table could not be serialised.
    HighScoreEncode {
        /// Serializer message.
        message: String,
    },

    /// A tunable is outside the range the simulation can work with.
    UnsafeConstant {
        /// Name of the constant (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::ConfigParse { path, message } => {
                write!(f, "failed to parse config '{}': {}", path, message)
            }
            SimError::HighScoreIo { path, source } => {
                write!(f, "high-score file '{}' I/O error: {}", path, source)
            }
            SimError::HighScoreParse { path, message } => {
                write!(f, "high-score file '{}' is malformed: {}", path, message)
            }
            SimError::HighScoreEncode { message } => {
                write!(f, "failed to encode high-score table: {}", message)
            }
            SimError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::HighScoreIo { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience alias: a `Result` using `SimError` as the error type.
pub type SimResult<T> = Result<T, SimError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless both viewport dimensions are strictly positive.
pub fn validate_viewport(width: f32, height: f32) -> SimResult<()> {
    for (name, value) in [("viewport_width", width), ("viewport_height", height)] {
        if value <= 0.0 || !value.is_finite() {
            return Err(SimError::UnsafeConstant {
                name,
                value,
                safe_range: "(0.0, ∞)",
            });
        }
    }
    Ok(())
}

/// Returns an error if a pool would be created with no slots.
pub fn validate_pool_capacity(name: &'static str, capacity: usize) -> SimResult<()> {
    if capacity == 0 {
        Err(SimError::UnsafeConstant {
            name,
            value: 0.0,
            safe_range: "[1, ∞)",
        })
    } else {
        Ok(())
    }
}

/// Returns an error if a countdown duration is not strictly positive.
pub fn validate_duration(name: &'static str, value: f32) -> SimResult<()> {
    if value <= 0.0 || !value.is_finite() {
        Err(SimError::UnsafeConstant {
            name,
            value,
            safe_range: "(0.0, ∞)",
        })
    } else {
        Ok(())
    }
}
