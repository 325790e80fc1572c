//! Disasteroids: a wrap-around asteroid shooter.
//!
//! The game core (ship, bullets, asteroids, power-ups, death effects and the
//! game-flow state machine) is plain Rust driven one frame at a time through
//! [`simulation::Simulation`] and [`menu::GameFlow`].  Bevy supplies the
//! window, input, audio and gizmo rendering around it.

pub mod asteroid;
pub mod audio;
pub mod collision;
pub mod config;
pub mod constants;
pub mod error;
pub mod graphics;
pub mod high_scores;
pub mod input;
pub mod menu;
pub mod particles;
pub mod player;
pub mod pool;
pub mod power_up;
pub mod rendering;
pub mod rigid_body;
pub mod simulation;
