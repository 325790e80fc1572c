//! Player module: ship, bullets, control, weapons and their gizmos.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | `Ship`, `Bullet` and `WeaponMode` |
//! | [`control`] | Input intent, rotation / thrust / drag / speed cap, weapon timer |
//! | [`combat`] | Firing patterns and power-up effects on the ship |
//! | [`rendering`] | Ship outline, thrust flame, weapon ring, bullet boxes |
//!
//! All public items are re-exported at this level so that the rest of the crate
//! can use flat `crate::player::*` imports without knowing the sub-module
//! layout.

pub mod combat;
pub mod control;
pub mod rendering;
pub mod state;

// ── Flat re-exports ───────────────────────────────────────────────────────────

pub use combat::{apply_power_up, fire_weapon, shot_origin, BulletTuning};
pub use control::{apply_ship_intent, tick_weapon_timer, ShipIntent, ShipTuning};
pub use rendering::{player_gizmo_system, ship_outline};
pub use state::{Bullet, Ship, WeaponMode};
