//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod combat;
pub mod entities;
pub mod form;
pub mod progression;
pub mod region;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod wave;

pub use combat::{Activation, activate};
pub use form::{Ability, AbilitySlot, AbilitySpec, Form};
pub use progression::{Upgrade, UpgradeIntent, try_upgrade};
pub use region::Rect;
pub use snapshot::Snapshot;
pub use state::{
    ActiveEffect, Ally, Archetype, District, Enemy, GamePhase, GameState, Player, ENRAGE_HEALTH,
};
pub use tick::{TickInput, tick};
pub use wave::{WaveState, quota_for_wave, spawn_interval};
