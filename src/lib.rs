//! City Showdown - a side-scrolling wave combat arcade core
//!
//! Core modules:
//! - `sim`: Simulation (entities, combat, progression, waves, game state machine)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use tuning::{TargetMode, Tuning};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the rate the balance was tuned at)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Frame rate that per-frame speeds in the balance tables refer to
    pub const REFERENCE_FPS: f32 = 60.0;
}

/// Convert a per-frame quantity (tuned at [`consts::REFERENCE_FPS`]) to per-second
#[inline]
pub fn per_second(per_frame: f32) -> f32 {
    per_frame * consts::REFERENCE_FPS
}

/// Count a timer down toward zero, never below
#[inline]
pub fn tick_down(timer: &mut f32, dt: f32) {
    *timer = (*timer - dt).max(0.0);
}
