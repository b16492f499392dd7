//! Impostor Hunt - A tiny social-deduction game for the browser
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, kills, tasks, voting)
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Player preferences persisted to LocalStorage
//! - `tuning`: Data-driven game balance

pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{Tuning, VoteMatch};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (one tick per 60 Hz animation frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Arena used when no canvas size is known (native runs, tests)
    pub const DEFAULT_ARENA: Vec2 = Vec2::new(800.0, 600.0);

    /// Character defaults
    pub const PLAYER_SIZE: f32 = 30.0;
    pub const BOT_SIZE: f32 = 30.0;
    pub const NUM_BOTS: u32 = 3;
    pub const PLAYER_START: Vec2 = Vec2::new(100.0, 100.0);
    /// Units per tick along each intent axis
    pub const PLAYER_SPEED: f32 = 3.0;

    /// Bots chase the player inside this radius
    pub const VISION_RADIUS: f32 = 150.0;
    /// Units per tick a chasing bot covers
    pub const BOT_STEP: f32 = 2.0;

    /// Kill rules
    pub const KILL_RADIUS: f32 = 30.0;
    pub const IMPOSTOR_KILL_CHANCE: f64 = 0.02;
    pub const GENERIC_KILL_CHANCE: f64 = 0.01;

    /// Task defaults
    pub const TASK_RADIUS: f32 = 10.0;
    pub const TASK_POSITIONS: [Vec2; 3] = [
        Vec2::new(200.0, 200.0),
        Vec2::new(400.0, 100.0),
        Vec2::new(600.0, 300.0),
    ];
}

/// Euclidean distance between two canvas points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Move `from` a fixed `step` toward `to`, heading taken from atan2
///
/// Overshoots when `step` exceeds the distance, the same as a naive chase.
#[inline]
pub fn step_toward(from: Vec2, to: Vec2, step: f32) -> Vec2 {
    let delta = to - from;
    let angle = delta.y.atan2(delta.x);
    from + Vec2::new(angle.cos(), angle.sin()) * step
}
