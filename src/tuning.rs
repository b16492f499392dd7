//! Data-driven game balance
//!
//! Every rule number the simulation reads lives here so a session can be
//! reshaped from saved settings without touching `sim`.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How a submitted vote is resolved to a bot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum VoteMatch {
    /// Vote text names a bot color
    #[default]
    Color,
    /// Vote text must equal a bot's x coordinate as printed.
    /// Reproduces the first release, where votes almost never matched.
    Coordinate,
}

impl VoteMatch {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteMatch::Color => "color",
            VoteMatch::Coordinate => "coordinate",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "color" | "colour" => Some(VoteMatch::Color),
            "coordinate" | "x" => Some(VoteMatch::Coordinate),
            _ => None,
        }
    }
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Bots spawned per game (bot 0 is the impostor)
    pub num_bots: u32,
    /// Chase radius around the player
    pub vision_radius: f32,
    /// Bot chase step per tick
    pub bot_step: f32,
    /// Player step per tick per intent axis
    pub player_speed: f32,
    pub kill_radius: f32,
    /// Per-tick kill roll for the impostor
    pub impostor_kill_chance: f64,
    /// Per-tick kill roll for every other bot
    pub generic_kill_chance: f64,
    pub player_size: f32,
    pub bot_size: f32,
    /// Drawn radius of a task marker
    pub task_radius: f32,
    pub vote_match: VoteMatch,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            num_bots: NUM_BOTS,
            vision_radius: VISION_RADIUS,
            bot_step: BOT_STEP,
            player_speed: PLAYER_SPEED,
            kill_radius: KILL_RADIUS,
            impostor_kill_chance: IMPOSTOR_KILL_CHANCE,
            generic_kill_chance: GENERIC_KILL_CHANCE,
            player_size: PLAYER_SIZE,
            bot_size: BOT_SIZE,
            task_radius: TASK_RADIUS,
            vote_match: VoteMatch::Color,
        }
    }
}

impl Tuning {
    /// Distance at which the player completes a task
    pub fn task_completion_radius(&self) -> f32 {
        self.player_size / 2.0 + self.task_radius
    }

    /// Clamp values loaded from storage into a playable range
    pub fn sanitized(mut self) -> Self {
        self.num_bots = self.num_bots.max(1);
        self.impostor_kill_chance = clamp_chance(self.impostor_kill_chance);
        self.generic_kill_chance = clamp_chance(self.generic_kill_chance);
        for v in [
            &mut self.vision_radius,
            &mut self.bot_step,
            &mut self.player_speed,
            &mut self.kill_radius,
            &mut self.player_size,
            &mut self.bot_size,
            &mut self.task_radius,
        ] {
            if !v.is_finite() || *v < 0.0 {
                *v = 0.0;
            }
        }
        self
    }
}

fn clamp_chance(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}
