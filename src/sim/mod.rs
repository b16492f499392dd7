//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, fixed step sizes
//! - Seeded RNG only
//! - Stable iteration order (bots by spawn index)
//! - No rendering or platform dependencies

pub mod chat;
pub mod detect;
pub mod events;
pub mod meeting;
pub mod state;
pub mod tick;
pub mod vote;

pub use chat::{ChatAuthor, ChatLog, ChatMessage};
pub use detect::{attempt_kill, find_victim, kill_chance};
pub use events::{GameEvent, NoEjection};
pub use meeting::submit_chat;
pub use state::{
    Axis, CREW_PALETTE, Character, CrewColor, GamePhase, GameState, MoveIntent, PhaseTrigger,
    STATUS_TEXT, Task,
};
pub use tick::tick;
pub use vote::{VoteOutcome, vote};
