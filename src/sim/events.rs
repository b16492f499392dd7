//! Events produced by a tick or a chat submission
//!
//! Returned to the caller for logging and UI cues; the state itself already
//! reflects them.

use serde::Serialize;

use super::state::CrewColor;

/// Why a meeting ended without anyone being ejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoEjection {
    /// No votes were cast
    NoVotes,
    /// Several candidates share the top count
    Tie,
    /// The winning vote names nobody
    NoMatch,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    BotKilled {
        killer: CrewColor,
        victim: CrewColor,
        victim_index: usize,
    },
    TaskCompleted {
        index: usize,
    },
    MeetingCalled,
    Ejected {
        color: CrewColor,
        impostor: bool,
    },
    NoEjection(NoEjection),
    /// "skip" typed during a meeting
    VotingSkipped,
    /// Every crew bot is dead
    CrewCleared,
}
