//! Meeting vote tally and ejection

use std::collections::BTreeMap;

use super::events::{GameEvent, NoEjection};
use super::state::{Character, CrewColor, GameState, PhaseTrigger};
use crate::tuning::VoteMatch;

/// Result of a vote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    Ejected { color: CrewColor, impostor: bool },
    NotEjected(NoEjection),
}

impl From<VoteOutcome> for GameEvent {
    fn from(outcome: VoteOutcome) -> Self {
        match outcome {
            VoteOutcome::Ejected { color, impostor } => GameEvent::Ejected { color, impostor },
            VoteOutcome::NotEjected(reason) => GameEvent::NoEjection(reason),
        }
    }
}

/// Count votes per distinct value (ordered for stable iteration)
pub fn tally<S: AsRef<str>>(votes: &[S]) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for v in votes {
        *counts.entry(v.as_ref()).or_insert(0) += 1;
    }
    counts
}

/// Values sharing the highest count
pub fn leaders<'a>(counts: &BTreeMap<&'a str, usize>) -> Vec<&'a str> {
    let Some(&max) = counts.values().max() else {
        return Vec::new();
    };
    counts
        .iter()
        .filter(|&(_, &n)| n == max)
        .map(|(&v, _)| v)
        .collect()
}

/// Find the bot a vote names
pub fn resolve_vote(bots: &[Character], vote: &str, mode: VoteMatch) -> Option<usize> {
    match mode {
        VoteMatch::Color => {
            let color = CrewColor::from_str(vote)?;
            bots.iter().position(|b| b.is_alive() && b.color == color)
        }
        VoteMatch::Coordinate => bots
            .iter()
            .position(|b| b.is_alive() && b.pos.x.to_string() == vote),
    }
}

/// Tally `votes`, announce the result and end the meeting when there is a
/// single winner
///
/// Ties and empty ballots only announce; the phase stays where it is.
pub fn vote<S: AsRef<str>>(state: &mut GameState, votes: &[S]) -> VoteOutcome {
    let counts = tally(votes);
    let top = leaders(&counts);

    let outcome = match top.as_slice() {
        [] => {
            state.chat.system("No one was ejected (skipped).");
            VoteOutcome::NotEjected(NoEjection::NoVotes)
        }
        [winner] => {
            let outcome = match resolve_vote(&state.bots, winner, state.tuning.vote_match) {
                Some(i) => {
                    let bot = &state.bots[i];
                    let (color, impostor) = (bot.color, bot.impostor);
                    if impostor {
                        state.chat.system(format!("{} was the impostor!", color));
                    } else {
                        state.chat.system(format!("{} was a crewmate.", color));
                    }
                    VoteOutcome::Ejected { color, impostor }
                }
                None => {
                    state.chat.system("No one was ejected (no match).");
                    VoteOutcome::NotEjected(NoEjection::NoMatch)
                }
            };
            state.advance_phase(PhaseTrigger::VoteResolved);
            outcome
        }
        _ => {
            state.chat.system("No one was ejected (tie).");
            VoteOutcome::NotEjected(NoEjection::Tie)
        }
    };

    log::info!("Vote {:?} -> {:?}", counts, outcome);
    outcome
}
