//! Emergency meetings and chat submission

use super::events::GameEvent;
use super::state::{CrewColor, GamePhase, GameState, PhaseTrigger};
use super::vote::vote;

/// Chat text that skips the vote
pub const SKIP_WORD: &str = "skip";

/// Post the meeting banner once per meeting
pub fn announce(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.meeting_announced {
        return;
    }
    state.meeting_announced = true;

    // The player's own color is not a vote option
    let options: Vec<&str> = state
        .living_bot_colors()
        .into_iter()
        .filter(|&c| c != state.player.color)
        .map(|c| c.as_str())
        .collect();
    let options = options.join(", ");

    state.chat.system("Emergency meeting called!");
    state.chat.system("Vote for who you think is the impostor.");
    state.chat.system(format!("Vote: {}", options));
    events.push(GameEvent::MeetingCalled);
}

/// Handle a line typed into the chat input
///
/// During a meeting the line is a vote (or "skip"); otherwise it is plain
/// player chat. Blank lines are dropped.
pub fn submit_chat(state: &mut GameState, text: &str) -> Option<GameEvent> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    match state.phase {
        GamePhase::Meeting if text.eq_ignore_ascii_case(SKIP_WORD) => {
            state.chat.system("Voting was skipped.");
            state.advance_phase(PhaseTrigger::VoteSkipped);
            Some(GameEvent::VotingSkipped)
        }
        GamePhase::Meeting => Some(vote(state, &[text]).into()),
        GamePhase::Playing | GamePhase::Ended => {
            state.chat.player(text);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::chat::ChatAuthor;
    use crate::sim::events::NoEjection;

    fn in_meeting() -> GameState {
        let mut state = GameState::with_seed(5);
        state.phase = GamePhase::Meeting;
        state
    }

    #[test]
    fn test_announce_once() {
        let mut state = in_meeting();
        state.bots[1].color = CrewColor::Blue;
        state.bots[2].color = CrewColor::Green;
        state.bots[1].dead = true;
        let mut events = Vec::new();

        announce(&mut state, &mut events);
        announce(&mut state, &mut events);

        assert_eq!(events, vec![GameEvent::MeetingCalled]);
        assert_eq!(state.chat.len(), 3);
        assert_eq!(state.chat.last().unwrap().text, "Vote: black, green");
    }

    #[test]
    fn test_announce_leaves_out_player_color() {
        let mut state = in_meeting();
        state.bots[1].color = CrewColor::Red;
        state.bots[2].color = CrewColor::Blue;
        let mut events = Vec::new();

        announce(&mut state, &mut events);

        assert_eq!(state.player.color, CrewColor::Red);
        assert_eq!(state.chat.last().unwrap().text, "Vote: black, blue");
    }

    #[test]
    fn test_skip_ends_game() {
        let mut state = in_meeting();
        let event = submit_chat(&mut state, " Skip ");
        assert_eq!(event, Some(GameEvent::VotingSkipped));
        assert_eq!(state.chat.last().unwrap().text, "Voting was skipped.");
        assert_eq!(state.phase, GamePhase::Ended);
    }

    #[test]
    fn test_vote_for_impostor() {
        let mut state = in_meeting();
        let event = submit_chat(&mut state, "black");
        assert_eq!(
            event,
            Some(GameEvent::Ejected {
                color: CrewColor::Black,
                impostor: true
            })
        );
        assert_eq!(state.phase, GamePhase::Ended);
    }

    #[test]
    fn test_unknown_vote_is_no_match() {
        let mut state = in_meeting();
        let event = submit_chat(&mut state, "nobody");
        assert_eq!(event, Some(GameEvent::NoEjection(NoEjection::NoMatch)));
        assert_eq!(state.phase, GamePhase::Ended);
    }

    #[test]
    fn test_chat_while_playing() {
        let mut state = GameState::with_seed(5);
        assert_eq!(submit_chat(&mut state, "skip"), None);
        assert_eq!(submit_chat(&mut state, "   "), None);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.chat.len(), 1);
        let msg = state.chat.last().unwrap();
        assert_eq!(msg.author, ChatAuthor::Player);
        assert_eq!(msg.text, "skip");
    }
}
