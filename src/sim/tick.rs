//! Per-frame simulation tick
//!
//! Core game loop that advances the world deterministically.

use super::detect::attempt_kill;
use super::events::GameEvent;
use super::meeting;
use super::state::{GamePhase, GameState, PhaseTrigger};
use crate::{distance, step_toward};

/// Advance the game state by one frame
///
/// Order while playing: player movement, bot chase and kill rolls, task
/// completion, win check. A meeting only posts its banner; an ended game
/// does nothing.
pub fn tick(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match state.phase {
        GamePhase::Playing => {
            move_player(state);
            move_bots(state, &mut events);
            complete_tasks(state, &mut events);
            check_crew_cleared(state, &mut events);
        }
        GamePhase::Meeting => meeting::announce(state, &mut events),
        GamePhase::Ended => return events,
    }

    state.time_ticks += 1;
    events
}

/// Translate the player by the held intent, staying on the canvas
fn move_player(state: &mut GameState) {
    let delta = state.intent.as_vec2() * state.tuning.player_speed;
    if delta == glam::Vec2::ZERO {
        return;
    }
    state.player.pos = (state.player.pos + delta).clamp(glam::Vec2::ZERO, state.arena);
}

/// Chase the player and roll kills, bot by bot
///
/// The first kill calls a meeting and ends the pass; bots later in the list
/// do not act this frame.
fn move_bots(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let vision = state.tuning.vision_radius;
    let step = state.tuning.bot_step;

    for i in 0..state.bots.len() {
        let target = state.player.pos;
        let bot = &mut state.bots[i];
        if bot.dead {
            continue;
        }
        if distance(target, bot.pos) < vision {
            bot.pos = step_toward(bot.pos, target, step);
        }

        if let Some(event) = attempt_kill(state, i) {
            log::info!("{:?}", event);
            events.push(event);
            break;
        }
    }
}

fn complete_tasks(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let reach = state.tuning.task_completion_radius();
    let player = state.player.pos;

    for (index, task) in state.tasks.iter_mut().enumerate() {
        if task.is_complete() || distance(player, task.pos) >= reach {
            continue;
        }
        task.mark_complete();
        state.chat.system("Task completed!");
        events.push(GameEvent::TaskCompleted { index });
    }
}

/// Ends the game once no crew bot is left alive
fn check_crew_cleared(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.phase != GamePhase::Playing {
        return;
    }
    if state.bots.iter().all(|b| b.dead || b.impostor) {
        state.chat.system("You completed all tasks!");
        state.advance_phase(PhaseTrigger::CrewCleared);
        events.push(GameEvent::CrewCleared);
    }
}
