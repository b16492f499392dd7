//! Kill detection
//!
//! One routine serves every bot. The only thing that differs between the
//! impostor and the rest is the per-tick chance it is called with.

use super::events::GameEvent;
use super::state::{Character, GameState, PhaseTrigger};
use crate::distance;
use crate::tuning::Tuning;

/// Per-tick kill chance for a bot
pub fn kill_chance(tuning: &Tuning, bot: &Character) -> f64 {
    if bot.impostor {
        tuning.impostor_kill_chance
    } else {
        tuning.generic_kill_chance
    }
}

/// First living crew bot within `radius` of `bots[killer]`
///
/// The impostor is never a target, and a bot never targets itself.
pub fn find_victim(bots: &[Character], killer: usize, radius: f32) -> Option<usize> {
    let origin = bots.get(killer)?.pos;
    bots.iter()
        .enumerate()
        .find(|(i, b)| {
            *i != killer && !b.impostor && b.is_alive() && distance(b.pos, origin) < radius
        })
        .map(|(i, _)| i)
}

/// Roll `bots[killer]`'s kill chance and, on success, kill the nearest
/// eligible victim and call a meeting.
///
/// Dead bots never act. A successful roll with nobody in range does nothing.
pub fn attempt_kill(state: &mut GameState, killer: usize) -> Option<GameEvent> {
    let bot = state.bots.get(killer)?;
    if bot.dead {
        return None;
    }
    let chance = kill_chance(&state.tuning, bot);
    if !state.roll(chance) {
        return None;
    }

    let victim = find_victim(&state.bots, killer, state.tuning.kill_radius)?;
    state.bots[victim].dead = true;

    let killer_color = state.bots[killer].color;
    let victim_color = state.bots[victim].color;
    state
        .chat
        .system(format!("{} killed {}", killer_color, victim_color));
    state.advance_phase(PhaseTrigger::Kill);

    Some(GameEvent::BotKilled {
        killer: killer_color,
        victim: victim_color,
        victim_index: victim,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{CrewColor, GamePhase};
    use glam::Vec2;

    fn bot(x: f32, y: f32, color: CrewColor, impostor: bool) -> Character {
        Character::new(Vec2::new(x, y), color, impostor)
    }

    #[test]
    fn test_find_victim_skips_self_impostor_and_dead() {
        let mut bots = vec![
            bot(0.0, 0.0, CrewColor::Black, true),
            bot(10.0, 0.0, CrewColor::Blue, false),
            bot(20.0, 0.0, CrewColor::Green, false),
        ];
        bots[1].dead = true;

        // Impostor finds the living green bot
        assert_eq!(find_victim(&bots, 0, 30.0), Some(2));
        // Green has no one left: impostor excluded, blue dead, itself excluded
        assert_eq!(find_victim(&bots, 2, 30.0), None);
    }

    #[test]
    fn test_find_victim_radius_is_strict() {
        let bots = vec![
            bot(0.0, 0.0, CrewColor::Black, true),
            bot(30.0, 0.0, CrewColor::Blue, false),
        ];
        assert_eq!(find_victim(&bots, 0, 30.0), None);
        assert_eq!(find_victim(&bots, 0, 30.01), Some(1));
    }

    #[test]
    fn test_kill_chance_by_role() {
        let tuning = Tuning::default();
        let imp = bot(0.0, 0.0, CrewColor::Black, true);
        let crew = bot(0.0, 0.0, CrewColor::Blue, false);
        assert_eq!(kill_chance(&tuning, &imp), 0.02);
        assert_eq!(kill_chance(&tuning, &crew), 0.01);
    }

    #[test]
    fn test_attempt_kill_certain() {
        let tuning = Tuning {
            impostor_kill_chance: 1.0,
            ..Default::default()
        };
        let mut state = GameState::new(3, crate::consts::DEFAULT_ARENA, tuning);
        state.bots = vec![
            bot(300.0, 300.0, CrewColor::Black, true),
            bot(310.0, 300.0, CrewColor::Cyan, false),
        ];

        let event = attempt_kill(&mut state, 0);
        assert_eq!(
            event,
            Some(GameEvent::BotKilled {
                killer: CrewColor::Black,
                victim: CrewColor::Cyan,
                victim_index: 1,
            })
        );
        assert!(state.bots[1].dead);
        assert_eq!(state.phase, GamePhase::Meeting);
        assert_eq!(state.chat.last().unwrap().text, "black killed cyan");
    }

    #[test]
    fn test_attempt_kill_never() {
        let tuning = Tuning {
            impostor_kill_chance: 0.0,
            ..Default::default()
        };
        let mut state = GameState::new(3, crate::consts::DEFAULT_ARENA, tuning);
        state.bots = vec![
            bot(300.0, 300.0, CrewColor::Black, true),
            bot(310.0, 300.0, CrewColor::Cyan, false),
        ];

        for _ in 0..1000 {
            assert_eq!(attempt_kill(&mut state, 0), None);
        }
        assert!(!state.bots[1].dead);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_dead_bot_never_kills() {
        let tuning = Tuning {
            impostor_kill_chance: 1.0,
            ..Default::default()
        };
        let mut state = GameState::new(3, crate::consts::DEFAULT_ARENA, tuning);
        state.bots = vec![
            bot(300.0, 300.0, CrewColor::Black, true),
            bot(310.0, 300.0, CrewColor::Cyan, false),
        ];
        state.bots[0].dead = true;

        assert_eq!(attempt_kill(&mut state, 0), None);
        assert!(!state.bots[1].dead);
    }

    /// Kill rate of `bots[killer]` at default tuning over many seeded rolls
    fn kill_rate(killer: usize) -> f64 {
        const SEEDS: u64 = 40;
        const ROLLS: u32 = 1000;

        let mut kills = 0u32;
        for seed in 0..SEEDS {
            let mut state =
                GameState::new(seed, crate::consts::DEFAULT_ARENA, Tuning::default());
            state.bots = vec![
                bot(300.0, 300.0, CrewColor::Black, true),
                bot(310.0, 300.0, CrewColor::Cyan, false),
                bot(320.0, 300.0, CrewColor::Blue, false),
            ];
            for _ in 0..ROLLS {
                if let Some(GameEvent::BotKilled { victim_index, .. }) =
                    attempt_kill(&mut state, killer)
                {
                    kills += 1;
                    state.bots[victim_index].dead = false;
                    state.phase = GamePhase::Playing;
                }
            }
        }
        kills as f64 / (SEEDS * ROLLS as u64) as f64
    }

    #[test]
    fn test_default_kill_rates() {
        let impostor = kill_rate(0);
        assert!((impostor - 0.02).abs() < 0.004, "impostor rate {}", impostor);

        let crew = kill_rate(1);
        assert!((crew - 0.01).abs() < 0.0025, "crew rate {}", crew);
    }
}
