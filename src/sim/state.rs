//! Game state and core simulation types
//!
//! Everything a session mutates lives in `GameState`; nothing is global.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::chat::ChatLog;
use crate::consts::*;
use crate::tuning::Tuning;

/// Identity label of a character. Votes name these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrewColor {
    Red,
    Blue,
    Green,
    Yellow,
    Cyan,
    Purple,
    Black,
}

/// Colors a crew bot may be dealt (repeats allowed)
pub const CREW_PALETTE: [CrewColor; 6] = [
    CrewColor::Blue,
    CrewColor::Green,
    CrewColor::Red,
    CrewColor::Yellow,
    CrewColor::Cyan,
    CrewColor::Purple,
];

impl CrewColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrewColor::Red => "red",
            CrewColor::Blue => "blue",
            CrewColor::Green => "green",
            CrewColor::Yellow => "yellow",
            CrewColor::Cyan => "cyan",
            CrewColor::Purple => "purple",
            CrewColor::Black => "black",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "red" => Some(CrewColor::Red),
            "blue" => Some(CrewColor::Blue),
            "green" => Some(CrewColor::Green),
            "yellow" => Some(CrewColor::Yellow),
            "cyan" => Some(CrewColor::Cyan),
            "purple" => Some(CrewColor::Purple),
            "black" => Some(CrewColor::Black),
            _ => None,
        }
    }
}

impl std::fmt::Display for CrewColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The player or a bot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub pos: Vec2,
    pub color: CrewColor,
    /// Fixed at creation
    pub impostor: bool,
    pub dead: bool,
}

impl Character {
    pub fn new(pos: Vec2, color: CrewColor, impostor: bool) -> Self {
        Self {
            pos,
            color,
            impostor,
            dead: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.dead
    }
}

/// A proximity objective
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub pos: Vec2,
    complete: bool,
}

impl Task {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            complete: false,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// One-way: there is no way back to incomplete
    pub fn mark_complete(&mut self) {
        self.complete = true;
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Moving around, bots chase and kill
    Playing,
    /// Emergency meeting, chat input is a vote
    Meeting,
    /// Session over, waiting for a restart
    Ended,
}

/// Gameplay events that move the phase forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseTrigger {
    /// A bot was killed
    Kill,
    /// A vote produced a single result
    VoteResolved,
    /// The meeting was skipped from chat
    VoteSkipped,
    /// No living crew bot remains
    CrewCleared,
}

impl GamePhase {
    /// Transition table. `None` means the trigger does not apply here.
    pub fn next(self, trigger: PhaseTrigger) -> Option<GamePhase> {
        match (self, trigger) {
            (GamePhase::Playing, PhaseTrigger::Kill) => Some(GamePhase::Meeting),
            (GamePhase::Playing, PhaseTrigger::CrewCleared) => Some(GamePhase::Ended),
            (GamePhase::Meeting, PhaseTrigger::VoteResolved) => Some(GamePhase::Ended),
            (GamePhase::Meeting, PhaseTrigger::VoteSkipped) => Some(GamePhase::Ended),
            _ => None,
        }
    }
}

/// Held directional input, one signed unit per axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveIntent {
    pub x: i8,
    pub y: i8,
}

impl MoveIntent {
    /// Set one axis from a press (`dir` is clamped to -1..=1)
    pub fn press(&mut self, axis: Axis, dir: i8) {
        let dir = dir.clamp(-1, 1);
        match axis {
            Axis::Horizontal => self.x = dir,
            Axis::Vertical => self.y = dir,
        }
    }

    /// Clear one axis on release
    pub fn release(&mut self, axis: Axis) {
        self.press(axis, 0);
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Text shown in the status bar when a game starts
pub const STATUS_TEXT: &str = "Find the impostor and complete the tasks!";

/// Complete game state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    rng: Pcg32,
    /// Canvas size in pixels
    pub arena: Vec2,
    pub tuning: Tuning,
    pub player: Character,
    /// Bot 0 is the impostor
    pub bots: Vec<Character>,
    pub tasks: Vec<Task>,
    pub phase: GamePhase,
    pub intent: MoveIntent,
    pub chat: ChatLog,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Meeting announcement already posted for the current meeting
    pub(crate) meeting_announced: bool,
}

impl GameState {
    /// Start a new game on an arena of the given size
    pub fn new(seed: u64, arena: Vec2, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let mut rng = Pcg32::seed_from_u64(seed);

        let span = (arena - Vec2::splat(tuning.bot_size)).max(Vec2::ZERO);
        let bots = (0..tuning.num_bots)
            .map(|i| {
                let pos = Vec2::new(rng.random::<f32>() * span.x, rng.random::<f32>() * span.y);
                if i == 0 {
                    Character::new(pos, CrewColor::Black, true)
                } else {
                    let color = CREW_PALETTE[rng.random_range(0..CREW_PALETTE.len())];
                    Character::new(pos, color, false)
                }
            })
            .collect();

        Self {
            seed,
            rng,
            arena,
            tuning,
            player: Character::new(PLAYER_START, CrewColor::Red, false),
            bots,
            tasks: TASK_POSITIONS.iter().copied().map(Task::new).collect(),
            phase: GamePhase::Playing,
            intent: MoveIntent::default(),
            chat: ChatLog::default(),
            time_ticks: 0,
            meeting_announced: false,
        }
    }

    /// Default arena and tuning
    pub fn with_seed(seed: u64) -> Self {
        Self::new(seed, DEFAULT_ARENA, Tuning::default())
    }

    /// Index of the impostor in `bots`
    pub fn impostor_index(&self) -> Option<usize> {
        self.bots.iter().position(|b| b.impostor)
    }

    /// Colors of bots still alive, in spawn order
    pub fn living_bot_colors(&self) -> Vec<CrewColor> {
        self.bots
            .iter()
            .filter(|b| b.is_alive())
            .map(|b| b.color)
            .collect()
    }

    /// Roll a per-tick probability
    pub(crate) fn roll(&mut self, chance: f64) -> bool {
        if chance <= 0.0 {
            return false;
        }
        self.rng.random_bool(chance.min(1.0))
    }

    /// Apply a phase trigger through the transition table
    ///
    /// Returns false (and leaves the phase alone) when the trigger does not
    /// apply to the current phase.
    pub fn advance_phase(&mut self, trigger: PhaseTrigger) -> bool {
        match self.phase.next(trigger) {
            Some(next) => {
                log::info!("Phase {:?} -> {:?} ({:?})", self.phase, next, trigger);
                self.phase = next;
                if next == GamePhase::Meeting {
                    self.meeting_announced = false;
                }
                true
            }
            None => {
                log::debug!("Ignored {:?} while {:?}", trigger, self.phase);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_layout() {
        let state = GameState::with_seed(42);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.pos, Vec2::new(100.0, 100.0));
        assert!(!state.player.impostor);
        assert!(!state.player.dead);

        assert_eq!(state.bots.len(), 3);
        assert_eq!(state.bots.iter().filter(|b| b.impostor).count(), 1);
        assert!(state.bots[0].impostor);
        assert_eq!(state.impostor_index(), Some(0));
        assert_eq!(state.bots[0].color, CrewColor::Black);
        assert!(state.bots[1..].iter().all(|b| CREW_PALETTE.contains(&b.color)));

        let task_pos: Vec<Vec2> = state.tasks.iter().map(|t| t.pos).collect();
        assert_eq!(
            task_pos,
            vec![
                Vec2::new(200.0, 200.0),
                Vec2::new(400.0, 100.0),
                Vec2::new(600.0, 300.0)
            ]
        );
        assert!(state.tasks.iter().all(|t| !t.is_complete()));
        assert!(state.chat.is_empty());
    }

    #[test]
    fn test_bots_spawn_inside_arena() {
        for seed in 0..50 {
            let state = GameState::with_seed(seed);
            for bot in &state.bots {
                assert!(bot.pos.x >= 0.0 && bot.pos.x < DEFAULT_ARENA.x - BOT_SIZE);
                assert!(bot.pos.y >= 0.0 && bot.pos.y < DEFAULT_ARENA.y - BOT_SIZE);
            }
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = GameState::with_seed(7);
        let b = GameState::with_seed(7);
        for (x, y) in a.bots.iter().zip(&b.bots) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.color, y.color);
        }
    }

    #[test]
    fn test_transition_table() {
        use GamePhase::*;
        use PhaseTrigger::*;

        assert_eq!(Playing.next(Kill), Some(Meeting));
        assert_eq!(Playing.next(CrewCleared), Some(Ended));
        assert_eq!(Meeting.next(VoteResolved), Some(Ended));
        assert_eq!(Meeting.next(VoteSkipped), Some(Ended));

        assert_eq!(Playing.next(VoteResolved), None);
        assert_eq!(Meeting.next(Kill), None);
        assert_eq!(Meeting.next(CrewCleared), None);
        assert_eq!(Ended.next(Kill), None);
        assert_eq!(Ended.next(VoteSkipped), None);
    }

    #[test]
    fn test_advance_phase_rejects_invalid() {
        let mut state = GameState::with_seed(1);
        assert!(!state.advance_phase(PhaseTrigger::VoteResolved));
        assert_eq!(state.phase, GamePhase::Playing);

        assert!(state.advance_phase(PhaseTrigger::Kill));
        assert_eq!(state.phase, GamePhase::Meeting);
    }

    #[test]
    fn test_intent_press_release() {
        let mut intent = MoveIntent::default();
        intent.press(Axis::Horizontal, -1);
        intent.press(Axis::Vertical, 5);
        assert_eq!(intent.as_vec2(), Vec2::new(-1.0, 1.0));

        intent.release(Axis::Horizontal);
        assert_eq!(intent, MoveIntent { x: 0, y: 1 });
    }

    #[test]
    fn test_task_completion_sticks() {
        let mut task = Task::new(Vec2::ZERO);
        task.mark_complete();
        task.mark_complete();
        assert!(task.is_complete());
    }

    #[test]
    fn test_color_parse() {
        assert_eq!(CrewColor::from_str("  Blue"), Some(CrewColor::Blue));
        assert_eq!(CrewColor::from_str("magenta"), None);
        assert_eq!(CrewColor::Purple.to_string(), "purple");
    }
}
