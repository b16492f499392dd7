//! Scene building: game state to a list of filled circles

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::{Character, GamePhase, GameState};

/// Triangle fan resolution for every circle
pub const CIRCLE_SEGMENTS: u32 = 24;

/// One filled circle to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub center: Vec2,
    pub radius: f32,
    pub color: [f32; 4],
}

/// Fill color of a character: gray once dead, identity color otherwise
pub fn character_color(character: &Character) -> [f32; 4] {
    if character.dead {
        colors::DEAD
    } else {
        colors::crew(character.color)
    }
}

/// Draw list in paint order: living bots, the player, open tasks
///
/// Only a game in progress draws anything; meetings and the end screen
/// show a cleared canvas.
pub fn draw_list(state: &GameState) -> Vec<Sprite> {
    if state.phase != GamePhase::Playing {
        return Vec::new();
    }

    let radius = state.tuning.bot_size / 2.0;
    let bots = state
        .bots
        .iter()
        .filter(|b| b.is_alive())
        .chain(std::iter::once(&state.player))
        .map(|c| Sprite {
            center: c.pos,
            radius,
            color: character_color(c),
        });

    let tasks = state
        .tasks
        .iter()
        .filter(|t| !t.is_complete())
        .map(|t| Sprite {
            center: t.pos,
            radius: state.tuning.task_radius,
            color: colors::TASK,
        });

    bots.chain(tasks).collect()
}

/// Tessellate the draw list into canvas-space triangles
pub fn build_scene(state: &GameState) -> Vec<Vertex> {
    draw_list(state)
        .iter()
        .flat_map(|s| shapes::circle(s.center, s.radius, s.color, CIRCLE_SEGMENTS))
        .collect()
}
