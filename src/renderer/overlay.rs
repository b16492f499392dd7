//! Vision overlay placement
//!
//! The overlay is a DOM element laid over the canvas; this only computes
//! where it goes.

use crate::sim::GameState;

/// Square box, in canvas pixels, marking the vision radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisionOverlay {
    pub left: f32,
    pub top: f32,
    pub size: f32,
}

impl VisionOverlay {
    /// CSS `(property, value)` pairs for the overlay element
    pub fn css(&self) -> [(&'static str, String); 4] {
        [
            ("width", format!("{}px", self.size)),
            ("height", format!("{}px", self.size)),
            ("left", format!("{}px", self.left)),
            ("top", format!("{}px", self.top)),
        ]
    }
}

/// Box of side `2 * vision` around the player's sprite
pub fn vision_overlay(state: &GameState) -> VisionOverlay {
    let vision = state.tuning.vision_radius;
    let offset = state.tuning.player_size / 2.0 - vision;
    VisionOverlay {
        left: state.player.pos.x + offset,
        top: state.player.pos.y + offset,
        size: vision * 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_overlay_tracks_player() {
        let mut state = GameState::with_seed(1);
        let overlay = vision_overlay(&state);
        // 100 + 15 - 150
        assert_eq!(overlay, VisionOverlay { left: -35.0, top: -35.0, size: 300.0 });

        state.player.pos = Vec2::new(400.0, 250.0);
        let overlay = vision_overlay(&state);
        assert_eq!(overlay.left, 265.0);
        assert_eq!(overlay.top, 115.0);
        assert_eq!(overlay.css()[2], ("left", "265px".to_string()));
    }
}
