//! WebGPU rendering module
//!
//! The scene is a flat list of filled circles in canvas coordinates; the
//! pipeline maps them to NDC and draws them as one triangle list.

pub mod overlay;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use overlay::{VisionOverlay, vision_overlay};
pub use pipeline::RenderState;
pub use scene::{Sprite, build_scene, character_color, draw_list};
pub use vertex::Vertex;
