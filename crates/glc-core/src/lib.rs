pub mod config;
pub mod draw_list;
pub mod geometry;
pub mod model;

pub use config::{
    CircleFill, FILL_FRAGMENT_KEY, RenderConfig, TEXTURE_FRAGMENT_KEY, TexturePolicy,
    VERTEX_SHADER_KEY,
};
pub use draw_list::DrawList;
pub use geometry::Vertices;
pub use model::*;

// Re-export kurbo types so downstream crates don't need a direct dependency
pub use kurbo::{Point, Rect, Vec2};
