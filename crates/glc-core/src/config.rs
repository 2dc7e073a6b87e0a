//! Renderer configuration.
//!
//! Every field has a default matching the canvas' long-standing behavior,
//! so an empty config document (`{}`) is valid. Hosts typically
//! deserialize this from JSON.

use crate::model::Color;
use serde::{Deserialize, Serialize};

/// Logical key of the vertex shader shared by both programs.
pub const VERTEX_SHADER_KEY: &str = "vertex-shader-2d";
/// Logical key of the texture-sampling fragment shader.
pub const TEXTURE_FRAGMENT_KEY: &str = "fragment-shader-2d";
/// Logical key of the flat-color fragment shader.
pub const FILL_FRAGMENT_KEY: &str = "fragment-shader-vertex-color";

/// What happens to the GPU texture created for a textured draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TexturePolicy {
    /// Allocate a texture per draw and never free it. Leaks one texture per
    /// textured draw call; only useful to reproduce legacy behavior.
    Retain,
    /// Allocate a texture per draw and delete it after the draw call.
    #[default]
    ReleaseAfterDraw,
    /// One texture per image id, uploaded on first use and reused.
    Cache,
}

/// Color used for untextured circles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircleFill {
    /// Always opaque green, whatever the circle's style says.
    #[default]
    Fixed,
    /// The circle's own fill color; green when the circle is unstyled.
    ShapeColor,
}

/// Configuration for `Canvas::new`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Shader source key for the shared vertex shader.
    pub vertex_shader: String,
    /// Shader source key for the texture fragment shader.
    pub texture_fragment_shader: String,
    /// Shader source key for the fill fragment shader.
    pub fill_fragment_shader: String,

    /// Color the surface is cleared to during bootstrap.
    pub clear_color: Color,

    /// Resize the surface's backing store to its displayed size before the
    /// viewport is set. Default: **true**.
    pub fit_to_display: bool,

    /// Clear the surface at the start of every non-empty flush. The canvas
    /// has never done this, so it defaults to **false**.
    pub clear_before_flush: bool,

    pub texture_policy: TexturePolicy,
    pub circle_fill: CircleFill,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            vertex_shader: VERTEX_SHADER_KEY.to_string(),
            texture_fragment_shader: TEXTURE_FRAGMENT_KEY.to_string(),
            fill_fragment_shader: FILL_FRAGMENT_KEY.to_string(),
            clear_color: Color::TRANSPARENT,
            fit_to_display: true,
            clear_before_flush: false,
            texture_policy: TexturePolicy::default(),
            circle_fill: CircleFill::default(),
        }
    }
}

impl RenderConfig {
    /// Fill color for an untextured circle whose own style color is `own`.
    pub fn circle_color(&self, own: Option<Color>) -> Color {
        match self.circle_fill {
            CircleFill::Fixed => Color::GREEN,
            CircleFill::ShapeColor => own.unwrap_or(Color::GREEN),
        }
    }
}
