//! Shape value objects submitted to the canvas each frame.
//!
//! Shapes are plain data. They carry geometry plus a [`ShapeStyle`] that
//! decides which render path draws them. Nothing here touches the graphics
//! context; the renderer consumes these by reference.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    /// Fully transparent black, the bootstrap clear color.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    /// Opaque green. Untextured circles render with this unless configured otherwise.
    pub const GREEN: Self = Self::rgba(0.0, 1.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        let channels: Vec<u8> = match bytes.len() {
            3 | 4 => bytes
                .iter()
                .map(|&c| hex_val(c).map(|v| v * 17))
                .collect::<Option<_>>()?,
            6 | 8 => bytes
                .chunks(2)
                .map(|pair| Some(hex_val(pair[0])? << 4 | hex_val(pair[1])?))
                .collect::<Option<_>>()?,
            _ => return None,
        };

        let unit = |v: u8| v as f32 / 255.0;
        Some(Self::rgba(
            unit(channels[0]),
            unit(channels[1]),
            unit(channels[2]),
            channels.get(3).copied().map_or(1.0, unit),
        ))
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

// ─── Textures ────────────────────────────────────────────────────────────

/// Opaque handle to a decoded image owned by the host.
///
/// The host decides what an id refers to (the browser binding keeps a
/// registry of `<img>` elements). Two textures with the same id are the
/// same image as far as texture caching is concerned.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(pub u32);

impl fmt::Debug for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "img#{}", self.0)
    }
}

/// An image plus its declared pixel size.
///
/// The declared size is trusted as-is; nothing checks it against the image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
    pub image: ImageId,
}

impl TextureInfo {
    pub fn new(image: ImageId, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            image,
        }
    }
}

// ─── Style ───────────────────────────────────────────────────────────────

/// How a shape is painted.
///
/// Texture wins over fill by construction: a shape is either textured,
/// filled, or unstyled, never both.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ShapeStyle {
    /// Nothing to paint. Rectangles with this style are skipped.
    #[default]
    None,
    Filled { color: Color },
    Textured { texture: TextureInfo },
}

impl ShapeStyle {
    pub fn has_fill_color(&self) -> bool {
        matches!(self, ShapeStyle::Filled { .. })
    }

    pub fn has_texture(&self) -> bool {
        matches!(self, ShapeStyle::Textured { .. })
    }

    pub fn fill_color(&self) -> Option<Color> {
        match self {
            ShapeStyle::Filled { color } => Some(*color),
            _ => None,
        }
    }

    pub fn texture(&self) -> Option<&TextureInfo> {
        match self {
            ShapeStyle::Textured { texture } => Some(texture),
            _ => None,
        }
    }
}

// ─── Shapes ──────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in surface pixels (y grows downward).
///
/// Width and height are expected to be non-negative; they are not validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub position: Point,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub style: ShapeStyle,
}

impl Rectangle {
    /// An unstyled rectangle. Use [`Rectangle::filled`] or
    /// [`Rectangle::textured`] to give it something to paint.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            position: Point::new(x, y),
            width,
            height,
            style: ShapeStyle::None,
        }
    }

    pub fn filled(mut self, color: Color) -> Self {
        self.style = ShapeStyle::Filled { color };
        self
    }

    pub fn textured(mut self, texture: TextureInfo) -> Self {
        self.style = ShapeStyle::Textured { texture };
        self
    }

    pub fn x1(&self) -> f64 {
        self.position.x
    }

    pub fn y1(&self) -> f64 {
        self.position.y
    }

    pub fn x2(&self) -> f64 {
        self.position.x + self.width
    }

    pub fn y2(&self) -> f64 {
        self.position.y + self.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x1(), self.y1(), self.x2(), self.y2())
    }

    pub fn has_fill_color(&self) -> bool {
        self.style.has_fill_color()
    }

    pub fn has_texture(&self) -> bool {
        self.style.has_texture()
    }
}

/// Largest wedge count a circle is drawn with. Larger fans are not drawn.
pub const MAX_CIRCLE_WEDGES: u32 = 1 << 16;

/// A disc approximated by a triangle fan of `vertex_count` wedges.
///
/// `relative_origin` moves the fan's hub: the hub sits at
/// `center + (radius, radius) - relative_origin`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point,
    #[serde(default)]
    pub relative_origin: Vec2,
    pub radius: f64,
    pub vertex_count: u32,
    #[serde(default)]
    pub style: ShapeStyle,
}

impl Circle {
    pub fn new(x: f64, y: f64, radius: f64, vertex_count: u32) -> Self {
        Self {
            center: Point::new(x, y),
            relative_origin: Vec2::ZERO,
            radius,
            vertex_count,
            style: ShapeStyle::None,
        }
    }

    pub fn with_relative_origin(mut self, dx: f64, dy: f64) -> Self {
        self.relative_origin = Vec2::new(dx, dy);
        self
    }

    pub fn filled(mut self, color: Color) -> Self {
        self.style = ShapeStyle::Filled { color };
        self
    }

    pub fn textured(mut self, texture: TextureInfo) -> Self {
        self.style = ShapeStyle::Textured { texture };
        self
    }

    /// The fan's hub in surface pixels.
    pub fn hub(&self) -> Point {
        self.center + Vec2::new(self.radius, self.radius) - self.relative_origin
    }

    /// Number of vertices the fan emits: three per wedge, unindexed.
    /// `None` above [`MAX_CIRCLE_WEDGES`] wedges.
    pub fn fan_vertex_count(&self) -> Option<i32> {
        if self.vertex_count > MAX_CIRCLE_WEDGES {
            return None;
        }
        i32::try_from(self.vertex_count).ok()?.checked_mul(3)
    }

    pub fn has_fill_color(&self) -> bool {
        self.style.has_fill_color()
    }

    pub fn has_texture(&self) -> bool {
        self.style.has_texture()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────
