//! The application-facing canvas: draw list plus frame flush.
//!
//! Immediate-mode: shapes queued with [`Canvas::draw`] and
//! [`Canvas::draw_circle`] are drawn by the next [`Canvas::display`] and then
//! forgotten. A canvas whose bootstrap failed stays inert: every call is a
//! silent no-op.

use crate::context::RenderContext;
use crate::gl::{GraphicsContext, Surface};
use crate::shaders::ShaderSource;
use glc_core::{Circle, DrawList, Point, Rectangle, RenderConfig, ShapeStyle, TextureInfo};

/// What one flush drew.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Rectangles that produced a draw call.
    pub rectangles: usize,
    /// Circles that produced a draw call.
    pub circles: usize,
    /// Shapes that issued no draw call: unstyled rectangles, oversized circle
    /// fans, or failed texture allocations.
    pub skipped: usize,
    pub draw_calls: usize,
    pub vertices: usize,
}

impl FrameStats {
    /// Count one shape's outcome; `true` if it issued a draw call.
    fn record(&mut self, drawn: Option<i32>) -> bool {
        match drawn {
            Some(vertices) => {
                self.draw_calls += 1;
                self.vertices += vertices as usize;
                true
            }
            None => {
                self.skipped += 1;
                false
            }
        }
    }
}

pub struct Canvas<C: GraphicsContext> {
    ctx: Option<RenderContext<C>>,
    draw_list: DrawList,
}

impl<C: GraphicsContext> Canvas<C> {
    /// Bootstrap a canvas on `surface`. Check [`Canvas::success`] afterwards;
    /// a failed canvas accepts every call and does nothing.
    pub fn new<S>(surface: Option<&S>, sources: &dyn ShaderSource, config: RenderConfig) -> Self
    where
        S: Surface<Context = C>,
    {
        let ctx = RenderContext::bootstrap(surface, sources, config);
        if ctx.is_none() {
            log::warn!("canvas initialization failed; all drawing is disabled");
        }
        Self {
            ctx,
            draw_list: DrawList::new(),
        }
    }

    /// Whether bootstrap succeeded.
    pub fn success(&self) -> bool {
        self.ctx.is_some()
    }

    /// Queue a rectangle for the next flush.
    pub fn draw(&mut self, rect: Rectangle) {
        if self.ctx.is_some() {
            self.draw_list.push_rect(rect);
        }
    }

    /// Queue a circle for the next flush.
    pub fn draw_circle(&mut self, circle: Circle) {
        if self.ctx.is_some() {
            self.draw_list.push_circle(circle);
        }
    }

    /// Queue a whole batch of shapes, keeping each kind's order.
    pub fn draw_all(&mut self, shapes: DrawList) {
        if self.ctx.is_some() {
            self.draw_list.extend(shapes);
        }
    }

    /// Shapes waiting for the next flush.
    pub fn pending(&self) -> &DrawList {
        &self.draw_list
    }

    /// Draw a texture right now, bypassing the draw list.
    pub fn draw_texture(&mut self, texture: &TextureInfo, position: Point) {
        if let Some(ctx) = &mut self.ctx {
            ctx.draw_texture(texture, position);
        }
    }

    /// Flush the draw list: every rectangle in submission order, then every
    /// circle in submission order. Both sequences are empty afterwards.
    ///
    /// Rectangles go to the texture path if textured, the fill path if
    /// filled, and are skipped otherwise. Circles draw textured ones through
    /// the texture path and everything else as a flat fan; a fan over
    /// [`glc_core::MAX_CIRCLE_WEDGES`] wedges is skipped.
    pub fn display(&mut self) -> FrameStats {
        let mut stats = FrameStats::default();
        let Some(ctx) = &mut self.ctx else {
            return stats;
        };
        let frame = self.draw_list.take();
        if frame.is_empty() {
            return stats;
        }

        if ctx.config().clear_before_flush {
            ctx.clear();
        }

        for rect in &frame.rectangles {
            let drawn = match &rect.style {
                ShapeStyle::Textured { texture } => ctx.draw_texture(texture, rect.position),
                ShapeStyle::Filled { .. } => ctx.draw_filled(rect),
                ShapeStyle::None => {
                    log::trace!("skipping unstyled rectangle at {:?}", rect.position);
                    None
                }
            };
            if stats.record(drawn) {
                stats.rectangles += 1;
            }
        }

        for circle in &frame.circles {
            let drawn = match &circle.style {
                ShapeStyle::Textured { texture } => ctx.draw_tex_circle(circle, texture),
                ShapeStyle::Filled { .. } | ShapeStyle::None => ctx.display_circle(circle),
            };
            if stats.record(drawn) {
                stats.circles += 1;
            }
        }

        log::debug!(
            "frame: {} rects, {} circles, {} skipped, {} draw calls, {} vertices",
            stats.rectangles,
            stats.circles,
            stats.skipped,
            stats.draw_calls,
            stats.vertices
        );
        stats
    }

    /// Adopt a new surface size: viewport plus both programs' resolution.
    pub fn resize(&mut self, width: u32, height: u32) {
        if let Some(ctx) = &mut self.ctx {
            ctx.resize(width, height);
        }
    }

    /// Delete every texture kept alive between draws.
    pub fn release_textures(&mut self) {
        if let Some(ctx) = &mut self.ctx {
            ctx.release_textures();
        }
    }

    /// Textures currently kept alive between draws.
    pub fn resident_textures(&self) -> usize {
        self.ctx.as_ref().map_or(0, RenderContext::resident_textures)
    }

    /// The underlying graphics context, if bootstrap succeeded.
    pub fn graphics(&self) -> Option<&C> {
        self.ctx.as_ref().map(RenderContext::graphics)
    }
}
