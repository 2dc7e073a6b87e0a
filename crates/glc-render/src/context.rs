//! Render context: bootstrap plus the immediate draw paths.
//!
//! A [`RenderContext`] exists only if bootstrap fully succeeded, so every
//! draw path here can assume both programs and both buffers are live. Each
//! path selects its program and rebinds the buffers it feeds. The textured
//! path disables its texture-coordinate array once drawn, so flat draws only
//! ever run with `a_position` enabled.

use crate::gl::{GraphicsContext, ShaderKind, Surface};
use crate::shaders::{ShaderSource, compile_shader, link_program};
use crate::textures::TextureStore;
use glc_core::geometry::{self, COMPONENTS, QUAD_VERTICES};
use glc_core::{Circle, MAX_CIRCLE_WEDGES, Point, Rect, Rectangle, RenderConfig, TextureInfo};

/// The texture-sampling program and its resolved locations.
struct TextureProgram<C: GraphicsContext> {
    program: C::Program,
    position: Option<u32>,
    tex_coord: Option<u32>,
    resolution: Option<C::UniformLocation>,
}

/// The flat-color program and its resolved locations.
struct FillProgram<C: GraphicsContext> {
    program: C::Program,
    position: Option<u32>,
    resolution: Option<C::UniformLocation>,
    color: Option<C::UniformLocation>,
}

/// Everything a successful bootstrap produced.
pub struct RenderContext<C: GraphicsContext> {
    gl: C,
    texture: TextureProgram<C>,
    fill: FillProgram<C>,
    position_buffer: C::Buffer,
    tex_coord_buffer: C::Buffer,
    textures: TextureStore<C::Texture>,
    config: RenderConfig,
    size: (u32, u32),
}

impl<C: GraphicsContext> RenderContext<C> {
    /// Acquire a context from `surface` and build both programs.
    ///
    /// Returns `None` on any failure: no surface, no context, a shader that
    /// fails to compile, a program that fails to link, or a buffer the
    /// context refuses to allocate. Compile and link diagnostics are logged.
    pub fn bootstrap<S>(
        surface: Option<&S>,
        sources: &dyn ShaderSource,
        config: RenderConfig,
    ) -> Option<Self>
    where
        S: Surface<Context = C>,
    {
        let Some(surface) = surface else {
            log::error!("no drawing surface supplied");
            return None;
        };
        let Some(mut gl) = surface.acquire_context() else {
            log::error!("surface did not provide a rendering context");
            return None;
        };

        let vertex = compile_shader(&mut gl, sources, ShaderKind::Vertex, &config.vertex_shader)?;
        let texture_fragment = compile_shader(
            &mut gl,
            sources,
            ShaderKind::Fragment,
            &config.texture_fragment_shader,
        )?;
        let fill_fragment = compile_shader(
            &mut gl,
            sources,
            ShaderKind::Fragment,
            &config.fill_fragment_shader,
        )?;

        let texture_program = link_program(&mut gl, &vertex, &texture_fragment, "texture")?;
        let fill_program = link_program(&mut gl, &vertex, &fill_fragment, "fill")?;

        let texture = TextureProgram {
            position: gl.attrib_location(&texture_program, "a_position"),
            tex_coord: gl.attrib_location(&texture_program, "a_texCoord"),
            resolution: gl.uniform_location(&texture_program, "u_resolution"),
            program: texture_program,
        };
        let fill = FillProgram {
            position: gl.attrib_location(&fill_program, "a_position"),
            resolution: gl.uniform_location(&fill_program, "u_resolution"),
            color: gl.uniform_location(&fill_program, "u_color"),
            program: fill_program,
        };

        let (Some(position_buffer), Some(tex_coord_buffer)) = (gl.create_buffer(), gl.create_buffer())
        else {
            log::error!("context refused to allocate vertex buffers");
            return None;
        };

        if config.fit_to_display && surface.fit_to_display() {
            log::debug!("surface resized to its display size");
        }

        let mut ctx = Self {
            gl,
            texture,
            fill,
            position_buffer,
            tex_coord_buffer,
            textures: TextureStore::new(config.texture_policy),
            config,
            size: (0, 0),
        };
        let (width, height) = surface.size();
        ctx.resize(width, height);
        ctx.clear();

        log::debug!("render context ready at {width}x{height}");
        Some(ctx)
    }

    /// Set the viewport to `width`×`height` and write the resolution uniform
    /// into both programs.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.gl.viewport(width, height);

        let (w, h) = (width as f32, height as f32);
        self.gl.use_program(&self.texture.program);
        if let Some(loc) = &self.texture.resolution {
            self.gl.uniform2f(loc, w, h);
        }
        self.gl.use_program(&self.fill.program);
        if let Some(loc) = &self.fill.resolution {
            self.gl.uniform2f(loc, w, h);
        }
    }

    /// Clear the whole surface to the configured clear color.
    pub fn clear(&mut self) {
        self.gl.clear(self.config.clear_color);
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn graphics(&self) -> &C {
        &self.gl
    }

    /// Textures kept alive between draws (cache entries or retained leaks).
    pub fn resident_textures(&self) -> usize {
        self.textures.len()
    }

    /// Delete every texture kept alive between draws.
    pub fn release_textures(&mut self) {
        self.textures.release_all(&mut self.gl);
    }

    // ─── Immediate draws ─────────────────────────────────────────────────

    fn feed(gl: &mut C, location: Option<u32>, buffer: &C::Buffer, data: &[f32]) {
        gl.upload_vertices(buffer, data);
        if let Some(location) = location {
            gl.bind_attribute(location, buffer, COMPONENTS);
        }
    }

    // Each draw path returns the vertex count of the draw call it issued, or
    // `None` if it issued none.

    /// Draw `texture` at its declared size with its top-left at `position`.
    pub fn draw_texture(&mut self, texture: &TextureInfo, position: Point) -> Option<i32> {
        let bounds = Rect::new(
            position.x,
            position.y,
            position.x + texture.width as f64,
            position.y + texture.height as f64,
        );
        self.draw_textured(
            texture,
            &geometry::rect_vertices(bounds),
            &geometry::unit_quad(),
            QUAD_VERTICES,
        )
    }

    /// Draw `rect` in its fill color. No-op for a rectangle without one.
    pub fn draw_filled(&mut self, rect: &Rectangle) -> Option<i32> {
        let color = rect.style.fill_color()?;
        let vertices = geometry::rect_vertices(rect.bounds());
        self.draw_flat(color, &vertices, QUAD_VERTICES)
    }

    /// Draw `circle`'s fan with `texture` clipped to the disc.
    pub fn draw_tex_circle(&mut self, circle: &Circle, texture: &TextureInfo) -> Option<i32> {
        let count = Self::fan_count(circle)?;
        self.draw_textured(
            texture,
            &geometry::circle_fan(circle),
            &geometry::circle_tex_fan(circle.vertex_count),
            count,
        )
    }

    /// Draw `circle`'s fan in the untextured circle color.
    pub fn display_circle(&mut self, circle: &Circle) -> Option<i32> {
        let count = Self::fan_count(circle)?;
        let color = self.config.circle_color(circle.style.fill_color());
        self.draw_flat(color, &geometry::circle_fan(circle), count)
    }

    fn fan_count(circle: &Circle) -> Option<i32> {
        let count = circle.fan_vertex_count();
        if count.is_none() {
            log::warn!(
                "circle with {} wedges exceeds the limit of {MAX_CIRCLE_WEDGES}; not drawn",
                circle.vertex_count
            );
        }
        count
    }

    fn draw_textured(
        &mut self,
        texture: &TextureInfo,
        positions: &[f32],
        tex_coords: &[f32],
        count: i32,
    ) -> Option<i32> {
        let binding = self.textures.bind(&mut self.gl, texture)?;
        self.gl.use_program(&self.texture.program);

        Self::feed(&mut self.gl, self.texture.position, &self.position_buffer, positions);
        Self::feed(&mut self.gl, self.texture.tex_coord, &self.tex_coord_buffer, tex_coords);
        self.gl.draw_triangles(count);
        if let Some(location) = self.texture.tex_coord {
            self.gl.disable_attribute(location);
        }

        self.textures.finish(&mut self.gl, binding);
        Some(count)
    }

    fn draw_flat(&mut self, color: glc_core::Color, positions: &[f32], count: i32) -> Option<i32> {
        self.gl.use_program(&self.fill.program);
        if let Some(loc) = &self.fill.color {
            self.gl.uniform4f(loc, color);
        }
        Self::feed(&mut self.gl, self.fill.position, &self.position_buffer, positions);
        self.gl.draw_triangles(count);
        Some(count)
    }
}

impl<C: GraphicsContext> Drop for RenderContext<C> {
    fn drop(&mut self) {
        self.textures.release_all(&mut self.gl);
    }
}
