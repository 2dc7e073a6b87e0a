//! In-memory graphics backend that records every call.
//!
//! Used by the test suites and by headless hosts that only need to know
//! what would have been drawn. [`RecordingContext::draws`] replays the call
//! log and resolves each draw call against the state bound at the time.

use crate::gl::{GraphicsContext, ShaderKind, Surface, TextureParams};
use glc_core::{Color, ImageId, TextureInfo};
use std::cell::Cell;
use std::collections::{HashMap, HashSet};

/// Attribute slot handed out for `a_position`.
pub const POSITION_SLOT: u32 = 0;
/// Attribute slot handed out for `a_texCoord`.
pub const TEX_COORD_SLOT: u32 = 1;

/// Uniform handle: the program it belongs to plus its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedUniform {
    pub program: u32,
    pub name: String,
}

/// One state-changing call on the context. Queries are not recorded.
#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    CompileShader { id: u32, kind: ShaderKind },
    LinkProgram { id: u32, vertex: u32, fragment: u32 },
    CreateBuffer(u32),
    Viewport { width: u32, height: u32 },
    Clear(Color),
    UseProgram(u32),
    UploadVertices { buffer: u32, data: Vec<f32> },
    BindAttribute { location: u32, buffer: u32, components: i32 },
    DisableAttribute(u32),
    Uniform2f { uniform: RecordedUniform, x: f32, y: f32 },
    Uniform4f { uniform: RecordedUniform, color: Color },
    CreateTexture(u32),
    BindTexture { texture: u32, params: TextureParams },
    UploadImage(TextureInfo),
    DeleteTexture(u32),
    DrawTriangles { count: i32 },
}

/// A draw call resolved against the state bound when it was issued.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    pub program: u32,
    /// The program samples a texture (it has an `a_texCoord` attribute).
    pub textured: bool,
    pub vertices: i32,
    /// `u_color` of the program, for untextured draws.
    pub color: Option<Color>,
    /// Bound texture, for textured draws.
    pub texture: Option<u32>,
    /// Contents of the buffer feeding `a_position`.
    pub positions: Vec<f32>,
    /// Contents of the buffer feeding `a_texCoord`, for textured draws.
    pub tex_coords: Vec<f32>,
    /// Attribute slots with an enabled array, ascending.
    pub enabled_attributes: Vec<u32>,
}

/// Recording backend. Failure knobs are public so tests can inject them.
#[derive(Debug, Clone, Default)]
pub struct RecordingContext {
    pub calls: Vec<GlCall>,
    /// Fail compilation of any shader whose source contains this text.
    pub reject_shaders_containing: Option<String>,
    /// Fail every program link.
    pub fail_link: bool,
    /// Images the host can't upload.
    pub missing_images: HashSet<ImageId>,
    /// Refuse every texture allocation.
    pub refuse_textures: bool,
    next_id: u32,
    textured_programs: HashSet<u32>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    /// Replay the log into resolved draw calls, in issue order.
    pub fn draws(&self) -> Vec<RecordedDraw> {
        let mut program = 0;
        let mut texture = None;
        let mut colors: HashMap<u32, Color> = HashMap::new();
        let mut contents: HashMap<u32, Vec<f32>> = HashMap::new();
        let mut attributes: HashMap<u32, u32> = HashMap::new();
        let mut out = Vec::new();

        let attribute_data = |attributes: &HashMap<u32, u32>,
                              contents: &HashMap<u32, Vec<f32>>,
                              slot: u32| {
            attributes
                .get(&slot)
                .and_then(|buffer| contents.get(buffer))
                .cloned()
                .unwrap_or_default()
        };

        for call in &self.calls {
            match call {
                GlCall::UseProgram(id) => program = *id,
                GlCall::BindTexture { texture: id, .. } => texture = Some(*id),
                GlCall::DeleteTexture(id) if texture == Some(*id) => texture = None,
                GlCall::Uniform4f { uniform, color } if uniform.name == "u_color" => {
                    colors.insert(uniform.program, *color);
                }
                GlCall::UploadVertices { buffer, data } => {
                    contents.insert(*buffer, data.clone());
                }
                GlCall::BindAttribute {
                    location, buffer, ..
                } => {
                    attributes.insert(*location, *buffer);
                }
                GlCall::DisableAttribute(location) => {
                    attributes.remove(location);
                }
                GlCall::DrawTriangles { count } => {
                    let textured = self.textured_programs.contains(&program);
                    let mut enabled_attributes: Vec<u32> = attributes.keys().copied().collect();
                    enabled_attributes.sort_unstable();
                    out.push(RecordedDraw {
                        program,
                        textured,
                        vertices: *count,
                        color: if textured {
                            None
                        } else {
                            colors.get(&program).copied()
                        },
                        texture: if textured { texture } else { None },
                        positions: attribute_data(&attributes, &contents, POSITION_SLOT),
                        tex_coords: if textured {
                            attribute_data(&attributes, &contents, TEX_COORD_SLOT)
                        } else {
                            Vec::new()
                        },
                        enabled_attributes,
                    });
                }
                _ => {}
            }
        }
        out
    }

    /// Number of vertex buffer uploads.
    pub fn vertex_uploads(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, GlCall::UploadVertices { .. }))
            .count()
    }

    /// Textures created and not yet deleted.
    pub fn live_textures(&self) -> usize {
        let created = self
            .calls
            .iter()
            .filter(|c| matches!(c, GlCall::CreateTexture(_)))
            .count();
        let deleted = self
            .calls
            .iter()
            .filter(|c| matches!(c, GlCall::DeleteTexture(_)))
            .count();
        created - deleted
    }
}

impl GraphicsContext for RecordingContext {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type Texture = u32;
    type UniformLocation = RecordedUniform;

    fn compile_shader(&mut self, kind: ShaderKind, source: &str) -> Result<u32, String> {
        if let Some(needle) = &self.reject_shaders_containing
            && source.contains(needle.as_str())
        {
            return Err(format!("ERROR: 0:1: '{needle}' : rejected"));
        }
        let id = self.next();
        self.calls.push(GlCall::CompileShader { id, kind });
        Ok(id)
    }

    fn link_program(&mut self, vertex: &u32, fragment: &u32) -> Result<u32, String> {
        if self.fail_link {
            return Err("ERROR: link failed".to_string());
        }
        let id = self.next();
        self.calls.push(GlCall::LinkProgram {
            id,
            vertex: *vertex,
            fragment: *fragment,
        });
        Ok(id)
    }

    fn attrib_location(&mut self, program: &u32, name: &str) -> Option<u32> {
        match name {
            "a_position" => Some(POSITION_SLOT),
            "a_texCoord" => {
                self.textured_programs.insert(*program);
                Some(TEX_COORD_SLOT)
            }
            _ => None,
        }
    }

    fn uniform_location(&mut self, program: &u32, name: &str) -> Option<RecordedUniform> {
        matches!(name, "u_resolution" | "u_color" | "u_image").then(|| RecordedUniform {
            program: *program,
            name: name.to_string(),
        })
    }

    fn create_buffer(&mut self) -> Option<u32> {
        let id = self.next();
        self.calls.push(GlCall::CreateBuffer(id));
        Some(id)
    }

    fn viewport(&mut self, width: u32, height: u32) {
        self.calls.push(GlCall::Viewport { width, height });
    }

    fn clear(&mut self, color: Color) {
        self.calls.push(GlCall::Clear(color));
    }

    fn use_program(&mut self, program: &u32) {
        self.calls.push(GlCall::UseProgram(*program));
    }

    fn upload_vertices(&mut self, buffer: &u32, data: &[f32]) {
        self.calls.push(GlCall::UploadVertices {
            buffer: *buffer,
            data: data.to_vec(),
        });
    }

    fn bind_attribute(&mut self, location: u32, buffer: &u32, components: i32) {
        self.calls.push(GlCall::BindAttribute {
            location,
            buffer: *buffer,
            components,
        });
    }

    fn disable_attribute(&mut self, location: u32) {
        self.calls.push(GlCall::DisableAttribute(location));
    }

    fn uniform2f(&mut self, location: &RecordedUniform, x: f32, y: f32) {
        self.calls.push(GlCall::Uniform2f {
            uniform: location.clone(),
            x,
            y,
        });
    }

    fn uniform4f(&mut self, location: &RecordedUniform, color: Color) {
        self.calls.push(GlCall::Uniform4f {
            uniform: location.clone(),
            color,
        });
    }

    fn create_texture(&mut self) -> Option<u32> {
        if self.refuse_textures {
            return None;
        }
        let id = self.next();
        self.calls.push(GlCall::CreateTexture(id));
        Some(id)
    }

    fn bind_texture(&mut self, texture: &u32, params: TextureParams) {
        self.calls.push(GlCall::BindTexture {
            texture: *texture,
            params,
        });
    }

    fn upload_image(&mut self, info: &TextureInfo) -> Result<(), String> {
        if self.missing_images.contains(&info.image) {
            return Err(format!("no image registered for {:?}", info.image));
        }
        self.calls.push(GlCall::UploadImage(*info));
        Ok(())
    }

    fn delete_texture(&mut self, texture: u32) {
        self.calls.push(GlCall::DeleteTexture(texture));
    }

    fn draw_triangles(&mut self, count: i32) {
        self.calls.push(GlCall::DrawTriangles { count });
    }
}

// ─── Surface ─────────────────────────────────────────────────────────────

/// A fake drawable. `context: None` models a host without GL support.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    /// Template cloned into every acquired context.
    pub context: Option<RecordingContext>,
    size: Cell<(u32, u32)>,
    /// Size the surface is displayed at; `fit_to_display` adopts it.
    pub display_size: (u32, u32),
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            context: Some(RecordingContext::new()),
            size: Cell::new((width, height)),
            display_size: (width, height),
        }
    }

    /// A surface whose context acquisition always fails.
    pub fn without_context(width: u32, height: u32) -> Self {
        Self {
            context: None,
            ..Self::new(width, height)
        }
    }
}

impl Surface for RecordingSurface {
    type Context = RecordingContext;

    fn acquire_context(&self) -> Option<RecordingContext> {
        self.context.clone()
    }

    fn size(&self) -> (u32, u32) {
        self.size.get()
    }

    fn fit_to_display(&self) -> bool {
        let changed = self.size.get() != self.display_size;
        self.size.set(self.display_size);
        changed
    }
}
