//! Integration tests: canvas bootstrap and the inert failed state (glc-render).

use glc_core::*;
use glc_render::recording::{GlCall, RecordingContext, RecordingSurface};
use glc_render::{BuiltinShaders, Canvas, FrameStats};
use pretty_assertions::assert_eq;
use std::collections::HashMap;

fn exercise(canvas: &mut Canvas<RecordingContext>) -> FrameStats {
    canvas.draw(Rectangle::new(0.0, 0.0, 4.0, 4.0).filled(Color::GREEN));
    canvas.draw_circle(Circle::new(0.0, 0.0, 4.0, 8));
    canvas.draw_texture(
        &TextureInfo::new(ImageId(1), 4, 4),
        Point::new(0.0, 0.0),
    );
    canvas.resize(10, 10);
    canvas.release_textures();
    canvas.display()
}

fn assert_inert(mut canvas: Canvas<RecordingContext>) {
    assert!(!canvas.success());
    assert!(canvas.graphics().is_none());

    let stats = exercise(&mut canvas);

    assert_eq!(stats, FrameStats::default());
    assert!(canvas.pending().is_empty());
    assert_eq!(canvas.resident_textures(), 0);
}

#[test]
fn missing_surface_fails() {
    let canvas: Canvas<RecordingContext> =
        Canvas::new(None::<&RecordingSurface>, &BuiltinShaders, RenderConfig::default());
    assert_inert(canvas);
}

#[test]
fn surface_without_context_fails() {
    let surface = RecordingSurface::without_context(800, 600);
    let canvas = Canvas::new(Some(&surface), &BuiltinShaders, RenderConfig::default());
    assert_inert(canvas);
}

#[test]
fn shader_compile_failure_fails() {
    let mut surface = RecordingSurface::new(800, 600);
    if let Some(ctx) = surface.context.as_mut() {
        ctx.reject_shaders_containing = Some("sampler2D".into());
    }
    let canvas = Canvas::new(Some(&surface), &BuiltinShaders, RenderConfig::default());
    assert_inert(canvas);
}

#[test]
fn link_failure_fails() {
    let mut surface = RecordingSurface::new(800, 600);
    if let Some(ctx) = surface.context.as_mut() {
        ctx.fail_link = true;
    }
    let canvas = Canvas::new(Some(&surface), &BuiltinShaders, RenderConfig::default());
    assert_inert(canvas);
}

#[test]
fn missing_shader_key_fails() {
    let surface = RecordingSurface::new(800, 600);
    let sources: HashMap<String, String> = HashMap::from([(
        VERTEX_SHADER_KEY.to_string(),
        glc_render::shaders::BUILTIN_VERTEX.to_string(),
    )]);
    let canvas = Canvas::new(Some(&surface), &sources, RenderConfig::default());
    assert_inert(canvas);
}

#[test]
fn configured_keys_select_shader_sources() {
    let surface = RecordingSurface::new(800, 600);
    let sources: HashMap<String, String> = HashMap::from([
        ("vs".to_string(), glc_render::shaders::BUILTIN_VERTEX.to_string()),
        ("tex".to_string(), glc_render::shaders::BUILTIN_TEXTURE_FRAGMENT.to_string()),
        ("fill".to_string(), glc_render::shaders::BUILTIN_FILL_FRAGMENT.to_string()),
    ]);
    let config = RenderConfig {
        vertex_shader: "vs".into(),
        texture_fragment_shader: "tex".into(),
        fill_fragment_shader: "fill".into(),
        ..RenderConfig::default()
    };
    let canvas = Canvas::new(Some(&surface), &sources, config);
    assert!(canvas.success());
}

#[test]
fn successful_bootstrap_builds_two_programs_sharing_one_vertex_shader() {
    let surface = RecordingSurface::new(320, 240);
    let canvas = Canvas::new(Some(&surface), &BuiltinShaders, RenderConfig::default());
    let calls = &canvas.graphics().unwrap().calls;

    let compiled = calls
        .iter()
        .filter(|c| matches!(c, GlCall::CompileShader { .. }))
        .count();
    assert_eq!(compiled, 3);

    let links: Vec<_> = calls
        .iter()
        .filter_map(|c| match c {
            GlCall::LinkProgram { vertex, fragment, .. } => Some((*vertex, *fragment)),
            _ => None,
        })
        .collect();
    assert_eq!(links.len(), 2);
    assert_eq!(links[0].0, links[1].0);
    assert_ne!(links[0].1, links[1].1);

    let buffers = calls
        .iter()
        .filter(|c| matches!(c, GlCall::CreateBuffer(_)))
        .count();
    assert_eq!(buffers, 2);
    assert!(calls.contains(&GlCall::Viewport {
        width: 320,
        height: 240
    }));
    assert!(calls.contains(&GlCall::Clear(Color::TRANSPARENT)));
}
