//! Integration tests: draw list accumulation and frame flush (glc-render).
//!
//! Drives a `Canvas` over the recording backend and checks what reached
//! the graphics context, draw call by draw call.

use glc_core::*;
use glc_render::recording::{POSITION_SLOT, RecordingContext, RecordingSurface, TEX_COORD_SLOT};
use glc_render::{BuiltinShaders, Canvas, FrameStats};
use pretty_assertions::assert_eq;

const RED: Color = Color::rgba(1.0, 0.0, 0.0, 1.0);
const BLUE: Color = Color::rgba(0.0, 0.0, 1.0, 1.0);

fn make_canvas(config: RenderConfig) -> Canvas<RecordingContext> {
    let _ = env_logger::builder().is_test(true).try_init();
    let surface = RecordingSurface::new(800, 600);
    let canvas = Canvas::new(Some(&surface), &BuiltinShaders, config);
    assert!(canvas.success());
    canvas
}

fn gl(canvas: &Canvas<RecordingContext>) -> &RecordingContext {
    canvas.graphics().expect("bootstrapped canvas")
}

fn sprite(id: u32) -> TextureInfo {
    TextureInfo::new(ImageId(id), 32, 16)
}

// ─── Flush semantics ────────────────────────────────────────────────────

#[test]
fn empty_flush_touches_nothing() {
    let mut canvas = make_canvas(RenderConfig::default());
    let before = gl(&canvas).calls.len();

    let stats = canvas.display();

    assert_eq!(stats, FrameStats::default());
    assert_eq!(gl(&canvas).calls.len(), before);
    assert_eq!(gl(&canvas).vertex_uploads(), 0);
}

#[test]
fn flush_drains_both_sequences() {
    let mut canvas = make_canvas(RenderConfig::default());
    canvas.draw(Rectangle::new(0.0, 0.0, 10.0, 10.0).filled(RED));
    canvas.draw_circle(Circle::new(5.0, 5.0, 3.0, 8));
    assert_eq!(canvas.pending().len(), 2);

    canvas.display();

    assert_eq!(canvas.pending().rectangles.len(), 0);
    assert_eq!(canvas.pending().circles.len(), 0);

    // Nothing carries over into the next frame.
    let draws_after_first = gl(&canvas).draws().len();
    canvas.display();
    assert_eq!(gl(&canvas).draws().len(), draws_after_first);
}

#[test]
fn rectangles_draw_in_submission_order() {
    let mut canvas = make_canvas(RenderConfig::default());
    canvas.draw(Rectangle::new(0.0, 0.0, 10.0, 10.0).filled(RED));
    canvas.draw(Rectangle::new(20.0, 0.0, 10.0, 10.0).filled(BLUE));
    canvas.display();

    let colors: Vec<_> = gl(&canvas).draws().iter().map(|d| d.color).collect();
    assert_eq!(colors, vec![Some(RED), Some(BLUE)]);
}

#[test]
fn unstyled_rectangle_is_skipped() {
    let mut canvas = make_canvas(RenderConfig::default());
    canvas.draw(Rectangle::new(0.0, 0.0, 10.0, 10.0));
    let stats = canvas.display();

    assert!(gl(&canvas).draws().is_empty());
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.draw_calls, 0);
}

#[test]
fn every_circle_draws_once_with_three_vertices_per_wedge() {
    let mut canvas = make_canvas(RenderConfig::default());
    canvas.draw_circle(Circle::new(0.0, 0.0, 4.0, 5));
    canvas.draw_circle(Circle::new(0.0, 0.0, 4.0, 12).filled(RED));
    canvas.draw_circle(Circle::new(0.0, 0.0, 4.0, 7).textured(sprite(1)));
    let stats = canvas.display();

    let counts: Vec<_> = gl(&canvas).draws().iter().map(|d| d.vertices).collect();
    assert_eq!(counts, vec![15, 36, 21]);
    assert_eq!(stats.circles, 3);
    assert_eq!(stats.vertices, 72);
}

#[test]
fn rectangles_render_before_circles_whatever_the_interleaving() {
    let mut canvas = make_canvas(RenderConfig::default());
    canvas.draw_circle(Circle::new(0.0, 0.0, 4.0, 3));
    canvas.draw(Rectangle::new(0.0, 0.0, 10.0, 10.0).filled(BLUE));
    canvas.display();

    let counts: Vec<_> = gl(&canvas).draws().iter().map(|d| d.vertices).collect();
    assert_eq!(counts, vec![6, 9]);
}

#[test]
fn textured_rect_then_plain_circle() {
    let mut canvas = make_canvas(RenderConfig::default());
    canvas.draw(Rectangle::new(10.0, 10.0, 50.0, 50.0).textured(sprite(1)));
    canvas.draw_circle(Circle::new(100.0, 100.0, 20.0, 16));
    let stats = canvas.display();

    let draws = gl(&canvas).draws();
    assert_eq!(draws.len(), 2);
    assert!(draws[0].textured);
    assert_eq!(draws[0].vertices, 6);
    assert!(!draws[1].textured);
    assert_eq!(draws[1].vertices, 48);
    assert_eq!(draws[1].color, Some(Color::GREEN));
    assert_eq!(stats.draw_calls, 2);

    // The circle's 48 vertices must not read the 6-vertex texcoord buffer.
    assert_eq!(draws[0].enabled_attributes, vec![POSITION_SLOT, TEX_COORD_SLOT]);
    assert_eq!(draws[1].enabled_attributes, vec![POSITION_SLOT]);
}

#[test]
fn flat_draws_never_see_tex_coords_across_frames() {
    let mut canvas = make_canvas(RenderConfig::default());
    for _ in 0..2 {
        canvas.draw(Rectangle::new(0.0, 0.0, 8.0, 8.0).filled(RED));
        canvas.draw(Rectangle::new(0.0, 0.0, 8.0, 8.0).textured(sprite(1)));
        canvas.draw_circle(Circle::new(0.0, 0.0, 4.0, 12).textured(sprite(2)));
        canvas.draw_circle(Circle::new(0.0, 0.0, 4.0, 12));
        canvas.display();
    }

    let draws = gl(&canvas).draws();
    assert_eq!(draws.len(), 8);
    for draw in draws.iter().filter(|d| !d.textured) {
        assert_eq!(draw.enabled_attributes, vec![POSITION_SLOT]);
    }
}

#[test]
fn oversized_circle_is_skipped() {
    let mut canvas = make_canvas(RenderConfig::default());
    canvas.draw_circle(Circle::new(0.0, 0.0, 4.0, MAX_CIRCLE_WEDGES + 1));
    canvas.draw_circle(Circle::new(0.0, 0.0, 4.0, 8));
    let stats = canvas.display();

    assert_eq!(stats.circles, 1);
    assert_eq!(stats.skipped, 1);
    assert_eq!(gl(&canvas).draws().len(), 1);
}

#[test]
fn refused_texture_allocation_is_skipped() {
    let mut surface = RecordingSurface::new(800, 600);
    if let Some(ctx) = surface.context.as_mut() {
        ctx.refuse_textures = true;
    }
    let mut canvas = Canvas::new(Some(&surface), &BuiltinShaders, RenderConfig::default());
    canvas.draw(Rectangle::new(0.0, 0.0, 8.0, 8.0).textured(sprite(1)));
    canvas.draw_circle(Circle::new(0.0, 0.0, 4.0, 8).textured(sprite(1)));
    let stats = canvas.display();

    assert_eq!(stats.skipped, 2);
    assert_eq!(stats.draw_calls, 0);
    assert!(gl(&canvas).draws().is_empty());
}

#[test]
fn textured_rect_spans_texture_size_not_rect_size() {
    let mut canvas = make_canvas(RenderConfig::default());
    canvas.draw(Rectangle::new(10.0, 10.0, 500.0, 500.0).textured(sprite(1)));
    canvas.display();

    let positions = &gl(&canvas).draws()[0].positions;
    assert_eq!(positions[2], 42.0);
    assert_eq!(positions[5], 26.0);
}

#[test]
fn textured_wins_over_previous_fill() {
    let mut canvas = make_canvas(RenderConfig::default());
    canvas.draw(
        Rectangle::new(0.0, 0.0, 10.0, 10.0)
            .filled(RED)
            .textured(sprite(4)),
    );
    canvas.display();

    let draws = gl(&canvas).draws();
    assert_eq!(draws.len(), 1);
    assert!(draws[0].textured);
}

#[test]
fn shape_color_circles_when_configured() {
    let mut canvas = make_canvas(RenderConfig {
        circle_fill: CircleFill::ShapeColor,
        ..RenderConfig::default()
    });
    canvas.draw_circle(Circle::new(0.0, 0.0, 4.0, 3).filled(BLUE));
    canvas.draw_circle(Circle::new(0.0, 0.0, 4.0, 3));
    canvas.display();

    let colors: Vec<_> = gl(&canvas).draws().iter().map(|d| d.color).collect();
    assert_eq!(colors, vec![Some(BLUE), Some(Color::GREEN)]);
}

#[test]
fn batch_submission_matches_individual_calls() {
    let mut batch = DrawList::new();
    batch.push_rect(Rectangle::new(0.0, 0.0, 1.0, 1.0).filled(RED));
    batch.push_circle(Circle::new(0.0, 0.0, 1.0, 4));

    let mut canvas = make_canvas(RenderConfig::default());
    canvas.draw(Rectangle::new(5.0, 5.0, 1.0, 1.0).filled(BLUE));
    canvas.draw_all(batch);

    assert_eq!(canvas.pending().rectangles.len(), 2);
    let stats = canvas.display();
    assert_eq!((stats.rectangles, stats.circles), (2, 1));
}

#[test]
fn clear_before_flush_only_on_non_empty_frames() {
    let mut canvas = make_canvas(RenderConfig {
        clear_before_flush: true,
        ..RenderConfig::default()
    });
    let clears = |c: &Canvas<RecordingContext>| {
        gl(c)
            .calls
            .iter()
            .filter(|call| matches!(call, glc_render::recording::GlCall::Clear(_)))
            .count()
    };
    assert_eq!(clears(&canvas), 1);

    canvas.display();
    assert_eq!(clears(&canvas), 1);

    canvas.draw(Rectangle::new(0.0, 0.0, 1.0, 1.0).filled(RED));
    canvas.display();
    assert_eq!(clears(&canvas), 2);
}

// ─── Immediate bypass ───────────────────────────────────────────────────

#[test]
fn draw_texture_bypasses_the_draw_list() {
    let mut canvas = make_canvas(RenderConfig::default());
    canvas.draw_texture(&sprite(2), Point::new(0.0, 0.0));

    assert!(canvas.pending().is_empty());
    assert_eq!(gl(&canvas).draws().len(), 1);
}

// ─── Texture lifetime ───────────────────────────────────────────────────

#[test]
fn default_policy_allocates_per_draw_and_frees() {
    let mut canvas = make_canvas(RenderConfig::default());
    for _ in 0..3 {
        canvas.draw(Rectangle::new(0.0, 0.0, 1.0, 1.0).textured(sprite(1)));
        canvas.display();
    }

    let draws = gl(&canvas).draws();
    let textures: Vec<_> = draws.iter().map(|d| d.texture).collect();
    assert!(textures.iter().all(Option::is_some));
    assert_ne!(textures[0], textures[1]);
    assert_eq!(gl(&canvas).live_textures(), 0);
}

#[test]
fn retain_policy_leaks_one_texture_per_draw() {
    let mut canvas = make_canvas(RenderConfig {
        texture_policy: TexturePolicy::Retain,
        ..RenderConfig::default()
    });
    for _ in 0..4 {
        canvas.draw_circle(Circle::new(0.0, 0.0, 2.0, 6).textured(sprite(1)));
        canvas.display();
    }
    assert_eq!(gl(&canvas).live_textures(), 4);
    assert_eq!(canvas.resident_textures(), 4);

    canvas.release_textures();
    assert_eq!(gl(&canvas).live_textures(), 0);
}

#[test]
fn cache_policy_reuses_texture_per_image() {
    let mut canvas = make_canvas(RenderConfig {
        texture_policy: TexturePolicy::Cache,
        ..RenderConfig::default()
    });
    for _ in 0..3 {
        canvas.draw(Rectangle::new(0.0, 0.0, 1.0, 1.0).textured(sprite(1)));
        canvas.draw(Rectangle::new(0.0, 0.0, 1.0, 1.0).textured(sprite(2)));
        canvas.display();
    }

    let draws = gl(&canvas).draws();
    assert_eq!(draws.len(), 6);
    assert_eq!(draws[0].texture, draws[2].texture);
    assert_ne!(draws[0].texture, draws[1].texture);
    assert_eq!(canvas.resident_textures(), 2);
}

// ─── Resize ─────────────────────────────────────────────────────────────

#[test]
fn resize_updates_viewport_and_both_resolutions() {
    use glc_render::recording::GlCall;

    let mut canvas = make_canvas(RenderConfig::default());
    let before = gl(&canvas).calls.len();
    canvas.resize(1024, 768);

    let calls = &gl(&canvas).calls[before..];
    assert_eq!(
        calls[0],
        GlCall::Viewport {
            width: 1024,
            height: 768
        }
    );
    let resolutions = calls
        .iter()
        .filter(|c| matches!(c, GlCall::Uniform2f { x, y, .. } if *x == 1024.0 && *y == 768.0))
        .count();
    assert_eq!(resolutions, 2);
}
