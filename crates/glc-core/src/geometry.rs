//! Vertex generation for the immediate renderer.
//!
//! Every function returns a flat `[x0, y0, x1, y1, ...]` list of 2-component
//! vertices ready for a float array buffer. Triangles are unindexed.

use crate::model::{Circle, MAX_CIRCLE_WEDGES};
use kurbo::Rect;
use smallvec::{SmallVec, smallvec};
use std::f64::consts::TAU;

/// Flat 2D vertex data. A quad (6 vertices) fits inline.
pub type Vertices = SmallVec<[f32; 12]>;

/// Components per vertex for every attribute the renderer binds.
pub const COMPONENTS: i32 = 2;

/// Vertices emitted for one rectangle (two triangles).
pub const QUAD_VERTICES: i32 = 6;

/// Two triangles covering `rect`:
/// (x0,y0) (x1,y0) (x0,y1) and (x0,y1) (x1,y0) (x1,y1).
pub fn rect_vertices(rect: Rect) -> Vertices {
    let (x1, y1) = (rect.x0 as f32, rect.y0 as f32);
    let (x2, y2) = (rect.x1 as f32, rect.y1 as f32);
    smallvec![x1, y1, x2, y1, x1, y2, x1, y2, x2, y1, x2, y2]
}

/// Two triangles covering the unit square, the full texture.
pub fn unit_quad() -> Vertices {
    rect_vertices(Rect::new(0.0, 0.0, 1.0, 1.0))
}

/// Angle of the `i`-th fan spoke. Spoke `vertex_count` wraps to spoke 0.
fn spoke_angle(i: u32, vertex_count: u32) -> f64 {
    (i % vertex_count) as f64 * TAU / vertex_count as f64
}

/// Build a fan of `vertex_count` wedges around `hub`, with `point` mapping an
/// angle to an outer vertex. Empty for 0 or more than [`MAX_CIRCLE_WEDGES`].
fn fan(vertex_count: u32, hub: (f64, f64), point: impl Fn(f64) -> (f64, f64)) -> Vertices {
    if vertex_count == 0 || vertex_count > MAX_CIRCLE_WEDGES {
        return Vertices::new();
    }

    let mut out = Vertices::with_capacity(vertex_count as usize * 6);
    for i in 0..vertex_count {
        let (ax, ay) = point(spoke_angle(i, vertex_count));
        let (bx, by) = point(spoke_angle(i + 1, vertex_count));
        out.extend_from_slice(&[
            hub.0 as f32,
            hub.1 as f32,
            ax as f32,
            ay as f32,
            bx as f32,
            by as f32,
        ]);
    }
    out
}

/// Position-space fan for `circle`.
///
/// Angle 0 points along +x and angles grow toward +y, which is clockwise on
/// screen since the surface's y axis points down.
pub fn circle_fan(circle: &Circle) -> Vertices {
    let hub = circle.hub();
    let r = circle.radius;
    fan(circle.vertex_count, (hub.x, hub.y), |angle| {
        (angle.cos() * r + hub.x, angle.sin() * r + hub.y)
    })
}

/// The same fan mapped into the unit square, so a sampled texture is
/// clipped to a disc.
pub fn circle_tex_fan(vertex_count: u32) -> Vertices {
    fan(vertex_count, (0.5, 0.5), |angle| {
        (angle.cos() / 2.0 + 0.5, angle.sin() / 2.0 + 0.5)
    })
}
