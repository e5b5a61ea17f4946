//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Append a thick line segment as a quad (two triangles)
pub fn line_quad(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, half_width: f32, color: [f32; 4]) {
    let dir = (b - a).normalize_or_zero();
    if dir == Vec2::ZERO {
        return;
    }
    let perp = Vec2::new(-dir.y, dir.x) * half_width;

    let a1 = a + perp;
    let a2 = a - perp;
    let b1 = b + perp;
    let b2 = b - perp;

    out.push(Vertex::new(a1.x, a1.y, color));
    out.push(Vertex::new(a2.x, a2.y, color));
    out.push(Vertex::new(b1.x, b1.y, color));

    out.push(Vertex::new(b1.x, b1.y, color));
    out.push(Vertex::new(a2.x, a2.y, color));
    out.push(Vertex::new(b2.x, b2.y, color));
}

/// Append a filled circle as a triangle fan
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        out.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}
