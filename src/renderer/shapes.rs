//! Shape generation for 2D primitives

use glam::{Mat2, Vec2};
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::EnemyKind;

/// Enemy outline in local space, nose along +x
///
/// Triangles point their nose at (r, 0) with the tail at (-r/2, ±0.8r);
/// squares are a 2r box.
pub fn enemy_outline(kind: EnemyKind, radius: f32) -> Vec<Vec2> {
    match kind {
        EnemyKind::Triangle => vec![
            Vec2::new(radius, 0.0),
            Vec2::new(-radius / 2.0, -radius * 0.8),
            Vec2::new(-radius / 2.0, radius * 0.8),
        ],
        EnemyKind::Square => vec![
            Vec2::new(-radius, -radius),
            Vec2::new(radius, -radius),
            Vec2::new(radius, radius),
            Vec2::new(-radius, radius),
        ],
    }
}

/// Rotate then translate local points
pub fn transform_points(points: &[Vec2], translation: Vec2, rotation: f32) -> Vec<Vec2> {
    let rot = Mat2::from_angle(rotation);
    points.iter().map(|&p| rot * p + translation).collect()
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a convex polygon (triangle fan from the first point)
pub fn convex_polygon(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 3 {
        return Vec::new();
    }

    let mut vertices = Vec::with_capacity((points.len() - 2) * 3);
    let anchor = points[0];
    for pair in points[1..].windows(2) {
        vertices.push(Vertex::new(anchor.x, anchor.y, color));
        vertices.push(Vertex::new(pair[0].x, pair[0].y, color));
        vertices.push(Vertex::new(pair[1].x, pair[1].y, color));
    }

    vertices
}

/// Axis-aligned rectangle as two triangles
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    convex_polygon(
        &[
            min,
            Vec2::new(max.x, min.y),
            max,
            Vec2::new(min.x, max.y),
        ],
        color,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_outline_nose() {
        let pts = enemy_outline(EnemyKind::Triangle, 10.0);
        assert_eq!(pts[0], Vec2::new(10.0, 0.0));
        assert_eq!(pts[1], Vec2::new(-5.0, -8.0));
        assert_eq!(pts[2], Vec2::new(-5.0, 8.0));
    }

    #[test]
    fn test_transform_rotates_nose() {
        let pts = enemy_outline(EnemyKind::Triangle, 10.0);
        let out = transform_points(&pts, Vec2::new(100.0, 100.0), PI / 2.0);
        assert!((out[0] - Vec2::new(100.0, 110.0)).length() < 1e-4);
    }

    #[test]
    fn test_circle_vertex_count() {
        assert_eq!(circle(Vec2::ZERO, 5.0, [1.0; 4], 16).len(), 48);
    }

    #[test]
    fn test_polygon_fan() {
        let square = enemy_outline(EnemyKind::Square, 1.0);
        assert_eq!(convex_polygon(&square, [1.0; 4]).len(), 6);
        assert!(convex_polygon(&square[..2], [1.0; 4]).is_empty());
    }
}
