//! Vertex types and a tessellating surface
//!
//! `MeshSurface` turns drawing commands into a triangle list ready for a
//! GPU vertex buffer.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::shapes;
use super::{Surface, with_alpha};

/// Opacity of the glow halo relative to the shape
const GLOW_ALPHA: f32 = 0.25;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Surface that records a triangle list
#[derive(Debug, Clone)]
pub struct MeshSurface {
    width: f32,
    height: f32,
    segments: u32,
    vertices: Vec<Vertex>,
}

impl MeshSurface {
    pub fn new(width: f32, height: f32, segments: u32) -> Self {
        Self {
            width,
            height,
            segments: segments.max(3),
            vertices: Vec::new(),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Raw bytes for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Start a new frame
    pub fn clear(&mut self) {
        self.vertices.clear();
    }
}

impl Surface for MeshSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn fill_overlay(&mut self, color: [f32; 4]) {
        let max = Vec2::new(self.width, self.height);
        self.vertices.extend(shapes::rect(Vec2::ZERO, max, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4], glow: f32) {
        if glow > 0.0 {
            let halo = with_alpha(color, GLOW_ALPHA);
            self.vertices
                .extend(shapes::circle(center, radius + glow * 0.5, halo, self.segments));
        }
        self.vertices
            .extend(shapes::circle(center, radius, color, self.segments));
    }

    fn fill_polygon(
        &mut self,
        points: &[Vec2],
        translation: Vec2,
        rotation: f32,
        color: [f32; 4],
        glow: f32,
    ) {
        if glow > 0.0 {
            // Halo: the same outline pushed outward by half the glow radius
            let grown: Vec<Vec2> = points
                .iter()
                .map(|&p| p + p.normalize_or_zero() * glow * 0.5)
                .collect();
            let world = shapes::transform_points(&grown, translation, rotation);
            self.vertices
                .extend(shapes::convex_polygon(&world, with_alpha(color, GLOW_ALPHA)));
        }
        let world = shapes::transform_points(points, translation, rotation);
        self.vertices
            .extend(shapes::convex_polygon(&world, color));
    }
}
