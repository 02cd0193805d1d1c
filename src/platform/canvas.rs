//! Canvas 2D drawing surface

use glam::Vec2;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::check_call;
use crate::renderer::Surface;

/// CSS color string for a linear RGBA color
pub fn css_color(color: [f32; 4]) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({}, {}, {}, {:.3})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3].clamp(0.0, 1.0)
    )
}

/// `Surface` backed by a canvas 2D context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f32,
    height: f32,
}

impl CanvasSurface {
    /// Acquire the 2D context; `None` if the canvas refuses one
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|obj| wasm_bindgen::JsCast::dyn_into::<CanvasRenderingContext2d>(obj).ok())?;
        Some(Self {
            ctx,
            width: canvas.width() as f32,
            height: canvas.height() as f32,
        })
    }

    fn draw_path(&self, color: [f32; 4], glow: f32) {
        let css = css_color(color);
        self.ctx.set_fill_style_str(&css);
        if glow > 0.0 {
            self.ctx.set_shadow_color(&css);
            self.ctx.set_shadow_blur(glow as f64);
        }
        self.ctx.fill();
        self.ctx.set_shadow_blur(0.0);
    }

}

impl Surface for CanvasSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn fill_overlay(&mut self, color: [f32; 4]) {
        self.ctx.set_fill_style_str(&css_color(color));
        self.ctx
            .fill_rect(0.0, 0.0, self.width as f64, self.height as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4], glow: f32) {
        self.ctx.begin_path();
        let traced = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius.max(0.0) as f64,
            0.0,
            std::f64::consts::TAU,
        );
        if !check_call("Canvas arc", traced) {
            return;
        }
        self.draw_path(color, glow);
    }

    fn fill_polygon(
        &mut self,
        points: &[Vec2],
        translation: Vec2,
        rotation: f32,
        color: [f32; 4],
        glow: f32,
    ) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };

        self.ctx.save();
        let placed = self
            .ctx
            .translate(translation.x as f64, translation.y as f64)
            .and_then(|_| self.ctx.rotate(rotation as f64));
        if !check_call("Canvas transform", placed) {
            self.ctx.restore();
            return;
        }

        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
        self.draw_path(color, glow);
        self.ctx.restore();
    }
}
