use crate::constants::{BACKGROUND_CSS, REFLECTION_OFFSET_PX, SPARKLES_PER_RING, SPARKLE_RINGS};
use crate::core::constants::{
    CURSOR_HALO_RADIUS, CURSOR_TRAIL_DOT_RADIUS, CURSOR_TRAIL_MIN_SCALE, CURSOR_TRAIL_OPACITY,
    STROKE_ALPHA,
};
use crate::core::field::{Field, Rgba};
use crate::core::story::InkSegment;
use crate::core::trail::TrailBuffer;
use crate::core::wave::{pointer_sparkles, trace_layer, WaveLayer};
use glam::Vec2;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

/// 2D context for `canvas`; `None` leaves the effect as a no-op.
pub fn context_2d(canvas: &web::HtmlCanvasElement) -> Option<web::CanvasRenderingContext2d> {
    match canvas.get_context("2d") {
        Ok(Some(ctx)) => ctx.dyn_into::<web::CanvasRenderingContext2d>().ok(),
        _ => {
            log::warn!("[frame] canvas has no 2d context");
            None
        }
    }
}

/// Reset to a `dpr` scaled identity and paint the background.
pub fn begin(ctx: &web::CanvasRenderingContext2d, surface: Vec2, dpr: f64) {
    _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    ctx.set_global_alpha(1.0);
    ctx.set_fill_style_str(BACKGROUND_CSS);
    ctx.fill_rect(0.0, 0.0, surface.x as f64, surface.y as f64);
}

#[inline]
fn dot(ctx: &web::CanvasRenderingContext2d, p: Vec2, r: f32) {
    ctx.begin_path();
    _ = ctx.arc(p.x as f64, p.y as f64, r.max(0.0) as f64, 0.0, TAU);
    ctx.fill();
}

pub fn paint_field(ctx: &web::CanvasRenderingContext2d, field: &Field) {
    let s = field.shapes();
    for i in 0..s.len() {
        let c = field.color_of(i);
        let glow = s.glow[i];
        let size = s.size[i] * (1.0 + glow * 0.8);
        ctx.set_fill_style_str(&c.with_alpha((c.a + glow * 0.4).min(1.0)).to_css());
        dot(ctx, s.pos[i], size);
    }
}

/// River layers plus reflections; `scratch` is reused between frames.
#[allow(clippy::too_many_arguments)]
pub fn paint_river(
    ctx: &web::CanvasRenderingContext2d,
    layers: &[WaveLayer],
    color: Rgba,
    surface: Vec2,
    t: f32,
    step: f32,
    pointer: Option<Vec2>,
    intensity: f32,
    scratch: &mut Vec<Vec2>,
) {
    ctx.set_line_cap("round");
    for layer in layers {
        trace_layer(layer, surface.x, surface.y, t, step, pointer, intensity, scratch);
        ctx.set_stroke_style_str(&color.with_alpha(layer.alpha * intensity.min(1.5)).to_css());
        ctx.set_line_width(layer.width as f64);
        stroke_polyline(ctx, scratch);

        scratch.clear();
        let mut x = 0.0;
        while x <= surface.x {
            let y = layer.reflection_y(x, t, surface.y) + REFLECTION_OFFSET_PX;
            scratch.push(Vec2::new(x, y));
            x += step.max(1.0) * 2.0;
        }
        ctx.set_stroke_style_str(&color.with_alpha(layer.alpha * 0.3).to_css());
        ctx.set_line_width((layer.width * 0.5) as f64);
        stroke_polyline(ctx, scratch);
    }
    if let Some(p) = pointer {
        for (pos, size, alpha) in pointer_sparkles(p, t, SPARKLE_RINGS, SPARKLES_PER_RING) {
            ctx.set_fill_style_str(&Rgba::new(255, 255, 255, alpha * 0.6).to_css());
            dot(ctx, pos, size);
        }
    }
}

fn stroke_polyline(ctx: &web::CanvasRenderingContext2d, points: &[Vec2]) {
    let mut it = points.iter();
    let Some(first) = it.next() else {
        return;
    };
    ctx.begin_path();
    ctx.move_to(first.x as f64, first.y as f64);
    for p in it {
        ctx.line_to(p.x as f64, p.y as f64);
    }
    ctx.stroke();
}

/// Radial glow for each live interaction area, fading with age.
pub fn paint_glow(
    ctx: &web::CanvasRenderingContext2d,
    areas: &TrailBuffer,
    color: Rgba,
    now_ms: f64,
) {
    for (area, fade) in areas.visible(now_ms) {
        let (x, y) = (area.pos.x as f64, area.pos.y as f64);
        let r = area.weight as f64;
        let Ok(g) = ctx.create_radial_gradient(x, y, 0.0, x, y, r) else {
            continue;
        };
        _ = g.add_color_stop(0.0, &color.with_alpha(0.5 * fade).to_css());
        _ = g.add_color_stop(1.0, &color.with_alpha(0.0).to_css());
        ctx.set_fill_style_canvas_gradient(&g);
        dot(ctx, area.pos, area.weight);
    }
}

/// Fading dots behind the pointer plus a halo while it is moving.
pub fn paint_cursor(
    ctx: &web::CanvasRenderingContext2d,
    trail: &TrailBuffer,
    color: Rgba,
    now_ms: f64,
    moving: bool,
) {
    for (p, fade) in trail.visible(now_ms) {
        let scale = fade.max(CURSOR_TRAIL_MIN_SCALE);
        ctx.set_fill_style_str(&color.with_alpha(fade * CURSOR_TRAIL_OPACITY).to_css());
        dot(ctx, p.pos, CURSOR_TRAIL_DOT_RADIUS * scale);
    }
    if let (true, Some(head)) = (moving, trail.head()) {
        ctx.set_stroke_style_str(&color.with_alpha(0.5).to_css());
        ctx.set_line_width(2.0);
        ctx.begin_path();
        _ = ctx.arc(
            head.pos.x as f64,
            head.pos.y as f64,
            CURSOR_HALO_RADIUS as f64,
            0.0,
            TAU,
        );
        ctx.stroke();
    }
}

/// Off-screen canvas that keeps the reader's strokes between frames.
pub struct InkLayer {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    color: Rgba,
}

impl InkLayer {
    pub fn new(document: &web::Document, color: Rgba) -> anyhow::Result<Self> {
        let canvas = document
            .create_element("canvas")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let ctx =
            context_2d(&canvas).ok_or_else(|| anyhow::anyhow!("ink layer has no 2d context"))?;
        Ok(Self { canvas, ctx, color })
    }

    /// Match the visible canvas backing size. Resizing clears the ink.
    pub fn resize(&self, width: u32, height: u32, dpr: f64) {
        if self.canvas.width() != width || self.canvas.height() != height {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
        }
        _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    }

    /// Segment from the previous point plus a round dot; a fresh stroke is just the dot.
    pub fn stroke(&self, seg: &InkSegment) {
        let css = self.color.with_alpha(STROKE_ALPHA).to_css();
        let ctx = &self.ctx;
        ctx.set_line_cap("round");
        ctx.set_line_join("round");
        if let Some(from) = seg.from {
            ctx.set_stroke_style_str(&css);
            ctx.set_line_width(seg.width as f64);
            ctx.begin_path();
            ctx.move_to(from.x as f64, from.y as f64);
            ctx.line_to(seg.to.x as f64, seg.to.y as f64);
            ctx.stroke();
        }
        ctx.set_fill_style_str(&css);
        dot(ctx, seg.to, seg.width * 0.5);
    }

    /// Blit onto `target`, which is expected to carry the same dpr transform.
    pub fn composite(&self, target: &web::CanvasRenderingContext2d) {
        target.save();
        _ = target.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        _ = target.draw_image_with_html_canvas_element(&self.canvas, 0.0, 0.0);
        target.restore();
    }
}
