//! Canvas2D painter for engine render buffers.
//!
//! Draw order per frame: clear, points, paths, then solids back-to-front.
//! Spheres are discs filled with a radial gradient that runs from the
//! highlight toward the unlit rim.

use std::f64::consts::TAU;

use glam::Vec2;
use orrery_engine::{AnnulusRun, Color, PointInstance, RenderBuffer, Solid, SphereInstance};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::HostError;

/// How far toward the rim the highlight center sits, as a fraction of the radius.
const HIGHLIGHT_REACH: f32 = 0.6;

/// CSS `rgb()` string for a color scaled by `k`.
pub fn css_rgb(color: Color, k: f32) -> String {
    let c = color.scaled(k);
    format!(
        "rgb({},{},{})",
        (c.r * 255.0).round() as u8,
        (c.g * 255.0).round() as u8,
        (c.b * 255.0).round() as u8
    )
}

/// Base color plus highlight and rim brightness for a shaded sphere.
pub fn sphere_stops(s: &SphereInstance) -> (Color, f32, f32) {
    let color = Color::new(s.r, s.g, s.b);
    let highlight = (s.floor + s.lit).min(1.0);
    (color, highlight, s.floor)
}

/// A point square read back from the flat instance floats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointSquare {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: Color,
}

/// Walk `RenderBuffer::point_floats`, `PointInstance::FLOATS` at a time.
pub fn point_squares(floats: &[f32]) -> impl Iterator<Item = PointSquare> + '_ {
    floats.chunks_exact(PointInstance::FLOATS).map(|p| PointSquare {
        x: p[0],
        y: p[1],
        size: p[2],
        color: Color::new(p[3], p[4], p[5]),
    })
}

pub struct CanvasPainter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    css_size: Vec2,
    pixel_ratio: f64,
}

impl CanvasPainter {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, HostError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(HostError::NoContext2d)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| HostError::NoContext2d)?;
        Ok(Self {
            canvas,
            ctx,
            css_size: Vec2::ONE,
            pixel_ratio: 1.0,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Size the backing store for `pixel_ratio` and draw in CSS pixels.
    pub fn resize(&mut self, css_width: f64, css_height: f64, pixel_ratio: f64) -> Result<(), HostError> {
        self.css_size = Vec2::new(css_width as f32, css_height as f32);
        self.pixel_ratio = pixel_ratio.max(1.0);
        self.canvas.set_width((css_width * self.pixel_ratio) as u32);
        self.canvas.set_height((css_height * self.pixel_ratio) as u32);
        let style = self.canvas.style();
        style.set_property("width", &format!("{css_width}px"))?;
        style.set_property("height", &format!("{css_height}px"))?;
        self.ctx
            .set_transform(self.pixel_ratio, 0.0, 0.0, self.pixel_ratio, 0.0, 0.0)?;
        Ok(())
    }

    /// Paint one frame.
    pub fn paint(&self, buffer: &RenderBuffer) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_global_alpha(1.0);
        ctx.set_fill_style_str(&css_rgb(buffer.clear_color, 1.0));
        ctx.fill_rect(0.0, 0.0, self.css_size.x as f64, self.css_size.y as f64);

        self.paint_points(buffer);
        self.paint_paths(buffer);

        for solid in buffer.solids() {
            match solid {
                Solid::Sphere(s) => self.paint_sphere(s)?,
                Solid::Annulus(a) => self.paint_annulus(buffer, a),
            }
        }
        ctx.set_global_alpha(1.0);
        Ok(())
    }

    fn paint_points(&self, buffer: &RenderBuffer) {
        let ctx = &self.ctx;
        let mut current: Option<Color> = None;
        for p in point_squares(buffer.point_floats()) {
            if current != Some(p.color) {
                ctx.set_fill_style_str(&css_rgb(p.color, 1.0));
                current = Some(p.color);
            }
            let half = (p.size * 0.5) as f64;
            ctx.fill_rect(p.x as f64 - half, p.y as f64 - half, p.size as f64, p.size as f64);
        }
    }

    fn paint_paths(&self, buffer: &RenderBuffer) {
        let ctx = &self.ctx;
        ctx.set_line_width(1.0);
        for run in &buffer.paths {
            let verts = buffer.path_vertices(run);
            let Some((first, rest)) = verts.split_first() else { continue };
            ctx.set_global_alpha(run.alpha as f64);
            ctx.set_stroke_style_str(&css_rgb(run.color, 1.0));
            ctx.begin_path();
            ctx.move_to(first.x as f64, first.y as f64);
            for v in rest {
                ctx.line_to(v.x as f64, v.y as f64);
            }
            ctx.stroke();
        }
        ctx.set_global_alpha(1.0);
    }

    fn paint_sphere(&self, s: &SphereInstance) -> Result<(), JsValue> {
        if s.radius <= 0.0 {
            return Ok(());
        }
        let ctx = &self.ctx;
        let (color, highlight, rim) = sphere_stops(s);
        let (x, y, r) = (s.x as f64, s.y as f64, s.radius as f64);

        ctx.set_global_alpha(s.alpha as f64);
        if highlight > rim {
            let hx = x + (s.light_dx * s.radius * HIGHLIGHT_REACH) as f64;
            let hy = y + (s.light_dy * s.radius * HIGHLIGHT_REACH) as f64;
            let gradient = ctx.create_radial_gradient(hx, hy, 0.0, x, y, r)?;
            gradient.add_color_stop(0.0, &css_rgb(color, highlight))?;
            gradient.add_color_stop(1.0, &css_rgb(color, rim))?;
            ctx.set_fill_style_canvas_gradient(&gradient);
        } else {
            ctx.set_fill_style_str(&css_rgb(color, rim));
        }

        ctx.begin_path();
        ctx.arc(x, y, r, 0.0, TAU)?;
        ctx.fill();
        Ok(())
    }

    fn paint_annulus(&self, buffer: &RenderBuffer, run: &AnnulusRun) {
        let ctx = &self.ctx;
        let (outer, inner) = buffer.annulus_arcs(run);
        let mut band = outer.iter().chain(inner.iter().rev());
        let Some(first) = band.next() else { return };
        ctx.set_global_alpha(run.alpha as f64);
        ctx.set_fill_style_str(&css_rgb(run.color, 1.0));
        ctx.begin_path();
        ctx.move_to(first.x as f64, first.y as f64);
        for p in band {
            ctx.line_to(p.x as f64, p.y as f64);
        }
        ctx.close_path();
        ctx.fill();
    }
}
