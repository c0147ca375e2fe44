//! Side view of the vortex on a 2D canvas: the plane through the axis and
//! the observer, with both surfaces mirrored about the axis.

use crate::constants::*;
use glam::Vec2;
use vortex_core::{axial_offset, ProfileTable, SHELL_HEIGHT_SCALE, SHELL_RADIAL_SCALE};
use web_sys as web;

const CORE_STROKE: &str = "#ffaa00";
const SHELL_STROKE: &str = "#aaccff";
const POOL_STROKE: &str = "#00e1ff";
const OBSERVER_FILL: &str = "#ffffff";
const MARKER_FILL: &str = "#ff4060";

pub struct SideView {
    ctx: web::CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl SideView {
    pub fn new(ctx: web::CanvasRenderingContext2d, canvas: &web::HtmlCanvasElement) -> Self {
        Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        }
    }

    pub fn resize_if_needed(&mut self, canvas: &web::HtmlCanvasElement) {
        self.width = canvas.width() as f64;
        self.height = canvas.height() as f64;
    }

    /// Metres (signed distance from axis, height above base) to canvas pixels.
    fn to_px(&self, p: Vec2) -> (f64, f64) {
        let usable_w = (self.width - 2.0 * VIEW_MARGIN_PX).max(1.0);
        let usable_h = (self.height - 2.0 * VIEW_MARGIN_PX).max(1.0);
        let sx = usable_w / (2.0 * VIEW_HALF_WIDTH_M as f64);
        let sy = usable_h / VIEW_HEIGHT_M as f64;
        let s = sx.min(sy);
        let x = self.width * 0.5 + p.x as f64 * s;
        let y = self.height - VIEW_MARGIN_PX - p.y as f64 * s;
        (x, y)
    }

    fn polyline(&self, points: impl Iterator<Item = Vec2>, stroke: &str) {
        self.ctx.begin_path();
        let mut first = true;
        for p in points {
            let (x, y) = self.to_px(p);
            if first {
                self.ctx.move_to(x, y);
                first = false;
            } else {
                self.ctx.line_to(x, y);
            }
        }
        self.ctx.set_stroke_style_str(stroke);
        self.ctx.stroke();
    }

    fn dot(&self, p: Vec2, fill: &str) {
        let (x, y) = self.to_px(p);
        self.ctx.begin_path();
        _ = self
            .ctx
            .arc(x, y, DOT_RADIUS_PX, 0.0, std::f64::consts::TAU);
        self.ctx.set_fill_style_str(fill);
        self.ctx.fill();
    }

    pub fn draw(
        &self,
        table: &ProfileTable,
        observer_offset: Vec2,
        marker_offset: Option<Vec2>,
    ) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
        self.ctx.set_line_width(2.0);

        let samples = table.samples();
        for side in [-1.0_f32, 1.0] {
            self.polyline(
                samples.iter().map(|p| Vec2::new(side * p.radius, p.height)),
                CORE_STROKE,
            );
            self.polyline(
                samples.iter().map(|p| {
                    Vec2::new(
                        side * p.radius * SHELL_RADIAL_SCALE,
                        p.height * SHELL_HEIGHT_SCALE,
                    )
                }),
                SHELL_STROKE,
            );
        }

        let pool = table.params().proximity_threshold();
        self.polyline(
            [Vec2::new(-pool, 0.0), Vec2::new(pool, 0.0)].into_iter(),
            POOL_STROKE,
        );

        self.dot(observer_offset, OBSERVER_FILL);
        if let Some(marker) = marker_offset {
            self.dot(marker, MARKER_FILL);
        }
    }
}

/// World point in side-view coordinates: distance from the axis and height above the base.
pub fn side_offset(axis_origin: glam::Vec3, point: glam::Vec3) -> Vec2 {
    let o = axial_offset(axis_origin, point);
    Vec2::new(o.distance_from_axis, o.local_height)
}
