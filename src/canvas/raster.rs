//! Shape and stroke rasterization.
//!
//! Freehand strokes are Bresenham walks stamping a square brush; shapes are
//! painted over their inclusive bounding span so that both defining click
//! points land on the shape. `stroke_width == 0` means filled, anything
//! else is an outline of that thickness.

use crate::canvas::geometry::{self, BoundingBox, Point};
use crate::canvas::surface::{Paint, Surface};
use crate::canvas::Tool;

/// Dispatch a shape tool to its geometry and draw it. Non-shape tools are
/// a no-op; freehand strokes go through [`draw_line`] instead.
pub fn draw_shape(
    tool: Tool,
    surface: &mut Surface,
    paint: Paint,
    p1: Point,
    p2: Point,
    stroke_width: u32,
) {
    match tool {
        Tool::Square => draw_box(surface, paint, geometry::square(p1, p2), stroke_width),
        Tool::Rect => draw_box(surface, paint, geometry::rect(p1, p2), stroke_width),
        Tool::Circle => {
            let (center, radius) = geometry::circle(p1, p2);
            let bounds = BoundingBox {
                x: center.0 - radius,
                y: center.1 - radius,
                width: radius * 2,
                height: radius * 2,
            };
            draw_ellipse(surface, paint, bounds, stroke_width);
        }
        Tool::Oval => draw_ellipse(surface, paint, geometry::oval(p1, p2), stroke_width),
        Tool::Triangle => draw_triangle(surface, paint, geometry::triangle(p1, p2), stroke_width),
        Tool::None | Tool::Pen | Tool::Eraser => {}
    }
}

/// One freehand stroke segment: Bresenham from `from` to `to`, stamping a
/// `width`-sided square brush at every step.
pub fn draw_line(surface: &mut Surface, paint: Paint, from: Point, to: Point, width: u32) {
    let width = width.max(1);
    let (mut x0, mut y0) = from;
    let (x1, y1) = to;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        stamp_brush(surface, paint, (x0, y0), width);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

fn stamp_brush(surface: &mut Surface, paint: Paint, center: Point, width: u32) {
    let half = (width / 2) as i32;
    let side = width as i32;
    for dy in 0..side {
        for dx in 0..side {
            surface.apply(center.0 - half + dx, center.1 - half + dy, paint);
        }
    }
}

fn draw_box(surface: &mut Surface, paint: Paint, bounds: BoundingBox, stroke_width: u32) {
    if bounds.is_degenerate() {
        return;
    }
    let t = stroke_width as i32;
    let (x0, y0) = (bounds.x, bounds.y);
    let (x1, y1) = (bounds.x + bounds.width, bounds.y + bounds.height);
    for y in y0..=y1 {
        for x in x0..=x1 {
            let on_border =
                stroke_width == 0 || x < x0 + t || x > x1 - t || y < y0 + t || y > y1 - t;
            if on_border {
                surface.apply(x, y, paint);
            }
        }
    }
}

fn draw_ellipse(surface: &mut Surface, paint: Paint, bounds: BoundingBox, stroke_width: u32) {
    if bounds.is_degenerate() {
        return;
    }
    let rx = bounds.width as f32 / 2.0;
    let ry = bounds.height as f32 / 2.0;
    let cx = bounds.x as f32 + rx;
    let cy = bounds.y as f32 + ry;
    let t = stroke_width as f32;
    let inner_rx = rx - t;
    let inner_ry = ry - t;

    for y in bounds.y..=bounds.y + bounds.height {
        for x in bounds.x..=bounds.x + bounds.width {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            let outer = (dx / rx).powi(2) + (dy / ry).powi(2) <= 1.0;
            if !outer {
                continue;
            }
            let inside_inner = stroke_width > 0
                && inner_rx > 0.0
                && inner_ry > 0.0
                && (dx / inner_rx).powi(2) + (dy / inner_ry).powi(2) <= 1.0;
            if !inside_inner {
                surface.apply(x, y, paint);
            }
        }
    }
}

fn draw_triangle(surface: &mut Surface, paint: Paint, vertices: [Point; 3], stroke_width: u32) {
    let [a, b, c] = vertices;
    let twice_area =
        (b.0 - a.0) as i64 * (c.1 - a.1) as i64 - (b.1 - a.1) as i64 * (c.0 - a.0) as i64;
    if twice_area == 0 {
        return;
    }

    if stroke_width > 0 {
        draw_line(surface, paint, a, b, stroke_width);
        draw_line(surface, paint, b, c, stroke_width);
        draw_line(surface, paint, c, a, stroke_width);
        return;
    }

    // Half-plane test over the bounding box; edges count as inside so each
    // boundary pixel is painted exactly once.
    let min_x = a.0.min(b.0).min(c.0);
    let max_x = a.0.max(b.0).max(c.0);
    let min_y = a.1.min(b.1).min(c.1);
    let max_y = a.1.max(b.1).max(c.1);

    let edge = |p: Point, q: Point, x: i32, y: i32| -> i64 {
        (q.0 - p.0) as i64 * (y - p.1) as i64 - (q.1 - p.1) as i64 * (x - p.0) as i64
    };
    let orientation = twice_area.signum();

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let e0 = edge(a, b, x, y) * orientation;
            let e1 = edge(b, c, x, y) * orientation;
            let e2 = edge(c, a, x, y) * orientation;
            if e0 >= 0 && e1 >= 0 && e2 >= 0 {
                surface.apply(x, y, paint);
            }
        }
    }
}
