//! Draw style state: color, opacity, stroke width, fill flag.

use crate::canvas::surface::Color;

pub const MIN_STROKE_WIDTH: u32 = 1;
pub const MAX_STROKE_WIDTH: u32 = 50;

const ALPHA_STEP_PERCENT: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawStyle {
    color: Color,
    alpha_percent: u8,
    width: u32,
    fill: bool,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            alpha_percent: 100,
            width: 2,
            fill: false,
        }
    }
}

impl DrawStyle {
    pub fn new(color: Color, width: u32) -> Self {
        Self {
            color,
            width: width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH),
            ..Self::default()
        }
    }

    /// RGB of the current color; opacity is tracked separately.
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = Color::rgb(color.r, color.g, color.b);
    }

    pub fn alpha_percent(&self) -> u8 {
        self.alpha_percent
    }

    pub fn alpha_u8(&self) -> u8 {
        ((self.alpha_percent as u32 * 255 + 50) / 100) as u8
    }

    /// Current color with the quantized opacity applied.
    pub fn paint_color(&self) -> Color {
        self.color.with_alpha(self.alpha_u8())
    }

    pub fn increase_alpha(&mut self) {
        self.alpha_percent = (self.alpha_percent + ALPHA_STEP_PERCENT).min(100);
    }

    pub fn decrease_alpha(&mut self) {
        self.alpha_percent = self.alpha_percent.saturating_sub(ALPHA_STEP_PERCENT);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn increase_width(&mut self) {
        self.width = (self.width + 1).min(MAX_STROKE_WIDTH);
    }

    pub fn decrease_width(&mut self) {
        self.width = (self.width - 1).max(MIN_STROKE_WIDTH);
    }

    pub fn fill(&self) -> bool {
        self.fill
    }

    pub fn toggle_fill(&mut self) {
        self.fill = !self.fill;
    }

    /// Width handed to the shape rasterizer: 0 requests a filled shape.
    pub fn stroke_width(&self) -> u32 {
        if self.fill {
            0
        } else {
            self.width
        }
    }
}
