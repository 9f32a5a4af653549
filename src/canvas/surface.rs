//! RGBA pixel surface with a transparent key color and source-over
//! compositing.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn to_rgba_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_rgba_array(px: [u8; 4]) -> Self {
        Self::rgba(px[0], px[1], px[2], px[3])
    }
}

/// How a draw operation writes into a surface. `Blend` is standard
/// source-over; `Replace` overwrites the destination pixel outright and is
/// what the eraser uses, since blending a zero-alpha source is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaintMode {
    #[default]
    Blend,
    Replace,
}

/// One ink: a color plus the write mode applied per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paint {
    pub color: Color,
    pub mode: PaintMode,
}

impl Paint {
    pub const fn blend(color: Color) -> Self {
        Self {
            color,
            mode: PaintMode::Blend,
        }
    }

    pub const fn replace(color: Color) -> Self {
        Self {
            color,
            mode: PaintMode::Replace,
        }
    }
}

/// A width × height RGBA8 buffer. `key` is the background/clear color;
/// surfaces are created filled with it and `clear` refills with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    key: Color,
    pixels: Vec<u8>,
}

impl Surface {
    pub fn new(width: u32, height: u32, key: Color) -> Self {
        let mut surface = Self {
            width,
            height,
            key,
            pixels: vec![0u8; (width as usize) * (height as usize) * 4],
        };
        surface.clear();
        surface
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn key(&self) -> Color {
        self.key
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn from_pixels(width: u32, height: u32, key: Color, pixels: Vec<u8>) -> Self {
        assert_eq!(pixels.len(), (width as usize) * (height as usize) * 4);
        Self {
            width,
            height,
            key,
            pixels,
        }
    }

    /// Refill with the key color, dropping all drawn content.
    pub fn clear(&mut self) {
        let key = self.key.to_rgba_array();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&key);
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let idx = ((y * self.width + x) * 4) as usize;
        Color::rgba(
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        )
    }

    /// Write one pixel with the paint's mode. Out-of-bounds writes are
    /// silently dropped.
    pub fn apply(&mut self, x: i32, y: i32, paint: Paint) {
        if !self.contains(x, y) {
            return;
        }
        let idx = ((y as u32 * self.width + x as u32) * 4) as usize;
        match paint.mode {
            PaintMode::Replace => {
                self.pixels[idx..idx + 4].copy_from_slice(&paint.color.to_rgba_array());
            }
            PaintMode::Blend => {
                let dst = Color::rgba(
                    self.pixels[idx],
                    self.pixels[idx + 1],
                    self.pixels[idx + 2],
                    self.pixels[idx + 3],
                );
                let out = blend_pixel(dst, paint.color);
                self.pixels[idx..idx + 4].copy_from_slice(&out.to_rgba_array());
            }
        }
    }

    /// Source-over composite this surface onto `target` at `offset`.
    /// Pixels falling outside the target are skipped.
    pub fn composite_onto(&self, target: &mut Surface, offset: (i32, i32)) {
        for y in 0..self.height {
            for x in 0..self.width {
                let src = self.pixel(x, y);
                if src.a == 0 {
                    continue;
                }
                let tx = offset.0 + x as i32;
                let ty = offset.1 + y as i32;
                if !target.contains(tx, ty) {
                    continue;
                }
                let idx = ((ty as u32 * target.width + tx as u32) * 4) as usize;
                let dst = Color::rgba(
                    target.pixels[idx],
                    target.pixels[idx + 1],
                    target.pixels[idx + 2],
                    target.pixels[idx + 3],
                );
                let out = blend_pixel(dst, src);
                target.pixels[idx..idx + 4].copy_from_slice(&out.to_rgba_array());
            }
        }
    }
}

/// Standard source-over: the top pixel's alpha weighs it against the
/// bottom pixel.
pub fn blend_pixel(bottom: Color, top: Color) -> Color {
    let sa = top.a as f32 / 255.0;
    let da = bottom.a as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);

    if out_a <= f32::EPSILON {
        return Color::TRANSPARENT;
    }

    let blend = |s: u8, d: u8| -> u8 {
        (((s as f32 * sa) + (d as f32 * da * (1.0 - sa))) / out_a)
            .round()
            .clamp(0.0, 255.0) as u8
    };

    Color {
        r: blend(top.r, bottom.r),
        g: blend(top.g, bottom.g),
        b: blend(top.b, bottom.b),
        a: (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_surface_is_filled_with_key() {
        let s = Surface::new(3, 2, Color::TRANSPARENT);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(s.pixel(x, y), Color::TRANSPARENT);
            }
        }
    }

    #[test]
    fn clear_drops_drawn_content() {
        let mut s = Surface::new(2, 2, Color::TRANSPARENT);
        s.apply(1, 1, Paint::blend(Color::rgb(9, 9, 9)));
        assert_ne!(s.pixel(1, 1), Color::TRANSPARENT);
        s.clear();
        assert_eq!(s.pixel(1, 1), Color::TRANSPARENT);
    }

    #[test]
    fn blend_half_alpha_over_opaque_gray() {
        let out = blend_pixel(Color::rgb(100, 100, 100), Color::rgba(200, 0, 0, 128));
        assert_eq!(out, Color::rgb(150, 50, 50));
    }

    #[test]
    fn blend_with_zero_alpha_source_is_identity() {
        let dst = Color::rgb(10, 20, 30);
        assert_eq!(blend_pixel(dst, Color::TRANSPARENT), dst);
    }

    #[test]
    fn replace_mode_overwrites_even_with_zero_alpha() {
        let mut s = Surface::new(1, 1, Color::TRANSPARENT);
        s.apply(0, 0, Paint::blend(Color::rgb(50, 60, 70)));
        s.apply(0, 0, Paint::replace(Color::TRANSPARENT));
        assert_eq!(s.pixel(0, 0), Color::TRANSPARENT);
    }

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let mut s = Surface::new(2, 2, Color::TRANSPARENT);
        s.apply(-1, 0, Paint::blend(Color::WHITE));
        s.apply(0, 5, Paint::blend(Color::WHITE));
        assert_eq!(s, Surface::new(2, 2, Color::TRANSPARENT));
    }

    #[test]
    fn composite_respects_offset_and_skips_out_of_bounds() {
        let mut top = Surface::new(2, 1, Color::TRANSPARENT);
        top.apply(0, 0, Paint::blend(Color::rgb(1, 2, 3)));
        top.apply(1, 0, Paint::blend(Color::rgb(4, 5, 6)));

        let mut target = Surface::new(2, 2, Color::WHITE);
        top.composite_onto(&mut target, (1, 1));

        assert_eq!(target.pixel(1, 1), Color::rgb(1, 2, 3));
        // (2, 1) is outside the 2x2 target: dropped, no panic.
        assert_eq!(target.pixel(0, 0), Color::WHITE);
    }

    #[test]
    fn transparent_pixels_do_not_overwrite_target() {
        let top = Surface::new(1, 1, Color::TRANSPARENT);
        let mut target = Surface::new(1, 1, Color::rgb(7, 8, 9));
        top.composite_onto(&mut target, (0, 0));
        assert_eq!(target.pixel(0, 0), Color::rgb(7, 8, 9));
    }
}
