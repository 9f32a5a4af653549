//! One document layer: an owned transparent surface plus placement and
//! visibility.

use crate::canvas::surface::{Color, Surface};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    pub surface: Surface,
    pub offset: (i32, i32),
    pub visible: bool,
}

impl Layer {
    pub fn new(width: u32, height: u32, key: Color) -> Self {
        Self {
            surface: Surface::new(width, height, key),
            offset: (0, 0),
            visible: true,
        }
    }

    pub fn from_surface(surface: Surface) -> Self {
        Self {
            surface,
            offset: (0, 0),
            visible: true,
        }
    }

    /// New layer with matching geometry (dimensions, offset, key) and a
    /// freshly cleared surface.
    pub fn clone_without_content(&self) -> Self {
        Self {
            surface: Surface::new(self.surface.width(), self.surface.height(), self.surface.key()),
            offset: self.offset,
            visible: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::surface::Paint;

    #[test]
    fn clone_without_content_matches_geometry_but_is_blank() {
        let mut layer = Layer::new(8, 6, Color::TRANSPARENT);
        layer.offset = (3, 4);
        layer.visible = false;
        layer.surface.apply(2, 2, Paint::blend(Color::WHITE));

        let copy = layer.clone_without_content();
        assert_eq!(copy.surface.width(), 8);
        assert_eq!(copy.surface.height(), 6);
        assert_eq!(copy.offset, (3, 4));
        assert!(copy.visible);
        assert_eq!(copy.surface.pixel(2, 2), Color::TRANSPARENT);
    }
}
