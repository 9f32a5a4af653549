//! Two-point shape constructors.
//!
//! Every function here maps an anchor point `p1` (first click / drag start)
//! and a live point `p2` (current pointer / second click) to a normalized
//! shape descriptor. The functions are pure; anchored shapes (square,
//! circle) always extend from `p1` toward `p2` independently per axis.

pub type Point = (i32, i32);

/// Axis-aligned bounding box. `width`/`height` are the component-wise
/// absolute differences of the defining points; the rasterizer paints the
/// inclusive pixel span `x..=x + width`, so both click points lie on the
/// shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub fn is_degenerate(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

pub fn rect(p1: Point, p2: Point) -> BoundingBox {
    BoundingBox {
        x: p1.0.min(p2.0),
        y: p1.1.min(p2.1),
        width: (p2.0 - p1.0).abs(),
        height: (p2.1 - p1.1).abs(),
    }
}

/// Square with side `min(|dx|, |dy|)`, anchored at `p1` and extending
/// toward `p2` on each axis.
pub fn square(p1: Point, p2: Point) -> BoundingBox {
    let side = (p2.0 - p1.0).abs().min((p2.1 - p1.1).abs());
    BoundingBox {
        x: if p2.0 >= p1.0 { p1.0 } else { p1.0 - side },
        y: if p2.1 >= p1.1 { p1.1 } else { p1.1 - side },
        width: side,
        height: side,
    }
}

/// Circle inscribed in the square gesture: `radius = min(|dx|, |dy|) / 2`
/// (integer floor), center offset from `p1` by `radius` toward `p2` on
/// each axis.
pub fn circle(p1: Point, p2: Point) -> (Point, i32) {
    let size = (p2.0 - p1.0).abs().min((p2.1 - p1.1).abs());
    let radius = size / 2;
    let cx = if p2.0 >= p1.0 {
        p1.0 + radius
    } else {
        p1.0 - radius
    };
    let cy = if p2.1 >= p1.1 {
        p1.1 + radius
    } else {
        p1.1 - radius
    };
    ((cx, cy), radius)
}

/// Ellipse bounding box; identical to [`rect`].
pub fn oval(p1: Point, p2: Point) -> BoundingBox {
    rect(p1, p2)
}

/// Isosceles triangle: base from `p1` to `(p2.x, p1.y)` at the anchor's
/// height, apex horizontally centered at `p2`'s height.
pub fn triangle(p1: Point, p2: Point) -> [Point; 3] {
    [p1, ((p1.0 + p2.0) / 2, p2.1), (p2.0, p1.1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_is_min_corner_plus_absolute_size() {
        let b = rect((50, 10), (10, 30));
        assert_eq!(
            b,
            BoundingBox {
                x: 10,
                y: 10,
                width: 40,
                height: 20
            }
        );
    }

    #[test]
    fn rect_is_symmetric_under_point_swap() {
        let pairs = [((3, 7), (-2, 40)), ((0, 0), (0, 0)), ((-5, -5), (5, 5))];
        for (a, b) in pairs {
            assert_eq!(rect(a, b), rect(b, a));
        }
    }

    #[test]
    fn rect_degenerate_boxes_are_valid() {
        assert!(rect((4, 4), (4, 9)).is_degenerate());
        assert!(rect((4, 4), (9, 4)).is_degenerate());
        assert!(!rect((4, 4), (5, 5)).is_degenerate());
    }

    #[test]
    fn square_side_is_min_of_axis_extents() {
        let b = square((0, 0), (10, 30));
        assert_eq!(b.width, 10);
        assert_eq!(b.height, 10);
    }

    #[test]
    fn square_extends_toward_second_point_per_axis() {
        // p2 left and below p1: box grows left and down.
        let b = square((100, 100), (80, 150));
        assert_eq!(
            b,
            BoundingBox {
                x: 80,
                y: 100,
                width: 20,
                height: 20
            }
        );

        // p2 up-right: box grows right and up.
        let b = square((100, 100), (130, 90));
        assert_eq!(
            b,
            BoundingBox {
                x: 100,
                y: 90,
                width: 10,
                height: 10
            }
        );
    }

    #[test]
    fn square_is_not_symmetric_under_point_swap() {
        assert_ne!(square((0, 0), (10, 20)), square((10, 20), (0, 0)));
    }

    #[test]
    fn circle_radius_floors_odd_sizes() {
        let ((cx, cy), r) = circle((0, 0), (11, 20));
        assert_eq!(r, 5);
        assert_eq!((cx, cy), (5, 5));
    }

    #[test]
    fn circle_center_follows_drag_direction() {
        let ((cx, cy), r) = circle((100, 100), (80, 60));
        assert_eq!(r, 10);
        assert_eq!((cx, cy), (90, 90));
    }

    #[test]
    fn oval_reuses_rect_bounding_box() {
        assert_eq!(oval((5, 8), (1, 2)), rect((5, 8), (1, 2)));
    }

    #[test]
    fn triangle_base_at_anchor_height_apex_centered() {
        let [a, b, c] = triangle((10, 40), (30, 10));
        assert_eq!(a, (10, 40));
        assert_eq!(b, (20, 10));
        assert_eq!(c, (30, 40));
    }
}
