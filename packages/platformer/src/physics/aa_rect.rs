//! Axis-aligned rectangle.

use vek::*;


/// Axis-aligned rectangle in screen space, where y grows downwards.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AaRect {
    /// Top-left corner position.
    pub pos: Vec2<f32>,
    /// Extent from `pos`. Assumed to be non-negative.
    pub ext: Extent2<f32>,
}

impl AaRect {
    /// Construct from top-left corner and size.
    ///
    /// Panics if `w` or `h` is negative or NaN.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        assert!(w >= 0.0 && h >= 0.0, "rect extent must be non-negative, got {}x{}", w, h);
        AaRect {
            pos: Vec2::new(x, y),
            ext: Extent2::new(w, h),
        }
    }

    pub fn left(self) -> f32 {
        self.pos.x
    }

    pub fn right(self) -> f32 {
        self.pos.x + self.ext.w
    }

    pub fn top(self) -> f32 {
        self.pos.y
    }

    pub fn bottom(self) -> f32 {
        self.pos.y + self.ext.h
    }

    /// Translate self by `v`.
    pub fn translate<V: Into<Vec2<f32>>>(mut self, v: V) -> Self {
        self.pos += v.into();
        self
    }

    /// Same extent, with the top-left corner moved to `pos`.
    pub fn with_pos<V: Into<Vec2<f32>>>(mut self, pos: V) -> Self {
        self.pos = pos.into();
        self
    }

    /// Does self intersect with `rhs`?
    ///
    /// Rects which merely share an edge do not intersect, which is what lets a body rest on a
    /// platform without colliding with it every frame. A rect with zero width or height never
    /// intersects anything.
    pub fn intersects(self, rhs: AaRect) -> bool {
        if self.is_degenerate() || rhs.is_degenerate() {
            return false;
        }
        !(self.right() <= rhs.left()
            || self.left() >= rhs.right()
            || self.bottom() <= rhs.top()
            || self.top() >= rhs.bottom())
    }

    fn is_degenerate(self) -> bool {
        self.ext.w == 0.0 || self.ext.h == 0.0
    }
}


#[test]
fn test_intersects_symmetric() {
    let rects = [
        AaRect::new(0.0, 0.0, 10.0, 10.0),
        AaRect::new(5.0, 5.0, 10.0, 10.0),
        AaRect::new(10.0, 0.0, 10.0, 10.0),
        AaRect::new(-3.0, 2.0, 2.0, 30.0),
        AaRect::new(2.0, 2.0, 0.0, 0.0),
        AaRect::new(1.0, -5.0, 8.0, 6.0),
    ];
    for &a in &rects {
        for &b in &rects {
            assert_eq!(a.intersects(b), b.intersects(a), "{:?} vs {:?}", a, b);
        }
    }
}

#[test]
fn test_edge_touching_is_not_intersecting() {
    let a = AaRect::new(0.0, 0.0, 10.0, 10.0);
    assert!(!a.intersects(AaRect::new(10.0, 0.0, 10.0, 10.0)));
    assert!(!a.intersects(AaRect::new(-10.0, 0.0, 10.0, 10.0)));
    assert!(!a.intersects(AaRect::new(0.0, 10.0, 10.0, 10.0)));
    assert!(!a.intersects(AaRect::new(0.0, -10.0, 10.0, 10.0)));
    assert!(a.intersects(AaRect::new(9.5, 9.5, 10.0, 10.0)));
}

#[test]
fn test_degenerate_rect_never_intersects() {
    let big = AaRect::new(0.0, 0.0, 100.0, 100.0);
    assert!(!big.intersects(AaRect::new(50.0, 50.0, 0.0, 0.0)));
    assert!(!big.intersects(AaRect::new(50.0, 50.0, 0.0, 10.0)));
    assert!(!AaRect::new(50.0, 50.0, 10.0, 0.0).intersects(big));
}

#[test]
fn test_translate_is_pure() {
    let a = AaRect::new(1.0, 2.0, 3.0, 4.0);
    let b = a.translate(Vec2::new(10.0, -2.0));
    assert_eq!(a, AaRect::new(1.0, 2.0, 3.0, 4.0));
    assert_eq!(b, AaRect::new(11.0, 0.0, 3.0, 4.0));
    assert_eq!(b.right(), 14.0);
    assert_eq!(b.bottom(), 4.0);
}

#[test]
#[should_panic]
fn test_negative_extent_rejected() {
    AaRect::new(0.0, 0.0, -1.0, 5.0);
}
