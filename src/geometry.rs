//! Value types shared by the transform pipeline, the fractal generators and
//! the motion stepper.

use crate::error::{GeomError, Result};
use std::ops::{Add, Div, Mul, Neg, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    pub const ORIGIN: Point2D = Point2D { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Point2D {
        Point2D { x, y }
    }

    /// The point `t` of the way from `a` towards `b`.
    pub fn lerp(a: Point2D, b: Point2D, t: f32) -> Point2D {
        Point2D::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }

    pub fn midpoint(a: Point2D, b: Point2D) -> Point2D {
        Point2D::lerp(a, b, 0.5)
    }

    /// Distance from the origin.
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Point2D) -> f32 {
        (other - self).length()
    }
}

impl Add for Point2D {
    type Output = Point2D;

    fn add(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2D {
    type Output = Point2D;

    fn sub(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point2D {
    type Output = Point2D;

    fn mul(self, rhs: f32) -> Point2D {
        Point2D::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Point2D {
    type Output = Point2D;

    fn div(self, rhs: f32) -> Point2D {
        Point2D::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Point2D {
    type Output = Point2D;

    fn neg(self) -> Point2D {
        Point2D::new(-self.x, -self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Size {
        Size { width, height }
    }

    pub fn min_side(self) -> f32 {
        self.width.min(self.height)
    }
}

/// A drawable line. `a == b` is allowed and renders as a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Point2D,
    pub b: Point2D,
}

impl Segment {
    pub const fn new(a: Point2D, b: Point2D) -> Segment {
        Segment { a, b }
    }

    pub fn length(&self) -> f32 {
        self.a.distance(self.b)
    }
}

/// Three ordered vertices. Winding carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub p1: Point2D,
    pub p2: Point2D,
    pub p3: Point2D,
}

impl Triangle {
    pub const fn new(p1: Point2D, p2: Point2D, p3: Point2D) -> Triangle {
        Triangle { p1, p2, p3 }
    }

    /// Equilateral triangle with a horizontal base starting at `base_left`.
    /// The apex sits `side * sin(60°)` below the base in screen coordinates.
    pub fn equilateral(base_left: Point2D, side: f32) -> Triangle {
        let height = side * 60f32.to_radians().sin();
        Triangle {
            p1: base_left,
            p2: base_left + Point2D::new(side, 0.0),
            p3: base_left + Point2D::new(side / 2.0, height),
        }
    }

    pub fn vertices(&self) -> [Point2D; 3] {
        [self.p1, self.p2, self.p3]
    }

    pub fn edges(&self) -> [Segment; 3] {
        [
            Segment::new(self.p1, self.p2),
            Segment::new(self.p2, self.p3),
            Segment::new(self.p3, self.p1),
        ]
    }

    /// Midpoints of the edges `p1p2`, `p2p3` and `p3p1`, in that order.
    pub fn midpoints(&self) -> [Point2D; 3] {
        [
            Point2D::midpoint(self.p1, self.p2),
            Point2D::midpoint(self.p2, self.p3),
            Point2D::midpoint(self.p3, self.p1),
        ]
    }

    pub fn perimeter(&self) -> f32 {
        self.edges().iter().map(Segment::length).sum()
    }

    pub fn try_map<F>(&self, mut f: F) -> Result<Triangle>
    where
        F: FnMut(Point2D) -> Result<Point2D>,
    {
        Ok(Triangle {
            p1: f(self.p1)?,
            p2: f(self.p2)?,
            p3: f(self.p3)?,
        })
    }
}

/// Axis-aligned bounding box in screen orientation (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisAlignedRect {
    pub top_left: Point2D,
    pub size: Size,
}

impl AxisAlignedRect {
    pub const fn new(top_left: Point2D, size: Size) -> AxisAlignedRect {
        AxisAlignedRect { top_left, size }
    }

    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> AxisAlignedRect {
        AxisAlignedRect::new(Point2D::new(x, y), Size::new(width, height))
    }

    /// Rejects negative or non-finite extents.
    pub fn validate(&self, name: &'static str) -> Result<()> {
        let Size { width, height } = self.size;
        if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
            return Err(GeomError::invalid(
                name,
                format!("size must be finite and non-negative, got {width}x{height}"),
            ));
        }
        Ok(())
    }

    pub fn left(&self) -> f32 {
        self.top_left.x
    }

    pub fn right(&self) -> f32 {
        self.top_left.x + self.size.width
    }

    pub fn top(&self) -> f32 {
        self.top_left.y
    }

    pub fn bottom(&self) -> f32 {
        self.top_left.y + self.size.height
    }

    pub fn bottom_right(&self) -> Point2D {
        Point2D::new(self.right(), self.bottom())
    }

    pub fn center(&self) -> Point2D {
        Point2D::midpoint(self.top_left, self.bottom_right())
    }

    pub fn translated(&self, by: Point2D) -> AxisAlignedRect {
        AxisAlignedRect::new(self.top_left + by, self.size)
    }

    /// Clockwise from the top-left corner.
    pub fn corners(&self) -> [Point2D; 4] {
        [
            self.top_left,
            Point2D::new(self.right(), self.top()),
            self.bottom_right(),
            Point2D::new(self.left(), self.bottom()),
        ]
    }

    /// Strict overlap: rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &AxisAlignedRect) -> bool {
        let horizontal = other.right() > self.left() && other.left() < self.right();
        let vertical = other.bottom() > self.top() && other.top() < self.bottom();
        horizontal && vertical
    }

    /// Penetration depth on each axis, measured from whichever side is
    /// shallower. Only meaningful when the rectangles overlap.
    pub fn overlap_depths(&self, other: &AxisAlignedRect) -> (f32, f32) {
        let x = (self.right() - other.left()).min(other.right() - self.left());
        let y = (self.bottom() - other.top()).min(other.bottom() - self.top());
        (x, y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub dx: f32,
    pub dy: f32,
}

impl Velocity {
    pub const fn new(dx: f32, dy: f32) -> Velocity {
        Velocity { dx, dy }
    }

    pub fn reflect_x(&mut self) {
        self.dx = -self.dx;
    }

    pub fn reflect_y(&mut self) {
        self.dy = -self.dy;
    }

    pub fn displacement(&self, dt: f32) -> Point2D {
        Point2D::new(self.dx * dt, self.dy * dt)
    }
}

/// A closed outline. The edge from the last point back to the first is
/// implied and never stored.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClosedPath {
    pub points: Vec<Point2D>,
}

impl ClosedPath {
    pub fn new(points: Vec<Point2D>) -> ClosedPath {
        ClosedPath { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| Segment::new(self.points[i], self.points[(i + 1) % n]))
    }

    pub fn perimeter(&self) -> f32 {
        self.edges().map(|edge| edge.length()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lerp_walks_from_a_to_b() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(10.0, 20.0);
        assert_eq!(Point2D::lerp(a, b, 0.0), a);
        assert_eq!(Point2D::lerp(a, b, 1.0), b);
        assert_eq!(Point2D::lerp(a, b, 0.25), Point2D::new(2.5, 5.0));
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Point2D::new(1.0, 2.0);
        let b = Point2D::new(4.0, 6.0);
        assert_relative_eq!(a.distance(b), 5.0);
        assert_relative_eq!(b.distance(a), 5.0);
    }

    #[test]
    fn touching_rects_do_not_overlap() {
        let a = AxisAlignedRect::from_xywh(0.0, 0.0, 10.0, 10.0);
        let b = AxisAlignedRect::from_xywh(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        let c = AxisAlignedRect::from_xywh(9.0, 9.0, 10.0, 10.0);
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }

    #[test]
    fn overlap_depths_take_the_shallow_side() {
        let body = AxisAlignedRect::from_xywh(8.0, 2.0, 10.0, 10.0);
        let wall = AxisAlignedRect::from_xywh(0.0, 0.0, 10.0, 30.0);
        let (x, y) = body.overlap_depths(&wall);
        assert_relative_eq!(x, 2.0);
        assert_relative_eq!(y, 10.0);
    }

    #[test]
    fn validate_rejects_negative_extent() {
        let rect = AxisAlignedRect::from_xywh(0.0, 0.0, -1.0, 5.0);
        assert!(rect.validate("rect").is_err());
        let empty = AxisAlignedRect::from_xywh(0.0, 0.0, 0.0, 0.0);
        assert!(empty.validate("rect").is_ok());
    }

    #[test]
    fn equilateral_has_equal_sides() {
        let tri = Triangle::equilateral(Point2D::new(5.0, 5.0), 30.0);
        for edge in tri.edges() {
            assert_relative_eq!(edge.length(), 30.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn closed_path_perimeter_includes_closing_edge() {
        let square = ClosedPath::new(AxisAlignedRect::from_xywh(0.0, 0.0, 2.0, 2.0).corners().to_vec());
        assert_eq!(square.edges().count(), 4);
        assert_relative_eq!(square.perimeter(), 8.0);
    }

    #[test]
    fn reflect_flips_one_axis() {
        let mut v = Velocity::new(3.0, -5.0);
        v.reflect_x();
        assert_eq!(v, Velocity::new(-3.0, -5.0));
        v.reflect_y();
        assert_eq!(v, Velocity::new(-3.0, 5.0));
    }
}
