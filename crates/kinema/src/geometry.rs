//! Planar geometry shared by the mapper, the controller and the renderers.
//!
//! Coordinates are surface-local pixels: origin at the top-left corner, x
//! growing to the right and y growing downward.
//!
//! # Example
//!
//! ```rust
//! use kinema::{Point, Rect, Vector};
//!
//! let scene = Rect::new(0.0, 0.0, 700.0, 350.0);
//! let p = Point::new(10.0, 20.0) + Vector::new(5.0, 5.0);
//! assert!(scene.contains(p));
//! ```

use core::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A point on the drawing plane.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given coordinates.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the origin point (0, 0).
    #[inline]
    pub const fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Rotates this point about the origin by `angle` radians.
    #[inline]
    pub fn rotated(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    #[inline]
    fn add(self, v: Vector) -> Point {
        Point {
            x: self.x + v.x,
            y: self.y + v.y,
        }
    }
}

impl AddAssign<Vector> for Point {
    #[inline]
    fn add_assign(&mut self, v: Vector) {
        self.x += v.x;
        self.y += v.y;
    }
}

impl Sub for Point {
    type Output = Vector;

    #[inline]
    fn sub(self, other: Point) -> Vector {
        Vector {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// A displacement on the drawing plane.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
}

impl Vector {
    /// Creates a new vector with the given components.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the zero vector.
    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Returns the magnitude (length) of the vector.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Returns the angle of the vector measured from the +x axis.
    ///
    /// Because y grows downward this is clockwise on screen.
    #[inline]
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }
}

impl Add for Vector {
    type Output = Vector;

    #[inline]
    fn add(self, other: Vector) -> Vector {
        Vector {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Neg for Vector {
    type Output = Vector;

    #[inline]
    fn neg(self) -> Vector {
        Vector {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    #[inline]
    fn mul(self, scalar: f64) -> Vector {
        Vector {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

/// An axis-aligned rectangle given by its top-left corner and size.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

impl Rect {
    /// Creates a new rectangle.
    ///
    /// Negative sizes are folded so that `x`/`y` always name the top-left corner.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        let (x, w) = if w < 0.0 { (x + w, -w) } else { (x, w) };
        let (y, h) = if h < 0.0 { (y + h, -h) } else { (y, h) };
        Self { x, y, w, h }
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Returns true if `p` lies inside the rectangle or on its edge.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Returns true if `p` lies strictly inside the rectangle.
    #[inline]
    pub fn contains_strict(&self, p: Point) -> bool {
        p.x > self.x && p.x < self.right() && p.y > self.y && p.y < self.bottom()
    }

    /// Returns the rectangle shrunk by the given margins.
    ///
    /// Margins larger than the rectangle collapse it to zero size.
    pub fn inset(&self, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        let w = (self.w - left - right).max(0.0);
        let h = (self.h - top - bottom).max(0.0);
        Self {
            x: self.x + left,
            y: self.y + top,
            w,
            h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-10;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn test_point_add_vector() {
        let p = Point::new(1.0, 2.0) + Vector::new(4.0, 5.0);
        assert!(approx_eq(p.x, 5.0));
        assert!(approx_eq(p.y, 7.0));
    }

    #[test]
    fn test_point_sub_point() {
        let v = Point::new(5.0, 7.0) - Point::new(1.0, 2.0);
        assert_eq!(v, Vector::new(4.0, 5.0));
    }

    #[test]
    fn test_point_rotated_quarter_turn() {
        let p = Point::new(1.0, 0.0).rotated(core::f64::consts::FRAC_PI_2);
        assert!(approx_eq(p.x, 0.0));
        assert!(approx_eq(p.y, 1.0));
    }

    #[test]
    fn test_vector_magnitude_and_angle() {
        let v = Vector::new(3.0, 4.0);
        assert!(approx_eq(v.magnitude(), 5.0));
        assert!(approx_eq(Vector::new(-1.0, 0.0).angle(), core::f64::consts::PI));
    }

    #[test]
    fn test_rect_negative_size_folds() {
        let r = Rect::new(10.0, 10.0, -4.0, -2.0);
        assert_eq!(r, Rect::new(6.0, 8.0, 4.0, 2.0));
    }

    #[test]
    fn test_rect_contains_edges() {
        let r = Rect::new(0.0, 0.0, 700.0, 350.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(!r.contains_strict(Point::new(0.0, 0.0)));
        assert!(r.contains_strict(Point::new(1.0, 1.0)));
        assert!(!r.contains(Point::new(700.5, 10.0)));
    }

    #[test]
    fn test_rect_inset_collapses() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0).inset(8.0, 0.0, 8.0, 0.0);
        assert!(approx_eq(r.w, 0.0));
        assert!(approx_eq(r.h, 10.0));
    }
}
