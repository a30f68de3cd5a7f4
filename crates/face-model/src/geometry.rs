//! Screen-space geometry primitives.
//!
//! Coordinates are in view pixels with `(0, 0)` at the top-left corner and
//! `y` growing downward.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// A 2D point (or offset vector) in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const ZERO: Point2D = Point2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Length of this point interpreted as a vector from the origin.
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Midpoint between two points.
    pub fn midpoint(a: &Point2D, b: &Point2D) -> Point2D {
        Point2D {
            x: (a.x + b.x) / 2.0,
            y: (a.y + b.y) / 2.0,
        }
    }

    /// This point shifted by `(dx, dy)`.
    pub fn offset(&self, dx: f64, dy: f64) -> Point2D {
        Point2D {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Both coordinates are finite (no NaN or infinity).
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Rescale this vector so its length does not exceed `max_len`.
    ///
    /// Vectors already inside the bound are returned unchanged; longer ones
    /// are scaled onto the bound exactly. A non-positive bound yields zero.
    pub fn clamp_length(&self, max_len: f64) -> Point2D {
        if max_len <= 0.0 {
            return Point2D::ZERO;
        }
        let len = self.length();
        if len <= max_len {
            return *self;
        }
        *self * (max_len / len)
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

impl Mul<f64> for Point2D {
    type Output = Point2D;

    fn mul(self, rhs: f64) -> Point2D {
        Point2D::new(self.x * rhs, self.y * rhs)
    }
}

/// Bounding box of a detected face.
///
/// `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FaceBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FaceBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a box from its center and full dimensions.
    pub fn centered(center: Point2D, width: f64, height: f64) -> Self {
        Self {
            x: center.x - width / 2.0,
            y: center.y - height / 2.0,
            width,
            height,
        }
    }

    /// The center point of the box.
    pub fn center(&self) -> Point2D {
        Point2D::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Half of the larger dimension; the radius of a disc covering the box.
    pub fn covering_radius(&self) -> f64 {
        self.width.max(self.height) / 2.0
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point2d_distance() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-9);
        assert!((b.length() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_midpoint_and_offset() {
        let mid = Point2D::midpoint(&Point2D::new(100.0, 200.0), &Point2D::new(200.0, 200.0));
        assert_eq!(mid, Point2D::new(150.0, 200.0));
        assert_eq!(mid.offset(0.0, -20.0), Point2D::new(150.0, 180.0));
    }

    #[test]
    fn test_clamp_length_rescales_onto_bound() {
        let v = Point2D::new(30.0, 40.0).clamp_length(10.0);
        assert!((v.length() - 10.0).abs() < 1e-9);
        assert!((v.x - 6.0).abs() < 1e-9);
        assert!((v.y - 8.0).abs() < 1e-9);

        let inside = Point2D::new(1.0, 1.0);
        assert_eq!(inside.clamp_length(10.0), inside);
        assert_eq!(inside.clamp_length(0.0), Point2D::ZERO);
    }

    #[test]
    fn test_face_box_center_and_radius() {
        let face = FaceBox::new(0.0, 100.0, 400.0, 300.0);
        assert_eq!(face.center(), Point2D::new(200.0, 250.0));
        assert!((face.covering_radius() - 200.0).abs() < 1e-9);

        let tall = FaceBox::centered(Point2D::new(0.0, 0.0), 100.0, 500.0);
        assert!((tall.covering_radius() - 250.0).abs() < 1e-9);
        assert_eq!(tall.center(), Point2D::new(0.0, 0.0));
    }

    #[test]
    fn test_non_finite_detection() {
        assert!(!Point2D::new(f64::NAN, 0.0).is_finite());
        assert!(!FaceBox::new(0.0, 0.0, f64::INFINITY, 1.0).is_finite());
    }
}
