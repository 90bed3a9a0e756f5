//! Canvas geometry in percentage units.
//!
//! Overlay positions, focus points, and focus regions are expressed as
//! percentages of the output canvas: `(0, 0)` is top-left and
//! `(100, 100)` is bottom-right, independent of the export resolution.

use serde::{Deserialize, Serialize};

/// A point on the canvas, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const CENTER: Point2D = Point2D { x: 50.0, y: 50.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Linear interpolation between two points.
    pub fn lerp(a: &Point2D, b: &Point2D, t: f64) -> Point2D {
        let t = t.clamp(0.0, 1.0);
        Point2D {
            x: a.x + (b.x - a.x) * t,
            y: a.y + (b.y - a.y) * t,
        }
    }
}

impl Default for Point2D {
    fn default() -> Self {
        Self::CENTER
    }
}

/// An axis-aligned region of the canvas, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PercentRect {
    /// The whole canvas.
    pub const FULL: PercentRect = PercentRect {
        left: 0.0,
        top: 0.0,
        width: 100.0,
        height: 100.0,
    };

    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// The center point of this region.
    pub fn center(&self) -> Point2D {
        Point2D::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Check if a point lies within this region (edges inclusive).
    pub fn contains(&self, point: &Point2D) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }
}

impl Default for PercentRect {
    fn default() -> Self {
        Self::FULL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_lerp_clamps() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(100.0, 50.0);
        let mid = Point2D::lerp(&a, &b, 0.5);
        assert!((mid.x - 50.0).abs() < 1e-9);
        assert!((mid.y - 25.0).abs() < 1e-9);
        assert_eq!(Point2D::lerp(&a, &b, 3.0), b);
    }

    #[test]
    fn test_point_distance() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_rect_contains_and_center() {
        let rect = PercentRect::new(44.0, 45.68, 12.0, 8.64);
        assert!(rect.contains(&Point2D::CENTER));
        assert!(!rect.contains(&Point2D::new(10.0, 10.0)));
        let center = rect.center();
        assert!((center.x - 50.0).abs() < 1e-9);
        assert!((center.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_full_rect() {
        let full = PercentRect::default();
        assert_eq!(full.right(), 100.0);
        assert_eq!(full.bottom(), 100.0);
    }
}
