//! Primitive geometry value types used by collision queries
//!
//! Bounding boxes, axis projections, line segments, and rays. These carry no
//! behavior beyond geometric arithmetic; the collider shapes build every
//! query out of them.

use serde::{Deserialize, Serialize};

use crate::foundation::math::utils::cross;
use crate::foundation::math::{Point2, Vec2};

/// An axis-aligned bounding box
///
/// Invariant: `min.x <= max.x` and `min.y <= max.y` after any `combine`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum corner
    pub min: Point2,
    /// Maximum corner
    pub max: Point2,
}

impl Default for BoundingBox {
    /// A degenerate zero-size box at the origin
    fn default() -> Self {
        Self {
            min: Point2::origin(),
            max: Point2::origin(),
        }
    }
}

impl BoundingBox {
    /// Creates a bounding box from two opposite corners, normalizing the order
    pub fn new(a: Point2, b: Point2) -> Self {
        Self {
            min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// The smallest box containing every given point, `None` for no points
    pub fn from_points<I: IntoIterator<Item = Point2>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut result = Self {
            min: first,
            max: first,
        };
        for p in iter {
            result = result.combine(&Self { min: p, max: p });
        }
        Some(result)
    }

    /// Returns the union of this box and another
    pub fn combine(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: Point2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Returns this box shifted by an offset
    pub fn translate(&self, offset: Vec2) -> BoundingBox {
        BoundingBox {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Width along the x axis
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height along the y axis
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Center point of the box
    pub fn center(&self) -> Point2 {
        Point2::from((self.min.coords + self.max.coords) * 0.5)
    }

    /// Test whether a point lies inside the box (boundary inclusive)
    pub fn contains_point(&self, point: Point2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Test whether two boxes overlap (boundary touching counts)
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }
}

/// The interval `[min, max]` obtained by projecting a shape onto an axis
///
/// Used by separating-axis overlap tests. Invariant: `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Interval lower bound
    pub min: f32,
    /// Interval upper bound
    pub max: f32,
}

impl Projection {
    /// Creates a projection interval, normalizing the bound order
    pub fn new(min: f32, max: f32) -> Self {
        Self {
            min: min.min(max),
            max: max.max(min),
        }
    }

    /// Test whether two intervals overlap (touching counts)
    pub fn overlaps(&self, other: &Projection) -> bool {
        self.max >= other.min && other.max >= self.min
    }

    /// Minimum translation along the axis separating the intervals
    ///
    /// Negative when the intervals are already separated. Unlike the plain
    /// intersection length, this stays correct when one interval contains
    /// the other.
    pub fn overlap_amount(&self, other: &Projection) -> f32 {
        (self.max - other.min).min(other.max - self.min)
    }
}

/// A line segment between two endpoints
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Start point
    pub begin: Point2,
    /// End point
    pub end: Point2,
}

impl Line {
    /// Creates a new segment
    pub fn new(begin: Point2, end: Point2) -> Self {
        Self { begin, end }
    }

    /// Segment length
    pub fn length(&self) -> f32 {
        (self.end - self.begin).norm()
    }

    /// Squared segment length
    pub fn length_squared(&self) -> f32 {
        (self.end - self.begin).norm_squared()
    }

    /// Vector from begin to end (not normalized)
    pub fn direction(&self) -> Vec2 {
        self.end - self.begin
    }

    /// Midpoint of the segment
    pub fn midpoint(&self) -> Point2 {
        Point2::from((self.begin.coords + self.end.coords) * 0.5)
    }

    /// Closest point on this segment to the given point
    pub fn closest_point_to(&self, point: Point2) -> Point2 {
        let d = self.end - self.begin;
        let len_sq = d.norm_squared();
        if len_sq <= f32::EPSILON {
            return self.begin;
        }
        let t = ((point - self.begin).dot(&d) / len_sq).clamp(0.0, 1.0);
        self.begin + d * t
    }

    /// Shortest connecting segment between this segment and another
    ///
    /// Closest-point-of-two-segments from "Real-Time Collision Detection"
    /// (Ericson, 5.1.9), robust against degenerate and parallel segments.
    pub fn closest_line_to(&self, other: &Line) -> Line {
        const EPSILON: f32 = 1e-12;

        let d1 = self.end - self.begin;
        let d2 = other.end - other.begin;
        let r = self.begin - other.begin;
        let a = d1.norm_squared();
        let e = d2.norm_squared();
        let f = d2.dot(&r);

        let mut s;
        let mut t;

        if a <= EPSILON && e <= EPSILON {
            // Both segments degenerate to points
            s = 0.0;
            t = 0.0;
        } else if a <= EPSILON {
            s = 0.0;
            t = (f / e).clamp(0.0, 1.0);
        } else {
            let c = d1.dot(&r);
            if e <= EPSILON {
                t = 0.0;
                s = (-c / a).clamp(0.0, 1.0);
            } else {
                let b = d1.dot(&d2);
                let denom = a * e - b * b;

                // Parallel segments pick s = 0 arbitrarily
                s = if denom > EPSILON {
                    ((b * f - c * e) / denom).clamp(0.0, 1.0)
                } else {
                    0.0
                };

                t = (b * s + f) / e;

                if t < 0.0 {
                    t = 0.0;
                    s = (-c / a).clamp(0.0, 1.0);
                } else if t > 1.0 {
                    t = 1.0;
                    s = ((b - c) / a).clamp(0.0, 1.0);
                }
            }
        }

        Line::new(self.begin + d1 * s, other.begin + d2 * t)
    }
}

/// A ray for ray casting and picking
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Point2,
    /// The direction of the ray (normalized by the constructor)
    pub dir: Vec2,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Point2, dir: Vec2) -> Self {
        Self {
            origin,
            dir: dir.try_normalize(f32::EPSILON).unwrap_or_else(Vec2::x),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Point2 {
        self.origin + self.dir * t
    }

    /// Intersect the ray with a segment, returning the ray distance of the hit
    pub fn intersect_segment(&self, begin: Point2, end: Point2) -> Option<f32> {
        const EPSILON: f32 = 1e-12;

        let edge = end - begin;
        let denom = cross(self.dir, edge);
        if denom.abs() < EPSILON {
            return None; // Parallel
        }

        let to_begin = begin - self.origin;
        let t = cross(to_begin, edge) / denom;
        let u = cross(to_begin, self.dir) / denom;

        if t >= 0.0 && (0.0..=1.0).contains(&u) {
            Some(t)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bounding_box_combine_is_union() {
        let a = BoundingBox::new(Point2::new(0.0, 0.0), Point2::new(2.0, 2.0));
        let b = BoundingBox::new(Point2::new(-1.0, 1.0), Point2::new(1.0, 3.0));
        let union = a.combine(&b);
        assert_relative_eq!(union.min.x, -1.0);
        assert_relative_eq!(union.min.y, 0.0);
        assert_relative_eq!(union.max.x, 2.0);
        assert_relative_eq!(union.max.y, 3.0);
        assert!(union.min.x <= union.max.x && union.min.y <= union.max.y);
    }

    #[test]
    fn test_bounding_box_new_normalizes_corners() {
        let b = BoundingBox::new(Point2::new(4.0, -1.0), Point2::new(1.0, 3.0));
        assert_relative_eq!(b.min.x, 1.0);
        assert_relative_eq!(b.max.x, 4.0);
        assert_relative_eq!(b.min.y, -1.0);
        assert_relative_eq!(b.max.y, 3.0);
    }

    #[test]
    fn test_bounding_box_translate() {
        let b = BoundingBox::new(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0))
            .translate(Vec2::new(5.0, -5.0));
        assert_relative_eq!(b.min.x, 5.0);
        assert_relative_eq!(b.max.y, -4.0);
    }

    #[test]
    fn test_projection_overlap_amount() {
        let a = Projection::new(0.0, 4.0);
        let b = Projection::new(3.0, 7.0);
        assert!(a.overlaps(&b));
        assert_relative_eq!(a.overlap_amount(&b), 1.0);

        let c = Projection::new(5.0, 6.0);
        assert!(!a.overlaps(&c));
        assert!(a.overlap_amount(&c) < 0.0);

        // Containment reports the push-out distance, not the intersection
        let contained = Projection::new(1.0, 2.0);
        assert_relative_eq!(a.overlap_amount(&contained), 2.0);
    }

    #[test]
    fn test_line_closest_point() {
        let line = Line::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
        let p = line.closest_point_to(Point2::new(3.0, 5.0));
        assert_relative_eq!(p.x, 3.0);
        assert_relative_eq!(p.y, 0.0);

        // Clamped to an endpoint
        let q = line.closest_point_to(Point2::new(-2.0, 1.0));
        assert_relative_eq!(q.x, 0.0);
    }

    #[test]
    fn test_closest_line_between_crossing_segments() {
        let a = Line::new(Point2::new(0.0, 0.0), Point2::new(4.0, 0.0));
        let b = Line::new(Point2::new(2.0, 1.0), Point2::new(2.0, 5.0));
        let connecting = a.closest_line_to(&b);
        assert_relative_eq!(connecting.length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_closest_line_between_parallel_segments() {
        let a = Line::new(Point2::new(0.0, 0.0), Point2::new(4.0, 0.0));
        let b = Line::new(Point2::new(0.0, 2.0), Point2::new(4.0, 2.0));
        let connecting = a.closest_line_to(&b);
        assert_relative_eq!(connecting.length(), 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(Point2::origin(), Vec2::new(0.0, 10.0));
        assert_relative_eq!(ray.dir.norm(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_ray_segment_intersection() {
        let ray = Ray::new(Point2::new(0.0, 0.0), Vec2::new(1.0, 0.0));
        let t = ray.intersect_segment(Point2::new(5.0, -1.0), Point2::new(5.0, 1.0));
        assert!(t.is_some());
        assert_relative_eq!(t.unwrap(), 5.0, epsilon = 1e-6);

        // Behind the origin
        let behind = ray.intersect_segment(Point2::new(-5.0, -1.0), Point2::new(-5.0, 1.0));
        assert!(behind.is_none());

        // Parallel
        let parallel = ray.intersect_segment(Point2::new(0.0, 1.0), Point2::new(5.0, 1.0));
        assert!(parallel.is_none());
    }
}
