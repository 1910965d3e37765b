//! Debug visualization shapes
//!
//! Colliders emit their outlines as plain geometry into a caller-owned list;
//! turning that geometry into pixels is a renderer concern and lives outside
//! this crate.

use crate::foundation::math::Point2;

/// A single debug visualization shape
#[derive(Debug, Clone, PartialEq)]
pub enum DebugShape {
    /// A line segment
    Segment {
        /// Start point
        begin: Point2,
        /// End point
        end: Point2,
    },
    /// A circle outline
    Circle {
        /// Center point
        center: Point2,
        /// Circle radius
        radius: f32,
    },
    /// A connected run of points, optionally closed into a loop
    Polyline {
        /// Points in draw order
        points: Vec<Point2>,
        /// Whether the last point connects back to the first
        closed: bool,
    },
}
