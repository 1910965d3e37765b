//! Edge (line segment) collider shape
//!
//! Useful for thin walls, floors, and level boundaries that need collision
//! without any interior area.

use crate::collision::primitives::{BoundingBox, Line, Projection, Ray};
use crate::collision::{ColliderId, ShapeError};
use crate::debug::DebugShape;
use crate::foundation::math::{Point2, Transform2, Vec2};

/// Distance within which a point counts as on the edge
const CONTAINS_EPSILON: f32 = 1e-3;

/// A line segment collision shape
#[derive(Debug, Clone)]
pub struct EdgeCollider {
    id: ColliderId,
    local_begin: Point2,
    local_end: Point2,
    begin: Point2,
    end: Point2,
}

impl EdgeCollider {
    /// Creates an edge collider between two distinct local-space endpoints
    pub fn new(begin: Point2, end: Point2) -> Result<Self, ShapeError> {
        if (end - begin).norm_squared() <= f32::EPSILON {
            return Err(ShapeError::DegenerateEdge);
        }
        Ok(Self {
            id: ColliderId::next(),
            local_begin: begin,
            local_end: end,
            begin,
            end,
        })
    }

    /// Unique identity of this collider
    pub fn id(&self) -> ColliderId {
        self.id
    }

    /// World-space start point
    pub fn begin(&self) -> Point2 {
        self.begin
    }

    /// World-space end point
    pub fn end(&self) -> Point2 {
        self.end
    }

    /// The edge as a world-space segment
    pub fn as_line(&self) -> Line {
        Line::new(self.begin, self.end)
    }

    /// World position of the shape (segment midpoint)
    pub fn world_pos(&self) -> Vec2 {
        self.as_line().midpoint().coords
    }

    /// World-space bounding box
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.begin, self.end)
    }

    /// Local-space bounding box
    pub fn local_bounds(&self) -> BoundingBox {
        BoundingBox::new(self.local_begin, self.local_end)
    }

    /// Candidate separating axes: the edge normal and the edge direction
    pub fn axes(&self) -> Vec<Vec2> {
        match (self.end - self.begin).try_normalize(f32::EPSILON) {
            Some(dir) => vec![Vec2::new(dir.y, -dir.x), dir],
            None => Vec::new(),
        }
    }

    /// Endpoint furthest along the given direction (begin wins ties)
    pub fn furthest_point(&self, direction: Vec2) -> Point2 {
        if self.end.coords.dot(&direction) > self.begin.coords.dot(&direction) {
            self.end
        } else {
            self.begin
        }
    }

    /// Rotational inertia for a thin rod of the given mass
    pub fn inertia(&self, mass: f32) -> f32 {
        let length_squared = (self.end - self.begin).norm_squared();
        mass * length_squared / 12.0
    }

    /// Test whether a point lies on the segment (within a small tolerance)
    pub fn contains(&self, point: Point2) -> bool {
        let closest = self.as_line().closest_point_to(point);
        (point - closest).norm_squared() <= CONTAINS_EPSILON * CONTAINS_EPSILON
    }

    /// Test ray intersection with the segment
    pub fn ray_cast(&self, ray: &Ray, max_distance: Option<f32>) -> Option<Point2> {
        let t = ray.intersect_segment(self.begin, self.end)?;
        if let Some(max) = max_distance {
            if t > max {
                return None;
            }
        }
        Some(ray.point_at(t))
    }

    /// Project the segment onto an axis
    pub fn project(&self, axis: Vec2) -> Projection {
        let a = self.begin.coords.dot(&axis);
        let b = self.end.coords.dot(&axis);
        Projection::new(a.min(b), a.max(b))
    }

    /// Recompute world geometry from the owning body's transform
    pub fn update(&mut self, transform: &Transform2) {
        self.begin = transform.apply_to_point(self.local_begin);
        self.end = transform.apply_to_point(self.local_end);
    }

    /// Append this shape's debug outline
    pub fn debug_shapes(&self, out: &mut Vec<DebugShape>) {
        out.push(DebugShape::Segment {
            begin: self.begin,
            end: self.end,
        });
    }
}
