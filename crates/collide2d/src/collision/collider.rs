//! The collider shape variant and its query dispatch
//!
//! Every concrete shape answers the same query set; this enum is the single
//! dispatch point. Whether a pairwise operation fans out over composite
//! children or goes straight to a primitive test is decided here by an
//! exhaustive match, never by a runtime type check.

use crate::collision::contact::CollisionContact;
use crate::collision::primitives::{BoundingBox, Line, Projection, Ray};
use crate::collision::{
    narrowphase, CircleCollider, ColliderId, CompositeCollider, EdgeCollider, PolygonCollider,
};
use crate::debug::DebugShape;
use crate::foundation::math::{Point2, Transform2, Vec2};

/// A collision shape capable of the full set of geometric queries
#[derive(Debug, Clone)]
pub enum Collider {
    /// Circular shape
    Circle(CircleCollider),
    /// Convex polygon shape
    Polygon(PolygonCollider),
    /// Line segment shape
    Edge(EdgeCollider),
    /// Aggregate of child colliders acting as one shape
    Composite(CompositeCollider),
}

impl Collider {
    /// Unique identity of this collider
    pub fn id(&self) -> ColliderId {
        match self {
            Self::Circle(c) => c.id(),
            Self::Polygon(p) => p.id(),
            Self::Edge(e) => e.id(),
            Self::Composite(c) => c.id(),
        }
    }

    /// World position of the shape
    pub fn world_pos(&self) -> Vec2 {
        match self {
            Self::Circle(c) => c.world_pos(),
            Self::Polygon(p) => p.world_pos(),
            Self::Edge(e) => e.world_pos(),
            Self::Composite(c) => c.world_pos(),
        }
    }

    /// World-space bounding box
    pub fn bounds(&self) -> BoundingBox {
        match self {
            Self::Circle(c) => c.bounds(),
            Self::Polygon(p) => p.bounds(),
            Self::Edge(e) => e.bounds(),
            Self::Composite(c) => c.bounds(),
        }
    }

    /// Local-space bounding box
    pub fn local_bounds(&self) -> BoundingBox {
        match self {
            Self::Circle(c) => c.local_bounds(),
            Self::Polygon(p) => p.local_bounds(),
            Self::Edge(e) => e.local_bounds(),
            Self::Composite(c) => c.local_bounds(),
        }
    }

    /// Candidate separating axes for SAT-style tests
    pub fn axes(&self) -> Vec<Vec2> {
        match self {
            Self::Circle(c) => c.axes(),
            Self::Polygon(p) => p.axes(),
            Self::Edge(e) => e.axes(),
            Self::Composite(c) => c.axes(),
        }
    }

    /// Support point: the shape point furthest along the given direction
    ///
    /// `None` only for an empty composite.
    pub fn furthest_point(&self, direction: Vec2) -> Option<Point2> {
        match self {
            Self::Circle(c) => Some(c.furthest_point(direction)),
            Self::Polygon(p) => Some(p.furthest_point(direction)),
            Self::Edge(e) => Some(e.furthest_point(direction)),
            Self::Composite(c) => c.furthest_point(direction),
        }
    }

    /// Rotational inertia contribution for the given mass
    pub fn inertia(&self, mass: f32) -> f32 {
        match self {
            Self::Circle(c) => c.inertia(mass),
            Self::Polygon(p) => p.inertia(mass),
            Self::Edge(e) => e.inertia(mass),
            Self::Composite(c) => c.inertia(mass),
        }
    }

    /// Test whether a world point lies inside the shape
    pub fn contains(&self, point: Point2) -> bool {
        match self {
            Self::Circle(c) => c.contains(point),
            Self::Polygon(p) => p.contains(point),
            Self::Edge(e) => e.contains(point),
            Self::Composite(c) => c.contains(point),
        }
    }

    /// Test ray intersection, returning the nearest hit point
    pub fn ray_cast(&self, ray: &Ray, max_distance: Option<f32>) -> Option<Point2> {
        match self {
            Self::Circle(c) => c.ray_cast(ray, max_distance),
            Self::Polygon(p) => p.ray_cast(ray, max_distance),
            Self::Edge(e) => e.ray_cast(ray, max_distance),
            Self::Composite(c) => c.ray_cast(ray, max_distance),
        }
    }

    /// Project the shape onto an axis
    ///
    /// `None` only for an empty composite.
    pub fn project(&self, axis: Vec2) -> Option<Projection> {
        match self {
            Self::Circle(c) => Some(c.project(axis)),
            Self::Polygon(p) => Some(p.project(axis)),
            Self::Edge(e) => Some(e.project(axis)),
            Self::Composite(c) => c.project(axis),
        }
    }

    /// All contacts between this collider and another
    ///
    /// Composite operands fan out over their children (the full cross-product
    /// when both sides are composite); primitive pairs go to the narrow-phase
    /// tests. Returns an empty list when the shapes do not touch; never fails.
    pub fn collide(&self, other: &Collider) -> Vec<CollisionContact> {
        match (self, other) {
            (Self::Composite(composite), _) => composite.collide(other),
            (_, Self::Composite(composite)) => {
                let mut contacts = Vec::new();
                for child in composite.colliders() {
                    contacts.extend(self.collide(child));
                }
                contacts
            }
            _ => narrowphase::collide_pair(self, other),
        }
    }

    /// The shortest segment connecting this collider to another
    pub fn closest_line_between(&self, other: &Collider) -> Option<Line> {
        match (self, other) {
            (Self::Composite(composite), _) => composite.closest_line_between(other),
            (_, Self::Composite(composite)) => {
                let mut best: Option<Line> = None;
                let mut best_length_sq = f32::MAX;
                for child in composite.colliders() {
                    if let Some(line) = self.closest_line_between(child) {
                        let length_sq = line.length_squared();
                        if best.is_none() || length_sq < best_length_sq {
                            best = Some(line);
                            best_length_sq = length_sq;
                        }
                    }
                }
                best
            }
            _ => narrowphase::closest_line_pair(self, other),
        }
    }

    /// Recompute world geometry from the owning body's transform
    pub fn update(&mut self, transform: &Transform2) {
        match self {
            Self::Circle(c) => c.update(transform),
            Self::Polygon(p) => p.update(transform),
            Self::Edge(e) => e.update(transform),
            Self::Composite(c) => c.update(transform),
        }
    }

    /// Append this shape's debug outline(s)
    pub fn debug_shapes(&self, out: &mut Vec<DebugShape>) {
        match self {
            Self::Circle(c) => c.debug_shapes(out),
            Self::Polygon(p) => p.debug_shapes(out),
            Self::Edge(e) => e.debug_shapes(out),
            Self::Composite(c) => c.debug_shapes(out),
        }
    }
}

impl From<CircleCollider> for Collider {
    fn from(value: CircleCollider) -> Self {
        Self::Circle(value)
    }
}

impl From<PolygonCollider> for Collider {
    fn from(value: PolygonCollider) -> Self {
        Self::Polygon(value)
    }
}

impl From<EdgeCollider> for Collider {
    fn from(value: EdgeCollider) -> Self {
        Self::Edge(value)
    }
}

impl From<CompositeCollider> for Collider {
    fn from(value: CompositeCollider) -> Self {
        Self::Composite(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn circle_at(x: f32, y: f32, r: f32) -> Collider {
        Collider::Circle(CircleCollider::new(Vec2::new(x, y), r).unwrap())
    }

    #[test]
    fn test_primitive_vs_composite_fans_out() {
        let composite = Collider::Composite(CompositeCollider::new(vec![
            circle_at(0.0, 0.0, 1.0),
            circle_at(1.0, 0.0, 1.0),
        ]));
        let probe = circle_at(0.5, 0.5, 1.0);
        // The probe overlaps both children
        let contacts = probe.collide(&composite);
        assert_eq!(contacts.len(), 2);
        assert!(contacts.iter().all(|c| c.a == probe.id()));
    }

    #[test]
    fn test_composite_vs_primitive_matches_reverse_count() {
        let composite = Collider::Composite(CompositeCollider::new(vec![
            circle_at(0.0, 0.0, 1.0),
            circle_at(1.0, 0.0, 1.0),
        ]));
        let probe = circle_at(0.5, 0.5, 1.0);
        assert_eq!(
            composite.collide(&probe).len(),
            probe.collide(&composite).len()
        );
    }

    #[test]
    fn test_closest_line_to_composite_picks_nearest_child() {
        let composite = Collider::Composite(CompositeCollider::new(vec![
            circle_at(10.0, 0.0, 1.0),
            circle_at(3.0, 0.0, 1.0),
        ]));
        let probe = circle_at(0.0, 0.0, 1.0);
        let line = probe.closest_line_between(&composite).unwrap();
        assert_relative_eq!(line.length(), 1.0, epsilon = 1e-5);
        // Oriented from the probe toward the composite
        assert_relative_eq!(line.begin.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(line.end.x, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_update_dispatches_to_every_variant() {
        let mut colliders = vec![
            circle_at(0.0, 0.0, 1.0),
            Collider::Polygon(PolygonCollider::rectangle(Vec2::zeros(), 2.0, 2.0).unwrap()),
            Collider::Edge(
                EdgeCollider::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)).unwrap(),
            ),
            Collider::Composite(CompositeCollider::new(vec![circle_at(0.0, 0.0, 1.0)])),
        ];
        let transform = Transform2::from_position(Vec2::new(0.0, 50.0));
        for collider in &mut colliders {
            collider.update(&transform);
            assert!(collider.bounds().min.y >= 49.0);
        }
    }

    #[test]
    fn test_conversions_into_collider() {
        let collider: Collider = CircleCollider::new(Vec2::zeros(), 1.0).unwrap().into();
        assert!(matches!(collider, Collider::Circle(_)));
    }
}
