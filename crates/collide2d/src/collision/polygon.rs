//! Convex polygon collider shape

use crate::collision::primitives::{BoundingBox, Line, Projection, Ray};
use crate::collision::{ColliderId, ShapeError};
use crate::debug::DebugShape;
use crate::foundation::math::utils::cross;
use crate::foundation::math::{Point2, Transform2, Vec2};

const CONVEXITY_EPSILON: f32 = 1e-6;

/// A convex polygon collision shape
///
/// Vertices are stored in local space (counter-clockwise; clockwise input is
/// reversed at construction) and transformed to world space on update.
#[derive(Debug, Clone)]
pub struct PolygonCollider {
    id: ColliderId,
    offset: Vec2,
    local_points: Vec<Point2>,
    world_points: Vec<Point2>,
}

impl PolygonCollider {
    /// Creates a convex polygon collider from local-space vertices
    pub fn new(offset: Vec2, points: Vec<Point2>) -> Result<Self, ShapeError> {
        if points.len() < 3 {
            return Err(ShapeError::TooFewVertices(points.len()));
        }

        let mut local_points = points;
        if signed_area(&local_points) < 0.0 {
            local_points.reverse();
        }
        if !is_convex(&local_points) {
            return Err(ShapeError::NonConvexPolygon);
        }

        let world_points = local_points
            .iter()
            .map(|p| Point2::from(p.coords + offset))
            .collect();

        Ok(Self {
            id: ColliderId::next(),
            offset,
            local_points,
            world_points,
        })
    }

    /// Convenience constructor for an axis-aligned box shape
    pub fn rectangle(offset: Vec2, width: f32, height: f32) -> Result<Self, ShapeError> {
        let hw = width * 0.5;
        let hh = height * 0.5;
        Self::new(
            offset,
            vec![
                Point2::new(-hw, -hh),
                Point2::new(hw, -hh),
                Point2::new(hw, hh),
                Point2::new(-hw, hh),
            ],
        )
    }

    /// Unique identity of this collider
    pub fn id(&self) -> ColliderId {
        self.id
    }

    /// World-space vertices in counter-clockwise order
    pub fn points(&self) -> &[Point2] {
        &self.world_points
    }

    /// World position of the shape (vertex average)
    pub fn world_pos(&self) -> Vec2 {
        let sum = self
            .world_points
            .iter()
            .fold(Vec2::zeros(), |acc, p| acc + p.coords);
        sum / self.world_points.len() as f32
    }

    /// World-space bounding box
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_points(self.world_points.iter().copied()).unwrap_or_default()
    }

    /// Local-space bounding box
    pub fn local_bounds(&self) -> BoundingBox {
        BoundingBox::from_points(
            self.local_points
                .iter()
                .map(|p| Point2::from(p.coords + self.offset)),
        )
        .unwrap_or_default()
    }

    /// Candidate separating axes: one outward unit normal per edge
    pub fn axes(&self) -> Vec<Vec2> {
        let n = self.world_points.len();
        let mut axes = Vec::with_capacity(n);
        for i in 0..n {
            let edge = self.world_points[(i + 1) % n] - self.world_points[i];
            // Outward normal for counter-clockwise winding
            if let Some(normal) = Vec2::new(edge.y, -edge.x).try_normalize(f32::EPSILON) {
                axes.push(normal);
            }
        }
        axes
    }

    /// World-space edges in winding order
    pub fn edges(&self) -> Vec<Line> {
        let n = self.world_points.len();
        (0..n)
            .map(|i| Line::new(self.world_points[i], self.world_points[(i + 1) % n]))
            .collect()
    }

    /// Vertex furthest along the given direction (first maximal vertex wins)
    pub fn furthest_point(&self, direction: Vec2) -> Point2 {
        let mut best = self.world_points[0];
        let mut best_distance = best.coords.dot(&direction);
        for point in &self.world_points[1..] {
            let distance = point.coords.dot(&direction);
            if distance > best_distance {
                best = *point;
                best_distance = distance;
            }
        }
        best
    }

    /// Rotational inertia approximated from the local bounding dimensions
    pub fn inertia(&self, mass: f32) -> f32 {
        let bounds = self.local_bounds();
        let w = bounds.width();
        let h = bounds.height();
        mass * (w * w + h * h) / 12.0
    }

    /// Test whether a point lies inside the polygon (boundary inclusive)
    pub fn contains(&self, point: Point2) -> bool {
        let n = self.world_points.len();
        for i in 0..n {
            let edge = self.world_points[(i + 1) % n] - self.world_points[i];
            if cross(edge, point - self.world_points[i]) < -CONVEXITY_EPSILON {
                return false;
            }
        }
        true
    }

    /// Test ray intersection, returning the nearest hit point on the outline
    pub fn ray_cast(&self, ray: &Ray, max_distance: Option<f32>) -> Option<Point2> {
        let mut nearest: Option<f32> = None;
        for edge in self.edges() {
            if let Some(t) = ray.intersect_segment(edge.begin, edge.end) {
                if nearest.map_or(true, |best| t < best) {
                    nearest = Some(t);
                }
            }
        }
        let t = nearest?;
        if let Some(max) = max_distance {
            if t > max {
                return None;
            }
        }
        Some(ray.point_at(t))
    }

    /// Project the polygon onto an axis
    pub fn project(&self, axis: Vec2) -> Projection {
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for point in &self.world_points {
            let dot = point.coords.dot(&axis);
            min = min.min(dot);
            max = max.max(dot);
        }
        Projection::new(min, max)
    }

    /// Recompute world geometry from the owning body's transform
    pub fn update(&mut self, transform: &Transform2) {
        for (world, local) in self.world_points.iter_mut().zip(&self.local_points) {
            *world = transform.apply_to_point(Point2::from(local.coords + self.offset));
        }
    }

    /// Append this shape's debug outline
    pub fn debug_shapes(&self, out: &mut Vec<DebugShape>) {
        out.push(DebugShape::Polyline {
            points: self.world_points.clone(),
            closed: true,
        });
    }
}

/// Twice the signed area of the outline; positive for counter-clockwise
fn signed_area(points: &[Point2]) -> f32 {
    let n = points.len();
    let mut area = 0.0;
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        area += p.x * q.y - q.x * p.y;
    }
    area
}

/// Convexity test for a counter-clockwise outline (collinear edges allowed)
fn is_convex(points: &[Point2]) -> bool {
    let n = points.len();
    let mut any_turn = false;
    for i in 0..n {
        let e1 = points[(i + 1) % n] - points[i];
        let e2 = points[(i + 2) % n] - points[(i + 1) % n];
        let turn = cross(e1, e2);
        if turn < -CONVEXITY_EPSILON {
            return false;
        }
        if turn > CONVEXITY_EPSILON {
            any_turn = true;
        }
    }
    any_turn
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> PolygonCollider {
        PolygonCollider::rectangle(Vec2::zeros(), 2.0, 2.0).unwrap()
    }

    #[test]
    fn test_rejects_too_few_vertices() {
        let result = PolygonCollider::new(
            Vec2::zeros(),
            vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)],
        );
        assert!(matches!(result, Err(ShapeError::TooFewVertices(2))));
    }

    #[test]
    fn test_rejects_non_convex_outline() {
        let result = PolygonCollider::new(
            Vec2::zeros(),
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(4.0, 0.0),
                Point2::new(2.0, 1.0), // Dent
                Point2::new(4.0, 4.0),
                Point2::new(0.0, 4.0),
            ],
        );
        assert!(matches!(result, Err(ShapeError::NonConvexPolygon)));
    }

    #[test]
    fn test_clockwise_input_is_reversed() {
        let polygon = PolygonCollider::new(
            Vec2::zeros(),
            vec![
                Point2::new(0.0, 1.0),
                Point2::new(1.0, 0.0),
                Point2::new(0.0, 0.0),
            ],
        )
        .unwrap();
        assert!(signed_area(polygon.points()) > 0.0);
    }

    #[test]
    fn test_axes_one_per_edge() {
        let square = unit_square();
        let axes = square.axes();
        assert_eq!(axes.len(), 4);
        for axis in &axes {
            assert_relative_eq!(axis.norm(), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_axes_point_outward() {
        let square = unit_square();
        // Every axis should point away from the polygon center
        for (axis, edge) in square.axes().iter().zip(square.edges()) {
            let outward = edge.midpoint() - square.bounds().center();
            assert!(axis.dot(&outward) > 0.0);
        }
    }

    #[test]
    fn test_contains_inside_and_boundary() {
        let square = unit_square();
        assert!(square.contains(Point2::new(0.0, 0.0)));
        assert!(square.contains(Point2::new(1.0, 1.0)));
        assert!(!square.contains(Point2::new(1.5, 0.0)));
    }

    #[test]
    fn test_furthest_point_picks_extreme_vertex() {
        let square = unit_square();
        let p = square.furthest_point(Vec2::new(1.0, 1.0));
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 1.0);
    }

    #[test]
    fn test_ray_cast_nearest_edge() {
        let square = unit_square();
        let ray = Ray::new(Point2::new(-5.0, 0.0), Vec2::new(1.0, 0.0));
        let hit = square.ray_cast(&ray, None).unwrap();
        assert_relative_eq!(hit.x, -1.0, epsilon = 1e-5);

        assert!(square.ray_cast(&ray, Some(3.0)).is_none());
    }

    #[test]
    fn test_projection_on_diagonal_axis() {
        let square = unit_square();
        let axis = Vec2::new(1.0, 1.0).normalize();
        let proj = square.project(axis);
        let expected = 2.0 / std::f32::consts::SQRT_2;
        assert_relative_eq!(proj.min, -expected, epsilon = 1e-5);
        assert_relative_eq!(proj.max, expected, epsilon = 1e-5);
    }

    #[test]
    fn test_update_rotates_vertices() {
        let mut square = unit_square();
        square.update(&Transform2::from_position_rotation(
            Vec2::new(10.0, 0.0),
            std::f32::consts::FRAC_PI_4,
        ));
        let bounds = square.bounds();
        let half_diagonal = std::f32::consts::SQRT_2;
        assert_relative_eq!(bounds.min.x, 10.0 - half_diagonal, epsilon = 1e-5);
        assert_relative_eq!(bounds.max.x, 10.0 + half_diagonal, epsilon = 1e-5);
    }

    #[test]
    fn test_inertia_from_bounds() {
        let square = unit_square();
        // 10 * (4 + 4) / 12
        assert_relative_eq!(square.inertia(10.0), 80.0 / 12.0, epsilon = 1e-5);
    }
}
