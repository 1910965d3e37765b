//! Circle collider shape

use crate::collision::primitives::{BoundingBox, Projection, Ray};
use crate::collision::{ColliderId, ShapeError};
use crate::debug::DebugShape;
use crate::foundation::math::{Point2, Transform2, Vec2};

/// A circular collision shape
///
/// Stores a local-space offset from the owning body's origin plus a radius;
/// the world-space center is recomputed on every transform update. The
/// radius is in world units and is not scaled by the transform.
#[derive(Debug, Clone)]
pub struct CircleCollider {
    id: ColliderId,
    offset: Vec2,
    radius: f32,
    center: Point2,
}

impl CircleCollider {
    /// Creates a circle collider at a local offset with the given radius
    pub fn new(offset: Vec2, radius: f32) -> Result<Self, ShapeError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ShapeError::InvalidRadius(radius));
        }
        Ok(Self {
            id: ColliderId::next(),
            offset,
            radius,
            center: Point2::from(offset),
        })
    }

    /// Unique identity of this collider
    pub fn id(&self) -> ColliderId {
        self.id
    }

    /// Circle radius
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// World-space center
    pub fn center(&self) -> Point2 {
        self.center
    }

    /// World position of the shape (its center)
    pub fn world_pos(&self) -> Vec2 {
        self.center.coords
    }

    /// World-space bounding box
    pub fn bounds(&self) -> BoundingBox {
        let r = Vec2::new(self.radius, self.radius);
        BoundingBox::new(self.center - r, self.center + r)
    }

    /// Local-space bounding box around the offset
    pub fn local_bounds(&self) -> BoundingBox {
        let r = Vec2::new(self.radius, self.radius);
        let local_center = Point2::from(self.offset);
        BoundingBox::new(local_center - r, local_center + r)
    }

    /// Candidate separating axes
    ///
    /// A circle contributes none; the circle-versus-polygon test supplies the
    /// center-to-closest-feature axis itself.
    pub fn axes(&self) -> Vec<Vec2> {
        Vec::new()
    }

    /// Point on the circle furthest along the given direction
    pub fn furthest_point(&self, direction: Vec2) -> Point2 {
        match direction.try_normalize(f32::EPSILON) {
            Some(dir) => self.center + dir * self.radius,
            None => self.center,
        }
    }

    /// Rotational inertia for a solid disc of the given mass
    pub fn inertia(&self, mass: f32) -> f32 {
        0.5 * mass * self.radius * self.radius
    }

    /// Test whether a point lies inside the circle (boundary inclusive)
    pub fn contains(&self, point: Point2) -> bool {
        (point - self.center).norm_squared() <= self.radius * self.radius
    }

    /// Closest point on the circle's boundary to the given point
    pub fn closest_surface_point(&self, point: Point2) -> Point2 {
        let dir = (point - self.center)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vec2::x);
        self.center + dir * self.radius
    }

    /// Test ray intersection with this circle
    ///
    /// Solves `|origin + t*dir - center|^2 = radius^2` and returns the hit
    /// point at the nearest non-negative root, bounded by `max_distance`.
    pub fn ray_cast(&self, ray: &Ray, max_distance: Option<f32>) -> Option<Point2> {
        let oc = ray.origin - self.center;

        let a = ray.dir.dot(&ray.dir); // 1.0 for a normalized direction
        let b = 2.0 * oc.dot(&ray.dir);
        let c = oc.dot(&oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_discriminant = discriminant.sqrt();
        let t1 = (-b - sqrt_discriminant) / (2.0 * a);
        let t2 = (-b + sqrt_discriminant) / (2.0 * a);

        // Nearest non-negative root; both negative means the circle is behind
        let t = if t1 >= 0.0 {
            t1
        } else if t2 >= 0.0 {
            t2
        } else {
            return None;
        };

        if let Some(max) = max_distance {
            if t > max {
                return None;
            }
        }

        Some(ray.point_at(t))
    }

    /// Project the circle onto an axis (axis expected to be unit length)
    pub fn project(&self, axis: Vec2) -> Projection {
        let center = self.center.coords.dot(&axis);
        Projection::new(center - self.radius, center + self.radius)
    }

    /// Recompute world geometry from the owning body's transform
    pub fn update(&mut self, transform: &Transform2) {
        self.center = transform.apply_to_point(Point2::from(self.offset));
    }

    /// Append this shape's debug outline
    pub fn debug_shapes(&self, out: &mut Vec<DebugShape>) {
        out.push(DebugShape::Circle {
            center: self.center,
            radius: self.radius,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn circle(x: f32, y: f32, r: f32) -> CircleCollider {
        let mut c = CircleCollider::new(Vec2::zeros(), r).unwrap();
        c.update(&Transform2::from_position(Vec2::new(x, y)));
        c
    }

    #[test]
    fn test_rejects_bad_radius() {
        assert!(CircleCollider::new(Vec2::zeros(), 0.0).is_err());
        assert!(CircleCollider::new(Vec2::zeros(), -1.0).is_err());
        assert!(CircleCollider::new(Vec2::zeros(), f32::NAN).is_err());
    }

    #[test]
    fn test_bounds_enclose_circle() {
        let c = circle(2.0, 3.0, 1.5);
        let bounds = c.bounds();
        assert_relative_eq!(bounds.min.x, 0.5);
        assert_relative_eq!(bounds.max.y, 4.5);
    }

    #[test]
    fn test_contains_boundary_inclusive() {
        let c = circle(0.0, 0.0, 2.0);
        assert!(c.contains(Point2::new(1.0, 1.0)));
        assert!(c.contains(Point2::new(2.0, 0.0)));
        assert!(!c.contains(Point2::new(2.1, 0.0)));
    }

    #[test]
    fn test_furthest_point_along_direction() {
        let c = circle(1.0, 0.0, 3.0);
        let p = c.furthest_point(Vec2::new(0.0, 5.0));
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 3.0);
    }

    #[test]
    fn test_ray_cast_hits_near_surface() {
        let c = circle(5.0, 0.0, 1.0);
        let ray = Ray::new(Point2::origin(), Vec2::new(1.0, 0.0));
        let hit = c.ray_cast(&ray, None).unwrap();
        assert_relative_eq!(hit.x, 4.0, epsilon = 1e-5);
        assert_relative_eq!(hit.y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_ray_cast_respects_max_distance() {
        let c = circle(5.0, 0.0, 1.0);
        let ray = Ray::new(Point2::origin(), Vec2::new(1.0, 0.0));
        assert!(c.ray_cast(&ray, Some(3.0)).is_none());
        assert!(c.ray_cast(&ray, Some(4.5)).is_some());
    }

    #[test]
    fn test_ray_cast_misses_behind() {
        let c = circle(-5.0, 0.0, 1.0);
        let ray = Ray::new(Point2::origin(), Vec2::new(1.0, 0.0));
        assert!(c.ray_cast(&ray, None).is_none());
    }

    #[test]
    fn test_projection_spans_diameter() {
        let c = circle(3.0, 0.0, 2.0);
        let proj = c.project(Vec2::new(1.0, 0.0));
        assert_relative_eq!(proj.min, 1.0);
        assert_relative_eq!(proj.max, 5.0);
    }

    #[test]
    fn test_inertia_solid_disc() {
        let c = circle(0.0, 0.0, 2.0);
        assert_relative_eq!(c.inertia(10.0), 20.0);
    }

    #[test]
    fn test_update_applies_offset_and_rotation() {
        let mut c = CircleCollider::new(Vec2::new(1.0, 0.0), 1.0).unwrap();
        c.update(&Transform2::from_position_rotation(
            Vec2::new(10.0, 0.0),
            std::f32::consts::FRAC_PI_2,
        ));
        assert_relative_eq!(c.center().x, 10.0, epsilon = 1e-6);
        assert_relative_eq!(c.center().y, 1.0, epsilon = 1e-6);
    }
}
