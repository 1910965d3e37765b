//! Math utilities and types
//!
//! Provides fundamental math types for 2D collision geometry.

pub use nalgebra::{Matrix2, Rotation2, Unit, Vector2};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// 2x2 matrix type
pub type Mat2 = Matrix2<f32>;

/// Transform representing position, rotation, and scale in the plane
#[derive(Debug, Clone, PartialEq)]
pub struct Transform2 {
    /// Position in world space
    pub position: Vec2,

    /// Rotation angle in radians (counter-clockwise)
    pub rotation: f32,

    /// Scale factors
    pub scale: Vec2,
}

impl Default for Transform2 {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl Transform2 {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec2, rotation: f32) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Apply this transform to a point (scale, then rotate, then translate)
    pub fn apply_to_point(&self, point: Point2) -> Point2 {
        let scaled = point.coords.component_mul(&self.scale);
        let rotated = Rotation2::new(self.rotation) * scaled;
        Point2::from(rotated + self.position)
    }

    /// Apply this transform to a direction vector (scale and rotate, no translation)
    pub fn apply_to_vector(&self, vector: Vec2) -> Vec2 {
        let scaled = vector.component_mul(&self.scale);
        Rotation2::new(self.rotation) * scaled
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::Vec2;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * super::constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * super::constants::RAD_TO_DEG
    }

    /// Counter-clockwise perpendicular of a vector
    pub fn perp(v: Vec2) -> Vec2 {
        Vec2::new(-v.y, v.x)
    }

    /// 2D cross product (z component of the 3D cross product)
    pub fn cross(a: Vec2, b: Vec2) -> f32 {
        a.x * b.y - a.y * b.x
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }
}
