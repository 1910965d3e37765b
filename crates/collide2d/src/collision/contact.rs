//! Contact data produced by narrow-phase collision tests

use crate::collision::ColliderId;
use crate::foundation::math::{Point2, Vec2};

/// Result of a positive pairwise collision test
///
/// A single test may produce one or two contact points (polygon clipping
/// yields up to two), and a pair of colliders may produce several contacts
/// when either side is a composite. Contacts are never de-duplicated; a
/// solver is expected to resolve all of them.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionContact {
    /// Identity of the first participant
    pub a: ColliderId,
    /// Identity of the second participant
    pub b: ColliderId,
    /// Contact points in world space
    pub points: Vec<Point2>,
    /// Unit separation normal pointing from `a` toward `b`
    pub normal: Vec2,
    /// Penetration depth along the normal, non-negative
    pub penetration: f32,
}

impl CollisionContact {
    /// Minimum translation vector separating `a` from `b`
    ///
    /// Moving `a` by `-mtv()` (or `b` by `+mtv()`) resolves the overlap.
    pub fn mtv(&self) -> Vec2 {
        self.normal * self.penetration
    }

    /// The same contact seen from `b`'s perspective
    pub fn flipped(mut self) -> Self {
        std::mem::swap(&mut self.a, &mut self.b);
        self.normal = -self.normal;
        self
    }
}
