//! Collision shapes and narrow-phase queries
//!
//! # Architecture
//!
//! Shapes store their geometry in local coordinates and recompute world
//! geometry when a transform update arrives (GEA 13.3.4: store collision
//! shapes in model space, transform on-the-fly during tests). Every shape
//! answers the same set of geometric queries: bounds, separating axes,
//! support points, projections, containment, ray casts, and pairwise
//! contact generation.
//!
//! # Module Organization
//!
//! - [`primitives`] - Geometry value types (boxes, projections, segments, rays)
//! - [`contact`] - Contact data produced by narrow-phase tests
//! - [`circle`], [`polygon`], [`edge`] - Concrete collider shapes
//! - [`composite`] - A collider aggregating several child colliders
//! - [`collider`] - The shape variant enum implementing the full query set
//! - [`narrowphase`] - Pairwise contact generation between concrete shapes

pub mod circle;
pub mod collider;
pub mod composite;
pub mod contact;
pub mod edge;
pub mod narrowphase;
pub mod polygon;
pub mod primitives;

use std::sync::atomic::{AtomicU64, Ordering};

pub use circle::CircleCollider;
pub use collider::Collider;
pub use composite::CompositeCollider;
pub use contact::CollisionContact;
pub use edge::EdgeCollider;
pub use polygon::PolygonCollider;
pub use primitives::{BoundingBox, Line, Projection, Ray};

/// Unique identity of a collider instance
///
/// Assigned from a process-wide counter at construction time. Cloning a
/// collider preserves its id; contacts identify participants by the ids in
/// effect when the test ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColliderId(u64);

impl ColliderId {
    pub(crate) fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw id value
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Shape construction errors
///
/// Queries on an already-constructed shape never fail; every precondition is
/// checked when the shape is built.
#[derive(thiserror::Error, Debug)]
pub enum ShapeError {
    /// Circle radius was zero, negative, or non-finite
    #[error("circle radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    /// Polygon had fewer than three vertices
    #[error("polygon requires at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    /// Polygon vertices do not describe a convex outline
    #[error("polygon outline is not convex")]
    NonConvexPolygon,

    /// Edge endpoints coincide
    #[error("edge endpoints must be distinct")]
    DegenerateEdge,
}
