//! # collide2d
//!
//! 2D collision shape composition and narrow-phase collision queries.
//!
//! ## Features
//!
//! - **Shape Queries**: Bounds, separating axes, support points, projections,
//!   containment, and ray casts over circles, convex polygons, and edges
//! - **Composite Colliders**: Aggregate several shapes into one logical rigid
//!   body that answers every query as a single shape
//! - **Contact Generation**: Pairwise narrow-phase tests producing contact
//!   points, normals, and penetration depths
//! - **Pair Filtering**: Collision group categories and masks
//! - **Config Files**: Shape definitions and tolerances in TOML or RON
//!
//! ## Quick Start
//!
//! ```rust
//! use collide2d::prelude::*;
//!
//! fn main() -> Result<(), ShapeError> {
//!     // A dumbbell: two discs joined by a thin bar, acting as one body
//!     let body = Collider::Composite(CompositeCollider::new(vec![
//!         Collider::Circle(CircleCollider::new(Vec2::new(-2.0, 0.0), 1.0)?),
//!         Collider::Circle(CircleCollider::new(Vec2::new(2.0, 0.0), 1.0)?),
//!         Collider::Polygon(PolygonCollider::rectangle(Vec2::zeros(), 4.0, 0.5)?),
//!     ]));
//!
//!     let wall = Collider::Polygon(PolygonCollider::rectangle(Vec2::new(3.5, 0.0), 2.0, 6.0)?);
//!     for contact in body.collide(&wall) {
//!         println!("hit at {:?}, depth {}", contact.points, contact.penetration);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod collision;
pub mod collision_groups;
pub mod collision_system;
pub mod config;
pub mod debug;
pub mod foundation;

/// Common imports for crate users
pub mod prelude {
    pub use crate::collision::{
        BoundingBox, CircleCollider, Collider, ColliderId, CollisionContact, CompositeCollider,
        EdgeCollider, Line, PolygonCollider, Projection, Ray, ShapeError,
    };
    pub use crate::collision_groups::CollisionGroups;
    pub use crate::collision_system::{ColliderKey, NarrowPhaseSystem};
    pub use crate::config::{ColliderDef, Config, PhysicsConfig};
    pub use crate::debug::DebugShape;
    pub use crate::foundation::math::{Point2, Transform2, Vec2};
}
