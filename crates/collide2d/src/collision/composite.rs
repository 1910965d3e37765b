//! Composite collider aggregating several child colliders
//!
//! A composite owns an ordered collection of child colliders and answers
//! every geometric query as if the union of the child geometries were one
//! shape: queries fan out to each child (recursively, since children may be
//! composite themselves) and the per-child answers are merged.

use std::cell::Cell;

use crate::collision::contact::CollisionContact;
use crate::collision::primitives::{BoundingBox, Line, Projection, Ray};
use crate::collision::{Collider, ColliderId};
use crate::debug::DebugShape;
use crate::foundation::math::{Point2, Transform2, Vec2};

/// A collider made of several child colliders acting as one rigid shape
///
/// Children are owned exclusively; cloning the composite deep-clones every
/// child. The composite keeps a snapshot of the last transform it was
/// updated with as the world anchor for the empty-children fallbacks; with
/// no transform the anchor degrades to the origin.
///
/// Derived bounds are cached behind a dirty flag (`Cell`), so the type is
/// intentionally not `Sync`; queries are per-frame calls from a single
/// simulation thread.
#[derive(Debug, Clone)]
pub struct CompositeCollider {
    id: ColliderId,
    colliders: Vec<Collider>,
    transform: Option<Transform2>,
    bounds_cache: Cell<Option<BoundingBox>>,
    local_bounds_cache: Cell<Option<BoundingBox>>,
}

impl CompositeCollider {
    /// Creates a composite from an ordered list of children (possibly empty)
    pub fn new(colliders: Vec<Collider>) -> Self {
        Self {
            id: ColliderId::next(),
            colliders,
            transform: None,
            bounds_cache: Cell::new(None),
            local_bounds_cache: Cell::new(None),
        }
    }

    /// Unique identity of this collider
    pub fn id(&self) -> ColliderId {
        self.id
    }

    /// Appends a child collider
    pub fn add_collider(&mut self, collider: Collider) {
        self.colliders.push(collider);
        self.invalidate_caches();
    }

    /// Removes every child collider
    pub fn clear_colliders(&mut self) {
        self.colliders.clear();
        self.invalidate_caches();
    }

    /// The live, ordered child list (not a defensive copy)
    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    fn invalidate_caches(&self) {
        self.bounds_cache.set(None);
        self.local_bounds_cache.set(None);
    }

    /// World anchor position: the last transform seen, or the origin
    pub fn world_pos(&self) -> Vec2 {
        self.transform
            .as_ref()
            .map_or_else(Vec2::zeros, |t| t.position)
    }

    /// Union of all child bounds in world space
    ///
    /// An empty composite reports a degenerate box at the world anchor.
    pub fn bounds(&self) -> BoundingBox {
        if let Some(cached) = self.bounds_cache.get() {
            return cached;
        }
        let result = self
            .colliders
            .iter()
            .map(Collider::bounds)
            .reduce(|acc, b| acc.combine(&b))
            .unwrap_or_else(|| BoundingBox::default().translate(self.world_pos()));
        self.bounds_cache.set(Some(result));
        result
    }

    /// Union of all child bounds in local space
    pub fn local_bounds(&self) -> BoundingBox {
        if let Some(cached) = self.local_bounds_cache.get() {
            return cached;
        }
        let result = self
            .colliders
            .iter()
            .map(Collider::local_bounds)
            .reduce(|acc, b| acc.combine(&b))
            .unwrap_or_default();
        self.local_bounds_cache.set(Some(result));
        result
    }

    /// Concatenation of every child's candidate separating axes
    ///
    /// Deliberately not de-duplicated: numerically equal axes from distinct
    /// children only add redundant checks downstream, while dropping one
    /// could be unsound.
    pub fn axes(&self) -> Vec<Vec2> {
        let mut axes = Vec::new();
        for collider in &self.colliders {
            axes.extend(collider.axes());
        }
        axes
    }

    /// Support point: the child point furthest along the given direction
    ///
    /// The first maximal point encountered in child order wins ties.
    /// Returns `None` for an empty composite; callers must guard.
    pub fn furthest_point(&self, direction: Vec2) -> Option<Point2> {
        let mut best: Option<Point2> = None;
        let mut best_distance = f32::MIN;
        for collider in &self.colliders {
            if let Some(point) = collider.furthest_point(direction) {
                let distance = point.coords.dot(&direction);
                if best.is_none() || distance > best_distance {
                    best = Some(point);
                    best_distance = distance;
                }
            }
        }
        best
    }

    /// Total rotational inertia: the sum over children, with the full mass
    /// attributed to each child rather than divided by area
    pub fn inertia(&self, mass: f32) -> f32 {
        self.colliders.iter().map(|c| c.inertia(mass)).sum()
    }

    /// Union interval of every child's projection onto the axis
    pub fn project(&self, axis: Vec2) -> Option<Projection> {
        let mut merged: Option<Projection> = None;
        for collider in &self.colliders {
            if let Some(projection) = collider.project(axis) {
                merged = Some(match merged {
                    Some(acc) => Projection::new(
                        acc.min.min(projection.min),
                        acc.max.max(projection.max),
                    ),
                    None => projection,
                });
            }
        }
        merged
    }

    /// True when any child contains the point (short-circuits)
    pub fn contains(&self, point: Point2) -> bool {
        self.colliders.iter().any(|c| c.contains(point))
    }

    /// Nearest child ray hit along the ray direction
    ///
    /// The first minimal hit encountered in child order wins ties.
    pub fn ray_cast(&self, ray: &Ray, max_distance: Option<f32>) -> Option<Point2> {
        let mut best: Option<Point2> = None;
        let mut best_distance = f32::MAX;
        for collider in &self.colliders {
            if let Some(point) = collider.ray_cast(ray, max_distance) {
                let distance = point.coords.dot(&ray.dir);
                if best.is_none() || distance < best_distance {
                    best = Some(point);
                    best_distance = distance;
                }
            }
        }
        best
    }

    /// All contacts between this composite's children and the other collider
    ///
    /// Composite versus composite tests the full child cross-product;
    /// otherwise each child is tested against the other collider directly.
    /// Contacts are concatenated without de-duplication: overlapping
    /// children striking the same shape intentionally produce a contact
    /// each, and a solver is expected to resolve all of them.
    pub fn collide(&self, other: &Collider) -> Vec<CollisionContact> {
        let mut contacts = Vec::new();
        if let Collider::Composite(other_composite) = other {
            for child_a in &self.colliders {
                for child_b in other_composite.colliders() {
                    contacts.extend(child_a.collide(child_b));
                }
            }
        } else {
            for child in &self.colliders {
                contacts.extend(child.collide(other));
            }
        }
        contacts
    }

    /// The globally shortest connecting segment to the other collider
    ///
    /// Mirrors the fan-out structure of [`collide`](Self::collide) but keeps
    /// only the minimum-length candidate (first minimal candidate wins).
    pub fn closest_line_between(&self, other: &Collider) -> Option<Line> {
        let mut best: Option<Line> = None;
        let mut best_length_sq = f32::MAX;
        let mut consider = |line: Line| {
            let length_sq = line.length_squared();
            if best.is_none() || length_sq < best_length_sq {
                best = Some(line);
                best_length_sq = length_sq;
            }
        };

        if let Collider::Composite(other_composite) = other {
            for child_a in &self.colliders {
                for child_b in other_composite.colliders() {
                    if let Some(line) = child_a.closest_line_between(child_b) {
                        consider(line);
                    }
                }
            }
        } else {
            for child in &self.colliders {
                if let Some(line) = child.closest_line_between(other) {
                    consider(line);
                }
            }
        }
        best
    }

    /// Propagates a transform update to every child
    ///
    /// Each child recomputes its own world geometry from the shared
    /// transform; the composite itself caches nothing but the anchor.
    pub fn update(&mut self, transform: &Transform2) {
        self.transform = Some(transform.clone());
        for collider in &mut self.colliders {
            collider.update(transform);
        }
        self.invalidate_caches();
    }

    /// Appends every child's debug outline, in child order
    pub fn debug_shapes(&self, out: &mut Vec<DebugShape>) {
        for collider in &self.colliders {
            collider.debug_shapes(out);
        }
    }
}
