//! Narrow-phase collision system over a registry of colliders
//!
//! Candidate pairs come from an external broad-phase; this system filters
//! them by collision groups, runs the pairwise shape tests, and tracks which
//! pairs entered or exited collision between frames. It deliberately knows
//! nothing about spatial partitioning.

use std::collections::HashSet;

use log::{debug, trace};
use slotmap::{new_key_type, SlotMap};

use crate::collision::{Collider, CollisionContact, Ray};
use crate::collision_groups::CollisionGroups;
use crate::config::PhysicsConfig;
use crate::foundation::math::{Point2, Transform2};

new_key_type! {
    /// Handle to a collider registered with a [`NarrowPhaseSystem`]
    pub struct ColliderKey;
}

struct ColliderData {
    collider: Collider,
    groups: CollisionGroups,
}

/// Pairwise narrow-phase runner with frame-to-frame pair tracking
pub struct NarrowPhaseSystem {
    colliders: SlotMap<ColliderKey, ColliderData>,
    current_pairs: HashSet<(ColliderKey, ColliderKey)>,
    previous_pairs: HashSet<(ColliderKey, ColliderKey)>,
    config: PhysicsConfig,
}

impl NarrowPhaseSystem {
    /// Creates a system with default tolerances
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Creates a system with explicit tolerances
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            colliders: SlotMap::with_key(),
            current_pairs: HashSet::new(),
            previous_pairs: HashSet::new(),
            config,
        }
    }

    /// Register a collider with its group membership
    pub fn register(&mut self, collider: Collider, groups: CollisionGroups) -> ColliderKey {
        let key = self.colliders.insert(ColliderData { collider, groups });
        debug!("registered collider {:?} ({:?})", key, groups);
        key
    }

    /// Remove a collider, returning it if it was registered
    pub fn unregister(&mut self, key: ColliderKey) -> Option<Collider> {
        let removed = self.colliders.remove(key).map(|data| data.collider);
        if removed.is_some() {
            debug!("unregistered collider {:?}", key);
            self.current_pairs.retain(|&(a, b)| a != key && b != key);
            self.previous_pairs.retain(|&(a, b)| a != key && b != key);
        }
        removed
    }

    /// Access a registered collider
    pub fn get(&self, key: ColliderKey) -> Option<&Collider> {
        self.colliders.get(key).map(|data| &data.collider)
    }

    /// Propagate a body transform to a registered collider
    pub fn update_transform(&mut self, key: ColliderKey, transform: &Transform2) {
        if let Some(data) = self.colliders.get_mut(key) {
            data.collider.update(transform);
        }
    }

    /// Run the narrow phase over broad-phase candidate pairs
    ///
    /// Pairs failing the group filter are skipped before any shape test.
    /// Contacts shallower than the configured slop are discarded. Returns
    /// every surviving contact; also refreshes the entered/exited pair sets.
    pub fn process_pairs(
        &mut self,
        pairs: &[(ColliderKey, ColliderKey)],
    ) -> Vec<CollisionContact> {
        std::mem::swap(&mut self.current_pairs, &mut self.previous_pairs);
        self.current_pairs.clear();

        let mut contacts = Vec::new();
        for &(key_a, key_b) in pairs {
            if key_a == key_b {
                continue;
            }
            let (Some(data_a), Some(data_b)) =
                (self.colliders.get(key_a), self.colliders.get(key_b))
            else {
                continue;
            };
            if !data_a.groups.should_collide(data_b.groups) {
                continue;
            }

            let mut pair_contacts = data_a.collider.collide(&data_b.collider);
            pair_contacts.retain(|c| c.penetration >= self.config.contact_slop);
            if !pair_contacts.is_empty() {
                self.current_pairs.insert(ordered(key_a, key_b));
                contacts.extend(pair_contacts);
            }
        }

        trace!(
            "narrow phase: {} candidate pairs, {} colliding, {} contacts",
            pairs.len(),
            self.current_pairs.len(),
            contacts.len()
        );
        contacts
    }

    /// Pairs that started colliding this frame
    pub fn pairs_entered(&self) -> Vec<(ColliderKey, ColliderKey)> {
        self.current_pairs
            .difference(&self.previous_pairs)
            .copied()
            .collect()
    }

    /// Pairs that stopped colliding this frame
    pub fn pairs_exited(&self) -> Vec<(ColliderKey, ColliderKey)> {
        self.previous_pairs
            .difference(&self.current_pairs)
            .copied()
            .collect()
    }

    /// All currently colliding pairs
    pub fn current_pairs(&self) -> &HashSet<(ColliderKey, ColliderKey)> {
        &self.current_pairs
    }

    /// Cast a ray against every registered collider, returning the nearest hit
    ///
    /// With no explicit bound the configured default maximum applies.
    pub fn ray_cast_closest(
        &self,
        ray: &Ray,
        max_distance: Option<f32>,
    ) -> Option<(ColliderKey, Point2)> {
        let max = max_distance.or(self.config.ray_max_distance);
        let mut best: Option<(ColliderKey, Point2)> = None;
        let mut best_distance = f32::MAX;
        for (key, data) in &self.colliders {
            if let Some(point) = data.collider.ray_cast(ray, max) {
                let distance = point.coords.dot(&ray.dir);
                if best.is_none() || distance < best_distance {
                    best = Some((key, point));
                    best_distance = distance;
                }
            }
        }
        best
    }

    /// Number of registered colliders
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Remove every collider and all pair state
    pub fn clear(&mut self) {
        self.colliders.clear();
        self.current_pairs.clear();
        self.previous_pairs.clear();
    }
}

impl Default for NarrowPhaseSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Store pairs with a stable key order so (a, b) and (b, a) coincide
fn ordered(a: ColliderKey, b: ColliderKey) -> (ColliderKey, ColliderKey) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::CircleCollider;
    use crate::foundation::math::Vec2;
    use approx::assert_relative_eq;

    fn circle_at(x: f32, y: f32, r: f32) -> Collider {
        Collider::Circle(CircleCollider::new(Vec2::new(x, y), r).unwrap())
    }

    #[test]
    fn test_detects_contacts_for_candidate_pairs() {
        let mut system = NarrowPhaseSystem::new();
        let a = system.register(circle_at(0.0, 0.0, 5.0), CollisionGroups::default());
        let b = system.register(circle_at(8.0, 0.0, 5.0), CollisionGroups::default());

        let contacts = system.process_pairs(&[(a, b)]);
        assert_eq!(contacts.len(), 1);
        assert_relative_eq!(contacts[0].penetration, 2.0, epsilon = 1e-5);
        assert_eq!(system.current_pairs().len(), 1);
    }

    #[test]
    fn test_group_filtering_skips_shape_test() {
        let mut system = NarrowPhaseSystem::new();
        let terrain = 1 << 0;
        let actors = 1 << 1;

        // Overlapping shapes, but the groups are incompatible
        let a = system.register(
            circle_at(0.0, 0.0, 5.0),
            CollisionGroups::new(actors, actors),
        );
        let b = system.register(
            circle_at(8.0, 0.0, 5.0),
            CollisionGroups::new(terrain, CollisionGroups::ALL),
        );

        assert!(system.process_pairs(&[(a, b)]).is_empty());
    }

    #[test]
    fn test_entered_and_exited_tracking() {
        let mut system = NarrowPhaseSystem::new();
        let a = system.register(circle_at(0.0, 0.0, 5.0), CollisionGroups::default());
        let b = system.register(circle_at(8.0, 0.0, 5.0), CollisionGroups::default());

        system.process_pairs(&[(a, b)]);
        assert_eq!(system.pairs_entered().len(), 1);
        assert!(system.pairs_exited().is_empty());

        // Move b far away; the pair exits
        system.update_transform(b, &Transform2::from_position(Vec2::new(100.0, 0.0)));
        system.process_pairs(&[(a, b)]);
        assert!(system.pairs_entered().is_empty());
        assert_eq!(system.pairs_exited().len(), 1);
    }

    #[test]
    fn test_contact_slop_discards_shallow_contacts() {
        let config = PhysicsConfig {
            contact_slop: 0.5,
            ..PhysicsConfig::default()
        };
        let mut system = NarrowPhaseSystem::with_config(config);
        // Penetration is only 0.2
        let a = system.register(circle_at(0.0, 0.0, 5.0), CollisionGroups::default());
        let b = system.register(circle_at(9.8, 0.0, 5.0), CollisionGroups::default());
        assert!(system.process_pairs(&[(a, b)]).is_empty());
    }

    #[test]
    fn test_ray_cast_closest_across_registry() {
        let mut system = NarrowPhaseSystem::new();
        system.register(circle_at(9.0, 0.0, 1.0), CollisionGroups::default());
        let near = system.register(circle_at(4.0, 0.0, 1.0), CollisionGroups::default());

        let ray = Ray::new(Point2::origin(), Vec2::x());
        let (key, point) = system.ray_cast_closest(&ray, None).unwrap();
        assert_eq!(key, near);
        assert_relative_eq!(point.x, 3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_unregister_clears_pair_state() {
        let mut system = NarrowPhaseSystem::new();
        let a = system.register(circle_at(0.0, 0.0, 5.0), CollisionGroups::default());
        let b = system.register(circle_at(8.0, 0.0, 5.0), CollisionGroups::default());
        system.process_pairs(&[(a, b)]);

        let removed = system.unregister(b);
        assert!(removed.is_some());
        assert_eq!(system.collider_count(), 1);
        assert!(system.current_pairs().is_empty());
        assert!(system.process_pairs(&[(a, b)]).is_empty());
    }
}
