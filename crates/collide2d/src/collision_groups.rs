//! Collision group system for filtering collider pairs
//!
//! Based on Game Engine Architecture 3rd Edition, Section 13.3.8:
//! "Most games need to filter collisions... This is typically done via
//! collision layers or groups."

use serde::{Deserialize, Serialize};

/// Category and mask bits deciding which collider pairs are tested
///
/// A pair is tested only when each side's category is present in the other
/// side's mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionGroups {
    /// Which group(s) this collider belongs to
    pub category: u32,
    /// Which group(s) this collider is willing to collide with
    pub mask: u32,
}

impl CollisionGroups {
    /// No group bits
    pub const NONE: u32 = 0;

    /// All group bits
    pub const ALL: u32 = 0xFFFF_FFFF;

    /// Creates a group membership from category and mask bits
    pub fn new(category: u32, mask: u32) -> Self {
        Self { category, mask }
    }

    /// Check whether two colliders should be tested against each other
    ///
    /// The test is mutual: each category must be in the other's mask.
    pub fn should_collide(self, other: CollisionGroups) -> bool {
        (self.category & other.mask) != 0 && (other.category & self.mask) != 0
    }

    /// Helper to combine multiple group bits into a mask
    pub fn mask(groups: &[u32]) -> u32 {
        groups.iter().fold(0, |acc, &group| acc | group)
    }
}

impl Default for CollisionGroups {
    /// Collides with everything
    fn default() -> Self {
        Self::new(Self::ALL, Self::ALL)
    }
}
