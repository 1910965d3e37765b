//! Configuration system
//!
//! Numeric tolerances for the narrow phase plus serializable collider
//! descriptions, loadable from TOML or RON files.

pub use serde::{Deserialize, Serialize};

use crate::collision::{
    CircleCollider, Collider, CompositeCollider, EdgeCollider, PolygonCollider, ShapeError,
};
use crate::foundation::math::{Point2, Vec2};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Narrow-phase tolerances
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Contacts with penetration below this depth are discarded
    #[serde(default)]
    pub contact_slop: f32,

    /// Default upper bound for system-level ray casts, `None` for unbounded
    #[serde(default)]
    pub ray_max_distance: Option<f32>,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            contact_slop: 0.0,
            ray_max_distance: None,
        }
    }
}

impl Config for PhysicsConfig {}

/// Serializable collider description
///
/// This is the construction-time validation surface: `build` checks every
/// shape precondition and reports a [`ShapeError`] instead of letting a
/// malformed shape reach query code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ColliderDef {
    /// A circle at a local offset
    Circle {
        /// Local offset of the center
        #[serde(default)]
        offset: [f32; 2],
        /// Circle radius
        radius: f32,
    },
    /// A convex polygon from local-space vertices
    Polygon {
        /// Local offset applied to every vertex
        #[serde(default)]
        offset: [f32; 2],
        /// Vertices in winding order
        points: Vec<[f32; 2]>,
    },
    /// A line segment between two local-space endpoints
    Edge {
        /// Segment start
        begin: [f32; 2],
        /// Segment end
        end: [f32; 2],
    },
    /// A composite of child definitions
    Composite {
        /// Child collider definitions, in order
        children: Vec<ColliderDef>,
    },
}

impl ColliderDef {
    /// Build the described collider, validating every precondition
    pub fn build(&self) -> Result<Collider, ShapeError> {
        match self {
            Self::Circle { offset, radius } => {
                CircleCollider::new(Vec2::new(offset[0], offset[1]), *radius).map(Collider::Circle)
            }
            Self::Polygon { offset, points } => PolygonCollider::new(
                Vec2::new(offset[0], offset[1]),
                points.iter().map(|p| Point2::new(p[0], p[1])).collect(),
            )
            .map(Collider::Polygon),
            Self::Edge { begin, end } => EdgeCollider::new(
                Point2::new(begin[0], begin[1]),
                Point2::new(end[0], end[1]),
            )
            .map(Collider::Edge),
            Self::Composite { children } => {
                let built = children
                    .iter()
                    .map(ColliderDef::build)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Collider::Composite(CompositeCollider::new(built)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_physics_config_from_toml() {
        let config: PhysicsConfig =
            toml::from_str("contact_slop = 0.01\nray_max_distance = 500.0\n").unwrap();
        assert_relative_eq!(config.contact_slop, 0.01);
        assert_relative_eq!(config.ray_max_distance.unwrap(), 500.0);
    }

    #[test]
    fn test_physics_config_defaults_for_missing_fields() {
        let config: PhysicsConfig = toml::from_str("").unwrap();
        assert_relative_eq!(config.contact_slop, 0.0);
        assert!(config.ray_max_distance.is_none());
    }

    #[test]
    fn test_physics_config_file_roundtrip() {
        let path = std::env::temp_dir().join("collide2d_physics_test.toml");
        let path = path.to_string_lossy().to_string();
        let config = PhysicsConfig {
            contact_slop: 0.25,
            ray_max_distance: Some(64.0),
        };
        config.save_to_file(&path).unwrap();
        let loaded = PhysicsConfig::load_from_file(&path).unwrap();
        assert_relative_eq!(loaded.contact_slop, 0.25);
        assert_relative_eq!(loaded.ray_max_distance.unwrap(), 64.0);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_unsupported_format_is_rejected() {
        assert!(matches!(
            PhysicsConfig::default().save_to_file("physics.yaml"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_collider_def_from_ron() {
        let def: ColliderDef = ron::from_str(
            "Composite(children: [\
                Circle(offset: (-2.0, 0.0), radius: 1.0),\
                Circle(offset: (2.0, 0.0), radius: 1.0),\
                Polygon(points: [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)]),\
            ])",
        )
        .unwrap();
        let collider = def.build().unwrap();
        let bounds = collider.bounds();
        assert_relative_eq!(bounds.min.x, -3.0);
        assert_relative_eq!(bounds.max.x, 3.0);
    }

    #[test]
    fn test_collider_def_rejects_invalid_shapes() {
        let bad_radius = ColliderDef::Circle {
            offset: [0.0, 0.0],
            radius: -1.0,
        };
        assert!(matches!(
            bad_radius.build(),
            Err(ShapeError::InvalidRadius(_))
        ));

        // A bad child fails the whole composite
        let nested = ColliderDef::Composite {
            children: vec![ColliderDef::Edge {
                begin: [1.0, 1.0],
                end: [1.0, 1.0],
            }],
        };
        assert!(matches!(nested.build(), Err(ShapeError::DegenerateEdge)));
    }
}
