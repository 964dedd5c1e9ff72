use std::fmt;
use std::str::FromStr;

use rapier2d::prelude::{ColliderBuilder, RigidBodyType};

use crate::coords::Vec2;

use super::units::to_sim_units;
use super::PhysicsError;

const RESTITUTION: f32 = 0.3;
const FRICTION: f32 = 0.5;
const DENSITY: f32 = 1.0;

/// Simulated body behavior. Kinematic bodies are not modeled.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BodyType {
    Static,
    Dynamic,
}

impl BodyType {
    pub(super) fn to_rapier(self) -> RigidBodyType {
        match self {
            BodyType::Static => RigidBodyType::Fixed,
            BodyType::Dynamic => RigidBodyType::Dynamic,
        }
    }
}

impl FromStr for BodyType {
    type Err = PhysicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(BodyType::Static),
            "dynamic" => Ok(BodyType::Dynamic),
            _ => Err(PhysicsError::InvalidBodyType(s.to_string())),
        }
    }
}

impl TryFrom<RigidBodyType> for BodyType {
    type Error = PhysicsError;

    fn try_from(value: RigidBodyType) -> Result<Self, Self::Error> {
        match value {
            RigidBodyType::Fixed => Ok(BodyType::Static),
            RigidBodyType::Dynamic => Ok(BodyType::Dynamic),
            other => Err(PhysicsError::InvalidBodyType(format!("{other:?}"))),
        }
    }
}

impl fmt::Display for BodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyType::Static => f.write_str("static"),
            BodyType::Dynamic => f.write_str("dynamic"),
        }
    }
}

/// Collider geometry in pixels. Fixed at creation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shape {
    Circle { radius: f32 },
    Rectangle { width: f32, height: f32 },
}

impl Shape {
    pub(super) fn validate(&self) -> Result<(), PhysicsError> {
        let ok = |v: f32| v.is_finite() && v >= 0.0;
        match *self {
            Shape::Circle { radius } if !ok(radius) => Err(PhysicsError::InvalidShapeParameters(
                format!("circle radius must be non-negative, got {radius}"),
            )),
            Shape::Rectangle { width, height } if !ok(width) || !ok(height) => {
                Err(PhysicsError::InvalidShapeParameters(format!(
                    "rectangle size must be non-negative, got {width}x{height}"
                )))
            }
            _ => Ok(()),
        }
    }

    /// Offset in pixels from the API anchor to the body origin.
    ///
    /// Circles are anchored at their center. Rectangles are anchored at their
    /// top-left corner while the body sits at the centroid.
    pub fn anchor_offset(&self) -> Vec2 {
        match *self {
            Shape::Circle { .. } => Vec2::zero(),
            Shape::Rectangle { width, height } => Vec2::new(width * 0.5, height * 0.5),
        }
    }

    pub(super) fn to_rapier(self) -> rapier2d::geometry::Collider {
        let builder = match self {
            Shape::Circle { radius } => ColliderBuilder::ball(to_sim_units(radius)),
            Shape::Rectangle { width, height } => {
                ColliderBuilder::cuboid(to_sim_units(width * 0.5), to_sim_units(height * 0.5))
            }
        };

        builder
            .restitution(RESTITUTION)
            .friction(FRICTION)
            .density(DENSITY)
            .build()
    }
}

/// Stable identifier of a collider inside the [`World`](super::World) that created it.
///
/// Handles are never reused, so a handle to a destroyed collider stays dead.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ColliderHandle(pub(super) u64);

impl fmt::Display for ColliderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One simulated body with exactly one shape.
#[derive(Debug, Clone)]
pub struct Collider {
    pub(super) handle: ColliderHandle,
    pub(super) shape: Shape,
    pub(super) body_type: BodyType,
    pub(super) body: rapier2d::dynamics::RigidBodyHandle,
}

impl Collider {
    pub fn handle(&self) -> ColliderHandle {
        self.handle
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn body_type(&self) -> BodyType {
        self.body_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_type_parses_known_names() {
        assert_eq!("static".parse::<BodyType>(), Ok(BodyType::Static));
        assert_eq!("Dynamic".parse::<BodyType>(), Ok(BodyType::Dynamic));
    }

    #[test]
    fn kinematic_is_not_a_body_type() {
        assert_eq!(
            "kinematic".parse::<BodyType>(),
            Err(PhysicsError::InvalidBodyType("kinematic".to_string()))
        );
        assert!(BodyType::try_from(RigidBodyType::KinematicPositionBased).is_err());
    }

    #[test]
    fn negative_sizes_are_rejected() {
        assert!(Shape::Circle { radius: -1.0 }.validate().is_err());
        assert!(Shape::Rectangle { width: 10.0, height: -2.0 }.validate().is_err());
        assert!(Shape::Circle { radius: f32::NAN }.validate().is_err());
        assert!(Shape::Rectangle { width: 0.0, height: 0.0 }.validate().is_ok());
    }

    #[test]
    fn rectangle_anchor_is_half_size() {
        let s = Shape::Rectangle { width: 50.0, height: 20.0 };
        assert_eq!(s.anchor_offset(), Vec2::new(25.0, 10.0));
        assert_eq!(Shape::Circle { radius: 5.0 }.anchor_offset(), Vec2::zero());
    }
}
