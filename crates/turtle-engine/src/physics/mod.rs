//! Rigid-body physics façade.
//!
//! Applications work in pixels; `rapier2d` works in meters. Every coordinate
//! crossing the [`World`] API is converted through [`units`].
//!
//! A [`World`] owns its colliders. Colliders are addressed by
//! [`ColliderHandle`]s that are only meaningful through the world that issued
//! them, so nothing can outlive the simulation it belongs to.

mod collider;
mod error;
pub mod units;
mod world;

pub use collider::{BodyType, Collider, ColliderHandle, Shape};
pub use error::PhysicsError;
pub use world::World;
