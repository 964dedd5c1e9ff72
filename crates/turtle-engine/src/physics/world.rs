use rapier2d::dynamics::{
    CCDSolver, ImpulseJointSet, IntegrationParameters, IslandManager, MultibodyJointSet,
    RigidBodyBuilder, RigidBodyHandle, RigidBodySet,
};
use rapier2d::geometry::{ColliderSet, DefaultBroadPhase, NarrowPhase};
use rapier2d::math::Vector;
use rapier2d::pipeline::{PhysicsPipeline, QueryPipeline};

use crate::coords::Vec2;
use crate::graphics::{DrawMode, Graphics};

use super::units::{vec_to_pixel_units, vec_to_sim_units};
use super::{BodyType, Collider, ColliderHandle, PhysicsError, Shape};

/// rapier state for one world.
struct Simulation {
    pipeline: PhysicsPipeline,
    params: IntegrationParameters,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
    query: QueryPipeline,
}

impl Simulation {
    fn new() -> Self {
        Self {
            pipeline: PhysicsPipeline::new(),
            params: IntegrationParameters::default(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
            query: QueryPipeline::new(),
        }
    }

    fn step(&mut self, gravity: &Vector<f32>, dt: f32) {
        self.params.dt = dt;
        self.pipeline.step(
            gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            Some(&mut self.query),
            &(),
            &(),
        );
    }

    fn remove_body(&mut self, handle: RigidBodyHandle) {
        self.bodies.remove(
            handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }
}

/// Owns a set of colliders and the simulation stepping them.
///
/// Colliders are kept in insertion order, which is also their draw order.
/// Gravity is in meters per second squared with +Y pointing down, matching
/// pixel space.
pub struct World {
    gravity: Vec2,
    colliders: Vec<Collider>,
    next_handle: u64,
    sim: Simulation,
}

impl World {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity,
            colliders: Vec::new(),
            next_handle: 0,
            sim: Simulation::new(),
        }
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    /// Number of live colliders.
    pub fn body_count(&self) -> usize {
        self.colliders.len()
    }

    /// Advances every body by `dt` seconds.
    ///
    /// Negative or non-finite timesteps are rejected without touching any
    /// body. A zero timestep does nothing. Large timesteps are passed through
    /// unclamped.
    pub fn step(&mut self, dt: f32) -> Result<(), PhysicsError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(PhysicsError::InvalidTimestep(dt));
        }
        if dt == 0.0 {
            return Ok(());
        }

        let gravity = Vector::new(self.gravity.x, self.gravity.y);
        self.sim.step(&gravity, dt);
        Ok(())
    }

    /// Creates a dynamic collider whose `anchor` is given in pixels.
    ///
    /// See [`Shape::anchor_offset`] for the anchor convention.
    pub fn create_collider(
        &mut self,
        shape: Shape,
        anchor: Vec2,
    ) -> Result<ColliderHandle, PhysicsError> {
        shape.validate()?;
        if !anchor.is_finite() {
            return Err(PhysicsError::InvalidShapeParameters(format!(
                "position must be finite, got ({}, {})",
                anchor.x, anchor.y
            )));
        }

        let origin = vec_to_sim_units(anchor + shape.anchor_offset());
        let body = RigidBodyBuilder::dynamic()
            .translation(Vector::new(origin.x, origin.y))
            .build();
        let body = self.sim.bodies.insert(body);
        self.sim
            .colliders
            .insert_with_parent(shape.to_rapier(), body, &mut self.sim.bodies);

        let handle = ColliderHandle(self.next_handle);
        self.next_handle += 1;

        self.colliders.push(Collider {
            handle,
            shape,
            body_type: BodyType::Dynamic,
            body,
        });

        log::debug!("collider {handle} created: {shape:?} at ({}, {})", anchor.x, anchor.y);
        Ok(handle)
    }

    /// Circle anchored at its center.
    pub fn new_circle_collider(
        &mut self,
        x: f32,
        y: f32,
        radius: f32,
    ) -> Result<ColliderHandle, PhysicsError> {
        self.create_collider(Shape::Circle { radius }, Vec2::new(x, y))
    }

    /// Rectangle anchored at its top-left corner.
    pub fn new_rectangle_collider(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<ColliderHandle, PhysicsError> {
        self.create_collider(Shape::Rectangle { width, height }, Vec2::new(x, y))
    }

    pub fn set_body_type(
        &mut self,
        handle: ColliderHandle,
        body_type: BodyType,
    ) -> Result<(), PhysicsError> {
        let idx = self.index_of(handle)?;
        let collider = &mut self.colliders[idx];
        if collider.body_type == body_type {
            return Ok(());
        }

        if let Some(body) = self.sim.bodies.get_mut(collider.body) {
            body.set_body_type(body_type.to_rapier(), true);
        }
        collider.body_type = body_type;
        Ok(())
    }

    /// Removes the collider and its body from the simulation.
    ///
    /// Destroying the same handle twice returns
    /// [`PhysicsError::AlreadyDestroyed`] and leaves the world untouched.
    pub fn destroy_collider(&mut self, handle: ColliderHandle) -> Result<(), PhysicsError> {
        let idx = self.index_of(handle)?;
        let collider = self.colliders.remove(idx);
        self.sim.remove_body(collider.body);
        log::debug!("collider {handle} destroyed");
        Ok(())
    }

    /// Destroys every collider.
    pub fn clear(&mut self) {
        for collider in self.colliders.drain(..) {
            self.sim.remove_body(collider.body);
        }
    }

    pub fn collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.colliders.iter().find(|c| c.handle == handle)
    }

    /// Live colliders in insertion order.
    pub fn colliders(&self) -> impl Iterator<Item = &Collider> {
        self.colliders.iter()
    }

    /// Body origin in pixels. For rectangles this is the centroid.
    pub fn position(&self, handle: ColliderHandle) -> Result<Vec2, PhysicsError> {
        let idx = self.index_of(handle)?;
        Ok(self.body_position(&self.colliders[idx]))
    }

    /// Position of the creation anchor in pixels, ignoring rotation.
    pub fn anchor(&self, handle: ColliderHandle) -> Result<Vec2, PhysicsError> {
        let idx = self.index_of(handle)?;
        let collider = &self.colliders[idx];
        Ok(self.body_position(collider) - collider.shape.anchor_offset())
    }

    /// Body rotation in radians.
    pub fn rotation(&self, handle: ColliderHandle) -> Result<f32, PhysicsError> {
        let idx = self.index_of(handle)?;
        Ok(self.body_rotation(&self.colliders[idx]))
    }

    /// Sets the body's linear velocity, in pixels per second.
    pub fn set_linear_velocity(
        &mut self,
        handle: ColliderHandle,
        velocity: Vec2,
    ) -> Result<(), PhysicsError> {
        let idx = self.index_of(handle)?;
        let v = vec_to_sim_units(velocity);
        if let Some(body) = self.sim.bodies.get_mut(self.colliders[idx].body) {
            body.set_linvel(Vector::new(v.x, v.y), true);
        }
        Ok(())
    }

    /// Draws every collider outline with the current graphics color.
    pub fn render(&self, graphics: &mut Graphics) {
        for collider in &self.colliders {
            let center = self.body_position(collider);
            let rotation = self.body_rotation(collider);

            match collider.shape {
                Shape::Circle { radius } => {
                    graphics.circle(DrawMode::Line, center.x, center.y, radius);
                }
                Shape::Rectangle { width, height } => {
                    let top_left = center - collider.shape.anchor_offset();
                    graphics.rectangle_rotated(
                        DrawMode::Line,
                        top_left.x,
                        top_left.y,
                        width,
                        height,
                        rotation,
                    );
                }
            }
        }
    }

    fn index_of(&self, handle: ColliderHandle) -> Result<usize, PhysicsError> {
        self.colliders
            .iter()
            .position(|c| c.handle == handle)
            .ok_or(PhysicsError::AlreadyDestroyed(handle))
    }

    fn body_position(&self, collider: &Collider) -> Vec2 {
        self.sim
            .bodies
            .get(collider.body)
            .map(|b| {
                let t = b.translation();
                vec_to_pixel_units(Vec2::new(t.x, t.y))
            })
            .unwrap_or_default()
    }

    fn body_rotation(&self, collider: &Collider) -> f32 {
        self.sim
            .bodies
            .get(collider.body)
            .map(|b| b.rotation().angle())
            .unwrap_or(0.0)
    }
}

impl Drop for World {
    fn drop(&mut self) {
        // Bodies go before the simulation sets.
        self.clear();
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(Vec2::zero())
    }
}
