use std::rc::Rc;

use nalgebra as na;

use crate::equipment::cargo::Cargo;
use crate::equipment::hook::{AttachmentChange, HookError};
use crate::equipment::trolley::Trolley;
use crate::equipment::turntable::Turntable;
use crate::kinematics::jib_to_world;
use crate::physics::PhysicsWorld;
use crate::specification::{CraneSpecification, SpecificationError};
use crate::telemetry::{CraneTelemetry, LoadStatus};
use crate::types::*;

/// Slewing jib crane: a turntable carrying a trolley that carries the hook
#[derive(Debug)]
pub struct Crane {
    spec: CraneSpecification,

    /// Slew pivot in world space
    base: na::Point3<f64>,

    turntable: Turntable,
    trolley: Trolley,
}

impl Crane {
    /// Assemble a crane around `trolley`; the trolley's frame is the jib
    pub fn new(
        spec: CraneSpecification,
        base: na::Point3<f64>,
        trolley: Trolley,
    ) -> Result<Self, SpecificationError> {
        spec.validate()?;

        Ok(Self {
            spec,
            base,
            turntable: Turntable::new(spec),
            trolley,
        })
    }

    pub fn specification(&self) -> &CraneSpecification {
        &self.spec
    }

    pub fn base(&self) -> na::Point3<f64> {
        self.base
    }

    pub fn turntable(&self) -> &Turntable {
        &self.turntable
    }

    pub fn turntable_mut(&mut self) -> &mut Turntable {
        &mut self.turntable
    }

    pub fn trolley(&self) -> &Trolley {
        &self.trolley
    }

    pub fn trolley_mut(&mut self) -> &mut Trolley {
        &mut self.trolley
    }

    /// Advance one fixed step.
    ///
    /// Trolley and hook settle first so the turntable sees this tick's load.
    pub fn tick(&mut self, dt: Time, physics: &mut dyn PhysicsWorld) {
        self.trolley.tick(dt);
        if let Some(hook) = self.trolley.hook_mut() {
            hook.tick(physics);
        }

        let load = self.trolley.current_hook_load();
        self.turntable.tick(dt, load);
    }

    /// Trolley position in world space
    pub fn trolley_world_position(&self) -> na::Point3<f64> {
        jib_to_world(
            self.base,
            self.turntable.rotation_angle(),
            self.trolley.local_position(),
        )
    }

    /// Where the cable joint is driving the hook, in world space
    pub fn hook_world_position(&self) -> na::Point3<f64> {
        self.trolley_world_position() + self.turntable.orientation() * self.trolley.hook_target_position()
    }

    pub fn telemetry(&self, physics: &dyn PhysicsWorld) -> CraneTelemetry {
        let load = self.trolley.current_hook_load();

        CraneTelemetry {
            rotation_angle: self.turntable.rotation_angle(),
            rotation_speed: self.turntable.rotation_speed(),
            rotation_speed_limit: self.turntable.adjusted_rotation_speed(),
            trolley_position: self.trolley.current_position(),
            trolley_distance: self.trolley.travel_distance(),
            hook_depth: self.trolley.current_hook_depth(),
            hook_drop: self.trolley.hook_drop(),
            load,
            load_force: self.trolley.current_hook_load_force(physics),
            cargo_attached: self.trolley.has_cargo_attached(),
            load_status: LoadStatus::classify(load, &self.spec),
        }
    }

    pub fn rotate_left(&mut self) {
        self.turntable.rotate_left();
    }

    pub fn rotate_right(&mut self) {
        self.turntable.rotate_right();
    }

    pub fn stop_rotation(&mut self) {
        self.turntable.stop_rotation();
    }

    pub fn move_trolley_forward(&mut self) {
        self.trolley.move_forward();
    }

    pub fn move_trolley_backward(&mut self) {
        self.trolley.move_backward();
    }

    pub fn stop_trolley(&mut self) {
        self.trolley.stop_movement();
    }

    pub fn lower_hook(&mut self) {
        self.trolley.move_hook_down();
    }

    pub fn raise_hook(&mut self) {
        self.trolley.move_hook_up();
    }

    pub fn stop_hook(&mut self) {
        self.trolley.stop_hook_movement();
    }

    pub fn toggle_cargo_attachment(
        &mut self,
        physics: &mut dyn PhysicsWorld,
    ) -> Result<AttachmentChange, HookError> {
        self.trolley.toggle_cargo_attachment(physics)
    }

    pub fn attach_cargo(&mut self, physics: &mut dyn PhysicsWorld) -> Result<Rc<Cargo>, HookError> {
        self.trolley.attach_cargo(physics)
    }

    pub fn detach_cargo(&mut self, physics: &mut dyn PhysicsWorld) -> Result<Option<Rc<Cargo>>, HookError> {
        self.trolley.detach_cargo(physics)
    }

    /// Clear every motion intent; the turntable stops without braking
    pub fn halt(&mut self) {
        self.turntable.halt();
        self.trolley.stop_movement();
        self.trolley.stop_hook_movement();
    }

    /// Halt everything and release any coupled cargo before the crane goes away
    pub fn shutdown(&mut self, physics: &mut dyn PhysicsWorld) -> Option<Rc<Cargo>> {
        self.halt();
        let released = self.trolley.hook_mut()?.release(physics);
        if let Some(cargo) = &released {
            log::info!("Crane shut down; released {}", cargo.name);
        }
        released
    }
}
