use std::cell::Cell;

use nalgebra as na;

use crate::physics::{BodyHandle, PhysicsWorld};
use crate::types::*;

/// A load the hook can pick up.
///
/// Cargo is created and destroyed by the scene (as `Rc<Cargo>`). The hook only
/// ever holds weak references to it and owns the joint, never the cargo.
#[derive(Debug)]
pub struct Cargo {
    pub name: String,

    /// Rigid body the coupling joint binds to
    body: BodyHandle,

    mass: Mass,

    /// Where the hook couples, in the cargo body's local frame.
    /// `None` means the body origin.
    attach_point: Option<na::Point3<f64>>,

    attachable: bool,

    /// Mirrors the hook's view of the coupling
    attached: Cell<bool>,
}

#[derive(Debug, thiserror::Error)]
pub enum CargoError {
    #[error("Cargo {name} must have a positive mass, got {mass}")]
    NonPositiveMass {
        name: String,
        mass: DisplayMass,
    },
}

impl Cargo {
    pub fn new(name: impl Into<String>, body: BodyHandle, mass: Mass) -> Result<Self, CargoError> {
        let name = name.into();
        if !(mass.get::<kilogram>() > 0.0) {
            return Err(CargoError::NonPositiveMass {
                name,
                mass: DisplayMass(mass),
            });
        }

        Ok(Self {
            name,
            body,
            mass,
            attach_point: None,
            attachable: true,
            attached: Cell::new(false),
        })
    }

    pub fn with_attach_point(mut self, local_point: na::Point3<f64>) -> Self {
        self.attach_point = Some(local_point);
        self
    }

    pub fn with_attachable(mut self, attachable: bool) -> Self {
        self.attachable = attachable;
        self
    }

    pub fn body(&self) -> BodyHandle {
        self.body
    }

    pub fn mass(&self) -> Mass {
        self.mass
    }

    /// Weight under standard gravity (mass × g)
    pub fn weight(&self) -> Force {
        weight_of(self.mass)
    }

    /// Attach point in the cargo's local frame
    pub fn attach_point_local(&self) -> na::Point3<f64> {
        self.attach_point.unwrap_or_else(na::Point3::origin)
    }

    /// Attach point in world space, if the body still exists
    pub fn attach_point_world(&self, physics: &dyn PhysicsWorld) -> Option<na::Point3<f64>> {
        let pose = physics.body_pose(self.body)?;
        Some(pose * self.attach_point_local())
    }

    /// Can a hook couple to this cargo right now
    pub fn is_attachable(&self) -> bool {
        self.attachable && !self.attached.get()
    }

    pub fn is_attached(&self) -> bool {
        self.attached.get()
    }

    pub(crate) fn on_attached(&self) {
        self.attached.set(true);
        log::info!(
            "Cargo {} attached (mass: {}, weight: {})",
            self.name,
            DisplayMass(self.mass),
            DisplayForce(self.weight())
        );
    }

    pub(crate) fn on_detached(&self) {
        self.attached.set(false);
        log::info!("Cargo {} detached", self.name);
    }
}
