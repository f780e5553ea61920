use std::rc::{Rc, Weak};

use nalgebra as na;

use crate::equipment::Cargo;
use crate::physics::{
    nearest_candidate, BodyHandle, JointDrive, JointHandle, JointSpec, PhysicsError, PhysicsWorld,
    ProximityTracker, TriggerSphere, TriggerVolume, CARGO_SWING_LIMIT_DEGREES,
};
use crate::types::*;

/// Hook geometry and coupling parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HookConfig {
    /// Coupling point in the hook body's local frame (meters)
    pub attach_offset: na::Vector3<f64>,

    /// Radius of the trigger sphere around the coupling point
    pub trigger_radius: Length,

    pub drive: JointDrive,

    /// Swing allowed on each axis once cargo is coupled
    pub swing_limit: Angle,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            attach_offset: na::Vector3::new(0.0, -0.5, 0.0),
            trigger_radius: Length::new::<meter>(2.0),
            drive: JointDrive::default(),
            swing_limit: Angle::new::<degree>(CARGO_SWING_LIMIT_DEGREES),
        }
    }
}

/// Exclusive owner of the hook-to-cargo joint.
///
/// Deliberately not `Clone`: a hook holds at most one of these.
#[derive(Debug)]
struct CargoJoint {
    handle: JointHandle,
}

impl CargoJoint {
    fn release(self, physics: &mut dyn PhysicsWorld) {
        if let Err(e) = physics.destroy_joint(self.handle) {
            log::warn!("Joint {:?} was already gone on release: {}", self.handle, e);
        }
    }
}

#[derive(Debug)]
enum AttachmentState {
    Unattached,
    Attached {
        cargo: Weak<Cargo>,
        joint: CargoJoint,
    },
}

/// Result of a toggle request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentChange {
    Attached,
    Detached,
}

#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("Hook already carries cargo")]
    AlreadyAttached,

    #[error("No attachable cargo within reach of the hook")]
    NoCandidate,

    #[error("Hook is not carrying any cargo")]
    NotAttached,

    #[error("Hook body {0:?} is missing from the physics world")]
    BodyMissing(BodyHandle),

    #[error("No hook is mounted on the trolley")]
    NotMounted,

    #[error("Physics engine error: {0}")]
    Physics(#[from] PhysicsError),
}

/// Cargo-attachment end effector hanging from the trolley.
///
/// State machine: `Unattached` ⇄ `Attached(cargo)`. The joint handle only
/// exists inside the `Attached` state, so the two can never disagree.
#[derive(Debug)]
pub struct Hook {
    body: BodyHandle,
    config: HookConfig,
    proximity: Box<dyn ProximityTracker>,
    state: AttachmentState,

    /// Target offset of the cable joint; y carries the hook depth
    suspension_target: na::Vector3<f64>,
}

impl Hook {
    pub fn new(body: BodyHandle, config: HookConfig) -> Self {
        Self {
            body,
            config,
            proximity: Box::new(TriggerVolume::new()),
            state: AttachmentState::Unattached,
            suspension_target: na::Vector3::zeros(),
        }
    }

    /// Replace the default enter/exit tracker
    pub fn with_proximity_tracker(mut self, tracker: Box<dyn ProximityTracker>) -> Self {
        self.proximity = tracker;
        self
    }

    pub fn body(&self) -> BodyHandle {
        self.body
    }

    pub fn config(&self) -> &HookConfig {
        &self.config
    }

    pub fn on_proximity_enter(&mut self, cargo: &Rc<Cargo>) {
        self.proximity.enter(cargo);
    }

    pub fn on_proximity_exit(&mut self, cargo: &Rc<Cargo>) {
        self.proximity.exit(cargo);
    }

    /// Live cargo currently inside the trigger volume
    pub fn nearby_cargo(&self) -> Vec<Rc<Cargo>> {
        self.proximity.candidates()
    }

    /// Coupling point in world space
    pub fn attach_point_world(&self, physics: &dyn PhysicsWorld) -> Option<na::Point3<f64>> {
        let pose = physics.body_pose(self.body)?;
        Some(pose * na::Point3::from(self.config.attach_offset))
    }

    /// Trigger volume the host should register with its physics engine
    pub fn trigger_sphere(&self, physics: &dyn PhysicsWorld) -> Option<TriggerSphere> {
        Some(TriggerSphere {
            center: self.attach_point_world(physics)?,
            radius: self.config.trigger_radius.get::<meter>(),
        })
    }

    pub fn has_cargo_attached(&self) -> bool {
        matches!(self.state, AttachmentState::Attached { .. })
    }

    pub fn attached_cargo(&self) -> Option<Rc<Cargo>> {
        match &self.state {
            AttachmentState::Attached { cargo, .. } => cargo.upgrade(),
            AttachmentState::Unattached => None,
        }
    }

    pub fn joint_handle(&self) -> Option<JointHandle> {
        match &self.state {
            AttachmentState::Attached { joint, .. } => Some(joint.handle),
            AttachmentState::Unattached => None,
        }
    }

    /// Couple the nearest attachable cargo in the trigger volume.
    ///
    /// Fails without touching any state when cargo is already attached or
    /// nothing eligible is in reach.
    pub fn attach(&mut self, physics: &mut dyn PhysicsWorld) -> Result<Rc<Cargo>, HookError> {
        if self.has_cargo_attached() {
            log::debug!("Attach ignored: hook {:?} already carries cargo", self.body);
            return Err(HookError::AlreadyAttached);
        }

        let origin = match self.attach_point_world(&*physics) {
            Some(origin) => origin,
            None => {
                log::warn!("Hook body {:?} has no pose; cannot attach", self.body);
                return Err(HookError::BodyMissing(self.body));
            }
        };

        let candidates: Vec<(Rc<Cargo>, na::Point3<f64>)> = self
            .proximity
            .candidates()
            .into_iter()
            .filter(|cargo| cargo.is_attachable())
            .filter_map(|cargo| {
                let point = cargo.attach_point_world(&*physics)?;
                Some((cargo, point))
            })
            .collect();

        let (cargo, distance) = nearest_candidate(&origin, candidates).ok_or(HookError::NoCandidate)?;

        let spec = JointSpec::cargo_coupling(
            na::Point3::from(self.config.attach_offset),
            cargo.attach_point_local(),
            self.config.drive,
        )
        .with_swing_limit(self.config.swing_limit);

        let handle = physics.create_joint(self.body, cargo.body(), &spec)?;

        cargo.on_attached();
        log::debug!("Hook {:?} coupled {} at {:.2} m", self.body, cargo.name, distance);

        self.state = AttachmentState::Attached {
            cargo: Rc::downgrade(&cargo),
            joint: CargoJoint { handle },
        };

        Ok(cargo)
    }

    /// Release the attached cargo and destroy the joint.
    ///
    /// Returns the cargo that was released, or `None` if the scene had
    /// already destroyed it.
    pub fn detach(&mut self, physics: &mut dyn PhysicsWorld) -> Result<Option<Rc<Cargo>>, HookError> {
        match std::mem::replace(&mut self.state, AttachmentState::Unattached) {
            AttachmentState::Unattached => {
                log::debug!("Detach ignored: hook {:?} is empty", self.body);
                Err(HookError::NotAttached)
            }
            AttachmentState::Attached { cargo, joint } => {
                joint.release(physics);
                let cargo = cargo.upgrade();
                if let Some(cargo) = &cargo {
                    cargo.on_detached();
                }
                Ok(cargo)
            }
        }
    }

    /// Teardown: drop any coupling and destroy its joint. A no-op when empty.
    pub fn release(&mut self, physics: &mut dyn PhysicsWorld) -> Option<Rc<Cargo>> {
        if !self.has_cargo_attached() {
            return None;
        }
        self.detach(physics).ok().flatten()
    }

    pub fn toggle_attachment(&mut self, physics: &mut dyn PhysicsWorld) -> Result<AttachmentChange, HookError> {
        if self.has_cargo_attached() {
            self.detach(physics).map(|_| AttachmentChange::Detached)
        } else {
            self.attach(physics).map(|_| AttachmentChange::Attached)
        }
    }

    /// Per-tick housekeeping: release the joint of cargo the scene has
    /// destroyed and forget dead proximity entries.
    pub fn tick(&mut self, physics: &mut dyn PhysicsWorld) {
        let cargo_gone = matches!(
            &self.state,
            AttachmentState::Attached { cargo, .. } if cargo.strong_count() == 0
        );

        if cargo_gone {
            log::warn!("Attached cargo was destroyed; releasing hook {:?}", self.body);
            if let AttachmentState::Attached { joint, .. } =
                std::mem::replace(&mut self.state, AttachmentState::Unattached)
            {
                joint.release(physics);
            }
        }

        self.proximity.retain_live();
    }

    /// Reaction force magnitude carried by the joint, zero when empty
    pub fn current_load(&self, physics: &dyn PhysicsWorld) -> Force {
        match &self.state {
            AttachmentState::Attached { cargo, joint } if cargo.strong_count() > 0 => physics
                .joint_reaction_force(joint.handle)
                .map(|force| force.abs())
                .unwrap_or_else(|| Force::new::<newton>(0.0)),
            _ => Force::new::<newton>(0.0),
        }
    }

    /// Mass of the attached cargo, zero when empty
    pub fn current_load_mass(&self) -> Mass {
        self.attached_cargo()
            .map(|cargo| cargo.mass())
            .unwrap_or_else(|| Mass::new::<kilogram>(0.0))
    }

    pub fn suspension_target(&self) -> na::Vector3<f64> {
        self.suspension_target
    }

    /// Write the vertical component of the cable joint's target offset
    pub fn set_suspension_height(&mut self, y: f64) {
        self.suspension_target.y = y;
    }
}

impl Drop for Hook {
    // No physics world here: the joint is orphaned, the cargo flag is not
    fn drop(&mut self) {
        if let AttachmentState::Attached { cargo, joint } = &self.state {
            if let Some(cargo) = cargo.upgrade() {
                cargo.on_detached();
            }
            log::warn!(
                "Hook {:?} dropped while attached; joint {:?} left orphaned in the physics world",
                self.body,
                joint.handle
            );
        }
    }
}
