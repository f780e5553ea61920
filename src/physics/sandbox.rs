//! Headless physics world.
//!
//! Bodies are posed kinematically by the host and joints are pure
//! bookkeeping. A joint's reaction force is the static weight of the body it
//! carries, which is what a hanging load settles to. Good enough for
//! dashboards, servers and tests that have no real physics engine.

use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use nalgebra as na;

use crate::equipment::{Cargo, Hook};
use crate::physics::joint::*;
use crate::types::*;

#[derive(Debug, Clone)]
pub struct SandboxBody {
    pub pose: na::Isometry3<f64>,
    pub mass: Mass,
}

#[derive(Debug, Clone)]
pub struct SandboxJoint {
    pub hook: BodyHandle,
    pub cargo: BodyHandle,
    pub spec: JointSpec,
}

#[derive(Debug, Default)]
pub struct KinematicWorld {
    next_id: u64,
    bodies: BTreeMap<BodyHandle, SandboxBody>,
    joints: BTreeMap<JointHandle, SandboxJoint>,
    /// (hook body, cargo body) pairs currently overlapping
    overlaps: BTreeSet<(BodyHandle, BodyHandle)>,
    /// Joint ids handed to `destroy_joint` more than once or never created
    rejected_destroys: usize,
}

impl KinematicWorld {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn add_body(&mut self, position: na::Point3<f64>, mass: Mass) -> BodyHandle {
        let handle = BodyHandle(self.allocate_id());
        self.bodies.insert(
            handle,
            SandboxBody {
                pose: na::Isometry3::translation(position.x, position.y, position.z),
                mass,
            },
        );
        handle
    }

    /// Remove a body along with every joint that references it
    pub fn remove_body(&mut self, body: BodyHandle) -> Option<SandboxBody> {
        self.joints.retain(|_, joint| joint.hook != body && joint.cargo != body);
        self.overlaps.retain(|(hook, cargo)| *hook != body && *cargo != body);
        self.bodies.remove(&body)
    }

    pub fn set_body_position(&mut self, body: BodyHandle, position: na::Point3<f64>) -> Result<(), PhysicsError> {
        let entry = self.bodies.get_mut(&body).ok_or(PhysicsError::UnknownBody(body))?;
        entry.pose.translation = na::Translation3::new(position.x, position.y, position.z);
        Ok(())
    }

    /// Move a hook body and drag every body jointed to it so the joint
    /// anchors stay coincident
    pub fn move_hook(&mut self, hook: BodyHandle, position: na::Point3<f64>) -> Result<(), PhysicsError> {
        self.set_body_position(hook, position)?;

        let carried: Vec<(BodyHandle, na::Point3<f64>)> = self
            .joints
            .values()
            .filter(|joint| joint.hook == hook)
            .map(|joint| {
                let anchor = position + joint.spec.hook_anchor.coords;
                (joint.cargo, anchor - joint.spec.cargo_anchor.coords)
            })
            .collect();

        for (cargo, cargo_position) in carried {
            self.set_body_position(cargo, cargo_position)?;
        }
        Ok(())
    }

    pub fn body(&self, body: BodyHandle) -> Option<&SandboxBody> {
        self.bodies.get(&body)
    }

    pub fn joint(&self, joint: JointHandle) -> Option<&SandboxJoint> {
        self.joints.get(&joint)
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    pub fn rejected_destroys(&self) -> usize {
        self.rejected_destroys
    }

    /// Emit trigger enter/exit events to the hook for every cargo whose
    /// attach point crossed the hook's trigger sphere since the last call.
    ///
    /// A real engine does this inside its broad phase; the sandbox has to
    /// diff overlaps itself.
    pub fn dispatch_trigger_events(&mut self, hook: &mut Hook, cargo: &[Rc<Cargo>]) {
        let Some(sphere) = hook.trigger_sphere(&*self) else {
            return;
        };

        for item in cargo {
            let key = (hook.body(), item.body());
            let inside = item
                .attach_point_world(&*self)
                .is_some_and(|point| sphere.contains(&point));
            let was_inside = self.overlaps.contains(&key);

            if inside && !was_inside {
                self.overlaps.insert(key);
                hook.on_proximity_enter(item);
            } else if !inside && was_inside {
                self.overlaps.remove(&key);
                hook.on_proximity_exit(item);
            }
        }
    }
}

impl PhysicsWorld for KinematicWorld {
    fn body_pose(&self, body: BodyHandle) -> Option<na::Isometry3<f64>> {
        self.bodies.get(&body).map(|entry| entry.pose)
    }

    fn create_joint(
        &mut self,
        hook: BodyHandle,
        cargo: BodyHandle,
        spec: &JointSpec,
    ) -> Result<JointHandle, PhysicsError> {
        if !self.bodies.contains_key(&hook) {
            return Err(PhysicsError::UnknownBody(hook));
        }
        if !self.bodies.contains_key(&cargo) {
            return Err(PhysicsError::UnknownBody(cargo));
        }
        if hook == cargo {
            return Err(PhysicsError::Rejected("a body cannot be jointed to itself".into()));
        }

        let handle = JointHandle(self.allocate_id());
        self.joints.insert(
            handle,
            SandboxJoint {
                hook,
                cargo,
                spec: *spec,
            },
        );
        Ok(handle)
    }

    fn destroy_joint(&mut self, joint: JointHandle) -> Result<(), PhysicsError> {
        match self.joints.remove(&joint) {
            Some(_) => Ok(()),
            None => {
                self.rejected_destroys += 1;
                Err(PhysicsError::UnknownJoint(joint))
            }
        }
    }

    fn joint_reaction_force(&self, joint: JointHandle) -> Option<Force> {
        let joint = self.joints.get(&joint)?;
        let carried = self.bodies.get(&joint.cargo)?;
        Some(weight_of(carried.mass))
    }
}
