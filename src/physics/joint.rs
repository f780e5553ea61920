use nalgebra as na;
use serde::{Deserialize, Serialize};

use crate::types::*;

/// Opaque handle to a rigid body owned by the physics engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyHandle(pub u64);

/// Opaque handle to a constraint owned by the physics engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JointHandle(pub u64);

/// Swing envelope of the hook-to-cargo coupling on each axis
pub const CARGO_SWING_LIMIT_DEGREES: f64 = 15.0;

/// Translational freedom of a joint
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinearMotion {
    /// Anchors stay coincident
    Locked,
    /// Anchors may separate up to the given distance
    Limited(Length),
    Free,
}

/// Spring/damper drive holding the coupled bodies toward their rest pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointDrive {
    /// Spring stiffness (N/m)
    pub spring: f64,
    /// Damping coefficient (N·s/m)
    pub damper: f64,
    /// Ceiling on the force the drive may apply
    pub max_force: Force,
}

impl Default for JointDrive {
    fn default() -> Self {
        Self {
            spring: 5000.0,
            damper: 500.0,
            max_force: Force::new::<kilonewton>(1000.0),
        }
    }
}

/// Everything the physics engine needs to build a hook-to-cargo joint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointSpec {
    /// Anchor in the hook body's local frame (meters)
    pub hook_anchor: na::Point3<f64>,
    /// Anchor in the cargo body's local frame (meters)
    pub cargo_anchor: na::Point3<f64>,
    pub linear: LinearMotion,
    /// Symmetric angular limit applied to every axis
    pub swing_limit: Angle,
    pub drive: JointDrive,
}

impl JointSpec {
    /// Locked-translation coupling with a small swing envelope
    pub fn cargo_coupling(
        hook_anchor: na::Point3<f64>,
        cargo_anchor: na::Point3<f64>,
        drive: JointDrive,
    ) -> Self {
        Self {
            hook_anchor,
            cargo_anchor,
            linear: LinearMotion::Locked,
            swing_limit: Angle::new::<degree>(CARGO_SWING_LIMIT_DEGREES),
            drive,
        }
    }

    pub fn with_swing_limit(mut self, limit: Angle) -> Self {
        self.swing_limit = limit;
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PhysicsError {
    #[error("Unknown rigid body {0:?}")]
    UnknownBody(BodyHandle),

    #[error("Unknown joint {0:?}")]
    UnknownJoint(JointHandle),

    #[error("Physics engine rejected the joint: {0}")]
    Rejected(String),
}

/// Capabilities the crane needs from the surrounding physics engine.
///
/// The hook state machine only ever sees handles; the engine decides how a
/// joint is actually simulated.
pub trait PhysicsWorld {
    /// World pose of a rigid body, if it still exists
    fn body_pose(&self, body: BodyHandle) -> Option<na::Isometry3<f64>>;

    /// Create a joint between the hook body and a cargo body
    fn create_joint(
        &mut self,
        hook: BodyHandle,
        cargo: BodyHandle,
        spec: &JointSpec,
    ) -> Result<JointHandle, PhysicsError>;

    /// Destroy a joint previously returned by `create_joint`
    fn destroy_joint(&mut self, joint: JointHandle) -> Result<(), PhysicsError>;

    /// Instantaneous reaction force carried by a joint.
    /// `None` when the joint no longer connects two bodies.
    fn joint_reaction_force(&self, joint: JointHandle) -> Option<Force>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cargo_coupling_locks_translation() {
        let spec = JointSpec::cargo_coupling(
            na::Point3::new(0.0, -0.5, 0.0),
            na::Point3::new(0.0, 1.2, 0.0),
            JointDrive::default(),
        );

        assert_eq!(spec.linear, LinearMotion::Locked);
        assert_relative_eq!(spec.swing_limit.get::<degree>(), 15.0, epsilon = 1e-9);
        assert_relative_eq!(spec.cargo_anchor.y, 1.2);
    }
}
