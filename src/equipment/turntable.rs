use nalgebra as na;

use crate::kinematics::rotation_y;
use crate::physics::{move_towards, normalize_angle_degrees};
use crate::specification::CraneSpecification;
use crate::types::*;

/// Commanded slew direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationIntent {
    #[default]
    Idle,
    /// Counter-clockwise seen from above (negative angle)
    Left,
    /// Clockwise seen from above (positive angle)
    Right,
}

impl RotationIntent {
    fn sign(self) -> f64 {
        match self {
            RotationIntent::Idle => 0.0,
            RotationIntent::Left => -1.0,
            RotationIntent::Right => 1.0,
        }
    }
}

/// Rotating base carrying the jib.
///
/// Slew speed ramps toward a load-dependent target and the angle wraps
/// into (-180°, 180°].
#[derive(Debug, Clone)]
pub struct Turntable {
    spec: CraneSpecification,
    intent: RotationIntent,

    /// Degrees, always within (-180, 180]
    angle: f64,

    /// Signed deg/s
    speed: f64,

    /// Last load reported to the slew drive (kg, >= 0)
    cargo_weight: f64,
}

impl Turntable {
    pub fn new(spec: CraneSpecification) -> Self {
        Self {
            spec,
            intent: RotationIntent::Idle,
            angle: 0.0,
            speed: 0.0,
            cargo_weight: 0.0,
        }
    }

    pub fn specification(&self) -> &CraneSpecification {
        &self.spec
    }

    pub fn rotate_left(&mut self) {
        self.intent = RotationIntent::Left;
    }

    pub fn rotate_right(&mut self) {
        self.intent = RotationIntent::Right;
    }

    /// Let the drive brake to a stop at the deceleration rate
    pub fn stop_rotation(&mut self) {
        self.intent = RotationIntent::Idle;
    }

    /// Stop dead: intent cleared and speed zeroed without braking
    pub fn halt(&mut self) {
        self.intent = RotationIntent::Idle;
        self.speed = 0.0;
    }

    pub fn set_rotation_angle(&mut self, angle: Angle) {
        self.angle = normalize_angle_degrees(angle.get::<degree>());
    }

    pub fn set_cargo_weight(&mut self, weight: Mass) {
        let kg = weight.get::<kilogram>();
        self.cargo_weight = if kg.is_finite() { kg.max(0.0) } else { 0.0 };
    }

    pub fn intent(&self) -> RotationIntent {
        self.intent
    }

    pub fn rotation_angle(&self) -> Angle {
        Angle::new::<degree>(self.angle)
    }

    pub fn rotation_speed(&self) -> AngularVelocity {
        AngularVelocity::new::<degree_per_second>(self.speed)
    }

    pub fn cargo_weight(&self) -> Mass {
        Mass::new::<kilogram>(self.cargo_weight)
    }

    /// Top slew speed for the current cargo weight
    pub fn adjusted_rotation_speed(&self) -> AngularVelocity {
        self.spec.adjusted_rotation_speed(self.cargo_weight())
    }

    /// Yaw of the jib about the vertical axis
    pub fn orientation(&self) -> na::Matrix3<f64> {
        rotation_y(self.rotation_angle())
    }

    /// Advance one fixed step with the hook load reported by the trolley
    pub fn tick(&mut self, dt: Time, cargo_weight: Mass) {
        self.set_cargo_weight(cargo_weight);

        let dt = dt.get::<second>();
        if !(dt > 0.0) {
            return;
        }

        let target = self.intent.sign() * self.adjusted_rotation_speed().get::<degree_per_second>();
        self.speed = self.ramp_speed(target, dt);
        self.angle = normalize_angle_degrees(self.angle + self.speed * dt);
    }

    fn ramp_speed(&self, target: f64, dt: f64) -> f64 {
        let accel = self.spec.rotation_acceleration.get::<degree_per_second_squared>();
        let decel = self.spec.rotation_deceleration.get::<degree_per_second_squared>();

        let reversing = self.speed * target < 0.0;
        if reversing {
            // Brake to standstill first; never cross zero within one step
            return move_towards(self.speed, 0.0, decel * dt);
        }

        let speeding_up = target.abs() > self.speed.abs();
        let rate = if speeding_up { accel } else { decel };
        move_towards(self.speed, target, rate * dt)
    }
}
