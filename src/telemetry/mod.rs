//! Continuous state the crane exposes for dashboards and logging.

pub mod recorder;

pub use recorder::*;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::specification::CraneSpecification;
use crate::types::*;

/// Hook load relative to the specification's load curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadStatus {
    /// At or below rated load, full slew speed
    Normal,
    /// Between rated and max load, slew speed reduced
    Overload,
    /// Beyond max load
    Exceeded,
}

impl LoadStatus {
    pub fn classify(load: Mass, spec: &CraneSpecification) -> Self {
        let kg = load.get::<kilogram>();
        if kg <= spec.rated_cargo_weight.get::<kilogram>() {
            LoadStatus::Normal
        } else if kg <= spec.max_cargo_weight.get::<kilogram>() {
            LoadStatus::Overload
        } else {
            LoadStatus::Exceeded
        }
    }
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LoadStatus::Normal => "NORMAL",
            LoadStatus::Overload => "OVERLOAD",
            LoadStatus::Exceeded => "EXCEEDED",
        };
        f.write_str(label)
    }
}

/// Snapshot of the crane after a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CraneTelemetry {
    pub rotation_angle: Angle,
    pub rotation_speed: AngularVelocity,
    /// Slew speed the drive can reach with the current load
    pub rotation_speed_limit: AngularVelocity,

    /// Normalized trolley position in [0, 1]
    pub trolley_position: f64,
    pub trolley_distance: Length,

    /// Normalized hook depth in [0, 1]
    pub hook_depth: f64,
    pub hook_drop: Length,

    pub load: Mass,
    pub load_force: Force,
    pub cargo_attached: bool,
    pub load_status: LoadStatus,
}

impl fmt::Display for CraneTelemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Slew {} at {:.1}°/s | Trolley {:.0}% ({}) | Hook {:.0}% ({}) | Load {} [{}]",
            DisplayAngle(self.rotation_angle),
            self.rotation_speed.get::<degree_per_second>(),
            self.trolley_position * 100.0,
            DisplayLength(self.trolley_distance),
            self.hook_depth * 100.0,
            DisplayLength(self.hook_drop),
            DisplayMass(self.load),
            self.load_status,
        )
    }
}
