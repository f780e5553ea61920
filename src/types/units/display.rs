use std::fmt;

use crate::types::units::*;

#[derive(Debug)]
pub struct DisplayForce(pub Force);
#[derive(Debug)]
pub struct DisplayMass(pub Mass);
#[derive(Debug)]
pub struct DisplayAngle(pub Angle);
#[derive(Debug)]
pub struct DisplayLength(pub Length);
#[derive(Debug)]
pub struct DisplayVelocity(pub Velocity);
#[derive(Debug)]
pub struct DisplayAngularVelocity(pub AngularVelocity);

impl fmt::Display for DisplayForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kn = self.0.get::<kilonewton>();
        let kgf = self.0.get::<kilogram_force>();
        write!(f, "{:.2} kN ({:.0} kgf)", kn, kgf)
    }
}

impl fmt::Display for DisplayMass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kg = self.0.get::<kilogram>();
        let tonnes = self.0.get::<metric_ton>();
        write!(f, "{:.0} kg ({:.2} t)", kg, tonnes)
    }
}

impl fmt::Display for DisplayAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}°", self.0.get::<degree>())
    }
}

impl fmt::Display for DisplayLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meters = self.0.get::<meter>();
        let feet = self.0.get::<foot>();
        write!(f, "{:.2} m ({:.1} ft)", meters, feet)
    }
}

impl fmt::Display for DisplayVelocity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mps = self.0.get::<meter_per_second>();
        let fpm = self.0.get::<foot_per_minute>();
        write!(f, "{:.2} m/s ({:.0} ft/min)", mps, fpm)
    }
}

impl fmt::Display for DisplayAngularVelocity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dps = self.0.get::<degree_per_second>();
        let rpm = self.0.get::<revolution_per_minute>();
        write!(f, "{:.2}°/s ({:.2} rpm)", dps, rpm)
    }
}
