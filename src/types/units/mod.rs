mod display;
mod explicit_unit_values;

pub use uom::si::f64::{
    Acceleration, Angle, AngularAcceleration, AngularVelocity, Force, Length, Mass, Ratio, Time,
    Velocity,
};

pub use uom::si::{
    acceleration::{foot_per_second_squared, meter_per_second_squared, standard_gravity},
    angle::{degree, radian, revolution},
    angular_acceleration::{degree_per_second_squared, radian_per_second_squared},
    angular_velocity::{degree_per_second, radian_per_second, revolution_per_minute},
    force::{kilogram_force, kilonewton, newton, pound_force},
    length::{centimeter, foot, inch, meter, millimeter, yard},
    mass::{gram, kilogram, megagram as metric_ton, pound, ton_long, ton_short},
    ratio::ratio,
    time::{millisecond, minute, second},
    velocity::{
        foot_per_minute, foot_per_second, kilometer_per_hour, meter_per_second, mile_per_hour,
    },
};

pub use display::{
    DisplayAngle, DisplayAngularVelocity, DisplayForce, DisplayLength, DisplayMass,
    DisplayVelocity,
};
pub use explicit_unit_values::{
    AngularAccelerationValue, AngularVelocityValue, LengthValue, MassValue, UnitError,
    VelocityValue, WithUnit,
};
