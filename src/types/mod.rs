pub mod units;
pub mod conversion;

pub use units::*;
pub use conversion::*;

// Re-export nalgebra
pub use nalgebra as na;

/// Gravitational acceleration applied to cargo mass
pub fn standard_gravity_acceleration() -> Acceleration {
    Acceleration::new::<standard_gravity>(1.0)
}

/// Weight (force) of a mass under standard gravity
pub fn weight_of(mass: Mass) -> Force {
    Force::new::<newton>(
        mass.get::<kilogram>() * standard_gravity_acceleration().get::<meter_per_second_squared>(),
    )
}
