//! Physical limits of a crane: load capacity, drive speeds and travel ranges.
//!
//! A `CraneSpecification` is loaded once and then only read. Every
//! component keeps its own copy.

pub mod file;

pub use file::*;

use crate::physics::{clamp01, lerp};
use crate::types::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CraneSpecification {
    // Turntable
    pub base_rotation_speed: AngularVelocity,
    /// Floor the slew speed never drops below, however heavy the load
    pub min_rotation_speed: AngularVelocity,
    pub rotation_acceleration: AngularAcceleration,
    pub rotation_deceleration: AngularAcceleration,

    // Load limits
    /// Heaviest load the turntable slews at full speed
    pub rated_cargo_weight: Mass,
    /// Load at which slew speed reaches its maximum reduction
    pub max_cargo_weight: Mass,
    /// Fraction of base speed lost at `max_cargo_weight`, in [0, 1]
    pub max_speed_reduction: f64,

    // Trolley
    pub trolley_move_speed: Velocity,
    pub trolley_max_distance: Length,

    // Hook
    pub hook_move_speed: Velocity,
    pub hook_max_depth: Length,
}

impl Default for CraneSpecification {
    fn default() -> Self {
        Self {
            base_rotation_speed: AngularVelocity::new::<degree_per_second>(30.0),
            min_rotation_speed: AngularVelocity::new::<degree_per_second>(10.0),
            rotation_acceleration: AngularAcceleration::new::<degree_per_second_squared>(60.0),
            rotation_deceleration: AngularAcceleration::new::<degree_per_second_squared>(90.0),
            rated_cargo_weight: Mass::new::<kilogram>(10000.0),
            max_cargo_weight: Mass::new::<kilogram>(40000.0),
            max_speed_reduction: 0.75,
            trolley_move_speed: Velocity::new::<meter_per_second>(5.0),
            trolley_max_distance: Length::new::<meter>(20.0),
            hook_move_speed: Velocity::new::<meter_per_second>(3.0),
            hook_max_depth: Length::new::<meter>(15.0),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SpecificationError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} cannot be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("Rated cargo weight {rated} exceeds maximum cargo weight {max}")]
    RatedExceedsMax { rated: DisplayMass, max: DisplayMass },

    #[error("Minimum rotation speed {min} exceeds base rotation speed {base}")]
    MinSpeedExceedsBase {
        min: DisplayAngularVelocity,
        base: DisplayAngularVelocity,
    },

    #[error("Maximum speed reduction must be within [0, 1], got {0}")]
    ReductionOutOfRange(f64),
}

fn check_positive(field: &'static str, value: f64) -> Result<(), SpecificationError> {
    if !value.is_finite() {
        return Err(SpecificationError::NotFinite { field });
    }
    if value <= 0.0 {
        return Err(SpecificationError::NonPositive { field, value });
    }
    Ok(())
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), SpecificationError> {
    if !value.is_finite() {
        return Err(SpecificationError::NotFinite { field });
    }
    if value < 0.0 {
        return Err(SpecificationError::Negative { field, value });
    }
    Ok(())
}

impl CraneSpecification {
    /// Check the limits are physically coherent.
    ///
    /// `rated == max` is accepted (the load curve degenerates to "no
    /// reduction") but logged.
    pub fn validate(&self) -> Result<(), SpecificationError> {
        let base = self.base_rotation_speed.get::<degree_per_second>();
        let min = self.min_rotation_speed.get::<degree_per_second>();

        check_positive("base_rotation_speed", base)?;
        check_positive("min_rotation_speed", min)?;
        check_positive(
            "rotation_acceleration",
            self.rotation_acceleration.get::<degree_per_second_squared>(),
        )?;
        check_positive(
            "rotation_deceleration",
            self.rotation_deceleration.get::<degree_per_second_squared>(),
        )?;
        check_positive("trolley_move_speed", self.trolley_move_speed.get::<meter_per_second>())?;
        check_positive("hook_move_speed", self.hook_move_speed.get::<meter_per_second>())?;
        check_non_negative("trolley_max_distance", self.trolley_max_distance.get::<meter>())?;
        check_non_negative("hook_max_depth", self.hook_max_depth.get::<meter>())?;

        let rated = self.rated_cargo_weight.get::<kilogram>();
        let max = self.max_cargo_weight.get::<kilogram>();
        check_non_negative("rated_cargo_weight", rated)?;
        check_non_negative("max_cargo_weight", max)?;

        if min > base {
            return Err(SpecificationError::MinSpeedExceedsBase {
                min: DisplayAngularVelocity(self.min_rotation_speed),
                base: DisplayAngularVelocity(self.base_rotation_speed),
            });
        }

        if rated > max {
            return Err(SpecificationError::RatedExceedsMax {
                rated: DisplayMass(self.rated_cargo_weight),
                max: DisplayMass(self.max_cargo_weight),
            });
        }
        if rated == max {
            log::warn!(
                "Rated and maximum cargo weight are both {}; slew speed will not degrade with load",
                DisplayMass(self.max_cargo_weight)
            );
        }

        if !(0.0..=1.0).contains(&self.max_speed_reduction) {
            return Err(SpecificationError::ReductionOutOfRange(self.max_speed_reduction));
        }

        Ok(())
    }

    /// Position of `load` between rated and max weight, in [0, 1].
    ///
    /// Zero at or below rated load and when the range is degenerate.
    pub fn overload_factor(&self, load: Mass) -> f64 {
        let rated = self.rated_cargo_weight.get::<kilogram>();
        let max = self.max_cargo_weight.get::<kilogram>();
        let weight = load.get::<kilogram>().max(0.0);

        if weight <= rated || max <= rated {
            return 0.0;
        }

        clamp01((weight - rated) / (max - rated))
    }

    /// Slew speed the turntable can reach while carrying `load`
    pub fn adjusted_rotation_speed(&self, load: Mass) -> AngularVelocity {
        let base = self.base_rotation_speed.get::<degree_per_second>();
        let min = self.min_rotation_speed.get::<degree_per_second>();

        let reduction = lerp(0.0, self.max_speed_reduction, self.overload_factor(load));
        let adjusted = if reduction > 0.0 {
            (base * (1.0 - reduction)).max(min)
        } else {
            base
        };

        AngularVelocity::new::<degree_per_second>(adjusted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn kg(value: f64) -> Mass {
        Mass::new::<kilogram>(value)
    }

    #[test]
    fn test_default_specification_is_valid() {
        CraneSpecification::default().validate().unwrap();
    }

    #[test]
    fn test_adjusted_speed_at_rated_load_is_base() {
        let spec = CraneSpecification::default();
        assert_relative_eq!(spec.adjusted_rotation_speed(kg(0.0)).get::<degree_per_second>(), 30.0);
        assert_relative_eq!(spec.adjusted_rotation_speed(kg(10000.0)).get::<degree_per_second>(), 30.0);
    }

    #[test]
    fn test_adjusted_speed_halfway_overload() {
        let spec = CraneSpecification::default();
        let speed = spec.adjusted_rotation_speed(kg(25000.0));
        assert_relative_eq!(speed.get::<degree_per_second>(), 18.75, epsilon = 1e-9);
    }

    #[test]
    fn test_adjusted_speed_beyond_max_holds_full_reduction() {
        let spec = CraneSpecification::default();
        // 30 * (1 - 0.75) = 7.5, floored at the 10 deg/s minimum
        assert_relative_eq!(spec.adjusted_rotation_speed(kg(40000.0)).get::<degree_per_second>(), 10.0);
        assert_relative_eq!(spec.adjusted_rotation_speed(kg(90000.0)).get::<degree_per_second>(), 10.0);
    }

    #[test]
    fn test_adjusted_speed_is_monotonic() {
        let spec = CraneSpecification::default();
        let mut previous = f64::INFINITY;
        for step in 0..=50 {
            let speed = spec
                .adjusted_rotation_speed(kg(step as f64 * 1000.0))
                .get::<degree_per_second>();
            assert!(speed <= previous + 1e-12);
            assert!(speed >= 10.0 - 1e-12);
            previous = speed;
        }
    }

    #[test]
    fn test_degenerate_weight_range_has_no_overload() {
        let spec = CraneSpecification {
            max_cargo_weight: kg(10000.0),
            ..CraneSpecification::default()
        };
        spec.validate().unwrap();
        assert_relative_eq!(spec.overload_factor(kg(50000.0)), 0.0);
        assert_relative_eq!(spec.adjusted_rotation_speed(kg(50000.0)).get::<degree_per_second>(), 30.0);
    }

    #[test]
    fn test_negative_load_treated_as_empty() {
        let spec = CraneSpecification::default();
        assert_relative_eq!(spec.overload_factor(kg(-500.0)), 0.0);
    }

    #[test]
    fn test_validate_rejects_rated_above_max() {
        let spec = CraneSpecification {
            rated_cargo_weight: kg(50000.0),
            ..CraneSpecification::default()
        };
        assert!(matches!(spec.validate(), Err(SpecificationError::RatedExceedsMax { .. })));
    }

    #[test]
    fn test_validate_rejects_zero_speed() {
        let spec = CraneSpecification {
            hook_move_speed: Velocity::new::<meter_per_second>(0.0),
            ..CraneSpecification::default()
        };
        assert!(matches!(
            spec.validate(),
            Err(SpecificationError::NonPositive { field: "hook_move_speed", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_min_above_base() {
        let spec = CraneSpecification {
            min_rotation_speed: AngularVelocity::new::<degree_per_second>(45.0),
            ..CraneSpecification::default()
        };
        assert!(matches!(spec.validate(), Err(SpecificationError::MinSpeedExceedsBase { .. })));
    }

    #[test]
    fn test_validate_rejects_reduction_out_of_range() {
        let spec = CraneSpecification {
            max_speed_reduction: 1.5,
            ..CraneSpecification::default()
        };
        assert!(matches!(spec.validate(), Err(SpecificationError::ReductionOutOfRange(_))));
    }
}
