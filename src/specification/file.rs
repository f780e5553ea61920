use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::specification::{CraneSpecification, SpecificationError};
use crate::types::*;

/// Error types for loading a specification from disk
#[derive(Debug, thiserror::Error)]
pub enum SpecificationFileError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlWriteError(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unit error: {0}")]
    UnitError(#[from] UnitError),

    #[error("Invalid specification: {0}")]
    Invalid(#[from] SpecificationError),
}

/// On-disk form of a crane specification.
///
/// Every quantity carries its authored unit:
///
/// ```toml
/// [load]
/// rated = { value = 10.0, unit = "t" }
/// max = { value = 40.0, unit = "t" }
/// max_speed_reduction = 0.75
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecificationFile {
    pub rotation: RotationSection,
    pub load: LoadSection,
    pub trolley: TrolleySection,
    pub hook: HookSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationSection {
    pub base_speed: AngularVelocityValue,
    pub min_speed: AngularVelocityValue,
    pub acceleration: AngularAccelerationValue,
    pub deceleration: AngularAccelerationValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadSection {
    pub rated: MassValue,
    pub max: MassValue,
    pub max_speed_reduction: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrolleySection {
    pub move_speed: VelocityValue,
    pub max_distance: LengthValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookSection {
    pub move_speed: VelocityValue,
    pub max_depth: LengthValue,
}

impl SpecificationFile {
    /// Resolve units into a validated specification
    pub fn to_specification(&self) -> Result<CraneSpecification, SpecificationFileError> {
        let spec = CraneSpecification {
            base_rotation_speed: self.rotation.base_speed.to_angular_velocity()?,
            min_rotation_speed: self.rotation.min_speed.to_angular_velocity()?,
            rotation_acceleration: self.rotation.acceleration.to_angular_acceleration()?,
            rotation_deceleration: self.rotation.deceleration.to_angular_acceleration()?,
            rated_cargo_weight: self.load.rated.to_mass()?,
            max_cargo_weight: self.load.max.to_mass()?,
            max_speed_reduction: self.load.max_speed_reduction,
            trolley_move_speed: self.trolley.move_speed.to_velocity()?,
            trolley_max_distance: self.trolley.max_distance.to_length()?,
            hook_move_speed: self.hook.move_speed.to_velocity()?,
            hook_max_depth: self.hook.max_depth.to_length()?,
        };

        spec.validate()?;
        Ok(spec)
    }

    /// Express a specification in the internal units (deg, kg, m)
    pub fn from_specification(spec: &CraneSpecification) -> Result<Self, SpecificationFileError> {
        Ok(Self {
            rotation: RotationSection {
                base_speed: WithUnit::from_angular_velocity(spec.base_rotation_speed, "deg/s")?,
                min_speed: WithUnit::from_angular_velocity(spec.min_rotation_speed, "deg/s")?,
                acceleration: WithUnit::from_angular_acceleration(spec.rotation_acceleration, "deg/s^2")?,
                deceleration: WithUnit::from_angular_acceleration(spec.rotation_deceleration, "deg/s^2")?,
            },
            load: LoadSection {
                rated: WithUnit::from_mass(spec.rated_cargo_weight, "kg")?,
                max: WithUnit::from_mass(spec.max_cargo_weight, "kg")?,
                max_speed_reduction: spec.max_speed_reduction,
            },
            trolley: TrolleySection {
                move_speed: WithUnit::from_velocity(spec.trolley_move_speed, "m/s")?,
                max_distance: WithUnit::from_length(spec.trolley_max_distance, "m")?,
            },
            hook: HookSection {
                move_speed: WithUnit::from_velocity(spec.hook_move_speed, "m/s")?,
                max_depth: WithUnit::from_length(spec.hook_max_depth, "m")?,
            },
        })
    }
}

impl CraneSpecification {
    pub fn from_toml_str(text: &str) -> Result<Self, SpecificationFileError> {
        let file: SpecificationFile = toml::from_str(text)?;
        file.to_specification()
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, SpecificationFileError> {
        let text = fs::read_to_string(path.as_ref())?;
        let spec = Self::from_toml_str(&text)?;
        log::info!("Loaded crane specification from {}", path.as_ref().display());
        Ok(spec)
    }

    pub fn from_json_str(text: &str) -> Result<Self, SpecificationFileError> {
        let file: SpecificationFile = serde_json::from_str(text)?;
        file.to_specification()
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SpecificationFileError> {
        let text = fs::read_to_string(path.as_ref())?;
        let spec = Self::from_json_str(&text)?;
        log::info!("Loaded crane specification from {}", path.as_ref().display());
        Ok(spec)
    }

    pub fn to_toml_string(&self) -> Result<String, SpecificationFileError> {
        let file = SpecificationFile::from_specification(self)?;
        Ok(toml::to_string_pretty(&file)?)
    }
}
