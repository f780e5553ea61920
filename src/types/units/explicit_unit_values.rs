use serde::{self, Deserialize, Serialize};
use std::marker::PhantomData;

use crate::types::units::*;

/// A raw number paired with the unit it was authored in.
///
/// Configuration files carry these so a crane can be described in tonnes,
/// feet or rpm and still land in the internal SI quantities.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(bound = "")]
pub struct WithUnit<T> {
    pub value: f64,
    pub unit: String,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

pub type LengthValue = WithUnit<Length>;
pub type MassValue = WithUnit<Mass>;
pub type VelocityValue = WithUnit<Velocity>;
pub type AngularVelocityValue = WithUnit<AngularVelocity>;
pub type AngularAccelerationValue = WithUnit<AngularAcceleration>;

impl<T> WithUnit<T> {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
            _marker: PhantomData,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UnitError {
    #[error("Unknown length unit: {0}")]
    UnknownLengthUnit(String),

    #[error("Unknown mass unit: {0}")]
    UnknownMassUnit(String),

    #[error("Unknown velocity unit: {0}")]
    UnknownVelocityUnit(String),

    #[error("Unknown angular velocity unit: {0}")]
    UnknownAngularVelocityUnit(String),

    #[error("Unknown angular acceleration unit: {0}")]
    UnknownAngularAccelerationUnit(String),
}

impl WithUnit<Length> {
    pub fn to_length(&self) -> Result<Length, UnitError> {
        match self.unit.as_str() {
            "m" | "M"
            | "meter" | "Meter" | "METER"
            | "metre" | "Metre" | "METRE"
            | "meters" | "Meters" | "METERS"
            | "metres" | "Metres" | "METRES" => Ok(Length::new::<meter>(self.value)),
            "cm" | "Cm" | "CM"
            | "centimeter" | "centimeters"
            | "centimetre" | "centimetres" => Ok(Length::new::<centimeter>(self.value)),
            "mm" | "Mm" | "MM"
            | "millimeter" | "millimeters"
            | "millimetre" | "millimetres" => Ok(Length::new::<millimeter>(self.value)),
            "ft" | "Ft" | "FT"
            | "foot" | "Foot" | "FOOT"
            | "feet" | "Feet" | "FEET" => Ok(Length::new::<foot>(self.value)),
            "in" | "In" | "IN"
            | "inch" | "inches" => Ok(Length::new::<inch>(self.value)),
            "yd" | "Yd" | "YD"
            | "yard" | "yards" => Ok(Length::new::<yard>(self.value)),
            _ => Err(UnitError::UnknownLengthUnit(self.unit.clone())),
        }
    }

    pub fn from_length(length: Length, unit: &str) -> Result<Self, UnitError> {
        let value = match unit {
            "m" | "meter" | "metre" | "meters" | "metres" => length.get::<meter>(),
            "cm" | "centimeter" | "centimetre" => length.get::<centimeter>(),
            "mm" | "millimeter" | "millimetre" => length.get::<millimeter>(),
            "ft" | "foot" | "feet" => length.get::<foot>(),
            "in" | "inch" | "inches" => length.get::<inch>(),
            "yd" | "yard" | "yards" => length.get::<yard>(),
            _ => return Err(UnitError::UnknownLengthUnit(unit.to_string())),
        };

        Ok(Self::new(value, unit))
    }
}

impl WithUnit<Mass> {
    pub fn to_mass(&self) -> Result<Mass, UnitError> {
        match self.unit.as_str() {
            "kg" | "Kg" | "KG"
            | "kgs" | "Kgs" | "KGS"
            | "kilogram" | "Kilogram" | "KILOGRAM"
            | "kilograms" | "Kilograms" | "KILOGRAMS" => Ok(Mass::new::<kilogram>(self.value)),
            "t" | "T"
            | "tonne" | "tonnes"
            | "metric ton" | "Metric Ton" | "METRIC TON"
            | "metric tons" | "Metric Tons" | "METRIC TONS" => Ok(Mass::new::<metric_ton>(self.value)),
            "lb" | "Lb" | "LB"
            | "lbs" | "Lbs" | "LBS"
            | "pound" | "pounds" => Ok(Mass::new::<pound>(self.value)),
            "short ton" | "short tons" => Ok(Mass::new::<ton_short>(self.value)),
            "long ton" | "long tons" => Ok(Mass::new::<ton_long>(self.value)),
            "g" | "G"
            | "gram" | "grams" => Ok(Mass::new::<gram>(self.value)),
            _ => Err(UnitError::UnknownMassUnit(self.unit.clone())),
        }
    }

    pub fn from_mass(mass: Mass, unit: &str) -> Result<Self, UnitError> {
        let value = match unit {
            "kg" | "kgs" | "kilogram" | "kilograms" => mass.get::<kilogram>(),
            "t" | "tonne" | "tonnes" | "metric ton" | "metric tons" => mass.get::<metric_ton>(),
            "lb" | "lbs" | "pound" | "pounds" => mass.get::<pound>(),
            "short ton" | "short tons" => mass.get::<ton_short>(),
            "long ton" | "long tons" => mass.get::<ton_long>(),
            "g" | "gram" | "grams" => mass.get::<gram>(),
            _ => return Err(UnitError::UnknownMassUnit(unit.to_string())),
        };

        Ok(Self::new(value, unit))
    }
}

impl WithUnit<Velocity> {
    pub fn to_velocity(&self) -> Result<Velocity, UnitError> {
        match self.unit.as_str() {
            "m/s" | "mps" | "meters per second" | "metres per second" => {
                Ok(Velocity::new::<meter_per_second>(self.value))
            }
            "ft/s" | "fps" | "feet per second" => Ok(Velocity::new::<foot_per_second>(self.value)),
            "ft/min" | "fpm" | "feet per minute" => Ok(Velocity::new::<foot_per_minute>(self.value)),
            "km/h" | "kph" | "kmh" => Ok(Velocity::new::<kilometer_per_hour>(self.value)),
            "mph" | "miles per hour" => Ok(Velocity::new::<mile_per_hour>(self.value)),
            _ => Err(UnitError::UnknownVelocityUnit(self.unit.clone())),
        }
    }

    pub fn from_velocity(velocity: Velocity, unit: &str) -> Result<Self, UnitError> {
        let value = match unit {
            "m/s" | "mps" => velocity.get::<meter_per_second>(),
            "ft/s" | "fps" => velocity.get::<foot_per_second>(),
            "ft/min" | "fpm" => velocity.get::<foot_per_minute>(),
            "km/h" | "kph" | "kmh" => velocity.get::<kilometer_per_hour>(),
            "mph" => velocity.get::<mile_per_hour>(),
            _ => return Err(UnitError::UnknownVelocityUnit(unit.to_string())),
        };

        Ok(Self::new(value, unit))
    }
}

impl WithUnit<AngularVelocity> {
    pub fn to_angular_velocity(&self) -> Result<AngularVelocity, UnitError> {
        match self.unit.as_str() {
            "deg/s" | "°/s"
            | "degree per second" | "degrees per second" => {
                Ok(AngularVelocity::new::<degree_per_second>(self.value))
            }
            "rad/s" | "radian per second" | "radians per second" => {
                Ok(AngularVelocity::new::<radian_per_second>(self.value))
            }
            "rpm" | "RPM" | "rev/min" => Ok(AngularVelocity::new::<revolution_per_minute>(self.value)),
            _ => Err(UnitError::UnknownAngularVelocityUnit(self.unit.clone())),
        }
    }

    pub fn from_angular_velocity(rate: AngularVelocity, unit: &str) -> Result<Self, UnitError> {
        let value = match unit {
            "deg/s" | "°/s" => rate.get::<degree_per_second>(),
            "rad/s" => rate.get::<radian_per_second>(),
            "rpm" | "rev/min" => rate.get::<revolution_per_minute>(),
            _ => return Err(UnitError::UnknownAngularVelocityUnit(unit.to_string())),
        };

        Ok(Self::new(value, unit))
    }
}

impl WithUnit<AngularAcceleration> {
    pub fn to_angular_acceleration(&self) -> Result<AngularAcceleration, UnitError> {
        match self.unit.as_str() {
            "deg/s²" | "deg/s^2" | "deg/s2" | "°/s²" => {
                Ok(AngularAcceleration::new::<degree_per_second_squared>(self.value))
            }
            "rad/s²" | "rad/s^2" | "rad/s2" => {
                Ok(AngularAcceleration::new::<radian_per_second_squared>(self.value))
            }
            _ => Err(UnitError::UnknownAngularAccelerationUnit(self.unit.clone())),
        }
    }

    pub fn from_angular_acceleration(rate: AngularAcceleration, unit: &str) -> Result<Self, UnitError> {
        let value = match unit {
            "deg/s²" | "deg/s^2" | "deg/s2" | "°/s²" => rate.get::<degree_per_second_squared>(),
            "rad/s²" | "rad/s^2" | "rad/s2" => rate.get::<radian_per_second_squared>(),
            _ => return Err(UnitError::UnknownAngularAccelerationUnit(unit.to_string())),
        };

        Ok(Self::new(value, unit))
    }
}
