pub mod types;
pub mod specification;
pub mod equipment;
pub mod physics;
pub mod kinematics;
pub mod control;
pub mod telemetry;

pub use types::*;
