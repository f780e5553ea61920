pub mod cargo;
pub mod hook;
pub mod trolley;
pub mod turntable;
pub mod crane;

pub use cargo::{Cargo, CargoError};
pub use hook::{AttachmentChange, Hook, HookConfig, HookError};
pub use trolley::{HoistIntent, TravelIntent, TravelMarkers, Trolley};
pub use turntable::{RotationIntent, Turntable};
pub use crane::Crane;
