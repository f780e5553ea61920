pub mod input;
pub mod controller;

pub use input::*;
pub use controller::*;
