pub mod motion;
pub mod joint;
pub mod proximity;
pub mod sandbox;

pub use motion::*;
pub use joint::*;
pub use proximity::*;
pub use sandbox::*;
