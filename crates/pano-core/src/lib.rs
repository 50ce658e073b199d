pub mod camera;
pub mod constants;
pub mod drag;
pub mod fade;
pub mod manifest;
pub mod nav;
pub mod negotiation;
pub mod orientation;
pub mod session;

pub use camera::*;
pub use drag::*;
pub use fade::*;
pub use manifest::*;
pub use negotiation::*;
pub use orientation::*;
pub use session::*;
