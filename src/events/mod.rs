pub mod gesture;
pub mod pointer;
pub mod tilt;

pub use gesture::{disconnect_tilt, enable_controls, wire_begin_click, wire_permission_click};
