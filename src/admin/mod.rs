//! Administrative interface module
//!
//! Line commands for changing routes and interface state at runtime

pub mod command;
pub mod session;

pub use command::Command;
pub use session::{Flow, Session};
