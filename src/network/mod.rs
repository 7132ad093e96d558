//! Network interface operations module
//!
//! Resolves gateway names to the interfaces known to the host stack

use crate::routing::GatewayName;

pub mod registry;

pub use registry::{InterfaceHandle, InterfaceRegistry};

/// Maps a gateway name to a live interface, supplied by the host stack
pub trait InterfaceResolver {
    type Handle;

    fn resolve_interface(&self, name: &GatewayName) -> Option<Self::Handle>;
}
