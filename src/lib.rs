//! IPv6 Routing - static route table for gateway resolution
//!
//! This library provides a longest-prefix-match IPv6 route table that maps
//! destination addresses to outgoing interfaces, along with the configuration
//! and administrative tooling used to populate it.

pub mod admin;
pub mod config;
pub mod network;
pub mod routing;
pub mod error;

pub use error::AppError;
pub use routing::{GatewayName, PrefixLength, RouteEntry, RouteTable, SharedRouteTable};
