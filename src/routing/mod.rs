//! Routing table management module
//!
//! Static IPv6 routes resolved to an outgoing interface by longest-prefix match.

use std::fmt;
use std::net::Ipv6Addr;

pub mod gateway;
pub mod mask;
pub mod shared;
pub mod table;

pub use gateway::GatewayName;
pub use mask::{apply_mask, mask_for, PrefixLength};
pub use shared::SharedRouteTable;
pub use table::RouteTable;

/// A single route. `network` is always stored masked to `prefix`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteEntry {
    network: Ipv6Addr,
    prefix: PrefixLength,
    pub gateway: GatewayName,
}

impl RouteEntry {
    /// Build an entry from a raw destination; host bits are cleared.
    pub fn new(addr: Ipv6Addr, prefix: PrefixLength, gateway: GatewayName) -> Self {
        Self {
            network: apply_mask(addr, prefix),
            prefix,
            gateway,
        }
    }

    pub fn network(&self) -> Ipv6Addr {
        self.network
    }

    pub fn prefix(&self) -> PrefixLength {
        self.prefix
    }

    /// Zone-less comparison of the masked address against the network
    pub fn matches(&self, addr: Ipv6Addr) -> bool {
        u128::from(addr) & mask::mask_bits(self.prefix) == u128::from(self.network)
    }

    /// True when this entry was created from `(addr, prefix)`
    pub fn is_exactly(&self, addr: Ipv6Addr, prefix: PrefixLength) -> bool {
        self.prefix == prefix && self.network == apply_mask(addr, prefix)
    }
}

impl fmt::Display for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} via {}", self.network, self.prefix, self.gateway)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_is_stored_masked() {
        let entry = RouteEntry::new(
            "2001:db8:1:2::99".parse().unwrap(),
            PrefixLength::new(48).unwrap(),
            GatewayName::new("eth0").unwrap(),
        );
        assert_eq!(entry.network(), "2001:db8:1::".parse::<Ipv6Addr>().unwrap());
        assert_eq!(entry.network(), apply_mask(entry.network(), entry.prefix()));
        assert_eq!(entry.to_string(), "2001:db8:1::/48 via eth0");
    }

    #[test]
    fn test_entry_matching() {
        let entry = RouteEntry::new(
            "2001:db8::".parse().unwrap(),
            PrefixLength::new(32).unwrap(),
            GatewayName::new("eth0").unwrap(),
        );
        assert!(entry.matches("2001:db8:ffff::1".parse().unwrap()));
        assert!(!entry.matches("2001:db9::1".parse().unwrap()));
        assert!(entry.is_exactly("2001:db8:1::".parse().unwrap(), PrefixLength::new(32).unwrap()));
        assert!(!entry.is_exactly("2001:db8::".parse().unwrap(), PrefixLength::new(33).unwrap()));
    }
}
