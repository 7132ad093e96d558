//! Longest-prefix-match route table

use std::net::Ipv6Addr;

use tracing::{debug, info, warn};

use crate::error::RouteError;
use crate::network::InterfaceResolver;
use crate::routing::{GatewayName, PrefixLength, RouteEntry};

/// Static IPv6 route table.
///
/// Entries are kept sorted by prefix length, longest first, so the first
/// matching entry of a scan is the longest-prefix match. Entries with equal
/// prefix length keep their insertion order. The default route sits outside
/// the ordered list and is only consulted when the scan misses.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    default_route: Option<RouteEntry>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route for `addr/prefix` via `gateway`.
    ///
    /// Rejected with [`RouteError::AlreadyRouted`] when `addr` already
    /// resolves through an existing entry or the default route.
    pub fn add_route(
        &mut self,
        addr: Ipv6Addr,
        prefix: PrefixLength,
        gateway: GatewayName,
    ) -> Result<(), RouteError> {
        if let Some(existing) = self.find(addr) {
            debug!("Rejecting route {}/{}: already routed via {}", addr, prefix, existing);
            return Err(RouteError::AlreadyRouted(addr.to_string()));
        }

        let entry = RouteEntry::new(addr, prefix, gateway);
        let position = self.entries.partition_point(|e| e.prefix() >= prefix);
        self.entries.insert(position, entry);

        info!("Added route {}", entry);
        Ok(())
    }

    /// Remove the route whose network and prefix equal `addr/prefix` after masking
    pub fn remove_route(
        &mut self,
        addr: Ipv6Addr,
        prefix: PrefixLength,
    ) -> Result<RouteEntry, RouteError> {
        let position = self
            .position(addr, prefix)
            .ok_or_else(|| RouteError::RouteNotFound(format!("{}/{}", addr, prefix)))?;

        let removed = self.entries.remove(position);
        info!("Removed route {}", removed);
        Ok(removed)
    }

    /// Remove every route via `gateway`, returning how many were removed.
    ///
    /// A default route via `gateway` is left in place.
    pub fn remove_routes_for_interface(&mut self, gateway: &GatewayName) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.gateway != *gateway);
        let removed = before - self.entries.len();

        if removed > 0 {
            info!("Removed {} route(s) via {}", removed, gateway);
        }
        if let Some(default) = self.default_route.filter(|d| d.gateway == *gateway) {
            warn!(
                "Default route {} still points at {} after its routes were removed",
                default, gateway
            );
        }
        removed
    }

    /// Replace the gateway of the route `addr/prefix`. Network and prefix never change.
    pub fn update_route_gateway(
        &mut self,
        addr: Ipv6Addr,
        prefix: PrefixLength,
        new_gateway: GatewayName,
    ) -> Result<(), RouteError> {
        let position = self
            .position(addr, prefix)
            .ok_or_else(|| RouteError::RouteNotFound(format!("{}/{}", addr, prefix)))?;

        let entry = &mut self.entries[position];
        debug!("Updating route {} to gateway {}", entry, new_gateway);
        entry.gateway = new_gateway;
        Ok(())
    }

    /// Gateway for `addr`: the longest matching prefix, then the default route.
    pub fn find(&self, addr: Ipv6Addr) -> Option<GatewayName> {
        self.entries
            .iter()
            .find(|e| e.matches(addr))
            .or(self.default_route.as_ref())
            .map(|e| e.gateway)
    }

    /// Resolve `addr` to an interface handle.
    ///
    /// The matched gateway is resolved as-is; if it does not resolve, the
    /// lookup misses rather than trying a shorter prefix.
    pub fn find_route<R: InterfaceResolver>(&self, addr: Ipv6Addr, resolver: &R) -> Option<R::Handle> {
        self.find(addr)
            .and_then(|gateway| resolver.resolve_interface(&gateway))
    }

    /// Install the default route. Only one default may be set at a time.
    pub fn set_default_gateway(
        &mut self,
        addr: Ipv6Addr,
        prefix: PrefixLength,
        gateway: GatewayName,
    ) -> Result<(), RouteError> {
        if let Some(existing) = &self.default_route {
            debug!("Rejecting default gateway {}: {} is set", gateway, existing);
            return Err(RouteError::DefaultExists(existing.to_string()));
        }

        let entry = RouteEntry::new(addr, prefix, gateway);
        info!("Default gateway set to {}", entry);
        self.default_route = Some(entry);
        Ok(())
    }

    pub fn clear_default_gateway(&mut self) -> Option<RouteEntry> {
        let previous = self.default_route.take();
        if let Some(entry) = &previous {
            info!("Default gateway {} cleared", entry);
        }
        previous
    }

    pub fn default_gateway(&self) -> Option<&RouteEntry> {
        self.default_route.as_ref()
    }

    /// Routes in lookup order, default route excluded
    pub fn dump_table(&self) -> Vec<RouteEntry> {
        self.entries.clone()
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, addr: Ipv6Addr, prefix: PrefixLength) -> Option<usize> {
        self.entries.iter().position(|e| e.is_exactly(addr, prefix))
    }
}
