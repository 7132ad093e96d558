//! Route table shared between the packet path and administrative callers

use std::net::Ipv6Addr;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::RouteError;
use crate::network::InterfaceResolver;
use crate::routing::{GatewayName, PrefixLength, RouteEntry, RouteTable};

/// Cloneable handle to a [`RouteTable`] behind a read-write lock.
///
/// Each operation holds the lock for its whole duration. Lookups only take
/// the read side, so concurrent lookups never wait on each other.
#[derive(Debug, Clone, Default)]
pub struct SharedRouteTable {
    inner: Arc<RwLock<RouteTable>>,
}

impl SharedRouteTable {
    pub fn new(table: RouteTable) -> Self {
        Self {
            inner: Arc::new(RwLock::new(table)),
        }
    }

    pub fn add_route(
        &self,
        addr: Ipv6Addr,
        prefix: PrefixLength,
        gateway: GatewayName,
    ) -> Result<(), RouteError> {
        self.inner.write().add_route(addr, prefix, gateway)
    }

    pub fn remove_route(&self, addr: Ipv6Addr, prefix: PrefixLength) -> Result<RouteEntry, RouteError> {
        self.inner.write().remove_route(addr, prefix)
    }

    pub fn remove_routes_for_interface(&self, gateway: &GatewayName) -> usize {
        self.inner.write().remove_routes_for_interface(gateway)
    }

    pub fn update_route_gateway(
        &self,
        addr: Ipv6Addr,
        prefix: PrefixLength,
        new_gateway: GatewayName,
    ) -> Result<(), RouteError> {
        self.inner.write().update_route_gateway(addr, prefix, new_gateway)
    }

    pub fn find(&self, addr: Ipv6Addr) -> Option<GatewayName> {
        self.inner.read().find(addr)
    }

    pub fn find_route<R: InterfaceResolver>(&self, addr: Ipv6Addr, resolver: &R) -> Option<R::Handle> {
        self.inner.read().find_route(addr, resolver)
    }

    pub fn set_default_gateway(
        &self,
        addr: Ipv6Addr,
        prefix: PrefixLength,
        gateway: GatewayName,
    ) -> Result<(), RouteError> {
        self.inner.write().set_default_gateway(addr, prefix, gateway)
    }

    pub fn clear_default_gateway(&self) -> Option<RouteEntry> {
        self.inner.write().clear_default_gateway()
    }

    pub fn default_gateway(&self) -> Option<RouteEntry> {
        self.inner.read().default_gateway().copied()
    }

    pub fn dump_table(&self) -> Vec<RouteEntry> {
        self.inner.read().dump_table()
    }

    /// Run `f` against a consistent view of the table
    pub fn with_table<T>(&self, f: impl FnOnce(&RouteTable) -> T) -> T {
        let table = self.inner.read();
        f(&*table)
    }
}

impl From<RouteTable> for SharedRouteTable {
    fn from(table: RouteTable) -> Self {
        Self::new(table)
    }
}
