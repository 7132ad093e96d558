//! Interface registry with link state

use std::fmt;

use tracing::{debug, info};

use crate::network::InterfaceResolver;
use crate::routing::GatewayName;

/// Interface resolved for an outgoing packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceHandle {
    pub index: usize,
    pub name: GatewayName,
}

impl fmt::Display for InterfaceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.name, self.index)
    }
}

#[derive(Debug, Clone)]
struct Interface {
    name: GatewayName,
    up: bool,
}

/// Interfaces known to the host, in registration order
#[derive(Debug, Clone, Default)]
pub struct InterfaceRegistry {
    interfaces: Vec<Interface>,
}

impl InterfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` as up. Registering an existing name brings it up.
    pub fn register(&mut self, name: GatewayName) -> InterfaceHandle {
        if let Some(index) = self.index_of(&name) {
            self.interfaces[index].up = true;
            return InterfaceHandle { index, name };
        }

        let index = self.interfaces.len();
        self.interfaces.push(Interface { name, up: true });
        debug!("Registered interface {} as #{}", name, index);
        InterfaceHandle { index, name }
    }

    /// Change link state; returns false for unknown interfaces
    pub fn set_link(&mut self, name: &GatewayName, up: bool) -> bool {
        match self.index_of(name) {
            Some(index) => {
                self.interfaces[index].up = up;
                info!("Interface {} is {}", name, if up { "up" } else { "down" });
                true
            }
            None => false,
        }
    }

    pub fn is_up(&self, name: &GatewayName) -> bool {
        self.index_of(name)
            .is_some_and(|index| self.interfaces[index].up)
    }

    pub fn names(&self) -> impl Iterator<Item = &GatewayName> {
        self.interfaces.iter().map(|i| &i.name)
    }

    fn index_of(&self, name: &GatewayName) -> Option<usize> {
        self.interfaces.iter().position(|i| i.name == *name)
    }
}

impl FromIterator<GatewayName> for InterfaceRegistry {
    fn from_iter<I: IntoIterator<Item = GatewayName>>(iter: I) -> Self {
        let mut registry = Self::new();
        for name in iter {
            registry.register(name);
        }
        registry
    }
}

impl InterfaceResolver for InterfaceRegistry {
    type Handle = InterfaceHandle;

    fn resolve_interface(&self, name: &GatewayName) -> Option<InterfaceHandle> {
        let index = self.index_of(name)?;
        self.interfaces[index].up.then_some(InterfaceHandle { index, name: *name })
    }
}
