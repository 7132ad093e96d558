//! Gateway (outgoing interface) names

use std::fmt;
use std::str::FromStr;

use crate::error::RouteError;

/// Interface name of at most [`GatewayName::MAX_LEN`] printable ASCII characters.
///
/// Stored inline so route entries stay `Copy` and lookups never touch the heap.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct GatewayName {
    bytes: [u8; GatewayName::MAX_LEN],
    len: u8,
}

impl GatewayName {
    pub const MAX_LEN: usize = 4;

    pub fn new(name: &str) -> Result<Self, RouteError> {
        let raw = name.as_bytes();
        let valid = !raw.is_empty()
            && raw.len() <= Self::MAX_LEN
            && raw.iter().all(|b| b.is_ascii_graphic());
        if !valid {
            return Err(RouteError::InvalidGatewayName(name.to_string()));
        }

        let mut bytes = [0u8; Self::MAX_LEN];
        bytes[..raw.len()].copy_from_slice(raw);
        Ok(Self {
            bytes,
            len: raw.len() as u8,
        })
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII is ever stored.
        std::str::from_utf8(&self.bytes[..usize::from(self.len)]).unwrap_or_default()
    }
}

impl FromStr for GatewayName {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for GatewayName {
    type Error = RouteError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl AsRef<str> for GatewayName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for GatewayName {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for GatewayName {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for GatewayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for GatewayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GatewayName({:?})", self.as_str())
    }
}
