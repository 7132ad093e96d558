//! Prefix lengths and IPv6 network masks

use std::fmt;
use std::net::Ipv6Addr;

use crate::error::RouteError;

/// Number of significant leading bits of an IPv6 network, in `0..=128`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PrefixLength(u8);

impl PrefixLength {
    pub const MAX: u8 = 128;

    /// Matches every address
    pub const ZERO: PrefixLength = PrefixLength(0);

    /// Matches exactly one address
    pub const HOST: PrefixLength = PrefixLength(Self::MAX);

    pub fn new(len: u8) -> Result<Self, RouteError> {
        if len > Self::MAX {
            return Err(RouteError::InvalidPrefix(u32::from(len)));
        }
        Ok(Self(len))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for PrefixLength {
    type Error = RouteError;

    fn try_from(len: u8) -> Result<Self, Self::Error> {
        Self::new(len)
    }
}

impl TryFrom<u32> for PrefixLength {
    type Error = RouteError;

    fn try_from(len: u32) -> Result<Self, Self::Error> {
        u8::try_from(len)
            .map_err(|_| RouteError::InvalidPrefix(len))
            .and_then(Self::new)
    }
}

impl fmt::Display for PrefixLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Network mask with the leading `prefix` bits set
pub fn mask_for(prefix: PrefixLength) -> Ipv6Addr {
    Ipv6Addr::from(mask_bits(prefix))
}

/// `addr & mask_for(prefix)`
pub fn apply_mask(addr: Ipv6Addr, prefix: PrefixLength) -> Ipv6Addr {
    Ipv6Addr::from(u128::from(addr) & mask_bits(prefix))
}

// `u128::MAX << 128` overflows, so /0 is special-cased.
pub(crate) fn mask_bits(prefix: PrefixLength) -> u128 {
    match prefix.get() {
        0 => 0,
        len => u128::MAX << (128 - u32::from(len)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefix(len: u8) -> PrefixLength {
        PrefixLength::new(len).unwrap()
    }

    #[test]
    fn test_mask_edges() {
        assert_eq!(mask_for(PrefixLength::ZERO), Ipv6Addr::UNSPECIFIED);
        assert_eq!(mask_for(PrefixLength::HOST), Ipv6Addr::from(u128::MAX));
    }

    #[test]
    fn test_mask_bit_counts_for_every_prefix() {
        for len in 0..=128u8 {
            let bits = u128::from(mask_for(prefix(len)));
            assert_eq!(bits.leading_ones(), u32::from(len), "prefix /{}", len);
            assert_eq!(bits.trailing_zeros(), 128 - u32::from(len), "prefix /{}", len);
        }
    }

    #[test]
    fn test_mask_non_nibble_boundaries() {
        assert_eq!(mask_for(prefix(1)), "8000::".parse::<Ipv6Addr>().unwrap());
        assert_eq!(mask_for(prefix(15)), "fffe::".parse::<Ipv6Addr>().unwrap());
        assert_eq!(mask_for(prefix(33)), "ffff:ffff:8000::".parse::<Ipv6Addr>().unwrap());
        assert_eq!(
            mask_for(prefix(127)),
            "ffff:ffff:ffff:ffff:ffff:ffff:ffff:fffe"
                .parse::<Ipv6Addr>()
                .unwrap()
        );
    }

    #[test]
    fn test_apply_mask() {
        let addr: Ipv6Addr = "2001:db8:abcd:12::1".parse().unwrap();
        assert_eq!(apply_mask(addr, prefix(32)), "2001:db8::".parse::<Ipv6Addr>().unwrap());
        assert_eq!(apply_mask(addr, prefix(64)), "2001:db8:abcd:12::".parse::<Ipv6Addr>().unwrap());
        assert_eq!(apply_mask(addr, PrefixLength::HOST), addr);
        assert_eq!(apply_mask(addr, PrefixLength::ZERO), Ipv6Addr::UNSPECIFIED);
    }

    #[test]
    fn test_prefix_length_bounds() {
        assert!(PrefixLength::new(128).is_ok());
        assert_eq!(PrefixLength::new(129), Err(RouteError::InvalidPrefix(129)));
        assert_eq!(PrefixLength::try_from(300u32), Err(RouteError::InvalidPrefix(300)));
        assert_eq!(PrefixLength::try_from(64u32).unwrap().get(), 64);
    }
}
