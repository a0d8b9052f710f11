//! Destination and source prefixes in the unified 128-bit address space.
//!
//! IPv4 prefixes are carried as IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`)
//! with the prefix length offset by 96, so a single representation and a
//! single table serve both address families.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use crate::error::PrefixError;

/// Offset added to an IPv4 prefix length when the address is mapped into
/// 128-bit space.
pub const V4_PLEN_OFFSET: u8 = 96;

/// A masked address prefix.
///
/// Constructors zero every bit beyond the prefix length, so value equality
/// is key equality: two prefixes compare equal exactly when they denote the
/// same route destination.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub struct Prefix {
    addr: [u8; 16],
    plen: u8,
}

impl Prefix {
    /// The all-zero prefix of length 0. Stands in for "no source prefix"
    /// on routes that are not source-specific.
    pub const UNSPECIFIED: Prefix = Prefix {
        addr: [0; 16],
        plen: 0,
    };

    /// Native IPv6 prefix. Fails if `plen` exceeds 128.
    pub fn v6(addr: Ipv6Addr, plen: u8) -> Result<Self, PrefixError> {
        if plen > 128 {
            return Err(PrefixError::LengthOutOfRange { plen, max: 128 });
        }
        Ok(Prefix {
            addr: mask(addr.octets(), plen),
            plen,
        })
    }

    /// IPv4 prefix, stored in mapped form with `plen + 96`. Fails if `plen`
    /// exceeds 32.
    pub fn v4(addr: Ipv4Addr, plen: u8) -> Result<Self, PrefixError> {
        if plen > 32 {
            return Err(PrefixError::LengthOutOfRange { plen, max: 32 });
        }
        let plen = plen + V4_PLEN_OFFSET;
        Ok(Prefix {
            addr: mask(addr.to_ipv6_mapped().octets(), plen),
            plen,
        })
    }

    /// The masked address bytes, network byte order.
    #[must_use]
    pub const fn octets(&self) -> [u8; 16] {
        self.addr
    }

    /// Prefix length in the unified space (IPv4 lengths carry the +96 offset).
    #[must_use]
    pub const fn plen(&self) -> u8 {
        self.plen
    }

    #[must_use]
    pub fn is_unspecified(&self) -> bool {
        *self == Self::UNSPECIFIED
    }

    /// Whether this prefix denotes an IPv4 route: the address lies in the
    /// mapped range and the length covers the whole mapping prefix.
    #[must_use]
    pub fn is_v4(&self) -> bool {
        self.plen >= V4_PLEN_OFFSET
            && self.addr[..10] == [0; 10]
            && self.addr[10..12] == [0xff, 0xff]
    }

    /// Whether `other` lies inside this prefix. Reflexive; `UNSPECIFIED`
    /// covers everything.
    #[must_use]
    pub fn covers(&self, other: &Prefix) -> bool {
        self.plen <= other.plen && mask(other.addr, self.plen) == self.addr
    }
}

/// Zero all bits of `addr` beyond the first `plen`.
fn mask(addr: [u8; 16], plen: u8) -> [u8; 16] {
    let keep = match plen {
        0 => 0,
        p if p >= 128 => u128::MAX,
        p => u128::MAX << (128 - u32::from(p)),
    };
    (u128::from_be_bytes(addr) & keep).to_be_bytes()
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_v4() {
            let v4 = Ipv4Addr::new(self.addr[12], self.addr[13], self.addr[14], self.addr[15]);
            write!(f, "{}/{}", v4, self.plen - V4_PLEN_OFFSET)
        } else {
            write!(f, "{}/{}", Ipv6Addr::from(self.addr), self.plen)
        }
    }
}

// Debug renders the route form, not the byte array.
impl fmt::Debug for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl FromStr for Prefix {
    type Err = PrefixError;

    /// Parses `"a.b.c.d/len"` or `"x:y::z/len"`; the family is inferred from
    /// the address syntax.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr, plen) = s.split_once('/').ok_or_else(|| PrefixError::MissingLength {
            input: s.to_string(),
        })?;
        let plen: u8 = plen.parse().map_err(|_| PrefixError::InvalidLength {
            input: s.to_string(),
        })?;
        if addr.contains(':') {
            let addr: Ipv6Addr = addr.parse().map_err(|source| PrefixError::InvalidAddress {
                input: s.to_string(),
                source,
            })?;
            Self::v6(addr, plen)
        } else {
            let addr: Ipv4Addr = addr.parse().map_err(|source| PrefixError::InvalidAddress {
                input: s.to_string(),
                source,
            })?;
            Self::v4(addr, plen)
        }
    }
}

/// The (destination, source) pair identifying one exportable route.
///
/// Routes that are not source-specific carry [`Prefix::UNSPECIFIED`] as
/// their source, so every route has exactly one key form.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub struct RouteKey {
    pub dest: Prefix,
    pub src: Prefix,
}

impl RouteKey {
    pub const fn new(dest: Prefix, src: Prefix) -> Self {
        RouteKey { dest, src }
    }

    /// Destination-only key, no source-specific scope.
    pub const fn dest_only(dest: Prefix) -> Self {
        RouteKey {
            dest,
            src: Prefix::UNSPECIFIED,
        }
    }

    pub fn v4(dest: Ipv4Addr, plen: u8) -> Result<Self, PrefixError> {
        Ok(Self::dest_only(Prefix::v4(dest, plen)?))
    }

    pub fn v6(dest: Ipv6Addr, plen: u8) -> Result<Self, PrefixError> {
        Ok(Self::dest_only(Prefix::v6(dest, plen)?))
    }

    /// Source-specific IPv6 key.
    pub fn v6_src(
        dest: Ipv6Addr,
        plen: u8,
        src: Ipv6Addr,
        src_plen: u8,
    ) -> Result<Self, PrefixError> {
        Ok(RouteKey {
            dest: Prefix::v6(dest, plen)?,
            src: Prefix::v6(src, src_plen)?,
        })
    }

    #[must_use]
    pub fn is_source_specific(&self) -> bool {
        !self.src.is_unspecified()
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.src.is_unspecified() {
            write!(f, "{}", self.dest)
        } else {
            write!(f, "{} from {}", self.dest, self.src)
        }
    }
}

impl fmt::Debug for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}
