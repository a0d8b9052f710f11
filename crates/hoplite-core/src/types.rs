//! Interface and origin identifiers attached to exported routes.

use std::fmt;
use std::str::FromStr;

use crate::error::OriginParseError;

/// Kernel interface index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub struct IfIndex(pub u32);

impl IfIndex {
    /// Routes not tied to a specific interface carry index 0.
    pub const UNSPECIFIED: IfIndex = IfIndex(0);
}

impl fmt::Display for IfIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a redistributed route was learned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RouteOrigin {
    Kernel = 0,
    Connected = 1,
    Static = 2,
    Rip = 3,
    Ospf = 4,
    Bgp = 5,
}

impl RouteOrigin {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(v: u8) -> Result<Self, OriginParseError> {
        match v {
            0 => Ok(RouteOrigin::Kernel),
            1 => Ok(RouteOrigin::Connected),
            2 => Ok(RouteOrigin::Static),
            3 => Ok(RouteOrigin::Rip),
            4 => Ok(RouteOrigin::Ospf),
            5 => Ok(RouteOrigin::Bgp),
            _ => Err(OriginParseError::UnknownTag(v)),
        }
    }

    /// Lowercase name, as written in config files and feed lines.
    pub const fn name(self) -> &'static str {
        match self {
            RouteOrigin::Kernel => "kernel",
            RouteOrigin::Connected => "connected",
            RouteOrigin::Static => "static",
            RouteOrigin::Rip => "rip",
            RouteOrigin::Ospf => "ospf",
            RouteOrigin::Bgp => "bgp",
        }
    }
}

impl fmt::Display for RouteOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RouteOrigin {
    type Err = OriginParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kernel" => Ok(RouteOrigin::Kernel),
            "connected" => Ok(RouteOrigin::Connected),
            "static" => Ok(RouteOrigin::Static),
            "rip" => Ok(RouteOrigin::Rip),
            "ospf" => Ok(RouteOrigin::Ospf),
            "bgp" => Ok(RouteOrigin::Bgp),
            unknown => Err(OriginParseError::UnknownName(unknown.to_string())),
        }
    }
}
