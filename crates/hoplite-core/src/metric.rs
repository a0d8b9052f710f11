//! Route cost.

use std::fmt;

/// Route metric; lower is preferred.
///
/// The all-ones value is the protocol's infinity: it marks a route as
/// unreachable, and a policy filter returns it to mean "do not export".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[must_use]
pub struct Metric(u16);

impl Metric {
    /// The unreachable/filtered sentinel.
    pub const INFINITY: Metric = Metric(0xFFFF); // 65535

    pub const fn new(value: u16) -> Self {
        Metric(value)
    }

    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Whether this metric means unreachable. Only the sentinel itself is
    /// infinite; 0xFFFE is a real, if dismal, cost.
    #[must_use]
    pub const fn is_infinite(self) -> bool {
        self.0 == 0xFFFF
    }
}

impl From<u16> for Metric {
    fn from(value: u16) -> Self {
        Metric(value)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_prefers_lower() {
        assert!(Metric::new(5) < Metric::new(10));
        assert!(Metric::new(10) < Metric::INFINITY);
    }

    #[test]
    fn infinity_boundary() {
        assert!(Metric::INFINITY.is_infinite());
        assert!(!Metric::new(0xFFFE).is_infinite());
        assert!(!Metric::new(0).is_infinite());
    }

    #[test]
    fn display_is_bare_number() {
        assert_eq!(Metric::new(128).to_string(), "128");
        assert_eq!(Metric::INFINITY.to_string(), "65535");
    }
}
