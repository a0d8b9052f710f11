//! Core types for the hoplite routing daemon: prefixes in the unified
//! 128-bit address space, route keys, metrics, and origin tags.

pub mod error;
pub mod martian;
pub mod metric;
pub mod prefix;
pub mod types;

pub use error::{OriginParseError, PrefixError};
pub use martian::is_martian;
pub use metric::Metric;
pub use prefix::{Prefix, RouteKey};
pub use types::{IfIndex, RouteOrigin};
