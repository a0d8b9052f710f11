//! Daemon assembly around the redistribution core: configuration, the
//! compiled export policy, logging, the route event feed, and table
//! rendering.

pub mod config;
pub mod error;
pub mod feed;
pub mod logging;
pub mod policy;
pub mod show;

pub use config::DaemonConfig;
pub use error::DaemonError;
pub use feed::FeedCommand;
pub use policy::RulePolicy;
