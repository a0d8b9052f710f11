//! Redistribution machinery for the hoplite routing daemon: the export
//! table, the admission pipeline that screens candidates, and the conflict
//! resolution against the daemon's installed routes.

pub mod admission;
pub mod constants;
pub mod error;
pub mod redistribute;
pub mod table;

pub use admission::{AdmissionVerdict, Candidate, MetricPolicy, admit};
pub use error::TableError;
pub use redistribute::{AnnounceOutcome, InstalledRoutes, Redistributor, UpdateSender};
pub use table::{ExportTable, ExportedRoute, UpsertOutcome};
