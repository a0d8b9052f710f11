//! The redistribution pipeline: admission, table mutation, and the
//! follow-up against the daemon's installed routes and update machinery.

use hoplite_core::RouteKey;

use crate::admission::{AdmissionVerdict, Candidate, MetricPolicy, admit};
use crate::error::TableError;
use crate::table::{ExportTable, ExportedRoute, UpsertOutcome};

/// Query/uninstall access to the daemon's installed best-path routes.
///
/// A redistributed route takes precedence over an installed route for the
/// exact same key; keeping both would double-install or loop.
pub trait InstalledRoutes {
    /// Handle to one installed route, opaque to this layer.
    type Route;

    fn find_installed(&self, key: &RouteKey) -> Option<Self::Route>;
    fn uninstall(&mut self, route: Self::Route);
}

/// Sink for triggered update floods.
pub trait UpdateSender {
    fn send_update(&mut self, key: &RouteKey);
}

/// Outcome of offering one candidate to [`Redistributor::announce`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnounceOutcome {
    /// Candidate passed admission; the inner outcome tells whether the
    /// table changed.
    Admitted(UpsertOutcome),
    /// Dropped before the table: destination in reserved address space.
    Martian,
    /// Dropped before the table: policy refused the export.
    Filtered,
}

impl AnnounceOutcome {
    /// Whether the table changed (and collaborators were reconciled).
    #[must_use]
    pub fn changed_table(&self) -> bool {
        matches!(
            self,
            AnnounceOutcome::Admitted(UpsertOutcome::Inserted | UpsertOutcome::Updated)
        )
    }
}

/// Owns the export table and the metric policy; drives every accepted
/// change through conflict resolution and update triggering.
///
/// One instance lives for the daemon's lifetime on its single control
/// thread, handed by reference to whoever raises route events.
pub struct Redistributor<P> {
    table: ExportTable,
    policy: P,
}

impl<P: MetricPolicy> Redistributor<P> {
    pub fn new(policy: P) -> Self {
        Self {
            table: ExportTable::new(),
            policy,
        }
    }

    /// The table, read-only. All mutation goes through
    /// [`announce`](Self::announce) and [`withdraw`](Self::withdraw).
    #[must_use]
    pub fn table(&self) -> &ExportTable {
        &self.table
    }

    /// Offer a candidate route.
    ///
    /// Screens it through admission, upserts on acceptance, and on a real
    /// table change uninstalls any competing installed route for the key,
    /// then floods an update if the candidate carries the propagate flag.
    /// An allocation failure surfaces as `Err` with the table unchanged;
    /// the next event for the key retries naturally.
    pub fn announce<I, U>(
        &mut self,
        candidate: &Candidate,
        installed: &mut I,
        updates: &mut U,
    ) -> Result<AnnounceOutcome, TableError>
    where
        I: InstalledRoutes,
        U: UpdateSender,
    {
        let metric = match admit(&self.policy, candidate) {
            AdmissionVerdict::Accept(metric) => metric,
            AdmissionVerdict::Martian => {
                tracing::debug!(dest = %candidate.key.dest, "martian destination, dropped");
                return Ok(AnnounceOutcome::Martian);
            }
            AdmissionVerdict::Filtered => {
                tracing::debug!(
                    key = %candidate.key,
                    origin = %candidate.origin,
                    "policy filtered, not exported"
                );
                return Ok(AnnounceOutcome::Filtered);
            }
        };

        let outcome = self
            .table
            .upsert(candidate.key, metric, candidate.ifindex, candidate.origin)?;
        match outcome {
            UpsertOutcome::Inserted => {
                tracing::debug!(key = %candidate.key, metric = %metric, "route exported");
            }
            UpsertOutcome::Updated => {
                tracing::debug!(key = %candidate.key, metric = %metric, "export metric improved");
            }
            UpsertOutcome::Unchanged => {
                tracing::trace!(key = %candidate.key, "existing export already as good");
            }
        }

        if matches!(outcome, UpsertOutcome::Inserted | UpsertOutcome::Updated) {
            reconcile(&candidate.key, candidate.propagate, installed, updates);
        }
        Ok(AnnounceOutcome::Admitted(outcome))
    }

    /// Withdraw the route for `key`, if present; a miss is a silent no-op.
    ///
    /// Never notifies: propagating the protocol-level retraction is the
    /// update machinery's own business, not this table's.
    pub fn withdraw(&mut self, key: &RouteKey) -> Option<ExportedRoute> {
        let removed = self.table.remove(key);
        match &removed {
            Some(entry) => {
                tracing::debug!(key = %key, metric = %entry.metric, "route withdrawn");
            }
            None => {
                tracing::trace!(key = %key, "withdraw for unknown key, ignored");
            }
        }
        removed
    }
}

/// Post-change follow-up: evict the competing installed route, then flood
/// when asked to. Eviction happens regardless of the propagate flag.
fn reconcile<I, U>(key: &RouteKey, propagate: bool, installed: &mut I, updates: &mut U)
where
    I: InstalledRoutes,
    U: UpdateSender,
{
    if let Some(route) = installed.find_installed(key) {
        tracing::debug!(key = %key, "uninstalling competing installed route");
        installed.uninstall(route);
    }
    if propagate {
        updates.send_update(key);
    }
}
