//! The export table: routes learned outside the protocol, keyed by
//! (destination, source), held for re-advertisement.

use hoplite_core::{IfIndex, Metric, RouteKey, RouteOrigin};

use crate::constants::{INITIAL_CAPACITY, SHRINK_DIVISOR};
use crate::error::TableError;

/// One redistributed route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportedRoute {
    pub key: RouteKey,
    pub metric: Metric,
    pub ifindex: IfIndex,
    pub origin: RouteOrigin,
}

/// What an upsert did to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// First entry for this key.
    Inserted,
    /// Existing entry overwritten by a strictly better metric.
    Updated,
    /// An entry with an equal-or-better metric already covers the key;
    /// nothing was written.
    Unchanged,
}

/// Table of routes exported into the protocol.
///
/// Backed by a flat vector under an explicitly managed capacity: growth
/// doubles starting from [`INITIAL_CAPACITY`], removal halves capacity once
/// the table is three-quarters empty, and emptying releases the storage
/// outright. The stored metric for a key only ever decreases between
/// insertion and removal.
pub struct ExportTable {
    entries: Vec<ExportedRoute>,
    /// Policy capacity. The vector's real allocation may exceed it (the
    /// allocator rounds up, and a failed shrink is skipped); it never
    /// falls below it.
    cap: usize,
}

impl ExportTable {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            cap: 0,
        }
    }

    /// Insert or improve the entry for `key`.
    ///
    /// An existing entry is overwritten (metric, ifindex, origin) only when
    /// the candidate metric is strictly lower; an equal or worse candidate
    /// leaves every field as it was and reports `Unchanged`. When growth
    /// allocation fails the candidate is dropped and the table is exactly
    /// as before the call.
    pub fn upsert(
        &mut self,
        key: RouteKey,
        metric: Metric,
        ifindex: IfIndex,
        origin: RouteOrigin,
    ) -> Result<UpsertOutcome, TableError> {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            if metric >= entry.metric {
                return Ok(UpsertOutcome::Unchanged);
            }
            entry.metric = metric;
            entry.ifindex = ifindex;
            entry.origin = origin;
            return Ok(UpsertOutcome::Updated);
        }

        if self.entries.len() == self.cap {
            self.grow()?;
        }
        self.entries.push(ExportedRoute {
            key,
            metric,
            ifindex,
            origin,
        });
        Ok(UpsertOutcome::Inserted)
    }

    fn grow(&mut self) -> Result<(), TableError> {
        let requested = if self.cap == 0 {
            INITIAL_CAPACITY
        } else {
            self.cap * 2
        };
        self.entries
            .try_reserve_exact(requested - self.entries.len())
            .map_err(|source| TableError::Grow { requested, source })?;
        self.cap = requested;
        Ok(())
    }

    /// Entry for `key`, if present.
    ///
    /// Any mutating call may relocate entries, so the reference cannot be
    /// retained across one; the borrow checker enforces a fresh lookup.
    #[must_use]
    pub fn lookup(&self, key: &RouteKey) -> Option<&ExportedRoute> {
        self.entries.iter().find(|e| e.key == *key)
    }

    #[must_use]
    pub fn contains(&self, key: &RouteKey) -> bool {
        self.lookup(key).is_some()
    }

    /// Remove and return the entry for `key`; `None` and no change when
    /// absent.
    ///
    /// The freed slot is backfilled with the last entry rather than by
    /// shifting, then capacity maintenance runs (see [`Self::capacity`]).
    pub fn remove(&mut self, key: &RouteKey) -> Option<ExportedRoute> {
        let idx = self.entries.iter().position(|e| e.key == *key)?;
        let removed = self.entries.swap_remove(idx);
        self.maintain_capacity();
        Some(removed)
    }

    /// Post-removal storage policy: release everything when empty, halve
    /// when population is below `cap / SHRINK_DIVISOR` with capacity above
    /// the initial size. A shrink whose allocation fails is skipped and the
    /// table stays over-provisioned.
    fn maintain_capacity(&mut self) {
        if self.entries.is_empty() {
            self.entries = Vec::new();
            self.cap = 0;
        } else if self.cap > INITIAL_CAPACITY && self.entries.len() < self.cap / SHRINK_DIVISOR {
            let target = self.cap / 2;
            let mut smaller: Vec<ExportedRoute> = Vec::new();
            if smaller.try_reserve_exact(target).is_ok() {
                smaller.append(&mut self.entries);
                self.entries = smaller;
                self.cap = target;
            }
        }
    }

    /// Number of entries. Callers sizing update batches from this value
    /// must treat it as an upper bound; today the count is exact.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Policy capacity in slots; 0 exactly when the table is empty.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Visit every entry in storage order (unspecified, and reshuffled by
    /// removals). The shared borrow keeps every mutator unreachable while
    /// the iterator lives.
    pub fn iter(&self) -> impl Iterator<Item = &ExportedRoute> {
        self.entries.iter()
    }
}

impl Default for ExportTable {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a ExportTable {
    type Item = &'a ExportedRoute;
    type IntoIter = std::slice::Iter<'a, ExportedRoute>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
