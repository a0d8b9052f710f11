//! Capacity policy constants for the export table.

/// Slots allocated when the first entry arrives; capacity never falls
/// below this while the table is non-empty.
pub const INITIAL_CAPACITY: usize = 8;

/// After a removal, capacity halves once population drops strictly below
/// `capacity / SHRINK_DIVISOR` (and capacity exceeds the initial size).
pub const SHRINK_DIVISOR: usize = 4;
