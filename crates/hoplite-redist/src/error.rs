//! Error types for the hoplite-redist crate.

use std::collections::TryReserveError;

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// Growth allocation failed; the upsert was abandoned with the table
    /// exactly as it was.
    #[error("failed to grow export table to {requested} slots: {source}")]
    Grow {
        requested: usize,
        source: TryReserveError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grow_error_names_the_request() {
        let source = {
            let mut v: Vec<u8> = Vec::new();
            v.try_reserve_exact(usize::MAX).unwrap_err()
        };
        let err = TableError::Grow {
            requested: 16,
            source,
        };
        assert!(err.to_string().starts_with("failed to grow export table to 16 slots"));
    }
}
