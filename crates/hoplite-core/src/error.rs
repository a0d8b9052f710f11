//! Error types for the hoplite-core crate.

use std::net::AddrParseError;

#[derive(Debug, thiserror::Error)]
pub enum PrefixError {
    #[error("prefix length {plen} exceeds {max} for this address family")]
    LengthOutOfRange { plen: u8, max: u8 },
    #[error("missing '/length' in prefix {input:?}")]
    MissingLength { input: String },
    #[error("invalid prefix length in {input:?}")]
    InvalidLength { input: String },
    #[error("invalid address in {input:?}: {source}")]
    InvalidAddress {
        input: String,
        source: AddrParseError,
    },
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum OriginParseError {
    #[error("unknown origin tag {0}")]
    UnknownTag(u8),
    #[error("unknown origin name {0:?}")]
    UnknownName(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_error_display() {
        let err = PrefixError::LengthOutOfRange { plen: 129, max: 128 };
        assert_eq!(
            err.to_string(),
            "prefix length 129 exceeds 128 for this address family"
        );

        let err = PrefixError::MissingLength {
            input: "10.0.0.0".to_string(),
        };
        assert_eq!(err.to_string(), "missing '/length' in prefix \"10.0.0.0\"");
    }

    #[test]
    fn origin_error_display() {
        assert_eq!(
            OriginParseError::UnknownTag(9).to_string(),
            "unknown origin tag 9"
        );
        assert_eq!(
            OriginParseError::UnknownName("zebra".to_string()).to_string(),
            "unknown origin name \"zebra\""
        );
    }
}
