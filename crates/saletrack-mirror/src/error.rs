//! # Mirror Error Types
//!
//! Every variant here ends up inside `MirrorOutcome::Failed`. None of them is
//! ever returned to the register.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Mirror Error Categories                             │
//! │                                                                         │
//! │  Configuration      Transport             Statement                    │
//! │  ─────────────      ─────────             ─────────                    │
//! │  InvalidDescriptor  ConnectionFailed      SchemaFailed                 │
//! │                     Timeout               ForwardFailed                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for mirror internals.
pub type MirrorResult<T> = Result<T, MirrorError>;

/// Why a mirror operation did not complete.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// The connection descriptor could not be parsed.
    #[error("Invalid mirror connection descriptor: {0}")]
    InvalidDescriptor(String),

    /// Could not open (or cleanly close) a connection.
    #[error("Mirror connection failed: {0}")]
    ConnectionFailed(String),

    /// The remote call did not finish within the configured bound.
    #[error("Mirror operation timed out after {0} seconds")]
    Timeout(u64),

    /// CREATE TABLE on the mirror failed (permissions, syntax, ...).
    #[error("Mirror schema creation failed: {0}")]
    SchemaFailed(String),

    /// INSERT of the forwarded sale failed.
    #[error("Forwarding sale to mirror failed: {0}")]
    ForwardFailed(String),
}

impl MirrorError {
    /// Returns true if the failure came from reaching the server rather than
    /// from a statement it rejected.
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            MirrorError::ConnectionFailed(_) | MirrorError::Timeout(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_errors() {
        assert!(MirrorError::ConnectionFailed("refused".into()).is_transport_error());
        assert!(MirrorError::Timeout(5).is_transport_error());

        assert!(!MirrorError::InvalidDescriptor("Port=x".into()).is_transport_error());
        assert!(!MirrorError::ForwardFailed("unknown column".into()).is_transport_error());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            MirrorError::Timeout(5).to_string(),
            "Mirror operation timed out after 5 seconds"
        );
    }
}
