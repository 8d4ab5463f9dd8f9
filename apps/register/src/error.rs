//! # Register Error Type
//!
//! One error type for everything the register can hit, split into what the
//! operator can fix and what they cannot.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Register                           │
//! │                                                                         │
//! │  add_current_sale(form)                                                │
//! │         │                                                               │
//! │         ├── bad name / price / quantity ─► Validation  (recoverable)   │
//! │         ├── total overflows Decimal ─────► Core        (recoverable)   │
//! │         ├── typo in terminal command ────► Usage       (recoverable)   │
//! │         │                                                               │
//! │         ├── SQLite failure ──────────────► Store       (fatal)         │
//! │         ├── barcode row vanished ────────► ProductUnresolved (fatal)   │
//! │         └── config file unreadable ──────► Config      (fatal)         │
//! │                                                                         │
//! │  Recoverable: message shown, form kept, operator retries.              │
//! │  Fatal: operation abandoned, message shown (loop keeps running).       │
//! │                                                                         │
//! │  Mirror failures never appear here.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use saletrack_core::{CoreError, ValidationError};
use saletrack_db::DbError;
use thiserror::Error;

/// Errors surfaced by the register and its terminal loop.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// Operator input failed validation.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// A domain rule rejected otherwise valid input.
    #[error("{0}")]
    Core(CoreError),

    /// The local store failed.
    #[error("Local store error: {0}")]
    Store(#[from] DbError),

    /// A barcode product could neither be found nor created.
    #[error("Could not resolve a product for barcode '{0}'")]
    ProductUnresolved(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unrecognised terminal input.
    #[error("{0}")]
    Usage(String),

    /// Terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<CoreError> for RegisterError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(v) => RegisterError::Validation(v),
            other => RegisterError::Core(other),
        }
    }
}

impl RegisterError {
    pub fn usage(message: impl Into<String>) -> Self {
        RegisterError::Usage(message.into())
    }

    /// True when the operator can fix the input and retry.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            RegisterError::Validation(_) | RegisterError::Core(_) | RegisterError::Usage(_)
        )
    }
}

/// Result type for register operations.
pub type RegisterResult<T> = Result<T, RegisterError>;

#[cfg(test)]
mod tests {
    use super::*;
    use saletrack_core::{Money, Quantity};

    #[test]
    fn test_core_validation_is_flattened() {
        let err: RegisterError = CoreError::Validation(ValidationError::MustBePositive {
            field: "quantity".into(),
        })
        .into();

        assert!(matches!(err, RegisterError::Validation(_)));
        assert_eq!(err.to_string(), "quantity must be greater than zero");
    }

    #[test]
    fn test_recoverable_split() {
        let overflow: RegisterError = CoreError::TotalOverflow {
            unit_price: Money::from_cents(1),
            quantity: Quantity::whole(1),
        }
        .into();
        assert!(overflow.is_recoverable());
        assert!(RegisterError::usage("unknown command").is_recoverable());

        assert!(!RegisterError::Store(DbError::PoolExhausted).is_recoverable());
        assert!(!RegisterError::ProductUnresolved("123".into()).is_recoverable());
        assert!(!RegisterError::Config("bad toml".into()).is_recoverable());
    }
}
