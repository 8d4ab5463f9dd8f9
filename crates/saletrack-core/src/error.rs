//! # Error Types
//!
//! Domain-specific error types for saletrack-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  saletrack-core (this file)                                            │
//! │  ├── CoreError        - Domain rule violations        (recoverable)    │
//! │  └── ValidationError  - Operator input failures       (recoverable)    │
//! │                                                                         │
//! │  saletrack-db                                                          │
//! │  └── DbError          - Local store failures          (fatal)          │
//! │                                                                         │
//! │  saletrack-mirror                                                      │
//! │  └── MirrorError      - Remote mirror failures        (suppressed)     │
//! │                                                                         │
//! │  apps/register                                                         │
//! │  └── RegisterError    - What the operator sees                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::money::{Money, Quantity};

// =============================================================================
// Core Error
// =============================================================================

/// Core business rule errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// `unit_price * quantity` does not fit in a decimal.
    ///
    /// ## When This Occurs
    /// - The operator typed an absurd quantity or price
    #[error("Total for {quantity} x {unit_price} is too large to record")]
    TotalOverflow { unit_price: Money, quantity: Quantity },

    /// Validation error (wraps ValidationError).
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Every message names the offending field so the operator knows what to fix.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Input is not a decimal number.
    #[error("{field} must be a number, got '{input}'")]
    NotANumber { field: String, input: String },

    /// Input is not an integer (whole-only quantity mode).
    #[error("{field} must be a whole number, got '{input}'")]
    NotAWholeNumber { field: String, input: String },

    /// Value must be strictly greater than zero.
    #[error("{field} must be greater than zero")]
    MustBePositive { field: String },

    /// Value must not be below zero.
    #[error("{field} cannot be negative")]
    Negative { field: String },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
