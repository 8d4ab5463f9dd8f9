//! # Validation Module
//!
//! Turns raw operator input into typed values, or a [`ValidationError`]
//! that says exactly what to fix.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Register (apps/register)                                     │
//! │  └── Calls THIS MODULE for name / price / quantity                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Ledger (saletrack-db)                                        │
//! │  └── Trusts its caller: no checks on record_sale                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: SQLite                                                       │
//! │  └── UNIQUE barcode                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use saletrack_core::validation::{parse_quantity, parse_unit_price};
//! use saletrack_core::{Money, Quantity, QuantityMode};
//!
//! assert_eq!(parse_unit_price("2.00").unwrap(), Money::from_cents(200));
//! assert_eq!(parse_quantity("3", QuantityMode::WholeOnly).unwrap(), Quantity::whole(3));
//! assert!(parse_quantity("0.5", QuantityMode::WholeOnly).is_err());
//! ```

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::{Money, Quantity};
use crate::types::QuantityMode;
use crate::MAX_PRODUCT_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const FIELD_NAME: &str = "product name";
const FIELD_PRICE: &str = "unit price";
const FIELD_QUANTITY: &str = "quantity";

// =============================================================================
// String Validators
// =============================================================================

/// Validates a manually entered product name.
///
/// ## Rules
/// - Must not be blank
/// - At most [`MAX_PRODUCT_NAME_LEN`] characters
///
/// ## Returns
/// The trimmed name.
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required(FIELD_NAME));
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: FIELD_NAME.to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses a manually entered unit price.
///
/// ## Rules
/// - Must be a decimal number (`.` as separator)
/// - No group separators: `"1,000.50"` is rejected
/// - Zero is allowed (free items), negative is not
///
/// ## Example
/// ```rust
/// use saletrack_core::validation::parse_unit_price;
///
/// assert!(parse_unit_price("0").is_ok());
/// assert!(parse_unit_price("-1").is_err());
/// assert!(parse_unit_price("two").is_err());
/// ```
pub fn parse_unit_price(input: &str) -> ValidationResult<Money> {
    let price = parse_decimal(input, FIELD_PRICE)?;

    if price < Decimal::ZERO {
        return Err(ValidationError::Negative {
            field: FIELD_PRICE.to_string(),
        });
    }

    Ok(Money::new(price))
}

/// Parses a quantity according to the transaction's [`QuantityMode`].
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Operator types quantity                                               │
/// │       │                                                                 │
/// │       ├── WholeOnly:       "3" ✓    "0.5" ✗ not a whole number         │
/// │       ├── DecimalAllowed:  "3" ✓    "0.5" ✓                            │
/// │       │                                                                 │
/// │       └── either mode:     "0" ✗ / "-2" ✗  must be greater than zero   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn parse_quantity(input: &str, mode: QuantityMode) -> ValidationResult<Quantity> {
    let quantity = match mode {
        QuantityMode::WholeOnly => {
            let trimmed = input.trim();
            if trimmed.is_empty() {
                return Err(ValidationError::required(FIELD_QUANTITY));
            }
            let units = trimmed
                .parse::<i64>()
                .map_err(|_| ValidationError::NotAWholeNumber {
                    field: FIELD_QUANTITY.to_string(),
                    input: trimmed.to_string(),
                })?;
            Quantity::whole(units)
        }
        QuantityMode::DecimalAllowed => Quantity::new(parse_decimal(input, FIELD_QUANTITY)?),
    };

    if !quantity.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: FIELD_QUANTITY.to_string(),
        });
    }

    Ok(quantity)
}

fn parse_decimal(input: &str, field: &str) -> ValidationResult<Decimal> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::required(field));
    }

    Decimal::from_str(trimmed).map_err(|_| ValidationError::NotANumber {
        field: field.to_string(),
        input: trimmed.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_product_name() {
        assert_eq!(validate_product_name("  Candle ").unwrap(), "Candle");
        assert_eq!(
            validate_product_name("   ").unwrap_err(),
            ValidationError::required("product name")
        );
        assert!(validate_product_name(&"A".repeat(MAX_PRODUCT_NAME_LEN)).is_ok());
        assert!(validate_product_name(&"A".repeat(MAX_PRODUCT_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_parse_unit_price() {
        assert_eq!(parse_unit_price("2.00").unwrap().amount(), dec!(2.00));
        assert_eq!(parse_unit_price(" 0 ").unwrap(), Money::zero());

        assert_eq!(
            parse_unit_price("-0.01").unwrap_err(),
            ValidationError::Negative {
                field: "unit price".to_string()
            }
        );
        assert_eq!(
            parse_unit_price("1,50").unwrap_err(),
            ValidationError::NotANumber {
                field: "unit price".to_string(),
                input: "1,50".to_string()
            }
        );
        assert!(matches!(
            parse_unit_price("1,000.50").unwrap_err(),
            ValidationError::NotANumber { .. }
        ));
        assert_eq!(
            parse_unit_price("").unwrap_err(),
            ValidationError::required("unit price")
        );
    }

    #[test]
    fn test_parse_quantity_whole_only() {
        assert_eq!(
            parse_quantity(" 3 ", QuantityMode::WholeOnly).unwrap(),
            Quantity::whole(3)
        );
        assert!(matches!(
            parse_quantity("1.5", QuantityMode::WholeOnly),
            Err(ValidationError::NotAWholeNumber { .. })
        ));
        assert!(matches!(
            parse_quantity("0", QuantityMode::WholeOnly),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            parse_quantity("-4", QuantityMode::WholeOnly),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            parse_quantity("", QuantityMode::WholeOnly),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_parse_quantity_decimal_allowed() {
        assert_eq!(
            parse_quantity("0.75", QuantityMode::DecimalAllowed).unwrap(),
            Quantity::new(dec!(0.75))
        );
        assert_eq!(
            parse_quantity("2", QuantityMode::DecimalAllowed).unwrap(),
            Quantity::whole(2)
        );
        assert!(matches!(
            parse_quantity("0.0", QuantityMode::DecimalAllowed),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            parse_quantity("lots", QuantityMode::DecimalAllowed),
            Err(ValidationError::NotANumber { .. })
        ));
    }
}
