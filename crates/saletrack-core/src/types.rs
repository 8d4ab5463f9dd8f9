//! # Domain Types
//!
//! Core domain types used throughout SaleTrack.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │  SaleSummary    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │◄──│  product_id     │   │  product_name   │       │
//! │  │  barcode?       │   │  quantity       │   │  unit_price     │       │
//! │  │  name           │   │  unit_price     │   │  quantity       │       │
//! │  │  unit_price     │   │  total          │   │  total          │       │
//! │  └─────────────────┘   │  sold_at        │   │  sold_at?       │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │    Barcode      │   │    NewSale      │  insert payload, also the   │
//! │  │  never blank    │   │  (no id / time) │  record forwarded to mirror │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `product_id` is a weak reference: nothing stops a sale from outliving
//! its product, and listings show such sales as `"(unknown)"`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{Money, Quantity};

// =============================================================================
// Barcode
// =============================================================================

/// A product barcode (EAN-13, UPC-A, or any label the store prints).
///
/// A `Barcode` is never blank. "This product has no barcode" is spelled
/// `Option::<Barcode>::None`, so an empty string can never be stored as one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Barcode(String);

impl Barcode {
    /// Parses operator or scanner input.
    ///
    /// Surrounding whitespace is dropped; blank input yields `None`.
    ///
    /// ## Example
    /// ```rust
    /// use saletrack_core::Barcode;
    ///
    /// assert_eq!(Barcode::parse(" 012345678905 ").unwrap().as_str(), "012345678905");
    /// assert!(Barcode::parse("   ").is_none());
    /// ```
    pub fn parse(raw: &str) -> Option<Barcode> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Barcode(trimmed.to_string()))
        }
    }

    /// Wraps a literal known to be non-blank.
    pub(crate) fn from_static(code: &'static str) -> Barcode {
        Barcode(code.to_string())
    }

    /// Returns the barcode text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Barcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Barcode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Barcode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Barcode::parse(&value).ok_or_else(|| ValidationError::required("barcode"))
    }
}

impl From<Barcode> for String {
    fn from(barcode: Barcode) -> Self {
        barcode.0
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the local catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Row id assigned by the local store.
    pub id: i64,

    /// Scannable code; `None` for manually entered items.
    pub barcode: Option<Barcode>,

    /// Display name shown to the operator.
    pub name: String,

    /// Current price per unit.
    pub unit_price: Money,
}

// =============================================================================
// Quantity Mode
// =============================================================================

/// Which quantities the operator is allowed to type for one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityMode {
    /// Integers only (units, packs).
    #[default]
    WholeOnly,

    /// Decimals allowed (weights, volumes).
    DecimalAllowed,
}

impl QuantityMode {
    /// Maps the register's "allow decimal" toggle to a mode.
    pub fn from_allow_decimal(allow_decimal: bool) -> Self {
        if allow_decimal {
            QuantityMode::DecimalAllowed
        } else {
            QuantityMode::WholeOnly
        }
    }
}

// =============================================================================
// Sales
// =============================================================================

/// A sale about to be written to the ledger (and forwarded to the mirror).
///
/// ## Snapshot Pattern
/// `unit_price` is copied from the product when the sale is built, so later
/// price changes never rewrite history. `total` is computed once here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSale {
    pub product_id: i64,
    pub quantity: Quantity,
    pub unit_price: Money,
    pub total: Money,
}

impl NewSale {
    /// Builds a sale of `quantity` units of `product` at its current price.
    ///
    /// ## Example
    /// ```rust
    /// use saletrack_core::{Money, NewSale, Product, Quantity};
    ///
    /// let apple = Product { id: 1, barcode: None, name: "Apple".into(), unit_price: Money::from_cents(50) };
    /// let sale = NewSale::for_product(&apple, Quantity::whole(3)).unwrap();
    /// assert_eq!(sale.total, Money::from_cents(150));
    /// ```
    pub fn for_product(product: &Product, quantity: Quantity) -> CoreResult<NewSale> {
        let total = product
            .unit_price
            .checked_mul(quantity)
            .ok_or(CoreError::TotalOverflow {
                unit_price: product.unit_price,
                quantity,
            })?;

        Ok(NewSale {
            product_id: product.id,
            quantity,
            unit_price: product.unit_price,
            total,
        })
    }
}

/// A sale as stored in the local ledger. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub id: i64,
    pub product_id: i64,
    pub quantity: Quantity,
    pub unit_price: Money,
    pub total: Money,
    /// Set by the ledger at insert time.
    pub sold_at: DateTime<Utc>,
}

/// One line of the "recent sales" listing.
///
/// Fields fall back to `"(unknown)"` / zero / `None` when the joined
/// product row (or a column) is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleSummary {
    pub product_name: String,
    pub unit_price: Money,
    pub quantity: Quantity,
    pub total: Money,
    pub sold_at: Option<DateTime<Utc>>,
}

impl SaleSummary {
    /// Summarises a freshly recorded sale for display.
    pub fn from_sale(sale: &Sale, product_name: impl Into<String>) -> Self {
        SaleSummary {
            product_name: product_name.into(),
            unit_price: sale.unit_price,
            quantity: sale.quantity,
            total: sale.total,
            sold_at: Some(sale.sold_at),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
