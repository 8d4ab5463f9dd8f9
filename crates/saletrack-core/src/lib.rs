//! # saletrack-core: Pure Domain Model for SaleTrack
//!
//! Types and rules shared by the local store, the remote mirror and the
//! register. Nothing in this crate performs I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SaleTrack Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Register (apps/register)                        │   │
//! │  │   lookup ──► resolve product ──► validate qty ──► record sale   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ saletrack-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  catalog  │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │  starter  │  │   price   │  │   │
//! │  │   │   Sale    │  │ Quantity  │  │  products │  │  quantity │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │      saletrack-db (SQLite)   ──►   saletrack-mirror (MySQL)     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Barcode, Product, Sale, SaleSummary)
//! - [`money`] - `Money` and `Quantity` over exact decimals
//! - [`catalog`] - The starter product set seeded into empty databases
//! - [`error`] - Domain error types
//! - [`validation`] - Parsing and checking operator input
//!
//! ## Example Usage
//!
//! ```rust
//! use saletrack_core::{Money, Quantity};
//!
//! let price = Money::from_cents(50); // 0.50
//! let total = price.checked_mul(Quantity::whole(3)).unwrap();
//!
//! assert_eq!(total, Money::from_cents(150));
//! ```

pub mod catalog;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

pub use catalog::{CatalogEntry, STARTER_CATALOG};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Quantity};
pub use types::*;

/// Number of rows `recent_sales` returns when the caller has no preference.
pub const DEFAULT_RECENT_SALES_LIMIT: u32 = 100;

/// Name shown for a sale whose product row no longer exists.
pub const UNKNOWN_PRODUCT_NAME: &str = "(unknown)";

/// Longest product name accepted from the operator.
///
/// Matches the `VARCHAR(500)` name column on the mirror.
pub const MAX_PRODUCT_NAME_LEN: usize = 500;
