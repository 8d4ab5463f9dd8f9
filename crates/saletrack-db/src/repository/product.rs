//! # Product Repository
//!
//! The catalog: lookup by barcode and insert-if-absent. Products are never
//! updated or deleted.
//!
//! ## Barcode Uniqueness
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  insert_if_absent(Some("123"), "Soap", 2.00)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  INSERT OR IGNORE ... ← UNIQUE(barcode) silently drops a duplicate     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SELECT ... WHERE barcode = '123'  ← first writer's row comes back     │
//! │                                                                         │
//! │  insert_if_absent(None, "Candle", 3.00)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  INSERT (barcode NULL) ← NULLs never collide; always a new row         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use saletrack_core::{Barcode, Money, Product};
use sqlx::SqlitePool;
use tracing::debug;

use super::{decode_decimal, encode_decimal};
use crate::error::{DbError, DbResult};

const SELECT_PRODUCT: &str = "SELECT id, barcode, name, unit_price FROM products";

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    barcode: Option<String>,
    name: String,
    unit_price: String,
}

impl TryFrom<ProductRow> for Product {
    type Error = DbError;

    fn try_from(row: ProductRow) -> DbResult<Self> {
        Ok(Product {
            id: row.id,
            barcode: row.barcode.as_deref().and_then(Barcode::parse),
            unit_price: Money::new(decode_decimal("products.unit_price", &row.unit_price)?),
            name: row.name,
        })
    }
}

/// Repository for catalog operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// if let Some(product) = repo.find_by_barcode("012345678905").await? {
///     println!("{} @ {}", product.name, product.unit_price);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Finds the product carrying exactly `barcode`.
    ///
    /// Blank input returns `Ok(None)` without a query. Otherwise the match is
    /// exact and case-sensitive; callers trim scanner input beforehand.
    pub async fn find_by_barcode(&self, barcode: &str) -> DbResult<Option<Product>> {
        if barcode.trim().is_empty() {
            return Ok(None);
        }

        debug!(barcode = %barcode, "Looking up product");

        let row = sqlx::query_as::<_, ProductRow>(&format!("{SELECT_PRODUCT} WHERE barcode = ?"))
            .bind(barcode)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Product::try_from).transpose()
    }

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!("{SELECT_PRODUCT} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Product::try_from).transpose()
    }

    /// Adds a product unless its barcode is already taken.
    ///
    /// ## Returns
    /// * With a barcode: the stored product for that barcode. If one already
    ///   existed it is returned unchanged and `name`/`unit_price` are ignored.
    /// * Without a barcode: a newly inserted product.
    pub async fn insert_if_absent(
        &self,
        barcode: Option<&Barcode>,
        name: &str,
        unit_price: Money,
    ) -> DbResult<Product> {
        let price = encode_decimal(unit_price.amount());

        match barcode {
            Some(barcode) => {
                let result = sqlx::query(
                    "INSERT OR IGNORE INTO products (barcode, name, unit_price) VALUES (?, ?, ?)",
                )
                .bind(barcode.as_str())
                .bind(name)
                .bind(&price)
                .execute(&self.pool)
                .await?;

                debug!(
                    barcode = %barcode,
                    inserted = result.rows_affected() == 1,
                    "insert_if_absent"
                );

                self.find_by_barcode(barcode.as_str())
                    .await?
                    .ok_or_else(|| DbError::not_found("Product", barcode.as_str()))
            }
            None => {
                let id = sqlx::query(
                    "INSERT INTO products (barcode, name, unit_price) VALUES (NULL, ?, ?)",
                )
                .bind(name)
                .bind(&price)
                .execute(&self.pool)
                .await?
                .last_insert_rowid();

                debug!(id, name = %name, "Inserted product without barcode");

                Ok(Product {
                    id,
                    barcode: None,
                    name: name.to_string(),
                    unit_price,
                })
            }
        }
    }

    /// Number of products in the catalog.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
