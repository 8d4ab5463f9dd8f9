//! # Sale Repository
//!
//! The local ledger: append-only, immutable sale rows, plus the best-effort
//! forward of each new row to the remote mirror.
//!
//! ## record_sale
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  record_sale(&NewSale)                                                 │
//! │       │                                                                 │
//! │       ├── 1. INSERT INTO sales (..., sold_at = now)                    │
//! │       │      └── Err ──► DbError returned, mirror NOT contacted        │
//! │       │                                                                 │
//! │       ├── 2. mirror.forward_sale(&NewSale)   (exactly once)            │
//! │       │      ├── Disabled  ─► nothing                                  │
//! │       │      ├── Mirrored  ─► debug!                                   │
//! │       │      └── Failed(e) ─► warn!, dropped                           │
//! │       │                                                                 │
//! │       └── 3. Ok(Sale)  regardless of step 2                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{SubsecRound, Utc};
use saletrack_core::{Money, NewSale, Quantity, Sale, SaleSummary, UNKNOWN_PRODUCT_NAME};
use saletrack_mirror::{MirrorOutcome, RemoteMirror};
use sqlx::SqlitePool;
use tracing::{debug, warn};

use super::{decode_decimal_or_zero, decode_timestamp, encode_decimal, encode_timestamp};
use crate::error::DbResult;

#[derive(Debug, sqlx::FromRow)]
struct SaleSummaryRow {
    product_name: Option<String>,
    unit_price: Option<String>,
    quantity: Option<String>,
    total: Option<String>,
    sold_at: Option<String>,
}

impl TryFrom<SaleSummaryRow> for SaleSummary {
    type Error = crate::DbError;

    fn try_from(row: SaleSummaryRow) -> DbResult<Self> {
        Ok(SaleSummary {
            product_name: row
                .product_name
                .unwrap_or_else(|| UNKNOWN_PRODUCT_NAME.to_string()),
            unit_price: Money::new(decode_decimal_or_zero(
                "sales.unit_price",
                row.unit_price.as_deref(),
            )?),
            quantity: Quantity::new(decode_decimal_or_zero(
                "sales.quantity",
                row.quantity.as_deref(),
            )?),
            total: Money::new(decode_decimal_or_zero("sales.total", row.total.as_deref())?),
            sold_at: row
                .sold_at
                .as_deref()
                .map(|raw| decode_timestamp("sales.sold_at", raw))
                .transpose()?,
        })
    }
}

/// Repository for ledger operations.
///
/// ## Usage
/// ```rust,ignore
/// let sale = db.sales().record_sale(&NewSale::for_product(&apple, qty)?).await?;
/// let recent = db.sales().recent_sales(DEFAULT_RECENT_SALES_LIMIT).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
    mirror: RemoteMirror,
}

impl SaleRepository {
    /// Creates a new SaleRepository forwarding to `mirror`.
    pub fn new(pool: SqlitePool, mirror: RemoteMirror) -> Self {
        SaleRepository { pool, mirror }
    }

    /// Appends a sale to the ledger and forwards a copy to the mirror.
    ///
    /// No validation happens here; the caller has already checked quantity
    /// and computed the total. Only the local insert can fail this call.
    pub async fn record_sale(&self, sale: &NewSale) -> DbResult<Sale> {
        // Stored at microsecond precision; keep the returned value identical
        let sold_at = Utc::now().trunc_subsecs(6);

        let id = sqlx::query(
            r#"
            INSERT INTO sales (product_id, quantity, unit_price, total, sold_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(sale.product_id)
        .bind(encode_decimal(sale.quantity.value()))
        .bind(encode_decimal(sale.unit_price.amount()))
        .bind(encode_decimal(sale.total.amount()))
        .bind(encode_timestamp(sold_at))
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        debug!(
            id,
            product_id = sale.product_id,
            quantity = %sale.quantity,
            total = %sale.total,
            "Sale recorded locally"
        );

        match self.mirror.forward_sale(sale).await {
            MirrorOutcome::Disabled | MirrorOutcome::Mirrored => {}
            MirrorOutcome::Failed(e) => {
                warn!(sale_id = id, error = %e, "Sale not mirrored");
            }
        }

        Ok(Sale {
            id,
            product_id: sale.product_id,
            quantity: sale.quantity,
            unit_price: sale.unit_price,
            total: sale.total,
            sold_at,
        })
    }

    /// The `limit` most recently inserted sales, newest first.
    ///
    /// Sales whose product is missing are listed as `"(unknown)"`.
    pub async fn recent_sales(&self, limit: u32) -> DbResult<Vec<SaleSummary>> {
        let rows = sqlx::query_as::<_, SaleSummaryRow>(
            r#"
            SELECT
                p.name       AS product_name,
                s.unit_price AS unit_price,
                s.quantity   AS quantity,
                s.total      AS total,
                s.sold_at    AS sold_at
            FROM sales s
            LEFT JOIN products p ON p.id = s.product_id
            ORDER BY s.id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), limit, "Loaded recent sales");

        rows.into_iter().map(SaleSummary::try_from).collect()
    }

    /// Number of sales in the ledger.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
