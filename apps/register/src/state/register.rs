//! # Register
//!
//! The transaction orchestrator: one operator, one transaction at a time.
//!
//! ## Transaction Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Register Transaction Flow                           │
//! │                                                                         │
//! │  lookup("0123...")                                                     │
//! │       │                                                                 │
//! │       ├── hit  ─► current = Some(product)                              │
//! │       └── miss ─► current = None   (operator types name + price)       │
//! │                                                                         │
//! │  add_current_sale(form)                                                │
//! │       │                                                                 │
//! │       ├── 1. validate: quantity (+ name, price, total when manual)     │
//! │       │      └── Err ─► Validation, nothing written, state kept        │
//! │       │                                                                 │
//! │       ├── 2. resolve product                                           │
//! │       │      current ─────────────────► use it                         │
//! │       │      form barcode, in catalog ─► reuse existing                │
//! │       │      form barcode, not found ──► insert_if_absent              │
//! │       │      no barcode ──────────────► insert barcode-less product    │
//! │       │                                                                 │
//! │       ├── 3. NewSale::for_product (total = price × qty, exact)         │
//! │       ├── 4. ledger.record_sale (mirror forward happens inside)        │
//! │       └── 5. push onto session list, reset                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use saletrack_core::validation::{parse_quantity, parse_unit_price, validate_product_name};
use saletrack_core::{Barcode, CoreError, Money, NewSale, Product, QuantityMode, SaleSummary};
use saletrack_db::{Database, DbError};
use std::collections::VecDeque;
use tracing::{debug, info};

use crate::error::{RegisterError, RegisterResult};

/// Raw operator input for one sale line, exactly as typed.
///
/// `name` and `unit_price` are only read when no product is current.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaleForm {
    pub barcode: String,
    pub name: String,
    pub unit_price: String,
    pub quantity: String,
    pub allow_decimal: bool,
}

impl SaleForm {
    /// An empty form with the decimal toggle at its configured default.
    pub fn with_decimal_default(allow_decimal: bool) -> Self {
        SaleForm {
            allow_decimal,
            ..SaleForm::default()
        }
    }

    pub fn quantity_mode(&self) -> QuantityMode {
        QuantityMode::from_allow_decimal(self.allow_decimal)
    }
}

/// Manual entry after validation, before anything is written.
struct ManualEntry {
    barcode: Option<Barcode>,
    name: String,
    unit_price: Money,
}

/// Orchestrates lookup, product resolution and sale recording.
#[derive(Debug)]
pub struct Register {
    db: Database,
    current: Option<Product>,
    /// Lines recorded this session, newest first.
    session: VecDeque<SaleSummary>,
}

impl Register {
    pub fn new(db: Database) -> Self {
        Register {
            db,
            current: None,
            session: VecDeque::new(),
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// The product the next sale will be recorded against, if resolved.
    pub fn current_product(&self) -> Option<&Product> {
        self.current.as_ref()
    }

    /// Looks up a scanned or typed barcode and makes it the current product.
    ///
    /// A miss (or blank input) clears the current product so the operator
    /// can enter it manually.
    pub async fn lookup(&mut self, barcode: &str) -> RegisterResult<Option<Product>> {
        let product = self.db.products().find_by_barcode(barcode.trim()).await?;

        match &product {
            Some(p) => debug!(id = p.id, name = %p.name, "Product found"),
            None => debug!(barcode = %barcode.trim(), "Product not found, manual entry expected"),
        }

        self.current = product.clone();
        Ok(product)
    }

    /// Records one sale line from the form and resets for the next one.
    pub async fn add_current_sale(&mut self, form: &SaleForm) -> RegisterResult<SaleSummary> {
        // All validation before any write
        let manual = match self.current {
            Some(_) => None,
            None => Some(ManualEntry {
                barcode: Barcode::parse(&form.barcode),
                name: validate_product_name(&form.name)?,
                unit_price: parse_unit_price(&form.unit_price)?,
            }),
        };
        let quantity = parse_quantity(&form.quantity, form.quantity_mode())?;
        if let Some(entry) = &manual {
            entry
                .unit_price
                .checked_mul(quantity)
                .ok_or(CoreError::TotalOverflow {
                    unit_price: entry.unit_price,
                    quantity,
                })?;
        }

        let product = match manual {
            Some(entry) => self.resolve_manual(entry).await?,
            None => self
                .current
                .clone()
                .ok_or_else(|| RegisterError::ProductUnresolved(form.barcode.trim().to_string()))?,
        };

        let new_sale = NewSale::for_product(&product, quantity)?;
        let sale = self.db.sales().record_sale(&new_sale).await?;

        info!(
            sale_id = sale.id,
            product = %product.name,
            quantity = %sale.quantity,
            total = %sale.total,
            "Sale added"
        );

        let line = SaleSummary::from_sale(&sale, product.name);
        self.session.push_front(line.clone());
        self.reset();

        Ok(line)
    }

    /// Finds or creates the product for a manual entry. Does not touch
    /// `current`; a failed record leaves the register as it was.
    async fn resolve_manual(&self, entry: ManualEntry) -> RegisterResult<Product> {
        let products = self.db.products();

        let product = match &entry.barcode {
            Some(barcode) => match products.find_by_barcode(barcode.as_str()).await? {
                // Someone else added it since the lookup
                Some(existing) => existing,
                None => products
                    .insert_if_absent(Some(barcode), &entry.name, entry.unit_price)
                    .await
                    .map_err(|e| match e {
                        DbError::NotFound { .. } => {
                            RegisterError::ProductUnresolved(barcode.to_string())
                        }
                        other => RegisterError::Store(other),
                    })?,
            },
            None => {
                products
                    .insert_if_absent(None, &entry.name, entry.unit_price)
                    .await?
            }
        };

        Ok(product)
    }

    /// Newest-first ledger listing, across sessions.
    pub async fn recent_sales(&self, limit: u32) -> RegisterResult<Vec<SaleSummary>> {
        Ok(self.db.sales().recent_sales(limit).await?)
    }

    /// Lines recorded by this register since start, newest first.
    pub fn session_sales(&self) -> &VecDeque<SaleSummary> {
        &self.session
    }

    pub fn session_total(&self) -> Money {
        self.session.iter().map(|line| line.total).sum()
    }

    /// Forgets the current product. Session lines are kept.
    pub fn reset(&mut self) {
        self.current = None;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use saletrack_core::{Quantity, ValidationError};
    use saletrack_db::DbConfig;

    async fn setup() -> Register {
        Register::new(Database::new(DbConfig::in_memory()).await.unwrap())
    }

    fn form(quantity: &str) -> SaleForm {
        SaleForm {
            quantity: quantity.to_string(),
            ..SaleForm::default()
        }
    }

    fn manual(barcode: &str, name: &str, price: &str, quantity: &str) -> SaleForm {
        SaleForm {
            barcode: barcode.to_string(),
            name: name.to_string(),
            unit_price: price.to_string(),
            quantity: quantity.to_string(),
            allow_decimal: false,
        }
    }

    #[tokio::test]
    async fn test_scan_apple_and_sell_three() {
        let mut register = setup().await;

        let apple = register.lookup(" 012345678905 ").await.unwrap().unwrap();
        assert_eq!(apple.name, "Apple");
        assert_eq!(register.current_product(), Some(&apple));

        let line = register.add_current_sale(&form("3")).await.unwrap();
        assert_eq!(line.product_name, "Apple");
        assert_eq!(line.total, Money::new(dec!(1.50)));
        assert!(register.current_product().is_none());

        let recent = register.recent_sales(10).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].total, Money::new(dec!(1.50)));
    }

    #[tokio::test]
    async fn test_blank_lookup_clears_current() {
        let mut register = setup().await;
        register.lookup("012345678905").await.unwrap();

        assert!(register.lookup("   ").await.unwrap().is_none());
        assert!(register.current_product().is_none());
    }

    #[tokio::test]
    async fn test_lookup_miss_clears_current() {
        let mut register = setup().await;
        register.lookup("012345678905").await.unwrap();

        assert!(register.lookup("no-such-code").await.unwrap().is_none());
        assert!(register.current_product().is_none());
    }

    #[tokio::test]
    async fn test_invalid_quantity_keeps_state() {
        let mut register = setup().await;
        register.lookup("036000291452").await.unwrap();

        for bad in ["0", "-1", "1.5", "abc", ""] {
            let err = register.add_current_sale(&form(bad)).await.unwrap_err();
            assert!(err.is_recoverable(), "{bad}: {err}");
        }

        assert_eq!(register.current_product().unwrap().name, "Banana");
        assert_eq!(register.database().sales().count().await.unwrap(), 0);
        assert!(register.session_sales().is_empty());
    }

    #[tokio::test]
    async fn test_decimal_quantity_when_allowed() {
        let mut register = setup().await;
        register.lookup("049000042044").await.unwrap();

        let sale_form = SaleForm {
            quantity: "2.5".to_string(),
            allow_decimal: true,
            ..SaleForm::default()
        };
        let line = register.add_current_sale(&sale_form).await.unwrap();

        assert_eq!(line.quantity, Quantity::new(dec!(2.5)));
        assert_eq!(line.total, Money::new(dec!(3.00)));
    }

    #[tokio::test]
    async fn test_manual_entry_requires_name_and_price() {
        let mut register = setup().await;

        let err = register
            .add_current_sale(&manual("", "  ", "2.00", "1"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RegisterError::Validation(ValidationError::Required { .. })
        ));

        let err = register
            .add_current_sale(&manual("", "Candle", "cheap", "1"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RegisterError::Validation(ValidationError::NotANumber { .. })
        ));

        let err = register
            .add_current_sale(&manual("", "Candle", "-2", "1"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RegisterError::Validation(ValidationError::Negative { .. })
        ));

        assert_eq!(register.database().products().count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_invalid_quantity_on_manual_entry_writes_nothing() {
        let mut register = setup().await;

        register
            .add_current_sale(&manual("", "Candle", "3.00", "0"))
            .await
            .unwrap_err();

        assert_eq!(register.database().products().count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_overflowing_manual_total_writes_nothing() {
        let mut register = setup().await;

        let err = register
            .add_current_sale(&manual("", "Candle", "79228162514264337593543950335", "2"))
            .await
            .unwrap_err();
        assert!(err.is_recoverable(), "{err}");
        assert!(register.current_product().is_none());
        assert_eq!(register.database().products().count().await.unwrap(), 3);

        // Corrected entry is recorded as typed
        let line = register
            .add_current_sale(&manual("", "Lamp", "1.00", "1"))
            .await
            .unwrap();
        assert_eq!(line.product_name, "Lamp");
        assert_eq!(line.total, Money::new(dec!(1.00)));
        assert_eq!(register.database().sales().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_barcode_less_candle_twice_creates_two_products() {
        let mut register = setup().await;

        let first = register
            .add_current_sale(&manual("", "Candle", "3.00", "1"))
            .await
            .unwrap();
        let second = register
            .add_current_sale(&manual("", "Candle", "3.00", "2"))
            .await
            .unwrap();

        assert_eq!(first.total, Money::new(dec!(3.00)));
        assert_eq!(second.total, Money::new(dec!(6.00)));
        assert_eq!(register.database().products().count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_manual_entry_with_barcode_becomes_scannable() {
        let mut register = setup().await;

        assert!(register.lookup("5901234123457").await.unwrap().is_none());
        register
            .add_current_sale(&manual("5901234123457", "Soap", "2.00", "1"))
            .await
            .unwrap();

        let soap = register.lookup("5901234123457").await.unwrap().unwrap();
        assert_eq!(soap.name, "Soap");
        assert_eq!(soap.unit_price, Money::new(dec!(2.00)));
    }

    #[tokio::test]
    async fn test_manual_entry_reuses_existing_barcode_product() {
        let mut register = setup().await;

        // Operator never looked it up, but the barcode is already in the catalog
        let line = register
            .add_current_sale(&manual("012345678905", "Red Apple", "9.99", "2"))
            .await
            .unwrap();

        assert_eq!(line.product_name, "Apple");
        assert_eq!(line.total, Money::new(dec!(1.00)));
        assert_eq!(register.database().products().count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_zero_price_is_accepted() {
        let mut register = setup().await;

        let line = register
            .add_current_sale(&manual("", "Free Sample", "0", "4"))
            .await
            .unwrap();

        assert!(line.total.is_zero());
    }

    #[tokio::test]
    async fn test_session_is_newest_first_and_totalled() {
        let mut register = setup().await;

        register.lookup("012345678905").await.unwrap();
        register.add_current_sale(&form("1")).await.unwrap();
        register.lookup("049000042044").await.unwrap();
        register.add_current_sale(&form("2")).await.unwrap();

        let names: Vec<&str> = register
            .session_sales()
            .iter()
            .map(|line| line.product_name.as_str())
            .collect();
        assert_eq!(names, vec!["Milk", "Apple"]);
        assert_eq!(register.session_total(), Money::new(dec!(2.90)));
    }

    #[tokio::test]
    async fn test_reset_forgets_current_product_only() {
        let mut register = setup().await;
        register.lookup("012345678905").await.unwrap();
        register.add_current_sale(&form("1")).await.unwrap();
        register.lookup("012345678905").await.unwrap();

        register.reset();

        assert!(register.current_product().is_none());
        assert_eq!(register.session_sales().len(), 1);
    }
}
