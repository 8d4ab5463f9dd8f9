//! # Starter Catalog
//!
//! The fixed product set written into a brand-new database so the register
//! can scan something on day one. Seeding only happens while the product
//! table is empty; see `saletrack_db::Database::initialize`.

use crate::money::Money;
use crate::types::Barcode;

/// One literal row of the starter catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub barcode: &'static str,
    pub name: &'static str,
    pub unit_price_cents: i64,
}

impl CatalogEntry {
    pub fn barcode(&self) -> Barcode {
        Barcode::from_static(self.barcode)
    }

    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

/// Products seeded on first-ever initialization.
pub const STARTER_CATALOG: [CatalogEntry; 3] = [
    CatalogEntry {
        barcode: "012345678905",
        name: "Apple",
        unit_price_cents: 50,
    },
    CatalogEntry {
        barcode: "036000291452",
        name: "Banana",
        unit_price_cents: 30,
    },
    CatalogEntry {
        barcode: "049000042044",
        name: "Milk",
        unit_price_cents: 120,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_starter_catalog_literals() {
        let rows: Vec<(String, &str, Money)> = STARTER_CATALOG
            .iter()
            .map(|e| (e.barcode().to_string(), e.name, e.unit_price()))
            .collect();

        assert_eq!(
            rows,
            vec![
                ("012345678905".to_string(), "Apple", Money::new(dec!(0.50))),
                ("036000291452".to_string(), "Banana", Money::new(dec!(0.30))),
                ("049000042044".to_string(), "Milk", Money::new(dec!(1.20))),
            ]
        );
    }

    #[test]
    fn test_starter_barcodes_are_unique() {
        let mut codes: Vec<&str> = STARTER_CATALOG.iter().map(|e| e.barcode).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), STARTER_CATALOG.len());
    }
}
