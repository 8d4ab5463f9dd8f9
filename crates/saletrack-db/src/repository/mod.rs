//! # Repository Module
//!
//! Catalog and ledger access behind small, SQL-owning types.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Register                                                              │
//! │       │  db.products().find_by_barcode("012345678905")                 │
//! │       │  db.sales().record_sale(&new_sale)                             │
//! │       ▼                                                                 │
//! │  ProductRepository              SaleRepository                         │
//! │  ├── find_by_barcode            ├── record_sale ──► RemoteMirror       │
//! │  ├── insert_if_absent           ├── recent_sales                       │
//! │  ├── get_by_id                  └── count                              │
//! │  └── count                                                             │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Column Encoding
//! Decimals are TEXT (`"0.50"`), timestamps RFC 3339 UTC TEXT. The helpers
//! below are the only place either conversion happens.

pub mod product;
pub mod sale;

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::{DbError, DbResult};

pub(crate) fn encode_decimal(value: Decimal) -> String {
    value.to_string()
}

pub(crate) fn decode_decimal(column: &str, raw: &str) -> DbResult<Decimal> {
    Decimal::from_str(raw.trim()).map_err(|_| DbError::decode(column, raw))
}

/// NULL reads as zero; a present but malformed value is still an error.
pub(crate) fn decode_decimal_or_zero(column: &str, raw: Option<&str>) -> DbResult<Decimal> {
    match raw {
        Some(raw) => decode_decimal(column, raw),
        None => Ok(Decimal::ZERO),
    }
}

pub(crate) fn encode_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn decode_timestamp(column: &str, raw: &str) -> DbResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|at| at.with_timezone(&Utc))
        .map_err(|_| DbError::decode(column, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_decimal_text_keeps_scale() {
        assert_eq!(encode_decimal(dec!(0.50)), "0.50");
        assert_eq!(decode_decimal("x", "1.2500").unwrap(), dec!(1.25));
    }

    #[test]
    fn test_decimal_decode_errors_name_the_column() {
        let err = decode_decimal("sales.total", "abc").unwrap_err();
        assert!(matches!(err, DbError::Decode { ref column, .. } if column == "sales.total"));
    }

    #[test]
    fn test_missing_decimal_is_zero() {
        assert_eq!(decode_decimal_or_zero("x", None).unwrap(), Decimal::ZERO);
        assert!(decode_decimal_or_zero("x", Some("")).is_err());
    }

    #[test]
    fn test_timestamp_text() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let text = encode_timestamp(at);
        assert_eq!(text, "2024-03-01T09:30:00.000000Z");
        assert_eq!(decode_timestamp("x", &text).unwrap(), at);
        assert!(decode_timestamp("x", "yesterday").is_err());
    }
}
