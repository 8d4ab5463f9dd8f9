//! # Product Commands
//!
//! `scan`, `name` and `price`. A scan that misses switches the line to
//! manual entry; name and price are only used in that case.

use std::io::Write;

use super::Console;
use crate::error::RegisterResult;

pub async fn scan(console: &mut Console, barcode: &str, out: &mut impl Write) -> RegisterResult<()> {
    let barcode = barcode.trim();
    console.form.barcode = barcode.to_string();

    match console.register.lookup(barcode).await? {
        Some(product) => {
            // Fill the manual fields so the operator sees what will be used
            console.form.name = product.name.clone();
            console.form.unit_price = product.unit_price.amount().to_string();
            writeln!(out, "{} @ {}", product.name, product.unit_price)?;
        }
        None if barcode.is_empty() => {
            console.form.name.clear();
            console.form.unit_price.clear();
        }
        None => {
            console.form.name.clear();
            console.form.unit_price.clear();
            writeln!(
                out,
                "No product for '{barcode}'. Enter name and price, then add."
            )?;
        }
    }

    Ok(())
}

pub fn set_name(console: &mut Console, name: String) {
    console.form.name = name;
}

pub fn set_price(console: &mut Console, price: String) {
    console.form.unit_price = price;
}
