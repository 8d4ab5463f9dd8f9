//! # Sale Commands
//!
//! `add` records the current line; `recent`, `session` and `export` list
//! what has been recorded.

use chrono::{DateTime, Local, Utc};
use saletrack_core::SaleSummary;
use serde::{Deserialize, Serialize};
use std::io::Write;

use super::Console;
use crate::error::{RegisterError, RegisterResult};

/// Sale line DTO for JSON export.
///
/// Amounts are decimal strings so no precision is lost in transit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SaleLineDto {
    pub product_name: String,
    pub unit_price: String,
    pub quantity: String,
    pub total: String,
    pub sold_at: Option<DateTime<Utc>>,
}

impl From<&SaleSummary> for SaleLineDto {
    fn from(line: &SaleSummary) -> Self {
        SaleLineDto {
            product_name: line.product_name.clone(),
            unit_price: line.unit_price.amount().to_string(),
            quantity: line.quantity.to_string(),
            total: line.total.amount().to_string(),
            sold_at: line.sold_at,
        }
    }
}

/// `Apple  3 x $0.50 = $1.50`
pub fn format_line(line: &SaleSummary) -> String {
    format!(
        "{}  {} x {} = {}",
        line.product_name, line.quantity, line.unit_price, line.total
    )
}

fn format_timestamp(sold_at: Option<DateTime<Utc>>) -> String {
    match sold_at {
        Some(at) => at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        None => "----------------".to_string(),
    }
}

pub async fn add(console: &mut Console, out: &mut impl Write) -> RegisterResult<()> {
    let line = console.register.add_current_sale(&console.form).await?;
    console.reset_form();

    writeln!(out, "Recorded: {}", format_line(&line))?;
    Ok(())
}

pub async fn recent(console: &Console, limit: u32, out: &mut impl Write) -> RegisterResult<()> {
    let lines = console.register.recent_sales(limit).await?;
    write_listing(&lines, out)
}

pub fn session(console: &Console, out: &mut impl Write) -> RegisterResult<()> {
    let register = &console.register;
    write_listing(register.session_sales(), out)?;

    if !register.session_sales().is_empty() {
        writeln!(out, "Session total: {}", register.session_total())?;
    }
    Ok(())
}

pub fn export(console: &Console, out: &mut impl Write) -> RegisterResult<()> {
    let lines: Vec<SaleLineDto> = console
        .register
        .session_sales()
        .iter()
        .map(SaleLineDto::from)
        .collect();

    let json = serde_json::to_string_pretty(&lines)
        .map_err(|e| RegisterError::Io(std::io::Error::other(e)))?;
    writeln!(out, "{json}")?;
    Ok(())
}

/// Writes lines in the order given; no lines prints a placeholder.
pub fn write_listing<'a>(
    lines: impl IntoIterator<Item = &'a SaleSummary>,
    out: &mut impl Write,
) -> RegisterResult<()> {
    let mut lines = lines.into_iter().peekable();
    if lines.peek().is_none() {
        writeln!(out, "(no sales)")?;
        return Ok(());
    }

    for line in lines {
        writeln!(out, "{}  {}", format_timestamp(line.sold_at), format_line(line))?;
    }
    Ok(())
}
