//! # Terminal Commands
//!
//! Line-oriented front end over [`Register`]. Each input line is one
//! command; the console keeps the half-filled [`SaleForm`] between lines the
//! way a form keeps its fields.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (parsing, dispatch)
//! ├── product.rs  ◄─── scan, name, price
//! └── sale.rs     ◄─── add, recent, session, export
//! ```
//!
//! ## Session Example
//! ```text
//! > scan 012345678905
//! Apple @ $0.50
//! > qty 3
//! > add
//! Recorded: Apple  3 x $0.50 = $1.50
//! > scan 999
//! No product for '999'. Enter name and price, then add.
//! > name Candle
//! > price 3.00
//! > qty 1
//! > add
//! Recorded: Candle  1 x $3.00 = $3.00
//! ```

pub mod product;
pub mod sale;

use std::io::Write;
use std::str::FromStr;

use crate::error::{RegisterError, RegisterResult};
use crate::state::{Register, SaleForm};

pub const HELP: &str = "\
Commands:
  scan <barcode>     look up a product (blank clears)
  name <text>        product name for manual entry
  price <amount>     unit price for manual entry
  qty <amount>       quantity for this line
  decimal on|off     allow fractional quantities for this line
  add                record the line
  recent [n]         newest sales from the ledger
  session            lines recorded since start
  export             session lines as JSON
  clear              discard the current line
  help               this text
  quit               exit";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Scan(String),
    Name(String),
    Price(String),
    Quantity(String),
    Decimal(bool),
    Add,
    Recent(Option<u32>),
    Session,
    Export,
    Clear,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = RegisterError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "scan" | "s" => Command::Scan(rest.to_string()),
            "name" => Command::Name(rest.to_string()),
            "price" => Command::Price(rest.to_string()),
            "qty" | "quantity" | "q" => Command::Quantity(rest.to_string()),
            "decimal" => match rest.to_ascii_lowercase().as_str() {
                "on" | "yes" | "true" => Command::Decimal(true),
                "off" | "no" | "false" => Command::Decimal(false),
                _ => return Err(RegisterError::usage("usage: decimal on|off")),
            },
            "add" | "a" => Command::Add,
            "recent" | "r" => match rest {
                "" => Command::Recent(None),
                n => Command::Recent(Some(
                    n.parse()
                        .map_err(|_| RegisterError::usage("usage: recent [count]"))?,
                )),
            },
            "session" => Command::Session,
            "export" => Command::Export,
            "clear" | "c" => Command::Clear,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => {
                return Err(RegisterError::usage(format!(
                    "unknown command '{other}' (type 'help')"
                )))
            }
        };

        Ok(command)
    }
}

/// Whether the input loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A register plus the form fields typed so far.
#[derive(Debug)]
pub struct Console {
    register: Register,
    form: SaleForm,
    allow_decimal_default: bool,
    recent_limit: u32,
}

impl Console {
    pub fn new(register: Register, allow_decimal_default: bool, recent_limit: u32) -> Self {
        Console {
            register,
            form: SaleForm::with_decimal_default(allow_decimal_default),
            allow_decimal_default,
            recent_limit,
        }
    }

    pub fn register(&self) -> &Register {
        &self.register
    }

    pub fn form(&self) -> &SaleForm {
        &self.form
    }

    /// Clears every transient field, including the decimal toggle.
    pub fn reset_form(&mut self) {
        self.form = SaleForm::with_decimal_default(self.allow_decimal_default);
        self.register.reset();
    }

    /// Parses and runs one input line. Blank lines do nothing.
    pub async fn handle_line(&mut self, line: &str, out: &mut impl Write) -> RegisterResult<Flow> {
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }

        let command: Command = line.parse()?;
        self.execute(command, out).await
    }

    pub async fn execute(&mut self, command: Command, out: &mut impl Write) -> RegisterResult<Flow> {
        match command {
            Command::Scan(barcode) => product::scan(self, &barcode, out).await?,
            Command::Name(name) => product::set_name(self, name),
            Command::Price(price) => product::set_price(self, price),
            Command::Quantity(quantity) => self.form.quantity = quantity,
            Command::Decimal(allow) => self.form.allow_decimal = allow,
            Command::Add => sale::add(self, out).await?,
            Command::Recent(limit) => {
                let limit = limit.unwrap_or(self.recent_limit);
                sale::recent(self, limit, out).await?
            }
            Command::Session => sale::session(self, out)?,
            Command::Export => sale::export(self, out)?,
            Command::Clear => self.reset_form(),
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saletrack_db::{Database, DbConfig};

    async fn console() -> Console {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        Console::new(Register::new(db), false, 100)
    }

    async fn run(console: &mut Console, line: &str) -> String {
        let mut out = Vec::new();
        console.handle_line(line, &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "scan 012345678905".parse::<Command>().unwrap(),
            Command::Scan("012345678905".into())
        );
        assert_eq!("scan".parse::<Command>().unwrap(), Command::Scan(String::new()));
        assert_eq!(
            "name  Scented Candle ".parse::<Command>().unwrap(),
            Command::Name("Scented Candle".into())
        );
        assert_eq!("QTY 2".parse::<Command>().unwrap(), Command::Quantity("2".into()));
        assert_eq!("decimal on".parse::<Command>().unwrap(), Command::Decimal(true));
        assert_eq!("recent".parse::<Command>().unwrap(), Command::Recent(None));
        assert_eq!("recent 5".parse::<Command>().unwrap(), Command::Recent(Some(5)));
        assert_eq!("exit".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_errors_are_usage_errors() {
        for bad in ["sell 3", "decimal maybe", "recent lots"] {
            let err = bad.parse::<Command>().unwrap_err();
            assert!(matches!(err, RegisterError::Usage(_)), "{bad}");
            assert!(err.is_recoverable());
        }
    }

    #[tokio::test]
    async fn test_scan_qty_add_flow() {
        let mut console = console().await;

        let shown = run(&mut console, "scan 012345678905").await;
        assert!(shown.contains("Apple"));

        run(&mut console, "qty 3").await;
        let recorded = run(&mut console, "add").await;
        assert!(recorded.contains("$1.50"), "{recorded}");

        assert_eq!(console.form(), &SaleForm::default());
        assert_eq!(console.register().session_sales().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_add_keeps_form() {
        let mut console = console().await;
        run(&mut console, "scan 012345678905").await;
        run(&mut console, "qty 1.5").await;

        let mut out = Vec::new();
        let err = console.handle_line("add", &mut out).await.unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(console.form().quantity, "1.5");
        assert!(console.register().current_product().is_some());

        run(&mut console, "decimal on").await;
        let recorded = run(&mut console, "add").await;
        assert!(recorded.contains("$0.75"), "{recorded}");

        // Toggle goes back to its default after a recorded line
        assert!(!console.form().allow_decimal);
    }

    #[tokio::test]
    async fn test_blank_line_and_quit() {
        let mut console = console().await;
        let mut out = Vec::new();

        assert_eq!(console.handle_line("   ", &mut out).await.unwrap(), Flow::Continue);
        assert_eq!(console.handle_line("quit", &mut out).await.unwrap(), Flow::Quit);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_clear_discards_line() {
        let mut console = console().await;
        run(&mut console, "scan 012345678905").await;
        run(&mut console, "qty 4").await;

        run(&mut console, "clear").await;

        assert_eq!(console.form(), &SaleForm::default());
        assert!(console.register().current_product().is_none());
    }
}
