//! # SaleTrack Register
//!
//! Library behind the `saletrack` binary: configuration, logging setup and
//! the terminal loop around the [`Register`] orchestrator.
//!
//! ## Module Organization
//! ```text
//! saletrack_register/
//! ├── lib.rs          ◄─── You are here (startup & run loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── RegisterConfig (file + env)
//! │   └── register.rs ◄─── Register orchestrator, SaleForm
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command parsing, Console
//! │   ├── product.rs  ◄─── scan / name / price
//! │   └── sale.rs     ◄─── add / recent / session / export
//! └── error.rs        ◄─── RegisterError
//! ```

pub mod commands;
pub mod error;
pub mod state;

use saletrack_db::{Database, DbConfig};
use saletrack_mirror::RemoteMirror;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub use commands::{Command, Console, Flow};
pub use error::{RegisterError, RegisterResult};
pub use state::{Register, RegisterConfig, SaleForm};

/// Runs the register until `quit` or end of input.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Resolve database path (config / env / platform data dir)           │
/// │  2. Build RemoteMirror from config (never fails)                       │
/// │  3. Database::open → migrations, seeding, mirror.ensure_schema         │
/// │  4. Show recent sales                                                  │
/// │  5. Read commands from stdin until quit / EOF                          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(config: RegisterConfig) -> RegisterResult<()> {
    let db_path = config.resolve_database_path()?;
    info!(?db_path, "Database path determined");

    let mirror = RemoteMirror::new(&config.mirror);
    let db = Database::open(DbConfig::new(db_path), mirror).await?;

    let mut console = Console::new(
        Register::new(db.clone()),
        config.allow_decimal_quantity,
        config.recent_sales_limit,
    );

    let mut stdout = std::io::stdout();
    writeln!(stdout, "SaleTrack register. Type 'help' for commands.")?;
    commands::sale::recent(&console, config.recent_sales_limit, &mut stdout).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match console.handle_line(&line, &mut stdout).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) if e.is_recoverable() => writeln!(stdout, "{e}")?,
            Err(e) => {
                error!(error = %e, "Operation failed");
                writeln!(stdout, "Error: {e}")?;
            }
        }
    }

    info!("Register shutting down");
    db.close().await;
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so they never interleave with the register's output.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=saletrack_mirror=trace` - One crate only
/// - Default: `info,saletrack=debug,sqlx=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,saletrack=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
