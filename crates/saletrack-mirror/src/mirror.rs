//! # Remote Mirror
//!
//! One fresh MySQL connection per call, bounded by a timeout, closed on
//! every path. Nothing is pooled, queued or retried.
//!
//! ## Remote Tables
//! ```text
//! Products(Id, Barcode UNIQUE, Name, UnitPrice DECIMAL(18,4))
//! Sales(Id, ProductId, Quantity, UnitPrice, Total DECIMAL(18,4), SoldAt DATETIME)
//! ```
//!
//! Only `Sales` is written to. `Products` exists so the central database
//! has the same shape as a register's.

use chrono::Utc;
use saletrack_core::NewSale;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::Connection;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::{parse_descriptor, MirrorConfig};
use crate::error::{MirrorError, MirrorResult};

const CREATE_PRODUCTS: &str = r#"
CREATE TABLE IF NOT EXISTS Products (
    Id INT AUTO_INCREMENT PRIMARY KEY,
    Barcode VARCHAR(200) UNIQUE,
    Name VARCHAR(500),
    UnitPrice DECIMAL(18,4)
)"#;

const CREATE_SALES: &str = r#"
CREATE TABLE IF NOT EXISTS Sales (
    Id INT AUTO_INCREMENT PRIMARY KEY,
    ProductId INT,
    Quantity DECIMAL(18,4),
    UnitPrice DECIMAL(18,4),
    Total DECIMAL(18,4),
    SoldAt DATETIME
)"#;

const INSERT_SALE: &str = r#"
INSERT INTO Sales (ProductId, Quantity, UnitPrice, Total, SoldAt)
VALUES (?, ?, ?, ?, ?)
"#;

// =============================================================================
// Outcome
// =============================================================================

/// What happened to one mirror operation.
///
/// Deliberately not a `Result`: a failed mirror is never an error for the
/// caller, only something to log.
#[derive(Debug)]
#[must_use]
pub enum MirrorOutcome {
    /// No descriptor configured; nothing was attempted.
    Disabled,
    /// The remote statement(s) completed.
    Mirrored,
    /// The attempt failed and was abandoned.
    Failed(MirrorError),
}

impl MirrorOutcome {
    fn from_result(result: MirrorResult<()>) -> Self {
        match result {
            Ok(()) => MirrorOutcome::Mirrored,
            Err(e) => MirrorOutcome::Failed(e),
        }
    }

    pub fn is_mirrored(&self) -> bool {
        matches!(self, MirrorOutcome::Mirrored)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, MirrorOutcome::Failed(_))
    }

    pub fn error(&self) -> Option<&MirrorError> {
        match self {
            MirrorOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

// =============================================================================
// RemoteMirror
// =============================================================================

#[derive(Clone)]
enum MirrorTarget {
    Disabled,
    Configured(Arc<MySqlConnectOptions>),
    /// Descriptor present but unparseable. Every call reports the parse error.
    Misconfigured(Arc<str>),
}

/// Handle to the optional central database. Cheap to clone.
#[derive(Clone)]
pub struct RemoteMirror {
    target: MirrorTarget,
    timeout: Duration,
}

// Connect options carry the password.
impl fmt::Debug for RemoteMirror {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.target {
            MirrorTarget::Disabled => "disabled",
            MirrorTarget::Configured(_) => "configured",
            MirrorTarget::Misconfigured(_) => "misconfigured",
        };
        f.debug_struct("RemoteMirror")
            .field("state", &state)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for RemoteMirror {
    fn default() -> Self {
        Self::disabled()
    }
}

impl RemoteMirror {
    /// Builds a mirror from config. Never fails: a bad descriptor yields a
    /// mirror whose operations all return [`MirrorOutcome::Failed`].
    pub fn new(config: &MirrorConfig) -> Self {
        let target = match config.descriptor() {
            None => MirrorTarget::Disabled,
            Some(descriptor) => match parse_descriptor(descriptor) {
                Ok(options) => MirrorTarget::Configured(Arc::new(options)),
                Err(e) => {
                    warn!(error = %e, "Mirror descriptor rejected; mirroring will fail");
                    MirrorTarget::Misconfigured(e.to_string().into())
                }
            },
        };

        Self {
            target,
            timeout: config.timeout(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            target: MirrorTarget::Disabled,
            timeout: MirrorConfig::default().timeout(),
        }
    }

    /// True when a descriptor is configured, valid or not.
    pub fn is_enabled(&self) -> bool {
        !matches!(self.target, MirrorTarget::Disabled)
    }

    /// Creates the remote tables if they do not exist.
    pub async fn ensure_schema(&self) -> MirrorOutcome {
        let options = match self.options() {
            Ok(Some(options)) => options,
            Ok(None) => return MirrorOutcome::Disabled,
            Err(e) => return MirrorOutcome::Failed(e),
        };

        let result = self
            .bounded(async {
                let mut conn = connect(options).await?;

                for ddl in [CREATE_PRODUCTS, CREATE_SALES] {
                    sqlx::query(ddl)
                        .execute(&mut conn)
                        .await
                        .map_err(|e| MirrorError::SchemaFailed(e.to_string()))?;
                }

                close(conn).await
            })
            .await;

        let outcome = MirrorOutcome::from_result(result);
        if outcome.is_mirrored() {
            debug!("Mirror schema ensured");
        }
        outcome
    }

    /// Inserts one copy of `sale` into the remote `Sales` table.
    ///
    /// `SoldAt` is the mirror-side clock at forward time and may differ
    /// slightly from the local row's timestamp.
    pub async fn forward_sale(&self, sale: &NewSale) -> MirrorOutcome {
        let options = match self.options() {
            Ok(Some(options)) => options,
            Ok(None) => return MirrorOutcome::Disabled,
            Err(e) => return MirrorOutcome::Failed(e),
        };

        let result = self
            .bounded(async {
                let mut conn = connect(options).await?;

                sqlx::query(INSERT_SALE)
                    .bind(sale.product_id)
                    .bind(sale.quantity.value())
                    .bind(sale.unit_price.amount())
                    .bind(sale.total.amount())
                    .bind(Utc::now().naive_utc())
                    .execute(&mut conn)
                    .await
                    .map_err(|e| MirrorError::ForwardFailed(e.to_string()))?;

                close(conn).await
            })
            .await;

        let outcome = MirrorOutcome::from_result(result);
        if outcome.is_mirrored() {
            debug!(product_id = sale.product_id, "Sale mirrored");
        }
        outcome
    }

    fn options(&self) -> MirrorResult<Option<&MySqlConnectOptions>> {
        match &self.target {
            MirrorTarget::Disabled => Ok(None),
            MirrorTarget::Configured(options) => Ok(Some(options.as_ref())),
            MirrorTarget::Misconfigured(reason) => {
                Err(MirrorError::InvalidDescriptor(reason.to_string()))
            }
        }
    }

    /// Dropping the future on timeout drops (and so closes) the connection.
    async fn bounded<F>(&self, fut: F) -> MirrorResult<()>
    where
        F: Future<Output = MirrorResult<()>>,
    {
        tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| MirrorError::Timeout(self.timeout.as_secs()))?
    }
}

async fn connect(options: &MySqlConnectOptions) -> MirrorResult<MySqlConnection> {
    MySqlConnection::connect_with(options)
        .await
        .map_err(|e| MirrorError::ConnectionFailed(e.to_string()))
}

async fn close(conn: MySqlConnection) -> MirrorResult<()> {
    conn.close()
        .await
        .map_err(|e| MirrorError::ConnectionFailed(e.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================
