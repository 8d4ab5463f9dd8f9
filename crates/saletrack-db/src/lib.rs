//! # saletrack-db: Local Store for SaleTrack
//!
//! Catalog and ledger access over a single SQLite file, with sqlx for async
//! operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SaleTrack Data Flow                              │
//! │                                                                         │
//! │  Register::add_current_sale                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   saletrack-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ ProductRepo   │    │ 0001_initial │  │   │
//! │  │   │ SqlitePool    │◄───│ SaleRepo ─────┼──┐ │              │  │   │
//! │  │   │ RemoteMirror  │    │               │  │ │              │  │   │
//! │  │   └───────────────┘    └───────────────┘  │ └──────────────┘  │   │
//! │  └───────────────────────────────────────────┼─────────────────────┘   │
//! │       │                                      │ forward_sale            │
//! │       ▼                                      ▼ (best effort)           │
//! │  ┌──────────────────────────┐   ┌──────────────────────────┐          │
//! │  │  SQLite (authoritative)  │   │  MySQL mirror (optional) │          │
//! │  └──────────────────────────┘   └──────────────────────────┘          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Pool creation, `initialize`, starter catalog seeding
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Catalog and ledger repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use saletrack_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("saletrack.db")).await?;
//!
//! let apple = db.products().find_by_barcode("012345678905").await?;
//! let recent = db.sales().recent_sales(100).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
