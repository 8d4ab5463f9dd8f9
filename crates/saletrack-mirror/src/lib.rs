//! # saletrack-mirror: Remote Sale Mirror
//!
//! Forwards a copy of each locally recorded sale to a central MySQL
//! database, at most once and without ever failing the caller.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Dual Write Path                                  │
//! │                                                                         │
//! │  Register ──► SaleRepository::record_sale                              │
//! │                   │                                                     │
//! │                   ├── 1. INSERT INTO sales (SQLite)   ← authoritative  │
//! │                   │       failure: DbError, propagated                 │
//! │                   │                                                     │
//! │                   └── 2. RemoteMirror::forward_sale    ← THIS CRATE    │
//! │                           │                                             │
//! │                           ├── disabled   → MirrorOutcome::Disabled     │
//! │                           ├── ok         → MirrorOutcome::Mirrored     │
//! │                           └── any error  → MirrorOutcome::Failed(e)    │
//! │                                            logged, then dropped        │
//! │                                                                         │
//! │  No retry. No queue. A failed forward is a lost mirror row; the local  │
//! │  ledger stays the system of record.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`config`] - `MirrorConfig` and connection descriptor parsing
//! - [`error`] - `MirrorError`
//! - [`mirror`] - `RemoteMirror` and `MirrorOutcome`

pub mod config;
pub mod error;
pub mod mirror;

pub use config::{MirrorConfig, MIRROR_CONNECTION_ENV, MIRROR_TIMEOUT_ENV};
pub use error::{MirrorError, MirrorResult};
pub use mirror::{MirrorOutcome, RemoteMirror};
