//! # State Module
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────┐        ┌──────────────────────────────┐      │
//! │  │   RegisterConfig     │        │          Register            │      │
//! │  │                      │        │                              │      │
//! │  │  database_path       │ ─────► │  Database (pool + mirror)    │      │
//! │  │  allow_decimal       │        │  current: Option<Product>    │      │
//! │  │  recent_sales_limit  │        │  session: Vec<SaleSummary>   │      │
//! │  │  mirror              │        │                              │      │
//! │  └──────────────────────┘        └──────────────────────────────┘      │
//! │                                                                         │
//! │  Config is read-only after startup. Register is owned by one loop;     │
//! │  no locking.                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod register;

pub use config::{
    RegisterConfig, ALLOW_DECIMAL_ENV, CONFIG_PATH_ENV, DB_PATH_ENV, RECENT_LIMIT_ENV,
};
pub use register::{Register, SaleForm};
