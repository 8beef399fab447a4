//! SQL persistence for MeetMe
//!
//! Scheduling links are stored through SQLx's `Any` driver, so the same code runs
//! against SQLite (the default) or PostgreSQL.
//!
//! # Example
//!
//! ```rust,no_run
//! use meetme_db::{DbClient, SqlLinkStore};
//!
//! async fn setup() -> Result<SqlLinkStore, meetme_db::DbError> {
//!     let client = DbClient::from_url("sqlite:data/meetme.db").await?;
//!     let store = SqlLinkStore::new(client);
//!     store.init_schema().await?;
//!     Ok(store)
//! }
//! ```

pub mod client;
pub mod error;
pub mod repositories;

pub use client::DbClient;
pub use error::DbError;
pub use repositories::scheduling_link_sql::SqlLinkStore;
