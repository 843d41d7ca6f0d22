//! SQLite backend for the Plaza snapshot store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. SQLite is the device-local
//! storage on the platforms this targets; each snapshot is one row in a
//! plain key-value table.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteSnapshots;
