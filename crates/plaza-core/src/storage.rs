//! The `SnapshotStorage` trait and snapshot keys.
//!
//! Backends store opaque JSON blobs under fixed keys; they know nothing
//! about domain invariants. There is no transactionality: each snapshot is
//! written independently and the last write wins.

use std::{
  collections::HashMap,
  convert::Infallible,
  future::Future,
  sync::{Arc, Mutex},
};

/// Snapshot keys used by the community store.
pub mod keys {
  pub const GROUPS:            &str = "community_groups";
  pub const JOIN_REQUESTS:     &str = "community_joinRequests";
  pub const USER_INTERACTIONS: &str = "community_userInteractions";
  pub const NUDGE_COUNT:       &str = "community_nudgeCount";
  pub const JOINED_GROUPS:     &str = "community_joinedGroups";
}

/// Abstraction over device-local key-value storage.
///
/// All methods return `Send` futures so the trait can be used from
/// multi-threaded async runtimes.
pub trait SnapshotStorage: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch the blob stored under `key`, or `None` if absent.
  fn load<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;

  /// Store `value` under `key`, replacing any previous blob.
  fn save<'a>(
    &'a self,
    key: &'a str,
    value: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

// ─── In-memory backend ───────────────────────────────────────────────────────

/// In-memory backend for tests and ephemeral sessions.
///
/// Cloning is cheap — the entry map is reference-counted, so a clone sees
/// the same snapshots.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshots {
  entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySnapshots {
  pub fn new() -> Self { Self::default() }
}

impl SnapshotStorage for MemorySnapshots {
  type Error = Infallible;

  async fn load(&self, key: &str) -> Result<Option<String>, Infallible> {
    let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
    Ok(entries.get(key).cloned())
  }

  async fn save(&self, key: &str, value: String) -> Result<(), Infallible> {
    let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
    entries.insert(key.to_owned(), value);
    Ok(())
  }
}
