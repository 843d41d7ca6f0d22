//! Error types for `plaza-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// `create_group` was called with an empty admin list.
  #[error("a group needs at least one admin")]
  EmptyAdminList,

  /// The nudge quota for the current period is exhausted.
  #[error("nudge quota exhausted for the current period")]
  QuotaExceeded,

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
