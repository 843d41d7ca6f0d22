//! UserInteraction — a directed social action between two users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of a [`UserInteraction`]. `Nudge` creation is gated by the
/// [`NudgeQuota`](crate::quota::NudgeQuota); `Like` is unrestricted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
  Like,
  Nudge,
}

/// A directed social action from one user to another. Append-only: never
/// mutated or removed after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInteraction {
  pub id:           Uuid,
  pub from_user_id: String,
  pub to_user_id:   String,
  #[serde(rename = "type")]
  pub kind:         InteractionKind,
  pub created_at:   DateTime<Utc>,
}
