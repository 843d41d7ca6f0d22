//! JoinRequest — a pending ask to join a closed group.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Resolution state of a join request. Transitions are one-way:
/// `Pending` → `Approved` or `Declined`, both terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinRequestStatus {
  Pending,
  Approved,
  Declined,
}

impl JoinRequestStatus {
  pub fn is_pending(&self) -> bool { matches!(self, Self::Pending) }
}

/// A pending ask to join a closed group, resolved by an admin decision.
///
/// Requester display fields are denormalised from the
/// [`ProfileSource`](crate::profile::ProfileSource) at creation time so
/// admin screens render without a second lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
  pub id:               Uuid,
  pub group_id:         Uuid,
  pub user_id:          String,
  pub requester_name:   String,
  pub requester_avatar: String,
  pub requested_at:     DateTime<Utc>,
  pub status:           JoinRequestStatus,
}
