//! NudgeQuota — the per-period cap on nudge interactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Nudges available per reset period.
pub const NUDGE_CEILING: u32 = 3;

/// Days between quota resets. Elapsed time is truncated to whole days
/// before comparison, so a period ends at the start of its 30th day.
pub const RESET_INTERVAL_DAYS: i64 = 30;

/// Remaining nudge count for the current period.
///
/// Serialises as `{"count": n, "lastReset": "<RFC 3339>"}`, the shape
/// stored under the `community_nudgeCount` snapshot key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NudgeQuota {
  pub count:      u32,
  pub last_reset: DateTime<Utc>,
}

impl NudgeQuota {
  /// A full quota starting its period at `now`.
  pub fn full(now: DateTime<Utc>) -> Self {
    Self { count: NUDGE_CEILING, last_reset: now }
  }

  /// Whether at least one whole reset interval has elapsed since
  /// `last_reset`.
  pub fn due_for_reset(&self, now: DateTime<Utc>) -> bool {
    (now - self.last_reset).num_days() >= RESET_INTERVAL_DAYS
  }

  /// Restore the count to the ceiling and start a new period at `now`.
  pub fn reset(&mut self, now: DateTime<Utc>) {
    self.count = NUDGE_CEILING;
    self.last_reset = now;
  }

  /// Take one nudge from the quota. Returns `false`, mutating nothing,
  /// when the quota is already exhausted.
  pub fn consume(&mut self) -> bool {
    if self.count == 0 {
      return false;
    }
    self.count -= 1;
    true
  }
}
