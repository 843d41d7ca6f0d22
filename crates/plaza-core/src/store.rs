//! [`CommunityStore`] — single source of truth for groups, join requests,
//! user interactions, and the nudge quota.
//!
//! The store owns its collections exclusively; callers mutate them only
//! through the operations here. Every mutation is followed by a
//! write-through of the touched snapshots. Persistence is best-effort:
//! failures are logged and never surfaced, and the in-memory state stays
//! authoritative for the session. The only domain failures are
//! [`Error::EmptyAdminList`] and [`Error::QuotaExceeded`].

use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::{
  Error, Result,
  group::{Group, GroupUpdate, NewGroup},
  interaction::{InteractionKind, UserInteraction},
  profile::ProfileSource,
  quota::NudgeQuota,
  request::{JoinRequest, JoinRequestStatus},
  storage::{SnapshotStorage, keys},
  views,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// The community store service.
///
/// Construct with [`CommunityStore::init`]; operations take `&mut self`, so
/// a shared instance must be serialised behind a mutex by the embedding
/// layer — matching the single-actor model of a mobile client.
pub struct CommunityStore<S, P> {
  storage:      S,
  profiles:     P,
  groups:       Vec<Group>,
  requests:     Vec<JoinRequest>,
  interactions: Vec<UserInteraction>,
  quota:        NudgeQuota,
  joined:       Vec<Uuid>,
}

impl<S: SnapshotStorage, P: ProfileSource> CommunityStore<S, P> {
  /// Load all snapshots from `storage` and run the quota reset check.
  ///
  /// A missing or unreadable snapshot falls back to its empty/default
  /// value with a warning; initialisation itself never fails. A store must
  /// always come up, even over corrupt local storage.
  pub async fn init(storage: S, profiles: P) -> Self {
    let groups = load_snapshot(&storage, keys::GROUPS).await.unwrap_or_default();
    let requests = load_snapshot(&storage, keys::JOIN_REQUESTS)
      .await
      .unwrap_or_default();
    let interactions = load_snapshot(&storage, keys::USER_INTERACTIONS)
      .await
      .unwrap_or_default();
    let joined = load_snapshot(&storage, keys::JOINED_GROUPS)
      .await
      .unwrap_or_default();
    let quota = load_snapshot(&storage, keys::NUDGE_COUNT)
      .await
      .unwrap_or_else(|| NudgeQuota::full(Utc::now()));

    let mut store =
      Self { storage, profiles, groups, requests, interactions, quota, joined };

    // The reset check runs once per initialisation; nudge_user re-checks
    // lazily so a boundary crossed mid-session still takes effect.
    let now = Utc::now();
    if store.quota.due_for_reset(now) {
      store.quota.reset(now);
      store.persist(keys::NUDGE_COUNT, &store.quota).await;
    }

    store
  }

  // ── Groups ────────────────────────────────────────────────────────────────

  /// Create a group. The first admin becomes the sole initial member.
  pub async fn create_group(&mut self, input: NewGroup) -> Result<Group> {
    let creator =
      input.admin_ids.first().cloned().ok_or(Error::EmptyAdminList)?;

    let group = Group {
      id:           Uuid::new_v4(),
      name:         input.name,
      description:  input.description,
      category:     input.category,
      cover_image:  input.cover_image,
      is_open:      input.is_open,
      admin_ids:    input.admin_ids,
      member_ids:   vec![creator],
      member_count: 1,
      created_at:   Utc::now(),
      subgroups:    input.subgroups,
    };

    self.groups.push(group.clone());
    self.persist(keys::GROUPS, &self.groups).await;
    Ok(group)
  }

  /// Apply a typed partial edit to a group. Admin checks are the caller's
  /// responsibility; an unknown group id is a tolerated no-op.
  pub async fn update_group(&mut self, group_id: Uuid, update: GroupUpdate) {
    let Some(group) = views::find_group_mut(&mut self.groups, group_id) else {
      tracing::warn!(%group_id, "update_group: unknown group, ignoring");
      return;
    };
    update.apply(group);
    self.persist(keys::GROUPS, &self.groups).await;
  }

  /// Join `group_id` as `user_id`.
  ///
  /// Open groups admit immediately and idempotently: a second join changes
  /// nothing. Closed groups get one pending [`JoinRequest`] per
  /// (group, user); membership is untouched until an admin approves. An
  /// unknown group id is a tolerated no-op so stale UI state cannot fault
  /// the store.
  pub async fn join_group(&mut self, group_id: Uuid, user_id: &str) {
    let Some(group) = views::find_group_mut(&mut self.groups, group_id) else {
      tracing::warn!(%group_id, "join_group: unknown group, ignoring");
      return;
    };

    if group.is_open {
      if group.add_member(user_id) {
        if !self.joined.contains(&group_id) {
          self.joined.push(group_id);
        }
        self.persist(keys::GROUPS, &self.groups).await;
        self.persist(keys::JOINED_GROUPS, &self.joined).await;
      }
      return;
    }

    let already_pending = self.requests.iter().any(|r| {
      r.group_id == group_id && r.user_id == user_id && r.status.is_pending()
    });
    if already_pending {
      return;
    }

    let requester = self.profiles.profile(user_id);
    self.requests.push(JoinRequest {
      id:               Uuid::new_v4(),
      group_id,
      user_id:          user_id.to_owned(),
      requester_name:   requester.name,
      requester_avatar: requester.avatar,
      requested_at:     Utc::now(),
      status:           JoinRequestStatus::Pending,
    });
    self.persist(keys::JOIN_REQUESTS, &self.requests).await;
  }

  // ── Join requests ─────────────────────────────────────────────────────────

  /// Resolve a pending join request.
  ///
  /// Unknown ids and already-resolved requests are tolerated no-ops, so a
  /// repeated tap on an admin screen cannot double-add a member. Approval
  /// adds the requester to the group; decline only flips the status.
  pub async fn handle_join_request(&mut self, request_id: Uuid, approve: bool) {
    let Some(request) = self.requests.iter_mut().find(|r| r.id == request_id)
    else {
      tracing::warn!(%request_id, "handle_join_request: unknown request, ignoring");
      return;
    };
    if !request.status.is_pending() {
      tracing::debug!(%request_id, "handle_join_request: already resolved");
      return;
    }

    request.status = if approve {
      JoinRequestStatus::Approved
    } else {
      JoinRequestStatus::Declined
    };
    let group_id = request.group_id;
    let user_id = request.user_id.clone();

    if approve {
      match views::find_group_mut(&mut self.groups, group_id) {
        Some(group) => {
          group.add_member(&user_id);
        }
        None => tracing::warn!(%group_id, "approved request for unknown group"),
      }
    }

    self.persist(keys::JOIN_REQUESTS, &self.requests).await;
    self.persist(keys::GROUPS, &self.groups).await;
  }

  // ── Interactions ──────────────────────────────────────────────────────────

  /// Record a like. Always succeeds; duplicates and self-likes are
  /// permitted.
  pub async fn like_user(&mut self, from_user_id: &str, to_user_id: &str) {
    self.push_interaction(from_user_id, to_user_id, InteractionKind::Like);
    self.persist(keys::USER_INTERACTIONS, &self.interactions).await;
  }

  /// Record a nudge, consuming one unit of the quota.
  ///
  /// Fails with [`Error::QuotaExceeded`] when the quota is exhausted, with
  /// no state mutated.
  pub async fn nudge_user(
    &mut self,
    from_user_id: &str,
    to_user_id: &str,
  ) -> Result<()> {
    let now = Utc::now();
    if self.quota.due_for_reset(now) {
      self.quota.reset(now);
    }
    if !self.quota.consume() {
      return Err(Error::QuotaExceeded);
    }

    self.push_interaction(from_user_id, to_user_id, InteractionKind::Nudge);
    self.persist(keys::USER_INTERACTIONS, &self.interactions).await;
    self.persist(keys::NUDGE_COUNT, &self.quota).await;
    Ok(())
  }

  fn push_interaction(&mut self, from: &str, to: &str, kind: InteractionKind) {
    self.interactions.push(UserInteraction {
      id:           Uuid::new_v4(),
      from_user_id: from.to_owned(),
      to_user_id:   to.to_owned(),
      kind,
      created_at:   Utc::now(),
    });
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  pub fn groups(&self) -> &[Group] { &self.groups }

  pub fn group(&self, group_id: Uuid) -> Option<&Group> {
    views::find_group(&self.groups, group_id)
  }

  pub fn request(&self, request_id: Uuid) -> Option<&JoinRequest> {
    self.requests.iter().find(|r| r.id == request_id)
  }

  /// Pending requests for `group_id`, in insertion order.
  pub fn pending_requests(&self, group_id: Uuid) -> Vec<&JoinRequest> {
    views::pending_requests(&self.requests, group_id)
  }

  pub fn is_group_member(&self, group_id: Uuid, user_id: &str) -> bool {
    views::is_group_member(&self.groups, group_id, user_id)
  }

  pub fn is_group_admin(&self, group_id: Uuid, user_id: &str) -> bool {
    views::is_group_admin(&self.groups, group_id, user_id)
  }

  pub fn interactions(&self) -> &[UserInteraction] { &self.interactions }

  /// Groups the current user has joined through [`Self::join_group`].
  pub fn joined_group_ids(&self) -> &[Uuid] { &self.joined }

  pub fn quota(&self) -> &NudgeQuota { &self.quota }

  pub fn nudges_remaining(&self) -> u32 { self.quota.count }

  #[cfg(test)]
  pub(crate) fn quota_mut(&mut self) -> &mut NudgeQuota { &mut self.quota }

  // ── Persistence ───────────────────────────────────────────────────────────

  /// Best-effort write-through of one snapshot. Failures are logged, never
  /// propagated.
  async fn persist<T: Serialize>(&self, key: &'static str, value: &T) {
    let json = match serde_json::to_string(value) {
      Ok(json) => json,
      Err(e) => {
        tracing::warn!(key, error = %e, "failed to serialise snapshot");
        return;
      }
    };
    if let Err(e) = self.storage.save(key, json).await {
      tracing::warn!(key, error = %e, "failed to persist snapshot");
    }
  }
}

// ─── Loading ─────────────────────────────────────────────────────────────────

async fn load_snapshot<S: SnapshotStorage, T: DeserializeOwned>(
  storage: &S,
  key: &str,
) -> Option<T> {
  let raw = match storage.load(key).await {
    Ok(raw) => raw?,
    Err(e) => {
      tracing::warn!(key, error = %e, "failed to load snapshot; starting empty");
      return None;
    }
  };
  match serde_json::from_str(&raw) {
    Ok(value) => Some(value),
    Err(e) => {
      tracing::warn!(key, error = %e, "corrupt snapshot; starting empty");
      None
    }
  }
}
