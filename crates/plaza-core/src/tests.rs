//! Behaviour tests for `CommunityStore` over the in-memory backend.

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::{
  CommunityStore, Error,
  group::{GroupUpdate, NewGroup},
  interaction::InteractionKind,
  profile::{PlaceholderProfiles, StaticProfiles, UserProfile},
  quota::{NUDGE_CEILING, NudgeQuota},
  request::JoinRequestStatus,
  storage::{MemorySnapshots, SnapshotStorage as _, keys},
};

type TestStore = CommunityStore<MemorySnapshots, PlaceholderProfiles>;

async fn store() -> TestStore {
  CommunityStore::init(MemorySnapshots::new(), PlaceholderProfiles).await
}

fn closed_group(name: &str, admin: &str) -> NewGroup {
  NewGroup { is_open: false, ..NewGroup::new(name, admin) }
}

// ─── Group creation ──────────────────────────────────────────────────────────

#[tokio::test]
async fn create_group_first_admin_is_sole_member() {
  let mut s = store().await;

  let group = s.create_group(NewGroup::new("Hikers", "u1")).await.unwrap();

  assert_eq!(group.member_ids, &["u1"]);
  assert_eq!(group.member_count, 1);
  assert_eq!(group.member_count as usize, group.member_ids.len());
  assert!(group.is_member("u1"));
  assert!(group.is_admin("u1"));
}

#[tokio::test]
async fn create_group_empty_admins_errors() {
  let mut s = store().await;

  let mut input = NewGroup::new("Nobody's", "u1");
  input.admin_ids.clear();

  let err = s.create_group(input).await.unwrap_err();
  assert!(matches!(err, Error::EmptyAdminList));
  assert!(s.groups().is_empty());
}

#[tokio::test]
async fn update_group_applies_partial_fields() {
  let mut s = store().await;
  let group = s.create_group(NewGroup::new("Hikers", "u1")).await.unwrap();

  s.update_group(
    group.id,
    GroupUpdate {
      description: Some("Weekend hikes".into()),
      is_open: Some(false),
      ..Default::default()
    },
  )
  .await;

  let updated = s.group(group.id).unwrap();
  assert_eq!(updated.name, "Hikers");
  assert_eq!(updated.description, "Weekend hikes");
  assert!(!updated.is_open);
}

#[tokio::test]
async fn update_unknown_group_is_noop() {
  let mut s = store().await;
  s.update_group(Uuid::new_v4(), GroupUpdate::default()).await;
  assert!(s.groups().is_empty());
}

// ─── Joining open groups ─────────────────────────────────────────────────────

#[tokio::test]
async fn join_open_group_adds_member_once() {
  let mut s = store().await;
  let group = s.create_group(NewGroup::new("Hikers", "u1")).await.unwrap();

  s.join_group(group.id, "u2").await;

  let g = s.group(group.id).unwrap();
  assert_eq!(g.member_ids, &["u1", "u2"]);
  assert_eq!(g.member_count, 2);

  // A second join is a no-op: no duplicate id, no double increment.
  s.join_group(group.id, "u2").await;

  let g = s.group(group.id).unwrap();
  assert_eq!(g.member_ids, &["u1", "u2"]);
  assert_eq!(g.member_count, 2);
}

#[tokio::test]
async fn join_open_group_records_joined_id() {
  let mut s = store().await;
  let group = s.create_group(NewGroup::new("Hikers", "u1")).await.unwrap();

  s.join_group(group.id, "u2").await;
  assert_eq!(s.joined_group_ids(), [group.id]);

  s.join_group(group.id, "u2").await;
  assert_eq!(s.joined_group_ids(), [group.id]);
}

#[tokio::test]
async fn join_unknown_group_is_noop() {
  let mut s = store().await;
  s.join_group(Uuid::new_v4(), "u2").await;

  assert!(s.groups().is_empty());
  assert!(s.joined_group_ids().is_empty());
}

// ─── Joining closed groups ───────────────────────────────────────────────────

#[tokio::test]
async fn join_closed_group_creates_pending_request() {
  let mut s = store().await;
  let group = s.create_group(closed_group("Book club", "u1")).await.unwrap();

  s.join_group(group.id, "u2").await;

  // Membership untouched.
  let g = s.group(group.id).unwrap();
  assert_eq!(g.member_ids, &["u1"]);
  assert_eq!(g.member_count, 1);

  // Exactly one pending request for u2.
  let pending = s.pending_requests(group.id);
  assert_eq!(pending.len(), 1);
  assert_eq!(pending[0].user_id, "u2");
  assert_eq!(pending[0].status, JoinRequestStatus::Pending);
}

#[tokio::test]
async fn rejoin_closed_group_does_not_duplicate_request() {
  let mut s = store().await;
  let group = s.create_group(closed_group("Book club", "u1")).await.unwrap();

  s.join_group(group.id, "u2").await;
  s.join_group(group.id, "u2").await;

  assert_eq!(s.pending_requests(group.id).len(), 1);
}

#[tokio::test]
async fn request_denormalises_profile_fields() {
  let profiles = StaticProfiles::new([UserProfile {
    id:     "u2".into(),
    name:   "Beatrix".into(),
    avatar: "https://cdn.example/u2.png".into(),
  }]);
  let mut s = CommunityStore::init(MemorySnapshots::new(), profiles).await;
  let group = s.create_group(closed_group("Book club", "u1")).await.unwrap();

  s.join_group(group.id, "u2").await;

  let pending = s.pending_requests(group.id);
  assert_eq!(pending[0].requester_name, "Beatrix");
  assert_eq!(pending[0].requester_avatar, "https://cdn.example/u2.png");
}

// ─── Resolving join requests ─────────────────────────────────────────────────

#[tokio::test]
async fn approve_request_adds_member() {
  let mut s = store().await;
  let group = s.create_group(closed_group("Book club", "u1")).await.unwrap();

  s.join_group(group.id, "u2").await;
  let request_id = s.pending_requests(group.id)[0].id;

  s.handle_join_request(request_id, true).await;

  let g = s.group(group.id).unwrap();
  assert_eq!(g.member_ids, &["u1", "u2"]);
  assert_eq!(g.member_count, 2);
  assert_eq!(s.request(request_id).unwrap().status, JoinRequestStatus::Approved);
  assert!(s.pending_requests(group.id).is_empty());
}

#[tokio::test]
async fn approve_twice_does_not_double_add() {
  let mut s = store().await;
  let group = s.create_group(closed_group("Book club", "u1")).await.unwrap();

  s.join_group(group.id, "u2").await;
  let request_id = s.pending_requests(group.id)[0].id;

  s.handle_join_request(request_id, true).await;
  s.handle_join_request(request_id, true).await;

  let g = s.group(group.id).unwrap();
  assert_eq!(g.member_ids, &["u1", "u2"]);
  assert_eq!(g.member_count, 2);
}

#[tokio::test]
async fn decline_request_leaves_membership() {
  let mut s = store().await;
  let group = s.create_group(closed_group("Book club", "u1")).await.unwrap();

  s.join_group(group.id, "u2").await;
  let request_id = s.pending_requests(group.id)[0].id;

  s.handle_join_request(request_id, false).await;

  let g = s.group(group.id).unwrap();
  assert_eq!(g.member_ids, &["u1"]);
  assert_eq!(s.request(request_id).unwrap().status, JoinRequestStatus::Declined);

  // Declined is terminal: a late approve must not flip it or add anyone.
  s.handle_join_request(request_id, true).await;
  assert_eq!(s.request(request_id).unwrap().status, JoinRequestStatus::Declined);
  assert_eq!(s.group(group.id).unwrap().member_ids, &["u1"]);
}

#[tokio::test]
async fn resolve_unknown_request_is_noop() {
  let mut s = store().await;
  let group = s.create_group(NewGroup::new("Hikers", "u1")).await.unwrap();

  s.handle_join_request(Uuid::new_v4(), true).await;
  assert_eq!(s.group(group.id).unwrap().member_count, 1);
}

// ─── Likes ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn like_always_appends() {
  let mut s = store().await;

  s.like_user("u1", "u2").await;
  s.like_user("u1", "u2").await;
  s.like_user("u1", "u1").await;

  // Duplicates and self-likes are all recorded.
  assert_eq!(s.interactions().len(), 3);
  assert!(s.interactions().iter().all(|i| i.kind == InteractionKind::Like));
}

// ─── Nudges & quota ──────────────────────────────────────────────────────────

#[tokio::test]
async fn nudge_quota_enforced() {
  let mut s = store().await;

  for _ in 0..NUDGE_CEILING {
    s.nudge_user("u1", "u2").await.unwrap();
  }
  assert_eq!(s.nudges_remaining(), 0);

  let err = s.nudge_user("u1", "u2").await.unwrap_err();
  assert!(matches!(err, Error::QuotaExceeded));

  // The failed call mutated nothing.
  assert_eq!(s.nudges_remaining(), 0);
  assert_eq!(s.interactions().len(), NUDGE_CEILING as usize);
}

#[tokio::test]
async fn nudge_records_interaction_kind() {
  let mut s = store().await;
  s.nudge_user("u1", "u2").await.unwrap();

  assert_eq!(s.interactions().len(), 1);
  assert_eq!(s.interactions()[0].kind, InteractionKind::Nudge);
  assert_eq!(s.nudges_remaining(), NUDGE_CEILING - 1);
}

#[tokio::test]
async fn quota_resets_on_init_after_interval() {
  let storage = MemorySnapshots::new();
  let stale = NudgeQuota {
    count:      0,
    last_reset: Utc::now() - Duration::days(31),
  };
  storage
    .save(keys::NUDGE_COUNT, serde_json::to_string(&stale).unwrap())
    .await
    .unwrap();

  let before = Utc::now();
  let s = CommunityStore::init(storage, PlaceholderProfiles).await;

  assert_eq!(s.nudges_remaining(), NUDGE_CEILING);
  assert!(s.quota().last_reset >= before);
}

#[tokio::test]
async fn quota_kept_within_interval() {
  let storage = MemorySnapshots::new();
  let recent = NudgeQuota {
    count:      1,
    last_reset: Utc::now() - Duration::days(29),
  };
  storage
    .save(keys::NUDGE_COUNT, serde_json::to_string(&recent).unwrap())
    .await
    .unwrap();

  let s = CommunityStore::init(storage, PlaceholderProfiles).await;
  assert_eq!(s.nudges_remaining(), 1);
  assert_eq!(s.quota().last_reset, recent.last_reset);
}

#[tokio::test]
async fn nudge_reset_check_runs_mid_session() {
  let mut s = store().await;
  for _ in 0..NUDGE_CEILING {
    s.nudge_user("u1", "u2").await.unwrap();
  }
  assert!(s.nudge_user("u1", "u2").await.is_err());

  // Age the exhausted quota past the boundary without re-initialising:
  // the next nudge resets the period and succeeds.
  s.quota_mut().last_reset = Utc::now() - Duration::days(30);
  s.nudge_user("u1", "u2").await.unwrap();
  assert_eq!(s.nudges_remaining(), NUDGE_CEILING - 1);
}

#[test]
fn due_for_reset_truncates_to_whole_days() {
  let now = Utc::now();
  let quota =
    NudgeQuota { count: 0, last_reset: now - Duration::days(30) + Duration::hours(1) };
  // 29 days and 23 hours elapsed: not yet due.
  assert!(!quota.due_for_reset(now));

  let quota = NudgeQuota { count: 0, last_reset: now - Duration::days(30) };
  assert!(quota.due_for_reset(now));
}

// ─── Derived views ───────────────────────────────────────────────────────────

#[tokio::test]
async fn pending_requests_filtered_in_insertion_order() {
  let mut s = store().await;
  let book = s.create_group(closed_group("Book club", "u1")).await.unwrap();
  let chess = s.create_group(closed_group("Chess", "u1")).await.unwrap();

  s.join_group(book.id, "u2").await;
  s.join_group(chess.id, "u3").await;
  s.join_group(book.id, "u4").await;

  let pending = s.pending_requests(book.id);
  assert_eq!(pending.len(), 2);
  assert_eq!(pending[0].user_id, "u2");
  assert_eq!(pending[1].user_id, "u4");

  // Resolving one drops it from the view, keeping order for the rest.
  let first = pending[0].id;
  s.handle_join_request(first, false).await;
  let pending = s.pending_requests(book.id);
  assert_eq!(pending.len(), 1);
  assert_eq!(pending[0].user_id, "u4");
}

#[tokio::test]
async fn membership_checks_false_for_unknown_group() {
  let s = store().await;
  assert!(!s.is_group_member(Uuid::new_v4(), "u1"));
  assert!(!s.is_group_admin(Uuid::new_v4(), "u1"));
}

#[tokio::test]
async fn membership_checks_reflect_collections() {
  let mut s = store().await;
  let group = s.create_group(NewGroup::new("Hikers", "u1")).await.unwrap();
  s.join_group(group.id, "u2").await;

  assert!(s.is_group_member(group.id, "u1"));
  assert!(s.is_group_admin(group.id, "u1"));
  assert!(s.is_group_member(group.id, "u2"));
  assert!(!s.is_group_admin(group.id, "u2"));
  assert!(!s.is_group_member(group.id, "u3"));
}

// ─── Persistence round-trip ──────────────────────────────────────────────────

#[tokio::test]
async fn snapshots_roundtrip_through_reinit() {
  let storage = MemorySnapshots::new();
  let mut s =
    CommunityStore::init(storage.clone(), PlaceholderProfiles).await;

  let open = s.create_group(NewGroup::new("Hikers", "u1")).await.unwrap();
  let closed = s.create_group(closed_group("Book club", "u1")).await.unwrap();
  s.join_group(open.id, "u2").await;
  s.join_group(closed.id, "u3").await;
  s.like_user("u2", "u3").await;
  s.nudge_user("u2", "u3").await.unwrap();

  // A fresh store over the same storage sees field-for-field equal state.
  let reopened =
    CommunityStore::init(storage, PlaceholderProfiles).await;

  assert_eq!(reopened.groups(), s.groups());
  assert_eq!(
    reopened.pending_requests(closed.id),
    s.pending_requests(closed.id)
  );
  assert_eq!(reopened.interactions(), s.interactions());
  assert_eq!(reopened.joined_group_ids(), s.joined_group_ids());
  assert_eq!(reopened.quota(), s.quota());
}

#[tokio::test]
async fn corrupt_snapshot_falls_back_to_empty() {
  let storage = MemorySnapshots::new();
  storage
    .save(keys::GROUPS, "not json".into())
    .await
    .unwrap();

  let s = CommunityStore::init(storage, PlaceholderProfiles).await;
  assert!(s.groups().is_empty());
}
