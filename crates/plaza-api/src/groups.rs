//! Handlers for `/groups` endpoints.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `GET`   | `/groups` | All groups |
//! | `POST`  | `/groups` | Body: `NewGroup` JSON |
//! | `GET`   | `/groups/:id` | 404 if not found |
//! | `PATCH` | `/groups/:id` | Typed partial update; unknown fields rejected |
//! | `POST`  | `/groups/:id/join` | Body: `{"userId": "..."}` |
//! | `GET`   | `/groups/:id/membership?userId=…` | Member/admin flags |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use plaza_core::{
  group::{Group, GroupUpdate, NewGroup},
  profile::ProfileSource,
  storage::SnapshotStorage,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{SharedStore, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /groups`
pub async fn list<S, P>(
  State(store): State<SharedStore<S, P>>,
) -> Json<Vec<Group>>
where
  S: SnapshotStorage,
  P: ProfileSource,
{
  let store = store.lock().await;
  Json(store.groups().to_vec())
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /groups` — body: `NewGroup` JSON. 400 if `adminIds` is empty.
pub async fn create<S, P>(
  State(store): State<SharedStore<S, P>>,
  Json(body): Json<NewGroup>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SnapshotStorage,
  P: ProfileSource,
{
  let mut store = store.lock().await;
  let group = store.create_group(body).await?;
  Ok((StatusCode::CREATED, Json(group)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /groups/:id`
pub async fn get_one<S, P>(
  State(store): State<SharedStore<S, P>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Group>, ApiError>
where
  S: SnapshotStorage,
  P: ProfileSource,
{
  let store = store.lock().await;
  let group = store
    .group(id)
    .cloned()
    .ok_or_else(|| ApiError::NotFound(format!("group {id} not found")))?;
  Ok(Json(group))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PATCH /groups/:id` — typed partial update. Admin checks are the UI's
/// responsibility; an unknown group id is a tolerated no-op.
pub async fn update<S, P>(
  State(store): State<SharedStore<S, P>>,
  Path(id): Path<Uuid>,
  Json(body): Json<GroupUpdate>,
) -> StatusCode
where
  S: SnapshotStorage,
  P: ProfileSource,
{
  store.lock().await.update_group(id, body).await;
  StatusCode::NO_CONTENT
}

// ─── Join ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinBody {
  pub user_id: String,
}

/// `POST /groups/:id/join` — immediate for open groups, files a join
/// request for closed ones. Unknown group ids are tolerated no-ops.
pub async fn join<S, P>(
  State(store): State<SharedStore<S, P>>,
  Path(id): Path<Uuid>,
  Json(body): Json<JoinBody>,
) -> StatusCode
where
  S: SnapshotStorage,
  P: ProfileSource,
{
  store.lock().await.join_group(id, &body.user_id).await;
  StatusCode::NO_CONTENT
}

// ─── Membership ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipParams {
  pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct MembershipFlags {
  pub member: bool,
  pub admin:  bool,
}

/// `GET /groups/:id/membership?userId=…` — both flags are `false` for
/// unknown groups.
pub async fn membership<S, P>(
  State(store): State<SharedStore<S, P>>,
  Path(id): Path<Uuid>,
  Query(params): Query<MembershipParams>,
) -> Json<MembershipFlags>
where
  S: SnapshotStorage,
  P: ProfileSource,
{
  let store = store.lock().await;
  Json(MembershipFlags {
    member: store.is_group_member(id, &params.user_id),
    admin:  store.is_group_admin(id, &params.user_id),
  })
}
