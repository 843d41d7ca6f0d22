//! Handlers for join-request endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/groups/:id/requests` | Pending requests, insertion order |
//! | `POST` | `/requests/:id/resolve` | Body: `{"approve": true\|false}` |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
};
use plaza_core::{
  profile::ProfileSource, request::JoinRequest, storage::SnapshotStorage,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::SharedStore;

/// `GET /groups/:id/requests` — pending requests in insertion order.
/// An unknown group simply has none.
pub async fn pending<S, P>(
  State(store): State<SharedStore<S, P>>,
  Path(id): Path<Uuid>,
) -> Json<Vec<JoinRequest>>
where
  S: SnapshotStorage,
  P: ProfileSource,
{
  let store = store.lock().await;
  Json(store.pending_requests(id).into_iter().cloned().collect())
}

#[derive(Debug, Deserialize)]
pub struct ResolveBody {
  pub approve: bool,
}

/// `POST /requests/:id/resolve` — unknown and already-resolved requests
/// are tolerated no-ops, so a double tap cannot double-add a member.
pub async fn resolve<S, P>(
  State(store): State<SharedStore<S, P>>,
  Path(id): Path<Uuid>,
  Json(body): Json<ResolveBody>,
) -> StatusCode
where
  S: SnapshotStorage,
  P: ProfileSource,
{
  store.lock().await.handle_join_request(id, body.approve).await;
  StatusCode::NO_CONTENT
}
