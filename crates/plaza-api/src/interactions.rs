//! Handlers for interaction and quota endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/interactions` | Full append-only log |
//! | `POST` | `/interactions/like` | Always succeeds |
//! | `POST` | `/interactions/nudge` | 429 when the quota is exhausted |
//! | `GET`  | `/quota` | `{"count": n, "lastReset": "…"}` |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
};
use plaza_core::{
  interaction::UserInteraction, profile::ProfileSource, quota::NudgeQuota,
  storage::SnapshotStorage,
};
use serde::Deserialize;

use crate::{SharedStore, error::ApiError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionBody {
  pub from_user_id: String,
  pub to_user_id:   String,
}

/// `GET /interactions`
pub async fn list<S, P>(
  State(store): State<SharedStore<S, P>>,
) -> Json<Vec<UserInteraction>>
where
  S: SnapshotStorage,
  P: ProfileSource,
{
  let store = store.lock().await;
  Json(store.interactions().to_vec())
}

/// `POST /interactions/like`
pub async fn like<S, P>(
  State(store): State<SharedStore<S, P>>,
  Json(body): Json<InteractionBody>,
) -> StatusCode
where
  S: SnapshotStorage,
  P: ProfileSource,
{
  store
    .lock()
    .await
    .like_user(&body.from_user_id, &body.to_user_id)
    .await;
  StatusCode::CREATED
}

/// `POST /interactions/nudge` — 429 with no state change when the quota
/// is exhausted.
pub async fn nudge<S, P>(
  State(store): State<SharedStore<S, P>>,
  Json(body): Json<InteractionBody>,
) -> Result<StatusCode, ApiError>
where
  S: SnapshotStorage,
  P: ProfileSource,
{
  store
    .lock()
    .await
    .nudge_user(&body.from_user_id, &body.to_user_id)
    .await?;
  Ok(StatusCode::CREATED)
}

/// `GET /quota`
pub async fn quota<S, P>(
  State(store): State<SharedStore<S, P>>,
) -> Json<NudgeQuota>
where
  S: SnapshotStorage,
  P: ProfileSource,
{
  let store = store.lock().await;
  Json(store.quota().clone())
}
