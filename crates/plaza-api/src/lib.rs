//! JSON REST API for the Plaza community store.
//!
//! Exposes an axum [`Router`] over a shared [`CommunityStore`]. Auth, TLS,
//! and transport concerns are the caller's responsibility; user ids in
//! request bodies are trusted as-is (the store never authenticates).
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", plaza_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod groups;
pub mod interactions;
pub mod requests;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use plaza_core::{
  CommunityStore, profile::ProfileSource, storage::SnapshotStorage,
};
use serde::Deserialize;
use tokio::sync::Mutex;

pub use error::ApiError;

/// Shared handle to the single community store instance.
///
/// Store operations take `&mut self`; the mutex serialises them, matching
/// the single-actor model the store assumes.
pub type SharedStore<S, P> = Arc<Mutex<CommunityStore<S, P>>>;

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router
/// regardless of its own state type.
pub fn api_router<S, P>(store: SharedStore<S, P>) -> Router<()>
where
  S: SnapshotStorage + 'static,
  P: ProfileSource + 'static,
{
  Router::new()
    // Groups
    .route("/groups", get(groups::list::<S, P>).post(groups::create::<S, P>))
    .route(
      "/groups/{id}",
      get(groups::get_one::<S, P>).patch(groups::update::<S, P>),
    )
    .route("/groups/{id}/join", post(groups::join::<S, P>))
    .route("/groups/{id}/membership", get(groups::membership::<S, P>))
    // Join requests
    .route("/groups/{id}/requests", get(requests::pending::<S, P>))
    .route("/requests/{id}/resolve", post(requests::resolve::<S, P>))
    // Interactions
    .route("/interactions", get(interactions::list::<S, P>))
    .route("/interactions/like", post(interactions::like::<S, P>))
    .route("/interactions/nudge", post(interactions::nudge::<S, P>))
    .route("/quota", get(interactions::quota::<S, P>))
    .with_state(store)
}
