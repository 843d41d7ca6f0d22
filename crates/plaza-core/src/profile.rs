//! Profile lookup — the "authenticated current user" collaborator.
//!
//! The store never authenticates; it trusts caller-supplied user ids and
//! only consults this seam to denormalise display fields onto join
//! requests.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Display identity for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
  pub id:     String,
  pub name:   String,
  pub avatar: String,
}

/// Source of display profiles for user ids.
pub trait ProfileSource: Send + Sync {
  /// Look up the display profile for `user_id`. Implementations must
  /// always return something renderable; unknown users get a fallback.
  fn profile(&self, user_id: &str) -> UserProfile;
}

/// Fallback source: the user id doubles as the display name, no avatar.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderProfiles;

impl ProfileSource for PlaceholderProfiles {
  fn profile(&self, user_id: &str) -> UserProfile {
    UserProfile {
      id:     user_id.to_owned(),
      name:   user_id.to_owned(),
      avatar: String::new(),
    }
  }
}

/// Fixed in-memory profile directory; unknown ids get the
/// [`PlaceholderProfiles`] fallback.
#[derive(Debug, Clone, Default)]
pub struct StaticProfiles {
  profiles: HashMap<String, UserProfile>,
}

impl StaticProfiles {
  pub fn new(profiles: impl IntoIterator<Item = UserProfile>) -> Self {
    Self {
      profiles: profiles.into_iter().map(|p| (p.id.clone(), p)).collect(),
    }
  }
}

impl ProfileSource for StaticProfiles {
  fn profile(&self, user_id: &str) -> UserProfile {
    self
      .profiles
      .get(user_id)
      .cloned()
      .unwrap_or_else(|| PlaceholderProfiles.profile(user_id))
  }
}
