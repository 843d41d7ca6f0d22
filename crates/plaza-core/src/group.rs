//! Group — a named community with members, admins, and a join policy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A nested sub-community carried on its parent group. Stored and served
/// verbatim; it has no membership logic of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subgroup {
  pub name:        String,
  pub description: String,
}

/// A named community.
///
/// `member_count` is a cache of `member_ids.len()`; the two are kept in
/// lockstep by [`Group::add_member`]. Groups are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
  pub id:           Uuid,
  pub name:         String,
  pub description:  String,
  pub category:     String,
  /// URI of the cover image; may be empty.
  pub cover_image:  String,
  /// `true`: joining is immediate. `false`: joining goes through a
  /// [`JoinRequest`](crate::request::JoinRequest) resolved by an admin.
  pub is_open:      bool,
  pub admin_ids:    Vec<String>,
  pub member_ids:   Vec<String>,
  pub member_count: u32,
  pub created_at:   DateTime<Utc>,
  pub subgroups:    Vec<Subgroup>,
}

impl Group {
  /// Add `user_id` as a member if not already present, keeping
  /// `member_count` in sync. Returns `true` if membership changed.
  pub fn add_member(&mut self, user_id: &str) -> bool {
    if self.is_member(user_id) {
      return false;
    }
    self.member_ids.push(user_id.to_owned());
    self.member_count = self.member_ids.len() as u32;
    true
  }

  pub fn is_member(&self, user_id: &str) -> bool {
    self.member_ids.iter().any(|m| m == user_id)
  }

  pub fn is_admin(&self, user_id: &str) -> bool {
    self.admin_ids.iter().any(|a| a == user_id)
  }
}

/// Input to [`CommunityStore::create_group`](crate::CommunityStore::create_group).
/// `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGroup {
  pub name:        String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub category:    String,
  #[serde(default)]
  pub cover_image: String,
  pub is_open:     bool,
  pub admin_ids:   Vec<String>,
  #[serde(default)]
  pub subgroups:   Vec<Subgroup>,
}

impl NewGroup {
  /// Convenience constructor: an open group administered by `admin_id`.
  pub fn new(name: impl Into<String>, admin_id: impl Into<String>) -> Self {
    Self {
      name:        name.into(),
      description: String::new(),
      category:    String::new(),
      cover_image: String::new(),
      is_open:     true,
      admin_ids:   vec![admin_id.into()],
      subgroups:   Vec::new(),
    }
  }
}

/// Typed partial update for
/// [`CommunityStore::update_group`](crate::CommunityStore::update_group).
///
/// `None` leaves a field untouched. Unknown fields are rejected at
/// deserialisation time rather than silently spread into the record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GroupUpdate {
  pub name:        Option<String>,
  pub description: Option<String>,
  pub category:    Option<String>,
  pub cover_image: Option<String>,
  pub is_open:     Option<bool>,
}

impl GroupUpdate {
  /// Apply every `Some` field to `group`.
  pub fn apply(&self, group: &mut Group) {
    if let Some(name) = &self.name {
      group.name = name.clone();
    }
    if let Some(description) = &self.description {
      group.description = description.clone();
    }
    if let Some(category) = &self.category {
      group.category = category.clone();
    }
    if let Some(cover_image) = &self.cover_image {
      group.cover_image = cover_image.clone();
    }
    if let Some(is_open) = self.is_open {
      group.is_open = is_open;
    }
  }
}
