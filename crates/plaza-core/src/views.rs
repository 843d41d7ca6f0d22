//! Derived-view helpers — pure functions over the store's collections.
//!
//! Nothing here mutates or persists; the store exposes thin wrappers
//! around these for callers that hold a store handle.

use uuid::Uuid;

use crate::{group::Group, request::JoinRequest};

/// Resolve a group by id.
pub fn find_group(groups: &[Group], group_id: Uuid) -> Option<&Group> {
  groups.iter().find(|g| g.id == group_id)
}

pub(crate) fn find_group_mut(
  groups: &mut [Group],
  group_id: Uuid,
) -> Option<&mut Group> {
  groups.iter_mut().find(|g| g.id == group_id)
}

/// Pending requests for `group_id`, in insertion order.
pub fn pending_requests(
  requests: &[JoinRequest],
  group_id: Uuid,
) -> Vec<&JoinRequest> {
  requests
    .iter()
    .filter(|r| r.group_id == group_id && r.status.is_pending())
    .collect()
}

/// Whether `user_id` is a member of `group_id`. `false` when the group
/// does not resolve.
pub fn is_group_member(groups: &[Group], group_id: Uuid, user_id: &str) -> bool {
  find_group(groups, group_id).is_some_and(|g| g.is_member(user_id))
}

/// Whether `user_id` is an admin of `group_id`. `false` when the group
/// does not resolve.
pub fn is_group_admin(groups: &[Group], group_id: Uuid, user_id: &str) -> bool {
  find_group(groups, group_id).is_some_and(|g| g.is_admin(user_id))
}
