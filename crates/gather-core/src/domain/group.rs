//! Group entity

use gather_shared::types::EntityId;
use serde::{Deserialize, Serialize};

use crate::access::{self, AccessLevel, Capabilities, Visibility};
use crate::domain::user::User;

/// A group as returned by the API.
///
/// `user_access_level` is viewer-scoped: present only when the viewer has a
/// membership record (including a pending request). Absent means visitor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: EntityId,
    pub name: String,
    pub about: String,
    #[serde(default)]
    pub avatar: Option<String>,
    pub visibility: Visibility,
    pub owner: User,
    #[serde(default)]
    pub user_access_level: Option<AccessLevel>,
}

impl Group {
    /// Capabilities of the current viewer over this group.
    pub fn viewer_capabilities(&self) -> Capabilities {
        access::resolve(self.user_access_level)
    }

    pub fn is_owned_by(&self, user_id: EntityId) -> bool {
        self.owner.id == user_id
    }

    /// Whether the viewer has any membership record, pending included.
    pub fn has_membership(&self) -> bool {
        self.user_access_level.is_some()
    }
}
