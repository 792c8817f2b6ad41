//! Roster rows for group and event member management.

use serde::{Deserialize, Serialize};

use crate::access::AccessLevel;
use crate::domain::event::Attendance;
use crate::domain::user::User;

/// One row of a group's member roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMember {
    pub user: User,
    pub user_access_level: AccessLevel,
}

/// One row of an event's attendee roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMember {
    pub user: User,
    pub status: Attendance,
}

impl GroupMember {
    pub fn level(&self) -> AccessLevel {
        self.user_access_level
    }
}

impl EventMember {
    pub fn level(&self) -> AccessLevel {
        self.status.status
    }
}
