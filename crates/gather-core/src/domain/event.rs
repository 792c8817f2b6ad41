//! Event entity

use chrono::{DateTime, Utc};
use gather_shared::types::EntityId;
use serde::{Deserialize, Serialize};

use crate::access::{self, AccessLevel, Capabilities, Visibility};
use crate::domain::group::Group;
use crate::domain::user::User;

/// An event as returned by the API.
///
/// `status` is the viewer's attendance record, absent for pure visitors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<String>,
    pub visibility: Visibility,
    pub group: Group,
    pub creator: User,
    #[serde(default)]
    pub status: Option<Attendance>,
    #[serde(default)]
    pub google_link: Option<String>,
    pub price: f64,
    pub pay_what_you_want: bool,
}

/// Viewer's attendance record. Payment fields are independent of the level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attendance {
    pub status: AccessLevel,
    pub paid: bool,
    pub amount_paid: f64,
}

impl Event {
    pub fn viewer_level(&self) -> Option<AccessLevel> {
        self.status.as_ref().map(|s| s.status)
    }

    /// Capabilities of the current viewer over this event.
    pub fn viewer_capabilities(&self) -> Capabilities {
        access::resolve(self.viewer_level())
    }

    pub fn has_attendance(&self) -> bool {
        self.status.is_some()
    }

    pub fn is_paid_event(&self) -> bool {
        self.price > 0.0 || self.pay_what_you_want
    }

    /// Whether the payment step is still outstanding for the viewer: the
    /// event costs money, the viewer is at least an approved member, and no
    /// payment has been recorded yet.
    pub fn payment_due(&self) -> bool {
        self.is_paid_event()
            && self.status.as_ref().is_some_and(|attendance| {
                !attendance.paid && attendance.status >= AccessLevel::Member
            })
    }
}
