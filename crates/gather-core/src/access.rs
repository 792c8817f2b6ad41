//! Access levels and the membership state machine.
//!
//! Membership status travels on the wire as a small integer. It is decoded
//! into [`AccessLevel`] at the edge and every capability decision is made
//! from the closed enum, never from raw integers.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Membership access level, ordered from pending request to owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AccessLevel {
    /// Join request awaiting approval.
    Requested,
    /// Approved member.
    Member,
    /// Moderator, may manage requests and members.
    Moderator,
    /// Creator. Terminal: cannot be kicked, demoted, or leave.
    Owner,
}

impl AccessLevel {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Capability set for this level. Total over the closed domain.
    pub fn capabilities(self) -> Capabilities {
        match self {
            AccessLevel::Requested => Capabilities {
                may_request_or_cancel: true,
                may_leave: false,
                may_moderate: false,
                may_edit: false,
                may_invite: false,
            },
            AccessLevel::Member => Capabilities {
                may_request_or_cancel: false,
                may_leave: true,
                may_moderate: false,
                may_edit: false,
                may_invite: false,
            },
            AccessLevel::Moderator => Capabilities {
                may_request_or_cancel: false,
                may_leave: true,
                may_moderate: true,
                may_edit: true,
                may_invite: true,
            },
            AccessLevel::Owner => Capabilities {
                may_request_or_cancel: false,
                may_leave: false,
                may_moderate: true,
                may_edit: true,
                may_invite: true,
            },
        }
    }

    /// Whether `self` may apply moderation actions to a record at `target`.
    ///
    /// Owners outrank moderators and are never acted upon; moderators act on
    /// pending requests and members only, not on other moderators.
    pub fn may_act_on(self, target: AccessLevel) -> bool {
        match self {
            AccessLevel::Owner => target != AccessLevel::Owner,
            AccessLevel::Moderator => {
                matches!(target, AccessLevel::Requested | AccessLevel::Member)
            }
            AccessLevel::Requested | AccessLevel::Member => false,
        }
    }
}

impl TryFrom<u8> for AccessLevel {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AccessLevel::Requested),
            1 => Ok(AccessLevel::Member),
            2 => Ok(AccessLevel::Moderator),
            3 => Ok(AccessLevel::Owner),
            other => Err(DomainError::InvalidAccessLevel(other)),
        }
    }
}

impl From<AccessLevel> for u8 {
    fn from(level: AccessLevel) -> Self {
        level as u8
    }
}

/// What the viewer may do, resolved from their access level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub may_request_or_cancel: bool,
    pub may_leave: bool,
    pub may_moderate: bool,
    pub may_edit: bool,
    pub may_invite: bool,
}

impl Capabilities {
    /// Capabilities of a viewer with no membership record at all.
    pub fn visitor() -> Self {
        Capabilities::default()
    }
}

/// Resolve capabilities for an optional membership level; absence is the
/// visitor state.
pub fn resolve(level: Option<AccessLevel>) -> Capabilities {
    level.map(AccessLevel::capabilities).unwrap_or_else(Capabilities::visitor)
}

/// Actions that move a membership record through its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipAction {
    Request,
    Approve,
    Deny,
    Cancel,
    Promote,
    Demote,
    Kick,
    Leave,
}

/// Apply a lifecycle action to a membership record.
///
/// `None` is the no-record state on both sides. Anything outside the table
/// is an error; the owner level has no transitions in or out.
pub fn apply(
    current: Option<AccessLevel>,
    action: MembershipAction,
) -> Result<Option<AccessLevel>, DomainError> {
    use AccessLevel::*;
    use MembershipAction::*;

    match (current, action) {
        (None, Request) => Ok(Some(Requested)),
        (Some(Requested), Approve) => Ok(Some(Member)),
        (Some(Requested), Deny) | (Some(Requested), Cancel) => Ok(None),
        (Some(Member), Promote) => Ok(Some(Moderator)),
        (Some(Member), Kick) | (Some(Member), Leave) => Ok(None),
        (Some(Moderator), Demote) => Ok(Some(Member)),
        (Some(Moderator), Kick) | (Some(Moderator), Leave) => Ok(None),
        (from, action) => Err(DomainError::InvalidTransition { from, action }),
    }
}

/// Who can find and join a group or event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Visibility {
    Public,
    ApprovalRequired,
    InviteOnly,
}

impl TryFrom<u8> for Visibility {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Visibility::Public),
            1 => Ok(Visibility::ApprovalRequired),
            2 => Ok(Visibility::InviteOnly),
            other => Err(DomainError::InvalidVisibility(other)),
        }
    }
}

impl From<Visibility> for u8 {
    fn from(visibility: Visibility) -> Self {
        visibility as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_round_trip() {
        for raw in 0u8..=3 {
            let level = AccessLevel::try_from(raw).unwrap();
            assert_eq!(u8::from(level), raw);
        }
    }

    #[test]
    fn test_level_rejects_out_of_domain() {
        assert!(matches!(
            AccessLevel::try_from(4),
            Err(DomainError::InvalidAccessLevel(4))
        ));
        assert!(matches!(
            AccessLevel::try_from(255),
            Err(DomainError::InvalidAccessLevel(255))
        ));
    }

    #[test]
    fn test_owner_never_leaves() {
        assert!(!AccessLevel::Owner.capabilities().may_leave);
        assert!(!AccessLevel::Owner.capabilities().may_request_or_cancel);
    }

    #[test]
    fn test_requested_cannot_moderate() {
        let caps = AccessLevel::Requested.capabilities();
        assert!(!caps.may_moderate);
        assert!(caps.may_request_or_cancel);
    }

    #[test]
    fn test_moderator_tie_break() {
        let moderator = AccessLevel::Moderator;
        assert!(moderator.capabilities().may_moderate);
        assert!(moderator.may_act_on(AccessLevel::Requested));
        assert!(moderator.may_act_on(AccessLevel::Member));
        assert!(!moderator.may_act_on(AccessLevel::Moderator));
        assert!(!moderator.may_act_on(AccessLevel::Owner));
    }

    #[test]
    fn test_owner_outranks_moderator() {
        assert!(AccessLevel::Owner.may_act_on(AccessLevel::Moderator));
        assert!(!AccessLevel::Owner.may_act_on(AccessLevel::Owner));
        assert!(!AccessLevel::Member.may_act_on(AccessLevel::Requested));
    }

    #[test]
    fn test_visitor_capabilities_empty() {
        let caps = resolve(None);
        assert!(!caps.may_leave);
        assert!(!caps.may_moderate);
        assert!(!caps.may_edit);
    }

    #[test]
    fn test_lifecycle_transitions() {
        use AccessLevel::*;
        use MembershipAction::*;

        assert_eq!(apply(None, Request).unwrap(), Some(Requested));
        assert_eq!(apply(Some(Requested), Approve).unwrap(), Some(Member));
        assert_eq!(apply(Some(Requested), Deny).unwrap(), None);
        assert_eq!(apply(Some(Requested), Cancel).unwrap(), None);
        assert_eq!(apply(Some(Member), Promote).unwrap(), Some(Moderator));
        assert_eq!(apply(Some(Member), Kick).unwrap(), None);
        assert_eq!(apply(Some(Moderator), Demote).unwrap(), Some(Member));
        assert_eq!(apply(Some(Moderator), Kick).unwrap(), None);
    }

    #[test]
    fn test_owner_is_terminal() {
        use MembershipAction::*;

        for action in [Approve, Deny, Cancel, Promote, Demote, Kick, Leave] {
            assert!(apply(Some(AccessLevel::Owner), action).is_err());
        }
    }

    #[test]
    fn test_invalid_transitions_rejected() {
        use AccessLevel::*;
        use MembershipAction::*;

        assert!(apply(None, Approve).is_err());
        assert!(apply(Some(Member), Request).is_err());
        assert!(apply(Some(Requested), Promote).is_err());
        assert!(apply(Some(Moderator), Approve).is_err());
    }
}
