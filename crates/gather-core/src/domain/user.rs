//! User entity

use gather_shared::types::EntityId;
use serde::{Deserialize, Serialize};

/// A platform user as returned by the API.
///
/// `contact` is present exactly when the viewer follows this user; its
/// absence is the non-follower state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub contact: Option<Contact>,
}

/// Viewer-scoped relationship data attached to a followed user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub note: String,
    /// True when the follow is mutual.
    pub friends: bool,
}

impl User {
    pub fn followed(&self) -> bool {
        self.contact.is_some()
    }

    pub fn is_mutual(&self) -> bool {
        self.contact.as_ref().is_some_and(|c| c.friends)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(contact: Option<Contact>) -> User {
        User {
            id: 7,
            username: "morgan_p".into(),
            display_name: "Morgan P".into(),
            email: None,
            avatar: None,
            about: None,
            contact,
        }
    }

    #[test]
    fn test_contact_presence_signals_follow() {
        assert!(!user(None).followed());
        let followed = user(Some(Contact { note: "met at the book club".into(), friends: false }));
        assert!(followed.followed());
        assert!(!followed.is_mutual());
    }

    #[test]
    fn test_deserializes_without_optional_fields() {
        let raw = r#"{"id":1,"username":"sam_doe","display_name":"Sam Doe"}"#;
        let user: User = serde_json::from_str(raw).unwrap();
        assert!(user.contact.is_none());
        assert!(user.email.is_none());
    }
}
