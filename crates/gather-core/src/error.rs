//! Domain errors

use thiserror::Error;

use crate::access::{AccessLevel, MembershipAction};

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid access level: {0}")]
    InvalidAccessLevel(u8),

    #[error("Invalid visibility: {0}")]
    InvalidVisibility(u8),

    #[error("No {action:?} transition from {from:?}")]
    InvalidTransition {
        from: Option<AccessLevel>,
        action: MembershipAction,
    },

    #[error("Level {actor:?} may not act on level {target:?}")]
    NotPermitted {
        actor: AccessLevel,
        target: AccessLevel,
    },

    #[error("No membership record for user {0}")]
    UnknownMember(gather_shared::types::EntityId),

    #[error("Amount must be at least {minimum}")]
    AmountBelowMinimum { minimum: f64 },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}
