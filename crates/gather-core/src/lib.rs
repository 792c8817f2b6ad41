//! # Gather Core
//!
//! Domain entities, access-level resolution, client-side validation, and
//! session state for the Gather client.

pub mod access;
pub mod domain;
pub mod error;
pub mod session;
pub mod validation;

pub use access::{AccessLevel, Capabilities, MembershipAction, Visibility};
pub use domain::*;
pub use error::DomainError;
