//! # Gather Core - Domain Module
//!
//! Entities as the platform API serves them.

pub mod event;
pub mod group;
pub mod membership;
pub mod user;

pub use event::{Attendance, Event};
pub use group::Group;
pub use membership::{EventMember, GroupMember};
pub use user::{Contact, User};
