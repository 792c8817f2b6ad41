//! Typed REST API surface, grouped per entity.

pub mod auth;
pub mod events;
pub mod groups;
pub mod payments;
pub mod users;

pub use auth::{AuthSession, RefreshedTokens};
pub use events::{EventEnvelope, EventMembersEnvelope, EventUserEnvelope, EventsEnvelope};
pub use groups::{GroupEnvelope, GroupMembersEnvelope, GroupsEnvelope, MembershipStatusEnvelope};
pub use payments::{PaymentClient, PaymentIntent};
pub use users::{UserEnvelope, UsersEnvelope};
