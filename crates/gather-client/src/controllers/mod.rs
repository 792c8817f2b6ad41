//! Page controllers: fetch-on-load plus request-then-apply mutations.
//!
//! No optimistic updates — server responses are applied as returned.
//! Primary-entity load failures are fatal to the page and carry the
//! server's status and message; secondary mutations surface their error and
//! leave prior state unchanged.

pub mod event;
pub mod group;
pub mod invites;
pub mod listing;
pub mod user;

pub use event::{create_event, EventPage, EventRoster};
pub use group::{create_group, GroupPage, GroupRoster};
pub use invites::InvitePicker;
pub use listing::{EventsDirectory, GroupsDirectory, UsersDirectory};
pub use user::UserPage;

use crate::error::ClientError;
use crate::session::SessionContext;

pub(crate) fn require_token(ctx: &SessionContext) -> Result<String, ClientError> {
    ctx.access_token().ok_or(ClientError::Unauthenticated)
}
