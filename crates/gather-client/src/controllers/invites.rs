//! Invite flow: search users, select, insert directly at member level.

use std::collections::BTreeSet;

use gather_core::access::AccessLevel;
use gather_core::User;
use gather_shared::types::EntityId;
use tracing::info;

use crate::controllers::require_token;
use crate::error::ClientError;
use crate::session::SessionContext;

#[derive(Debug, Default)]
pub struct InvitePicker {
    pub results: Vec<User>,
    pub selected: BTreeSet<EntityId>,
}

impl InvitePicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Server-side user search.
    pub async fn search(&mut self, ctx: &SessionContext, term: &str) -> Result<(), ClientError> {
        let token = require_token(ctx)?;
        self.results = ctx.api().list_users(Some(term), Some(&token)).await?.users;
        Ok(())
    }

    pub fn toggle(&mut self, user_id: EntityId) {
        if !self.selected.remove(&user_id) {
            self.selected.insert(user_id);
        }
    }

    /// Insert every selected user into the group at member level, then
    /// reset the picker. Returns how many were added.
    pub async fn invite_to_group(
        &mut self,
        ctx: &SessionContext,
        group_id: EntityId,
    ) -> Result<usize, ClientError> {
        let token = require_token(ctx)?;
        let selected = std::mem::take(&mut self.selected);
        let count = selected.len();
        for user_id in selected {
            ctx.api().insert_group_member(group_id, user_id, AccessLevel::Member, &token).await?;
        }
        self.results.clear();
        info!("Invited {} users to group {}", count, group_id);
        Ok(count)
    }

    /// Same flow against an event.
    pub async fn invite_to_event(
        &mut self,
        ctx: &SessionContext,
        event_id: EntityId,
    ) -> Result<usize, ClientError> {
        let token = require_token(ctx)?;
        let selected = std::mem::take(&mut self.selected);
        let count = selected.len();
        for user_id in selected {
            ctx.api().insert_event_member(event_id, user_id, AccessLevel::Member, &token).await?;
        }
        self.results.clear();
        info!("Invited {} users to event {}", count, event_id);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_selects_and_deselects() {
        let mut picker = InvitePicker::new();
        picker.toggle(3);
        picker.toggle(5);
        picker.toggle(3);
        assert_eq!(picker.selected.iter().copied().collect::<Vec<_>>(), vec![5]);
    }
}
