//! Group page and roster management.

use gather_core::access::{self, AccessLevel, MembershipAction};
use gather_core::validation::GroupDraft;
use gather_core::{DomainError, Event, Group, GroupMember};
use gather_shared::types::EntityId;
use tracing::info;

use crate::controllers::require_token;
use crate::error::ClientError;
use crate::session::SessionContext;

/// A group's page: the group itself plus its events.
#[derive(Debug)]
pub struct GroupPage {
    pub group: Group,
    pub events: Vec<Event>,
}

impl GroupPage {
    /// Fetch-on-load. A failure here is fatal to the page; the error
    /// carries the server's status and message for the error display.
    pub async fn load(ctx: &SessionContext, group_id: EntityId) -> Result<Self, ClientError> {
        ctx.check_token_status().await;
        let token = ctx.access_token();
        let group = ctx.api().get_group(group_id, token.as_deref()).await?.group;
        let events = ctx.api().group_events(group_id, token.as_deref()).await?.events;
        Ok(Self { group, events })
    }

    /// Join (or request to join) when the viewer has no membership record;
    /// leave or cancel when they do. Applies the returned group in place.
    pub async fn toggle_membership(&mut self, ctx: &SessionContext) -> Result<(), ClientError> {
        let token = require_token(ctx)?;
        match self.group.user_access_level {
            Some(level) => {
                let action = if level == AccessLevel::Requested {
                    MembershipAction::Cancel
                } else {
                    MembershipAction::Leave
                };
                // Owners have no way out of their own group.
                access::apply(Some(level), action)?;
                self.group = ctx.api().leave_group(self.group.id, &token).await?.group;
            }
            None => {
                access::apply(None, MembershipAction::Request)?;
                self.group = ctx.api().join_group(self.group.id, &token).await?.group;
            }
        }
        Ok(())
    }
}

/// Create a group from a draft. The draft is validated locally first; an
/// invalid draft never reaches the API.
pub async fn create_group(
    ctx: &SessionContext,
    draft: &GroupDraft,
) -> Result<Group, ClientError> {
    draft.check()?;
    let token = require_token(ctx)?;
    Ok(ctx.api().create_group(draft, &token).await?.group)
}

/// Member roster of a group, as seen by a moderator or the owner.
#[derive(Debug)]
pub struct GroupRoster {
    group_id: EntityId,
    viewer_level: AccessLevel,
    pub members: Vec<GroupMember>,
}

impl GroupRoster {
    pub async fn load(
        ctx: &SessionContext,
        group_id: EntityId,
        viewer_level: AccessLevel,
        search: Option<&str>,
    ) -> Result<Self, ClientError> {
        let token = require_token(ctx)?;
        let members = ctx.api().group_members(group_id, search, &token).await?.users;
        Ok(Self { group_id, viewer_level, members })
    }

    fn level_of(&self, user_id: EntityId) -> Result<AccessLevel, ClientError> {
        self.members
            .iter()
            .find(|member| member.user.id == user_id)
            .map(GroupMember::level)
            .ok_or_else(|| DomainError::UnknownMember(user_id).into())
    }

    fn authorize(&self, target: AccessLevel) -> Result<(), ClientError> {
        if !self.viewer_level.may_act_on(target) {
            return Err(DomainError::NotPermitted { actor: self.viewer_level, target }.into());
        }
        Ok(())
    }

    /// Move a record through the lifecycle table and apply the server's
    /// returned status to that one row.
    async fn mutate(
        &mut self,
        ctx: &SessionContext,
        user_id: EntityId,
        action: MembershipAction,
    ) -> Result<(), ClientError> {
        let token = require_token(ctx)?;
        let current = self.level_of(user_id)?;
        self.authorize(current)?;

        match access::apply(Some(current), action)? {
            Some(next) => {
                let returned = ctx
                    .api()
                    .update_group_member(self.group_id, user_id, next, &token)
                    .await?
                    .status;
                if let Some(member) =
                    self.members.iter_mut().find(|member| member.user.id == user_id)
                {
                    member.user_access_level = returned;
                }
            }
            None => {
                ctx.api().remove_group_member(self.group_id, user_id, &token).await?;
                self.members.retain(|member| member.user.id != user_id);
                info!("Removed user {} from group {}", user_id, self.group_id);
            }
        }
        Ok(())
    }

    pub async fn approve(&mut self, ctx: &SessionContext, user_id: EntityId) -> Result<(), ClientError> {
        self.mutate(ctx, user_id, MembershipAction::Approve).await
    }

    pub async fn deny(&mut self, ctx: &SessionContext, user_id: EntityId) -> Result<(), ClientError> {
        self.mutate(ctx, user_id, MembershipAction::Deny).await
    }

    pub async fn kick(&mut self, ctx: &SessionContext, user_id: EntityId) -> Result<(), ClientError> {
        self.mutate(ctx, user_id, MembershipAction::Kick).await
    }

    pub async fn promote(&mut self, ctx: &SessionContext, user_id: EntityId) -> Result<(), ClientError> {
        self.mutate(ctx, user_id, MembershipAction::Promote).await
    }

    pub async fn demote(&mut self, ctx: &SessionContext, user_id: EntityId) -> Result<(), ClientError> {
        self.mutate(ctx, user_id, MembershipAction::Demote).await
    }
}
