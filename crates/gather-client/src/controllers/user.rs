//! User profile pages.

use gather_core::{Group, User};

use crate::controllers::require_token;
use crate::error::ClientError;
use crate::session::SessionContext;

/// Another user's page: the user plus the groups they belong to.
#[derive(Debug)]
pub struct UserPage {
    pub user: User,
    pub groups: Vec<Group>,
}

impl UserPage {
    pub async fn load(ctx: &SessionContext, username: &str) -> Result<Self, ClientError> {
        ctx.check_token_status().await;
        let token = ctx.access_token();
        let user = ctx.api().get_user(username, token.as_deref()).await?.user;
        let groups = ctx.api().user_groups(username, token.as_deref()).await?.groups;
        Ok(Self { user, groups })
    }

    /// Follow when no contact record exists, unfollow when one does.
    /// Applies the returned user, contact record included.
    pub async fn toggle_follow(&mut self, ctx: &SessionContext) -> Result<(), ClientError> {
        let token = require_token(ctx)?;
        let envelope = if self.user.followed() {
            ctx.api().unfollow_user(&self.user.username, &token).await?
        } else {
            ctx.api().follow_user(&self.user.username, &token).await?
        };
        self.user = envelope.user;
        Ok(())
    }

    /// Save the viewer's private note about this user.
    pub async fn save_note(&mut self, ctx: &SessionContext, note: &str) -> Result<(), ClientError> {
        let token = require_token(ctx)?;
        self.user = ctx.api().update_note(&self.user.username, note, &token).await?.user;
        Ok(())
    }
}

/// Update the signed-in viewer's own profile and propagate the returned
/// record into the session.
pub async fn update_profile(ctx: &SessionContext, user: &User) -> Result<User, ClientError> {
    let token = require_token(ctx)?;
    let updated = ctx.api().update_user(user, &token).await?.user;
    ctx.mutate_session(|session| session.replace_user(updated.clone()));
    Ok(updated)
}
