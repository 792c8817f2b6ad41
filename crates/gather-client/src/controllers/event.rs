//! Event page, roster management, and the payment flow.

use gather_core::access::{self, AccessLevel, MembershipAction};
use gather_core::validation::{check_payment_amount, EventDraft};
use gather_core::{DomainError, Event, EventMember};
use gather_shared::types::EntityId;
use tracing::info;

use crate::api::payments::{PaymentClient, PaymentIntent};
use crate::controllers::require_token;
use crate::error::ClientError;
use crate::session::SessionContext;

/// An event's page.
#[derive(Debug)]
pub struct EventPage {
    pub event: Event,
}

impl EventPage {
    /// Fetch-on-load; failures are fatal to the page.
    pub async fn load(ctx: &SessionContext, event_id: EntityId) -> Result<Self, ClientError> {
        ctx.check_token_status().await;
        let token = ctx.access_token();
        let event = ctx.api().get_event(event_id, token.as_deref()).await?.event;
        Ok(Self { event })
    }

    /// Attend (or request to attend) when the viewer has no record; leave
    /// or cancel otherwise. The server's returned record is applied as-is,
    /// so a public event joined directly at member level renders the
    /// "leave" affordance, not "cancel request".
    pub async fn toggle_attendance(&mut self, ctx: &SessionContext) -> Result<(), ClientError> {
        let token = require_token(ctx)?;
        match self.event.viewer_level() {
            Some(level) => {
                let action = if level == AccessLevel::Requested {
                    MembershipAction::Cancel
                } else {
                    MembershipAction::Leave
                };
                access::apply(Some(level), action)?;
                self.event.status = ctx.api().leave_event(self.event.id, &token).await?.event_user;
            }
            None => {
                access::apply(None, MembershipAction::Request)?;
                self.event.status = ctx.api().join_event(self.event.id, &token).await?.event_user;
            }
        }
        Ok(())
    }

    /// Whether the payment section applies to the current viewer.
    pub fn payment_due(&self) -> bool {
        self.event.payment_due()
    }

    /// Create a payment intent for `amount`. An amount below the event's
    /// price is rejected locally; the intent endpoint is never called.
    pub async fn begin_payment(
        &self,
        ctx: &SessionContext,
        payments: &PaymentClient,
        amount: f64,
        payment_method_id: &str,
    ) -> Result<PaymentIntent, ClientError> {
        check_payment_amount(amount, self.event.price)?;
        let viewer =
            ctx.session().user().cloned().ok_or(ClientError::Unauthenticated)?;
        payments.create_payment_intent(amount, viewer.id, self.event.id, payment_method_id).await
    }

    /// Record a gateway-confirmed payment against the viewer's attendance
    /// and apply the returned record.
    pub async fn confirm_payment(
        &mut self,
        ctx: &SessionContext,
        amount: f64,
    ) -> Result<(), ClientError> {
        let token = require_token(ctx)?;
        let viewer =
            ctx.session().user().cloned().ok_or(ClientError::Unauthenticated)?;
        let envelope =
            ctx.api().update_event_payment(self.event.id, viewer.id, amount, &token).await?;
        self.event.status = envelope.event_user;
        info!("Recorded payment of {} for event {}", amount, self.event.id);
        Ok(())
    }
}

/// Create an event from a draft. The draft is validated locally first; an
/// invalid draft never reaches the API.
pub async fn create_event(
    ctx: &SessionContext,
    draft: &EventDraft,
) -> Result<Event, ClientError> {
    draft.check()?;
    let token = require_token(ctx)?;
    Ok(ctx.api().create_event(draft, &token).await?.event)
}

/// Attendee roster of an event, as seen by a moderator or the creator.
#[derive(Debug)]
pub struct EventRoster {
    event_id: EntityId,
    viewer_level: AccessLevel,
    pub members: Vec<EventMember>,
}

impl EventRoster {
    pub async fn load(
        ctx: &SessionContext,
        event_id: EntityId,
        viewer_level: AccessLevel,
        search: Option<&str>,
    ) -> Result<Self, ClientError> {
        let token = require_token(ctx)?;
        let members = ctx.api().event_members(event_id, search, &token).await?.users;
        Ok(Self { event_id, viewer_level, members })
    }

    fn level_of(&self, user_id: EntityId) -> Result<AccessLevel, ClientError> {
        self.members
            .iter()
            .find(|member| member.user.id == user_id)
            .map(EventMember::level)
            .ok_or_else(|| DomainError::UnknownMember(user_id).into())
    }

    fn authorize(&self, target: AccessLevel) -> Result<(), ClientError> {
        if !self.viewer_level.may_act_on(target) {
            return Err(DomainError::NotPermitted { actor: self.viewer_level, target }.into());
        }
        Ok(())
    }

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
                    .update_event_member(self.event_id, user_id, next, &token)
                    .await?
                    .status;
                if let Some(member) =
                    self.members.iter_mut().find(|member| member.user.id == user_id)
                {
                    member.status.status = returned;
                }
            }
            None => {
                ctx.api().remove_event_member(self.event_id, user_id, &token).await?;
                self.members.retain(|member| member.user.id != user_id);
                info!("Removed user {} from event {}", user_id, self.event_id);
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
