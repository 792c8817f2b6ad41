//! Event endpoints.

use gather_core::access::AccessLevel;
use gather_core::validation::EventDraft;
use gather_core::{Attendance, Event, EventMember};
use gather_shared::types::EntityId;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::groups::MembershipStatusEnvelope;
use crate::error::ClientError;
use crate::http::ApiClient;

#[derive(Debug, Clone, Deserialize)]
pub struct EventEnvelope {
    pub event: Event,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventsEnvelope {
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventMembersEnvelope {
    pub users: Vec<EventMember>,
}

/// Viewer's attendance record after a join/leave/payment mutation. Leaving
/// deletes the record, so the field can come back absent.
#[derive(Debug, Clone, Deserialize)]
pub struct EventUserEnvelope {
    #[serde(default)]
    pub event_user: Option<Attendance>,
}

#[derive(Serialize)]
struct MembershipStatusRequest {
    status: AccessLevel,
}

#[derive(Serialize)]
struct PaymentRecordRequest {
    paid: bool,
    amount_paid: f64,
}

impl ApiClient {
    /// `GET /events`
    pub async fn list_events(&self, token: Option<&str>) -> Result<EventsEnvelope, ClientError> {
        self.send(self.request(Method::GET, "/events", token)).await
    }

    /// `POST /events`
    pub async fn create_event(
        &self,
        draft: &EventDraft,
        token: &str,
    ) -> Result<EventEnvelope, ClientError> {
        self.send(self.request(Method::POST, "/events", Some(token)).json(draft)).await
    }

    /// `GET /events/:id`
    pub async fn get_event(
        &self,
        event_id: EntityId,
        token: Option<&str>,
    ) -> Result<EventEnvelope, ClientError> {
        self.send(self.request(Method::GET, &format!("/events/{event_id}"), token)).await
    }

    /// `PATCH /events/:id`
    pub async fn update_event(&self, event: &Event, token: &str) -> Result<EventEnvelope, ClientError> {
        self.send(
            self.request(Method::PATCH, &format!("/events/{}", event.id), Some(token)).json(event),
        )
        .await
    }

    /// `POST /events/:id/users` — the viewer joins or requests to attend.
    pub async fn join_event(
        &self,
        event_id: EntityId,
        token: &str,
    ) -> Result<EventUserEnvelope, ClientError> {
        self.send(self.request(Method::POST, &format!("/events/{event_id}/users"), Some(token)))
            .await
    }

    /// `DELETE /events/:id/users` — the viewer leaves or cancels.
    pub async fn leave_event(
        &self,
        event_id: EntityId,
        token: &str,
    ) -> Result<EventUserEnvelope, ClientError> {
        self.send(self.request(Method::DELETE, &format!("/events/{event_id}/users"), Some(token)))
            .await
    }

    /// `GET /events/:id/users[?search=]`
    pub async fn event_members(
        &self,
        event_id: EntityId,
        search: Option<&str>,
        token: &str,
    ) -> Result<EventMembersEnvelope, ClientError> {
        let mut builder =
            self.request(Method::GET, &format!("/events/{event_id}/users"), Some(token));
        if let Some(term) = search {
            builder = builder.query(&[("search", term)]);
        }
        self.send(builder).await
    }

    /// `POST /events/:id/users/:userId` — direct insert, used by invites.
    pub async fn insert_event_member(
        &self,
        event_id: EntityId,
        user_id: EntityId,
        status: AccessLevel,
        token: &str,
    ) -> Result<MembershipStatusEnvelope, ClientError> {
        self.send(
            self.request(Method::POST, &format!("/events/{event_id}/users/{user_id}"), Some(token))
                .json(&MembershipStatusRequest { status }),
        )
        .await
    }

    /// `PATCH /events/:id/users/:userId` — approve/promote/demote.
    pub async fn update_event_member(
        &self,
        event_id: EntityId,
        user_id: EntityId,
        status: AccessLevel,
        token: &str,
    ) -> Result<MembershipStatusEnvelope, ClientError> {
        self.send(
            self.request(Method::PATCH, &format!("/events/{event_id}/users/{user_id}"), Some(token))
                .json(&MembershipStatusRequest { status }),
        )
        .await
    }

    /// `DELETE /events/:id/users/:userId` — deny/kick.
    pub async fn remove_event_member(
        &self,
        event_id: EntityId,
        user_id: EntityId,
        token: &str,
    ) -> Result<(), ClientError> {
        let _: serde_json::Value = self
            .send(self.request(
                Method::DELETE,
                &format!("/events/{event_id}/users/{user_id}"),
                Some(token),
            ))
            .await?;
        Ok(())
    }

    /// `PATCH /events/:id/users/:userId` — record a confirmed payment
    /// against the viewer's attendance.
    pub async fn update_event_payment(
        &self,
        event_id: EntityId,
        user_id: EntityId,
        amount: f64,
        token: &str,
    ) -> Result<EventUserEnvelope, ClientError> {
        self.send(
            self.request(Method::PATCH, &format!("/events/{event_id}/users/{user_id}"), Some(token))
                .json(&PaymentRecordRequest { paid: true, amount_paid: amount }),
        )
        .await
    }
}
