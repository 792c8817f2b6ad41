//! Group endpoints.

use gather_core::access::AccessLevel;
use gather_core::validation::GroupDraft;
use gather_core::{Group, GroupMember};
use gather_shared::types::EntityId;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::events::EventsEnvelope;
use crate::error::ClientError;
use crate::http::ApiClient;

#[derive(Debug, Clone, Deserialize)]
pub struct GroupEnvelope {
    pub group: Group,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupsEnvelope {
    pub groups: Vec<Group>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupMembersEnvelope {
    pub users: Vec<GroupMember>,
}

/// Response of the membership mutation endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct MembershipStatusEnvelope {
    pub status: AccessLevel,
}

#[derive(Serialize)]
struct MembershipStatusRequest {
    status: AccessLevel,
}

impl ApiClient {
    /// `GET /groups`
    pub async fn list_groups(&self, token: Option<&str>) -> Result<GroupsEnvelope, ClientError> {
        self.send(self.request(Method::GET, "/groups", token)).await
    }

    /// `POST /groups`
    pub async fn create_group(
        &self,
        draft: &GroupDraft,
        token: &str,
    ) -> Result<GroupEnvelope, ClientError> {
        self.send(self.request(Method::POST, "/groups", Some(token)).json(draft)).await
    }

    /// `GET /groups/:id`
    pub async fn get_group(
        &self,
        group_id: EntityId,
        token: Option<&str>,
    ) -> Result<GroupEnvelope, ClientError> {
        self.send(self.request(Method::GET, &format!("/groups/{group_id}"), token)).await
    }

    /// `PATCH /groups/:id`
    pub async fn update_group(&self, group: &Group, token: &str) -> Result<GroupEnvelope, ClientError> {
        self.send(
            self.request(Method::PATCH, &format!("/groups/{}", group.id), Some(token)).json(group),
        )
        .await
    }

    /// `GET /groups/:id/events`
    pub async fn group_events(
        &self,
        group_id: EntityId,
        token: Option<&str>,
    ) -> Result<EventsEnvelope, ClientError> {
        self.send(self.request(Method::GET, &format!("/groups/{group_id}/events"), token)).await
    }

    /// `GET /groups/:id/users[?search=]`
    pub async fn group_members(
        &self,
        group_id: EntityId,
        search: Option<&str>,
        token: &str,
    ) -> Result<GroupMembersEnvelope, ClientError> {
        let mut builder =
            self.request(Method::GET, &format!("/groups/{group_id}/users"), Some(token));
        if let Some(term) = search {
            builder = builder.query(&[("search", term)]);
        }
        self.send(builder).await
    }

    /// `POST /groups/:id/users/:userId` — direct insert at a given level,
    /// used by the invite flow.
    pub async fn insert_group_member(
        &self,
        group_id: EntityId,
        user_id: EntityId,
        status: AccessLevel,
        token: &str,
    ) -> Result<MembershipStatusEnvelope, ClientError> {
        self.send(
            self.request(Method::POST, &format!("/groups/{group_id}/users/{user_id}"), Some(token))
                .json(&MembershipStatusRequest { status }),
        )
        .await
    }

    /// `PATCH /groups/:id/users/:userId` — approve/promote/demote.
    pub async fn update_group_member(
        &self,
        group_id: EntityId,
        user_id: EntityId,
        status: AccessLevel,
        token: &str,
    ) -> Result<MembershipStatusEnvelope, ClientError> {
        self.send(
            self.request(Method::PATCH, &format!("/groups/{group_id}/users/{user_id}"), Some(token))
                .json(&MembershipStatusRequest { status }),
        )
        .await
    }

    /// `DELETE /groups/:id/users/:userId` — deny/kick.
    pub async fn remove_group_member(
        &self,
        group_id: EntityId,
        user_id: EntityId,
        token: &str,
    ) -> Result<(), ClientError> {
        let _: serde_json::Value = self
            .send(self.request(
                Method::DELETE,
                &format!("/groups/{group_id}/users/{user_id}"),
                Some(token),
            ))
            .await?;
        Ok(())
    }

    /// `POST /groups/:id/join`
    pub async fn join_group(&self, group_id: EntityId, token: &str) -> Result<GroupEnvelope, ClientError> {
        self.send(self.request(Method::POST, &format!("/groups/{group_id}/join"), Some(token)))
            .await
    }

    /// `POST /groups/:id/leave` — also cancels a pending request.
    pub async fn leave_group(&self, group_id: EntityId, token: &str) -> Result<GroupEnvelope, ClientError> {
        self.send(self.request(Method::POST, &format!("/groups/{group_id}/leave"), Some(token)))
            .await
    }
}
