//! User endpoints.

use gather_core::User;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::groups::GroupsEnvelope;
use crate::error::ClientError;
use crate::http::ApiClient;

#[derive(Debug, Clone, Deserialize)]
pub struct UserEnvelope {
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UsersEnvelope {
    pub users: Vec<User>,
}

#[derive(Serialize)]
struct NoteRequest<'a> {
    note: &'a str,
}

impl ApiClient {
    /// `GET /users[?search=]`
    pub async fn list_users(
        &self,
        search: Option<&str>,
        token: Option<&str>,
    ) -> Result<UsersEnvelope, ClientError> {
        let mut builder = self.request(Method::GET, "/users", token);
        if let Some(term) = search {
            builder = builder.query(&[("search", term)]);
        }
        self.send(builder).await
    }

    /// `GET /users/:username`
    pub async fn get_user(
        &self,
        username: &str,
        token: Option<&str>,
    ) -> Result<UserEnvelope, ClientError> {
        self.send(self.request(Method::GET, &format!("/users/{username}"), token)).await
    }

    /// `PATCH /users/:username`
    pub async fn update_user(&self, user: &User, token: &str) -> Result<UserEnvelope, ClientError> {
        self.send(
            self.request(Method::PATCH, &format!("/users/{}", user.username), Some(token))
                .json(user),
        )
        .await
    }

    /// `PATCH /users/:username/note`
    pub async fn update_note(
        &self,
        username: &str,
        note: &str,
        token: &str,
    ) -> Result<UserEnvelope, ClientError> {
        self.send(
            self.request(Method::PATCH, &format!("/users/{username}/note"), Some(token))
                .json(&NoteRequest { note }),
        )
        .await
    }

    /// `POST /users/:username/follow`
    pub async fn follow_user(&self, username: &str, token: &str) -> Result<UserEnvelope, ClientError> {
        self.send(self.request(Method::POST, &format!("/users/{username}/follow"), Some(token)))
            .await
    }

    /// `DELETE /users/:username/follow`
    pub async fn unfollow_user(
        &self,
        username: &str,
        token: &str,
    ) -> Result<UserEnvelope, ClientError> {
        self.send(self.request(Method::DELETE, &format!("/users/{username}/follow"), Some(token)))
            .await
    }

    /// `GET /users/:username/groups`
    pub async fn user_groups(
        &self,
        username: &str,
        token: Option<&str>,
    ) -> Result<GroupsEnvelope, ClientError> {
        self.send(self.request(Method::GET, &format!("/users/{username}/groups"), token)).await
    }
}
