//! Authentication endpoints.

use gather_core::session::{TokenExpiration, TokenPair};
use gather_core::User;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ClientError;
use crate::http::ApiClient;

/// Session material returned by sign-in and registration.
///
/// The registration endpoint omits `expiration`; the first token check after
/// it behaves as fresh.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub user: User,
    pub tokens: TokenPair,
    #[serde(default)]
    pub expiration: Option<TokenExpiration>,
}

/// Replacement tokens from a silent refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshedTokens {
    pub tokens: TokenPair,
    pub expiration: TokenExpiration,
}

#[derive(Serialize)]
struct SignInRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    display_name: &'a str,
    password: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    access_token: &'a str,
    refresh_token: &'a str,
}

impl ApiClient {
    /// `POST /auth/signin`
    pub async fn sign_in(&self, username: &str, password: &str) -> Result<AuthSession, ClientError> {
        info!("Sign-in attempt for username: {}", username);
        let body = SignInRequest { username, password };
        self.send(self.request(Method::POST, "/auth/signin", None).json(&body)).await
    }

    /// `POST /users` — registration doubles as an implicit sign-in.
    pub async fn register(
        &self,
        username: &str,
        display_name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, ClientError> {
        info!("Registration attempt for username: {}", username);
        let body = RegisterRequest { username, display_name, password, email };
        self.send(self.request(Method::POST, "/users", None).json(&body)).await
    }

    /// `POST /auth/refresh`
    pub async fn refresh(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<RefreshedTokens, ClientError> {
        let body = RefreshRequest { access_token, refresh_token };
        self.send(self.request(Method::POST, "/auth/refresh", None).json(&body)).await
    }
}
