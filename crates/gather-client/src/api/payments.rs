//! Payment-intent service client.
//!
//! The card itself is confirmed by the payment gateway's own client SDK;
//! this module only creates the intent and hands back its client secret.

use gather_shared::config::PaymentSettings;
use gather_shared::types::EntityId;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::http::ApiClient;

#[derive(Debug, Clone)]
pub struct PaymentClient {
    api: ApiClient,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatePaymentIntentRequest<'a> {
    amount: f64,
    user_id: EntityId,
    event_id: EntityId,
    payment_method_id: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    pub client_secret: String,
}

impl PaymentClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { api: ApiClient::new(base_url) }
    }

    pub fn from_settings(settings: &PaymentSettings) -> Self {
        Self::new(settings.base_url.clone())
    }

    /// `POST /create-payment-intent`
    pub async fn create_payment_intent(
        &self,
        amount: f64,
        user_id: EntityId,
        event_id: EntityId,
        payment_method_id: &str,
    ) -> Result<PaymentIntent, ClientError> {
        let body = CreatePaymentIntentRequest { amount, user_id, event_id, payment_method_id };
        self.api
            .send(self.api.request(Method::POST, "/create-payment-intent", None).json(&body))
            .await
    }
}
