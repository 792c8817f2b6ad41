//! Event page, attendance, and payment flow against mocked services.

use std::sync::Arc;

use gather_client::api::PaymentClient;
use gather_client::controllers::EventPage;
use gather_client::{ApiClient, SessionContext};
use gather_core::access::AccessLevel;
use gather_core::session::{MemoryStore, TokenPair};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn signed_in_context(server: &MockServer) -> SessionContext {
    let ctx = SessionContext::new(ApiClient::new(server.uri()), Arc::new(MemoryStore::new()));
    ctx.mutate_session(|session| {
        session.adopt(
            serde_json::from_value(
                json!({"id": 1, "username": "sam_doe", "display_name": "Sam Doe"}),
            )
            .unwrap(),
            TokenPair { access_token: "access-1".into(), refresh_token: "refresh-1".into() },
            None,
        );
    });
    ctx
}

fn event_json(status: Option<serde_json::Value>, price: f64) -> serde_json::Value {
    let mut event = json!({
        "id": 3,
        "title": "Spring meetup",
        "description": "Open-air meetup",
        "start_time": "2026-05-02T14:00:00Z",
        "visibility": 0,
        "group": {
            "id": 7,
            "name": "Hill Walkers",
            "about": "Weekend walks",
            "visibility": 1,
            "owner": {"id": 2, "username": "eilidh_m", "display_name": "Eilidh M"}
        },
        "creator": {"id": 2, "username": "eilidh_m", "display_name": "Eilidh M"},
        "price": price,
        "pay_what_you_want": false
    });
    if let Some(status) = status {
        event["status"] = status;
    }
    event
}

#[tokio::test]
async fn joining_a_public_event_lands_directly_at_member() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events/3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"event": event_json(None, 0.0)})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/events/3/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "event_user": {"status": 1, "paid": false, "amount_paid": 0.0}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = signed_in_context(&server);
    let mut page = EventPage::load(&ctx, 3).await.unwrap();
    assert!(!page.event.has_attendance());

    page.toggle_attendance(&ctx).await.unwrap();

    // Status 1 as returned: the page must offer "leave", not "cancel".
    assert_eq!(page.event.viewer_level(), Some(AccessLevel::Member));
    let caps = page.event.viewer_capabilities();
    assert!(caps.may_leave);
    assert!(!caps.may_request_or_cancel);
}

#[tokio::test]
async fn leaving_clears_the_attendance_record() {
    let server = MockServer::start().await;
    let attending = json!({"status": 1, "paid": false, "amount_paid": 0.0});
    Mock::given(method("GET"))
        .and(path("/events/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"event": event_json(Some(attending), 0.0)}),
        ))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/events/3/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = signed_in_context(&server);
    let mut page = EventPage::load(&ctx, 3).await.unwrap();
    page.toggle_attendance(&ctx).await.unwrap();

    assert!(!page.event.has_attendance());
    assert!(!page.event.viewer_capabilities().may_leave);
}

#[tokio::test]
async fn creator_cannot_leave_their_own_event() {
    let server = MockServer::start().await;
    let creating = json!({"status": 3, "paid": false, "amount_paid": 0.0});
    Mock::given(method("GET"))
        .and(path("/events/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"event": event_json(Some(creating), 0.0)}),
        ))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/events/3/users"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let ctx = signed_in_context(&server);
    let mut page = EventPage::load(&ctx, 3).await.unwrap();
    assert!(page.toggle_attendance(&ctx).await.is_err());
    assert_eq!(page.event.viewer_level(), Some(AccessLevel::Owner));
}

#[tokio::test]
async fn payment_below_minimum_never_reaches_the_intent_endpoint() {
    let server = MockServer::start().await;
    let payment_server = MockServer::start().await;
    let attending = json!({"status": 1, "paid": false, "amount_paid": 0.0});
    Mock::given(method("GET"))
        .and(path("/events/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"event": event_json(Some(attending), 5.0)}),
        ))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/create-payment-intent"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&payment_server)
        .await;

    let ctx = signed_in_context(&server);
    let payments = PaymentClient::new(payment_server.uri());
    let page = EventPage::load(&ctx, 3).await.unwrap();
    assert!(page.payment_due());

    let result = page.begin_payment(&ctx, &payments, 4.99, "pm_123").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn payment_flow_records_and_applies_the_returned_attendance() {
    let server = MockServer::start().await;
    let payment_server = MockServer::start().await;
    let attending = json!({"status": 1, "paid": false, "amount_paid": 0.0});
    Mock::given(method("GET"))
        .and(path("/events/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"event": event_json(Some(attending), 5.0)}),
        ))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/create-payment-intent"))
        .and(body_json(json!({
            "amount": 7.5, "userId": 1, "eventId": 3, "paymentMethodId": "pm_123"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"clientSecret": "cs_test_1"})),
        )
        .expect(1)
        .mount(&payment_server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/events/3/users/1"))
        .and(body_json(json!({"paid": true, "amount_paid": 7.5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "event_user": {"status": 1, "paid": true, "amount_paid": 7.5}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = signed_in_context(&server);
    let payments = PaymentClient::new(payment_server.uri());
    let mut page = EventPage::load(&ctx, 3).await.unwrap();

    let intent = page.begin_payment(&ctx, &payments, 7.5, "pm_123").await.unwrap();
    assert_eq!(intent.client_secret, "cs_test_1");

    // Card confirmation happens in the gateway SDK; on success the record
    // is written back and applied.
    page.confirm_payment(&ctx, 7.5).await.unwrap();
    let status = page.event.status.as_ref().unwrap();
    assert!(status.paid);
    assert_eq!(status.amount_paid, 7.5);
    assert!(!page.payment_due());
}
