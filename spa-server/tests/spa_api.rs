//! End-to-end API tests against an in-memory database.
//!
//! Each test builds the full router (auth middleware included) and drives it
//! with `tower::ServiceExt::oneshot`.

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use spa_server::{Config, ServerState, build_router};
use tower::ServiceExt;

async fn test_state() -> ServerState {
    let config = Config::with_overrides("/tmp/spa-server-test", 0);
    ServerState::initialize_in_memory(&config)
        .await
        .expect("in-memory state")
}

async fn test_app() -> (Router, ServerState, String) {
    let state = test_state().await;
    let token = state
        .jwt_service
        .generate_token("staff-1", "front-desk", "staff")
        .expect("token");
    (build_router(state.clone()), state, token)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let request = match body {
        Some(payload) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&payload).expect("payload"))),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn service_payload(name: &str) -> Value {
    json!({
        "service_name": name,
        "category": "massage",
        "description": "Sixty minutes of deep tissue work",
        "duration": 60,
        "base_price": 100.0,
        "benefits": ["relaxation"]
    })
}

fn appointment_payload(service_id: &str) -> Value {
    json!({
        "guest_id": "guest:g1",
        "guest_name": "Ana Silva",
        "room_number": "204",
        "service": service_id,
        "service_name": "Deep Tissue Massage",
        "therapist_name": "Marta",
        "spa_room_number": "SPA-2",
        "appointment_date": "2026-09-10T10:00:00Z",
        "start_time": "10:00",
        "end_time": "11:00",
        "duration": 60,
        "service_price": 100.0,
        "therapist_price": 50.0,
        "room_price": 30.0,
        "discount": 20.0,
        "total_price": 160.0
    })
}

async fn seed_service(app: &Router, token: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/spa/services",
        Some(token),
        Some(service_payload("Deep Tissue Massage")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().expect("service id").to_string()
}

async fn seed_appointment(app: &Router, token: &str) -> String {
    let service_id = seed_service(app, token).await;
    let (status, body) = send(
        app,
        Method::POST,
        "/api/spa/appointments",
        Some(token),
        Some(appointment_payload(&service_id)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().expect("appointment id").to_string()
}

#[tokio::test]
async fn health_endpoint_is_open() {
    let (app, _state, _token) = test_app().await;
    let (status, body) = send(&app, Method::GET, "/api/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn mutations_require_a_valid_token() {
    let (app, _state, _token) = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/spa/services",
        None,
        Some(service_payload("No Auth")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3001");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/spa/services",
        Some("garbage.token.here"),
        Some(service_payload("Bad Auth")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "E3002");
}

#[tokio::test]
async fn reads_are_open_without_a_token() {
    let (app, _state, _token) = test_app().await;
    let (status, body) = send(&app, Method::GET, "/api/spa/services", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_array());
}

#[tokio::test]
async fn service_catalog_crud_and_toggle() {
    let (app, _state, token) = test_app().await;
    let id = seed_service(&app, &token).await;

    let (status, body) = send(&app, Method::GET, &format!("/api/spa/services/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service_name"], "Deep Tissue Massage");
    assert_eq!(body["is_active"], true);

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/spa/services/{id}"),
        Some(&token),
        Some(json!({"base_price": 120.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["base_price"], 120.0);
    // Untouched fields survive the merge
    assert_eq!(body["duration"], 60);

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/spa/services/{id}/toggle"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "E0000");
    assert_eq!(body["data"]["is_active"], false);

    let (status, _body) = send(
        &app,
        Method::DELETE,
        &format!("/api/spa/services/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _body) = send(&app, Method::GET, &format!("/api/spa/services/{id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn service_validation_rejects_bad_duration() {
    let (app, _state, token) = test_app().await;
    let mut payload = service_payload("Five Minute Wonder");
    payload["duration"] = json!(5);

    let (status, body) = send(&app, Method::POST, "/api/spa/services", Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");
}

#[tokio::test]
async fn duplicate_room_number_is_rejected() {
    let (app, _state, token) = test_app().await;
    let room = json!({
        "room_number": "SPA-1",
        "room_type": "single",
        "capacity": 2,
        "hourly_rate": 40.0
    });

    let (status, _body) = send(&app, Method::POST, "/api/spa/rooms", Some(&token), Some(room.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::POST, "/api/spa/rooms", Some(&token), Some(room)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E0004");
}

#[tokio::test]
async fn duplicate_therapist_email_is_rejected() {
    let (app, _state, token) = test_app().await;
    let therapist = json!({
        "name": "Marta Ruiz",
        "email": "marta@hotel.example",
        "phone": "+34 600 000 000",
        "hourly_rate": 55.0
    });

    let (status, _body) = send(
        &app,
        Method::POST,
        "/api/spa/therapists",
        Some(&token),
        Some(therapist.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/spa/therapists",
        Some(&token),
        Some(therapist),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E0004");
}

#[tokio::test]
async fn creating_an_appointment_derives_its_invoice() {
    let (app, _state, token) = test_app().await;
    let appointment_id = seed_appointment(&app, &token).await;

    let (status, billing) = send(
        &app,
        Method::GET,
        &format!("/api/spa/billing/appointment/{appointment_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    assert!(billing["billing_id"].as_str().unwrap().starts_with("BIL-"));
    assert_eq!(billing["subtotal"], 180.0);
    assert_eq!(billing["tax"], 18.0);
    assert_eq!(billing["discount"], 20.0);
    assert_eq!(billing["total"], 178.0);
    assert_eq!(billing["amount_paid"], 0.0);
    assert_eq!(billing["amount_due"], 178.0);
    assert_eq!(billing["payment_status"], "pending");
    assert_eq!(billing["items"].as_array().unwrap().len(), 3);
    assert_eq!(billing["guest_name"], "Ana Silva");
    // The paired appointment comes back expanded
    assert_eq!(billing["appointment"]["guest_name"], "Ana Silva");
}

#[tokio::test]
async fn updating_an_appointment_regenerates_but_keeps_payments() {
    let (app, _state, token) = test_app().await;
    let appointment_id = seed_appointment(&app, &token).await;

    let (_, billing) = send(
        &app,
        Method::GET,
        &format!("/api/spa/billing/appointment/{appointment_id}"),
        None,
        None,
    )
    .await;
    let billing_id = billing["id"].as_str().unwrap().to_string();

    // Record a partial payment directly on the invoice
    let (status, _body) = send(
        &app,
        Method::PUT,
        &format!("/api/spa/billing/{billing_id}"),
        Some(&token),
        Some(json!({"amount_paid": 100.0, "payment_status": "partial"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Reprice the appointment
    let (status, _body) = send(
        &app,
        Method::PUT,
        &format!("/api/spa/appointments/{appointment_id}"),
        Some(&token),
        Some(json!({"service_price": 200.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, billing) = send(
        &app,
        Method::GET,
        &format!("/api/spa/billing/appointment/{appointment_id}"),
        None,
        None,
    )
    .await;
    // 200 + 50 + 30 = 280, tax 28, discount 20
    assert_eq!(billing["subtotal"], 280.0);
    assert_eq!(billing["total"], 288.0);
    assert_eq!(billing["amount_paid"], 100.0);
    assert_eq!(billing["amount_due"], 188.0);
    // Regeneration copies the appointment's payment status back over the
    // hand-set one; only amount_paid survives
    assert_eq!(billing["payment_status"], "pending");
}

#[tokio::test]
async fn deleting_an_appointment_removes_its_invoice() {
    let (app, _state, token) = test_app().await;
    let appointment_id = seed_appointment(&app, &token).await;

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/api/spa/appointments/{appointment_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Appointment and associated billing permanently deleted"
    );
    // The deleted record rides along in the response
    assert_eq!(body["data"]["guest_name"], "Ana Silva");

    let (status, _body) = send(
        &app,
        Method::GET,
        &format!("/api/spa/appointments/{appointment_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _body) = send(
        &app,
        Method::GET,
        &format!("/api/spa/billing/appointment/{appointment_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invoice_failure_never_blocks_the_appointment() {
    let (app, state, token) = test_app().await;
    let service_id = seed_service(&app, &token).await;

    // Make every invoice insert fail at the storage layer
    state
        .db
        .query("DEFINE FIELD subtotal ON TABLE spa_billing ASSERT $value > 1000000")
        .await
        .expect("define field");

    let (status, appointment) = send(
        &app,
        Method::POST,
        "/api/spa/appointments",
        Some(&token),
        Some(appointment_payload(&service_id)),
    )
    .await;
    // The appointment write stands even though its invoice failed
    assert_eq!(status, StatusCode::CREATED);
    let appointment_id = appointment["id"].as_str().unwrap().to_string();

    let (status, _body) = send(
        &app,
        Method::GET,
        &format!("/api/spa/billing/appointment/{appointment_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Lift the failure; updates still never backfill a missing invoice
    state
        .db
        .query("REMOVE FIELD subtotal ON TABLE spa_billing")
        .await
        .expect("remove field");

    let (status, _body) = send(
        &app,
        Method::PUT,
        &format!("/api/spa/appointments/{appointment_id}"),
        Some(&token),
        Some(json!({"service_price": 150.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _body) = send(
        &app,
        Method::GET,
        &format!("/api/spa/billing/appointment/{appointment_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn status_endpoint_sets_any_value_unconditionally() {
    let (app, _state, token) = test_app().await;
    let appointment_id = seed_appointment(&app, &token).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/spa/appointments/{appointment_id}/status"),
        Some(&token),
        Some(json!({"status": "completed"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "E0000");
    assert_eq!(body["message"], "Appointment status updated");
    assert_eq!(body["data"]["status"], "completed");

    // Setting the same value again is fine, as is walking backwards
    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/spa/appointments/{appointment_id}/status"),
        Some(&token),
        Some(json!({"status": "pending"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "pending");

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/spa/appointments/{appointment_id}/status"),
        Some(&token),
        Some(json!({"status": "sleeping"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E0002");
}

#[tokio::test]
async fn missing_records_return_not_found() {
    let (app, _state, token) = test_app().await;

    let (status, _body) = send(
        &app,
        Method::GET,
        "/api/spa/appointments/spa_appointment:missing",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _body) = send(
        &app,
        Method::GET,
        "/api/spa/billing/appointment/spa_appointment:missing",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _body) = send(
        &app,
        Method::PUT,
        "/api/spa/appointments/spa_appointment:missing",
        Some(&token),
        Some(json!({"service_price": 1.0})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn direct_invoice_edits_do_not_touch_the_appointment() {
    let (app, _state, token) = test_app().await;
    let appointment_id = seed_appointment(&app, &token).await;

    let (_, billing) = send(
        &app,
        Method::GET,
        &format!("/api/spa/billing/appointment/{appointment_id}"),
        None,
        None,
    )
    .await;
    let billing_id = billing["id"].as_str().unwrap().to_string();

    let (status, billing) = send(
        &app,
        Method::PUT,
        &format!("/api/spa/billing/{billing_id}"),
        Some(&token),
        Some(json!({"discount": 50.0, "total": 10.0, "notes": "manager override"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // Values are written as given, with no recomputation
    assert_eq!(billing["discount"], 50.0);
    assert_eq!(billing["total"], 10.0);

    let (status, appointment) = send(
        &app,
        Method::GET,
        &format!("/api/spa/appointments/{appointment_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(appointment["discount"], 20.0);
    assert_eq!(appointment["service_price"], 100.0);
}

#[tokio::test]
async fn manual_invoice_creation_returns_the_populated_record() {
    let (app, _state, token) = test_app().await;
    let appointment_id = seed_appointment(&app, &token).await;

    let (status, billing) = send(
        &app,
        Method::POST,
        "/api/spa/billing",
        Some(&token),
        Some(json!({
            "appointment": appointment_id,
            "guest_id": "guest:g1",
            "guest_name": "Ana Silva",
            "guest_email": "ana@example.com",
            "items": [
                {"description": "Gift voucher", "quantity": 1, "unit_price": 80.0, "subtotal": 80.0}
            ],
            "subtotal": 80.0,
            "tax": 8.0,
            "total": 88.0,
            "amount_due": 88.0,
            "payment_method": "card"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Token is generated server-side, values stored as supplied
    assert!(billing["billing_id"].as_str().unwrap().starts_with("BIL-"));
    assert_eq!(billing["subtotal"], 80.0);
    assert_eq!(billing["total"], 88.0);
    assert_eq!(billing["payment_status"], "pending");
    assert_eq!(billing["payment_method"], "card");
    assert_eq!(billing["appointment"]["guest_name"], "Ana Silva");
}

#[tokio::test]
async fn appointment_list_expands_references() {
    let (app, _state, token) = test_app().await;
    seed_appointment(&app, &token).await;

    let (status, body) = send(&app, Method::GET, "/api/spa/appointments", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let appointments = body.as_array().expect("array");
    assert_eq!(appointments.len(), 1);
    // The service reference comes back as the full catalog entry
    assert_eq!(
        appointments[0]["service"]["service_name"],
        "Deep Tissue Massage"
    );
    // Unset references stay null
    assert!(appointments[0]["therapist"].is_null());
}
