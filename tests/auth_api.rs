//! PIN submission and logout endpoints.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use axum::Router;
use axum::body::Body;
use axum::http::StatusCode;
use fontvault::api::{AppState, auth_routes};
use fontvault::catalog::InMemoryFontRepository;
use fontvault::storage::InMemoryImageStore;
use fontvault::{PinVerifier, SessionCookieConfig, SessionTokenCodec, TokenConfig};
use serde_json::json;
use tower::ServiceExt;

use common::{
    PIN, SECRET, app, assert_redirect, body_to_json, get, json_request, request, set_cookie,
};

fn token_from(set_cookie: &str) -> String {
    set_cookie
        .split(';')
        .next()
        .and_then(|pair| pair.strip_prefix("auth-session="))
        .unwrap()
        .to_owned()
}

#[tokio::test]
async fn test_correct_pin_sets_seven_day_cookie() {
    let app = app();
    let response = app
        .send(json_request("POST", "/api/auth/verify-pin", None, &json!({ "pin": PIN })))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = set_cookie(&response).unwrap().to_owned();
    assert!(cookie.starts_with("auth-session="));
    assert!(cookie.contains("Max-Age=604800"));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
    assert!(!cookie.contains("Secure"));

    assert_eq!(body_to_json(response).await, json!({ "success": true }));

    let token = token_from(&cookie);
    assert!(app.state.token_codec.verify(&token).await);
}

#[tokio::test]
async fn test_issued_cookie_opens_the_dashboard() {
    let app = app();
    let response = app
        .send(json_request("POST", "/api/auth/verify-pin", None, &json!({ "pin": PIN })))
        .await;
    let token = token_from(set_cookie(&response).unwrap());

    let response = app.send(get("/dashboard", Some(&token))).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_wrong_pin_is_rejected() {
    let app = app();

    for body in [
        json!({ "pin": "0000" }),
        json!({ "pin": "" }),
        json!({ "pin": "12345" }),
        json!({ "pin": "123" }),
        json!({}),
    ] {
        let response = app
            .send(json_request("POST", "/api/auth/verify-pin", None, &body))
            .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{body}");
        assert!(set_cookie(&response).is_none());
        assert_eq!(
            body_to_json(response).await,
            json!({ "success": false, "message": "Invalid PIN" })
        );
    }
}

#[tokio::test]
async fn test_non_string_pin_is_a_wrong_pin() {
    let app = app();

    for body in [
        json!({ "pin": 1234 }),
        json!({ "pin": true }),
        json!({ "pin": null }),
        json!({ "pin": ["1234"] }),
    ] {
        let response = app
            .send(json_request("POST", "/api/auth/verify-pin", None, &body))
            .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{body}");
        assert!(set_cookie(&response).is_none());
        assert_eq!(
            body_to_json(response).await,
            json!({ "success": false, "message": "Invalid PIN" })
        );
    }
}

#[tokio::test]
async fn test_unreadable_body_is_a_server_error() {
    let app = app();
    let response = app
        .send(request(
            "POST",
            "/api/auth/verify-pin",
            None,
            Body::from("{not json"),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_to_json(response).await,
        json!({ "success": false, "message": "Server error" })
    );
}

#[tokio::test]
async fn test_pin_endpoint_ignores_stale_cookie() {
    let app = app();
    let response = app
        .send(json_request(
            "POST",
            "/api/auth/verify-pin",
            Some("stale-token"),
            &json!({ "pin": PIN }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookie(&response).unwrap().contains("Max-Age=604800"));
}

fn state(
    pin: Option<&str>,
    cookie: SessionCookieConfig,
) -> AppState<InMemoryFontRepository, InMemoryImageStore> {
    AppState::new(
        PinVerifier::new(pin.map(Into::into)),
        SessionTokenCodec::new(TokenConfig::new(SECRET).unwrap()),
        cookie,
        InMemoryFontRepository::new(),
        InMemoryImageStore::default(),
    )
}

#[tokio::test]
async fn test_unconfigured_pin_fails_closed() {
    let app: Router = auth_routes().with_state(state(None, SessionCookieConfig::default()));

    for pin in ["", "1234", "0000"] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/auth/verify-pin", None, &json!({ "pin": pin })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_unrepresentable_session_expiry_is_a_server_error() {
    let codec = SessionTokenCodec::new(
        TokenConfig::new(SECRET)
            .unwrap()
            .with_lifetime(chrono::Duration::days(1_000_000_000)),
    );
    let state = AppState::new(
        PinVerifier::new(Some(PIN.into())),
        codec,
        SessionCookieConfig::default(),
        InMemoryFontRepository::new(),
        InMemoryImageStore::default(),
    );
    let app: Router = auth_routes().with_state(state);

    let response = app
        .oneshot(json_request("POST", "/api/auth/verify-pin", None, &json!({ "pin": PIN })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(set_cookie(&response).is_none());
    assert_eq!(
        body_to_json(response).await,
        json!({ "success": false, "message": "Server error" })
    );
}

#[tokio::test]
async fn test_production_cookie_is_secure() {
    let cookie = SessionCookieConfig {
        secure: true,
        ..Default::default()
    };
    let app: Router = auth_routes().with_state(state(Some(PIN), cookie));

    let response = app
        .oneshot(json_request("POST", "/api/auth/verify-pin", None, &json!({ "pin": PIN })))
        .await
        .unwrap();
    assert!(set_cookie(&response).unwrap().contains("Secure"));
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = app();
    let token = app.session_token().await;

    let response = app
        .send(request("POST", "/api/auth/logout", Some(&token), Body::empty()))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = set_cookie(&response).unwrap().to_owned();
    assert!(cookie.starts_with("auth-session=;"));
    assert!(cookie.contains("Max-Age=0"));
    assert_eq!(body_to_json(response).await, json!({ "success": true }));
}

#[tokio::test]
async fn test_logout_without_session_is_gated() {
    let app = app();
    let response = app
        .send(request("POST", "/api/auth/logout", None, Body::empty()))
        .await;
    assert_redirect(&response, "/auth");
}
