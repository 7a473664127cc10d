#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::header::{COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, Response, StatusCode};
use fontvault::api::{AppState, router};
use fontvault::catalog::InMemoryFontRepository;
use fontvault::storage::{ImageStore, InMemoryImageStore};
use fontvault::{
    GateConfig, ManualClock, PinVerifier, SessionCookieConfig, SessionTokenCodec, TokenConfig,
};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

pub const PIN: &str = "1234";
pub const SECRET: &str = "integration-test-signing-secret-32b!";

pub struct TestApp<I = InMemoryImageStore> {
    pub router: Router,
    pub state: AppState<InMemoryFontRepository, I>,
    pub clock: ManualClock,
    pub static_dir: TempDir,
}

pub fn state_with<I>(images: I, clock: &ManualClock) -> AppState<InMemoryFontRepository, I> {
    let codec = SessionTokenCodec::with_clock(
        TokenConfig::new(SECRET).unwrap(),
        Arc::new(clock.clone()),
    );
    AppState::new(
        PinVerifier::new(Some(PIN.into())),
        codec,
        SessionCookieConfig::default(),
        InMemoryFontRepository::new(),
        images,
    )
}

pub fn app() -> TestApp {
    app_with(InMemoryImageStore::default())
}

pub fn app_with<I: ImageStore + Clone + 'static>(images: I) -> TestApp<I> {
    let clock = ManualClock::starting_now();
    let state = state_with(images, &clock);
    let static_dir = tempfile::tempdir().unwrap();
    std::fs::write(static_dir.path().join("app.css"), "body{}").unwrap();

    TestApp {
        router: router(state.clone(), GateConfig::default(), static_dir.path()),
        state,
        clock,
        static_dir,
    }
}

impl<I> TestApp<I> {
    pub async fn session_token(&self) -> String {
        self.state.token_codec.issue().await.unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    request("GET", uri, token, Body::empty())
}

pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: &serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header(COOKIE, format!("auth-session={token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Body) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(COOKIE, format!("auth-session={token}"));
    }
    builder.body(body).unwrap()
}

pub async fn body_to_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_to_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response.headers().get(LOCATION).and_then(|v| v.to_str().ok())
}

pub fn set_cookie(response: &Response<Body>) -> Option<&str> {
    response.headers().get(SET_COOKIE).and_then(|v| v.to_str().ok())
}

pub fn assert_redirect(response: &Response<Body>, to: &str) {
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(response), Some(to));
}

/// Multipart body with a single part.
pub fn multipart(
    field: &str,
    filename: Option<&str>,
    content_type: &str,
    bytes: &[u8],
) -> (String, Vec<u8>) {
    let boundary = "fontvault-test-boundary";
    let disposition = match filename {
        Some(name) => format!("form-data; name=\"{field}\"; filename=\"{name}\""),
        None => format!("form-data; name=\"{field}\""),
    };

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(format!("Content-Disposition: {disposition}\r\n").as_bytes());
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={boundary}"), body)
}
