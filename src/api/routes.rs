use std::path::Path;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::{fonts, handlers, pages, upload};
use crate::auth::{PinVerifier, SessionCookieConfig, SessionTokenCodec};
use crate::catalog::FontRepository;
use crate::gate::{GateConfig, SessionGate, session_gate};
use crate::storage::ImageStore;

#[derive(Debug, Clone)]
pub struct AppState<F, I> {
    pub pin_verifier: PinVerifier,
    pub token_codec: SessionTokenCodec,
    pub cookie_config: SessionCookieConfig,
    pub fonts: F,
    pub images: I,
}

impl<F, I> AppState<F, I> {
    pub fn new(
        pin_verifier: PinVerifier,
        token_codec: SessionTokenCodec,
        cookie_config: SessionCookieConfig,
        fonts: F,
        images: I,
    ) -> Self {
        Self {
            pin_verifier,
            token_codec,
            cookie_config,
            fonts,
            images,
        }
    }

    /// A gate sharing this state's codec and cookie settings, so pages and
    /// API routes verify sessions identically.
    pub fn session_gate(&self, config: GateConfig) -> SessionGate {
        SessionGate::new(config, self.token_codec.clone(), self.cookie_config.clone())
    }
}

/// POST /api/auth/verify-pin and POST /api/auth/logout
pub fn auth_routes<F, I>() -> Router<AppState<F, I>>
where
    F: Clone + Send + Sync + 'static,
    I: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/api/auth/verify-pin", post(handlers::verify_pin::<F, I>))
        .route("/api/auth/logout", post(handlers::logout::<F, I>))
}

/// The catalog data surface: fonts CRUD and image upload.
pub fn font_routes<F, I>() -> Router<AppState<F, I>>
where
    F: FontRepository + Clone + 'static,
    I: ImageStore + Clone + 'static,
{
    Router::new()
        .route(
            "/api/fonts",
            get(fonts::list_fonts::<F, I>).post(fonts::create_font::<F, I>),
        )
        .route(
            "/api/fonts/{id}",
            get(fonts::get_font::<F, I>)
                .put(fonts::update_font::<F, I>)
                .delete(fonts::delete_font::<F, I>)
                .patch(fonts::toggle_favorite::<F, I>),
        )
        .route(
            "/api/upload",
            post(upload::upload_image::<F, I>)
                .layer(DefaultBodyLimit::max(upload::UPLOAD_BODY_LIMIT)),
        )
}

pub fn page_routes<F, I>() -> Router<AppState<F, I>>
where
    F: Clone + Send + Sync + 'static,
    I: ImageStore + Clone + 'static,
{
    Router::new()
        .route("/", get(pages::root::<F, I>))
        .route("/auth", get(pages::auth_page))
        .route("/dashboard", get(pages::dashboard_page))
        .route("/favorites", get(pages::favorites_page))
        .route("/storage/{filename}", get(upload::serve_image::<F, I>))
}

/// The whole application: pages, auth and catalog APIs, stored images and
/// static assets, all behind the session gate.
pub fn router<F, I>(state: AppState<F, I>, gate: GateConfig, static_dir: impl AsRef<Path>) -> Router
where
    F: FontRepository + Clone + 'static,
    I: ImageStore + Clone + 'static,
{
    let gate = state.session_gate(gate);

    Router::new()
        .merge(page_routes::<F, I>())
        .merge(auth_routes::<F, I>())
        .merge(font_routes::<F, I>())
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(from_fn_with_state(gate, session_gate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
