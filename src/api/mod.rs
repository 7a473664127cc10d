//! HTTP surface built on axum.
//!
//! ```rust,ignore
//! let state = AppState::new(pin_verifier, codec, cookie_config, fonts, images);
//! let app = fontvault::api::router(state, GateConfig::default(), "static");
//! axum::serve(listener, app).await?;
//! ```

mod error;
mod extract;
mod fonts;
mod handlers;
mod pages;
mod routes;
mod types;
mod upload;

pub use error::AppError;
pub use extract::Authenticated;
pub use routes::{AppState, auth_routes, font_routes, page_routes, router};
pub use types::*;
pub use upload::UPLOAD_BODY_LIMIT;
