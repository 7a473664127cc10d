use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::http::header::SET_COOKIE;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use super::{GateDecision, SessionGate};

/// Axum middleware running the [`SessionGate`] ahead of every route.
///
/// ```rust,ignore
/// let app = router.layer(axum::middleware::from_fn_with_state(gate, session_gate));
/// ```
pub async fn session_gate(State(gate): State<SessionGate>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let session_cookie = gate.cookie.extract(request.headers());

    match gate.evaluate(&path, session_cookie.as_deref()).await {
        GateDecision::Allow => next.run(request).await,
        GateDecision::Redirect {
            location,
            clear_cookie,
        } => {
            let mut response = Redirect::temporary(&location).into_response();
            if clear_cookie {
                match HeaderValue::from_str(&gate.cookie.removal_cookie().to_string()) {
                    Ok(value) => {
                        response.headers_mut().append(SET_COOKIE, value);
                    }
                    Err(e) => {
                        log::error!(target: "fontvault::gate", "msg=\"failed to encode removal cookie\" error=\"{e}\"");
                    }
                }
            }
            response
        }
    }
}
