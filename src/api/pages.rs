use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Html, Redirect};

use super::routes::AppState;

/// `/` sends visitors holding any session cookie to the dashboard and
/// everyone else to the PIN page. Validity is left to the session gate,
/// which has already run.
pub async fn root<F, I>(State(state): State<AppState<F, I>>, headers: HeaderMap) -> Redirect
where
    F: Clone + Send + Sync + 'static,
    I: Clone + Send + Sync + 'static,
{
    if state.cookie_config.extract(&headers).is_some() {
        Redirect::temporary("/dashboard")
    } else {
        Redirect::temporary("/auth")
    }
}

pub async fn auth_page() -> Html<String> {
    Html(shell("auth", "Enter PIN"))
}

pub async fn dashboard_page() -> Html<String> {
    Html(shell("dashboard", "Font Archive"))
}

pub async fn favorites_page() -> Html<String> {
    Html(shell("favorites", "Favorites"))
}

/// Bare document the client bundle mounts into.
fn shell(page: &str, title: &str) -> String {
    format!(
        "<!doctype html>\n\
         <html lang=\"ko\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         <link rel=\"stylesheet\" href=\"/static/app.css\">\n\
         </head>\n\
         <body data-page=\"{page}\">\n\
         <main id=\"app\"></main>\n\
         <script type=\"module\" src=\"/static/app.js\"></script>\n\
         </body>\n\
         </html>\n"
    )
}
