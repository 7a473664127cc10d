//! Session cookie construction and extraction.

use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use chrono::Duration;
use cookie::time::Duration as CookieDuration;
use cookie::{Cookie, SameSite};

pub const SESSION_COOKIE_NAME: &str = "auth-session";

/// Attributes of the `auth-session` cookie.
///
/// Defaults: http-only, `SameSite=Lax`, path `/`, 7-day max-age and not
/// secure. Production configs turn `secure` on.
#[derive(Debug, Clone)]
pub struct SessionCookieConfig {
    pub name: String,
    pub path: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub max_age: Duration,
}

impl Default for SessionCookieConfig {
    fn default() -> Self {
        Self {
            name: SESSION_COOKIE_NAME.to_owned(),
            path: "/".to_owned(),
            secure: false,
            http_only: true,
            same_site: SameSite::Lax,
            max_age: Duration::days(7),
        }
    }
}

impl SessionCookieConfig {
    /// Cookie carrying a freshly issued session token.
    pub fn session_cookie(&self, token: impl Into<String>) -> Cookie<'static> {
        self.build(token.into(), CookieDuration::seconds(self.max_age.num_seconds()))
    }

    /// Cookie that makes the browser drop the session.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        self.build(String::new(), CookieDuration::ZERO)
    }

    /// Value of the session cookie, if the request carries one.
    ///
    /// An empty value still counts as present.
    pub fn extract(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|header| Cookie::split_parse(header.to_owned()))
            .filter_map(Result::ok)
            .find(|cookie| cookie.name() == self.name)
            .map(|cookie| cookie.value().to_owned())
    }

    fn build(&self, value: String, max_age: CookieDuration) -> Cookie<'static> {
        Cookie::build((self.name.clone(), value))
            .path(self.path.clone())
            .secure(self.secure)
            .http_only(self.http_only)
            .same_site(self.same_site)
            .max_age(max_age)
            .build()
    }
}
