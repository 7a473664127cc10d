//! HTTP client for a running fontvault server.
//!
//! Keeps the session cookie in its own cookie jar, so one client is one
//! browser-like session.
//!
//! ```rust,ignore
//! let client = HttpCatalogClient::new("http://127.0.0.1:3000")?;
//! client.login("1234").await?;
//! let fonts = client.list_fonts().await?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::VaultError;
use crate::api::{ErrorResponse, FailureResponse, PinRequest};
use crate::catalog::{Font, FontUpdate, NewFont};
use crate::optimistic::CatalogApi;
use crate::storage::StoredImage;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: Client,
    base_url: String,
}

impl From<reqwest::Error> for VaultError {
    fn from(err: reqwest::Error) -> Self {
        VaultError::Request(err.to_string())
    }
}

impl HttpCatalogClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, VaultError> {
        // the gate answers unauthenticated calls with a redirect; surface it
        // instead of following it to the PIN page
        let client = Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Submits the PIN. On success the session cookie is kept for later calls.
    pub async fn login(&self, pin: &str) -> Result<(), VaultError> {
        let response = self
            .client
            .post(self.url("/api/auth/verify-pin"))
            .json(&PinRequest::new(pin))
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(()),
            StatusCode::UNAUTHORIZED => Err(VaultError::InvalidPin),
            status => {
                let message = response
                    .json::<FailureResponse>()
                    .await
                    .map(|body| body.message)
                    .unwrap_or_else(|_| status.to_string());
                Err(VaultError::Request(message))
            }
        }
    }

    pub async fn logout(&self) -> Result<(), VaultError> {
        let response = self.client.post(self.url("/api/auth/logout")).send().await?;
        check(response).await.map(|_| ())
    }

    pub async fn get_font(&self, id: &str) -> Result<Font, VaultError> {
        let response = self.client.get(self.url(&format!("/api/fonts/{id}"))).send().await?;
        json(response).await
    }

    pub async fn create_font(&self, font: &NewFont) -> Result<Font, VaultError> {
        let response = self.client.post(self.url("/api/fonts")).json(font).send().await?;
        json(response).await
    }

    pub async fn update_font(&self, id: &str, update: &FontUpdate) -> Result<Font, VaultError> {
        let response = self
            .client
            .put(self.url(&format!("/api/fonts/{id}")))
            .json(update)
            .send()
            .await?;
        json(response).await
    }

    pub async fn upload_image(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<StoredImage, VaultError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_owned())
            .mime_str(content_type)?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.url("/api/upload"))
            .multipart(form)
            .send()
            .await?;
        json(response).await
    }
}

/// Maps non-success responses onto `VaultError`. A redirect means the gate
/// turned the request away, which is the same as a 401.
async fn check(response: Response) -> Result<Response, VaultError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status.is_redirection() || status == StatusCode::UNAUTHORIZED {
        return Err(VaultError::Unauthorized);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(VaultError::NotFound);
    }

    let message = response
        .json::<ErrorResponse>()
        .await
        .map(|body| body.error)
        .unwrap_or_else(|_| status.to_string());
    if status == StatusCode::BAD_REQUEST {
        Err(VaultError::Validation(message))
    } else {
        Err(VaultError::Request(message))
    }
}

async fn json<T: DeserializeOwned>(response: Response) -> Result<T, VaultError> {
    Ok(check(response).await?.json::<T>().await?)
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn list_fonts(&self) -> Result<Vec<Font>, VaultError> {
        let response = self.client.get(self.url("/api/fonts")).send().await?;
        json(response).await
    }

    async fn toggle_favorite(&self, id: &str) -> Result<Font, VaultError> {
        let response = self
            .client
            .patch(self.url(&format!("/api/fonts/{id}")))
            .send()
            .await?;
        json(response).await
    }

    async fn delete_font(&self, id: &str) -> Result<(), VaultError> {
        let response = self
            .client
            .delete(self.url(&format!("/api/fonts/{id}")))
            .send()
            .await?;
        check(response).await.map(|_| ())
    }
}
