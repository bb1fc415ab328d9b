//! Imgur API HTTP client.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, header};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{ErrorResponse, GalleryResponse, ImageResponse};
use crate::domain::errors::LookupError;
use crate::domain::ports::ImageHostPort;
use crate::infrastructure::config::HttpConfig;
use crate::infrastructure::http::{build_client, map_transport_error};

/// Default Imgur API base URL.
pub const IMGUR_API_BASE: &str = "https://api.imgur.com/3";

/// Image host adapter over the Imgur v3 API.
pub struct ImgurClient {
    client: Client,
    base_url: String,
    client_id: Option<String>,
}

impl ImgurClient {
    /// Creates client with default base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(client_id: Option<String>, http: &HttpConfig) -> Result<Self, LookupError> {
        Self::with_base_url(IMGUR_API_BASE, client_id, http)
    }

    /// Creates client with custom base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(
        base_url: impl Into<String>,
        client_id: Option<String>,
        http: &HttpConfig,
    ) -> Result<Self, LookupError> {
        let client_id = client_id.filter(|id| !id.trim().is_empty());
        if client_id.is_none() {
            warn!("No Imgur client id configured, hosted image lookups will likely be rejected");
        }

        Ok(Self {
            client: build_client(http)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client_id,
        })
    }

    fn image_url(&self, id: &str) -> String {
        format!("{}/image/{}", self.base_url, id)
    }

    /// Normalized gallery ids already carry their `gallery/` or `album/` prefix.
    fn album_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.client_id {
            Some(id) => request.header(header::AUTHORIZATION, format!("Client-ID {id}")),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, LookupError> {
        debug!(url, "Requesting imgur resource");

        let response = self
            .authorize(self.client.get(url))
            .send()
            .await
            .map_err(|e| map_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| LookupError::decode(e.to_string()))
    }

    async fn handle_error_response(status: StatusCode, response: reqwest::Response) -> LookupError {
        let retry_after_secs = response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        let message = response
            .json::<ErrorResponse>()
            .await
            .ok()
            .and_then(|e| e.message())
            .unwrap_or_else(|| format!("HTTP {status}"));

        match status {
            StatusCode::TOO_MANY_REQUESTS => LookupError::RateLimited { retry_after_secs },
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
                LookupError::network("Imgur is temporarily unavailable")
            }
            _ => LookupError::status(status.as_u16(), message),
        }
    }
}

#[async_trait]
impl ImageHostPort for ImgurClient {
    async fn fetch_image(&self, id: &str) -> Result<Option<String>, LookupError> {
        let response: ImageResponse = self.get_json(&self.image_url(id)).await?;
        Ok(response.data.and_then(|data| data.link))
    }

    async fn fetch_album(&self, id: &str) -> Result<Option<Vec<String>>, LookupError> {
        let response: GalleryResponse = self.get_json(&self.album_url(id)).await?;
        Ok(response.data.map(|data| data.into_links()))
    }
}
