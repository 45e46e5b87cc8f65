//! HTTP client for the storefront REST API.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::ApiConfig;
use crate::error::{ApiClientError, ApiResult};

/// Thin JSON client over `reqwest`.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
}

impl HttpClient {
    /// Creates a client from configuration.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        config.validate()?;
        let client = Client::builder().timeout(config.timeout()).build()?;
        let base_url = Url::parse(config.base_url())?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    ///
    /// `["products", "Discovery set"]` → `{base}/products/Discovery%20set`
    pub fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiClientError::InvalidUrl(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Makes a GET request.
    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<T> {
        let url = self.endpoint(segments)?;
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        Self::handle_response(response).await
    }

    /// Makes a PATCH request with a JSON body.
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(&self, segments: &[&str], body: &B) -> ApiResult<T> {
        let url = self.endpoint(segments)?;
        debug!(%url, "PATCH");
        let response = self.client.patch(url).json(body).send().await?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();
        let path = response.url().path().to_string();
        let text = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), %path, "API request failed");
            return match status {
                StatusCode::NOT_FOUND => Err(ApiClientError::NotFound(path)),
                StatusCode::BAD_REQUEST => Err(ApiClientError::Validation(text)),
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiClientError::Unauthorized(text)),
                _ => Err(ApiClientError::Remote {
                    status: status.as_u16(),
                    body: text,
                }),
            };
        }

        // An empty success body decodes like `null`.
        let body = if text.trim().is_empty() { "null" } else { text.as_str() };
        serde_json::from_str(body).map_err(Into::into)
    }
}
