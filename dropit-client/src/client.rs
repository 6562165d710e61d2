use crate::error::{ClientError, Result};
use crate::model::{
    ApiErrorBody, FigmaFile, ImageOptions, ImagesResponse, StyleMetadata, StyleResponse,
};
use indexmap::IndexMap;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.figma.com";
const TOKEN_HEADER: &str = "X-Figma-Token";

/// Authenticated handle on the Figma REST API.
///
/// The handle is built unauthenticated and becomes usable once a token is
/// supplied through [`FigmaClient::initialize`]. Any fetch attempted before
/// that fails with [`ClientError::Uninitialized`] without touching the
/// network.
#[derive(Debug)]
pub struct FigmaClient {
    http: Client,
    base_url: Url,
    token: OnceLock<String>,
}

impl FigmaClient {
    pub fn new() -> Result<Self> {
        Self::with_timeout(30)
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let timeout = Duration::from_secs(timeout_secs.max(1));
        let http = Client::builder()
            .user_agent(concat!("Dropit/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .connect_timeout(connect_timeout(timeout))
            .pool_idle_timeout(Duration::from_secs(90))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        let base_url = Url::parse(DEFAULT_BASE_URL)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", DEFAULT_BASE_URL, e)))?;

        Ok(Self {
            http,
            base_url,
            token: OnceLock::new(),
        })
    }

    /// Shorthand for `new()` followed by `initialize(token)`.
    pub fn authenticated(token: &str) -> Result<Self> {
        let client = Self::new()?;
        client.initialize(token)?;
        Ok(client)
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Store the personal access token. Calling again with the same token is
    /// a no-op, a different token is rejected.
    pub fn initialize(&self, token: &str) -> Result<()> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ClientError::InvalidCredential);
        }

        let stored = self.token.get_or_init(|| token.to_string());
        if stored != token {
            return Err(ClientError::AlreadyInitialized);
        }
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.token.get().is_some()
    }

    /// Fetch a whole file, document tree included.
    pub async fn fetch_file(&self, file_id: &str) -> Result<FigmaFile> {
        let url = self.endpoint(&["v1", "files", file_id])?;
        self.get_json(url, &format!("file {}", file_id)).await
    }

    /// Fetch the metadata of a published style by its key.
    pub async fn fetch_style(&self, key: &str) -> Result<StyleMetadata> {
        let url = self.endpoint(&["v1", "styles", key])?;
        let response: StyleResponse = self.get_json(url, &format!("style {}", key)).await?;
        Ok(response.meta)
    }

    /// Render the given nodes and return their public URLs keyed by node id.
    /// Nodes the API could not render map to `None`.
    pub async fn fetch_image_urls(
        &self,
        file_id: &str,
        node_ids: &[String],
        options: &ImageOptions,
    ) -> Result<IndexMap<String, Option<String>>> {
        self.token()?;
        if let Some(scale) = options.scale
            && !(ImageOptions::MIN_SCALE..=ImageOptions::MAX_SCALE).contains(&scale)
        {
            return Err(ClientError::InvalidRequest(format!(
                "scale must be between {} and {}, got {}",
                ImageOptions::MIN_SCALE,
                ImageOptions::MAX_SCALE,
                scale
            )));
        }

        let mut url = self.endpoint(&["v1", "images", file_id])?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("ids", &node_ids.join(","));
            if let Some(format) = options.format {
                query.append_pair("format", format.as_str());
            }
            if let Some(scale) = options.scale {
                query.append_pair("scale", &scale.to_string());
            }
        }

        let response: ImagesResponse = self
            .get_json(url, &format!("images of file {}", file_id))
            .await?;

        if let Some(err) = response.err {
            return Err(ClientError::InvalidRequest(err));
        }
        Ok(response.images)
    }

    fn token(&self) -> Result<&str> {
        self.token
            .get()
            .map(String::as_str)
            .ok_or(ClientError::Uninitialized)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, resource: &str) -> Result<T> {
        let token = self.token()?;
        debug!("Fetching {}", url);

        let response = self
            .http
            .get(url)
            .header(TOKEN_HEADER, token)
            .send()
            .await?;

        let response = Self::check_status(response, resource).await?;
        let body = response.bytes().await?;
        decode(&body)
    }

    async fn check_status(response: Response, resource: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .unwrap_or_default()
            .into_message(status.canonical_reason().unwrap_or("unknown error").to_string());
        debug!("Request for {} failed with {}: {}", resource, status, message);

        Err(match status {
            StatusCode::NOT_FOUND => ClientError::NotFound(resource.to_string()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Unauthorized(message),
            StatusCode::BAD_REQUEST => ClientError::InvalidRequest(message),
            _ => ClientError::Api {
                status: status.as_u16(),
                message,
            },
        })
    }
}

/// Connection attempts get half of the overall request budget.
fn connect_timeout(timeout: Duration) -> Duration {
    timeout / 2
}

/// Decode a response body without serde_json's nesting limit.
///
/// Every node level of a document costs two JSON levels, so real files run
/// past the default limit of 128. The stack grows on demand instead.
fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let mut json = serde_json::Deserializer::from_slice(body);
    json.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut json))?;
    json.end()?;
    Ok(value)
}
