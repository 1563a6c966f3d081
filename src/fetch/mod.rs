//! Illustration fetching from the image-generation API
//!
//! One POST per attempt; a 2xx response body is binary image data. There is
//! no retry, no backoff and no request timeout. Callers keep the previous
//! illustration when an attempt fails.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::types::state::Illustration;

/// Default API root, overridable through `STORYSCREEN_API_BASE`.
pub const DEFAULT_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Default image model, overridable through `STORYSCREEN_MODEL`.
pub const DEFAULT_MODEL: &str = "stabilityai/stable-diffusion-xl-base-1.0";

const IMAGE_WIDTH: u32 = 1080;
const IMAGE_HEIGHT: u32 = 1080;

/// Errors raised by an illustration fetch attempt.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The API answered with a non-2xx status. All statuses are treated
    /// uniformly.
    #[error("image API returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("missing configuration: {0}")]
    Configuration(String),
}

/// Source of generated illustrations.
#[async_trait]
pub trait IllustrationSource: Send + Sync {
    async fn fetch(&self, prompt: &str) -> Result<Illustration, FetchError>;
}

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    width: u32,
    height: u32,
    prompt: &'a str,
}

/// Connection settings for the Workers AI image endpoint.
///
/// Credentials come from the environment; they are never embedded in a
/// build of this crate.
#[derive(Debug, Clone)]
pub struct WorkersAiConfig {
    pub account_id: String,
    pub api_token: String,
    pub model: String,
    pub api_base: String,
}

impl WorkersAiConfig {
    pub fn new(account_id: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            api_token: api_token.into(),
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Read the connection settings from the environment.
    pub fn from_env() -> Result<Self, FetchError> {
        let account_id = std::env::var("STORYSCREEN_ACCOUNT_ID")
            .map_err(|_| FetchError::Configuration("STORYSCREEN_ACCOUNT_ID not set".into()))?;
        let api_token = std::env::var("STORYSCREEN_API_TOKEN")
            .map_err(|_| FetchError::Configuration("STORYSCREEN_API_TOKEN not set".into()))?;

        let mut config = Self::new(account_id, api_token);
        if let Ok(model) = std::env::var("STORYSCREEN_MODEL") {
            config.model = model;
        }
        if let Ok(api_base) = std::env::var("STORYSCREEN_API_BASE") {
            config.api_base = api_base;
        }
        Ok(config)
    }
}

/// Client for the Workers AI image-generation endpoint.
#[derive(Debug, Clone)]
pub struct WorkersAiClient {
    client: reqwest::Client,
    config: WorkersAiConfig,
}

impl WorkersAiClient {
    pub fn new(config: WorkersAiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn run_url(&self) -> String {
        format!(
            "{}/accounts/{}/ai/run/@cf/{}",
            self.config.api_base, self.config.account_id, self.config.model
        )
    }
}

#[async_trait]
impl IllustrationSource for WorkersAiClient {
    async fn fetch(&self, prompt: &str) -> Result<Illustration, FetchError> {
        let url = self.run_url();
        log::debug!("requesting illustration: {url}");

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.config.api_token),
            )
            .json(&ImageRequest {
                width: IMAGE_WIDTH,
                height: IMAGE_HEIGHT,
                prompt,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::Api { status, message });
        }

        let bytes = response.bytes().await?;
        Ok(Illustration::from_png_bytes(&bytes))
    }
}

/// Source used when no credentials are configured. Every attempt fails the
/// same way a network error would, so the screen keeps its previous image
/// and stays usable.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredSource;

#[async_trait]
impl IllustrationSource for UnconfiguredSource {
    async fn fetch(&self, _prompt: &str) -> Result<Illustration, FetchError> {
        Err(FetchError::Configuration(
            "no image API credentials configured".into(),
        ))
    }
}
