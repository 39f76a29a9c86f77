pub mod image_client;

use crate::{
    config::GeminiConfig,
    error::Result,
    models::{GenerationRequest, GenerationResult, ModelTier},
};
use reqwest::Client;

pub use image_client::ImageClient;

const USER_AGENT: &str = concat!("nanogen/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug)]
pub struct GeminiClient {
    image_client: ImageClient,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            image_client: ImageClient::new(http, config),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(GeminiConfig::from_env())
    }

    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        self.image_client.generate(request).await
    }

    /// `(model id, tier name)` pairs this client can target.
    pub fn supported_models() -> Vec<(&'static str, &'static str)> {
        ModelTier::supported_models()
    }
}
