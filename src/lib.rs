//! Prompt-to-image generation against the Gemini image models.
//!
//! ```no_run
//! use nanogen::{GeminiClient, GenerationRequest, ModelTier};
//!
//! # async fn run() -> nanogen::Result<()> {
//! let client = GeminiClient::from_env()?;
//! let request = GenerationRequest::new("a watercolor fox")
//!     .with_output_path("out/fox.png")
//!     .with_model_tier(ModelTier::Flash);
//! let result = client.generate(&request).await?;
//! println!("{:?}", result.saved_path);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod models;
pub mod prompt;
pub mod reference;

pub use config::GeminiConfig;
pub use error::{GenError, Result};
pub use gemini::{GeminiClient, ImageClient};
pub use models::{
    AspectRatio, GenerationRequest, GenerationResult, ModelTier, ReferenceImage,
    DEFAULT_OUTPUT_PATH,
};
pub use prompt::{build_prompt, FLAT_BACKGROUND_INSTRUCTION};
pub use reference::{load_reference_image, load_reference_images};
