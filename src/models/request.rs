use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat};
use serde::Serialize;

use super::common::{AspectRatio, ModelTier};

pub const DEFAULT_OUTPUT_PATH: &str = "generated_image.png";

/// One generation job. Built with the `with_*` methods and read-only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    prompt: String,
    output_path: PathBuf,
    aspect_ratio: AspectRatio,
    model_tier: ModelTier,
    use_flat_background: bool,
    reference_image_paths: Vec<PathBuf>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            aspect_ratio: AspectRatio::default(),
            model_tier: ModelTier::default(),
            use_flat_background: false,
            reference_image_paths: Vec::new(),
        }
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    pub fn with_model_tier(mut self, model_tier: ModelTier) -> Self {
        self.model_tier = model_tier;
        self
    }

    pub fn with_flat_background(mut self, enabled: bool) -> Self {
        self.use_flat_background = enabled;
        self
    }

    pub fn with_reference_images<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.reference_image_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    pub fn model_tier(&self) -> ModelTier {
        self.model_tier
    }

    pub fn use_flat_background(&self) -> bool {
        self.use_flat_background
    }

    pub fn reference_image_paths(&self) -> &[PathBuf] {
        &self.reference_image_paths
    }
}

/// A decoded reference image plus the bytes that go over the wire.
///
/// `format`/`bytes` describe the upload encoding: PNG, JPEG and WebP files are
/// sent as read, anything else is re-encoded to PNG.
#[derive(Debug, Clone)]
pub struct ReferenceImage {
    pub path: PathBuf,
    pub source_format: ImageFormat,
    pub image: DynamicImage,
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
}

impl ReferenceImage {
    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerationResult {
    /// Absolute path of the written image, `None` when the response had no image part.
    pub saved_path: Option<PathBuf>,
    pub text: Option<String>,
    pub model: String,
}

impl GenerationResult {
    pub fn is_empty(&self) -> bool {
        self.saved_path.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = GenerationRequest::new("a cat");
        assert_eq!(request.prompt(), "a cat");
        assert_eq!(request.output_path(), Path::new("generated_image.png"));
        assert_eq!(request.aspect_ratio(), AspectRatio::Square);
        assert_eq!(request.model_tier(), ModelTier::Pro);
        assert!(!request.use_flat_background());
        assert!(request.reference_image_paths().is_empty());
    }

    #[test]
    fn test_request_builder() {
        let request = GenerationRequest::new("a dog")
            .with_output_path("out/dog.png")
            .with_aspect_ratio(AspectRatio::Landscape)
            .with_model_tier(ModelTier::Flash)
            .with_flat_background(true)
            .with_reference_images(["a.png", "b.jpg"]);

        assert_eq!(request.output_path(), Path::new("out/dog.png"));
        assert_eq!(request.model_tier(), ModelTier::Flash);
        assert!(request.use_flat_background());
        assert_eq!(
            request.reference_image_paths(),
            &[PathBuf::from("a.png"), PathBuf::from("b.jpg")]
        );
    }
}
