use std::fs;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::{DynamicImage, ImageFormat};
use reqwest::Client;

use crate::{
    config::GeminiConfig,
    error::{GenError, Result},
    logger,
    models::{
        wire::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, ImageConfig, Part},
        AspectRatio, GenerationRequest, GenerationResult, ReferenceImage,
    },
    prompt::{build_prompt, preview},
    reference::{absolute, load_reference_images},
};

const PROMPT_PREVIEW_CHARS: usize = 100;

#[derive(Clone)]
pub struct ImageClient {
    http: Client,
    config: GeminiConfig,
}

impl std::fmt::Debug for ImageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageClient")
            .field("base_url", &self.config.base_url)
            .finish()
    }
}

impl ImageClient {
    pub fn new(http: Client, config: GeminiConfig) -> Self {
        Self { http, config }
    }

    /// Run one generation: check the credential and output path, load
    /// references, call the API once and save the first returned image.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        let api_key = self.config.api_key()?;
        let base_url = self.config.base_url()?;
        output_format(request.output_path())?;

        let model_id = request.model_tier().model_id();
        let final_prompt = build_prompt(request.prompt(), request.use_flat_background());

        log::info!("🤖 Model: {}", model_id);
        log::info!("📝 Prompt: {}", preview(&final_prompt, PROMPT_PREVIEW_CHARS));
        log::info!("📐 Aspect ratio: {}", request.aspect_ratio());
        if request.use_flat_background() {
            log::info!("🎨 Option: magenta background");
        }
        if !request.reference_image_paths().is_empty() {
            log::info!(
                "🖼️  Option: {} reference image(s)",
                request.reference_image_paths().len()
            );
        }

        let references = load_reference_images(request.reference_image_paths())?;
        let payload = Self::build_payload(&final_prompt, &references, request.aspect_ratio());

        log::info!("🔄 Generating...");
        let url = format!("{}/models/{}:generateContent", base_url, model_id);
        log::debug!("POST {}", url);

        let parsed = {
            let _timer = logger::timer("generateContent");

            let response = self
                .http
                .post(&url)
                .header("x-goog-api-key", api_key)
                .json(&payload)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(GenError::Api { status, body });
            }

            let body = response.text().await?;
            serde_json::from_str::<GenerateContentResponse>(&body)
                .map_err(|e| GenError::ResponseError(e.to_string()))?
        };

        if let Some(reason) = parsed.finish_reason() {
            log::debug!("Finish reason: {}", reason);
        }

        Self::save_first_image(&parsed, request.output_path(), model_id)
    }

    /// Prompt text first, then every reference image inline, in order.
    pub fn build_payload(
        prompt: &str,
        references: &[ReferenceImage],
        aspect_ratio: AspectRatio,
    ) -> GenerateContentRequest {
        let mut parts = Vec::with_capacity(references.len() + 1);
        parts.push(Part::text(prompt));
        parts.extend(
            references
                .iter()
                .map(|reference| Part::inline(reference.mime_type(), BASE64.encode(&reference.bytes))),
        );

        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            generation_config: Some(GenerationConfig {
                response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
                image_config: ImageConfig {
                    aspect_ratio: aspect_ratio.as_str().to_string(),
                },
            }),
        }
    }

    /// Writes only the first image-bearing part. No image is a soft outcome.
    pub fn save_first_image(
        response: &GenerateContentResponse,
        output_path: &Path,
        model_id: &str,
    ) -> Result<GenerationResult> {
        let format = output_format(output_path)?;
        let text = response.text();

        let Some(data) = response.parts().find_map(|part| part.image_data()) else {
            if let Some(text) = &text {
                log::info!("💬 Response: {}", text);
            }
            log::warn!("⚠️  No image was generated");
            return Ok(GenerationResult {
                saved_path: None,
                text,
                model: model_id.to_string(),
            });
        };

        let bytes = BASE64
            .decode(data.trim())
            .map_err(|e| GenError::ResponseError(format!("invalid base64 image data: {}", e)))?;
        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| GenError::ResponseError(format!("undecodable image data: {}", e)))?;

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| GenError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        write_image(decoded, output_path, format)?;

        let saved = absolute(output_path);
        log::info!("💾 Saved: {}", saved.display());

        Ok(GenerationResult {
            saved_path: Some(saved),
            text,
            model: model_id.to_string(),
        })
    }
}

/// Image format implied by the output file extension. Checked before the API
/// call so a bad `-o` never wastes a generation.
pub fn output_format(path: &Path) -> Result<ImageFormat> {
    match ImageFormat::from_path(path) {
        Ok(format) if format.writing_enabled() => Ok(format),
        Ok(format) => Err(GenError::Config(format!(
            "cannot write {:?} images, choose another extension for {}",
            format,
            path.display()
        ))),
        Err(_) => Err(GenError::Config(format!(
            "cannot tell the image format of {}, use an extension such as .png or .jpg",
            path.display()
        ))),
    }
}

fn write_image(image: DynamicImage, path: &Path, format: ImageFormat) -> Result<()> {
    // JPEG has no alpha channel.
    let image = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8()),
        _ => image,
    };

    image
        .save_with_format(path, format)
        .map_err(|e| GenError::ImageEncode {
            path: path.to_path_buf(),
            source: e,
        })
}
