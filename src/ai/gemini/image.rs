use super::client::GeminiHttpClient;
use super::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
    PredictInstance, PredictParameters, PredictRequest, PredictResponse,
};
use crate::ai::mime::resolve_image_mime;
use crate::ai::ImageGenerationService;
use crate::image::GeneratedImage;
use crate::models::{ImageCapability, ImageModelConfig, ImageRequest};
use crate::{prompts, Error, Result};
use async_trait::async_trait;

/// Image client for both Gemini model families.
///
/// `ImageCapability::Structured` models (Imagen) get count and aspect ratio
/// as `predict` parameters. `ImageCapability::PromptHints` models (multimodal
/// Gemini) get them as sentences appended to the prompt.
pub struct GeminiImageClient {
    http: GeminiHttpClient,
    capability: ImageCapability,
    max_images: u8,
}

impl GeminiImageClient {
    pub fn new(api_key: String, config: ImageModelConfig) -> Self {
        Self::new_with_client(api_key, config, reqwest::Client::new())
    }

    pub fn new_with_client(
        api_key: String,
        config: ImageModelConfig,
        client: reqwest::Client,
    ) -> Self {
        let max_images = config.clamp_count(config.max_images);
        Self {
            http: GeminiHttpClient::new_with_client(api_key, config.model, client),
            capability: config.capability,
            max_images,
        }
    }

    pub fn capability(&self) -> ImageCapability {
        self.capability
    }

    async fn generate_structured(
        &self,
        request: &ImageRequest,
        sample_count: u8,
    ) -> Result<Vec<GeneratedImage>> {
        let payload = PredictRequest {
            instances: vec![PredictInstance {
                prompt: request.prompt.clone(),
            }],
            parameters: PredictParameters {
                sample_count,
                aspect_ratio: request.aspect_ratio.to_string(),
            },
        };

        let response: PredictResponse = self.http.predict(&payload).await?;

        let mut images = Vec::with_capacity(response.predictions.len());
        for prediction in &response.predictions {
            match &prediction.bytes_base64_encoded {
                Some(encoded) => {
                    images.push(decode_image(encoded, prediction.mime_type.as_deref())?)
                }
                None => tracing::info!(
                    "Imagen returned a sample without image bytes (reason: {})",
                    prediction.rai_filtered_reason.as_deref().unwrap_or("unknown")
                ),
            }
        }
        Ok(images)
    }

    async fn generate_with_hints(
        &self,
        request: &ImageRequest,
        count: u8,
    ) -> Result<Vec<GeneratedImage>> {
        let prompt = prompts::with_image_hints(&request.prompt, count, request.aspect_ratio);

        let payload = GenerateContentRequest {
            contents: vec![Content::user_text(prompt)],
            generation_config: GenerationConfig {
                response_modalities: Some(vec!["TEXT".to_string(), "IMAGE".to_string()]),
                ..Default::default()
            },
        };

        let response: GenerateContentResponse = self.http.generate_content(&payload).await?;

        if let Some(reason) = response.block_reason() {
            tracing::info!("Image prompt was blocked by Gemini: {}", reason);
            return Ok(Vec::new());
        }

        let mut images = Vec::new();
        for part in response.first_parts() {
            match part {
                Part::InlineData { inline_data } => images.push(decode_image(
                    &inline_data.data,
                    inline_data.mime_type.as_deref(),
                )?),
                Part::Text { text } => tracing::info!("Model also provided text: {}", text),
                Part::Other(_) => tracing::debug!("Skipping non-image part in Gemini response"),
            }
        }
        Ok(images)
    }
}

super::impl_with_gemini_base_url!(GeminiImageClient);

fn decode_image(encoded: &str, declared_mime: Option<&str>) -> Result<GeneratedImage> {
    use base64::Engine as _;
    let data = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| Error::Generation(format!("Failed to decode Gemini base64 image: {}", e)))?;

    if let Err(e) = ::image::load_from_memory(&data) {
        return Err(Error::Generation(format!(
            "Gemini returned an image payload that is not a readable image: {}",
            e
        )));
    }

    let mime_type = resolve_image_mime(declared_mime, &data);
    tracing::debug!(
        "Gemini returned image with mime_type: {} ({} bytes)",
        mime_type,
        data.len()
    );

    Ok(GeneratedImage { mime_type, data })
}

#[async_trait]
impl ImageGenerationService for GeminiImageClient {
    async fn generate_images(&self, request: &ImageRequest) -> Result<Vec<GeneratedImage>> {
        let count = request.count.clamp(1, self.max_images);
        tracing::debug!(
            "Generating up to {} image(s) at {} with {} ({:?})",
            count,
            request.aspect_ratio,
            self.http.model(),
            self.capability
        );

        let images = match self.capability {
            ImageCapability::Structured => self.generate_structured(request, count).await?,
            ImageCapability::PromptHints => self.generate_with_hints(request, count).await?,
        };

        if images.len() < count as usize {
            tracing::info!("Requested {} image(s), model produced {}", count, images.len());
        }
        Ok(images)
    }
}
