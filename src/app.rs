//! Request orchestration for one "Generate" action.

use crate::ai::{
    GeminiImageClient, GeminiTextClient, ImageGenerationService, TextGenerationService,
    DEFAULT_TEMPERATURE,
};
use crate::image::GeneratedImage;
use crate::models::{Config, ImageOptions, ImageRequest, MarketingRequest};
use crate::{prompts, Result};
use tracing::{info, warn};

pub const EMPTY_IMAGES_MESSAGE: &str =
    "Could not generate image(s). Please try adjusting your prompt or options.";

/// Owns one text and one image client for the lifetime of the process.
pub struct App {
    text: Box<dyn TextGenerationService>,
    images: Box<dyn ImageGenerationService>,
    temperature: f32,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub text: Box<dyn TextGenerationService>,
    pub images: Box<dyn ImageGenerationService>,
}

/// Per-step results of one generation. A failed text step does not suppress
/// a requested image step.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub text: Result<String>,
    /// `None` when no image step was requested.
    pub images: Option<Result<Vec<GeneratedImage>>>,
}

impl App {
    pub fn with_services(services: AppServices) -> Self {
        Self {
            text: services.text,
            images: services.images,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Build both Gemini clients from configuration.
    pub fn from_config(config: &Config) -> Self {
        // Reuse one HTTP connection pool across both clients.
        let http_client = reqwest::Client::new();

        info!("Text model: {}", config.text_model);
        let text = GeminiTextClient::new_with_client(
            config.api_key.clone(),
            config.text_model.clone(),
            http_client.clone(),
        )
        .with_base_url(config.base_url.clone());

        info!(
            "Image model: {} ({:?}, up to {} per call)",
            config.image.model, config.image.capability, config.image.max_images
        );
        let images = GeminiImageClient::new_with_client(
            config.api_key.clone(),
            config.image.clone(),
            http_client,
        )
        .with_base_url(config.base_url.clone());

        Self::with_services(AppServices {
            text: Box::new(text),
            images: Box::new(images),
        })
    }

    /// Construct an app from environment configuration (`Config::from_env`).
    ///
    /// Fails with `Error::Configuration` when the API key is missing.
    pub fn new() -> Result<Self> {
        let config = Config::from_env()?;
        Ok(Self::from_config(&config))
    }

    /// Validate the request, then generate copy and (optionally) images.
    ///
    /// A validation failure is returned before any client is called.
    pub async fn generate(
        &self,
        request: &MarketingRequest,
        image_options: Option<&ImageOptions>,
    ) -> Result<GenerationOutcome> {
        request.validate()?;

        info!(
            "Generating {} for '{}'",
            request.content_type, request.product_name
        );

        let text_prompt = prompts::build_marketing_prompt(request);
        let text = self
            .text
            .generate_text(&text_prompt, self.temperature)
            .await;
        if let Err(e) = &text {
            warn!("Text generation failed: {}", e);
        }

        let images = match image_options {
            Some(options) => {
                let image_request = ImageRequest::new(
                    prompts::build_image_prompt(request),
                    options.count,
                    options.aspect_ratio,
                );
                let result = self.images.generate_images(&image_request).await;
                match &result {
                    Ok(images) if images.is_empty() => warn!("Image model returned no images"),
                    Ok(images) => info!("Generated {} image(s)", images.len()),
                    Err(e) => warn!("Image generation failed: {}", e),
                }
                Some(result)
            }
            None => None,
        };

        Ok(GenerationOutcome { text, images })
    }
}
