//! Generative AI integration for marketing copy and product images
//!
//! The traits are the boundary callers depend on: every transport, status or
//! payload failure from the hosted API comes back as `Error::Generation`.

pub mod gemini;
pub mod mime;
pub mod mock;

pub use gemini::{GeminiHttpClient, GeminiImageClient, GeminiTextClient};
pub use mock::{MockImageClient, MockTextClient};

use crate::image::GeneratedImage;
use crate::models::ImageRequest;
use crate::Result;
use async_trait::async_trait;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;

#[async_trait]
pub trait TextGenerationService: Send + Sync {
    /// Returns the model's text output verbatim. One outbound call.
    async fn generate_text(&self, prompt: &str, temperature: f32) -> Result<String>;
}

#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    /// Returns the images in the order the model produced them.
    ///
    /// `request.count` is a hint: the result may be shorter, and an empty
    /// result is a success. One outbound call.
    async fn generate_images(&self, request: &ImageRequest) -> Result<Vec<GeneratedImage>>;
}
