use super::{ImageGenerationService, TextGenerationService};
use crate::image::GeneratedImage;
use crate::models::ImageRequest;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// In-memory text client. Clones share responses and call counts, so a test
/// can keep one handle after boxing another into the app.
#[derive(Clone)]
pub struct MockTextClient {
    responses: Arc<Mutex<Vec<String>>>,
    failure: Arc<Mutex<Option<String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockTextClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_text_response(self, response: String) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    /// Every call fails with `Error::Generation(message)`.
    pub fn with_failure(self, message: String) -> Self {
        *self.failure.lock().unwrap() = Some(message);
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn received_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockTextClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerationService for MockTextClient {
    async fn generate_text(&self, prompt: &str, _temperature: f32) -> Result<String> {
        let mut prompts = self.prompts.lock().unwrap();
        prompts.push(prompt.to_string());

        if let Some(message) = self.failure.lock().unwrap().as_ref() {
            return Err(Error::Generation(message.clone()));
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(format!("Mock copy for: {}", prompt.lines().next().unwrap_or("")))
        } else {
            let index = (prompts.len() - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}

/// In-memory image client returning a fixed image set per call.
#[derive(Clone)]
pub struct MockImageClient {
    images: Arc<Mutex<Option<Vec<GeneratedImage>>>>,
    failure: Arc<Mutex<Option<String>>>,
    requests: Arc<Mutex<Vec<ImageRequest>>>,
}

impl MockImageClient {
    pub fn new() -> Self {
        Self {
            images: Arc::new(Mutex::new(None)),
            failure: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every call returns exactly these images, regardless of the count asked for.
    pub fn with_images(self, images: Vec<GeneratedImage>) -> Self {
        *self.images.lock().unwrap() = Some(images);
        self
    }

    pub fn with_failure(self, message: String) -> Self {
        *self.failure.lock().unwrap() = Some(message);
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn received_requests(&self) -> Vec<ImageRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockImageClient {
    fn default() -> Self {
        Self::new()
    }
}

/// A 1x1 red PNG, the default image returned by `MockImageClient`.
pub fn tiny_png() -> Result<Vec<u8>> {
    let img = image::RgbaImage::from_pixel(1, 1, image::Rgba([255, 0, 0, 255]));
    let mut bytes = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}

#[async_trait]
impl ImageGenerationService for MockImageClient {
    async fn generate_images(&self, request: &ImageRequest) -> Result<Vec<GeneratedImage>> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(message) = self.failure.lock().unwrap().as_ref() {
            return Err(Error::Generation(message.clone()));
        }

        match self.images.lock().unwrap().as_ref() {
            Some(images) => Ok(images.clone()),
            None => Ok(vec![GeneratedImage {
                mime_type: "image/png".to_string(),
                data: tiny_png()?,
            }]),
        }
    }
}
