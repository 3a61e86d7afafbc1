//! Generated images and their PNG download form
//!
//! Images come back from the API as decoded bytes in whatever raster format
//! the model chose; downloads are always re-encoded as PNG.

pub mod export;

pub use export::PngExporter;

use crate::models::ContentType;
use crate::Result;
use image::{DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// One decoded inline payload from the image model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl GeneratedImage {
    pub fn decode(&self) -> Result<DynamicImage> {
        Ok(image::load_from_memory(&self.data)?)
    }

    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.decode()?
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}

fn file_name_segment(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// `{product}_{content_type}_image_{n}.png` with a 1-based `n`.
pub fn download_file_name(product_name: &str, content_type: ContentType, index: usize) -> String {
    format!(
        "{}_{}_image_{}.png",
        file_name_segment(product_name),
        file_name_segment(content_type.label()),
        index + 1
    )
}
