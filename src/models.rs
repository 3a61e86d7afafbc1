//! Data models and configuration
//!
//! Defines the marketing form inputs, image generation parameters and the
//! environment-driven configuration for the Gemini clients.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MAX_IMAGES_PER_REQUEST: u8 = 4;

/// Lowercases and strips separators so "Ad Headline", "ad-headline" and
/// "AD_HEADLINE" all compare equal.
fn normalize_choice(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    ProductDescription,
    AdHeadline,
    SocialMediaPost,
    EmailSubjectLine,
}

impl ContentType {
    pub const ALL: [ContentType; 4] = [
        ContentType::ProductDescription,
        ContentType::AdHeadline,
        ContentType::SocialMediaPost,
        ContentType::EmailSubjectLine,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ContentType::ProductDescription => "Product Description",
            ContentType::AdHeadline => "Ad Headline",
            ContentType::SocialMediaPost => "Social Media Post",
            ContentType::EmailSubjectLine => "Email Subject Line",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = normalize_choice(s);
        Self::ALL
            .into_iter()
            .find(|ct| normalize_choice(ct.label()) == wanted)
            .ok_or_else(|| {
                format!(
                    "Unknown content type '{}'. Expected one of: Product Description, Ad Headline, Social Media Post, Email Subject Line",
                    s
                )
            })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Professional,
    Friendly,
    Excited,
    Luxurious,
    Playful,
    Direct,
}

impl Tone {
    pub const ALL: [Tone; 6] = [
        Tone::Professional,
        Tone::Friendly,
        Tone::Excited,
        Tone::Luxurious,
        Tone::Playful,
        Tone::Direct,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Friendly => "Friendly",
            Tone::Excited => "Excited",
            Tone::Luxurious => "Luxurious",
            Tone::Playful => "Playful",
            Tone::Direct => "Direct",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = normalize_choice(s);
        Self::ALL
            .into_iter()
            .find(|tone| normalize_choice(tone.label()) == wanted)
            .ok_or_else(|| {
                format!(
                    "Unknown tone '{}'. Expected one of: Professional, Friendly, Excited, Luxurious, Playful, Direct",
                    s
                )
            })
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "3:4")]
    Portrait,
    #[serde(rename = "4:3")]
    Standard,
    #[serde(rename = "9:16")]
    TallPortrait,
    #[serde(rename = "16:9")]
    Widescreen,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Square,
        AspectRatio::Portrait,
        AspectRatio::Standard,
        AspectRatio::TallPortrait,
        AspectRatio::Widescreen,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait => "3:4",
            AspectRatio::Standard => "4:3",
            AspectRatio::TallPortrait => "9:16",
            AspectRatio::Widescreen => "16:9",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|ratio| ratio.as_str() == trimmed)
            .ok_or_else(|| {
                format!(
                    "Unknown aspect ratio '{}'. Expected one of: 1:1, 3:4, 4:3, 9:16, 16:9",
                    s
                )
            })
    }
}

/// Form inputs for one "Generate" action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketingRequest {
    pub content_type: ContentType,
    pub product_name: String,
    pub product_description: String,
    pub target_audience: String,
    pub tone: Tone,
}

pub const VALIDATION_MESSAGE: &str = "Please fill in all product details (Product Name, Description/Features, Target Audience) to generate content.";

impl MarketingRequest {
    /// Rejects the request when any required free-text field is blank.
    ///
    /// Whitespace-only input counts as blank.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("Product Name", &self.product_name),
            ("Description/Features", &self.product_description),
            ("Target Audience", &self.target_audience),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(format!(
                "{} Missing: {}.",
                VALIDATION_MESSAGE,
                missing.join(", ")
            )))
        }
    }
}

/// What the user picked for the optional image step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageOptions {
    pub count: u8,
    pub aspect_ratio: AspectRatio,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            count: 1,
            aspect_ratio: AspectRatio::Square,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageRequest {
    pub prompt: String,
    pub count: u8,
    pub aspect_ratio: AspectRatio,
}

impl ImageRequest {
    /// `count` is clamped into `1..=MAX_IMAGES_PER_REQUEST`.
    pub fn new(prompt: String, count: u8, aspect_ratio: AspectRatio) -> Self {
        Self {
            prompt,
            count: count.clamp(1, MAX_IMAGES_PER_REQUEST),
            aspect_ratio,
        }
    }
}

/// Whether an image model takes count/aspect ratio as request parameters or
/// only as natural-language hints in the prompt.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ImageCapability {
    Structured,
    #[default]
    PromptHints,
}

impl FromStr for ImageCapability {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match normalize_choice(s).as_str() {
            "structured" => Ok(ImageCapability::Structured),
            "prompthints" | "hints" => Ok(ImageCapability::PromptHints),
            _ => Err(format!(
                "Unknown image capability '{}'. Expected 'structured' or 'prompt-hints'",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageModelConfig {
    pub model: String,
    pub capability: ImageCapability,
    /// Upper bound on images per call; 1 for single-image-only variants.
    pub max_images: u8,
}

impl ImageModelConfig {
    pub fn clamp_count(&self, requested: u8) -> u8 {
        requested.clamp(1, self.max_images.clamp(1, MAX_IMAGES_PER_REQUEST))
    }
}

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.0-flash-preview-image-generation";

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub text_model: String,
    pub image: ImageModelConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("GOOGLE_API_KEY").ok_or_else(|| {
            Error::Configuration(
                "GOOGLE_API_KEY not found in environment variables. Please set it in a .env file."
                    .to_string(),
            )
        })?;

        let capability = match get("IMAGE_CAPABILITY") {
            Some(raw) => raw.parse::<ImageCapability>().map_err(Error::Configuration)?,
            None => ImageCapability::default(),
        };

        let max_images = match get("IMAGE_MAX_COUNT") {
            Some(raw) => {
                let parsed: u8 = raw.trim().parse().map_err(|_| {
                    Error::Configuration(format!("IMAGE_MAX_COUNT must be a number, got '{}'", raw))
                })?;
                if !(1..=MAX_IMAGES_PER_REQUEST).contains(&parsed) {
                    return Err(Error::Configuration(format!(
                        "IMAGE_MAX_COUNT must be between 1 and {}, got {}",
                        MAX_IMAGES_PER_REQUEST, parsed
                    )));
                }
                parsed
            }
            None => MAX_IMAGES_PER_REQUEST,
        };

        Ok(Self {
            api_key,
            base_url: get("GEMINI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            text_model: get("TEXT_MODEL").unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
            image: ImageModelConfig {
                model: get("IMAGE_MODEL").unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
                capability,
                max_images,
            },
        })
    }
}
