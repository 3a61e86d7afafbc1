//! AI copywriting assistant - marketing copy and product images from one form
//!
//! Builds templated prompts from product details, sends them to the hosted
//! Gemini API for text and image generation, and normalizes the responses
//! into plain text and decoded images ready for download.

pub mod ai;
pub mod app;
pub mod error;
pub mod image;
pub mod models;
pub mod prompts;

pub use error::{Error, Result};
