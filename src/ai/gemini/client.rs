use crate::models::DEFAULT_BASE_URL;
use crate::{Error, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Lightweight Gemini REST client shared by the text and image clients.
///
/// Holds no per-request state; clone the inner `reqwest::Client` to share
/// one connection pool between clients.
pub struct GeminiHttpClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiHttpClient {
    /// `model` is the bare model ID (for example `gemini-2.0-flash`); a
    /// leading `models/` path segment is stripped.
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: Client) -> Self {
        let model = model.strip_prefix("models/").unwrap_or(&model).to_string();

        Self {
            client,
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Returns the configured model ID without the `models/` prefix.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/v1beta/models/{}:{}", self.base_url, self.model, method)
    }

    async fn post_to_url<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        url: String,
        request: &Req,
    ) -> Result<Resp> {
        tracing::debug!("Sending request to Gemini: {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to Gemini: {}", e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::error!("Gemini API error (status {}): {}", status, error_text);
            return Err(Error::Generation(format!(
                "Gemini API error (status {}): {}",
                status, error_text
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}\nBody: {}", e, body);
            Error::Generation(format!("Failed to parse Gemini response: {}", e))
        })
    }

    /// Calls `generateContent`, used for text and hint-driven image output.
    pub async fn generate_content<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        request: &Req,
    ) -> Result<Resp> {
        self.post_to_url(self.method_url("generateContent"), request)
            .await
    }

    /// Calls `predict`, used by Imagen models with structured parameters.
    pub async fn predict<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        request: &Req,
    ) -> Result<Resp> {
        self.post_to_url(self.method_url("predict"), request).await
    }
}
