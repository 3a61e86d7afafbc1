use super::client::GeminiHttpClient;
use super::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};
use crate::ai::TextGenerationService;
use crate::{Error, Result};
use async_trait::async_trait;

pub struct GeminiTextClient {
    http: GeminiHttpClient,
}

impl GeminiTextClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, model, client),
        }
    }

    /// Concatenates every text part of the first candidate.
    fn extract_text(response: &GenerateContentResponse) -> Option<String> {
        let texts: Vec<&str> = response
            .first_parts()
            .iter()
            .filter_map(|p| match p {
                Part::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();

        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }
}

super::impl_with_gemini_base_url!(GeminiTextClient);

#[async_trait]
impl TextGenerationService for GeminiTextClient {
    async fn generate_text(&self, prompt: &str, temperature: f32) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content::user_text(prompt.to_string())],
            generation_config: GenerationConfig {
                temperature: Some(temperature),
                ..Default::default()
            },
        };

        tracing::debug!(
            "Generating text with {} (temperature {})",
            self.http.model(),
            temperature
        );

        let response: GenerateContentResponse = self.http.generate_content(&request).await?;

        if let Some(reason) = response.block_reason() {
            return Err(Error::Generation(format!(
                "Prompt was blocked by Gemini: {}",
                reason
            )));
        }

        Self::extract_text(&response).ok_or_else(|| {
            let finish_reason = response
                .candidates
                .first()
                .and_then(|c| c.finish_reason.as_deref())
                .unwrap_or("none");
            Error::Generation(format!(
                "No text in Gemini response (finish reason: {})",
                finish_reason
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::gemini::test_support;
    use wiremock::matchers::body_string_contains;
    use wiremock::{MockServer, ResponseTemplate};

    const DEFAULT_MODEL: &str = "gemini-2.0-flash";

    fn make_client(server: &MockServer) -> GeminiTextClient {
        GeminiTextClient::new("test-key".to_string(), DEFAULT_MODEL.to_string())
            .with_base_url(server.uri())
    }

    #[tokio::test]
    async fn test_generate_text_returns_text_verbatim() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [{ "text": "  Glow brighter, ✨ instantly!\n" }]
                    },
                    "finishReason": "STOP"
                }]
            })))
            .mount(&server)
            .await;

        let text = make_client(&server)
            .generate_text("prompt", 0.7)
            .await
            .unwrap();
        assert_eq!(text, "  Glow brighter, ✨ instantly!\n");
    }

    #[tokio::test]
    async fn test_generate_text_joins_text_parts() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "Glow " }, { "text": "Up" }] }
                }]
            })))
            .mount(&server)
            .await;

        let text = make_client(&server)
            .generate_text("prompt", 0.7)
            .await
            .unwrap();
        assert_eq!(text, "Glow Up");
    }

    #[tokio::test]
    async fn test_request_carries_prompt_and_temperature() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .and(body_string_contains("\"temperature\":0.25"))
            .and(body_string_contains("Write a headline"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{ "content": { "parts": [{ "text": "ok" }] } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        make_client(&server)
            .generate_text("Write a headline", 0.25)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_api_error_message_includes_service_text() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let err = make_client(&server)
            .generate_text("prompt", 0.7)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Generation(ref m) if m.contains("API key not valid")));
    }

    #[tokio::test]
    async fn test_blocked_prompt_reports_reason() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "promptFeedback": { "blockReason": "SAFETY" }
            })))
            .mount(&server)
            .await;

        let err = make_client(&server)
            .generate_text("prompt", 0.7)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Generation(ref m) if m.contains("SAFETY")));
    }

    #[tokio::test]
    async fn test_empty_candidates_is_generation_error() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": []
            })))
            .mount(&server)
            .await;

        let err = make_client(&server)
            .generate_text("prompt", 0.7)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
    }
}
