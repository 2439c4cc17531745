use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::application::ports::{ClientOptions, LlmClient, LlmClientError};
use crate::domain::CompliancePrompt;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_HEADER: &str = "x-goog-api-key";
const JSON_MIME: &str = "application/json";

/// `generateContent` client for the Google Generative Language API.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<&'a Value>,
}

impl GeminiClient {
    pub fn new(options: &ClientOptions) -> Result<Self, LlmClientError> {
        if options.api_key.trim().is_empty() {
            return Err(LlmClientError::InitializationFailed(
                "api key is empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(options.request_timeout)
            .build()
            .map_err(|e| LlmClientError::InitializationFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: options.base_url.trim_end_matches('/').to_string(),
            api_key: options.api_key.trim().to_string(),
            model: options.model.clone(),
            temperature: options.temperature,
        })
    }

    fn endpoint(&self) -> String {
        let model = self.model.trim_start_matches("models/");
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    fn build_request<'a>(&self, prompt: &'a CompliancePrompt) -> GenerateContentRequest<'a> {
        let schema = prompt.response_schema();
        GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: prompt.text(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                response_mime_type: schema.map(|_| JSON_MIME),
                response_schema: schema,
            },
        }
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    #[tracing::instrument(skip(self, prompt), fields(model = %self.model, structured = prompt.is_structured()))]
    async fn generate_content(&self, prompt: &CompliancePrompt) -> Result<Value, LlmClientError> {
        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&self.build_request(prompt))
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmClientError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))
    }
}
