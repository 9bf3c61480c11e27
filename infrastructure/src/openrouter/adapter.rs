//! OpenRouter endpoint adapter

use super::protocol::{ApiMessage, ChatApiRequest, ChatApiResponse};
use crate::config::FileEndpointConfig;
use async_trait::async_trait;
use council_application::{EndpointError, GenerationParams, ModelEndpoint};
use council_domain::{Message, Model};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::debug;

/// Maximum accepted response body (1 MiB).
const MAX_RESPONSE_LEN: usize = 1_024 * 1_024;

/// Model endpoint backed by an OpenAI-compatible chat-completions API
#[derive(Debug, Clone)]
pub struct OpenRouterEndpoint {
    client: reqwest::Client,
    base_url: String,
}

impl OpenRouterEndpoint {
    /// Create with custom configuration.
    pub fn with_config(
        api_key: &str,
        base_url: impl Into<String>,
        referer: Option<&str>,
        app_title: Option<&str>,
    ) -> Result<Self, EndpointError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let auth_value = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| EndpointError::Configuration("Invalid API key format".to_string()))?;
        headers.insert(AUTHORIZATION, auth_value);

        if let Some(v) = referer.and_then(|r| HeaderValue::from_str(r).ok()) {
            headers.insert("HTTP-Referer", v);
        }
        if let Some(v) = app_title.and_then(|t| HeaderValue::from_str(t).ok()) {
            headers.insert("X-Title", v);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| {
                EndpointError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create from the `[endpoint]` section, reading the key from its env var.
    pub fn from_config(config: &FileEndpointConfig) -> Result<Self, EndpointError> {
        let api_key = config.api_key().ok_or_else(|| {
            EndpointError::Configuration(format!("{} not set", config.api_key_env))
        })?;
        Self::with_config(
            &api_key,
            config.base_url.clone(),
            config.referer.as_deref(),
            config.app_title.as_deref(),
        )
    }

    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

fn transport_error(e: reqwest::Error) -> EndpointError {
    if e.is_timeout() {
        EndpointError::Timeout
    } else {
        EndpointError::ConnectionError(e.to_string())
    }
}

#[async_trait]
impl ModelEndpoint for OpenRouterEndpoint {
    async fn invoke(
        &self,
        model: &Model,
        messages: &[Message],
        params: &GenerationParams,
    ) -> Result<String, EndpointError> {
        let api_req = ChatApiRequest {
            model: model.as_str(),
            messages: messages.iter().map(ApiMessage::from).collect(),
            max_tokens: params.max_tokens,
            temperature: params.temperature,
        };

        let mut response = self
            .client
            .post(self.chat_url())
            .timeout(params.timeout)
            .json(&api_req)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        // Stream response to enforce size limit
        let mut bytes = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(transport_error)? {
            let new_len = bytes.len() + chunk.len();
            if new_len > MAX_RESPONSE_LEN {
                return Err(EndpointError::InvalidResponse(format!(
                    "Response too large: {new_len} bytes"
                )));
            }
            bytes.extend_from_slice(&chunk);
        }
        let body = String::from_utf8_lossy(&bytes);
        debug!("{} answered HTTP {} ({} bytes)", model, status.as_u16(), bytes.len());

        if !status.is_success() {
            let message = serde_json::from_str::<ChatApiResponse>(&body)
                .ok()
                .and_then(|parsed| parsed.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
            return Err(EndpointError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatApiResponse = serde_json::from_str(&body)
            .map_err(|e| EndpointError::InvalidResponse(format!("Invalid JSON: {e}")))?;

        if let Some(error) = parsed.error {
            return Err(EndpointError::ApiError(error.message.unwrap_or_default()));
        }

        parsed
            .into_content()
            .ok_or_else(|| EndpointError::InvalidResponse("No choices in response".to_string()))
    }
}
