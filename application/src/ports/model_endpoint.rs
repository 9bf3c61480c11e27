//! Model Endpoint port
//!
//! Defines the interface for invoking a remote text-generation model.

use async_trait::async_trait;
use council_domain::{Message, Model};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors a model endpoint may return
///
/// Ordinary failures are values; the dispatcher maps every one of them to
/// an absent result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EndpointError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Per-call generation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Hard limit on the whole call
    pub timeout: Duration,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(90),
            max_tokens: 900,
            temperature: 0.5,
        }
    }
}

impl GenerationParams {
    pub fn new(timeout: Duration, max_tokens: u32, temperature: f32) -> Self {
        Self {
            timeout,
            max_tokens,
            temperature,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Endpoint for model invocation
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ModelEndpoint: Send + Sync {
    /// Send `messages` to `model` and return the generated text.
    async fn invoke(
        &self,
        model: &Model,
        messages: &[Message],
        params: &GenerationParams,
    ) -> Result<String, EndpointError>;
}
