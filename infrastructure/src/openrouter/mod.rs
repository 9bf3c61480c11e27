//! OpenRouter chat-completions adapter
//!
//! Implements [`ModelEndpoint`](council_application::ModelEndpoint) over any
//! OpenAI-compatible `/chat/completions` endpoint.

pub mod adapter;
mod protocol;

pub use adapter::OpenRouterEndpoint;
