//! Wire types for `POST /chat/completions`

use council_domain::Message;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub(super) struct ChatApiRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ApiMessage<'a>>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Serialize)]
pub(super) struct ApiMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> From<&'a Message> for ApiMessage<'a> {
    fn from(m: &'a Message) -> Self {
        Self {
            role: m.role.as_str(),
            content: &m.content,
        }
    }
}

#[derive(Deserialize)]
pub(super) struct ChatApiResponse {
    pub choices: Option<Vec<Choice>>,
    pub error: Option<ApiError>,
}

#[derive(Deserialize)]
pub(super) struct Choice {
    pub message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
pub(super) struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Deserialize)]
pub(super) struct ApiError {
    pub message: Option<String>,
}

impl ChatApiResponse {
    /// Text of the first choice; `None` when there are no choices
    pub fn into_content(self) -> Option<String> {
        let choice = self.choices?.into_iter().next()?;
        Some(choice.message.and_then(|m| m.content).unwrap_or_default())
    }
}
