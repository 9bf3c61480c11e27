//! Model value object representing a remote text-generation model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Available generation models (Value Object)
///
/// Identifiers follow the OpenRouter `vendor/model` convention. Anything
/// not in the known list is carried through as [`Model::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    // OpenAI models
    Gpt51,
    Gpt5Mini,
    // Google models
    Gemini3Pro,
    Gemini25Flash,
    // Anthropic models
    ClaudeSonnet45,
    ClaudeOpus45,
    ClaudeHaiku45,
    // xAI models
    Grok4,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gpt51 => "openai/gpt-5.1",
            Model::Gpt5Mini => "openai/gpt-5-mini",
            Model::Gemini3Pro => "google/gemini-3-pro-preview",
            Model::Gemini25Flash => "google/gemini-2.5-flash",
            Model::ClaudeSonnet45 => "anthropic/claude-sonnet-4.5",
            Model::ClaudeOpus45 => "anthropic/claude-opus-4.5",
            Model::ClaudeHaiku45 => "anthropic/claude-haiku-4.5",
            Model::Grok4 => "x-ai/grok-4",
            Model::Custom(s) => s,
        }
    }

    /// Default drafting council
    pub fn default_models() -> Vec<Model> {
        vec![
            Model::Gpt51,
            Model::Gemini3Pro,
            Model::ClaudeSonnet45,
            Model::Grok4,
        ]
    }

    /// Default single-judge model
    pub fn default_judge() -> Model {
        Model::Gpt51
    }

    /// Default polish (refinement) model
    pub fn default_polish() -> Model {
        Model::Gemini3Pro
    }

    /// Vendor prefix of the identifier (`openai`, `google`, ...), if any
    pub fn vendor(&self) -> Option<&str> {
        self.as_str().split_once('/').map(|(vendor, _)| vendor)
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim() {
            "openai/gpt-5.1" => Model::Gpt51,
            "openai/gpt-5-mini" => Model::Gpt5Mini,
            "google/gemini-3-pro-preview" => Model::Gemini3Pro,
            "google/gemini-2.5-flash" => Model::Gemini25Flash,
            "anthropic/claude-sonnet-4.5" => Model::ClaudeSonnet45,
            "anthropic/claude-opus-4.5" => Model::ClaudeOpus45,
            "anthropic/claude-haiku-4.5" => Model::ClaudeHaiku45,
            "x-ai/grok-4" => Model::Grok4,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        // FromStr is infallible: unknown identifiers become Custom
        s.parse().unwrap()
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap())
    }
}
