#[cfg(test)]
#[path = "provider_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use strum::EnumIter;
use strum::EnumVariantNames;

use super::AdapterError;
use super::Message;

#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum ProviderName {
    #[default]
    OpenAI,
    Anthropic,
    Google,
}

impl ProviderName {
    pub fn parse(text: &str) -> Result<ProviderName> {
        match text {
            "openai" => return Ok(ProviderName::OpenAI),
            "anthropic" => return Ok(ProviderName::Anthropic),
            "google" => return Ok(ProviderName::Google),
            _ => bail!(format!("Unknown provider: {text}")),
        }
    }

    pub fn config(&self) -> &'static ProviderConfig {
        match self {
            ProviderName::OpenAI => return &OPENAI,
            ProviderName::Anthropic => return &ANTHROPIC,
            ProviderName::Google => return &GOOGLE,
        }
    }
}

/// Static description of a provider. Never mutated at runtime.
pub struct ProviderConfig {
    pub display_name: &'static str,
    pub key_hint: &'static str,
    pub endpoint: &'static str,
    pub model: &'static str,
}

static OPENAI: ProviderConfig = ProviderConfig {
    display_name: "OpenAI",
    key_hint: "sk-...",
    endpoint: "https://api.openai.com/v1/chat/completions",
    model: "gpt-4o-mini",
};

static ANTHROPIC: ProviderConfig = ProviderConfig {
    display_name: "Anthropic",
    key_hint: "sk-ant-...",
    endpoint: "https://api.anthropic.com/v1/messages",
    model: "claude-3-5-sonnet-20241022",
};

static GOOGLE: ProviderConfig = ProviderConfig {
    display_name: "Google AI",
    key_hint: "AIza...",
    endpoint: "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent",
    model: "gemini-1.5-flash",
};

/// A vendor request ready to be POSTed as JSON.
///
/// Headers and query parameters carry the API key, so this type deliberately
/// has no `Debug` implementation.
pub struct ProviderRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub query: Vec<(&'static str, String)>,
    pub body: serde_json::Value,
}

pub trait Provider: Send + Sync {
    fn name(&self) -> ProviderName;

    /// Maps the shared message history onto the vendor's wire format.
    fn build_request(
        &self,
        api_key: &str,
        history: &[Message],
    ) -> Result<ProviderRequest, AdapterError>;

    /// Extracts the single reply text from a successful response body.
    fn parse_reply(&self, body: &str) -> Result<String, AdapterError>;
}

pub type ProviderBox = Box<dyn Provider>;
