#[cfg(test)]
#[path = "anthropic_test.rs"]
mod tests;

use serde::Deserialize;
use serde::Serialize;

use super::encode;
use super::malformed;
use super::model_or_default;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AdapterError;
use crate::domain::models::Message;
use crate::domain::models::Provider;
use crate::domain::models::ProviderName;
use crate::domain::models::ProviderRequest;

const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct MessageRequest {
    role: String,
    content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<MessageRequest>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ContentBlockResponse {
    #[serde(rename = "type")]
    _type: String,
    text: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionResponse {
    content: Vec<ContentBlockResponse>,
}

pub struct Anthropic {
    endpoint: String,
    model: String,
}

impl Default for Anthropic {
    fn default() -> Anthropic {
        return Anthropic {
            endpoint: ProviderName::Anthropic.config().endpoint.to_string(),
            model: model_or_default(ProviderName::Anthropic, Config::get(ConfigKey::Model)),
        };
    }
}

impl Provider for Anthropic {
    fn name(&self) -> ProviderName {
        return ProviderName::Anthropic;
    }

    fn build_request(
        &self,
        api_key: &str,
        history: &[Message],
    ) -> Result<ProviderRequest, AdapterError> {
        let req = CompletionRequest {
            model: self.model.to_string(),
            max_tokens: MAX_TOKENS,
            messages: history
                .iter()
                .map(|message| {
                    return MessageRequest {
                        role: message.role.to_string(),
                        content: message.content.to_string(),
                    };
                })
                .collect(),
        };

        return Ok(ProviderRequest {
            url: self.endpoint.to_string(),
            headers: vec![
                ("x-api-key", api_key.to_string()),
                ("anthropic-version", API_VERSION.to_string()),
            ],
            query: vec![],
            body: encode(&req)?,
        });
    }

    fn parse_reply(&self, body: &str) -> Result<String, AdapterError> {
        let res: CompletionResponse =
            serde_json::from_str(body).map_err(|err| return malformed(self.name(), err))?;

        return res
            .content
            .into_iter()
            .next()
            .and_then(|block| return block.text)
            .ok_or_else(|| return malformed(self.name(), "no text in first content block"));
    }
}
