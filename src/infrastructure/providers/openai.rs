#[cfg(test)]
#[path = "openai_test.rs"]
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

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct MessageRequest {
    role: String,
    content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<MessageRequest>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionMessageResponse {
    content: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionChoiceResponse {
    message: CompletionMessageResponse,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoiceResponse>,
}

pub struct OpenAI {
    endpoint: String,
    model: String,
}

impl Default for OpenAI {
    fn default() -> OpenAI {
        return OpenAI {
            endpoint: ProviderName::OpenAI.config().endpoint.to_string(),
            model: model_or_default(ProviderName::OpenAI, Config::get(ConfigKey::Model)),
        };
    }
}

impl Provider for OpenAI {
    fn name(&self) -> ProviderName {
        return ProviderName::OpenAI;
    }

    fn build_request(
        &self,
        api_key: &str,
        history: &[Message],
    ) -> Result<ProviderRequest, AdapterError> {
        let req = CompletionRequest {
            model: self.model.to_string(),
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
            headers: vec![("Authorization", format!("Bearer {api_key}"))],
            query: vec![],
            body: encode(&req)?,
        });
    }

    fn parse_reply(&self, body: &str) -> Result<String, AdapterError> {
        let res: CompletionResponse =
            serde_json::from_str(body).map_err(|err| return malformed(self.name(), err))?;

        return res
            .choices
            .into_iter()
            .next()
            .and_then(|choice| return choice.message.content)
            .ok_or_else(|| return malformed(self.name(), "no message content in choices"));
    }
}
