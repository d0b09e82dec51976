#[cfg(test)]
#[path = "google_test.rs"]
mod tests;

use serde::Deserialize;
use serde::Serialize;

use super::encode;
use super::malformed;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AdapterError;
use crate::domain::models::Message;
use crate::domain::models::Provider;
use crate::domain::models::ProviderName;
use crate::domain::models::ProviderRequest;
use crate::domain::models::Role;

const API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionRequest {
    contents: Vec<Content>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// Gemini calls the assistant side of the conversation `model`.
fn to_google_role(role: Role) -> &'static str {
    match role {
        Role::User => return "user",
        Role::Assistant => return "model",
    }
}

/// The model is part of the endpoint path rather than the request body.
fn endpoint_for_model(model: &str) -> String {
    return format!("{API_URL}/models/{model}:generateContent");
}

pub struct Google {
    endpoint: String,
}

impl Default for Google {
    fn default() -> Google {
        let model = Config::get(ConfigKey::Model);
        let endpoint = if model.is_empty() {
            ProviderName::Google.config().endpoint.to_string()
        } else {
            endpoint_for_model(&model)
        };

        return Google { endpoint };
    }
}

impl Provider for Google {
    fn name(&self) -> ProviderName {
        return ProviderName::Google;
    }

    fn build_request(
        &self,
        api_key: &str,
        history: &[Message],
    ) -> Result<ProviderRequest, AdapterError> {
        let req = CompletionRequest {
            contents: history
                .iter()
                .map(|message| {
                    return Content {
                        role: to_google_role(message.role).to_string(),
                        parts: vec![Part {
                            text: message.content.to_string(),
                        }],
                    };
                })
                .collect(),
        };

        return Ok(ProviderRequest {
            url: self.endpoint.to_string(),
            headers: vec![],
            query: vec![("key", api_key.to_string())],
            body: encode(&req)?,
        });
    }

    fn parse_reply(&self, body: &str) -> Result<String, AdapterError> {
        let res: GenerateContentResponse =
            serde_json::from_str(body).map_err(|err| return malformed(self.name(), err))?;

        return res
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| return candidate.content)
            .and_then(|content| return content.parts.into_iter().next())
            .map(|part| return part.text)
            .ok_or_else(|| return malformed(self.name(), "no text in first candidate"));
    }
}
