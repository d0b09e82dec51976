#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

pub mod anthropic;
pub mod google;
pub mod openai;

use std::fmt::Display;

use async_trait::async_trait;

use crate::domain::models::Adapter;
use crate::domain::models::AdapterError;
use crate::domain::models::Message;
use crate::domain::models::Provider;
use crate::domain::models::ProviderBox;
use crate::domain::models::ProviderName;

pub struct ProviderManager {}

impl ProviderManager {
    pub fn get(name: ProviderName) -> ProviderBox {
        match name {
            ProviderName::OpenAI => return Box::<openai::OpenAI>::default(),
            ProviderName::Anthropic => return Box::<anthropic::Anthropic>::default(),
            ProviderName::Google => return Box::<google::Google>::default(),
        }
    }
}

/// Model configured on the command line, or the provider's default.
fn model_or_default(name: ProviderName, model: String) -> String {
    if model.is_empty() {
        return name.config().model.to_string();
    }

    return model;
}

fn malformed(name: ProviderName, detail: impl Display) -> AdapterError {
    return AdapterError::Provider(format!(
        "Malformed response from {}: {detail}",
        name.config().display_name
    ));
}

fn encode<T: serde::Serialize>(req: &T) -> Result<serde_json::Value, AdapterError> {
    return serde_json::to_value(req)
        .map_err(|err| return AdapterError::Provider(format!("Failed to encode request: {err}")));
}

/// All three vendors report failures as `{"error": {"message": "..."}}`. Falls
/// back to the status code when the body has no usable message.
pub fn error_message(status: u16, body: &str) -> String {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            return json
                .get("error")
                .and_then(|err| return err.get("message"))
                .and_then(|msg| return msg.as_str())
                .map(|msg| return msg.to_string());
        })
        .filter(|msg| return !msg.is_empty());

    return message.unwrap_or_else(|| return format!("API error: {status}"));
}

/// One request, one response. No retries and no timeout.
#[allow(clippy::implicit_return)]
pub async fn exchange(
    client: &reqwest::Client,
    provider: &dyn Provider,
    api_key: &str,
    history: &[Message],
) -> Result<String, AdapterError> {
    let name = provider.name();
    let request = provider.build_request(api_key, history)?;

    let mut builder = client.post(&request.url);
    if !request.query.is_empty() {
        builder = builder.query(&request.query);
    }
    for (header, value) in request.headers.iter() {
        builder = builder.header(*header, value);
    }

    tracing::debug!(provider = %name, messages = history.len(), "Sending chat request");

    // reqwest errors embed the URL, and Google's carries the key.
    let res = builder.json(&request.body).send().await.map_err(|err| {
        let err = err.without_url();
        tracing::error!(provider = %name, error = %err, "Provider is not reachable");
        return AdapterError::Transport(format!("Failed to get response: {err}"));
    })?;

    let status = res.status();
    if !status.is_success() {
        // An unreadable error body still reports the status.
        let body = res.text().await.unwrap_or_default();
        tracing::error!(
            provider = %name,
            status = status.as_u16(),
            "Chat request was rejected"
        );
        return Err(AdapterError::Provider(error_message(status.as_u16(), &body)));
    }

    let body = res.text().await.map_err(|err| {
        let err = err.without_url();
        tracing::error!(provider = %name, error = %err, "Failed to read provider response");
        return AdapterError::Transport(format!("Failed to get response: {err}"));
    })?;

    tracing::debug!(provider = %name, status = status.as_u16(), "Chat response");
    return provider.parse_reply(&body);
}

/// The adapter used by chat sessions, backed by a shared reqwest client.
#[derive(Default)]
pub struct HttpAdapter {
    client: reqwest::Client,
}

#[async_trait]
impl Adapter for HttpAdapter {
    #[allow(clippy::implicit_return)]
    async fn send(
        &self,
        provider: ProviderName,
        api_key: &str,
        history: &[Message],
    ) -> Result<String, AdapterError> {
        let backend = ProviderManager::get(provider);
        return exchange(&self.client, backend.as_ref(), api_key, history).await;
    }
}
