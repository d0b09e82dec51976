#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use std::fmt;

use crate::domain::models::AdapterError;
use crate::domain::models::Message;
use crate::domain::models::ProviderName;

/// One adapter call the caller must perform, then hand back through
/// `Session::resolve`.
pub struct PendingTurn {
    pub provider: ProviderName,
    pub api_key: String,
    pub history: Vec<Message>,
}

/// All state of one chat session. Nothing here outlives the process, and the
/// API key is never written anywhere.
#[derive(Default)]
pub struct Session {
    api_key: String,
    pub provider: ProviderName,
    pub configured: bool,
    pub messages: Vec<Message>,
    pub input: String,
    pub loading: bool,
    pub last_error: Option<String>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.has_api_key() {
            "<redacted>"
        } else {
            ""
        };

        return f
            .debug_struct("Session")
            .field("api_key", &api_key)
            .field("provider", &self.provider)
            .field("configured", &self.configured)
            .field("messages", &self.messages.len())
            .field("loading", &self.loading)
            .field("last_error", &self.last_error)
            .finish();
    }
}

impl Session {
    pub fn new() -> Session {
        return Session::default();
    }

    pub fn has_api_key(&self) -> bool {
        return !self.api_key.is_empty();
    }

    /// Moves to the configured state. Blank keys are ignored and the session
    /// stays unconfigured. A configured session keeps its provider and key
    /// until it is reset.
    pub fn configure(&mut self, provider: ProviderName, api_key: &str) -> bool {
        if self.configured || api_key.trim().is_empty() {
            return false;
        }

        self.provider = provider;
        self.api_key = api_key.to_string();
        self.configured = true;
        self.last_error = None;

        tracing::debug!(provider = %provider, "Session configured");
        return true;
    }

    /// Back to unconfigured, dropping the key and the whole conversation.
    pub fn reset(&mut self) {
        self.configured = false;
        self.api_key.clear();
        self.messages.clear();
        self.input.clear();
        self.loading = false;
        self.last_error = None;

        tracing::debug!("Session reset");
    }

    /// Accepts a user turn. Returns the adapter call to make, or `None` when
    /// the submission is a no-op (unconfigured, blank input, or a call is
    /// already in flight).
    pub fn submit(&mut self, input: &str) -> Option<PendingTurn> {
        let text = input.trim();
        if !self.configured || self.loading || text.is_empty() {
            return None;
        }

        self.messages.push(Message::user(text));
        self.input.clear();
        self.loading = true;
        self.last_error = None;

        return Some(PendingTurn {
            provider: self.provider,
            api_key: self.api_key.clone(),
            history: self.messages.clone(),
        });
    }

    /// Completes the in-flight turn. Failures are recorded for display and do
    /// not add an assistant message.
    pub fn resolve(&mut self, result: Result<String, AdapterError>) {
        if !self.loading {
            tracing::warn!("Ignoring adapter result with no turn in flight");
            return;
        }

        match result {
            Ok(reply) => {
                self.messages.push(Message::assistant(&reply));
            }
            Err(err) => {
                tracing::error!(error = %err, "Adapter call failed");
                self.last_error = Some(err.to_string());
            }
        }

        self.loading = false;
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }
}
