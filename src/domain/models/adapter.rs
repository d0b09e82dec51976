use async_trait::async_trait;

use super::Message;
use super::ProviderName;

/// The only two ways a turn can fail. Both render as a single line to the
/// user, and neither is retried.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    /// No response was received at all.
    #[error("{0}")]
    Transport(String),
    /// A response arrived but its status or body signals a failure.
    #[error("{0}")]
    Provider(String),
}

#[async_trait]
pub trait Adapter: Send + Sync {
    /// Sends the full history to `provider` and returns the reply text.
    async fn send(
        &self,
        provider: ProviderName,
        api_key: &str,
        history: &[Message],
    ) -> Result<String, AdapterError>;
}
