#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

use super::Session;
use crate::domain::models::Adapter;

pub fn chat_help_text() -> String {
    let text = r#"
COMMANDS:
- /reset (/r) - Forget the API key and the conversation, then start over.
- /quit /exit (/q) - Exit.
- /help (/h) - Provides this help menu.

Your API key is only kept in memory and is gone once you reset or exit.
        "#;

    return text.trim().to_string();
}

/// Runs one user turn through the session and the adapter. Returns `false`
/// when the session treated the input as a no-op and no request was sent.
#[allow(clippy::implicit_return)]
pub async fn take_turn(session: &mut Session, adapter: &dyn Adapter, input: &str) -> bool {
    let turn = match session.submit(input) {
        Some(turn) => turn,
        None => return false,
    };

    let res = adapter
        .send(turn.provider, &turn.api_key, &turn.history)
        .await;
    session.resolve(res);

    return true;
}
