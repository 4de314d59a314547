use async_trait::async_trait;

/// The seam between the chat session and whatever composes replies.
///
/// The session state machine only knows this trait; today the sole
/// implementation is the scripted template picker, but a networked backend
/// would slot in here without touching the rest of the app.
///
/// Replies are infallible strings. The scripted generator cannot fail, and
/// the session has no error state to surface one in, so implementations that
/// can fail are expected to fold the failure into the reply text.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Returns the name of the responder (for logging).
    fn name(&self) -> &str;

    /// Composes the assistant's reply to a single user prompt.
    async fn reply(&self, prompt: &str) -> String;
}
