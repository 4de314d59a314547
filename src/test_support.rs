//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::chat::Responder;

/// A deterministic responder for tests that don't care about templates.
pub struct EchoResponder;

#[async_trait]
impl Responder for EchoResponder {
    fn name(&self) -> &str {
        "echo"
    }

    async fn reply(&self, prompt: &str) -> String {
        format!("You said: {prompt}")
    }
}

/// Creates a test App with an EchoResponder and a fixed greeting.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(EchoResponder), "Alma".to_string(), "Hi! I'm Alma.")
}
