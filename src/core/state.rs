//! # Application State
//!
//! Core business state for Alma. This module contains domain logic only -
//! no TUI-specific types. Presentation state (scroll position, input buffer,
//! animation timers) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── responder: Arc<dyn Responder>   // reply source (scripted for now)
//! ├── transcript: Transcript          // append-only conversation history
//! ├── persona: String                 // assistant display name
//! ├── status_message: String          // status bar text
//! ├── is_typing: bool                 // exactly one reply pending iff true
//! └── delay: DelayBounds              // typing pause range
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;

use crate::chat::{DelayBounds, Responder, Transcript};
use crate::core::config::{ResolvedConfig, DEFAULT_STATUS_HINT};

pub struct App {
    pub responder: Arc<dyn Responder>,
    pub transcript: Transcript,
    pub persona: String,
    pub status_message: String,
    /// True while exactly one deferred reply is pending delivery. Set on
    /// submit, cleared when the reply lands. Nothing else touches it.
    pub is_typing: bool,
    pub delay: DelayBounds,
}

impl App {
    pub fn new(responder: Arc<dyn Responder>, persona: String, greeting: &str) -> Self {
        Self {
            responder,
            transcript: Transcript::with_greeting(greeting),
            persona,
            status_message: String::from(DEFAULT_STATUS_HINT),
            is_typing: false,
            delay: DelayBounds::default(),
        }
    }

    pub fn from_config(responder: Arc<dyn Responder>, config: &ResolvedConfig) -> Self {
        Self {
            responder,
            transcript: Transcript::with_greeting(&config.greeting),
            persona: config.persona.clone(),
            status_message: config.status_hint.clone(),
            is_typing: false,
            delay: config.delay,
        }
    }
}
