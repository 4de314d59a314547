//! # Actions
//!
//! Everything that can happen in Alma becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! The typing-delay timer fires? That's `Action::ReplyReady`.
//!
//! The `update()` function takes the current state and an action,
//! then returns the follow-up effect. No side effects here. I/O happens
//! elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable: `assert_eq!(update(state, action), effect)`.
//! And debuggable: log every action, replay the exact session.

use log::{debug, warn};

use crate::core::state::App;

/// Everything that can happen in the app.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// User submitted the input buffer.
    Submit(String),
    /// The deferred reply task finished composing the assistant's reply.
    ReplyReady(String),
    /// User requested exit.
    Quit,
}

/// Side effects the TUI layer performs after an update. The reducer never
/// does I/O itself; it hands these back instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Schedule the one deferred reply for the submitted prompt.
    ScheduleReply(String),
    Quit,
}

/// The reducer: applies an action to the state and returns the effect the
/// caller must run.
pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => {
            if app.is_typing {
                // At most one reply may be pending. The input box is inert
                // while typing, so this only catches stray events.
                debug!("Ignoring submit while a reply is pending");
                return Effect::None;
            }
            app.transcript.push_user(text.clone());
            app.is_typing = true;
            Effect::ScheduleReply(text)
        }
        Action::ReplyReady(text) => {
            if !app.is_typing {
                // A reply with no pending submission means the schedule and
                // the state machine disagree. Drop it rather than corrupt
                // the transcript.
                warn!("Dropping reply with no pending submission");
                return Effect::None;
            }
            app.transcript.push_assistant(text);
            app.is_typing = false;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
