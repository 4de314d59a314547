//! # ChatHeader Component
//!
//! Top status bar showing the assistant persona and session state.
//!
//! ## Responsibilities
//!
//! - Display the persona name and the "simulated" disclaimer
//! - Display status messages (e.g., "Alma is typing...", the key hint)
//! - Show "↓ New" indicator when there's unseen content below scroll
//!
//! ## Design Decisions
//!
//! ### Stateless Component
//!
//! ChatHeader is purely presentational—it receives all data as props and has
//! no internal state, which makes it trivial to test and reason about.
//!
//! ### State Ownership
//!
//! The props come from different sources:
//! - `persona`: Core App state (configuration)
//! - `status_message`: computed by the draw pass (typing state wins over the hint)
//! - `has_unseen_content`: TUI state (scroll position indicator)
//!
//! The header doesn't care where they come from—it just renders what it's
//! given.
//!
//! ## Conditional Formatting
//!
//! The title text changes based on state:
//!
//! 1. **Unseen content**: `"Alma Chat (simulated) | Alma is typing... | ↓ New"`
//! 2. **Status message**: `"Alma Chat (simulated) | Enter sends, Esc quits"`
//! 3. **Default**: `"Alma Chat (simulated)"`
//!
//! This priority order keeps the most important information visible, even on
//! narrow terminals.

use crate::tui::component::Component;
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::Frame;

/// Top status bar component showing persona, status, and notifications.
pub struct ChatHeader {
    /// Assistant display name (e.g., "Alma")
    pub persona: String,
    /// Transient status (e.g., "Alma is typing...", "Enter sends, Esc quits")
    pub status_message: String,
    /// Whether there's content below the current scroll position
    pub has_unseen_content: bool,
}

impl ChatHeader {
    pub fn new(persona: String, status_message: String, has_unseen_content: bool) -> Self {
        Self {
            persona,
            status_message,
            has_unseen_content,
        }
    }
}

impl Component for ChatHeader {
    /// Render the header as a single line with conditional formatting.
    ///
    /// A plain `Span` rather than a `Block`: the header is always one line,
    /// needs no borders, and the text content stays easy to assert on.
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title_text = if self.has_unseen_content {
            format!(
                "{} Chat (simulated) | {} | ↓ New",
                self.persona, self.status_message
            )
        } else if self.status_message.is_empty() {
            format!("{} Chat (simulated)", self.persona)
        } else {
            format!("{} Chat (simulated) | {}", self.persona, self.status_message)
        };

        frame.render_widget(Span::raw(title_text), area);
    }
}
