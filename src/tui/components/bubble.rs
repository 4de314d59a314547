use chrono::{DateTime, Local, Utc};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Padding, Paragraph, Widget, Wrap};
use ratatui::Frame;

use crate::chat::{Message, Role};
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders a single chat message with role-based styling.
///
/// # Design
///
/// `ChatBubble` is a **transient component**: it's created fresh each frame
/// with the data it needs to render. Messages are immutable once appended, so
/// the bubble carries no animation or interaction state; the pulsing effect
/// lives on the typing indicator instead.
///
/// # Styling
///
/// - **User** (green): messages from the human, labeled "you"
/// - **Assistant** (blue): simulated replies, labeled with the persona name
///
/// The send time is shown `HH:MM` in the top right corner of the border.
///
/// # Height Calculation
///
/// The [`calculate_height`](Self::calculate_height) method predicts rendered
/// height using `textwrap` with options that match Ratatui's `Paragraph`
/// wrapping behavior. This lets the parent `MessageList` compute scroll
/// positions without actually rendering each message.
#[derive(Clone, Copy)]
pub struct ChatBubble<'a> {
    /// The message to render
    pub message: &'a Message,
    /// Assistant display name for the bubble title
    pub persona: &'a str,
}

impl<'a> ChatBubble<'a> {
    /// Creates a new ChatBubble for rendering.
    ///
    /// This is typically called within `MessageList::render()` for each
    /// visible message.
    pub fn new(message: &'a Message, persona: &'a str) -> Self {
        Self { message, persona }
    }

    /// Calculate the height required for this message given a width.
    ///
    /// The wrapping options must match the `Ratatui` default for `Paragraph`
    /// to ensure 1:1 mapping between calculated and actual height.
    pub fn calculate_height(message: &Message, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Degenerate case: terminal too narrow for borders + padding.
            // Return 1 row so the message still occupies space in the layout.
            return 1;
        }

        let content = message.content.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        // Ensure at least 1 content line even if textwrap returns empty
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }

    fn role_label(&self) -> &'a str {
        match self.message.role {
            Role::User => "you",
            Role::Assistant => self.persona,
        }
    }

    fn role_style(role: Role) -> Style {
        Style::default().fg(role_color(role))
    }
}

/// Role colors, shared with the typing indicator so the pending-reply bubble
/// matches the assistant's finished bubbles.
pub(super) fn role_color(role: Role) -> Color {
    match role {
        Role::User => Color::Green,
        Role::Assistant => Color::Blue,
    }
}

/// Local wall-clock `HH:MM` for the bubble corner.
fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M").to_string()
}

// Implement Widget for easy usage in ScrollView
impl Widget for ChatBubble<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = Self::role_style(self.message.role);
        let border_style = style.add_modifier(Modifier::DIM);

        let content = self.message.content.trim();

        // Render the block into `area`, then the paragraph into the inner rect.
        let block = Block::bordered()
            .title(self.role_label())
            .title_top(Line::from(format_timestamp(&self.message.timestamp)).right_aligned())
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        let paragraph = Paragraph::new(content)
            .style(style)
            .wrap(Wrap { trim: true });

        paragraph.render(inner_area, buf);
    }
}

/// Component trait implementation.
///
/// Note: `ChatBubble` is stateless, so the `&mut self` required by the trait
/// is a no-op. Rendering is delegated to the [`Widget`] implementation.
impl Component for ChatBubble<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_message(role: Role, content: &str) -> Message {
        Message::new(role, content)
    }

    // ==========================================================================
    // calculate_height tests
    // ==========================================================================

    #[test]
    fn calculate_height_empty_content_returns_border_height() {
        let message = make_message(Role::User, "");
        // Empty content → just VERTICAL_OVERHEAD (top + bottom borders)
        assert_eq!(ChatBubble::calculate_height(&message, 80), VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_whitespace_only_treated_as_empty() {
        let message = make_message(Role::User, "   \n\t  ");
        assert_eq!(ChatBubble::calculate_height(&message, 80), VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_zero_width_returns_minimum() {
        let message = make_message(Role::User, "Hello world");
        // Width 0: no room for borders + padding → degenerate fallback of 1 row
        assert_eq!(ChatBubble::calculate_height(&message, 0), 1);
    }

    #[test]
    fn calculate_height_width_equals_overhead_returns_minimum() {
        let message = make_message(Role::User, "Hello world");
        // Width == HORIZONTAL_OVERHEAD: content_width = 0 → degenerate fallback
        assert_eq!(
            ChatBubble::calculate_height(&message, HORIZONTAL_OVERHEAD),
            1
        );
    }

    #[test]
    fn calculate_height_single_line_fits() {
        let message = make_message(Role::User, "Hello");
        assert_eq!(
            ChatBubble::calculate_height(&message, 80),
            1 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn calculate_height_wraps_at_width_boundary() {
        let message = make_message(Role::User, "Hello world");
        // "Hello world" = 11 chars, width 9 → content_width = 5
        // Wraps to: "Hello" | "world" = 2 lines
        assert_eq!(
            ChatBubble::calculate_height(&message, 9),
            2 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn calculate_height_breaks_long_words() {
        let message = make_message(Role::User, "abcdefghij");
        // "abcdefghij" = 10 chars, width 8 → content_width = 4
        // Breaks to: "abcd" | "efgh" | "ij" = 3 lines
        assert_eq!(
            ChatBubble::calculate_height(&message, 8),
            3 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn calculate_height_matches_paragraph_line_count() {
        // The textwrap prediction must agree with what Paragraph actually
        // renders, line for line.
        for (content, width) in [
            ("Hello", 80u16),
            ("Hello world", 9),
            ("abcdefghij", 8),
            ("the quick brown fox jumps over the lazy dog", 20),
        ] {
            let message = make_message(Role::User, content);
            let content_width = width - HORIZONTAL_OVERHEAD;
            let rendered_lines = Paragraph::new(content)
                .wrap(Wrap { trim: true })
                .line_count(content_width);
            assert_eq!(
                ChatBubble::calculate_height(&message, width),
                rendered_lines as u16 + VERTICAL_OVERHEAD,
                "mismatch for {content:?} at width {width}"
            );
        }
    }

    // ==========================================================================
    // Style and label tests
    // ==========================================================================

    #[test]
    fn style_user_is_green() {
        assert_eq!(ChatBubble::role_style(Role::User).fg, Some(Color::Green));
    }

    #[test]
    fn style_assistant_is_blue() {
        assert_eq!(
            ChatBubble::role_style(Role::Assistant).fg,
            Some(Color::Blue)
        );
    }

    #[test]
    fn label_user_is_you() {
        let message = make_message(Role::User, "hi");
        let bubble = ChatBubble::new(&message, "Alma");
        assert_eq!(bubble.role_label(), "you");
    }

    #[test]
    fn label_assistant_is_persona() {
        let message = make_message(Role::Assistant, "hi");
        let bubble = ChatBubble::new(&message, "Alma");
        assert_eq!(bubble.role_label(), "Alma");
    }

    #[test]
    fn timestamp_formats_as_hh_mm() {
        let message = make_message(Role::User, "hi");
        let stamp = format_timestamp(&message.timestamp);
        assert_eq!(stamp.len(), 5);
        assert_eq!(stamp.as_bytes()[2], b':');
    }
}
