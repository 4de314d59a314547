//! # ChatInput Component
//!
//! Handles text entry for the chat session.
//!
//! ## Responsibilities
//!
//! - Capture text input
//! - Handle editing (backspace, delete, cursor movement, paste)
//! - Handle submission (Enter)
//! - Go inert while a reply is pending (`disabled` prop)
//!
//! ## State Management
//!
//! The buffer is internal state. The `disabled` flag is a prop mirrored from
//! the application state each frame. Cursor position and scroll state are
//! encapsulated in `CursorState`.
//!
//! ## Disabled Mode
//!
//! While the assistant is composing a reply the input must not accept edits or
//! submissions. `handle_event` returns `None` for every event in that mode and
//! the render dims the box and hides the caret, so the freeze is visible.

mod cursor;
mod text_wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::CursorState;
use text_wrap::{
    inner_width, wrap_options, wrap_line_count,
    prev_char_boundary, next_char_boundary,
    prev_word_boundary, next_word_boundary,
    VERTICAL_OVERHEAD, MAX_VISIBLE_LINES
};

/// High-level events emitted by the ChatInput
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed on a non-blank buffer)
    Submitted(String),
    /// Text content changed (optional, if parent needs to know)
    ContentChanged,
}

/// Text input component for composing chat messages.
///
/// # Props
///
/// - `disabled`: Whether input is frozen while a reply is pending (from App state)
///
/// # State
///
/// - `buffer`: Current text being typed
/// - `cursor`: Cursor position, scroll offset, and cached width (see `CursorState`)
pub struct ChatInput {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Whether the input currently rejects edits and submissions (Prop)
    pub disabled: bool,
    /// Cursor and scroll tracking
    cursor: CursorState,
}

impl ChatInput {
    /// Create a new empty, enabled ChatInput
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            disabled: false,
            cursor: CursorState::new(),
        }
    }

    /// Calculate required height for current buffer content, clamped to viewport limits.
    /// Returns value in range [1 + VERTICAL_OVERHEAD, MAX_VISIBLE_LINES + VERTICAL_OVERHEAD].
    pub fn calculate_height(&self, content_width: u16) -> u16 {
        let width = inner_width(content_width);
        let content_lines = wrap_line_count(&self.buffer, width);
        let visible_lines = content_lines.min(MAX_VISIBLE_LINES);
        visible_lines + VERTICAL_OVERHEAD
    }

    /// Get the visible text based on current scroll offset.
    /// When scroll_offset > 0, only returns the visible lines.
    fn get_visible_text(&self, content_width: u16) -> String {
        if self.cursor.scroll_offset == 0 {
            return self.buffer.clone();
        }

        let width = inner_width(content_width);
        if width == 0 {
            return String::new();
        }

        let lines = textwrap::wrap(&self.buffer, wrap_options(width));

        let start = self.cursor.scroll_offset as usize;
        let end = (start + MAX_VISIBLE_LINES as usize).min(lines.len());

        lines[start..end].join("\n")
    }

    /// Render scrollbar when content exceeds visible area
    fn render_scrollbar(&self, frame: &mut Frame, area: Rect) {
        use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState};

        let width = inner_width(area.width);
        let total_lines = wrap_line_count(&self.buffer, width);

        if total_lines <= MAX_VISIBLE_LINES {
            return;
        }

        // ScrollbarState content_length is max scrollable position, not total items
        let max_scroll = total_lines.saturating_sub(MAX_VISIBLE_LINES);

        let mut scrollbar_state = ScrollbarState::default()
            .content_length(max_scroll as usize)
            .position(self.cursor.scroll_offset as usize);

        let scrollbar_area = Rect {
            x: area.x + area.width.saturating_sub(1),
            y: area.y + 1,
            width: 1,
            height: area.height.saturating_sub(2),
        };

        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            scrollbar_area,
            &mut scrollbar_state,
        );
    }
}

impl Default for ChatInput {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ChatInput {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.cursor.last_content_width = area.width;
        self.cursor.update_scroll_offset(&self.buffer, area.width);

        let (title, style) = if self.disabled {
            (
                "Message (waiting for reply)",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::DIM),
            )
        } else {
            ("Message", Style::default().fg(Color::Green))
        };

        let visible_text = self.get_visible_text(area.width);

        let block = Block::bordered()
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(style)
            .title(title);

        let input = Paragraph::new(visible_text).block(block).style(style);

        frame.render_widget(input, area);
        self.render_scrollbar(frame, area);

        // No caret while frozen: skipping set_cursor_position leaves it hidden
        if !self.disabled {
            let (cursor_x, cursor_y) = self.cursor.screen_pos(&self.buffer, area);
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }
}

impl EventHandler for ChatInput {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.disabled {
            return None;
        }

        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor.pos, *c);
                self.cursor.pos += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(self.cursor.pos, text);
                self.cursor.pos += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor.pos > 0 {
                    let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                    self.buffer.drain(prev..self.cursor.pos);
                    self.cursor.pos = prev;
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor.pos < self.buffer.len() {
                    let next = next_char_boundary(&self.buffer, self.cursor.pos);
                    self.buffer.drain(self.cursor.pos..next);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => {
                if self.cursor.pos > 0 {
                    self.cursor.pos = prev_char_boundary(&self.buffer, self.cursor.pos);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorRight => {
                if self.cursor.pos < self.buffer.len() {
                    self.cursor.pos = next_char_boundary(&self.buffer, self.cursor.pos);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorWordLeft => {
                let target = prev_word_boundary(&self.buffer, self.cursor.pos);
                (self.cursor.pos != target).then(|| {
                    self.cursor.pos = target;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorWordRight => {
                let target = next_word_boundary(&self.buffer, self.cursor.pos);
                (self.cursor.pos != target).then(|| {
                    self.cursor.pos = target;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor.pos]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor.pos != line_start).then(|| {
                    self.cursor.pos = line_start;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor.pos..]
                    .find('\n')
                    .map(|i| self.cursor.pos + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor.pos != line_end).then(|| {
                    self.cursor.pos = line_end;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::Submit => {
                if !self.buffer.trim().is_empty() {
                    let text = std::mem::take(&mut self.buffer);
                    self.cursor.reset();
                    Some(InputEvent::Submitted(text))
                } else {
                    None
                }
            }
            TuiEvent::CursorUp => {
                self.cursor.move_vertically(&self.buffer, -1, self.cursor.last_content_width)
                    .then_some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorDown => {
                self.cursor.move_vertically(&self.buffer, 1, self.cursor.last_content_width)
                    .then_some(InputEvent::ContentChanged)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_text(input: &mut ChatInput) -> String {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|f| {
                input.render(f, f.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn starts_empty_and_enabled() {
        let input = ChatInput::new();
        assert!(input.buffer.is_empty());
        assert!(!input.disabled);
    }

    #[test]
    fn typing_and_backspace_edit_the_buffer() {
        let mut input = ChatInput::new();

        let res = input.handle_event(&TuiEvent::InputChar('h'));
        assert_eq!(res, Some(InputEvent::ContentChanged));

        input.handle_event(&TuiEvent::InputChar('i'));
        assert_eq!(input.buffer, "hi");

        let res = input.handle_event(&TuiEvent::Backspace);
        assert_eq!(res, Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "h");
    }

    #[test]
    fn submit_emits_text_and_clears_buffer() {
        let mut input = ChatInput::new();
        input.buffer = "hola".to_string();

        let res = input.handle_event(&TuiEvent::Submit);
        match res {
            Some(InputEvent::Submitted(text)) => assert_eq!(text, "hola"),
            other => panic!("Expected Submitted event, got {other:?}"),
        }

        assert!(input.buffer.is_empty(), "Buffer should be cleared after submit");
    }

    #[test]
    fn blank_submit_is_ignored() {
        let mut input = ChatInput::new();
        input.buffer = "   \n  ".to_string();

        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        assert_eq!(input.buffer, "   \n  ", "Blank buffer should survive a rejected submit");
    }

    #[test]
    fn disabled_input_ignores_everything() {
        let mut input = ChatInput::new();
        input.buffer = "queued".to_string();
        input.disabled = true;

        assert_eq!(input.handle_event(&TuiEvent::InputChar('x')), None);
        assert_eq!(input.handle_event(&TuiEvent::Backspace), None);
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        assert_eq!(input.buffer, "queued", "Disabled input must not mutate the buffer");
    }

    #[test]
    fn word_navigation_jumps_between_words() {
        let mut input = ChatInput::new();
        input.buffer = "hola mundo".to_string();
        input.handle_event(&TuiEvent::CursorEnd);

        assert_eq!(
            input.handle_event(&TuiEvent::CursorWordLeft),
            Some(InputEvent::ContentChanged)
        );
        input.handle_event(&TuiEvent::CursorWordLeft);
        // Now at the start: no further movement, no event
        assert_eq!(input.handle_event(&TuiEvent::CursorWordLeft), None);

        assert_eq!(
            input.handle_event(&TuiEvent::CursorWordRight),
            Some(InputEvent::ContentChanged)
        );
        input.handle_event(&TuiEvent::CursorWordRight);
        assert_eq!(input.handle_event(&TuiEvent::CursorWordRight), None);
    }

    #[test]
    fn calculate_height_clamps_to_visible_limit() {
        let mut input = ChatInput::new();
        assert_eq!(input.calculate_height(80), 3); // 1 content line + borders

        input.buffer = "a\nb\nc\nd\ne\nf\ng\nh".to_string();
        assert_eq!(input.calculate_height(80), MAX_VISIBLE_LINES + VERTICAL_OVERHEAD);
    }

    #[test]
    fn render_titles_follow_disabled_state() {
        let mut input = ChatInput::new();
        let text = render_to_text(&mut input);
        assert!(text.contains("Message"));
        assert!(!text.contains("waiting for reply"));

        input.disabled = true;
        let text = render_to_text(&mut input);
        assert!(text.contains("Message (waiting for reply)"));
    }
}
