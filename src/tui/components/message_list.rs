//! # MessageList Component
//!
//! Scrollable view of the conversation transcript.
//!
//! ## Responsibilities
//!
//! - Display the transcript as a column of chat bubbles
//! - Append the typing indicator while a reply is pending
//! - Manage scrolling logic (stick-to-bottom, clamping, re-pinning)
//! - Perform efficient layout caching (bubble heights)
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and `&Transcript` (props).
//!
//! Since `Component::render` takes `&mut self`, we can safely mutate the state
//! (including layout cache and scroll state) during the render pass, aligning
//! with Ratatui's `StatefulWidget` pattern.

use ratatui::layout::{Position, Rect, Size};
use ratatui::Frame;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::chat::Transcript;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::bubble::ChatBubble;
use crate::tui::components::typing_indicator::{TypingIndicator, TYPING_INDICATOR_HEIGHT};
use crate::tui::event::TuiEvent;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    /// Scroll offset and view state
    pub scroll_state: ScrollViewState,
    /// Cached layout measurements
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Full canvas height from the last render, typing indicator included
    pub canvas_height: u16,
    /// True when content extends below the current scroll position.
    /// Refreshed at the end of every render; the header reads it.
    pub has_unseen_content: bool,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true, // Start attached to bottom
            viewport_height: 0,
            canvas_height: 0,
            has_unseen_content: false,
        }
    }

    /// Re-engage auto-scroll so the next render shows the latest content.
    /// The run loop calls this whenever the transcript or typing state
    /// changes, which keeps the newest message visible without the user
    /// scrolling by hand.
    pub fn scroll_to_latest(&mut self) {
        self.stick_to_bottom = true;
    }

    /// Clamp scroll offset so it never exceeds the canvas bounds.
    /// Prevents overscrolling past the last message.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.canvas_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Clamp scroll and re-engage auto-scroll if the user has reached the bottom.
    /// Called on scroll-down events so that scrolling past the end re-pins to bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.canvas_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    // Mutable reference to persistent state
    pub state: &'a mut MessageListState,
    pub transcript: &'a Transcript,
    pub persona: &'a str,
    pub is_typing: bool,
    pub pulse_value: f32,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        transcript: &'a Transcript,
        persona: &'a str,
        is_typing: bool,
        pulse_value: f32,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            transcript,
            persona,
            is_typing,
            pulse_value,
            spinner_frame,
        }
    }
}

impl Component for MessageList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area
        let messages = self.transcript.messages();

        // 1. Update Layout Cache (Internal Mutation)
        // Messages are immutable once appended, so cached heights stay valid
        // until the width changes; new messages just extend the cache.
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(messages.len(), content_width);
        layout.heights.truncate(reusable);
        for message in messages.iter().skip(layout.heights.len()) {
            layout
                .heights
                .push(ChatBubble::calculate_height(message, content_width));
        }
        layout.rebuild_prefix_heights();
        layout.update_metadata(content_width);

        let total_height: u16 = self.state.layout.heights.iter().sum();

        // The typing indicator occupies canvas space below the last message,
        // so stick-to-bottom keeps it in view while the reply is pending.
        let canvas_height = if self.is_typing {
            total_height + TYPING_INDICATOR_HEIGHT
        } else {
            total_height
        };

        // 2. Clamp scroll offset to prevent overscrolling past content.
        // Skip when auto-scrolling: scroll_to_bottom targets the canvas anyway.
        self.state.viewport_height = area.height;
        self.state.canvas_height = canvas_height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        // 3. Render visible bubbles into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = if visible_range.start > 0 {
            self.state.layout.prefix_heights[visible_range.start - 1]
        } else {
            0
        };

        for i in visible_range {
            let height = self.state.layout.heights[i];
            let bubble_rect = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(ChatBubble::new(&messages[i], self.persona), bubble_rect);
            y_offset += height;
        }

        if self.is_typing {
            // Always drawn into the canvas; the ScrollView clips it when the
            // user has scrolled away from the bottom.
            let indicator_rect =
                Rect::new(0, total_height, content_width, TYPING_INDICATOR_HEIGHT);
            let indicator = TypingIndicator {
                persona: self.persona,
                frame: self.spinner_frame,
                pulse_intensity: self.pulse_value,
            };
            scroll_view.render_widget(indicator, indicator_rect);
        }

        // Auto-scroll logic (Mutation)
        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        // Render the ScrollView into the full viewport area
        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);

        // Update auxiliary state for the header's "↓ New" indicator
        let current_offset = self.state.scroll_state.offset().y;
        self.state.has_unseen_content = canvas_height > area.height
            && current_offset < canvas_height - area.height;
    }
}

/// EventHandler is implemented on `MessageListState` rather than `MessageList` because:
/// 1. Event handling requires persistent state (scroll position, stick_to_bottom flag)
/// 2. `MessageList` is recreated each frame with fresh props, so it can't hold state
/// 3. The state object lives in `TuiState` and persists across the event loop
impl EventHandler for MessageListState {
    type Event = (); // MessageList currently emits no events (scroll handled internally)

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
                None
            }
            TuiEvent::ScrollToBottom => {
                self.scroll_to_latest();
                None
            }
            _ => None,
        }
    }
}

/// Cached layout measurements
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            content_width: 0,
        }
    }

    /// How many cached heights are still valid for this frame.
    ///
    /// Bubbles never change height after being appended, so the only full
    /// invalidation is a width change (terminal resize). Otherwise every
    /// cached entry up to the current message count is reusable.
    pub fn reusable_count(&self, message_count: usize, content_width: u16) -> usize {
        if self.content_width != content_width {
            return 0;
        }
        self.heights.len().min(message_count)
    }

    pub fn update_metadata(&mut self, content_width: u16) {
        self.content_width = content_width;
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc += h;
                Some(*acc)
            })
            .collect();
    }

    /// Which message indices could intersect the viewport, padded by half a
    /// viewport on each side so small scrolls don't pop bubbles in late.
    pub fn visible_range(
        &self,
        scroll_offset: u16,
        viewport_height: u16,
    ) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Transcript;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_layout_cache_reusable() {
        let mut cache = LayoutCache::new();
        cache.update_metadata(80);
        cache.heights = vec![3; 5]; // Simulating 5 bubbles of height 3

        // Same width -> all cached heights reusable
        assert_eq!(cache.reusable_count(5, 80), 5);

        // New message appended -> old entries still reusable
        assert_eq!(cache.reusable_count(6, 80), 5);

        // Width changed -> full invalidation
        assert_eq!(cache.reusable_count(5, 40), 0);
    }

    #[test]
    fn test_visible_range_brackets_viewport() {
        let mut cache = LayoutCache::new();
        cache.heights = vec![4, 4, 4, 4, 4, 4];
        cache.rebuild_prefix_heights();
        assert_eq!(cache.prefix_heights, vec![4, 8, 12, 16, 20, 24]);

        // Viewport rows 8..16, buffer 4 -> candidates cover rows 4..20
        let range = cache.visible_range(8, 8);
        assert!(range.contains(&1), "bubble starting at row 4 is in range");
        assert!(range.contains(&4), "bubble covering row 19 is in range");
        assert!(!range.contains(&0) || range.start == 0); // first may be buffered in
        assert!(range.end <= 6);
    }

    #[test]
    fn test_visible_range_empty_cache() {
        let cache = LayoutCache::new();
        assert_eq!(cache.visible_range(0, 24), 0..0);
    }

    #[test]
    fn test_scroll_up_unpins_scroll_down_repins() {
        let mut state = MessageListState::new();
        state.canvas_height = 30;
        state.viewport_height = 10;
        assert!(state.stick_to_bottom);

        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);

        // Scrolling down from the bottom edge re-engages auto-scroll
        state
            .scroll_state
            .set_offset(Position { x: 0, y: 20 });
        state.handle_event(&TuiEvent::ScrollDown);
        assert!(state.stick_to_bottom);
    }

    #[test]
    fn test_scroll_to_bottom_event_repins() {
        let mut state = MessageListState::new();
        state.stick_to_bottom = false;
        state.handle_event(&TuiEvent::ScrollToBottom);
        assert!(state.stick_to_bottom);
    }

    #[test]
    fn test_clamp_scroll_limits_offset() {
        let mut state = MessageListState::new();
        state.canvas_height = 15;
        state.viewport_height = 10;
        state.scroll_state.set_offset(Position { x: 0, y: 99 });
        state.clamp_scroll();
        assert_eq!(state.scroll_state.offset().y, 5);
    }

    #[test]
    fn test_render_shows_messages_and_typing_indicator() {
        let backend = TestBackend::new(40, 12);
        let mut terminal = Terminal::new(backend).unwrap();

        let mut state = MessageListState::new();
        let mut transcript = Transcript::with_greeting("Hello there!");
        transcript.push_user("hola");

        terminal
            .draw(|f| {
                let mut list = MessageList::new(&mut state, &transcript, "Alma", true, 0.5, 1);
                list.render(f, f.area());
            })
            .unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();

        assert!(text.contains("Hello there!"));
        assert!(text.contains("hola"));
        assert!(text.contains("typing."), "indicator shows the dot cycle");
        // Everything fits on screen, so nothing is unseen
        assert!(!state.has_unseen_content);
    }

    #[test]
    fn test_unseen_content_flag_follows_scroll() {
        let backend = TestBackend::new(40, 10);
        let mut terminal = Terminal::new(backend).unwrap();

        let mut state = MessageListState::new();
        let mut transcript = Transcript::with_greeting("greeting");
        for i in 0..8 {
            transcript.push_user(format!("message number {i}"));
        }

        // Pinned to the bottom: newest content is on screen
        terminal
            .draw(|f| {
                let mut list = MessageList::new(&mut state, &transcript, "Alma", false, 0.0, 0);
                list.render(f, f.area());
            })
            .unwrap();
        assert!(!state.has_unseen_content);

        // Jump to the top: newer bubbles now sit below the viewport
        state.stick_to_bottom = false;
        state.scroll_state.set_offset(Position { x: 0, y: 0 });
        terminal
            .draw(|f| {
                let mut list = MessageList::new(&mut state, &transcript, "Alma", false, 0.0, 0);
                list.render(f, f.area());
            })
            .unwrap();
        assert!(state.has_unseen_content);
    }
}
