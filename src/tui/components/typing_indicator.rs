use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Padding, Paragraph, Widget};

use crate::chat::Role;
use crate::tui::components::bubble::role_color;

/// Dot cycle for the animated "typing" text.
const DOT_FRAMES: [&str; 4] = ["", ".", "..", "..."];

/// Pulse intensity threshold above which the border transitions from normal to BOLD.
const PULSE_BOLD_THRESHOLD: f32 = 0.6;
/// Pulse intensity threshold above which the border transitions from DIM to normal.
const PULSE_NORMAL_THRESHOLD: f32 = 0.2;

/// One content line plus top and bottom borders.
pub const TYPING_INDICATOR_HEIGHT: u16 = 3;

/// Animated bubble shown below the last message while a reply is pending.
///
/// Like `ChatBubble` this is a transient component created fresh each frame.
/// The parent owns the animation clock: `frame` drives the dot cycle and
/// `pulse_intensity` (0.0 to 1.0) drives the breathing border.
#[derive(Clone, Copy)]
pub struct TypingIndicator<'a> {
    /// Assistant display name for the bubble title
    pub persona: &'a str,
    /// Shared animation frame counter
    pub frame: usize,
    /// Current pulse intensity (0.0 to 1.0)
    pub pulse_intensity: f32,
}

impl TypingIndicator<'_> {
    /// The animated content line for a given frame counter.
    fn text(frame: usize) -> String {
        format!("typing{}", DOT_FRAMES[frame % DOT_FRAMES.len()])
    }
}

impl Widget for TypingIndicator<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC);

        // Three-phase breathing in the assistant's color: DIM → normal → BOLD.
        let mut border_style = Style::default()
            .fg(role_color(Role::Assistant))
            .add_modifier(Modifier::DIM);
        if self.pulse_intensity > PULSE_BOLD_THRESHOLD {
            border_style = border_style
                .remove_modifier(Modifier::DIM)
                .add_modifier(Modifier::BOLD);
        } else if self.pulse_intensity > PULSE_NORMAL_THRESHOLD {
            border_style = border_style.remove_modifier(Modifier::DIM);
        }

        let block = Block::bordered()
            .title(self.persona)
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(1));

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(Self::text(self.frame))
            .style(style)
            .render(inner_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_dots_cycle_with_frame_counter() {
        assert_eq!(TypingIndicator::text(0), "typing");
        assert_eq!(TypingIndicator::text(1), "typing.");
        assert_eq!(TypingIndicator::text(2), "typing..");
        assert_eq!(TypingIndicator::text(3), "typing...");
        assert_eq!(TypingIndicator::text(4), "typing");
    }

    #[test]
    fn test_render_shows_persona_and_typing_text() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|f| {
                let indicator = TypingIndicator {
                    persona: "Alma",
                    frame: 3,
                    pulse_intensity: 0.5,
                };
                f.render_widget(indicator, f.area());
            })
            .unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();

        assert!(text.contains("Alma"));
        assert!(text.contains("typing..."));
    }
}
