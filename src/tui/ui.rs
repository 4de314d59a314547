//! Top-level frame layout.
//!
//! `draw_ui` carves the terminal into three rows (header, transcript, input)
//! and hands each to its component. The input row grows with the buffer, so
//! its height is asked for before the layout is split.

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ChatHeader, MessageList};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let input_height = tui.input.calculate_height(frame.area().width);
    let layout = Layout::vertical([Length(1), Min(0), Length(input_height)]);
    let [header_area, main_area, input_area] = layout.areas(frame.area());

    // Transcript renders first: it refreshes the unseen-content flag the
    // header reads in the same frame.
    MessageList::new(
        &mut tui.message_list,
        &app.transcript,
        &app.persona,
        app.is_typing,
        tui.pulse_value,
        spinner_frame,
    )
    .render(frame, main_area);

    ChatHeader::new(
        app.persona.clone(),
        display_status(app),
        tui.message_list.has_unseen_content,
    )
    .render(frame, header_area);

    tui.input.render(frame, input_area);
}

/// Status line text for the header: the hint from config while idle, a
/// typing notice while a reply is pending.
fn display_status(app: &App) -> String {
    if app.is_typing {
        format!("{} is typing...", app.persona)
    } else {
        app.status_message.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn status_switches_with_typing_state() {
        let mut app = test_app();
        assert_eq!(display_status(&app), "Enter sends, Esc quits");

        app.is_typing = true;
        assert_eq!(display_status(&app), "Alma is typing...");
    }

    #[test]
    fn full_frame_renders_header_transcript_and_input() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        let app = test_app();
        let mut tui = TuiState::new();

        terminal
            .draw(|f| {
                draw_ui(f, &app, &mut tui, 0);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer.content().iter().map(|c| c.symbol()).collect::<String>();

        assert!(text.contains("Alma Chat (simulated)"));
        assert!(text.contains("Hi! I'm Alma."), "greeting should be visible");
        assert!(text.contains("Message"), "input title should be visible");
    }
}
