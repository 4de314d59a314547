//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//! The intention is to swap this out for a different adapter (web, voice)
//! in the future if needed.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (a reply is pending): draws every ~80ms so the typing
//!   indicator pulses smoothly.
//! - **Idle**: sleeps up to 500ms, only redraws on events or terminal resize.
//!   Animation math is also skipped.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::chat::{DelayBounds, Responder, ScriptedResponder};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{ChatInput, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub message_list: MessageListState,
    pub input: ChatInput,
    // Animation state
    pub pulse_value: f32,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input: ChatInput::new(),
            pulse_value: 0.0,
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Enable Kitty keyboard protocol unconditionally (allows Shift+Enter detection)
        // Detection via supports_keyboard_enhancement() fails in WSL, but the protocol
        // is harmlessly ignored by terminals that don't support it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!(
            "Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)"
        );
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

/// Build the responder for this session, seeded when the config asks for
/// reproducible replies.
pub fn build_responder(config: &ResolvedConfig) -> Arc<dyn Responder> {
    match config.seed {
        Some(seed) => Arc::new(ScriptedResponder::seeded(seed)),
        None => Arc::new(ScriptedResponder::new()),
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let responder = build_responder(&config);
    let mut app = App::from_config(responder, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from the background reply task
    let (tx, rx) = mpsc::channel();

    // Abort handle for the reply currently in flight (used on teardown)
    let mut pending_reply: Option<tokio::task::AbortHandle> = None;

    // Animation timer
    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame
    let mut should_quit = false;

    while !should_quit {
        // Sync ChatInput props with App state
        tui.input.disabled = app.is_typing;

        // The typing indicator is the only animation
        let animating = app.is_typing;
        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            tui.pulse_value = (elapsed * 5.0).sin() * 0.5 + 0.5;
            let spinner_frame = (elapsed * 2.5) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating, long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                // Resize just needs a redraw (already flagged above)
                TuiEvent::Resize => {}

                // Esc and Ctrl+C both end the session
                TuiEvent::Escape | TuiEvent::ForceQuit => {
                    if update(&mut app, Action::Quit) == Effect::Quit {
                        should_quit = true;
                    }
                }

                // Scroll events always go to the MessageList
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown
                | TuiEvent::ScrollToBottom => {
                    tui.message_list.handle_event(&event);
                }

                // Everything else is editing, handled by the ChatInput.
                // While a reply is pending the input is disabled and swallows
                // all of these, so a second submit cannot slip through.
                _ => {
                    if let Some(InputEvent::Submitted(text)) = tui.input.handle_event(&event)
                        && let Effect::ScheduleReply(prompt) = update(&mut app, Action::Submit(text))
                    {
                        pending_reply = Some(spawn_reply(
                            app.responder.clone(),
                            prompt,
                            app.delay,
                            tx.clone(),
                        ));
                        tui.input.disabled = true;
                        tui.message_list.scroll_to_latest();
                    }
                }
            }
        }

        // Handle actions from the background reply task
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            match update(&mut app, action) {
                Effect::Quit => should_quit = true,
                Effect::ScheduleReply(prompt) => {
                    pending_reply = Some(spawn_reply(
                        app.responder.clone(),
                        prompt,
                        app.delay,
                        tx.clone(),
                    ));
                }
                Effect::None => {}
            }
            if !app.is_typing {
                // Reply delivered: the handle is spent, and the newest message
                // should be scrolled into view
                pending_reply = None;
                tui.message_list.scroll_to_latest();
            }
        }
    }

    // Teardown: a scheduled reply must not outlive the view. Aborting is
    // silent and leaves no trace in the transcript.
    if let Some(handle) = pending_reply.take() {
        handle.abort();
    }

    ratatui::restore();
    Ok(())
}

/// Spawn the deferred reply task: sleep for a sampled pause, ask the
/// responder for text, then send it back to the event loop as an Action.
///
/// Returns the task's `AbortHandle` so the caller can cancel the whole
/// exchange (pause included) on teardown.
pub fn spawn_reply(
    responder: Arc<dyn Responder>,
    prompt: String,
    delay: DelayBounds,
    tx: mpsc::Sender<Action>,
) -> tokio::task::AbortHandle {
    let pause = delay.sample(&mut rand::thread_rng());
    info!("Reply scheduled in {:?} via '{}'", pause, responder.name());

    let handle = tokio::spawn(async move {
        tokio::time::sleep(pause).await;
        let text = responder.reply(&prompt).await;
        if tx.send(Action::ReplyReady(text)).is_err() {
            warn!("Failed to deliver reply: receiver dropped");
        }
    });

    handle.abort_handle()
}
