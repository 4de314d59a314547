//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as parameters:
//! - `ChatHeader`: Top status bar showing persona name and status
//! - `ChatBubble`: Individual conversation message rendering
//! - `TypingIndicator`: Pulsing "typing..." placeholder while a reply is pending
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `ChatInput`: Text input field with a disabled mode
//! - `MessageList`: Scrollable conversation view with layout caching
//!
//! ## Design Philosophy
//!
//! Each component file contains everything related to that component: state
//! types, event types, rendering logic, event handling, and tests. You can
//! read one file to understand how a component works.
//!
//! Components receive external data as "props" (function parameters), not by
//! directly accessing global state. This makes dependencies explicit and
//! components testable:
//!
//! ```rust,ignore
//! // Good: Dependencies are explicit
//! header.render(frame, area); // header was built from app fields
//!
//! // Bad: Hidden dependency on global state
//! header.render(frame, area); // reads from a global App
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs               (this file)
//! ├── header.rs            (Top status bar)
//! ├── bubble.rs            (Single message renderer)
//! ├── typing_indicator.rs  (Pending-reply placeholder)
//! ├── message_list.rs      (Scrollable message container)
//! └── input/               (Text input with disabled mode)
//! ```

pub mod bubble;
pub mod header;
pub mod input;
pub mod message_list;
pub mod typing_indicator;

pub use bubble::ChatBubble;
pub use header::ChatHeader;
pub use input::{ChatInput, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use typing_indicator::TypingIndicator;
