//! Chat domain types: the transcript, the responder seam, and the pieces
//! that make the simulated assistant feel alive (canned templates, typing
//! pause sampling).
//!
//! Nothing in here knows about terminals or rendering.

pub mod delay;
pub mod responder;
pub mod scripted;
pub mod types;

pub use delay::DelayBounds;
pub use responder::Responder;
pub use scripted::ScriptedResponder;
pub use types::{Message, Role, Transcript};
