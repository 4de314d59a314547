use std::sync::Mutex;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::chat::responder::Responder;

/// Placeholder the templates use for the echoed prompt.
const PROMPT_SLOT: &str = "{prompt}";

/// The closed set of reply shapes. Every reply is one of these with the
/// user's text substituted for the slot, plus [`CLOSING`] appended.
const TEMPLATES: [&str; 5] = [
    "That's an interesting point about \"{prompt}\". Let me think about the best way to help you with it.",
    "Thanks for your message! You mentioned \"{prompt}\", and there are a couple of angles worth exploring there.",
    "I hear you: \"{prompt}\". Tell me a bit more and we can dig into the details together.",
    "\"{prompt}\" is a great place to start. Here's what I can offer so far.",
    "Good question! When you say \"{prompt}\", a few things come to mind right away.",
];

/// Appended to every reply, regardless of template.
const CLOSING: &str = "Keep in mind my replies are simulated for now, so hook up a real model when you want to go deeper.";

/// Picks one of five canned reply templates uniformly at random and fills in
/// the user's text.
///
/// The RNG sits behind a `Mutex` so `reply` can take `&self` (the trait is
/// shared across tasks via `Arc`). Contention is irrelevant here: one reply
/// is composed at a time.
pub struct ScriptedResponder {
    rng: Mutex<StdRng>,
}

impl ScriptedResponder {
    /// Responder with an entropy-seeded RNG (normal operation).
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    /// Responder with a fixed seed, for reproducible template choices.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn compose(template: &str, prompt: &str) -> String {
        let mut reply = template.replace(PROMPT_SLOT, prompt);
        reply.push(' ');
        reply.push_str(CLOSING);
        reply
    }
}

impl Default for ScriptedResponder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Responder for ScriptedResponder {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn reply(&self, prompt: &str) -> String {
        let template = {
            let mut rng = self.rng.lock().expect("responder rng poisoned");
            TEMPLATES.choose(&mut *rng).copied().unwrap_or(TEMPLATES[0])
        };
        Self::compose(template, prompt)
    }
}
