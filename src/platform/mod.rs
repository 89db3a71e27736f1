//! Platform abstraction layer
//!
//! Handles the host boundary:
//! - Input events
//! - The blocking end-of-round dialog
//! - Driving the frame loop

pub mod game;

pub use game::{Game, LoopControl};

use crate::sim::{Input, KeyAction};

/// Events delivered by the host runtime
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// Primary pointer / touch went down
    PointerDown,
    /// Pointer moved to an absolute x on the canvas
    PointerMove { x: f32 },
    Key(KeyAction),
    /// The end-of-round dialog was dismissed
    DialogClosed { confirmed: bool },
}

impl HostEvent {
    /// The gameplay input this event carries, if any
    pub fn as_input(self) -> Option<Input> {
        match self {
            HostEvent::PointerDown => Some(Input::PointerDown),
            HostEvent::PointerMove { x } => Some(Input::PointerMove { x }),
            HostEvent::Key(action) => Some(Input::Key(action)),
            HostEvent::DialogClosed { .. } => None,
        }
    }
}

/// Title and body of the end-of-round dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub title: &'static str,
    pub message: &'static str,
}

impl Prompt {
    pub const WON: Prompt = Prompt {
        title: "Level cleared!",
        message: "Tap OK to play again",
    };

    pub const LOST: Prompt = Prompt {
        title: "Game over",
        message: "Tap OK to play again",
    };
}

/// Modal confirm dialog owned by the host
///
/// `present` returns immediately; the answer comes back later as
/// [`HostEvent::DialogClosed`].
pub trait Modal {
    fn present(&mut self, prompt: &Prompt);
}
