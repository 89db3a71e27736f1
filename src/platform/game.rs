//! Frame loop driver
//!
//! The host calls [`Game::frame`] once per display refresh and schedules the
//! next call only while it returns [`LoopControl::Continue`]. A finished round
//! halts the loop until the dialog is confirmed; the host then restarts the
//! same loop, so only one scheduler ever exists.

use super::{HostEvent, Modal, Prompt};
use crate::audio::AudioCue;
use crate::renderer::{Surface, draw_session};
use crate::sim::{Session, TickOutcome, apply_input, tick};

/// What the host should do with its frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    /// Schedule the next frame
    Continue,
    /// Stop scheduling frames until told to resume
    Halt,
    /// A new round is ready; start scheduling frames again
    Resume,
}

/// Game instance holding the session and its host collaborators
pub struct Game<S: Surface, A: AudioCue, M: Modal> {
    session: Session,
    surface: S,
    audio: A,
    modal: M,
    awaiting_dialog: bool,
    rounds_finished: u32,
}

impl<S: Surface, A: AudioCue, M: Modal> Game<S, A, M> {
    pub fn new(session: Session, surface: S, audio: A, modal: M) -> Self {
        Self {
            session,
            surface,
            audio,
            modal,
            awaiting_dialog: false,
            rounds_finished: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn modal(&self) -> &M {
        &self.modal
    }

    /// True while the end-of-round dialog is up
    pub fn is_awaiting_dialog(&self) -> bool {
        self.awaiting_dialog
    }

    /// Rounds that ended in a win or a loss
    pub fn rounds_finished(&self) -> u32 {
        self.rounds_finished
    }

    /// Render, then step the simulation, at host time `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> LoopControl {
        if self.awaiting_dialog {
            return LoopControl::Halt;
        }

        draw_session(&self.session, &mut self.surface);

        let prompt = match tick(&mut self.session, now_ms, &mut self.audio) {
            TickOutcome::Continue => return LoopControl::Continue,
            TickOutcome::Won => Prompt::WON,
            TickOutcome::Lost => Prompt::LOST,
        };

        log::info!("Round over: {}", prompt.title);
        self.rounds_finished += 1;
        self.awaiting_dialog = true;
        self.modal.present(&prompt);
        LoopControl::Halt
    }

    /// Apply a host event immediately, between frames
    pub fn handle_event(&mut self, event: HostEvent) -> LoopControl {
        if let HostEvent::DialogClosed { confirmed } = event {
            return self.close_dialog(confirmed);
        }

        if self.awaiting_dialog {
            // The dialog is modal; gameplay input waits for it
            return LoopControl::Halt;
        }

        if let Some(input) = event.as_input() {
            apply_input(&mut self.session, input);
        }
        LoopControl::Continue
    }

    fn close_dialog(&mut self, confirmed: bool) -> LoopControl {
        if !self.awaiting_dialog {
            log::warn!("Dialog result received with no dialog open");
            return LoopControl::Continue;
        }
        if !confirmed {
            log::info!("Restart declined");
            return LoopControl::Halt;
        }

        self.awaiting_dialog = false;
        self.session.reset();
        LoopControl::Resume
    }
}
