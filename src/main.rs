//! Burst Breakout headless runner
//!
//! Plays rounds with a simple autopilot against a vertex-batch surface and a
//! dialog that always confirms. Pass a JSON tuning file as the first argument
//! to override defaults.

use burst_breakout::audio::LogAudio;
use burst_breakout::platform::{Game, HostEvent, LoopControl, Modal, Prompt};
use burst_breakout::renderer::VertexBatch;
use burst_breakout::sim::Session;
use burst_breakout::{Tuning, TuningError};

/// Host frame interval (60 Hz display)
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Give up on a round that runs this long
const MAX_FRAMES_PER_ROUND: u32 = 60 * 60 * 5;
const ROUNDS: u32 = 3;

/// Dialog stand-in that records the last prompt and always answers OK
#[derive(Default)]
struct AutoConfirm {
    last: Option<Prompt>,
}

impl Modal for AutoConfirm {
    fn present(&mut self, prompt: &Prompt) {
        log::info!("[dialog] {} - {}", prompt.title, prompt.message);
        self.last = Some(prompt.clone());
    }
}

fn main() {
    env_logger::init();
    log::info!("Burst Breakout (headless) starting...");

    let tuning = match load_tuning() {
        Ok(tuning) => tuning,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let layout = VertexBatch::layout();
    log::info!(
        "Vertex stride {} bytes, {} attributes",
        layout.array_stride,
        layout.attributes.len()
    );

    let session = Session::new(tuning, seed);
    let mut game = Game::new(session, VertexBatch::new(), LogAudio::new(), AutoConfirm::default());

    let mut now = 0.0;
    let mut round = 0;
    while round < ROUNDS {
        let Some(frames) = play_round(&mut game, &mut now) else {
            log::warn!(
                "Round {} still running after {} frames, giving up",
                round + 1,
                MAX_FRAMES_PER_ROUND
            );
            break;
        };
        round += 1;

        let outcome = game.modal().last.as_ref().map_or("unknown", |p| p.title);
        log::info!(
            "Round {}: {} after {} frames, {} brick hits so far, last frame uploaded {} vertices",
            round,
            outcome,
            frames,
            game.audio().played(),
            game.surface().uploaded_vertices()
        );

        game.handle_event(HostEvent::DialogClosed { confirmed: true });
    }
}

fn load_tuning() -> Result<Tuning, TuningError> {
    match std::env::args().nth(1) {
        Some(path) => Tuning::load(path),
        None => Ok(Tuning::default()),
    }
}

/// Run frames until the loop halts; `None` if the frame cap is hit first
fn play_round(game: &mut Game<VertexBatch, LogAudio, AutoConfirm>, now: &mut f64) -> Option<u32> {
    for frame in 0..MAX_FRAMES_PER_ROUND {
        autopilot(game);
        let control = game.frame(*now);
        *now += FRAME_MS;
        if control == LoopControl::Halt {
            return Some(frame + 1);
        }
    }
    None
}

/// Keep the paddle under the lowest descending ball and tap when stuck
///
/// The paddle sits one ball radius off centre so returns leave at an angle
/// instead of bouncing straight up the same column forever.
fn autopilot(game: &mut Game<VertexBatch, LogAudio, AutoConfirm>) {
    let session = game.session();
    let target = session
        .balls()
        .filter(|b| !b.is_stuck() && b.vel.y > 0.0)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .or_else(|| session.balls().find(|b| !b.is_stuck()))
        .map(|b| b.pos.x + b.radius);
    let stuck = session.ball.is_stuck();

    if let Some(x) = target {
        game.handle_event(HostEvent::PointerMove { x });
    }
    if stuck {
        game.handle_event(HostEvent::PointerDown);
    }
}
