//! Sound cue boundary
//!
//! The simulation fires cues and never waits on them. Hosts plug in their
//! own player; [`SilentAudio`] and [`LogAudio`] cover headless runs.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ball hits a brick
    BrickHit,
}

impl SoundEffect {
    /// Asset name a host player can key its clips on
    pub fn asset_name(self) -> &'static str {
        match self {
            SoundEffect::BrickHit => "hit",
        }
    }
}

/// Fire-and-forget sound trigger
pub trait AudioCue {
    /// Start playing `effect`; no completion is reported
    fn play(&mut self, effect: SoundEffect);
}

/// Drops every cue
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioCue for SilentAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Logs cues and keeps a running count
#[derive(Debug, Clone, Default)]
pub struct LogAudio {
    played: u64,
    muted: bool,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Cues played since creation (muted cues excluded)
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl AudioCue for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        self.played += 1;
        log::trace!("Sound: {}", effect.asset_name());
    }
}
