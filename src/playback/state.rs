use crate::playback::cancel::CancelHandle;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackPhase {
    /// Nothing has been played yet.
    #[default]
    Idle,
    Playing,
    /// Halted: after the last scene finished, on `stop`, or while a scene switch settles.
    Stopped,
}

/// The single mutable playback record. Only the scheduler writes to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackState {
    pub current_scene: usize,
    pub current_fragment: usize,
    pub is_playing: bool,
    pub is_stopped: bool,
    pub auto_play: bool,
    pub slow_mode: bool,
    /// Fraction of the scene's estimated total that has elapsed, in `[0, 1]`.
    pub progress: f64,
    /// Cancel flag of the suspending command currently awaited, if any.
    pub active: Option<CancelHandle>,
}

impl PlaybackState {
    pub fn phase(&self) -> PlaybackPhase {
        if self.is_playing {
            PlaybackPhase::Playing
        } else if self.is_stopped {
            PlaybackPhase::Stopped
        } else {
            PlaybackPhase::Idle
        }
    }
}
