//! Process-wide sound mute flag.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

/// Whether sounds are muted. Starts unmuted and is never persisted.
#[derive(Debug, Default)]
pub struct SoundState {
    /// Set while muted.
    muted: AtomicBool,
}

impl SoundState {
    /// A fresh, unmuted state.
    pub fn new() -> Self {
        Self::default()
    }

    /// True while muted.
    pub fn is_muted(&self) -> bool {
        self.muted.load(Ordering::SeqCst)
    }

    /// Suppress all sounds.
    pub fn mute(&self) {
        self.set(true);
    }

    /// Allow sounds again.
    pub fn unmute(&self) {
        self.set(false);
    }

    /// Flip the flag and return the new muted state.
    pub fn toggle_mute(&self) -> bool {
        let muted = !self.muted.fetch_xor(true, Ordering::SeqCst);
        debug!(muted, "sound mute toggled");
        muted
    }

    /// Store `muted`.
    fn set(&self, muted: bool) {
        self.muted.store(muted, Ordering::SeqCst);
        debug!(muted, "sound mute set");
    }
}
