use std::path::{Path, PathBuf};

use clap::Args;

/// Sound player used when `--sound-player` is not given.
#[cfg(target_os = "macos")]
const DEFAULT_SOUND_PLAYER: &str = "afplay";
/// Sound player used when `--sound-player` is not given.
#[cfg(not(target_os = "macos"))]
const DEFAULT_SOUND_PLAYER: &str = "paplay";

/// Browser opener used when `--browser-opener` is not given.
#[cfg(target_os = "macos")]
const DEFAULT_BROWSER_OPENER: &str = "open";
/// Browser opener used when `--browser-opener` is not given.
#[cfg(not(target_os = "macos"))]
const DEFAULT_BROWSER_OPENER: &str = "xdg-open";

/// Run-time settings for the terminal host.
#[derive(Debug, Clone, Args)]
pub struct HostArgs {
    /// Start with sounds muted
    #[arg(long, global = true)]
    pub mute: bool,

    /// Program that plays a sound file given as its only argument
    #[arg(long, value_name = "CMD", global = true, default_value = DEFAULT_SOUND_PLAYER)]
    pub sound_player: String,

    /// Program that opens a URL in the system browser
    #[arg(long, value_name = "CMD", global = true, default_value = DEFAULT_BROWSER_OPENER)]
    pub browser_opener: String,

    /// Seed quiz shuffles for a reproducible order
    #[arg(long, value_name = "N", global = true)]
    pub seed: Option<u64>,
}

/// Resolved settings handed to the terminal host.
#[derive(Debug, Clone)]
pub struct HostSettings {
    /// Sound player program.
    pub sound_player: String,
    /// Browser opener program.
    pub browser_opener: String,
    /// Directory that relative item paths are resolved against.
    pub base_dir: PathBuf,
}

impl HostSettings {
    /// Settings from CLI flags for a walkthrough document at `doc`.
    pub fn new(args: &HostArgs, doc: &Path) -> Self {
        let base_dir = doc
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Self {
            sound_player: args.sound_player.clone(),
            browser_opener: args.browser_opener.clone(),
            base_dir,
        }
    }

    /// `path` resolved against the base directory unless already absolute.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.base_dir.join(p)
        }
    }
}
