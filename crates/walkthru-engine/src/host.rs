//! The seam between the engine and whatever renders and runs effects.

use async_trait::async_trait;
use config::{BrowserType, DiffAction, Severity};
use outline::{Highlight, QuizView};

use crate::HostResult;

/// What the user did with a quiz presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizSignal {
    /// Show correctness.
    Reveal,
    /// Dismiss the quiz.
    Close,
}

/// Editor-side collaborator that performs effects.
///
/// Calls are awaited one at a time; the engine never retries or cancels them.
#[async_trait]
pub trait Host: Send + Sync {
    /// Open `path`, reveal `line`, and apply `highlight` when given.
    async fn open_file(
        &self,
        path: &str,
        line: Option<u32>,
        highlight: Option<&Highlight>,
    ) -> HostResult<()>;

    /// Close a file opened earlier.
    async fn close_file(&self, path: &str) -> HostResult<()>;

    /// Show a message at `severity`.
    async fn show_dialog(&self, message: &str, severity: Severity) -> HostResult<()>;

    /// Apply (or dry-run, for `Preview`) the patch at `diff_path`.
    async fn apply_diff(&self, diff_path: &str, action: DiffAction) -> HostResult<()>;

    /// Reverse the patch at `diff_path`.
    async fn revert_diff(&self, diff_path: &str) -> HostResult<()>;

    /// Play a sound file. Never called while muted.
    async fn play_sound(&self, path: &str) -> HostResult<()>;

    /// Open `url` in the built-in or the system browser.
    async fn open_browser(&self, url: &str, browser_type: BrowserType, title: &str)
    -> HostResult<()>;

    /// Ask which of `choices` to run for `diff_path`. `None` means dismissed.
    async fn choose_diff_action(
        &self,
        diff_path: &str,
        choices: &[DiffAction],
    ) -> HostResult<Option<DiffAction>>;

    /// Render `view` and wait for the user's next signal.
    async fn show_quiz(&self, view: &QuizView) -> HostResult<QuizSignal>;

    /// Tell the user an effect failed.
    async fn report_error(&self, message: &str);
}
