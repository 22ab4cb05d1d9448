//! Test support utilities for walkthru-engine integration/unit tests.
//! These helpers are public so integration tests and downstream hosts can use
//! them; they are not meant for production paths.

use std::{
    collections::{HashSet, VecDeque},
    sync::Arc,
};

use async_trait::async_trait;
use config::{BrowserType, DiffAction, Severity};
use outline::{Highlight, QuizView};
use parking_lot::Mutex;

use crate::{Host, HostError, HostResult, QuizSignal};

/// Recording host: every call is logged as `name:arg[:arg...]`, prompt answers
/// and quiz signals are scripted, and named operations can be made to fail.
#[derive(Clone, Default)]
pub struct MockHost {
    /// Calls in order.
    calls: Arc<Mutex<Vec<String>>>,
    /// Answer for the next diff prompts; `None` dismisses.
    diff_choice: Arc<Mutex<Option<DiffAction>>>,
    /// Signals returned by `show_quiz`; `Close` once drained.
    quiz_signals: Arc<Mutex<VecDeque<QuizSignal>>>,
    /// Every view passed to `show_quiz`.
    quiz_views: Arc<Mutex<Vec<QuizView>>>,
    /// Operation names that return an error.
    failing: Arc<Mutex<HashSet<String>>>,
}

impl MockHost {
    /// A host that accepts everything and dismisses diff prompts.
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// True when a call equal to `s` was recorded.
    pub fn calls_contains(&self, s: &str) -> bool {
        self.calls.lock().iter().any(|x| x == s)
    }

    /// Number of recorded calls whose name (text before the first `:`) is `name`.
    pub fn count(&self, name: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.split(':').next() == Some(name))
            .count()
    }

    /// Forget recorded calls and views.
    pub fn clear(&self) {
        self.calls.lock().clear();
        self.quiz_views.lock().clear();
    }

    /// Answer diff prompts with `choice` (`None` dismisses).
    pub fn set_diff_choice(&self, choice: Option<DiffAction>) {
        *self.diff_choice.lock() = choice;
    }

    /// Queue signals for subsequent `show_quiz` calls.
    pub fn push_quiz_signals(&self, signals: &[QuizSignal]) {
        self.quiz_signals.lock().extend(signals.iter().copied());
    }

    /// Views shown so far.
    pub fn quiz_views(&self) -> Vec<QuizView> {
        self.quiz_views.lock().clone()
    }

    /// Make operation `name` (e.g. `"open_file"`) fail from now on.
    pub fn fail_on(&self, name: &str) {
        self.failing.lock().insert(name.to_string());
    }

    /// Record a call and fail it if scripted to.
    fn record(&self, name: &str, args: &[&str]) -> HostResult<()> {
        let mut entry = name.to_string();
        for a in args {
            entry.push(':');
            entry.push_str(a);
        }
        self.calls.lock().push(entry);
        if self.failing.lock().contains(name) {
            return Err(HostError::Msg(format!("{name} failed")));
        }
        Ok(())
    }
}

#[async_trait]
impl Host for MockHost {
    async fn open_file(
        &self,
        path: &str,
        line: Option<u32>,
        highlight: Option<&Highlight>,
    ) -> HostResult<()> {
        let line = line.map(|l| l.to_string()).unwrap_or_default();
        let hl = highlight
            .map(|h| format!("{}-{}", h.start_line, h.end_line))
            .unwrap_or_default();
        match (line.is_empty(), hl.is_empty()) {
            (true, true) => self.record("open_file", &[path]),
            (_, true) => self.record("open_file", &[path, &line]),
            _ => self.record("open_file", &[path, &line, &hl]),
        }
    }

    async fn close_file(&self, path: &str) -> HostResult<()> {
        self.record("close_file", &[path])
    }

    async fn show_dialog(&self, message: &str, severity: Severity) -> HostResult<()> {
        let sev = format!("{severity:?}").to_lowercase();
        self.record("show_dialog", &[&sev, message])
    }

    async fn apply_diff(&self, diff_path: &str, action: DiffAction) -> HostResult<()> {
        self.record("apply_diff", &[diff_path, action.as_str()])
    }

    async fn revert_diff(&self, diff_path: &str) -> HostResult<()> {
        self.record("revert_diff", &[diff_path])
    }

    async fn play_sound(&self, path: &str) -> HostResult<()> {
        self.record("play_sound", &[path])
    }

    async fn open_browser(
        &self,
        url: &str,
        browser_type: BrowserType,
        title: &str,
    ) -> HostResult<()> {
        let kind = format!("{browser_type:?}").to_lowercase();
        self.record("open_browser", &[url, &kind, title])
    }

    async fn choose_diff_action(
        &self,
        diff_path: &str,
        choices: &[DiffAction],
    ) -> HostResult<Option<DiffAction>> {
        let listed: Vec<&str> = choices.iter().map(|c| c.as_str()).collect();
        self.record("choose_diff_action", &[diff_path, &listed.join("|")])?;
        Ok(*self.diff_choice.lock())
    }

    async fn show_quiz(&self, view: &QuizView) -> HostResult<QuizSignal> {
        let state = if view.is_revealed() {
            "revealed"
        } else {
            "unrevealed"
        };
        self.quiz_views.lock().push(view.clone());
        self.record("show_quiz", &[state])?;
        Ok(self
            .quiz_signals
            .lock()
            .pop_front()
            .unwrap_or(QuizSignal::Close))
    }

    async fn report_error(&self, message: &str) {
        self.calls.lock().push(format!("report_error:{message}"));
    }
}
