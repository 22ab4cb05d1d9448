//! Terminal implementation of the engine's host seam.

use async_trait::async_trait;
use config::{BrowserType, DiffAction, Severity};
use outline::{Highlight, QuizView};
use tokio::{
    fs,
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin, stdin, stdout},
    process::Command,
    sync::Mutex,
};
use tracing::{debug, info};
use walkthru_engine::{Host, HostError, HostResult, QuizSignal};

use crate::settings::HostSettings;

/// Lines of context shown around the revealed line.
const EXCERPT_CONTEXT: u32 = 3;
/// Lines shown from the top of a file with no line or highlight.
const EXCERPT_HEAD: u32 = 12;

/// Prints effects to stdout, spawns helpers, and reads answers from stdin.
pub struct TerminalHost {
    /// Programs and base directory.
    settings: HostSettings,
    /// Shared line reader so buffered input is never dropped between prompts.
    input: Mutex<BufReader<Stdin>>,
}

impl TerminalHost {
    /// Build a host from resolved settings.
    pub fn new(settings: HostSettings) -> Self {
        Self {
            settings,
            input: Mutex::new(BufReader::new(stdin())),
        }
    }

    /// Print `prompt` and read one trimmed line. End of input yields `None`.
    async fn ask(&self, prompt: &str) -> HostResult<Option<String>> {
        let mut out = stdout();
        out.write_all(prompt.as_bytes()).await?;
        out.flush().await?;
        let mut line = String::new();
        let n = self.input.lock().await.read_line(&mut line).await?;
        Ok((n > 0).then(|| line.trim().to_string()))
    }

    /// Run `program args...` in the base directory and return its stdout. A
    /// non-zero exit is an error carrying stderr.
    async fn run(&self, program: &str, args: &[&str]) -> HostResult<String> {
        debug!(program, ?args, "spawning");
        let output = Command::new(program)
            .args(args)
            .current_dir(&self.settings.base_dir)
            .output()
            .await
            .map_err(|e| HostError::Command {
                program: program.to_string(),
                detail: e.to_string(),
            })?;
        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = match stderr.trim() {
            "" => output.status.to_string(),
            s => s.to_string(),
        };
        Err(HostError::Command {
            program: program.to_string(),
            detail,
        })
    }
}

/// Render the lines of `text` worth showing for `line`/`highlight`, with
/// highlighted lines marked by `>`.
pub fn excerpt(text: &str, line: Option<u32>, highlight: Option<&Highlight>) -> String {
    let total = u32::try_from(text.lines().count()).unwrap_or(u32::MAX);
    let (first, last) = match (line, highlight) {
        (_, Some(h)) => (
            h.start_line.saturating_sub(EXCERPT_CONTEXT).max(1),
            h.end_line.saturating_add(EXCERPT_CONTEXT),
        ),
        (Some(l), None) => (
            l.saturating_sub(EXCERPT_CONTEXT).max(1),
            l.saturating_add(EXCERPT_CONTEXT),
        ),
        (None, None) => (1, EXCERPT_HEAD),
    };
    let last = last.min(total);
    let width = last.to_string().len();
    let mut out = String::new();
    for (n, l) in (1..).zip(text.lines()) {
        if n < first || n > last {
            continue;
        }
        let marked = highlight.is_some_and(|h| (h.start_line..=h.end_line).contains(&n))
            || (highlight.is_none() && Some(n) == line);
        let mark = if marked { '>' } else { ' ' };
        out.push_str(&format!("{mark} {n:>width$} | {l}\n"));
    }
    out
}

/// Text shown for a quiz view.
pub fn render_quiz(view: &QuizView) -> String {
    let mut out = format!("? {}\n", view.question);
    for (i, a) in view.answers.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, a.display()));
    }
    out
}

#[async_trait]
impl Host for TerminalHost {
    async fn open_file(
        &self,
        path: &str,
        line: Option<u32>,
        highlight: Option<&Highlight>,
    ) -> HostResult<()> {
        let full = self.settings.resolve(path);
        let text = fs::read_to_string(&full)
            .await
            .map_err(|e| HostError::Msg(format!("cannot open {}: {e}", full.display())))?;
        info!(path = %full.display(), "opened file");
        println!("── {path} ──");
        print!("{}", excerpt(&text, line, highlight));
        Ok(())
    }

    async fn close_file(&self, path: &str) -> HostResult<()> {
        println!("── closed {path} ──");
        Ok(())
    }

    async fn show_dialog(&self, message: &str, severity: Severity) -> HostResult<()> {
        let tag = match severity {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        println!("[{tag}] {message}");
        Ok(())
    }

    async fn apply_diff(&self, diff_path: &str, action: DiffAction) -> HostResult<()> {
        let full = self.settings.resolve(diff_path);
        let patch = full.to_string_lossy();
        match action {
            DiffAction::Apply => {
                self.run("git", &["apply", &patch]).await?;
            }
            DiffAction::Preview => {
                let stat = self
                    .run("git", &["apply", "--check", "--stat", &patch])
                    .await?;
                print!("{stat}");
            }
        }
        println!("{} {diff_path}", action.as_str());
        Ok(())
    }

    async fn revert_diff(&self, diff_path: &str) -> HostResult<()> {
        let full = self.settings.resolve(diff_path);
        self.run("git", &["apply", "-R", &full.to_string_lossy()])
            .await?;
        println!("reverted {diff_path}");
        Ok(())
    }

    async fn play_sound(&self, path: &str) -> HostResult<()> {
        let full = self.settings.resolve(path);
        self.run(&self.settings.sound_player, &[&full.to_string_lossy()])
            .await?;
        Ok(())
    }

    async fn open_browser(
        &self,
        url: &str,
        browser_type: BrowserType,
        title: &str,
    ) -> HostResult<()> {
        match browser_type {
            BrowserType::Simple => println!("{title}: {url}"),
            BrowserType::External => {
                self.run(&self.settings.browser_opener, &[url]).await?;
            }
        }
        Ok(())
    }

    async fn choose_diff_action(
        &self,
        diff_path: &str,
        choices: &[DiffAction],
    ) -> HostResult<Option<DiffAction>> {
        println!("{diff_path}:");
        for (i, c) in choices.iter().enumerate() {
            println!("  {}. {}", i + 1, c.as_str());
        }
        let Some(answer) = self.ask("choose (empty to cancel): ").await? else {
            return Ok(None);
        };
        Ok(pick(&answer, choices))
    }

    async fn show_quiz(&self, view: &QuizView) -> HostResult<QuizSignal> {
        print!("{}", render_quiz(view));
        if view.is_revealed() {
            return Ok(QuizSignal::Close);
        }
        let answer = self.ask("r to reveal, enter to close: ").await?;
        Ok(match answer.as_deref() {
            Some("r" | "R") => QuizSignal::Reveal,
            _ => QuizSignal::Close,
        })
    }

    async fn report_error(&self, message: &str) {
        eprintln!("error: {message}");
    }
}

/// Match an answer by number or name against `choices`.
fn pick(answer: &str, choices: &[DiffAction]) -> Option<DiffAction> {
    if let Ok(n) = answer.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| choices.get(i)).copied();
    }
    choices
        .iter()
        .copied()
        .find(|c| c.as_str().eq_ignore_ascii_case(answer))
}
