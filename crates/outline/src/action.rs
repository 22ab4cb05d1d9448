//! Mapping from items to the effects they trigger.

use config::{BrowserType, DiffAction, HighlightType, Item, ItemKind, QuizItem, Severity};

/// Line range to highlight after a file opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    /// First highlighted line (1-based).
    pub start_line: u32,
    /// Last highlighted line (1-based, inclusive).
    pub end_line: u32,
    /// Decoration or selection.
    pub style: HighlightType,
    /// Decoration color, when given.
    pub color: Option<String>,
    /// Lifetime in milliseconds; 0 keeps it until the file closes.
    pub duration_ms: u64,
}

/// Whether a diff action is fixed by the document or must be asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffChoice {
    /// The document names the action.
    Decided(DiffAction),
    /// The user picks one of these before anything runs.
    Prompt([DiffAction; 2]),
}

/// Effect to execute when a node is activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionDescriptor {
    /// Load a walkthrough document (bootstrap node).
    LoadConfiguration,
    /// Play a sound file.
    PlaySound {
        /// Sound file path.
        path: String,
    },
    /// Open a file, optionally revealing a line and highlighting a range.
    OpenFile {
        /// File path.
        path: String,
        /// Line to reveal.
        line: Option<u32>,
        /// Highlight to apply.
        highlight: Option<Highlight>,
    },
    /// Close a previously opened file.
    CloseFile {
        /// File path.
        path: String,
        /// Sound to play after closing.
        sound: Option<String>,
    },
    /// Show a message.
    ShowDialog {
        /// Message text.
        message: String,
        /// Message severity.
        severity: Severity,
    },
    /// Apply or preview a patch.
    ApplyDiff {
        /// Patch path.
        diff_path: String,
        /// Fixed action or a prompt.
        choice: DiffChoice,
    },
    /// Undo a previously applied patch.
    RevertDiff {
        /// Patch path.
        diff_path: String,
        /// Sound to play after reverting.
        sound: Option<String>,
    },
    /// Start a quiz session.
    RunQuiz(QuizItem),
    /// Open a web page.
    OpenBrowser {
        /// Address.
        url: String,
        /// Built-in or system browser.
        browser_type: BrowserType,
        /// Page title.
        title: String,
    },
}

impl ActionDescriptor {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadConfiguration => "load_configuration",
            Self::PlaySound { .. } => "play_sound",
            Self::OpenFile { .. } => "open_file",
            Self::CloseFile { .. } => "close_file",
            Self::ShowDialog { .. } => "show_dialog",
            Self::ApplyDiff { .. } => "apply_diff",
            Self::RevertDiff { .. } => "revert_diff",
            Self::RunQuiz(_) => "run_quiz",
            Self::OpenBrowser { .. } => "open_browser",
        }
    }
}

/// The primary action for `item`. Folders (expand only) and titles without a
/// sound have none.
pub fn action_for(item: &Item) -> Option<ActionDescriptor> {
    match &item.kind {
        ItemKind::Title => item
            .base
            .sound_path
            .clone()
            .map(|path| ActionDescriptor::PlaySound { path }),
        ItemKind::File(f) => Some(ActionDescriptor::OpenFile {
            path: f.path.clone(),
            line: f.line,
            highlight: f.highlight_start_line.map(|start_line| Highlight {
                start_line,
                end_line: f.highlight_end_line.unwrap_or(start_line),
                style: f.highlight_type.unwrap_or_default(),
                color: f.highlight_color.clone(),
                duration_ms: f.highlight_duration.unwrap_or(0),
            }),
        }),
        ItemKind::Dialog(d) => Some(ActionDescriptor::ShowDialog {
            message: d.message.clone(),
            severity: d.severity,
        }),
        ItemKind::Folder(_) => None,
        ItemKind::Diff(d) => Some(ActionDescriptor::ApplyDiff {
            diff_path: d.diff_path.clone(),
            choice: match d.action {
                Some(a) => DiffChoice::Decided(a),
                None => DiffChoice::Prompt(DiffAction::CHOICES),
            },
        }),
        ItemKind::Quiz(q) => Some(ActionDescriptor::RunQuiz(q.clone())),
        ItemKind::Browser(b) => Some(ActionDescriptor::OpenBrowser {
            url: b.url.clone(),
            browser_type: b.browser_type,
            title: b.title.clone().unwrap_or_else(|| item.base.label.clone()),
        }),
    }
}

/// The context-menu action for `item`: close for files, revert for diffs.
pub fn context_action_for(item: &Item) -> Option<ActionDescriptor> {
    match &item.kind {
        ItemKind::File(f) => Some(ActionDescriptor::CloseFile {
            path: f.path.clone(),
            sound: f.close_sound_path.clone(),
        }),
        ItemKind::Diff(d) => Some(ActionDescriptor::RevertDiff {
            diff_path: d.diff_path.clone(),
            sound: d.revert_sound_path.clone(),
        }),
        _ => None,
    }
}
