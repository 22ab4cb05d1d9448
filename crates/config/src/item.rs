//! Typed walkthrough items.
//!
//! A [`Configuration`] is an ordered list of [`Item`]s. Every item shares an
//! [`ItemBase`] (label, icon, colors, sound) and carries exactly one
//! [`ItemKind`]. Folders are the only items with children.

use serde::{Deserialize, Serialize};

use crate::ItemPath;

/// A fully parsed walkthrough document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    /// Title shown above the outline.
    pub title: String,
    /// Top-level items in display order.
    pub items: Vec<Item>,
}

impl Configuration {
    /// Look up the item at `path`. Returns `None` for the root path or when any
    /// step is out of range or descends through a non-folder.
    pub fn get(&self, path: &ItemPath) -> Option<&Item> {
        let (first, rest) = path.indices().split_first()?;
        let mut cur = self.items.get(*first as usize)?;
        for idx in rest {
            cur = cur.children()?.get(*idx as usize)?;
        }
        Some(cur)
    }

    /// Total number of items in the tree, folders included.
    pub fn len(&self) -> usize {
        fn count(items: &[Item]) -> usize {
            items
                .iter()
                .map(|i| 1 + i.children().map(count).unwrap_or(0))
                .sum()
        }
        count(&self.items)
    }

    /// True when the configuration has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Attributes shared by every item type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBase {
    /// Text shown in the outline.
    pub label: String,
    /// Explicit icon name; overrides the type default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Explicit icon color; overrides anything inherited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_color: Option<String>,
    /// Explicit label color; overrides anything inherited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_color: Option<String>,
    /// Sound played when the item is activated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound_path: Option<String>,
}

/// One node of the walkthrough tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    /// Shared attributes.
    #[serde(flatten)]
    pub base: ItemBase,
    /// Type-specific payload.
    #[serde(flatten)]
    pub kind: ItemKind,
}

impl Item {
    /// Construct an item from its parts.
    pub fn new(label: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            base: ItemBase {
                label: label.into(),
                ..ItemBase::default()
            },
            kind,
        }
    }

    /// The item label.
    pub fn label(&self) -> &str {
        &self.base.label
    }

    /// Children of a folder, `None` for leaves.
    pub fn children(&self) -> Option<&[Item]> {
        match &self.kind {
            ItemKind::Folder(f) => Some(&f.items),
            _ => None,
        }
    }

    /// True for folder items.
    pub fn is_folder(&self) -> bool {
        matches!(self.kind, ItemKind::Folder(_))
    }

    /// Context value exposed to hosts for menu selection; equal to the type tag.
    pub fn context_value(&self) -> &'static str {
        self.kind.tag()
    }
}

/// Type-specific item payload, discriminated by the document's `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemKind {
    /// A section heading; may play a sound on activation.
    Title,
    /// Open a file, optionally at a line with a highlight.
    File(FileItem),
    /// Show a message dialog.
    Dialog(DialogItem),
    /// A group of child items.
    Folder(FolderItem),
    /// Apply or preview a patch.
    Diff(DiffItem),
    /// Ask a multiple-choice question.
    Quiz(QuizItem),
    /// Open a web page.
    Browser(BrowserItem),
}

impl ItemKind {
    /// The document tag for this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::File(_) => "file",
            Self::Dialog(_) => "dialog",
            Self::Folder(_) => "folder",
            Self::Diff(_) => "diff",
            Self::Quiz(_) => "quiz",
            Self::Browser(_) => "browser",
        }
    }

    /// Icon used when the item does not name one.
    pub fn default_icon(&self) -> &'static str {
        match self {
            Self::Title => "event-marker",
            Self::File(_) => "file",
            Self::Dialog(_) => "message",
            Self::Folder(_) => "folder",
            Self::Diff(_) => "change-set",
            Self::Quiz(_) => "question",
            Self::Browser(_) => "globe",
        }
    }
}

/// How a file highlight is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightType {
    /// A background decoration over the lines.
    #[default]
    Decoration,
    /// An editor selection over the lines.
    Selection,
}

/// Payload for `file` items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileItem {
    /// Path of the file to open.
    pub path: String,
    /// 1-based line to reveal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    /// 1-based first highlighted line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_start_line: Option<u32>,
    /// 1-based last highlighted line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_end_line: Option<u32>,
    /// Highlight style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_type: Option<HighlightType>,
    /// Highlight color for decorations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_color: Option<String>,
    /// Highlight lifetime in milliseconds; 0 keeps it until closed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_duration: Option<u64>,
    /// Sound played when the file is closed from the outline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_sound_path: Option<String>,
}

/// Dialog severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message.
    #[default]
    Info,
    /// Warning message.
    Warning,
    /// Error message.
    Error,
}

/// Payload for `dialog` items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogItem {
    /// Text of the dialog.
    pub message: String,
    /// Severity; info when absent.
    pub severity: Severity,
}

/// Payload for `folder` items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderItem {
    /// Children in display order.
    pub items: Vec<Item>,
    /// Icon color applied to the folder and inherited by its descendants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_icon_color: Option<String>,
    /// Label color applied to the folder and inherited by its descendants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_label_color: Option<String>,
}

/// What to do with a patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffAction {
    /// Apply the patch to the working tree.
    Apply,
    /// Check the patch without changing anything.
    Preview,
}

impl DiffAction {
    /// The two choices offered when a diff item leaves the action open.
    pub const CHOICES: [Self; 2] = [Self::Apply, Self::Preview];

    /// Short name for prompts and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Apply => "apply",
            Self::Preview => "preview",
        }
    }
}

/// Payload for `diff` items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffItem {
    /// Path of the patch file.
    pub diff_path: String,
    /// Fixed action; when absent the user is asked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<DiffAction>,
    /// Sound played when the patch is reverted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revert_sound_path: Option<String>,
}

/// How a quiz is presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Embedded page.
    #[default]
    Webview,
    /// Selection menu.
    Menu,
    /// Modal dialog.
    Dialog,
}

/// Payload for `quiz` items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizItem {
    /// The question text.
    pub question: String,
    /// Answers marked correct on reveal; never empty.
    pub correct_answers: Vec<String>,
    /// Answers marked wrong on reveal.
    pub wrong_answers: Vec<String>,
    /// Presentation mode.
    pub display_mode: DisplayMode,
    /// Sound played when answers are revealed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reveal_sound_path: Option<String>,
}

/// Where a browser item opens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserType {
    /// The host's built-in browser view.
    #[default]
    Simple,
    /// The system browser.
    External,
}

/// Payload for `browser` items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserItem {
    /// Address to open.
    pub url: String,
    /// Browser selection.
    pub browser_type: BrowserType,
    /// Page title; the item label is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}
