use serde::Deserialize;

use crate::{
    BrowserItem, BrowserType, Configuration, DialogItem, DiffAction, DiffItem, DisplayMode, Error,
    FileItem, FolderItem, HighlightType, Item, ItemBase, ItemKind, ItemPath, QuizItem, Severity,
};

// ===== RAW DOCUMENT SHAPE =====

/// Document root as written by the user.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawConfiguration {
    pub title: String,
    pub items: Vec<RawItem>,
}

/// The closed set of item tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum RawKind {
    Title,
    File,
    Dialog,
    Folder,
    Diff,
    Quiz,
    Browser,
}

impl RawKind {
    /// Tag as written in the document.
    fn tag(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::File => "file",
            Self::Dialog => "dialog",
            Self::Folder => "folder",
            Self::Diff => "diff",
            Self::Quiz => "quiz",
            Self::Browser => "browser",
        }
    }

    /// Variant-specific fields accepted for this tag.
    fn allowed(self) -> &'static [&'static str] {
        match self {
            Self::Title => &[],
            Self::File => &[
                "path",
                "line",
                "highlightStartLine",
                "highlightEndLine",
                "highlightType",
                "highlightColor",
                "highlightDuration",
                "closeSoundPath",
            ],
            Self::Dialog => &["message", "severity"],
            Self::Folder => &["items", "folderIconColor", "folderLabelColor"],
            Self::Diff => &["diffPath", "action", "revertSoundPath"],
            Self::Quiz => &[
                "question",
                "correctAnswers",
                "wrongAnswers",
                "displayMode",
                "revealSoundPath",
            ],
            Self::Browser => &["url", "browserType", "title"],
        }
    }
}

/// Flat union of every item field. Structural typing is enforced by serde;
/// per-variant requirements are enforced by [`RawItem::into_item`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub(crate) struct RawItem {
    #[serde(rename = "type")]
    pub kind: RawKind,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub icon_color: Option<String>,
    #[serde(default)]
    pub label_color: Option<String>,
    #[serde(default)]
    pub sound_path: Option<String>,

    // file
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub highlight_start_line: Option<u32>,
    #[serde(default)]
    pub highlight_end_line: Option<u32>,
    #[serde(default)]
    pub highlight_type: Option<HighlightType>,
    #[serde(default)]
    pub highlight_color: Option<String>,
    #[serde(default)]
    pub highlight_duration: Option<u64>,
    #[serde(default)]
    pub close_sound_path: Option<String>,

    // dialog
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub severity: Option<Severity>,

    // folder
    #[serde(default)]
    pub items: Option<Vec<RawItem>>,
    #[serde(default)]
    pub folder_icon_color: Option<String>,
    #[serde(default)]
    pub folder_label_color: Option<String>,

    // diff
    #[serde(default)]
    pub diff_path: Option<String>,
    #[serde(default)]
    pub action: Option<DiffAction>,
    #[serde(default)]
    pub revert_sound_path: Option<String>,

    // quiz
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub correct_answers: Option<Vec<String>>,
    #[serde(default)]
    pub wrong_answers: Option<Vec<String>>,
    #[serde(default)]
    pub display_mode: Option<DisplayMode>,
    #[serde(default)]
    pub reveal_sound_path: Option<String>,

    // browser
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub browser_type: Option<BrowserType>,
    #[serde(default)]
    pub title: Option<String>,
}

// ===== VALIDATION =====

/// Take a required field or produce a schema error naming it.
fn required<T>(value: Option<T>, kind: RawKind, field: &str, at: &ItemPath) -> Result<T, Error> {
    value.ok_or_else(|| {
        Error::schema(
            at.describe(),
            format!("{} item is missing required field `{}`", kind.tag(), field),
        )
    })
}

/// Reject 1-based line numbers of zero.
fn positive(value: Option<u32>, field: &str, at: &ItemPath) -> Result<Option<u32>, Error> {
    match value {
        Some(0) => Err(Error::schema(
            at.describe(),
            format!("`{}` must be a positive line number", field),
        )),
        v => Ok(v),
    }
}

impl RawConfiguration {
    /// Validate the raw document into a typed configuration.
    pub fn into_configuration(self) -> Result<Configuration, Error> {
        let items = convert_all(self.items, &ItemPath::root())?;
        Ok(Configuration {
            title: self.title,
            items,
        })
    }
}

/// Convert a list of raw items rooted at `parent`.
fn convert_all(items: Vec<RawItem>, parent: &ItemPath) -> Result<Vec<Item>, Error> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, raw)| raw.into_item(&parent.child(i as u32)))
        .collect()
}

impl RawItem {
    /// Variant-specific fields present on this entry, by document name.
    fn present_fields(&self) -> Vec<&'static str> {
        let fields = [
            ("path", self.path.is_some()),
            ("line", self.line.is_some()),
            ("highlightStartLine", self.highlight_start_line.is_some()),
            ("highlightEndLine", self.highlight_end_line.is_some()),
            ("highlightType", self.highlight_type.is_some()),
            ("highlightColor", self.highlight_color.is_some()),
            ("highlightDuration", self.highlight_duration.is_some()),
            ("closeSoundPath", self.close_sound_path.is_some()),
            ("message", self.message.is_some()),
            ("severity", self.severity.is_some()),
            ("items", self.items.is_some()),
            ("folderIconColor", self.folder_icon_color.is_some()),
            ("folderLabelColor", self.folder_label_color.is_some()),
            ("diffPath", self.diff_path.is_some()),
            ("action", self.action.is_some()),
            ("revertSoundPath", self.revert_sound_path.is_some()),
            ("question", self.question.is_some()),
            ("correctAnswers", self.correct_answers.is_some()),
            ("wrongAnswers", self.wrong_answers.is_some()),
            ("displayMode", self.display_mode.is_some()),
            ("revealSoundPath", self.reveal_sound_path.is_some()),
            ("url", self.url.is_some()),
            ("browserType", self.browser_type.is_some()),
            ("title", self.title.is_some()),
        ];
        fields
            .into_iter()
            .filter_map(|(name, set)| set.then_some(name))
            .collect()
    }

    /// Validate this entry (and any children) into a typed item located at `at`.
    pub fn into_item(self, at: &ItemPath) -> Result<Item, Error> {
        let kind = self.kind;
        let allowed = kind.allowed();
        if let Some(foreign) = self
            .present_fields()
            .into_iter()
            .find(|f| !allowed.contains(f))
        {
            return Err(Error::schema(
                at.describe(),
                format!("field `{}` is not valid on a {} item", foreign, kind.tag()),
            ));
        }

        let base = ItemBase {
            label: required(self.label, kind, "label", at)?,
            icon: self.icon,
            icon_color: self.icon_color,
            label_color: self.label_color,
            sound_path: self.sound_path,
        };

        let kind = match kind {
            RawKind::Title => ItemKind::Title,
            RawKind::File => {
                let highlight_start_line =
                    positive(self.highlight_start_line, "highlightStartLine", at)?;
                let highlight_end_line = positive(self.highlight_end_line, "highlightEndLine", at)?;
                if let (Some(start), Some(end)) = (highlight_start_line, highlight_end_line)
                    && end < start
                {
                    return Err(Error::schema(
                        at.describe(),
                        format!(
                            "highlightEndLine ({}) is before highlightStartLine ({})",
                            end, start
                        ),
                    ));
                }
                ItemKind::File(FileItem {
                    path: required(self.path, kind, "path", at)?,
                    line: positive(self.line, "line", at)?,
                    highlight_start_line,
                    highlight_end_line,
                    highlight_type: self.highlight_type,
                    highlight_color: self.highlight_color,
                    highlight_duration: self.highlight_duration,
                    close_sound_path: self.close_sound_path,
                })
            }
            RawKind::Dialog => ItemKind::Dialog(DialogItem {
                message: required(self.message, kind, "message", at)?,
                severity: self.severity.unwrap_or_default(),
            }),
            RawKind::Folder => {
                let children = required(self.items, kind, "items", at)?;
                ItemKind::Folder(FolderItem {
                    items: convert_all(children, at)?,
                    folder_icon_color: self.folder_icon_color,
                    folder_label_color: self.folder_label_color,
                })
            }
            RawKind::Diff => ItemKind::Diff(DiffItem {
                diff_path: required(self.diff_path, kind, "diffPath", at)?,
                action: self.action,
                revert_sound_path: self.revert_sound_path,
            }),
            RawKind::Quiz => {
                let correct_answers = required(self.correct_answers, kind, "correctAnswers", at)?;
                if correct_answers.is_empty() {
                    return Err(Error::schema(
                        at.describe(),
                        "quiz item needs at least one entry in `correctAnswers`",
                    ));
                }
                ItemKind::Quiz(QuizItem {
                    question: required(self.question, kind, "question", at)?,
                    correct_answers,
                    wrong_answers: required(self.wrong_answers, kind, "wrongAnswers", at)?,
                    display_mode: self.display_mode.unwrap_or_default(),
                    reveal_sound_path: self.reveal_sound_path,
                })
            }
            RawKind::Browser => ItemKind::Browser(BrowserItem {
                url: required(self.url, kind, "url", at)?,
                browser_type: self.browser_type.unwrap_or_default(),
                title: self.title,
            }),
        };

        Ok(Item { base, kind })
    }
}
