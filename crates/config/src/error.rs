//! Error types for walkthrough loading and validation.

use std::{
    cmp::{max, min},
    fmt::Write as _,
    path::{Path, PathBuf},
};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors produced while loading, parsing, or validating a walkthrough document.
pub enum Error {
    #[error("{message}")]
    /// I/O or filesystem read error.
    Read {
        /// Optional path associated with the read error.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
    #[error("{message}")]
    /// The document is not well-formed JSON.
    Parse {
        /// Optional path associated with the parse error.
        path: Option<PathBuf>,
        /// 1-based line number.
        line: usize,
        /// 1-based column number.
        col: usize,
        /// Human-readable error message.
        message: String,
        /// Rendered excerpt including a caret at the error location.
        excerpt: String,
    },
    #[error("{message}")]
    /// The document is well-formed but does not match the item schema.
    Schema {
        /// Optional path associated with the schema error.
        path: Option<PathBuf>,
        /// Location of the offending item inside the document, e.g. `items[1].items[0]`.
        item: Option<String>,
        /// Optional 1-based line number.
        line: Option<usize>,
        /// Optional 1-based column number.
        col: Option<usize>,
        /// Human-readable error message.
        message: String,
        /// Optional excerpt including a caret at the error location.
        excerpt: Option<String>,
    },
}

impl Error {
    /// Render a human-friendly error message including location and an excerpt when available.
    pub fn pretty(&self) -> String {
        match self {
            Self::Read { path, message } => match path {
                Some(p) => format!("Read error at {}: {}", p.display(), message),
                None => format!("Read error: {}", message),
            },
            Self::Parse {
                path,
                line,
                col,
                message,
                excerpt,
            } => match path {
                Some(p) => format!(
                    "Walkthrough parse error at {}:{}:{}\n{}\n{}",
                    p.display(),
                    line,
                    col,
                    message,
                    excerpt
                ),
                None => format!(
                    "Walkthrough parse error at line {}, column {}\n{}\n{}",
                    line, col, message, excerpt
                ),
            },
            Self::Schema {
                path,
                item,
                line,
                col,
                message,
                excerpt,
            } => {
                let mut loc = match (line, col) {
                    (Some(l), Some(c)) => format!("{}:{}", l, c),
                    (Some(l), None) => format!("{}", l),
                    _ => String::new(),
                };
                if let Some(item) = item {
                    if !loc.is_empty() {
                        loc.push(' ');
                    }
                    loc.push_str(&format!("({})", item));
                }
                let head = match (path, loc.is_empty()) {
                    (Some(p), false) => format!("Walkthrough schema error at {}:{}", p.display(), loc),
                    (Some(p), true) => format!("Walkthrough schema error at {}", p.display()),
                    (None, false) => format!("Walkthrough schema error at {}", loc),
                    (None, true) => "Walkthrough schema error".to_string(),
                };
                match excerpt {
                    Some(ex) => format!("{}\n{}\n{}", head, message, ex),
                    None => format!("{}\n{}", head, message),
                }
            }
        }
    }

    /// Access the optional path attached to this error.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Schema { path, .. } => {
                path.as_deref()
            }
        }
    }

    /// Attach a file path to an error produced from in-memory text.
    pub(crate) fn with_path(mut self, file: Option<&Path>) -> Self {
        let file = file.map(Path::to_path_buf);
        match &mut self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Schema { path, .. } => {
                *path = file;
            }
        }
        self
    }

    /// True for malformed documents, false for schema violations and read failures.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// True for documents that parse but do not match the item schema.
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }

    /// Build a schema error for the item at `item` (no source location).
    pub(crate) fn schema(item: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Schema {
            path: None,
            item: Some(item.into()),
            line: None,
            col: None,
            message: message.into(),
            excerpt: None,
        }
    }
}

/// Build a small 2–3 line excerpt with a caret at `(line_no, col_no)`.
pub fn excerpt_at(source: &str, line_no: usize, col_no: usize) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let total = lines.len();
    let start = max(1usize, line_no.saturating_sub(2));
    let end = min(total, line_no + 1);

    let mut out = String::new();
    for n in start..=end {
        let text = lines.get(n - 1).copied().unwrap_or("");
        let _ignored = writeln!(out, " {:>4} | {}", n, text);
        if n == line_no {
            let prefix = format!(" {:>4} | ", n);
            let _ignored = writeln!(
                out,
                "{}{}^",
                " ".repeat(prefix.len()),
                " ".repeat(col_no.saturating_sub(1))
            );
        }
    }
    out
}
