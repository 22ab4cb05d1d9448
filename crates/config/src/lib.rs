//! Walkthrough document model: typed items, parsing, and decoration resolution.
#![allow(missing_docs)]

use std::{
    env,
    path::{Path, PathBuf},
};

mod error;
mod item;
mod loader;
mod path;
mod raw;
mod resolve;

#[cfg(test)]
mod test_parse;
#[cfg(test)]
mod test_resolve;

pub use error::{Error, excerpt_at};
pub use item::{
    BrowserItem, BrowserType, Configuration, DialogItem, DiffAction, DiffItem, DisplayMode,
    FileItem, FolderItem, HighlightType, Item, ItemBase, ItemKind, QuizItem, Severity,
};
pub use loader::{load_from_path, load_from_str};
pub use path::{ItemPath, ParsePathError};
pub use resolve::{Decoration, Inherited, ResolvedItem, resolve, resolve_tree};

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_FILE_NAME: &str = "walkthru.json";

/// Determine the default walkthrough path (`./walkthru.json`).
pub fn default_config_path() -> PathBuf {
    let mut p = env::current_dir().unwrap_or_default();
    p.push(DEFAULT_FILE_NAME);
    p
}

/// Resolve the effective walkthrough path using the default policy.
///
/// Policy:
/// 1) Use `explicit` when provided.
/// 2) Else use `./walkthru.json` when it exists.
/// 3) Else return a clear "no walkthrough found" error.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, Error> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let preferred = default_config_path();
    if preferred.exists() {
        return Ok(preferred);
    }

    Err(Error::Read {
        path: Some(preferred),
        message: format!(
            "No walkthrough found. Pass a path or create {} in the working directory",
            DEFAULT_FILE_NAME
        ),
    })
}
