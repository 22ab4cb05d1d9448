//! Parse and load walkthrough documents.

use std::{ffi::OsStr, fs, path::Path};

use serde_json::error::Category;
use tracing::debug;

use crate::{Configuration, Error, error::excerpt_at, raw::RawConfiguration};

/// Load a `Configuration` from a JSON file at `path`.
pub fn load_from_path(path: &Path) -> Result<Configuration, Error> {
    if path.extension() != Some(OsStr::new("json")) {
        return Err(Error::Read {
            path: Some(path.to_path_buf()),
            message: "Unsupported walkthrough format (expected a .json file)".to_string(),
        });
    }
    let source = fs::read_to_string(path).map_err(|e| Error::Read {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })?;
    load_from_str(&source, Some(path))
}

/// Load a `Configuration` from in-memory JSON `source`. `path` is only used to
/// label errors.
pub fn load_from_str(source: &str, path: Option<&Path>) -> Result<Configuration, Error> {
    let raw: RawConfiguration =
        serde_json::from_str(source).map_err(|e| error_from_json(source, &e, path))?;
    let cfg = raw.into_configuration().map_err(|e| e.with_path(path))?;
    debug!(title = %cfg.title, items = cfg.len(), "walkthrough parsed");
    Ok(cfg)
}

/// Split serde_json's message from its trailing ` at line L column C`.
fn bare_message(err: &serde_json::Error) -> String {
    let full = err.to_string();
    match full.rsplit_once(" at line ") {
        Some((msg, _)) => msg.to_string(),
        None => full,
    }
}

/// Map a serde_json failure onto the parse/schema taxonomy.
fn error_from_json(source: &str, err: &serde_json::Error, path: Option<&Path>) -> Error {
    let (line, col) = (err.line(), err.column());
    let message = bare_message(err);
    match err.classify() {
        Category::Io => Error::Read {
            path: path.map(Path::to_path_buf),
            message,
        },
        Category::Syntax | Category::Eof => Error::Parse {
            path: path.map(Path::to_path_buf),
            line,
            col,
            message,
            excerpt: excerpt_at(source, line, col),
        },
        Category::Data => Error::Schema {
            path: path.map(Path::to_path_buf),
            item: None,
            line: (line > 0).then_some(line),
            col: (line > 0).then_some(col),
            message,
            excerpt: (line > 0).then(|| excerpt_at(source, line, col)),
        },
    }
}
