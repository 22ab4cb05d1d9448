//! Tree paths identifying items by position.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Position of an item in the walkthrough tree: one child index per level,
/// starting at the root item list. The empty path denotes the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemPath {
    /// Indices into the enclosing item list for each descent step.
    path: Vec<u32>,
}

impl ItemPath {
    /// The root path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Construct a path from explicit indices.
    pub fn new(path: Vec<u32>) -> Self {
        Self { path }
    }

    /// A new path one level below this one.
    pub fn child(&self, idx: u32) -> Self {
        let mut path = self.path.clone();
        path.push(idx);
        Self { path }
    }

    /// Borrow the index steps.
    pub fn indices(&self) -> &[u32] {
        &self.path
    }

    /// True for the root path.
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Document-style location such as `items[1].items[0]`, used in error messages.
    pub fn describe(&self) -> String {
        self.path
            .iter()
            .map(|i| format!("items[{}]", i))
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for ItemPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.path.iter().map(u32::to_string).collect();
        f.write_str(&parts.join("."))
    }
}

/// Error returned when a dotted path such as `0.2.1` cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid item path '{0}': expected dot-separated indices like 0.2.1")]
pub struct ParsePathError(pub String);

impl FromStr for ItemPath {
    type Err = ParsePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::root());
        }
        s.split('.')
            .map(|part| part.parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
            .map_err(|_| ParsePathError(s.to_string()))
    }
}
