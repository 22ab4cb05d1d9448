use std::{io, result::Result as StdResult};

use config::ItemPath;
use thiserror::Error;

/// Convenient result type for the engine crate.
pub type Result<T> = StdResult<T, Error>;

/// Result type returned by [`crate::Host`] calls.
pub type HostResult<T> = StdResult<T, HostError>;

/// Unified error type for the walkthru engine.
#[derive(Debug, Error)]
pub enum Error {
    /// The walkthrough document failed to load.
    #[error(transparent)]
    Config(#[from] config::Error),

    /// An activation named a path that does not resolve to an item.
    #[error("No item at path {0}")]
    ItemNotFound(ItemPath),

    /// An activation was requested while nothing is loaded.
    #[error("No walkthrough loaded")]
    NotLoaded,
}

/// Failure raised by a host while executing an effect.
#[derive(Debug, Error)]
pub enum HostError {
    /// I/O failure talking to the editor or a child process.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A spawned helper exited unsuccessfully.
    #[error("{program} failed: {detail}")]
    Command {
        /// Program that was run.
        program: String,
        /// Exit status or captured stderr.
        detail: String,
    },

    /// Generic failure with context.
    #[error("{0}")]
    Msg(String),
}
