// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error type.
//!
//! Only caller contract violations and infrastructure failures surface here.
//! Stale handles (cancelling a message that is gone, tapping a surface that
//! was already torn down) are silent no-ops and never produce an [`Error`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// An auto-dismissing message was requested with a zero, negative or
    /// non-finite duration.
    #[error("Invalid duration: {0}s (auto-dismissing messages need a positive duration)")]
    InvalidDuration(f64),

    /// The driver task owning the scheduler is no longer running.
    #[error("Message bar is not running")]
    Closed,

    /// The shared instance was requested outside of a Tokio runtime.
    #[error("No Tokio runtime available to drive the message bar")]
    NoRuntime,

    /// A shared instance has already been installed for this process.
    #[error("Shared message bar is already installed")]
    AlreadyInstalled,

    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config Error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
