//! Unified error type for the lsm-console library.
//!
//! This module provides a single [`ConsoleError`] type that encompasses all
//! errors that can occur outside the classification layer. Service-level
//! failures (non-success HTTP statuses) are not errors here — they are
//! classified outcomes (see [`crate::classify`]) so callers can render them.

use thiserror::Error;

use crate::config::ConfigError;

/// Unified error type for console operations.
///
/// Transport failures cover everything the service never answered: connection
/// refusal, timeouts, and unparseable bodies. A reply with a non-success
/// status is *not* a `ConsoleError`; it classifies as an error outcome.
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// Network or body-decoding failure on the way to or from the service.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Configuration loading or parsing failure.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A [`Result`] type alias using the unified [`ConsoleError`] type.
pub type Result<T> = std::result::Result<T, ConsoleError>;

impl ConsoleError {
    /// Returns `true` if this is a transport-level failure.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
