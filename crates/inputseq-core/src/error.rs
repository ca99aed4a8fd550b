#![forbid(unsafe_code)]

//! Error type shared by the sequence automaton, token parsing, and construction.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SequenceError>;

/// Caller contract violations. Resets are not errors and never show up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("success record index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("token {token} at position {position} is not part of the channel's token universe")]
    TokenOutsideUniverse { position: usize, token: String },

    #[error("unknown token name: {name:?}")]
    UnknownToken { name: String },
}

impl SequenceError {
    #[must_use]
    pub fn unknown_token(name: impl Into<String>) -> Self {
        Self::UnknownToken { name: name.into() }
    }
}
