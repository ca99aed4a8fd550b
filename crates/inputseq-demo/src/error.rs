use inputseq_core::SequenceError;
use inputseq_core::event::KeyCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("invalid gesture: {0}")]
    Gesture(#[from] SequenceError),

    #[error("gesture `{0}` has no keys")]
    EmptyGesture(String),

    #[error("`{0}` quits the demo and cannot be part of a gesture")]
    ReservedKey(KeyCode),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl DemoError {
    /// Process exit code: 2 for bad arguments, 1 for runtime failures.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Gesture(_) | Self::EmptyGesture(_) | Self::ReservedKey(_) => 2,
            Self::Io(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, DemoError>;
