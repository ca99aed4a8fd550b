#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature the crate-root `trace!` and `debug!` macros
//! are the `tracing` macros. Without it they expand to nothing, so call
//! sites never need their own `#[cfg]` guards.
//!
//! Diagnostic targets:
//!
//! | Target | Emitted by |
//! |--------|------------|
//! | `inputseq::sequence` | [`InputSequence`](crate::sequence::InputSequence) steps, resets, completion |
//! | `inputseq::sequence_set` | [`SequenceSet`](crate::sequence_set::SequenceSet) synchronization |

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

/// Install a JSON `tracing` subscriber filtered by `RUST_LOG`.
///
/// Falls back to `inputseq=info` when `RUST_LOG` is unset or invalid. Returns
/// `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("inputseq=info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
