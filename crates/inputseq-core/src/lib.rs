// Forbid unsafe in production; deny (with targeted allows) in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: ordered input-sequence recognition.
//!
//! # Role in inputseq
//! `inputseq-core` decides when a user has entered a predefined token sequence
//! (a combo, a cheat code, an unlock gesture) correctly and in order. What
//! happens on completion is up to the host, which only observes
//! [`is_complete`](sequence::InputSequence::is_complete).
//!
//! # Primary responsibilities
//! - **InputSequence**: the single-channel matching automaton.
//! - **SequenceSet**: one lifecycle for the same gesture on several channels.
//! - **Accessible**: forgiving input (no reset on wrong input) per sequence or
//!   per set.
//! - **InputFrame**: per-step latch of edge-triggered keyboard and gamepad
//!   input, usable as the token source.
//!
//! # How it fits in the system
//! The host owns polling. Once per tick it records events into an
//! [`InputFrame`](frame::InputFrame) (or any [`TokenSource`](token::TokenSource)),
//! calls `update` on every top-level sequence or set, then ends the step.
//! Nothing here runs on its own schedule, blocks, or spawns threads.

pub mod accessibility;
pub mod config;
pub mod error;
pub mod event;
pub mod frame;
pub mod logging;
pub mod matchable;
pub mod progress;
pub mod sequence;
pub mod sequence_set;
pub mod token;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace};

pub use accessibility::Accessible;
pub use config::SequenceConfig;
pub use error::{Result, SequenceError};
pub use frame::{InputFrame, StepLatch};
pub use matchable::MatchableSequence;
pub use sequence::{GamepadSequence, InputSequence, KeySequence};
pub use sequence_set::SequenceSet;
pub use token::{Token, TokenSource, TokenUniverse};
