#![forbid(unsafe_code)]

//! Single-channel sequence matching.
//!
//! [`InputSequence`] is the automaton that tracks progress through an ordered
//! token list for one channel. The host calls [`update`](InputSequence::update)
//! once per step with that step's [`TokenSource`]; the sequence never polls on
//! its own schedule.
//!
//! # State Machine
//!
//! ```text
//!                 expected token            expected token (last)
//!  ┌──────────┐ ───────────────▶ ┌──────┐ ─────────────────────▶ ┌───────────┐
//!  │ index 0  │                  │ k    │                        │ Completed │
//!  └──────────┘ ◀─────────────── └──────┘                        └───────────┘
//!       ▲         other token         │ nothing pressed                │
//!       │         (auto-reset on)     └─────────▶ stays at k           │
//!       └──────────────────────────── reset() ◀─────────────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. `0 <= progress <= len`; the success record always has `len` entries.
//! 2. A correct input advances progress by exactly one.
//! 3. Idle steps (nothing activated on the channel) never change state.
//! 4. With auto-reset on, any other token of the universe resets to 0.
//! 5. With auto-reset off, wrong inputs never change state.
//! 6. Once complete, `update` is a no-op until `reset`.
//! 7. A zero-length sequence never progresses and never completes on its own.
//!
//! # Example
//!
//! ```
//! use inputseq_core::event::KeyCode;
//! use inputseq_core::frame::StepLatch;
//! use inputseq_core::sequence::InputSequence;
//!
//! let mut seq = InputSequence::new([KeyCode::Char('a'), KeyCode::Char('b')]);
//!
//! seq.update(&StepLatch::from_iter([KeyCode::Char('a')]));
//! assert_eq!(seq.progress(), 1);
//!
//! // Wrong key: back to the start.
//! seq.update(&StepLatch::from_iter([KeyCode::Char('z')]));
//! assert_eq!(seq.progress(), 0);
//! ```

use std::fmt;
use std::ops::Index;

use crate::accessibility::Accessible;
use crate::config::SequenceConfig;
use crate::error::{Result, SequenceError};
use crate::event::{GamepadButton, KeyCode};
use crate::matchable::MatchableSequence;
use crate::progress::{Advance, Progress};
use crate::token::{Token, TokenSource, TokenUniverse};
use crate::{debug, trace};

/// Keyboard-channel sequence.
pub type KeySequence = InputSequence<KeyCode>;

/// Gamepad-channel sequence.
pub type GamepadSequence = InputSequence<GamepadButton>;

/// Matching automaton for one ordered token list on one channel.
#[derive(Debug, Clone)]
pub struct InputSequence<T> {
    name: Option<String>,
    tokens: Vec<T>,
    universe: TokenUniverse<T>,
    progress: Progress,
    config: SequenceConfig,
}

impl<T: Token> InputSequence<T> {
    /// Sequence over an open universe with default configuration.
    ///
    /// Any activity the source reports on the channel counts as input.
    #[must_use]
    pub fn new(tokens: impl IntoIterator<Item = T>) -> Self {
        let tokens: Vec<T> = tokens.into_iter().collect();
        Self {
            name: None,
            progress: Progress::new(tokens.len()),
            tokens,
            universe: TokenUniverse::Open,
            config: SequenceConfig::default(),
        }
    }

    /// Sequence restricted to an explicit token universe.
    ///
    /// Fails if a token of the sequence is not part of the universe, since
    /// such a sequence could never be completed.
    pub fn with_universe(
        tokens: impl IntoIterator<Item = T>,
        universe: TokenUniverse<T>,
    ) -> Result<Self> {
        let mut seq = Self::new(tokens);
        if let Some((position, token)) = seq
            .tokens
            .iter()
            .enumerate()
            .find(|&(_, &token)| !universe.contains(token))
        {
            return Err(SequenceError::TokenOutsideUniverse {
                position,
                token: format!("{token:?}"),
            });
        }
        seq.universe = universe;
        Ok(seq)
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: SequenceConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_auto_reset(mut self, auto_reset: bool) -> Self {
        self.config.auto_reset = auto_reset;
        self
    }

    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.config.trace = trace;
        self
    }

    /// Label used in diagnostics.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Poll `source` for this step and advance, reset, or hold.
    pub fn update<S>(&mut self, source: &S)
    where
        S: TokenSource<T> + ?Sized,
    {
        if self.progress.is_complete() {
            return;
        }
        let index = self.progress.index();
        let Some(&expected) = self.tokens.get(index) else {
            return;
        };

        if self.config.trace {
            trace!(
                target: "inputseq::sequence",
                sequence = self.label(),
                index,
                expected = ?expected,
                next = ?self.tokens.get(index + 1),
                "sequence step"
            );
        }

        if source.is_activated(expected) {
            if self.progress.advance() == Advance::Completed && self.config.trace {
                debug!(
                    target: "inputseq::sequence",
                    sequence = self.label(),
                    len = self.tokens.len(),
                    "sequence completed"
                );
            }
        } else if self.config.auto_reset && self.universe.other_activated(source, expected) {
            if self.config.trace {
                debug!(
                    target: "inputseq::sequence",
                    sequence = self.label(),
                    index,
                    expected = ?expected,
                    "wrong input, resetting"
                );
            }
            self.progress.reset();
        }
    }

    /// Back to the first token with an empty success record.
    pub fn reset(&mut self) {
        self.progress.reset();
    }

    /// Mark complete. Leaves progress and the success record untouched.
    pub fn set_complete(&mut self) {
        self.progress.complete();
    }

    /// Mark complete with every position recorded as matched.
    pub fn force_complete(&mut self) {
        self.progress.fill();
    }

    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress.is_complete()
    }

    /// Index of the next expected token.
    #[inline]
    #[must_use]
    pub fn progress(&self) -> usize {
        self.progress.index()
    }

    /// Number of resets that discarded progress, whether from a wrong input
    /// or an explicit [`reset`](Self::reset).
    #[inline]
    #[must_use]
    pub fn resets(&self) -> u64 {
        self.progress.resets()
    }

    /// The token the sequence is waiting for, if any.
    #[must_use]
    pub fn expected(&self) -> Option<T> {
        if self.progress.is_complete() {
            return None;
        }
        self.tokens.get(self.progress.index()).copied()
    }

    /// True iff the position before the cursor was matched.
    #[must_use]
    pub fn last_input_successful(&self) -> bool {
        self.progress.last_input_successful()
    }

    #[must_use]
    pub fn success_record(&self) -> &[bool] {
        self.progress.record()
    }

    #[must_use]
    pub fn all_matched(&self) -> bool {
        self.progress.all_matched()
    }

    /// Checked read of one success record entry.
    pub fn success_at(&self, index: usize) -> Result<bool> {
        self.progress.get(index)
    }

    /// Checked write of one success record entry.
    pub fn set_success(&mut self, index: usize, matched: bool) -> Result<()> {
        self.progress.set(index, matched)
    }

    #[must_use]
    pub fn tokens(&self) -> &[T] {
        &self.tokens
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[must_use]
    pub fn universe(&self) -> &TokenUniverse<T> {
        &self.universe
    }

    #[must_use]
    pub fn config(&self) -> &SequenceConfig {
        &self.config
    }

    #[must_use]
    pub fn auto_reset(&self) -> bool {
        self.config.auto_reset
    }

    pub fn set_auto_reset(&mut self, auto_reset: bool) {
        self.config.auto_reset = auto_reset;
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

impl KeySequence {
    /// Keyboard sequence. Every key counts as input, so any other key resets.
    #[must_use]
    pub fn keyboard(tokens: impl IntoIterator<Item = KeyCode>) -> Self {
        Self::new(tokens)
    }
}

impl GamepadSequence {
    /// Gamepad sequence over the full closed button universe.
    #[must_use]
    pub fn gamepad(tokens: impl IntoIterator<Item = GamepadButton>) -> Self {
        let mut seq = Self::new(tokens);
        seq.universe = TokenUniverse::Closed(GamepadButton::ALL.to_vec());
        seq
    }
}

/// Panicking read of the success record, like slice indexing.
impl<T> Index<usize> for InputSequence<T> {
    type Output = bool;

    fn index(&self, index: usize) -> &bool {
        &self.progress.record()[index]
    }
}

impl<T: Token> Accessible for InputSequence<T> {
    fn accessibility_enabled(&self) -> bool {
        !self.config.auto_reset
    }

    fn set_accessibility(&mut self, enabled: bool) {
        self.config.auto_reset = !enabled;
    }
}

impl<T, S> MatchableSequence<S> for InputSequence<T>
where
    T: Token,
    S: TokenSource<T> + ?Sized,
{
    fn update(&mut self, source: &S) {
        Self::update(self, source);
    }

    fn reset(&mut self) {
        Self::reset(self);
    }

    fn set_complete(&mut self) {
        Self::set_complete(self);
    }

    fn force_complete(&mut self) {
        Self::force_complete(self);
    }

    fn is_complete(&self) -> bool {
        Self::is_complete(self)
    }

    fn progress(&self) -> usize {
        Self::progress(self)
    }

    fn resets(&self) -> u64 {
        Self::resets(self)
    }

    fn all_matched(&self) -> bool {
        Self::all_matched(self)
    }
}

/// Renders the token list with the cursor in front of the expected token,
/// e.g. `up up > down down` or `up down >` once complete.
impl<T: fmt::Display> fmt::Display for InputSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{name}: ")?;
        }
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            if i == self.progress.index() {
                f.write_str("> ")?;
            }
            write!(f, "{token}")?;
        }
        if !self.tokens.is_empty() && self.progress.index() == self.tokens.len() {
            f.write_str(" >")?;
        }
        Ok(())
    }
}
