#![forbid(unsafe_code)]

//! Tokens, token sources, and token universes.
//!
//! A *token* is one discrete input identifier on one channel: a [`KeyCode`]
//! on the keyboard, a [`GamepadButton`] on a gamepad, or any host-defined
//! `Copy + Eq + Hash` type.
//!
//! A [`TokenSource`] answers two edge-triggered questions per step: was this
//! token just activated, and was *any* token on this channel just activated.
//! The host owns polling and debouncing; sequences only ask.
//!
//! A [`TokenUniverse`] names which tokens count as input on a sequence's
//! channel. Wrong-input detection scans the universe, so a key outside it
//! never resets progress.
//!
//! [`KeyCode`]: crate::event::KeyCode
//! [`GamepadButton`]: crate::event::GamepadButton

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use crate::error::SequenceError;

/// Marker for types usable as sequence tokens.
pub trait Token: Copy + Eq + Hash + fmt::Debug {}

impl<T: Copy + Eq + Hash + fmt::Debug> Token for T {}

/// Edge-triggered token state for one channel, valid for the current step.
pub trait TokenSource<T> {
    /// Whether `token` became active this step (not merely held).
    fn is_activated(&self, token: T) -> bool;

    /// Whether any token on this channel became active this step.
    fn any_activated(&self) -> bool;
}

impl<T, S: TokenSource<T> + ?Sized> TokenSource<T> for &S {
    fn is_activated(&self, token: T) -> bool {
        (**self).is_activated(token)
    }

    fn any_activated(&self) -> bool {
        (**self).any_activated()
    }
}

/// The set of tokens that count as input for a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TokenUniverse<T> {
    /// Everything the source reports is input on this channel.
    #[default]
    Open,

    /// Only the listed tokens are input; activity on anything else is ignored.
    Closed(Vec<T>),
}

impl<T: Token> TokenUniverse<T> {
    /// Closed universe over the given tokens, duplicates removed.
    #[must_use]
    pub fn closed(tokens: impl IntoIterator<Item = T>) -> Self {
        let mut list: Vec<T> = Vec::new();
        for token in tokens {
            if !list.contains(&token) {
                list.push(token);
            }
        }
        Self::Closed(list)
    }

    /// Whether `token` belongs to the universe.
    #[must_use]
    pub fn contains(&self, token: T) -> bool {
        match self {
            Self::Open => true,
            Self::Closed(tokens) => tokens.contains(&token),
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// Whether a token of the universe other than `expected` fired this step.
    ///
    /// Callers only ask once `expected` is known to be inactive, which is what
    /// lets the open universe answer with a single `any_activated` probe.
    pub(crate) fn other_activated<S>(&self, source: &S, expected: T) -> bool
    where
        S: TokenSource<T> + ?Sized,
    {
        match self {
            Self::Open => source.any_activated(),
            Self::Closed(tokens) => tokens
                .iter()
                .any(|&token| token != expected && source.is_activated(token)),
        }
    }
}

/// Parse a comma-separated token list such as `"up, up, down, down, b, a"`.
///
/// Empty entries are skipped, so a trailing comma is harmless. An empty input
/// yields an empty list.
pub fn parse_tokens<T>(list: &str) -> Result<Vec<T>, SequenceError>
where
    T: FromStr<Err = SequenceError>,
{
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| name.parse::<T>())
        .collect()
}
