#![forbid(unsafe_code)]

//! Per-step latches of edge-triggered input.
//!
//! The host records every event it receives during a step into an
//! [`InputFrame`], updates its sequences against the frame, then calls
//! [`InputFrame::end_step`]. Only press events latch, so a held key that
//! autorepeats is one activation, not many.
//!
//! # Usage
//!
//! ```
//! use inputseq_core::event::{Event, KeyCode, KeyEvent};
//! use inputseq_core::frame::InputFrame;
//! use inputseq_core::sequence::KeySequence;
//!
//! let mut frame = InputFrame::new();
//! let mut combo = KeySequence::keyboard([KeyCode::Up, KeyCode::Down]);
//!
//! for code in [KeyCode::Up, KeyCode::Down] {
//!     frame.record(&Event::Key(KeyEvent::new(code)));
//!     combo.update(&frame);
//!     frame.end_step();
//! }
//! assert!(combo.is_complete());
//! ```

use ahash::AHashSet;

use crate::event::{ButtonEventKind, Event, GamepadButton, KeyCode};
use crate::token::{Token, TokenSource};

/// Set of tokens activated during the current step on one channel.
#[derive(Debug, Clone)]
pub struct StepLatch<T> {
    pressed: AHashSet<T>,
}

impl<T: Token> Default for StepLatch<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Token> StepLatch<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pressed: AHashSet::new(),
        }
    }

    /// Latch an activation. Pressing twice in one step is one activation.
    pub fn press(&mut self, token: T) {
        self.pressed.insert(token);
    }

    /// Forget everything latched so far.
    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pressed.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pressed.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.pressed.iter()
    }
}

impl<T: Token> TokenSource<T> for StepLatch<T> {
    fn is_activated(&self, token: T) -> bool {
        self.pressed.contains(&token)
    }

    fn any_activated(&self) -> bool {
        !self.pressed.is_empty()
    }
}

impl<T: Token> FromIterator<T> for StepLatch<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            pressed: iter.into_iter().collect(),
        }
    }
}

/// One step's worth of input across the keyboard and gamepad channels.
#[derive(Debug, Clone, Default)]
pub struct InputFrame {
    keys: StepLatch<KeyCode>,
    buttons: StepLatch<GamepadButton>,
}

impl InputFrame {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch an event.
    ///
    /// Key presses and gamepad button-downs latch; repeats and releases do
    /// not. Modifiers are not part of the token: Shift+Up latches `Up`.
    /// Losing focus drops everything latched this step, since the matching
    /// releases will never arrive.
    pub fn record(&mut self, event: &Event) {
        match event {
            Event::Key(key) if key.is_press() => self.keys.press(key.code),
            Event::Gamepad(pad) if pad.kind == ButtonEventKind::Press => {
                self.buttons.press(pad.button);
            }
            Event::Focus(false) => self.end_step(),
            _ => {}
        }
    }

    pub fn press_key(&mut self, code: KeyCode) {
        self.keys.press(code);
    }

    pub fn press_button(&mut self, button: GamepadButton) {
        self.buttons.press(button);
    }

    /// Clear both channels. Call after every sequence has been updated.
    pub fn end_step(&mut self) {
        self.keys.clear();
        self.buttons.clear();
    }

    #[must_use]
    pub fn keys(&self) -> &StepLatch<KeyCode> {
        &self.keys
    }

    #[must_use]
    pub fn buttons(&self) -> &StepLatch<GamepadButton> {
        &self.buttons
    }

    /// True if nothing was activated on any channel.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.keys.is_empty() && self.buttons.is_empty()
    }
}

impl TokenSource<KeyCode> for InputFrame {
    fn is_activated(&self, token: KeyCode) -> bool {
        self.keys.is_activated(token)
    }

    fn any_activated(&self) -> bool {
        self.keys.any_activated()
    }
}

impl TokenSource<GamepadButton> for InputFrame {
    fn is_activated(&self, token: GamepadButton) -> bool {
        self.buttons.is_activated(token)
    }

    fn any_activated(&self) -> bool {
        self.buttons.any_activated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{GamepadEvent, KeyEvent, KeyEventKind, Modifiers};

    fn any_key(frame: &InputFrame) -> bool {
        TokenSource::<KeyCode>::any_activated(frame)
    }

    fn any_button(frame: &InputFrame) -> bool {
        TokenSource::<GamepadButton>::any_activated(frame)
    }

    #[test]
    fn modified_press_latches_bare_key() {
        let mut frame = InputFrame::new();
        let shifted = KeyEvent::new(KeyCode::Up).with_modifiers(Modifiers::SHIFT);
        assert!(!shifted.ctrl());
        frame.record(&Event::Key(shifted));
        assert!(TokenSource::<KeyCode>::is_activated(&frame, KeyCode::Up));
        assert_eq!(frame.keys().len(), 1);
    }

    #[test]
    fn latch_deduplicates() {
        let mut latch = StepLatch::new();
        latch.press(3u8);
        latch.press(3u8);
        assert_eq!(latch.len(), 1);
        assert!(latch.is_activated(3));
        assert!(!latch.is_activated(4));
        latch.clear();
        assert!(!latch.any_activated());
    }

    #[test]
    fn latch_from_iter() {
        let latch: StepLatch<u8> = [1, 2, 2].into_iter().collect();
        assert_eq!(latch.len(), 2);
        let mut seen: Vec<u8> = latch.iter().copied().collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn press_events_latch() {
        let mut frame = InputFrame::new();
        frame.record(&Event::Key(KeyEvent::new(KeyCode::Up)));
        frame.record(&Event::Gamepad(GamepadEvent::press(GamepadButton::South)));
        assert!(frame.is_activated(KeyCode::Up));
        assert!(frame.is_activated(GamepadButton::South));
        assert!(!frame.is_idle());
    }

    #[test]
    fn repeat_and_release_do_not_latch() {
        let mut frame = InputFrame::new();
        frame.record(&Event::Key(
            KeyEvent::new(KeyCode::Up).with_kind(KeyEventKind::Repeat),
        ));
        frame.record(&Event::Key(
            KeyEvent::new(KeyCode::Down).with_kind(KeyEventKind::Release),
        ));
        frame.record(&Event::Gamepad(GamepadEvent::release(GamepadButton::East)));
        assert!(frame.is_idle());
    }

    #[test]
    fn channels_are_independent() {
        let mut frame = InputFrame::new();
        frame.press_key(KeyCode::Char('a'));
        assert!(any_key(&frame));
        assert!(!any_button(&frame));

        frame.end_step();
        frame.press_button(GamepadButton::Start);
        assert!(!any_key(&frame));
        assert!(any_button(&frame));
    }

    #[test]
    fn focus_loss_clears_frame() {
        let mut frame = InputFrame::new();
        frame.press_key(KeyCode::Enter);
        frame.press_button(GamepadButton::North);
        frame.record(&Event::Focus(true));
        assert!(!frame.is_idle());
        frame.record(&Event::Focus(false));
        assert!(frame.is_idle());
    }

    #[test]
    fn end_step_clears_both_channels() {
        let mut frame = InputFrame::new();
        frame.press_key(KeyCode::Tab);
        frame.press_button(GamepadButton::Select);
        frame.end_step();
        assert!(frame.keys().is_empty());
        assert!(frame.buttons().is_empty());
    }
}
