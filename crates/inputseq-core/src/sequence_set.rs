#![forbid(unsafe_code)]

//! Synchronizing several sequences that encode one gesture.
//!
//! A [`SequenceSet`] groups matchers (typically one per channel: the same
//! combo on keyboard and on gamepad) and gives them one shared lifecycle.
//! Members progress independently; only three coarse signals are
//! synchronized after every step:
//!
//! | Signal after a step | Set reaction |
//! |---------------------|--------------|
//! | any member complete | whole set completes, every member back-filled to fully matched |
//! | every member regressed | whole set resets |
//! | otherwise | nothing; members keep their own progress |
//!
//! Completion wins over regression in the same step. A member "regressed"
//! when it reset during the step, i.e. its
//! [`resets`](MatchableSequence::resets) count moved. A member that advanced
//! or sat idle keeps the set alive. For a single sequence this is exactly
//! "progress went down". A nested set only counts as regressed when its own
//! all-regressed rule fired, even if its summed progress dropped because one
//! of its members reset while another advanced.
//!
//! # Known compromise
//!
//! The all-regressed rule is a heuristic, not a consistency protocol. It
//! exists so that a reset on one channel (a stray keyboard press) does not
//! wipe progress made on another (the gamepad). Partial progress is never
//! copied between members: with members of different lengths that could mark
//! a shorter one complete by accident.
//!
//! # Example
//!
//! ```
//! use inputseq_core::event::{GamepadButton, KeyCode};
//! use inputseq_core::frame::InputFrame;
//! use inputseq_core::sequence::{GamepadSequence, KeySequence};
//! use inputseq_core::sequence_set::SequenceSet;
//!
//! let mut dash = SequenceSet::new()
//!     .with_member(KeySequence::keyboard([KeyCode::Right, KeyCode::Right]))
//!     .with_member(GamepadSequence::gamepad([
//!         GamepadButton::DPadRight,
//!         GamepadButton::DPadRight,
//!     ]));
//!
//! let mut frame = InputFrame::new();
//! frame.press_button(GamepadButton::DPadRight);
//! dash.update(&frame);
//! frame.end_step();
//!
//! frame.press_button(GamepadButton::DPadRight);
//! dash.update(&frame);
//! assert!(dash.is_complete());
//! ```

use std::fmt;

use crate::accessibility::Accessible;
use crate::matchable::MatchableSequence;
use crate::{debug, trace};

/// Matchers sharing one completion/reset lifecycle.
///
/// `S` is the per-step input every member is updated with.
pub struct SequenceSet<S: ?Sized> {
    name: Option<String>,
    members: Vec<Box<dyn MatchableSequence<S>>>,
    completed: bool,
    resets: u64,
    trace: bool,
}

impl<S: ?Sized> fmt::Debug for SequenceSet<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceSet")
            .field("name", &self.name)
            .field("members", &self.members.len())
            .field("completed", &self.completed)
            .finish()
    }
}

impl<S: ?Sized> Default for SequenceSet<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized> SequenceSet<S> {
    /// An empty set. Add members with [`with_member`](Self::with_member).
    #[must_use]
    pub fn new() -> Self {
        Self::from_members(Vec::new())
    }

    #[must_use]
    pub fn from_members(members: Vec<Box<dyn MatchableSequence<S>>>) -> Self {
        Self {
            name: None,
            members,
            completed: false,
            resets: 0,
            trace: false,
        }
    }

    #[must_use]
    pub fn with_member(mut self, member: impl MatchableSequence<S> + 'static) -> Self {
        self.members.push(Box::new(member));
        self
    }

    /// Label used in diagnostics.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Emit diagnostics for set-level completion and resets.
    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Update every member, then synchronize.
    pub fn update(&mut self, source: &S) {
        if self.completed || self.members.is_empty() {
            return;
        }

        let mut any_advanced_or_idle = false;
        let mut any_member_completed = false;
        for member in &mut self.members {
            let before = member.resets();
            member.update(source);
            any_advanced_or_idle |= member.resets() == before;
            any_member_completed |= member.is_complete();
        }

        if self.trace {
            trace!(
                target: "inputseq::sequence_set",
                set = self.label(),
                any_advanced_or_idle,
                any_member_completed,
                "set step"
            );
        }

        if any_member_completed {
            if self.trace {
                debug!(
                    target: "inputseq::sequence_set",
                    set = self.label(),
                    "member completed, completing set"
                );
            }
            self.set_complete();
        } else if !any_advanced_or_idle {
            if self.trace {
                debug!(
                    target: "inputseq::sequence_set",
                    set = self.label(),
                    "every member regressed, resetting set"
                );
            }
            // Members already dropped to zero, so count the reset here.
            self.resets = self.resets.wrapping_add(1);
            self.reset_members();
        }
    }

    /// Complete the set and rewrite every member to fully matched.
    pub fn set_complete(&mut self) {
        self.completed = true;
        for member in &mut self.members {
            member.force_complete();
        }
    }

    /// Reset the set and every member.
    pub fn reset(&mut self) {
        if self.completed || self.progress() > 0 {
            self.resets = self.resets.wrapping_add(1);
        }
        self.reset_members();
    }

    fn reset_members(&mut self) {
        self.completed = false;
        for member in &mut self.members {
            member.reset();
        }
    }

    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Sum of member progress.
    ///
    /// Can drop without the set resetting, when one member resets while
    /// another advances. Use [`resets`](Self::resets) to detect a set reset.
    #[must_use]
    pub fn progress(&self) -> usize {
        self.members.iter().map(|member| member.progress()).sum()
    }

    /// Number of set resets that discarded progress.
    #[inline]
    #[must_use]
    pub fn resets(&self) -> u64 {
        self.resets
    }

    #[must_use]
    pub fn all_matched(&self) -> bool {
        self.members.iter().all(|member| member.all_matched())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn member(&self, index: usize) -> Option<&dyn MatchableSequence<S>> {
        self.members.get(index).map(|member| &**member)
    }

    #[must_use]
    pub fn members(&self) -> &[Box<dyn MatchableSequence<S>>] {
        &self.members
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

impl<S: ?Sized> Accessible for SequenceSet<S> {
    /// Enabled only when every member has it enabled. An empty set reports
    /// false.
    fn accessibility_enabled(&self) -> bool {
        !self.members.is_empty()
            && self
                .members
                .iter()
                .all(|member| member.accessibility_enabled())
    }

    fn set_accessibility(&mut self, enabled: bool) {
        for member in &mut self.members {
            member.set_accessibility(enabled);
        }
    }
}

impl<S: ?Sized> MatchableSequence<S> for SequenceSet<S> {
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
        Self::set_complete(self);
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

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::event::{GamepadButton, KeyCode};
    use crate::frame::InputFrame;
    use crate::sequence::{GamepadSequence, KeySequence};

    const KEYS: [KeyCode; 3] = [KeyCode::Char('a'), KeyCode::Char('b'), KeyCode::Char('c')];
    const PAD: [GamepadButton; 3] = [
        GamepadButton::South,
        GamepadButton::East,
        GamepadButton::North,
    ];

    struct Fixture {
        set: SequenceSet<InputFrame>,
        keys: Rc<RefCell<KeySequence>>,
        pad: Rc<RefCell<GamepadSequence>>,
    }

    fn fixture() -> Fixture {
        let keys = Rc::new(RefCell::new(KeySequence::keyboard(KEYS)));
        let pad = Rc::new(RefCell::new(GamepadSequence::gamepad(PAD)));
        let set = SequenceSet::new()
            .with_member(Rc::clone(&keys))
            .with_member(Rc::clone(&pad));
        Fixture { set, keys, pad }
    }

    fn step(set: &mut SequenceSet<InputFrame>, keys: &[KeyCode], buttons: &[GamepadButton]) {
        let mut frame = InputFrame::new();
        for &code in keys {
            frame.press_key(code);
        }
        for &button in buttons {
            frame.press_button(button);
        }
        set.update(&frame);
    }

    #[test]
    fn completion_propagates_to_idle_member() {
        let mut fx = fixture();
        for &code in &KEYS {
            step(&mut fx.set, &[code], &[]);
        }

        assert!(fx.set.is_complete());
        let pad = fx.pad.borrow();
        assert!(pad.is_complete());
        assert_eq!(pad.success_record(), &[true, true, true]);
        assert!(fx.keys.borrow().all_matched());
        assert!(fx.set.all_matched());
    }

    #[test]
    fn completed_set_ignores_updates() {
        let mut fx = fixture();
        fx.set.set_complete();
        step(&mut fx.set, &[KeyCode::Char('z')], &[GamepadButton::Mode]);
        assert!(fx.set.is_complete());
        assert!(fx.keys.borrow().is_complete());
    }

    #[test]
    fn all_members_regressing_resets_set() {
        let mut fx = fixture();
        step(&mut fx.set, &[KEYS[0]], &[PAD[0]]);
        assert_eq!(fx.set.progress(), 2);

        step(&mut fx.set, &[KeyCode::Char('z')], &[GamepadButton::Mode]);
        assert!(!fx.set.is_complete());
        assert_eq!(fx.keys.borrow().progress(), 0);
        assert_eq!(fx.pad.borrow().progress(), 0);
    }

    #[test]
    fn one_member_regressing_while_other_idles_keeps_progress() {
        let mut fx = fixture();
        step(&mut fx.set, &[KEYS[0]], &[PAD[0]]);
        step(&mut fx.set, &[KeyCode::Char('z')], &[]);

        assert_eq!(fx.keys.borrow().progress(), 0);
        assert_eq!(fx.pad.borrow().progress(), 1);
        assert_eq!(fx.pad.borrow().success_record(), &[true, false, false]);
    }

    #[test]
    fn one_member_regressing_while_other_advances_keeps_progress() {
        let mut fx = fixture();
        step(&mut fx.set, &[KEYS[0]], &[PAD[0]]);
        step(&mut fx.set, &[KeyCode::Char('z')], &[PAD[1]]);

        assert_eq!(fx.keys.borrow().progress(), 0);
        assert_eq!(fx.pad.borrow().progress(), 2);
    }

    #[test]
    fn completion_wins_over_regression_in_same_step() {
        let mut fx = fixture();
        step(&mut fx.set, &[KEYS[0]], &[PAD[0]]);
        step(&mut fx.set, &[KEYS[1]], &[PAD[1]]);
        step(&mut fx.set, &[KEYS[2]], &[GamepadButton::Mode]);

        assert!(fx.set.is_complete());
        assert!(fx.pad.borrow().is_complete());
        assert!(fx.pad.borrow().all_matched());
    }

    #[test]
    fn reset_cascades() {
        let mut fx = fixture();
        for &code in &KEYS {
            step(&mut fx.set, &[code], &[]);
        }
        fx.set.reset();
        assert!(!fx.set.is_complete());
        assert!(!fx.keys.borrow().is_complete());
        assert!(!fx.pad.borrow().is_complete());
        assert_eq!(fx.pad.borrow().success_record(), &[false, false, false]);
        assert_eq!(fx.set.progress(), 0);
    }

    #[test]
    fn empty_set_is_inert() {
        let mut set: SequenceSet<InputFrame> = SequenceSet::new();
        step(&mut set, &[KeyCode::Char('a')], &[]);
        assert!(!set.is_complete());
        assert!(set.is_empty());
        assert!(!set.accessibility_enabled());
    }

    #[test]
    fn heterogeneous_lengths_do_not_share_progress() {
        let mut set = SequenceSet::new()
            .with_member(KeySequence::keyboard([KeyCode::Up]))
            .with_member(KeySequence::keyboard([KeyCode::Down, KeyCode::Up]));
        step(&mut set, &[KeyCode::Down], &[]);
        assert!(!set.is_complete());
        assert_eq!(set.member(0).map(|m| m.progress()), Some(0));
        assert_eq!(set.member(1).map(|m| m.progress()), Some(1));
    }

    #[test]
    fn accessibility_applies_to_every_member() {
        let mut fx = fixture();
        assert!(!fx.set.accessibility_enabled());

        fx.set.set_accessibility(true);
        assert!(fx.set.accessibility_enabled());
        assert!(!fx.keys.borrow().auto_reset());
        assert!(!fx.pad.borrow().auto_reset());

        fx.set.set_accessibility(false);
        assert!(fx.keys.borrow().auto_reset());
        assert!(fx.pad.borrow().auto_reset());
    }

    #[test]
    fn mixed_accessibility_reports_disabled() {
        let fx = fixture();
        fx.keys.borrow_mut().set_accessibility(true);
        assert!(!fx.set.accessibility_enabled());
        fx.pad.borrow_mut().set_accessibility(true);
        assert!(fx.set.accessibility_enabled());
    }

    #[test]
    fn nested_set_completes_outer() {
        let inner: SequenceSet<InputFrame> = SequenceSet::new()
            .with_member(KeySequence::keyboard([KeyCode::Enter]))
            .with_member(GamepadSequence::gamepad([GamepadButton::Start]));
        let pad = Rc::new(RefCell::new(GamepadSequence::gamepad(PAD)));
        let mut outer = SequenceSet::new()
            .with_member(inner)
            .with_member(Rc::clone(&pad));

        step(&mut outer, &[], &[GamepadButton::Start]);
        assert!(outer.is_complete());
        assert!(outer.member(0).is_some_and(|m| m.is_complete() && m.all_matched()));
        assert!(pad.borrow().all_matched());
    }

    #[test]
    fn nested_set_that_held_survives_outer_regression() {
        use crate::frame::StepLatch;
        use crate::sequence::InputSequence;
        use crate::token::TokenUniverse;

        fn closed(tokens: &[u8]) -> Rc<RefCell<InputSequence<u8>>> {
            let seq = InputSequence::with_universe(
                tokens.to_vec(),
                TokenUniverse::closed(tokens.iter().copied()),
            )
            .expect("tokens in their own universe");
            Rc::new(RefCell::new(seq))
        }

        let a = closed(&[1, 2, 3]);
        let b = closed(&[4, 5]);
        let c = closed(&[7, 8]);
        let inner: SequenceSet<StepLatch<u8>> = SequenceSet::new()
            .with_member(Rc::clone(&a))
            .with_member(Rc::clone(&b));
        let inner = Rc::new(RefCell::new(inner));
        let mut outer = SequenceSet::new()
            .with_member(Rc::clone(&inner))
            .with_member(Rc::clone(&c));

        let latch = |pressed: &[u8]| -> StepLatch<u8> { pressed.iter().copied().collect() };
        outer.update(&latch(&[1, 7]));
        outer.update(&latch(&[2]));

        // a slips 2 -> 0, b advances 0 -> 1, c slips 1 -> 0.
        outer.update(&latch(&[1, 4, 7]));
        assert_eq!(a.borrow().progress(), 0);
        assert_eq!(c.borrow().progress(), 0);
        assert_eq!(inner.borrow().resets(), 0, "inner set held");
        assert_eq!(b.borrow().progress(), 1);
        assert_eq!(outer.resets(), 0);
    }

    #[test]
    fn nested_set_that_regressed_lets_outer_reset() {
        let inner: SequenceSet<InputFrame> = SequenceSet::new()
            .with_member(KeySequence::keyboard([KeyCode::Up, KeyCode::Down]))
            .with_member(GamepadSequence::gamepad([
                GamepadButton::DPadUp,
                GamepadButton::DPadDown,
            ]));
        let inner = Rc::new(RefCell::new(inner));
        let pad = Rc::new(RefCell::new(GamepadSequence::gamepad(PAD)));
        let mut outer = SequenceSet::new()
            .with_member(Rc::clone(&inner))
            .with_member(Rc::clone(&pad));

        step(&mut outer, &[KeyCode::Up], &[GamepadButton::DPadUp, PAD[0]]);
        assert_eq!(outer.progress(), 3);

        // Every leaf slips: the inner set resets itself, so the outer one does too.
        step(&mut outer, &[KeyCode::Char('z')], &[GamepadButton::Mode]);
        assert_eq!(inner.borrow().resets(), 1);
        assert_eq!(outer.resets(), 1);
        assert_eq!(pad.borrow().progress(), 0);
    }

    #[test]
    fn set_resets_counted_on_discarded_progress_only() {
        let mut fx = fixture();
        fx.set.reset();
        assert_eq!(fx.set.resets(), 0);

        step(&mut fx.set, &[KEYS[0]], &[PAD[0]]);
        step(&mut fx.set, &[KeyCode::Char('z')], &[GamepadButton::Mode]);
        assert_eq!(fx.set.resets(), 1);
        assert_eq!(fx.set.progress(), 0);

        fx.set.set_complete();
        fx.set.reset();
        assert_eq!(fx.set.resets(), 2);
    }

    #[test]
    fn debug_format() {
        let fx = fixture();
        let dbg = format!("{:?}", fx.set.with_name("combo"));
        assert!(dbg.contains("SequenceSet"));
        assert!(dbg.contains("combo"));
        assert!(dbg.contains("members: 2"));
    }
}
