#![forbid(unsafe_code)]

//! The capability every sequence-like matcher exposes.
//!
//! [`MatchableSequence`] is what a [`SequenceSet`](crate::sequence_set::SequenceSet)
//! drives: single-channel [`InputSequence`](crate::sequence::InputSequence)s,
//! nested sets, or host-defined matchers. `S` is the per-step input the host
//! hands to `update`, usually an [`InputFrame`](crate::frame::InputFrame).
//!
//! A set only ever touches its members through this trait.

use std::cell::RefCell;
use std::rc::Rc;

use crate::accessibility::Accessible;

/// Step-driven matcher with a reset/complete lifecycle.
pub trait MatchableSequence<S: ?Sized>: Accessible {
    /// Poll `source` once and advance, reset, or hold.
    ///
    /// No-op once complete.
    fn update(&mut self, source: &S);

    /// Back to the start, not complete, nothing matched.
    fn reset(&mut self);

    /// Mark complete. Idempotent.
    fn set_complete(&mut self);

    /// Mark complete and rewrite all match state to "fully matched".
    ///
    /// Used when completion is propagated from somewhere else, so that later
    /// inspection sees consistent data.
    fn force_complete(&mut self);

    fn is_complete(&self) -> bool;

    /// Progress measure: grows while matching, drops on reset.
    fn progress(&self) -> usize;

    /// Number of resets that discarded progress.
    ///
    /// A set compares this before and after a member's update to tell a
    /// member that reset from one that held. Summed progress cannot make that
    /// call for a nested set whose members moved in opposite directions.
    fn resets(&self) -> u64;

    /// Whether every position has been matched.
    fn all_matched(&self) -> bool;
}

/// A shared handle lets one matcher be observed by the host (or, rarely,
/// driven by more than one set) while a set owns the handle.
impl<S, M> MatchableSequence<S> for Rc<RefCell<M>>
where
    S: ?Sized,
    M: MatchableSequence<S> + ?Sized,
{
    fn update(&mut self, source: &S) {
        self.borrow_mut().update(source);
    }

    fn reset(&mut self) {
        self.borrow_mut().reset();
    }

    fn set_complete(&mut self) {
        self.borrow_mut().set_complete();
    }

    fn force_complete(&mut self) {
        self.borrow_mut().force_complete();
    }

    fn is_complete(&self) -> bool {
        self.borrow().is_complete()
    }

    fn progress(&self) -> usize {
        self.borrow().progress()
    }

    fn resets(&self) -> u64 {
        self.borrow().resets()
    }

    fn all_matched(&self) -> bool {
        self.borrow().all_matched()
    }
}
