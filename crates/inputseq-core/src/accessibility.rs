#![forbid(unsafe_code)]

//! Accessibility control: forgiving input.
//!
//! With accessibility enabled a sequence no longer resets on a wrong input;
//! only correct inputs move it forward. Single sequences map this directly
//! onto their auto-reset flag. Sets apply it to every member at once and
//! only report it enabled when every member has it enabled, so a mixed state
//! can be observed but never set through a set.

/// Get/set the forgiving-input policy.
pub trait Accessible {
    /// True when wrong inputs are ignored instead of resetting progress.
    fn accessibility_enabled(&self) -> bool;

    /// Enable (no reset on wrong input) or disable (reset on wrong input).
    fn set_accessibility(&mut self, enabled: bool);
}

/// Shared handles forward to the sequence they point at.
impl<A: Accessible + ?Sized> Accessible for std::rc::Rc<std::cell::RefCell<A>> {
    fn accessibility_enabled(&self) -> bool {
        self.borrow().accessibility_enabled()
    }

    fn set_accessibility(&mut self, enabled: bool) {
        self.borrow_mut().set_accessibility(enabled);
    }
}
