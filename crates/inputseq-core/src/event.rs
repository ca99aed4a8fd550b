#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! Every channel a sequence can listen to has its own token type here:
//! [`KeyCode`] for the keyboard and [`GamepadButton`] for the gamepad. The
//! host turns whatever its backend produces into [`Event`] values and latches
//! them into an [`InputFrame`](crate::frame::InputFrame) once per step.
//!
//! # Design Notes
//!
//! - `KeyEventKind` defaults to `Press` when not available from the backend
//! - Only `Press` events are activations; repeats and releases are ignored
//!   by the frame latch
//! - `Modifiers` use bitflags for easy combination
//! - Token names (`"up"`, `"f5"`, `"start"`) parse through [`FromStr`]

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::error::SequenceError;

/// Canonical input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A gamepad button event.
    Gamepad(GamepadEvent),

    /// Focus gained or lost.
    ///
    /// `true` = focus gained, `false` = focus lost.
    Focus(bool),
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// True for an edge activation (a fresh press).
    #[must_use]
    pub const fn is_press(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Backspace key.
    Backspace,

    /// Tab key.
    Tab,

    /// Shift+Tab (back-tab).
    BackTab,

    /// Delete key.
    Delete,

    /// Insert key.
    Insert,

    /// Home key.
    Home,

    /// End key.
    End,

    /// Page Up key.
    PageUp,

    /// Page Down key.
    PageDown,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,

    /// Function key (F1-F24).
    F(u8),
}

impl FromStr for KeyCode {
    type Err = SequenceError;

    /// Parse a key name.
    ///
    /// Named keys are case-insensitive (`"Up"`, `"esc"`, `"F5"`, `"space"`).
    /// Any other single character is a [`KeyCode::Char`] and keeps its case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Self::Char(c));
        }

        let code = match trimmed.to_ascii_lowercase().as_str() {
            "space" => Self::Char(' '),
            "enter" | "return" => Self::Enter,
            "esc" | "escape" => Self::Escape,
            "backspace" => Self::Backspace,
            "tab" => Self::Tab,
            "backtab" => Self::BackTab,
            "delete" | "del" => Self::Delete,
            "insert" | "ins" => Self::Insert,
            "home" => Self::Home,
            "end" => Self::End,
            "pageup" | "pgup" => Self::PageUp,
            "pagedown" | "pgdn" => Self::PageDown,
            "up" => Self::Up,
            "down" => Self::Down,
            "left" => Self::Left,
            "right" => Self::Right,
            name => match name.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                Some(n @ 1..=24) => Self::F(n),
                _ => return Err(SequenceError::unknown_token(trimmed)),
            },
        };
        Ok(code)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(' ') => f.write_str("space"),
            Self::Char(c) => write!(f, "{c}"),
            Self::F(n) => write!(f, "f{n}"),
            Self::Enter => f.write_str("enter"),
            Self::Escape => f.write_str("esc"),
            Self::Backspace => f.write_str("backspace"),
            Self::Tab => f.write_str("tab"),
            Self::BackTab => f.write_str("backtab"),
            Self::Delete => f.write_str("delete"),
            Self::Insert => f.write_str("insert"),
            Self::Home => f.write_str("home"),
            Self::End => f.write_str("end"),
            Self::PageUp => f.write_str("pageup"),
            Self::PageDown => f.write_str("pagedown"),
            Self::Up => f.write_str("up"),
            Self::Down => f.write_str("down"),
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A gamepad button event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GamepadEvent {
    /// The button that changed.
    pub button: GamepadButton,

    /// Whether it went down or up.
    pub kind: ButtonEventKind,
}

impl GamepadEvent {
    /// A button-down event.
    #[must_use]
    pub const fn press(button: GamepadButton) -> Self {
        Self {
            button,
            kind: ButtonEventKind::Press,
        }
    }

    /// A button-up event.
    #[must_use]
    pub const fn release(button: GamepadButton) -> Self {
        Self {
            button,
            kind: ButtonEventKind::Release,
        }
    }
}

/// Gamepad button transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonEventKind {
    #[default]
    Press,
    Release,
}

/// Gamepad buttons, named by position so the same code works across layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GamepadButton {
    /// Bottom face button (A on Xbox, Cross on PlayStation).
    South,
    /// Right face button (B / Circle).
    East,
    /// Left face button (X / Square).
    West,
    /// Top face button (Y / Triangle).
    North,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    LeftBumper,
    RightBumper,
    LeftTrigger,
    RightTrigger,
    Select,
    Start,
    Mode,
    LeftStick,
    RightStick,
}

impl GamepadButton {
    /// Every button, in declaration order.
    ///
    /// This is the closed token universe of the gamepad channel.
    pub const ALL: [Self; 17] = [
        Self::South,
        Self::East,
        Self::West,
        Self::North,
        Self::DPadUp,
        Self::DPadDown,
        Self::DPadLeft,
        Self::DPadRight,
        Self::LeftBumper,
        Self::RightBumper,
        Self::LeftTrigger,
        Self::RightTrigger,
        Self::Select,
        Self::Start,
        Self::Mode,
        Self::LeftStick,
        Self::RightStick,
    ];

    /// Canonical lowercase name, accepted back by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
            Self::North => "north",
            Self::DPadUp => "dpad-up",
            Self::DPadDown => "dpad-down",
            Self::DPadLeft => "dpad-left",
            Self::DPadRight => "dpad-right",
            Self::LeftBumper => "lb",
            Self::RightBumper => "rb",
            Self::LeftTrigger => "lt",
            Self::RightTrigger => "rt",
            Self::Select => "select",
            Self::Start => "start",
            Self::Mode => "mode",
            Self::LeftStick => "ls",
            Self::RightStick => "rs",
        }
    }
}

impl FromStr for GamepadButton {
    type Err = SequenceError;

    /// Parse a button name. Xbox-style face letters are accepted as aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let button = match s.trim().to_ascii_lowercase().as_str() {
            "south" | "a" | "cross" => Self::South,
            "east" | "b" | "circle" => Self::East,
            "west" | "x" | "square" => Self::West,
            "north" | "y" | "triangle" => Self::North,
            "dpad-up" | "up" => Self::DPadUp,
            "dpad-down" | "down" => Self::DPadDown,
            "dpad-left" | "left" => Self::DPadLeft,
            "dpad-right" | "right" => Self::DPadRight,
            "lb" | "l1" => Self::LeftBumper,
            "rb" | "r1" => Self::RightBumper,
            "lt" | "l2" => Self::LeftTrigger,
            "rt" | "r2" => Self::RightTrigger,
            "select" | "back" => Self::Select,
            "start" => Self::Start,
            "mode" | "guide" => Self::Mode,
            "ls" | "l3" => Self::LeftStick,
            "rs" | "r3" => Self::RightStick,
            _ => return Err(SequenceError::unknown_token(s.trim())),
        };
        Ok(button)
    }
}

impl fmt::Display for GamepadButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "crossterm")]
impl Event {
    /// Map a crossterm event.
    ///
    /// Only key and focus events have a counterpart; everything else maps to
    /// `None`, as do keys no sequence can name (media keys, modifiers alone).
    #[must_use]
    pub fn from_crossterm(event: crossterm::event::Event) -> Option<Self> {
        use crossterm::event as ct;

        match event {
            ct::Event::Key(key) => {
                let code = match key.code {
                    ct::KeyCode::Char(c) => KeyCode::Char(c),
                    ct::KeyCode::Enter => KeyCode::Enter,
                    ct::KeyCode::Esc => KeyCode::Escape,
                    ct::KeyCode::Backspace => KeyCode::Backspace,
                    ct::KeyCode::Tab => KeyCode::Tab,
                    ct::KeyCode::BackTab => KeyCode::BackTab,
                    ct::KeyCode::Delete => KeyCode::Delete,
                    ct::KeyCode::Insert => KeyCode::Insert,
                    ct::KeyCode::Home => KeyCode::Home,
                    ct::KeyCode::End => KeyCode::End,
                    ct::KeyCode::PageUp => KeyCode::PageUp,
                    ct::KeyCode::PageDown => KeyCode::PageDown,
                    ct::KeyCode::Up => KeyCode::Up,
                    ct::KeyCode::Down => KeyCode::Down,
                    ct::KeyCode::Left => KeyCode::Left,
                    ct::KeyCode::Right => KeyCode::Right,
                    ct::KeyCode::F(n) => KeyCode::F(n),
                    _ => return None,
                };

                let mut modifiers = Modifiers::NONE;
                if key.modifiers.contains(ct::KeyModifiers::SHIFT) {
                    modifiers |= Modifiers::SHIFT;
                }
                if key.modifiers.contains(ct::KeyModifiers::ALT) {
                    modifiers |= Modifiers::ALT;
                }
                if key.modifiers.contains(ct::KeyModifiers::CONTROL) {
                    modifiers |= Modifiers::CTRL;
                }
                if key.modifiers.contains(ct::KeyModifiers::SUPER) {
                    modifiers |= Modifiers::SUPER;
                }

                let kind = match key.kind {
                    ct::KeyEventKind::Press => KeyEventKind::Press,
                    ct::KeyEventKind::Repeat => KeyEventKind::Repeat,
                    ct::KeyEventKind::Release => KeyEventKind::Release,
                };

                Some(Self::Key(KeyEvent {
                    code,
                    modifiers,
                    kind,
                }))
            }
            ct::Event::FocusGained => Some(Self::Focus(true)),
            ct::Event::FocusLost => Some(Self::Focus(false)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_is_char() {
        let event = KeyEvent::new(KeyCode::Char('q'));
        assert!(event.is_char('q'));
        assert!(!event.is_char('x'));
    }

    #[test]
    fn key_event_modifiers() {
        let event = KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL);
        assert!(event.ctrl());
        assert!(!event.modifiers.contains(Modifiers::ALT));
    }

    #[test]
    fn key_event_kind() {
        let press = KeyEvent::new(KeyCode::Enter);
        assert_eq!(press.kind, KeyEventKind::Press);
        assert!(press.is_press());

        let release = press.with_kind(KeyEventKind::Release);
        assert_eq!(release.kind, KeyEventKind::Release);
        assert!(!release.is_press());
        assert!(!press.with_kind(KeyEventKind::Repeat).is_press());
    }

    #[test]
    fn parse_named_keys() {
        assert_eq!("up".parse::<KeyCode>(), Ok(KeyCode::Up));
        assert_eq!("Up".parse::<KeyCode>(), Ok(KeyCode::Up));
        assert_eq!("ESC".parse::<KeyCode>(), Ok(KeyCode::Escape));
        assert_eq!("space".parse::<KeyCode>(), Ok(KeyCode::Char(' ')));
        assert_eq!(" pgdn ".parse::<KeyCode>(), Ok(KeyCode::PageDown));
    }

    #[test]
    fn parse_single_char_keeps_case() {
        assert_eq!("b".parse::<KeyCode>(), Ok(KeyCode::Char('b')));
        assert_eq!("B".parse::<KeyCode>(), Ok(KeyCode::Char('B')));
        assert_eq!("f".parse::<KeyCode>(), Ok(KeyCode::Char('f')));
    }

    #[test]
    fn parse_function_keys() {
        assert_eq!("f1".parse::<KeyCode>(), Ok(KeyCode::F(1)));
        assert_eq!("F24".parse::<KeyCode>(), Ok(KeyCode::F(24)));
        assert!("f0".parse::<KeyCode>().is_err());
        assert!("f25".parse::<KeyCode>().is_err());
    }

    #[test]
    fn parse_unknown_key_fails() {
        assert_eq!(
            "hyper".parse::<KeyCode>(),
            Err(SequenceError::unknown_token("hyper"))
        );
    }

    #[test]
    fn key_display_parses_back() {
        for code in [
            KeyCode::Char('a'),
            KeyCode::Char(' '),
            KeyCode::Escape,
            KeyCode::F(12),
            KeyCode::PageUp,
            KeyCode::Left,
        ] {
            assert_eq!(code.to_string().parse::<KeyCode>(), Ok(code));
        }
    }

    #[test]
    fn gamepad_names_parse_back() {
        for button in GamepadButton::ALL {
            assert_eq!(button.name().parse::<GamepadButton>(), Ok(button));
        }
    }

    #[test]
    fn gamepad_aliases() {
        assert_eq!("A".parse::<GamepadButton>(), Ok(GamepadButton::South));
        assert_eq!("triangle".parse::<GamepadButton>(), Ok(GamepadButton::North));
        assert_eq!("up".parse::<GamepadButton>(), Ok(GamepadButton::DPadUp));
        assert!("z".parse::<GamepadButton>().is_err());
    }

    #[test]
    fn gamepad_universe_has_no_duplicates() {
        let mut sorted = GamepadButton::ALL.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), GamepadButton::ALL.len());
    }

    #[test]
    fn gamepad_event_constructors() {
        let down = GamepadEvent::press(GamepadButton::Start);
        assert_eq!(down.kind, ButtonEventKind::Press);
        let up = GamepadEvent::release(GamepadButton::Start);
        assert_eq!(up.kind, ButtonEventKind::Release);
        assert_eq!(down.button, up.button);
    }

    #[test]
    fn modifiers_default() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
    }

    #[cfg(feature = "crossterm")]
    #[test]
    fn crossterm_key_mapping() {
        use crossterm::event as ct;

        let raw = ct::Event::Key(ct::KeyEvent::new(
            ct::KeyCode::Char('x'),
            ct::KeyModifiers::CONTROL,
        ));
        let mapped = Event::from_crossterm(raw);
        assert_eq!(
            mapped,
            Some(Event::Key(
                KeyEvent::new(KeyCode::Char('x')).with_modifiers(Modifiers::CTRL)
            ))
        );
        assert_eq!(
            Event::from_crossterm(ct::Event::FocusLost),
            Some(Event::Focus(false))
        );
        assert_eq!(Event::from_crossterm(ct::Event::Resize(80, 24)), None);
    }
}
