//! Building the demo's sequence set from command-line arguments.

use std::cell::RefCell;
use std::rc::Rc;

use inputseq_core::event::{Event, KeyCode};
use inputseq_core::token::parse_tokens;
use inputseq_core::{InputFrame, KeySequence, SequenceConfig, SequenceSet, TokenUniverse};

use crate::cli::Args;
use crate::error::{DemoError, Result};

/// The set the demo drives, plus handles to its members for display.
pub struct Gesture {
    pub set: SequenceSet<InputFrame>,
    members: Vec<Rc<RefCell<KeySequence>>>,
}

impl Gesture {
    pub fn build(args: &Args, config: SequenceConfig) -> Result<Self> {
        let primary = KeySequence::keyboard(parse_keys(&args.keys)?)
            .with_config(config)
            .with_name("keys");
        let mut members = vec![Rc::new(RefCell::new(primary))];

        if let Some(list) = &args.alt_keys {
            let keys = parse_keys(list)?;
            let alt = KeySequence::with_universe(keys.clone(), TokenUniverse::closed(keys))?
                .with_config(config)
                .with_name("alt");
            members.push(Rc::new(RefCell::new(alt)));
        }

        let mut set = SequenceSet::new()
            .with_name("gesture")
            .with_trace(config.trace);
        for member in &members {
            set = set.with_member(Rc::clone(member));
        }
        Ok(Self { set, members })
    }

    /// One line per member, cursor included.
    pub fn status(&self) -> String {
        self.members
            .iter()
            .map(|member| member.borrow().to_string())
            .collect::<Vec<_>>()
            .join("  |  ")
    }
}

/// Environment config with command-line flags layered on top.
#[must_use]
pub fn config_for(args: &Args, base: SequenceConfig) -> SequenceConfig {
    let mut config = base;
    if args.accessible {
        config = config.with_auto_reset(false);
    }
    if args.trace {
        config = config.with_trace(true);
    }
    config
}

fn parse_keys(list: &str) -> Result<Vec<KeyCode>> {
    let keys: Vec<KeyCode> = parse_tokens(list)?;
    if keys.is_empty() {
        return Err(DemoError::EmptyGesture(list.to_string()));
    }
    if keys.contains(&KeyCode::Escape) {
        return Err(DemoError::ReservedKey(KeyCode::Escape));
    }
    Ok(keys)
}

/// Esc or Ctrl+C. Ctrl+C is checked before latching, so a gesture may still
/// use a plain `c`.
#[must_use]
pub fn is_quit(event: &Event) -> bool {
    match event {
        Event::Key(key) if key.is_press() => {
            key.code == KeyCode::Escape || (key.ctrl() && key.is_char('c'))
        }
        _ => false,
    }
}
