#![forbid(unsafe_code)]

//! Per-sequence policy and diagnostics configuration.
//!
//! # Defaults
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `auto_reset` | true | A wrong input sends progress back to the start |
//! | `trace` | false | Per-step diagnostics through `tracing` |
//!
//! # Environment Variables
//!
//! | Variable | Type | Default | Description |
//! |----------|------|---------|-------------|
//! | `INPUTSEQ_TRACE` | bool | false | Enable per-step diagnostics |
//! | `INPUTSEQ_ACCESSIBLE` | bool | false | Disable reset on wrong input |
//!
//! ```bash
//! # Forgiving input for players who need it
//! export INPUTSEQ_ACCESSIBLE=1
//! ```

/// Configuration for an [`InputSequence`](crate::sequence::InputSequence).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceConfig {
    /// Reset progress when a token other than the expected one fires.
    ///
    /// Turning this off is the accessibility accommodation: only correct
    /// inputs matter and mistakes are simply skipped over.
    /// Default: true.
    pub auto_reset: bool,

    /// Emit per-step diagnostics (index, expected token, next token, resets,
    /// completion). Purely observational.
    /// Default: false.
    pub trace: bool,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            auto_reset: true,
            trace: false,
        }
    }
}

impl SequenceConfig {
    /// Set the auto-reset policy.
    #[must_use]
    pub fn with_auto_reset(mut self, auto_reset: bool) -> Self {
        self.auto_reset = auto_reset;
        self
    }

    /// Enable or disable diagnostics.
    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Load config from environment variables.
    ///
    /// Reads:
    /// - `INPUTSEQ_TRACE`: "1" or "true" enables diagnostics
    /// - `INPUTSEQ_ACCESSIBLE`: "1" or "true" disables auto-reset
    ///
    /// Unset variables keep their defaults; any other value means false.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = lookup("INPUTSEQ_TRACE") {
            config.trace = parse_flag(&val);
        }

        if let Some(val) = lookup("INPUTSEQ_ACCESSIBLE") {
            config.auto_reset = !parse_flag(&val);
        }

        config
    }
}

fn parse_flag(val: &str) -> bool {
    let val = val.trim();
    val == "1" || val.eq_ignore_ascii_case("true")
}
