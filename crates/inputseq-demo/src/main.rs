#![forbid(unsafe_code)]

//! Terminal demo for `inputseq-core`.
//!
//! Reads keys in raw mode, latches them into an [`InputFrame`] once per tick,
//! and drives a [`SequenceSet`](inputseq_core::SequenceSet) built from the
//! command line. Completion is announced and the set starts over.

mod cli;
mod error;
mod gesture;
mod terminal;

use std::io::{self, Write};
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event as ct;
use inputseq_core::event::Event;
use inputseq_core::{InputFrame, SequenceConfig};
use tracing_subscriber::EnvFilter;

use crate::cli::Args;
use crate::error::Result;
use crate::gesture::Gesture;
use crate::terminal::RawModeGuard;

fn main() {
    let args = Args::parse();
    if let Err(error) = run(&args) {
        eprintln!("{error}");
        std::process::exit(error.exit_code());
    }
}

fn init_logging(args: &Args) {
    if args.json_logs {
        inputseq_core::logging::init_json_logging();
        return;
    }
    let fallback = if args.trace {
        "inputseq=trace"
    } else {
        "inputseq=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run(args: &Args) -> Result<()> {
    init_logging(args);

    let config = gesture::config_for(args, SequenceConfig::from_env());
    let mut gesture = Gesture::build(args, config)?;
    let tick = Duration::from_millis(args.tick_ms);

    let _guard = RawModeGuard::enter()?;
    let mut out = io::stdout();
    write!(out, "{}\r\nEsc or Ctrl+C quits\r\n", gesture.status())?;
    out.flush()?;

    let mut frame = InputFrame::new();
    loop {
        let deadline = Instant::now() + tick;
        while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
            if !ct::poll(remaining)? {
                break;
            }
            let Some(event) = Event::from_crossterm(ct::read()?) else {
                continue;
            };
            if gesture::is_quit(&event) {
                return Ok(());
            }
            frame.record(&event);
        }

        let before = gesture.set.progress();
        let idle = frame.is_idle();
        gesture.set.update(&frame);
        frame.end_step();

        if gesture.set.is_complete() {
            write!(out, "{}\r\n*** gesture complete ***\r\n", gesture.status())?;
            tracing::info!("gesture complete");
            gesture.set.reset();
        } else if !idle || gesture.set.progress() != before {
            write!(out, "{}\r\n", gesture.status())?;
        }
        out.flush()?;
    }
}
