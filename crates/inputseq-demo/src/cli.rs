use clap::Parser;

/// Up, up, down, down, left, right, left, right, B, A.
pub const KONAMI: &str = "up,up,down,down,left,right,left,right,b,a";

#[derive(Debug, Parser)]
#[command(
    name = "inputseq-demo",
    about = "Type a key gesture and watch it being recognized",
    version
)]
pub struct Args {
    /// Comma-separated key names for the gesture.
    #[arg(long, default_value = KONAMI)]
    pub keys: String,

    /// Alternative spelling of the same gesture. Only its own keys count as
    /// input for it, so typing the primary gesture never resets it.
    #[arg(long)]
    pub alt_keys: Option<String>,

    /// Ignore wrong keys instead of starting over.
    #[arg(long)]
    pub accessible: bool,

    /// Emit per-step diagnostics.
    #[arg(long)]
    pub trace: bool,

    /// Log as JSON to stderr (filter with RUST_LOG).
    #[arg(long)]
    pub json_logs: bool,

    /// Step length in milliseconds.
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,
}
