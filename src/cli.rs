//! Command-line configuration shared by the binaries.

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::board::BoardSize;
use crate::error::Result;

/// Who plays O
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ModeArg {
    /// Two humans share the board
    #[default]
    Multiplayer,
    /// The engine plays O
    Ai,
}

/// N×N tic-tac-toe with a minimax opponent
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(version, long_about = None)]
pub struct Cli {
    /// Board width (3, 4 or 5)
    #[arg(short, long, default_value_t = 3)]
    pub size: u8,

    /// Game mode
    #[arg(short, long, value_enum, default_value_t = ModeArg::Multiplayer)]
    pub mode: ModeArg,

    /// Split the AI search over all available cores
    #[arg(long)]
    pub parallel: bool,

    /// Log filter, overrides RUST_LOG (e.g. "debug" or "tictactoe=trace")
    #[arg(long)]
    pub log: Option<String>,
}

impl Cli {
    /// Validated board size
    pub fn board_size(&self) -> Result<BoardSize> {
        BoardSize::try_from(self.size)
    }
}

/// Install the global tracing subscriber.
///
/// The filter comes from `--log`, then `RUST_LOG`, then defaults to `info`.
pub fn init_tracing(filter: Option<&str>) {
    let filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    // A second call (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
