//! Tic-tac-toe GUI
//!
//! A graphical interface for playing against the AI or another player.

use clap::Parser;
use tictactoe::cli::{init_tracing, Cli, ModeArg};
use tictactoe::ui::{GameMode, TicTacToeApp};

fn main() -> Result<(), eframe::Error> {
    let cli = Cli::parse();
    init_tracing(cli.log.as_deref());

    let size = match cli.board_size() {
        Ok(size) => size,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    };
    let mode = match cli.mode {
        ModeArg::Multiplayer => GameMode::Multiplayer,
        ModeArg::Ai => GameMode::VsAi,
    };
    tracing::info!(%size, mode = mode.label(), parallel = cli.parallel, "starting");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([820.0, 580.0])
            .with_min_inner_size([600.0, 420.0])
            .with_title("Tic-Tac-Toe"),
        ..Default::default()
    };

    eframe::run_native(
        "Tic-Tac-Toe",
        options,
        Box::new(move |cc| Ok(Box::new(TicTacToeApp::new(cc, size, mode, cli.parallel)))),
    )
}
