// Entry point: argument parsing, difficulty resolution, renderer
// selection, then one game session.

use clap::Parser;
use std::process::ExitCode;

mod app;    // Game loop driving board, timer, and renderer
mod board;  // Core grid engine
mod color;  // Terminal color-capability matching
mod config; // Difficulty presets and best-time records
mod error;  // Session error taxonomy
mod plain;  // Plain-text renderer
mod timer;  // Stopwatch and display ticker
mod tui;    // Rich terminal renderer
mod ui;     // Renderer capability and command types

use config::Difficulty;
use ui::Renderer;

#[derive(Parser)]
#[command(
    version,
    about = "Play minesweeper in the terminal",
    after_help = "Controls:\n  Arrow keys / WASD   move the cursor\n  Space               reveal a cell\n  F                   flag a cell\n  Q                   quit"
)]
struct Args {
    /// Board height
    #[arg(short, long, default_value_t = 9, value_name = "ROWS")]
    rows: usize,

    /// Board width
    #[arg(short, long, default_value_t = 9, value_name = "COLS")]
    cols: usize,

    /// Mine count
    #[arg(short, long, default_value_t = 10, value_name = "MINES")]
    mines: usize,

    /// Difficulty preset (1-3), overrides rows/cols/mines
    #[arg(short, long, value_name = "D", value_parser = clap::value_parser!(u8).range(1..=3))]
    difficulty: Option<u8>,

    /// Render as plain text lines instead of the full-screen TUI
    #[arg(long)]
    plain: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let difficulty = match args.difficulty {
        Some(level) => Difficulty::preset(level),
        None => Difficulty::Custom(args.rows, args.cols, args.mines),
    };

    let mut renderer: Box<dyn Renderer> = if args.plain {
        Box::new(plain::Plain::new())
    } else {
        Box::new(tui::Tui::new(difficulty.name()))
    };

    match app::run(difficulty, renderer.as_mut()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
