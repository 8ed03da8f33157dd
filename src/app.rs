// Game loop: one session from init to end screen. Owns the board, the
// cursor, the stopwatch, and the mines-remaining counter; the renderer
// only ever sees immutable board state.

use std::sync::mpsc;
use std::time::Duration;

use crate::board::{Board, CellState};
use crate::config::{self, Difficulty};
use crate::error::Error;
use crate::timer::{spawn_ticker, ShutdownToken, Timer};
use crate::ui::{Command, Direction, Hud, Outcome, Renderer};

const TICK_RATE: Duration = Duration::from_millis(200);

/// Play one session. Startup errors (bad configuration, board larger
/// than the terminal) surface before the first loop iteration.
pub fn run(difficulty: Difficulty, renderer: &mut dyn Renderer) -> Result<(), Error> {
    let (rows, cols, mines) = difficulty.params();
    let mut board = Board::new(rows, cols, mines);
    board.init()?;
    renderer.initialize(&board)?;

    // Tear the display down on the error path too, so a failure mid-game
    // does not leave the terminal in raw mode.
    let result = play(difficulty, &mut board, renderer);
    let teardown = renderer.teardown();
    result.and(teardown)
}

fn play(
    difficulty: Difficulty,
    board: &mut Board,
    renderer: &mut dyn Renderer,
) -> Result<(), Error> {
    let rows = board.rows();
    let cols = board.cols();
    let mut cfg = config::load_or_create();
    let mut cursor = (0usize, 0usize);
    let mut remaining = board.mines() as isize;

    let mut timer = Timer::new();
    timer.start();
    let token = ShutdownToken::new();
    let (tick_tx, tick_rx) = mpsc::channel();
    let ticker = spawn_ticker(token.clone(), tick_tx);

    let mut outcome = None;
    while outcome.is_none() && !token.is_cancelled() {
        // Ticks only exist to force a repaint; the clock is re-read here.
        for _ in tick_rx.try_iter() {}

        let hud = Hud {
            remaining,
            elapsed_secs: timer.elapsed_secs(),
            new_record: false,
        };
        // Toggle-on, render, toggle-off: the highlight never survives a
        // frame, so board state stays clean for the next mutation.
        board.highlight_cell(cursor.0, cursor.1);
        renderer.render(board, &hud)?;
        board.highlight_cell(cursor.0, cursor.1);

        let Some(command) = renderer.poll_input(TICK_RATE)? else {
            continue;
        };
        match command {
            Command::Move(direction) => cursor = step(cursor, direction, rows, cols),
            Command::Flag => remaining += board.flag_cell(cursor.0, cursor.1) as isize,
            Command::Reveal => {
                let was_unopened = board.cell(cursor.0, cursor.1).state == CellState::Unopened;
                let value = board.click_cell(cursor.0, cursor.1);
                // A click on a flagged cell reports its value without a
                // transition; only a real reveal of a mine loses.
                if was_unopened && value == -1 {
                    outcome = Some(Outcome::Lost);
                } else if board.check_if_won() {
                    outcome = Some(Outcome::Won);
                }
            }
            Command::Quit => token.cancel(),
            Command::Resize => {} // layout is recomputed every frame
        }
    }

    timer.stop();
    token.cancel();

    if let Some(outcome) = outcome {
        let elapsed_secs = timer.elapsed_secs();
        let mut new_record = false;
        if outcome == Outcome::Won && cfg.record_win(&difficulty, elapsed_secs) {
            config::save(&cfg);
            new_record = true;
        }

        board.reveal_all();
        let hud = Hud {
            remaining,
            elapsed_secs,
            new_record,
        };
        renderer.render_end_screen(board, &hud, outcome)?;
        loop {
            match renderer.poll_input(TICK_RATE)? {
                Some(Command::Reveal) | Some(Command::Quit) => break,
                _ => {}
            }
        }
    }

    // Join before teardown: no tick may outlive the display surface.
    let _ = ticker.join();
    Ok(())
}

/// Move the cursor one cell, wrapping past either edge.
fn step(cursor: (usize, usize), direction: Direction, rows: usize, cols: usize) -> (usize, usize) {
    let (row, col) = cursor;
    match direction {
        Direction::Up => (if row == 0 { rows - 1 } else { row - 1 }, col),
        Direction::Down => (if row + 1 == rows { 0 } else { row + 1 }, col),
        Direction::Left => (row, if col == 0 { cols - 1 } else { col - 1 }),
        Direction::Right => (row, if col + 1 == cols { 0 } else { col + 1 }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_wraps_at_every_edge() {
        assert_eq!(step((0, 3), Direction::Up, 5, 7), (4, 3));
        assert_eq!(step((4, 3), Direction::Down, 5, 7), (0, 3));
        assert_eq!(step((2, 0), Direction::Left, 5, 7), (2, 6));
        assert_eq!(step((2, 6), Direction::Right, 5, 7), (2, 0));
    }

    #[test]
    fn cursor_moves_normally_inside_the_grid() {
        assert_eq!(step((2, 3), Direction::Up, 5, 7), (1, 3));
        assert_eq!(step((2, 3), Direction::Right, 5, 7), (2, 4));
    }
}
