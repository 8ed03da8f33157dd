// Plain-text renderer: line-oriented stdout/stdin, no terminal control.
// Useful for dumb terminals and for driving the game from scripts.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use crate::board::{Board, Cell, CellState};
use crate::error::Error;
use crate::ui::{Command, Direction, Hud, Outcome, Renderer};

#[derive(Default)]
pub struct Plain;

impl Plain {
    pub fn new() -> Self {
        Plain
    }

    fn print_board(&self, board: &Board, hud: &Hud) -> Result<(), Error> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        writeln!(
            out,
            "\nMines: {}   Time: {:02}:{:02}",
            hud.remaining,
            hud.elapsed_secs / 60,
            hud.elapsed_secs % 60
        )?;
        for row in 0..board.rows() {
            for col in 0..board.cols() {
                let cell = board.cell(row, col);
                // Brackets mark the cursor cell.
                let (open, close) = if cell.highlighted { ('[', ']') } else { (' ', ' ') };
                write!(out, "{}{}{}", open, cell_char(cell), close)?;
            }
            writeln!(out)?;
        }
        out.flush()?;
        Ok(())
    }
}

impl Renderer for Plain {
    fn initialize(&mut self, _board: &Board) -> Result<(), Error> {
        Ok(())
    }

    fn teardown(&mut self) -> Result<(), Error> {
        Ok(())
    }

    fn render(&mut self, board: &Board, hud: &Hud) -> Result<(), Error> {
        self.print_board(board, hud)?;
        let stdout = io::stdout();
        let mut out = stdout.lock();
        write!(out, "move: w/a/s/d   reveal: r   flag: f   quit: q\n> ")?;
        out.flush()?;
        Ok(())
    }

    fn render_end_screen(
        &mut self,
        board: &Board,
        hud: &Hud,
        outcome: Outcome,
    ) -> Result<(), Error> {
        self.print_board(board, hud)?;
        let stdout = io::stdout();
        let mut out = stdout.lock();
        match outcome {
            Outcome::Won => {
                writeln!(out, "All mines cleared. You win!")?;
                if hud.new_record {
                    writeln!(out, "New record: {} seconds", hud.elapsed_secs)?;
                }
            }
            Outcome::Lost => writeln!(out, "You hit a mine. Game over.")?,
        }
        write!(out, "press Enter to exit\n> ")?;
        out.flush()?;
        Ok(())
    }

    /// Blocking line input; the timeout does not apply to a terminal
    /// reading lines, so the clock only advances per rendered frame.
    fn poll_input(&mut self, _timeout: Duration) -> Result<Option<Command>, Error> {
        let mut line = String::new();
        let n = io::stdin().lock().read_line(&mut line)?;
        if n == 0 {
            // EOF: treat as quit so a closed pipe ends the session.
            return Ok(Some(Command::Quit));
        }
        Ok(map_line(&line))
    }
}

fn cell_char(cell: &Cell) -> char {
    match cell.state {
        CellState::Unopened => '.',
        CellState::Flagged => 'F',
        CellState::Opened => {
            if cell.is_mine() {
                '*'
            } else if cell.mine_count > 0 {
                (b'0' + cell.mine_count as u8) as char
            } else {
                ' '
            }
        }
    }
}

fn map_line(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        // Bare Enter doubles as reveal, which also dismisses end screens.
        return Some(Command::Reveal);
    }
    match trimmed.chars().next()?.to_ascii_lowercase() {
        'w' => Some(Command::Move(Direction::Up)),
        's' => Some(Command::Move(Direction::Down)),
        'a' => Some(Command::Move(Direction::Left)),
        'd' => Some(Command::Move(Direction::Right)),
        'r' => Some(Command::Reveal),
        'f' => Some(Command::Flag),
        'q' => Some(Command::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn lines_map_to_commands() {
        assert_eq!(map_line("w\n"), Some(Command::Move(Direction::Up)));
        assert_eq!(map_line("  D \n"), Some(Command::Move(Direction::Right)));
        assert_eq!(map_line("r\n"), Some(Command::Reveal));
        assert_eq!(map_line("\n"), Some(Command::Reveal));
        assert_eq!(map_line("f\n"), Some(Command::Flag));
        assert_eq!(map_line("q\n"), Some(Command::Quit));
        assert_eq!(map_line("zz\n"), None);
    }

    #[test]
    fn cell_chars_cover_all_states() {
        let mut board = Board::new(1, 2, 0);
        board.init().unwrap();
        assert_eq!(cell_char(board.cell(0, 0)), '.');
        board.flag_cell(0, 0);
        assert_eq!(cell_char(board.cell(0, 0)), 'F');
        board.click_cell(0, 1);
        assert_eq!(cell_char(board.cell(0, 1)), ' ');
    }
}
