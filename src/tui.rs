// Rich terminal renderer: raw-mode alternate screen, centered board,
// status row with mine counter and clock, end-screen modal.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode};
use crossterm::execute;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Span, Spans, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

use crate::board::{Board, Cell, CellState};
use crate::color;
use crate::error::Error;
use crate::ui::{Command, Direction, Hud, Outcome, Renderer};

const GLYPH_UNOPENED: &str = "■";
const GLYPH_MINE: &str = "☼";
const GLYPH_FLAG: &str = "⚑";

const BOARD_BG: Color = Color::DarkGray;
const CURSOR_BG: Color = Color::LightBlue;

pub struct Tui {
    title: &'static str,
    terminal: Option<Terminal<CrosstermBackend<Stdout>>>,
    // Palette resolved once against the terminal's color capabilities.
    digit_colors: [Color; 8],
}

impl Tui {
    pub fn new(title: &'static str) -> Self {
        Tui {
            title,
            terminal: None,
            digit_colors: std::array::from_fn(|i| color::digit_color(i as u8 + 1)),
        }
    }

    /// Board block size: two columns per cell plus padding and borders.
    fn board_size(board: &Board) -> (u16, u16) {
        ((board.cols() * 2 + 3) as u16, (board.rows() + 2) as u16)
    }

    fn draw_frame(
        &mut self,
        board: &Board,
        hud: &Hud,
        end: Option<Outcome>,
    ) -> Result<(), Error> {
        let Some(terminal) = self.terminal.as_mut() else {
            return Ok(());
        };
        let (board_w, board_h) = Tui::board_size(board);
        let title = self.title;
        let digit_colors = self.digit_colors;

        terminal.draw(|f| {
            let size = f.size();
            let chunks = Layout::default()
                .direction(LayoutDirection::Vertical)
                .constraints(
                    [
                        Constraint::Length(1),
                        Constraint::Min(3),
                        Constraint::Length(1),
                    ]
                    .as_ref(),
                )
                .split(size);

            // status row: mine counter left, clock right
            let left = format!(" Mines: {} ", hud.remaining);
            let clock = format!(
                " {:02}:{:02} ",
                hud.elapsed_secs / 60,
                hud.elapsed_secs % 60
            );
            let gap = (chunks[0].width as usize).saturating_sub(left.width() + clock.width());
            let status_style = Style::default().fg(Color::Yellow);
            let status = Paragraph::new(Spans::from(vec![
                Span::styled(left, status_style),
                Span::raw(" ".repeat(gap)),
                Span::styled(clock, status_style),
            ]));
            f.render_widget(status, chunks[0]);

            let hints = Paragraph::new(Spans::from(Span::raw(
                " Arrows/WASD move   Space reveal   F flag   Q quit ",
            )))
            .alignment(Alignment::Center);
            f.render_widget(hints, chunks[2]);

            // board, centered; border flips green/red on the end screen
            let border_style = match end {
                Some(Outcome::Won) => Style::default().fg(Color::Green),
                Some(Outcome::Lost) => Style::default().fg(Color::Red),
                None => Style::default().fg(Color::Blue),
            };
            let area = center_rect(board_w, board_h, chunks[1]);
            let mut lines = Vec::with_capacity(board.rows());
            for row in 0..board.rows() {
                let mut spans = Vec::with_capacity(board.cols() + 1);
                for col in 0..board.cols() {
                    let cell = board.cell(row, col);
                    let (glyph, mut style) = cell_span(cell, &digit_colors);
                    if cell.highlighted {
                        style = style.bg(CURSOR_BG).add_modifier(Modifier::BOLD);
                    }
                    spans.push(Span::styled(format!(" {glyph}"), style));
                }
                spans.push(Span::styled(" ", Style::default().bg(BOARD_BG)));
                lines.push(Spans::from(spans));
            }
            let paragraph = Paragraph::new(Text::from(lines)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(title)
                    .title_alignment(Alignment::Center),
            );
            f.render_widget(paragraph, area);

            if let Some(outcome) = end {
                let modal = bottom_centered_rect(40, 7, size);
                f.render_widget(Clear, modal);
                let (modal_title, message) = match outcome {
                    Outcome::Won => ("Success", "All mines cleared. You win!"),
                    Outcome::Lost => ("Failure", "You hit a mine. Game over."),
                };
                let time_line = if outcome == Outcome::Won && hud.new_record {
                    format!("Time: {} seconds (new record!)", hud.elapsed_secs)
                } else {
                    format!("Time: {} seconds", hud.elapsed_secs)
                };
                let lines = vec![
                    Spans::from(Span::raw("")),
                    Spans::from(Span::raw(message)),
                    Spans::from(Span::raw(time_line)),
                    Spans::from(Span::raw("")),
                    Spans::from(Span::styled(
                        "Space / Q to exit",
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                ];
                let p = Paragraph::new(Text::from(lines))
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(border_style)
                            .title(modal_title),
                    )
                    .alignment(Alignment::Center);
                f.render_widget(p, modal);
            }
        })?;
        Ok(())
    }
}

impl Renderer for Tui {
    fn initialize(&mut self, board: &Board) -> Result<(), Error> {
        // Size check happens before raw mode so the diagnostic stays
        // readable on the normal screen.
        let (board_w, board_h) = Tui::board_size(board);
        let need_cols = board_w;
        let need_rows = board_h + 2; // status and hint rows
        let (term_cols, term_rows) = terminal::size()?;
        if need_cols > term_cols || need_rows > term_rows {
            return Err(Error::OversizedBoard {
                need_cols,
                need_rows,
                term_cols,
                term_rows,
            });
        }

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, terminal::EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        self.terminal = Some(terminal);
        Ok(())
    }

    fn teardown(&mut self) -> Result<(), Error> {
        if let Some(mut terminal) = self.terminal.take() {
            disable_raw_mode()?;
            execute!(terminal.backend_mut(), terminal::LeaveAlternateScreen)?;
            terminal.show_cursor()?;
        }
        Ok(())
    }

    fn render(&mut self, board: &Board, hud: &Hud) -> Result<(), Error> {
        self.draw_frame(board, hud, None)
    }

    fn render_end_screen(
        &mut self,
        board: &Board,
        hud: &Hud,
        outcome: Outcome,
    ) -> Result<(), Error> {
        self.draw_frame(board, hud, Some(outcome))
    }

    fn poll_input(&mut self, timeout: Duration) -> Result<Option<Command>, Error> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => Ok(map_key(code)),
            Event::Resize(_, _) => Ok(Some(Command::Resize)),
            _ => Ok(None),
        }
    }
}

fn cell_span(cell: &Cell, digit_colors: &[Color; 8]) -> (String, Style) {
    let base = Style::default().bg(BOARD_BG);
    match cell.state {
        CellState::Unopened => (GLYPH_UNOPENED.to_string(), base.fg(Color::Gray)),
        CellState::Flagged => (GLYPH_FLAG.to_string(), base.fg(Color::Green)),
        CellState::Opened => {
            if cell.is_mine() {
                (GLYPH_MINE.to_string(), base.fg(Color::Red))
            } else if cell.mine_count > 0 {
                let n = cell.mine_count as usize;
                (cell.mine_count.to_string(), base.fg(digit_colors[n - 1]))
            } else {
                (" ".to_string(), base)
            }
        }
    }
}

fn map_key(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Up => Some(Command::Move(Direction::Up)),
        KeyCode::Down => Some(Command::Move(Direction::Down)),
        KeyCode::Left => Some(Command::Move(Direction::Left)),
        KeyCode::Right => Some(Command::Move(Direction::Right)),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Some(Command::Move(Direction::Up)),
            's' => Some(Command::Move(Direction::Down)),
            'a' => Some(Command::Move(Direction::Left)),
            'd' => Some(Command::Move(Direction::Right)),
            ' ' => Some(Command::Reveal),
            'f' => Some(Command::Flag),
            'q' => Some(Command::Quit),
            _ => None,
        },
        KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

fn center_rect(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn bottom_centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + r.height.saturating_sub(height);
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_commands_case_insensitively() {
        assert_eq!(map_key(KeyCode::Up), Some(Command::Move(Direction::Up)));
        assert_eq!(map_key(KeyCode::Char('W')), Some(Command::Move(Direction::Up)));
        assert_eq!(map_key(KeyCode::Char('a')), Some(Command::Move(Direction::Left)));
        assert_eq!(map_key(KeyCode::Char(' ')), Some(Command::Reveal));
        assert_eq!(map_key(KeyCode::Char('F')), Some(Command::Flag));
        assert_eq!(map_key(KeyCode::Char('q')), Some(Command::Quit));
        assert_eq!(map_key(KeyCode::Esc), Some(Command::Quit));
        assert_eq!(map_key(KeyCode::Char('x')), None);
    }

    #[test]
    fn board_block_fits_two_columns_per_cell() {
        let board = Board::new(9, 9, 10);
        assert_eq!(Tui::board_size(&board), (21, 11));
    }
}
