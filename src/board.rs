// Board engine: grid data model, mine placement, reveal cascade, win detection
// Pure state machine with no I/O; the game loop serializes all mutation.

use rand::prelude::*;

use crate::error::Error;

/// Visibility state of a single cell.
///
/// `Opened` is terminal per cell; `Unopened` and `Flagged` toggle into
/// each other via [`Board::flag_cell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    #[default]
    Unopened,
    Opened,
    Flagged,
}

/// One grid position.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cell {
    pub state: CellState,
    /// -1 marks a mine; otherwise the count of mines among the up to
    /// eight neighbors (0-8).
    pub mine_count: i8,
    /// Cosmetic cursor marker, no effect on game logic.
    pub highlighted: bool,
}

impl Cell {
    pub fn is_mine(&self) -> bool {
        self.mine_count == -1
    }
}

/// The minefield grid and its session state.
///
/// Owned exclusively by the game loop for the duration of one session;
/// not safe for concurrent mutation and provides no locking.
pub struct Board {
    rows: usize,
    cols: usize,
    mines: usize,
    grid: Vec<Cell>,
}

impl Board {
    /// Create an empty board. No mines are placed until [`Board::init`].
    pub fn new(rows: usize, cols: usize, mines: usize) -> Self {
        Board {
            rows,
            cols,
            mines,
            grid: vec![Cell::default(); rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn mines(&self) -> usize {
        self.mines
    }

    /// Read-only view of a cell, for rendering.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.grid[self.index(row, col)]
    }

    /// Convert (row, col) coordinates to flat array index.
    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }

    /// Randomly place the configured number of mines and compute neighbor
    /// counts. Single-use per instance: re-running on a board that already
    /// holds mines would accumulate stale neighbor counts, so start a
    /// fresh `Board` for a new game instead.
    ///
    /// Fails with [`Error::InvalidConfiguration`] when the grid cannot
    /// hold the requested mines.
    pub fn init(&mut self) -> Result<(), Error> {
        if self.rows == 0 || self.cols == 0 || self.rows * self.cols < self.mines {
            return Err(Error::InvalidConfiguration {
                rows: self.rows,
                cols: self.cols,
                mines: self.mines,
            });
        }
        debug_assert!(self.grid.iter().all(|c| !c.is_mine()), "init is single-use");

        let mut rng = thread_rng();
        let mut placed = 0;
        while placed < self.mines {
            // Rejection sampling: collisions retry. Bounded in expectation
            // because placed mines never reach the cell count here.
            let row = rng.gen_range(0..self.rows);
            let col = rng.gen_range(0..self.cols);
            if self.place_mine(row, col) {
                placed += 1;
            }
        }
        Ok(())
    }

    /// Set the mine count, then place mines as [`Board::init`] does.
    pub fn init_with(&mut self, mines: usize) -> Result<(), Error> {
        self.mines = mines;
        self.init()
    }

    /// Mark (row, col) as a mine and bump each non-mine neighbor's count.
    /// Returns false without any change if the cell already holds a mine.
    fn place_mine(&mut self, row: usize, col: usize) -> bool {
        let idx = self.index(row, col);
        if self.grid[idx].is_mine() {
            return false;
        }
        self.grid[idx].mine_count = -1;
        for r in row.saturating_sub(1)..=(row + 1).min(self.rows - 1) {
            for c in col.saturating_sub(1)..=(col + 1).min(self.cols - 1) {
                let n = self.index(r, c);
                if !self.grid[n].is_mine() {
                    self.grid[n].mine_count += 1;
                }
            }
        }
        true
    }

    /// Toggle the flag on (row, col) and report the mines-remaining delta:
    /// 0 for an opened cell (no change), +1 when removing a flag, -1 when
    /// placing one. Callers keep their counter with `remaining += delta`.
    pub fn flag_cell(&mut self, row: usize, col: usize) -> i32 {
        let idx = self.index(row, col);
        match self.grid[idx].state {
            CellState::Opened => 0,
            CellState::Flagged => {
                self.grid[idx].state = CellState::Unopened;
                1
            }
            CellState::Unopened => {
                self.grid[idx].state = CellState::Flagged;
                -1
            }
        }
    }

    /// Toggle the cosmetic cursor marker on (row, col).
    pub fn highlight_cell(&mut self, row: usize, col: usize) {
        let idx = self.index(row, col);
        self.grid[idx].highlighted = !self.grid[idx].highlighted;
    }

    /// Open (row, col) and return its mine count (-1 for a mine).
    ///
    /// Only an Unopened cell changes state; a click on a Flagged or
    /// Opened cell reports the count without opening anything, so callers
    /// must confirm the cell was Unopened before reading -1 as a loss.
    /// Opening a zero-count cell cascades through its connected zero
    /// region; opening a mine does not cascade.
    pub fn click_cell(&mut self, row: usize, col: usize) -> i8 {
        let idx = self.index(row, col);
        if self.grid[idx].state != CellState::Unopened {
            return self.grid[idx].mine_count;
        }
        self.grid[idx].state = CellState::Opened;
        let count = self.grid[idx].mine_count;
        if count == 0 {
            self.open_adjacent_cells(row, col);
        }
        count
    }

    /// Flood-fill expansion of a just-opened zero-count cell. Uses an
    /// explicit work stack so large empty regions cannot exhaust the call
    /// stack. Mines, flags, and already-opened cells are left untouched;
    /// each cell opens at most once, which bounds the walk.
    fn open_adjacent_cells(&mut self, row: usize, col: usize) {
        let mut pending = vec![(row, col)];
        while let Some((row, col)) = pending.pop() {
            for r in row.saturating_sub(1)..=(row + 1).min(self.rows - 1) {
                for c in col.saturating_sub(1)..=(col + 1).min(self.cols - 1) {
                    if r == row && c == col {
                        continue;
                    }
                    let idx = self.index(r, c);
                    let cell = &mut self.grid[idx];
                    if cell.state == CellState::Unopened && !cell.is_mine() {
                        cell.state = CellState::Opened;
                        if cell.mine_count == 0 {
                            pending.push((r, c));
                        }
                    }
                }
            }
        }
    }

    /// True when every non-mine cell is Opened. Mines need not be flagged.
    pub fn check_if_won(&self) -> bool {
        self.grid
            .iter()
            .all(|cell| cell.is_mine() || cell.state == CellState::Opened)
    }

    /// Force every cell open and clear all highlights, for the end
    /// screen. Irreversible; the session ends right after.
    pub fn reveal_all(&mut self) {
        for cell in &mut self.grid {
            cell.state = CellState::Opened;
            cell.highlighted = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Board with a fixed mine layout, bypassing the RNG.
    fn board_with_mines(rows: usize, cols: usize, mines: &[(usize, usize)]) -> Board {
        let mut board = Board::new(rows, cols, mines.len());
        for &(row, col) in mines {
            assert!(board.place_mine(row, col));
        }
        board
    }

    #[test]
    fn init_places_exact_mines_with_correct_counts() {
        let mut board = Board::new(9, 9, 10);
        board.init().unwrap();

        let mine_cells = board.grid.iter().filter(|c| c.is_mine()).count();
        assert_eq!(mine_cells, 10);

        for row in 0..9 {
            for col in 0..9 {
                let cell = board.cell(row, col);
                if cell.is_mine() {
                    continue;
                }
                let mut expected = 0;
                for r in row.saturating_sub(1)..=(row + 1).min(8) {
                    for c in col.saturating_sub(1)..=(col + 1).min(8) {
                        if board.cell(r, c).is_mine() {
                            expected += 1;
                        }
                    }
                }
                assert_eq!(cell.mine_count, expected, "at ({row}, {col})");
            }
        }
    }

    #[test]
    fn repeated_init_is_always_exact() {
        for _ in 0..20 {
            let mut board = Board::new(9, 9, 10);
            board.init().unwrap();
            assert_eq!(board.grid.iter().filter(|c| c.is_mine()).count(), 10);
        }
    }

    #[test]
    fn init_fails_iff_mines_exceed_cells() {
        assert!(matches!(
            Board::new(2, 2, 5).init(),
            Err(Error::InvalidConfiguration { .. })
        ));
        // Full board is still a valid configuration.
        assert!(Board::new(2, 2, 4).init().is_ok());
        assert!(Board::new(0, 5, 0).init().is_err());
    }

    #[test]
    fn init_with_overrides_mine_count() {
        let mut board = Board::new(4, 4, 0);
        board.init_with(3).unwrap();
        assert_eq!(board.mines(), 3);
        assert_eq!(board.grid.iter().filter(|c| c.is_mine()).count(), 3);
    }

    #[test]
    fn flag_round_trips_on_unopened_cell() {
        let mut board = board_with_mines(3, 3, &[(0, 0)]);
        assert_eq!(board.flag_cell(1, 1), -1);
        assert_eq!(board.cell(1, 1).state, CellState::Flagged);
        assert_eq!(board.flag_cell(1, 1), 1);
        assert_eq!(board.cell(1, 1).state, CellState::Unopened);
    }

    #[test]
    fn flag_on_opened_cell_is_a_no_op() {
        let mut board = board_with_mines(3, 3, &[(0, 0)]);
        board.click_cell(2, 2);
        assert_eq!(board.flag_cell(2, 2), 0);
        assert_eq!(board.cell(2, 2).state, CellState::Opened);
    }

    #[test]
    fn clicking_a_mine_opens_it_without_cascade() {
        let mut board = board_with_mines(3, 3, &[(1, 1)]);
        assert_eq!(board.click_cell(1, 1), -1);
        assert_eq!(board.cell(1, 1).state, CellState::Opened);
        for row in 0..3 {
            for col in 0..3 {
                if (row, col) != (1, 1) {
                    assert_eq!(board.cell(row, col).state, CellState::Unopened);
                }
            }
        }
    }

    #[test]
    fn clicking_a_flagged_cell_reports_without_opening() {
        let mut board = board_with_mines(2, 2, &[(0, 0)]);
        board.flag_cell(0, 0);
        // The mine value comes back, but no transition happened; the
        // caller must not read this as a loss.
        assert_eq!(board.click_cell(0, 0), -1);
        assert_eq!(board.cell(0, 0).state, CellState::Flagged);
    }

    #[test]
    fn cascade_opens_zero_region_and_its_border() {
        // Mine in one corner: everything outside its ring counts zero.
        let mut board = board_with_mines(4, 4, &[(3, 3)]);
        assert_eq!(board.click_cell(0, 0), 0);
        for row in 0..4 {
            for col in 0..4 {
                let cell = board.cell(row, col);
                if cell.is_mine() {
                    assert_eq!(cell.state, CellState::Unopened);
                } else {
                    assert_eq!(cell.state, CellState::Opened, "at ({row}, {col})");
                }
            }
        }
        assert!(board.check_if_won());
    }

    #[test]
    fn flag_blocks_cascade() {
        // Single empty row; a flag in the middle splits the zero region.
        let mut board = board_with_mines(1, 5, &[]);
        board.flag_cell(0, 2);
        board.click_cell(0, 0);
        assert_eq!(board.cell(0, 1).state, CellState::Opened);
        assert_eq!(board.cell(0, 2).state, CellState::Flagged);
        assert_eq!(board.cell(0, 3).state, CellState::Unopened);
        assert_eq!(board.cell(0, 4).state, CellState::Unopened);
    }

    #[test]
    fn win_happens_exactly_when_last_safe_cell_opens() {
        let mut board = board_with_mines(2, 2, &[(0, 0)]);
        board.click_cell(0, 1);
        assert!(!board.check_if_won());
        board.click_cell(1, 0);
        assert!(!board.check_if_won());
        board.click_cell(1, 1);
        assert!(board.check_if_won());
    }

    #[test]
    fn reveal_all_opens_everything_and_clears_highlights() {
        let mut board = board_with_mines(3, 3, &[(0, 2), (2, 0)]);
        board.flag_cell(0, 0);
        board.highlight_cell(1, 1);
        board.reveal_all();
        for cell in &board.grid {
            assert_eq!(cell.state, CellState::Opened);
            assert!(!cell.highlighted);
        }
    }

    #[test]
    fn trivial_one_cell_board() {
        let mut board = Board::new(1, 1, 0);
        board.init().unwrap();
        assert_eq!(board.click_cell(0, 0), 0);
        assert!(board.check_if_won());
    }

    #[test]
    fn highlight_is_a_pure_toggle() {
        let mut board = board_with_mines(2, 2, &[]);
        board.highlight_cell(0, 1);
        assert!(board.cell(0, 1).highlighted);
        board.highlight_cell(0, 1);
        assert!(!board.cell(0, 1).highlighted);
        assert_eq!(board.cell(0, 1).state, CellState::Unopened);
    }
}
