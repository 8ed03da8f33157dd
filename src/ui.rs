// Renderer capability: the game loop drives one of these, the board
// never hands out mutation rights to a backend.

use std::time::Duration;

use crate::board::Board;
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Discrete player commands delivered by a renderer's input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Reveal,
    Flag,
    Quit,
    /// Terminal geometry changed; layout is recomputed on the next frame.
    Resize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

/// Per-frame status data owned by the game loop.
pub struct Hud {
    /// Mine budget left to flag; can go negative with excess flags.
    pub remaining: isize,
    pub elapsed_secs: u64,
    /// Set on the end screen when this run beat the stored best time.
    pub new_record: bool,
}

/// A rendering backend plus its input source. Implementations read board
/// state through immutable borrows only.
pub trait Renderer {
    /// Claim the display surface. Fails with [`Error::OversizedBoard`]
    /// when the board cannot fit, before any game-loop iteration.
    fn initialize(&mut self, board: &Board) -> Result<(), Error>;

    /// Release the display surface. Idempotent.
    fn teardown(&mut self) -> Result<(), Error>;

    fn render(&mut self, board: &Board, hud: &Hud) -> Result<(), Error>;

    fn render_end_screen(
        &mut self,
        board: &Board,
        hud: &Hud,
        outcome: Outcome,
    ) -> Result<(), Error>;

    /// Wait up to `timeout` for the next command. `Ok(None)` means the
    /// timeout passed or an unmapped key arrived.
    fn poll_input(&mut self, timeout: Duration) -> Result<Option<Command>, Error>;
}
