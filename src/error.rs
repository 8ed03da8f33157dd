use thiserror::Error;

/// Fatal session errors. All of these surface before the first game-loop
/// iteration; the core has no retries.
#[derive(Debug, Error)]
pub enum Error {
    #[error("board too small or too many mines: {rows}x{cols} cannot hold {mines} mines")]
    InvalidConfiguration {
        rows: usize,
        cols: usize,
        mines: usize,
    },

    #[error(
        "board too big: needs a {need_cols}x{need_rows} terminal, have {term_cols}x{term_rows}"
    )]
    OversizedBoard {
        need_cols: u16,
        need_rows: u16,
        term_cols: u16,
        term_rows: u16,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
