use anyhow::{bail, Context};
use mega3t::{Board, Mutation, Pieces, MAX_N_ROWS};

/// A bot's own copy of the game, rebuilt from the mutations it is told about.
///
/// Bots only see the moves since their last turn. Replaying them here gives
/// a full [`Board`] with area winners and allowed moves to reason about.
#[derive(Clone, Debug, Default)]
pub struct BoardTracker {
    board: Option<Board>,
}

impl BoardTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking a fresh game.
    pub fn new_game(&mut self, n_rows: u8, pieces: &Pieces) -> anyhow::Result<()> {
        self.board = None;
        if !(2..=MAX_N_ROWS).contains(&n_rows) {
            bail!("Unsupported board size {}", n_rows);
        }
        self.board = Some(Board::new(pieces.clone(), n_rows));
        Ok(())
    }

    /// Applies the moves since the last call, oldest first.
    ///
    /// Each move must be an allowed move of the piece whose turn it is.
    pub fn replay(&mut self, mutations: &[Mutation]) -> anyhow::Result<&Board> {
        let board = self.board.as_mut().context("No game in progress")?;
        for mutation in mutations {
            if mutation.piece != board.current_piece() {
                bail!(
                    "Move {} by {}, but it is the turn of {}",
                    mutation.coord,
                    mutation.piece,
                    board.current_piece()
                );
            }
            board
                .check_move(mutation.coord)
                .with_context(|| format!("Replaying the move by {}", mutation.piece))?;
            board.make_a_move(mutation.coord);
        }
        Ok(board)
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }
}
