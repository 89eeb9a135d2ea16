use crate::Piece;

/// Keeps track of whose turn it is.
///
/// The turn index always stays below the number of pieces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnController {
    turn: usize,
    num_pieces: usize,
}

impl TurnController {
    /// Starts with the first piece.
    pub fn new(num_pieces: usize) -> Self {
        assert!(num_pieces > 0);
        Self {
            turn: 0,
            num_pieces,
        }
    }

    pub fn current(&self) -> Piece {
        Piece(self.turn as u8)
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Passes the turn to the next piece, wrapping around after the last one.
    pub fn advance(&mut self) {
        self.turn = (self.turn + 1) % self.num_pieces;
    }

    pub fn reset(&mut self) {
        self.turn = 0;
    }
}
