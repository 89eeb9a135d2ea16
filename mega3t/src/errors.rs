use crate::{Coord, Piece};

/// Misuse of the board's API.
///
/// No choice of move by a player can cause these, so they indicate a bug in
/// the caller rather than something to recover from. Compare [`IllegalMove`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardError {
    OutOfBounds { x: u8, y: u8, side: u8 },
    UnknownPiece(Piece),
    UnregisteredObserver(Piece),
}

impl std::error::Error for BoardError {}

impl std::fmt::Display for BoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardError::OutOfBounds { x, y, side } => write!(
                f,
                "Coordinate ({}, {}) is outside of a grid with side length {}",
                x, y, side
            ),
            BoardError::UnknownPiece(piece) => {
                write!(f, "{} is not registered for this game", piece)
            }
            BoardError::UnregisteredObserver(piece) => write!(
                f,
                "Tried to read the mutations of {}, which is not a registered observer",
                piece
            ),
        }
    }
}

/// Why a move was rejected, see [`Board::check_move()`](crate::Board::check_move).
///
/// Rejections are routine: [`Board::make_a_move()`](crate::Board::make_a_move)
/// reports them by returning `false`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    GameOver,
    NotAllowed(Coord),
}

impl std::error::Error for IllegalMove {}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::GameOver => write!(f, "The game is already over"),
            IllegalMove::NotAllowed(coord) => {
                write!(f, "Tile {} is not one of the allowed moves", coord)
            }
        }
    }
}

/// A registry of pieces that no game can be played with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidPieces {
    Empty,
    TooMany(usize),
}

impl std::error::Error for InvalidPieces {}

impl std::fmt::Display for InvalidPieces {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidPieces::Empty => write!(f, "A game needs at least one piece"),
            InvalidPieces::TooMany(num) => {
                write!(f, "Got {} pieces, but at most {} are supported", num, u8::MAX)
            }
        }
    }
}
