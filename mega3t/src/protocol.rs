use serde::{Deserialize, Serialize};

use crate::{Coord, Mutation, Piece, Pieces};

/// Request for a bot to do something.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Request to reset the bot's state for a new game.
    ///
    /// The response should be an [`Okay`].
    NewGame {
        /// The piece the bot plays with.
        piece: Piece,
        /// Rows of areas on the board, and rows of tiles in an area.
        n_rows: u8,
        /// Everyone in the game, in turn order.
        pieces: Pieces,
    },
    /// Request to play a move.
    ///
    /// The response should be a single [`Coord`] among the `allowed_moves`.
    PlayTurn {
        /// Every move made since the bot's last turn, including the bot's own
        /// last move, oldest first.
        mutations: Vec<Mutation>,
        /// The tiles the bot may play, in x-major order.
        allowed_moves: Vec<Coord>,
    },
    /// The bot should shut down.
    Bye,
}

/// Dummy struct for use in bot communication.
///
/// Used to signal an acknowledgement without data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Okay();
