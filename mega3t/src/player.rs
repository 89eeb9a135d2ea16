use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;

use crate::{AllowedMoves, Coord, Mutation, Piece, Pieces};

/// Something that picks moves for one piece.
///
/// The same capability is served by in-process players and by bots behind
/// the JSON protocol.
pub trait Player {
    /// Forget the previous game and start playing `piece`.
    fn new_game(&mut self, piece: Piece, n_rows: u8, pieces: &Pieces);

    /// Pick a move.
    ///
    /// `mutations` holds every move since this player's last turn, its own
    /// last move included. The answer should be one of `allowed_moves`.
    ///
    /// Players are only asked while the game is in progress, when
    /// `allowed_moves` is never empty. If it is empty anyway, there is no
    /// right answer: implementations return `Coord::default()`, i.e. `(0, 0)`,
    /// which the board rejects like any other move.
    fn play(&mut self, mutations: Vec<Mutation>, allowed_moves: &AllowedMoves) -> Coord;
}

/// Plays a uniformly random allowed move.
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl Player for RandomPlayer {
    fn new_game(&mut self, _piece: Piece, _n_rows: u8, _pieces: &Pieces) {}

    fn play(&mut self, _mutations: Vec<Mutation>, allowed_moves: &AllowedMoves) -> Coord {
        // (0, 0) with nothing allowed, see Player::play
        allowed_moves
            .iter()
            .choose(&mut self.rng)
            .unwrap_or_default()
    }
}
