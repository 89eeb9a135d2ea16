//! A single-agent environment for reinforcement learning.
//!
//! The agent plays the first piece of the registry, every other piece is
//! played by a [`Player`] inside the environment. One step is one move of the
//! agent followed by the moves of all opponents.
use tracing::{debug, warn};

use crate::{Board, BoardError, Coord, GameOutcome, Piece, Pieces, Player, DEFAULT_N_ROWS};

pub const WIN_REWARD: f64 = 1.0;
pub const LOSE_REWARD: f64 = -1.0;
pub const ILLEGAL_MOVE_REWARD: f64 = -1.0;
pub const DRAW_REWARD: f64 = 0.0;
pub const WIN_AREA_REWARD: f64 = 0.1;
pub const LOSE_AREA_REWARD: f64 = -0.05;

/// Attempts an opponent gets before it is given the first allowed move.
const MAX_OPPONENT_ATTEMPTS: usize = 100;

/// What the agent sees after an action.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    /// One value per tile in x-major order: 0 when empty, otherwise the
    /// registry position of the piece plus one (so 1 is the agent).
    pub observation: Vec<u8>,
    pub reward: f64,
    /// Whether the episode ended.
    pub done: bool,
}

pub struct Mega3TEnv {
    board: Board,
    agent: Piece,
    opponents: Vec<(Piece, Box<dyn Player>)>,
}

impl Mega3TEnv {
    /// # Panics
    ///
    /// If there is not exactly one opponent for each piece after the first,
    /// or if `n_rows` is not supported by [`Board::new()`].
    ///
    /// Fails if an opponent's piece cannot follow the game as an observer.
    pub fn new(
        pieces: Pieces,
        opponents: Vec<Box<dyn Player>>,
        n_rows: u8,
    ) -> Result<Self, BoardError> {
        assert_eq!(
            pieces.len(),
            opponents.len() + 1,
            "Need one opponent for every piece except the agent's"
        );
        let mut board = Board::new(pieces, n_rows);
        let agent = board.current_piece();
        let opponent_pieces: Vec<Piece> = board.pieces().iter().skip(1).collect();
        for &piece in &opponent_pieces {
            board.register_observer(piece)?;
        }
        let mut env = Self {
            board,
            agent,
            opponents: opponent_pieces.into_iter().zip(opponents).collect(),
        };
        env.reset();
        Ok(env)
    }

    /// Cross against nought on a standard board, the agent being cross.
    pub fn noughts_and_crosses(opponent: Box<dyn Player>) -> Result<Self, BoardError> {
        Self::new(Pieces::noughts_and_crosses(), vec![opponent], DEFAULT_N_ROWS)
    }

    /// Starts a new episode and returns the first observation.
    pub fn reset(&mut self) -> Vec<u8> {
        self.board.reset();
        let n_rows = self.board.n_rows();
        for (piece, player) in &mut self.opponents {
            player.new_game(*piece, n_rows, self.board.pieces());
        }
        self.observation()
    }

    /// Plays `action` for the agent, then lets the opponents move.
    ///
    /// An action that is not an allowed move ends the episode.
    pub fn step(&mut self, action: usize) -> Step {
        let decided_areas = self.board.won_area_count();
        let legal = self
            .action_to_coords(action)
            .is_some_and(|coord| self.board.make_a_move(coord));
        if !legal {
            debug!(action, "Illegal action");
            return Step {
                observation: self.observation(),
                reward: ILLEGAL_MOVE_REWARD,
                done: true,
            };
        }

        let mut reward = 0.0;
        if self.board.won_area_count() > decided_areas {
            reward = WIN_AREA_REWARD;
        }
        let decided_areas = self.board.won_area_count();
        self.move_opponents();
        if self.board.won_area_count() > decided_areas {
            reward = LOSE_AREA_REWARD;
        }
        if let Some(outcome) = self.board.outcome() {
            reward = match outcome {
                GameOutcome::Win(winner) if winner == self.agent => WIN_REWARD,
                GameOutcome::Win(_) => LOSE_REWARD,
                GameOutcome::Draw => self.draw_reward(),
            };
        }

        Step {
            observation: self.observation(),
            reward,
            done: self.board.is_game_over(),
        }
    }

    /// Converts an action into the tile it plays.
    ///
    /// Actions count through the areas in x-major order, and through the
    /// tiles of an area in x-major order. Returns `None` for an action past
    /// the last tile.
    pub fn action_to_coords(&self, action: usize) -> Option<Coord> {
        let n = usize::from(self.board.n_rows());
        if action >= self.action_count() {
            return None;
        }
        let (area_x, rest) = (action / n.pow(3), action % n.pow(3));
        let (area_y, rest) = (rest / n.pow(2), rest % n.pow(2));
        let (local_x, local_y) = (rest / n, rest % n);
        Some(Coord::new(
            (area_x * n + local_x) as u8,
            (area_y * n + local_y) as u8,
        ))
    }

    /// The action that plays `coord`.
    pub fn coords_to_action(&self, coord: Coord) -> usize {
        let n = self.board.n_rows();
        let (area, local) = (coord.area(n), coord.local(n));
        let n = usize::from(n);
        usize::from(area.x) * n.pow(3)
            + usize::from(area.y) * n.pow(2)
            + usize::from(local.x) * n
            + usize::from(local.y)
    }

    /// Number of distinct actions, one per tile.
    pub fn action_count(&self) -> usize {
        usize::from(self.board.n_rows()).pow(4)
    }

    pub fn observation(&self) -> Vec<u8> {
        self.board
            .tiles()
            .iter()
            .map(|(_, _, slot)| slot.map_or(0, |piece| piece.index() as u8 + 1))
            .collect()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn agent(&self) -> Piece {
        self.agent
    }
}

// private methods
impl Mega3TEnv {
    fn move_opponents(&mut self) {
        for (piece, player) in &mut self.opponents {
            if self.board.is_game_over() {
                return;
            }
            debug_assert_eq!(self.board.current_piece(), *piece);
            let mut mutations = self.board.drain_mutations(*piece).unwrap_or_default();
            let mut played = false;
            for _ in 0..MAX_OPPONENT_ATTEMPTS {
                let coord = player.play(std::mem::take(&mut mutations), self.board.allowed_moves());
                if self.board.make_a_move(coord) {
                    played = true;
                    break;
                }
            }
            if !played {
                warn!(%piece, "Opponent keeps making illegal moves, playing the first allowed one");
                let first = self.board.allowed_moves().iter().next();
                if let Some(coord) = first {
                    self.board.make_a_move(coord);
                }
            }
        }
    }

    /// At a draw, the piece with the most won areas counts as the winner.
    fn draw_reward(&self) -> f64 {
        let counts: Vec<(Piece, usize)> = self
            .board
            .pieces()
            .iter()
            .map(|piece| (piece, self.board.areas_won_by(piece)))
            .collect();
        let most = counts.iter().map(|&(_, count)| count).max().unwrap_or(0);
        let leaders: Vec<Piece> = counts
            .iter()
            .filter(|&&(_, count)| count == most)
            .map(|&(piece, _)| piece)
            .collect();
        match leaders.as_slice() {
            [leader] if *leader == self.agent => WIN_REWARD,
            [_] => LOSE_REWARD,
            tied if tied.contains(&self.agent) => DRAW_REWARD,
            _ => LOSE_REWARD,
        }
    }
}
