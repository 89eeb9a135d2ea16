use mega3t::{Board, Coord, GameOutcome, Okay, Pieces, Request};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, trace};

use crate::error::RejectedMove;
use crate::player::Player;
use crate::recording::Recorder;

pub enum GameResult {
    WonByPlayer { player_idx: usize },
    Tie,
    IllegalMoveByPlayer { player_idx: usize, err: RejectedMove },
}

/// Returns an error only on communication failure, not when an
/// illegal move is played.
pub fn play_game(
    rng: &mut StdRng,
    player_1: &mut Player,
    player_2: &mut Player,
    n_rows: u8,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<GameResult> {
    let mut players = [player_1, player_2];
    let mut board = Board::new(Pieces::noughts_and_crosses(), n_rows);
    let pieces = board.pieces().clone();

    // Randomly assign the pieces, which also picks who moves first.
    // seats[piece index] is the index of the player with that piece.
    let seats = {
        let mut arr = [0, 1];
        arr.shuffle(rng);
        arr
    };

    // Inform the players about the new game, so that they can reset their state
    for piece in pieces.iter() {
        board.register_observer(piece)?;
        let req = Request::NewGame {
            piece,
            n_rows,
            pieces: pieces.clone(),
        };
        let _: Okay = players[seats[piece.index()]].perform_request(recorder, &req)?;
    }

    let mut rejected = None;
    let mut move_idx = 0;
    while !board.is_game_over() {
        let piece = board.current_piece();
        let player_idx = seats[piece.index()];
        let req = Request::PlayTurn {
            mutations: board.drain_mutations(piece)?,
            allowed_moves: board.allowed_moves().to_vec(),
        };
        let coord: Coord = players[player_idx].perform_request(recorder, &req)?;
        if let Err(err) = board.check_move(coord) {
            rejected = Some((player_idx, RejectedMove { coord, move_idx, err }));
            break;
        }
        board.make_a_move(coord);
        move_idx += 1;
        trace!(%coord, %piece, move_idx, "Played");
    }

    if let Some(rec) = recorder {
        rec.write_game_recording()?;
    }

    if let Some((player_idx, err)) = rejected {
        return Ok(GameResult::IllegalMoveByPlayer { player_idx, err });
    }
    debug!("Final board:\n{}", board);

    // Report who won
    let game_result = match board.outcome() {
        Some(GameOutcome::Win(piece)) => GameResult::WonByPlayer {
            player_idx: seats[piece.index()],
        },
        _ => GameResult::Tie,
    };
    Ok(game_result)
}
