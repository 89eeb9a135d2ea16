use quickcheck::{Arbitrary, Gen};

use crate::{Board, Pieces};

/// A game between cross and nought in which every move is picked among the
/// allowed moves.
#[derive(Clone, Debug)]
pub struct RandomGame {
    pub n_rows: u8,
    /// Each entry picks an allowed move, modulo the number of allowed moves.
    /// Entries after the end of the game are ignored.
    pub choices: Vec<usize>,
}

impl RandomGame {
    pub fn play_out(&self) -> Board {
        let mut board = Board::new(Pieces::noughts_and_crosses(), self.n_rows);
        for &choice in &self.choices {
            if board.is_game_over() {
                break;
            }
            let moves = board.allowed_moves().to_vec();
            assert!(board.make_a_move(moves[choice % moves.len()]));
        }
        board
    }
}

impl Arbitrary for RandomGame {
    fn arbitrary(g: &mut Gen) -> Self {
        // Mostly the standard size, which has the most interesting games
        let n_rows = *g.choose(&[2, 3, 3, 3, 4]).unwrap();
        // Long enough to finish most games on the smaller boards
        let len = usize::arbitrary(g) % 100 + 20;
        let choices = (0..len).map(|_| usize::arbitrary(g)).collect();
        Self { n_rows, choices }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let n_rows = self.n_rows;
        Box::new(
            self.choices
                .shrink()
                .map(move |choices| RandomGame { n_rows, choices }),
        )
    }
}
