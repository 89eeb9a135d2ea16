use tracing::{debug, trace};

use crate::legality::{allowed_moves_after, open_moves};
use crate::{
    check_has_line, AllowedMoves, AreaCoord, BoardError, Coord, GameOutcome, GameState, Grid,
    IllegalMove, Line, Mutation, MutationFeed, Piece, PieceInfo, Pieces, TurnController, WinScope,
    WinningLine,
};

/// The default number of rows of areas, and of tiles within an area.
pub const DEFAULT_N_ROWS: u8 = 3;

/// The largest supported `n_rows`, so that tile coordinates fit into a `u8`.
pub const MAX_N_ROWS: u8 = 15;

/// The state of one game of ultimate tic-tac-toe.
///
/// The super-board is an `n_rows x n_rows` grid of areas, and each area is an
/// `n_rows x n_rows` grid of tiles. Tiles are addressed by a [`Coord`] on the
/// full `n_rows² x n_rows²` grid.
///
/// All changes happen through [`Self::make_a_move()`] (or
/// [`Self::force_move()`] for debugging), which either applies a move
/// completely or rejects it without touching anything:
///
/// 1. The current piece claims the tile.
/// 2. Every observer's mutation log gets the move appended.
/// 3. If the move completes a line in its area, the area is won, and if that
///    completes a line of areas, the game is won. The turn does not pass on
///    a winning move.
/// 4. Otherwise the turn passes and the allowed moves are recomputed: the
///    next piece is sent to the area matching the position of the move inside
///    its own area, or anywhere open if that area is decided or full.
/// 5. If there are no allowed moves left, the game is a draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pieces: Pieces,
    n_rows: u8,
    /// `n_rows² x n_rows²`, written only by moves.
    tiles: Grid,
    /// `n_rows x n_rows`, a slot is set once, when its area is won.
    areas: Grid,
    allowed_moves: AllowedMoves,
    turn: TurnController,
    state: GameState,
    winning_lines: Vec<WinningLine>,
    last_move: Option<Coord>,
    mutations: MutationFeed,
}

impl Board {
    /// Creates a board for a new game, with the first piece to move.
    ///
    /// # Panics
    ///
    /// If `n_rows` is not in `2..=MAX_N_ROWS`.
    pub fn new(pieces: Pieces, n_rows: u8) -> Self {
        assert!(
            (2..=MAX_N_ROWS).contains(&n_rows),
            "n_rows must be between 2 and {}, got {}",
            MAX_N_ROWS,
            n_rows
        );
        assert!(!pieces.is_empty());
        let tiles = Grid::new(n_rows * n_rows);
        let areas = Grid::new(n_rows);
        let allowed_moves = open_moves(&tiles, &areas, n_rows);
        Self {
            turn: TurnController::new(pieces.len()),
            pieces,
            n_rows,
            tiles,
            areas,
            allowed_moves,
            state: GameState::InProgress,
            winning_lines: Vec::new(),
            last_move: None,
            mutations: MutationFeed::new(),
        }
    }

    /// A standard 9x9 board for cross and nought.
    pub fn noughts_and_crosses() -> Self {
        Self::new(Pieces::noughts_and_crosses(), DEFAULT_N_ROWS)
    }

    /// Starts over with an empty board.
    ///
    /// Observers stay registered, but their logs are emptied.
    pub fn reset(&mut self) {
        debug!("Reset");
        self.tiles.clear();
        self.areas.clear();
        self.allowed_moves = open_moves(&self.tiles, &self.areas, self.n_rows);
        self.turn.reset();
        self.state = GameState::InProgress;
        self.winning_lines.clear();
        self.last_move = None;
        self.mutations.clear();
    }

    /// Plays `coord` with the current piece.
    ///
    /// Returns `false` without changing anything if the game is over or the
    /// tile is not an allowed move. Use [`Self::check_move()`] to find out why.
    pub fn make_a_move(&mut self, coord: Coord) -> bool {
        if let Err(err) = self.check_move(coord) {
            trace!(%coord, %err, "Rejected move");
            return false;
        }
        // An allowed move is an empty tile on the board, so this cannot fail.
        matches!(self.play(coord, false), Ok(true))
    }

    /// Plays `coord` with the current piece, ignoring the allowed moves.
    ///
    /// An occupied tile is overwritten. This is meant for tests and debugging
    /// and is still rejected (with `Ok(false)`) once the game is over.
    pub fn force_move(&mut self, coord: Coord) -> Result<bool, BoardError> {
        if self.state.is_over() {
            return Ok(false);
        }
        self.play(coord, true)
    }

    /// Checks whether [`Self::make_a_move()`] would accept `coord`.
    pub fn check_move(&self, coord: Coord) -> Result<(), IllegalMove> {
        if self.state.is_over() {
            Err(IllegalMove::GameOver)
        } else if !self.allowed_moves.contains(coord) {
            Err(IllegalMove::NotAllowed(coord))
        } else {
            Ok(())
        }
    }

    /// Low-level write of a single tile, without any of the game logic.
    ///
    /// Only succeeds on an empty tile unless `force` is set. This exists for
    /// test harnesses; normal play goes through [`Self::make_a_move()`].
    pub fn set_tile(&mut self, coord: Coord, piece: Piece, force: bool) -> Result<bool, BoardError> {
        if !self.pieces.contains(piece) {
            return Err(BoardError::UnknownPiece(piece));
        }
        self.tiles.set(coord.x, coord.y, piece, force)
    }

    /// Gives `observer` its own mutation log, see [`Self::drain_mutations()`].
    pub fn register_observer(&mut self, observer: Piece) -> Result<(), BoardError> {
        if !self.pieces.contains(observer) {
            return Err(BoardError::UnknownPiece(observer));
        }
        self.mutations.register(observer);
        Ok(())
    }

    /// All moves made since the last call for this observer, oldest first.
    pub fn drain_mutations(&mut self, observer: Piece) -> Result<Vec<Mutation>, BoardError> {
        self.mutations.drain(observer)
    }

    pub fn tile(&self, coord: Coord) -> Result<Option<Piece>, BoardError> {
        self.tiles.get(coord.x, coord.y)
    }

    /// The winner of an area, if it has been won.
    pub fn area(&self, area: AreaCoord) -> Result<Option<Piece>, BoardError> {
        self.areas.get(area.x, area.y)
    }

    pub fn tiles(&self) -> &Grid {
        &self.tiles
    }

    pub fn areas(&self) -> &Grid {
        &self.areas
    }

    /// The tiles the current piece may play. Empty once the game is over.
    pub fn allowed_moves(&self) -> &AllowedMoves {
        &self.allowed_moves
    }

    /// The piece whose turn it is. After a winning move, this is the winner.
    pub fn current_piece(&self) -> Piece {
        self.turn.current()
    }

    /// Index of the current piece in the turn order.
    pub fn turn(&self) -> usize {
        self.turn.turn()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.state.outcome()
    }

    /// Every completed line, in the order they were completed.
    ///
    /// Lines within areas come first, a line of areas can only be the last one.
    pub fn winning_lines(&self) -> &[WinningLine] {
        &self.winning_lines
    }

    pub fn last_move(&self) -> Option<Coord> {
        self.last_move
    }

    pub fn pieces(&self) -> &Pieces {
        &self.pieces
    }

    pub fn piece_info(&self, piece: Piece) -> Result<&PieceInfo, BoardError> {
        self.pieces.info(piece)
    }

    pub fn n_rows(&self) -> u8 {
        self.n_rows
    }

    /// The number of tiles along one side of the board.
    pub fn side(&self) -> u8 {
        self.tiles.side()
    }

    /// How many areas have been won, by anyone.
    pub fn won_area_count(&self) -> usize {
        self.areas.iter().filter(|(_, _, slot)| slot.is_some()).count()
    }

    /// How many areas `piece` has won.
    pub fn areas_won_by(&self, piece: Piece) -> usize {
        self.areas.count(piece)
    }
}

// private methods
impl Board {
    fn play(&mut self, coord: Coord, force: bool) -> Result<bool, BoardError> {
        let mover = self.current_piece();
        if !self.set_tile(coord, mover, force)? {
            return Ok(false);
        }
        self.mutations.record(coord, mover);
        self.last_move = Some(coord);
        trace!(%coord, %mover, "Move");

        if self.find_winner_area(mover, coord)?.is_some() {
            let area = coord.area(self.n_rows);
            if let Some(line) = check_has_line(mover, area, &self.areas) {
                debug!(%mover, ?line, "Game won");
                self.winning_lines.push(WinningLine {
                    scope: WinScope::Board,
                    winner: mover,
                    line,
                });
                self.state = GameState::GameOver(GameOutcome::Win(mover));
                self.allowed_moves.clear();
                return Ok(true);
            }
        }

        self.turn.advance();
        self.allowed_moves = allowed_moves_after(&self.tiles, &self.areas, self.n_rows, coord);
        if self.allowed_moves.is_empty() {
            debug!("Game drawn");
            self.state = GameState::GameOver(GameOutcome::Draw);
        }
        Ok(true)
    }

    /// Checks whether the move at `coord` won its area for `mover`, and if so,
    /// records the area as won. An area that is already decided stays as it is.
    fn find_winner_area(&mut self, mover: Piece, coord: Coord) -> Result<Option<Line>, BoardError> {
        let n = self.n_rows;
        let area = coord.area(n);
        if self.areas.get(area.x, area.y)?.is_some() {
            return Ok(None);
        }
        let view = self.tiles.sub_grid(area.x * n, area.y * n, n);
        let Some(line) = check_has_line(mover, coord.local(n), &view) else {
            return Ok(None);
        };
        self.areas.set(area.x, area.y, mover, false)?;
        self.winning_lines.push(WinningLine {
            scope: WinScope::Area(area),
            winner: mover,
            line,
        });
        debug!(%area, %mover, ?line, "Area won");
        Ok(Some(line))
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::visualize_board(self))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::RandomGame;

    const X: Piece = Piece(0);
    const O: Piece = Piece(1);

    fn area_of(coords: &AllowedMoves, n_rows: u8) -> Vec<AreaCoord> {
        let mut areas: Vec<AreaCoord> = coords.iter().map(|c| c.area(n_rows)).collect();
        areas.dedup();
        areas
    }

    /// Plays the given moves with forced moves, in turn order.
    fn force_all(board: &mut Board, moves: &[Coord]) {
        for &coord in moves {
            assert_eq!(board.force_move(coord), Ok(true), "forcing {}", coord);
        }
    }

    fn interleave(first: &[Coord], second: &[Coord]) -> Vec<Coord> {
        let mut moves = Vec::new();
        for i in 0..first.len().max(second.len()) {
            moves.extend(first.get(i));
            moves.extend(second.get(i));
        }
        moves
    }

    fn top_row_of(area: AreaCoord) -> Vec<Coord> {
        (0..3)
            .map(|i| Coord::from_area_and_local(area, AreaCoord::new(i, 0), 3))
            .collect()
    }

    quickcheck! {
        fn fresh_board_allows_everything(n: u8) -> bool {
            let n = n % 5 + 2;
            let board = Board::new(Pieces::noughts_and_crosses(), n);
            let side = n * n;
            board.allowed_moves().len() == usize::from(side) * usize::from(side)
                && (0..side).all(|x| (0..side).all(|y| board.allowed_moves().contains(Coord::new(x, y))))
        }

        fn reset_is_idempotent(game: RandomGame) -> bool {
            let mut board = game.play_out();
            board.reset();
            let once = board.clone();
            board.reset();
            board == once && once == Board::new(Pieces::noughts_and_crosses(), game.n_rows)
        }

        fn allowed_moves_stay_legal(game: RandomGame) -> bool {
            let mut board = Board::new(Pieces::noughts_and_crosses(), game.n_rows);
            for &choice in &game.choices {
                if board.is_game_over() {
                    break;
                }
                let moves = board.allowed_moves().to_vec();
                assert!(board.make_a_move(moves[choice % moves.len()]));
                if board.is_game_over() {
                    continue;
                }
                for coord in board.allowed_moves() {
                    let area = coord.area(game.n_rows);
                    if board.tile(coord).unwrap().is_some() || board.area(area).unwrap().is_some() {
                        return false;
                    }
                }
                if board.allowed_moves().is_empty() {
                    return false;
                }
            }
            true
        }

        fn redirect_rule(game: RandomGame) -> bool {
            let n = game.n_rows;
            let mut board = Board::new(Pieces::noughts_and_crosses(), n);
            for &choice in &game.choices {
                if board.is_game_over() {
                    break;
                }
                let moves = board.allowed_moves().to_vec();
                let coord = moves[choice % moves.len()];
                board.make_a_move(coord);
                if board.is_game_over() {
                    break;
                }
                let target = coord.local(n);
                let target_tiles: Vec<Coord> = target
                    .tiles(n)
                    .filter(|&c| board.tile(c).unwrap().is_none())
                    .collect();
                let expected: AllowedMoves = if board.area(target).unwrap().is_none() && !target_tiles.is_empty() {
                    target_tiles.into_iter().collect()
                } else {
                    AreaCoord::all(n)
                        .filter(|&a| board.area(a).unwrap().is_none())
                        .flat_map(|a| a.tiles(n))
                        .filter(|&c| board.tile(c).unwrap().is_none())
                        .collect()
                };
                if board.allowed_moves() != &expected {
                    return false;
                }
            }
            true
        }

        fn observers_see_every_move_once(game: RandomGame) -> bool {
            let mut board = Board::new(Pieces::noughts_and_crosses(), game.n_rows);
            board.register_observer(O).unwrap();
            let mut played = Vec::new();
            for &choice in &game.choices {
                if board.is_game_over() {
                    break;
                }
                let moves = board.allowed_moves().to_vec();
                let coord = moves[choice % moves.len()];
                played.push(Mutation { coord, piece: board.current_piece() });
                board.make_a_move(coord);
            }
            board.drain_mutations(O).unwrap() == played && board.drain_mutations(O).unwrap().is_empty()
        }
    }

    #[test]
    fn center_then_redirect() {
        let mut board = Board::noughts_and_crosses();
        assert_eq!(board.current_piece(), X);
        assert!(board.make_a_move(Coord::new(4, 4)));

        assert_eq!(board.area(AreaCoord::new(1, 1)), Ok(None));
        assert_eq!(board.current_piece(), O);
        assert_eq!(board.allowed_moves().len(), 8);
        assert_eq!(area_of(board.allowed_moves(), 3), vec![AreaCoord::new(1, 1)]);
        assert!(!board.allowed_moves().contains(Coord::new(4, 4)));

        assert!(board.make_a_move(Coord::new(3, 3)));
        assert_eq!(board.allowed_moves().len(), 9);
        assert_eq!(area_of(board.allowed_moves(), 3), vec![AreaCoord::new(0, 0)]);
        assert_eq!(board.tile(Coord::new(3, 3)), Ok(Some(O)));
        assert_eq!(board.last_move(), Some(Coord::new(3, 3)));
    }

    #[test]
    fn rejected_moves_change_nothing() {
        let mut board = Board::noughts_and_crosses();
        board.register_observer(O).unwrap();
        assert!(board.make_a_move(Coord::new(4, 4)));
        let before = board.clone();

        // Occupied
        assert!(!board.make_a_move(Coord::new(4, 4)));
        // Wrong area
        assert!(!board.make_a_move(Coord::new(0, 0)));
        // Off the board
        assert!(!board.make_a_move(Coord::new(9, 200)));

        assert_eq!(board, before);
        assert_eq!(
            board.check_move(Coord::new(0, 0)),
            Err(IllegalMove::NotAllowed(Coord::new(0, 0)))
        );
        assert_eq!(board.check_move(Coord::new(3, 4)), Ok(()));
    }

    #[test]
    fn forced_top_row_wins_area() {
        let mut board = Board::noughts_and_crosses();
        let moves = interleave(
            &[Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)],
            &[Coord::new(8, 8), Coord::new(8, 7)],
        );
        force_all(&mut board, &moves[..4]);
        assert_eq!(board.area(AreaCoord::new(0, 0)), Ok(None));

        assert_eq!(board.force_move(moves[4]), Ok(true));
        assert_eq!(board.area(AreaCoord::new(0, 0)), Ok(Some(X)));
        assert_eq!(board.state(), GameState::InProgress);
        assert_eq!(board.current_piece(), O);
        assert_eq!(
            board.winning_lines(),
            &[WinningLine {
                scope: WinScope::Area(AreaCoord::new(0, 0)),
                winner: X,
                line: Line::Row(0),
            }]
        );
        // (2, 0) sends O to area (2, 0)
        assert_eq!(area_of(board.allowed_moves(), 3), vec![AreaCoord::new(2, 0)]);
    }

    #[test]
    fn won_target_area_opens_the_board() {
        let mut board = Board::noughts_and_crosses();
        force_all(
            &mut board,
            &interleave(&top_row_of(AreaCoord::new(0, 0)), &[Coord::new(8, 8), Coord::new(8, 7)]),
        );
        assert_eq!(board.area(AreaCoord::new(0, 0)), Ok(Some(X)));

        // Local (0, 0) sends cross back to the area it already won
        assert!(board.make_a_move(Coord::new(6, 0)));
        let allowed = board.allowed_moves();
        assert_eq!(allowed.len(), 81 - 9 - 3);
        assert!(!allowed.iter().any(|c| c.area(3) == AreaCoord::new(0, 0)));
        assert!(!allowed.contains(Coord::new(6, 0)));
        assert!(!allowed.contains(Coord::new(8, 8)));
        let open_areas: BTreeSet<AreaCoord> = allowed.iter().map(|c| c.area(3)).collect();
        assert_eq!(open_areas.len(), 8);
        // Listed in x-major order of the tiles, not area by area
        assert_eq!(
            allowed.iter().take(4).collect::<Vec<_>>(),
            vec![Coord::new(0, 3), Coord::new(0, 4), Coord::new(0, 5), Coord::new(0, 6)]
        );
    }

    #[test]
    fn area_is_won_exactly_on_the_completing_move() {
        let mut board = Board::noughts_and_crosses();
        // X builds the main diagonal of area (1, 1), O plays elsewhere
        let moves = interleave(
            &[Coord::new(3, 3), Coord::new(4, 4), Coord::new(5, 5)],
            &[Coord::new(0, 8), Coord::new(1, 8)],
        );
        for (idx, &coord) in moves.iter().enumerate() {
            assert_eq!(board.area(AreaCoord::new(1, 1)), Ok(None), "before move {}", idx);
            board.force_move(coord).unwrap();
        }
        assert_eq!(board.area(AreaCoord::new(1, 1)), Ok(Some(X)));
        assert_eq!(board.winning_lines()[0].line, Line::MainDiagonal);
    }

    #[test]
    fn won_area_is_never_rewritten() {
        let mut board = Board::noughts_and_crosses();
        force_all(
            &mut board,
            &interleave(&top_row_of(AreaCoord::new(0, 0)), &[Coord::new(0, 1), Coord::new(1, 1)]),
        );
        assert_eq!(board.area(AreaCoord::new(0, 0)), Ok(Some(X)));
        // O completes the middle row of the same area, which is already decided
        force_all(&mut board, &[Coord::new(2, 1)]);
        assert_eq!(board.area(AreaCoord::new(0, 0)), Ok(Some(X)));
        assert_eq!(board.winning_lines().len(), 1);
    }

    #[test]
    fn line_of_areas_wins_the_game() {
        let mut board = Board::noughts_and_crosses();
        let x_moves: Vec<Coord> = [(0, 0), (1, 0), (2, 0)]
            .into_iter()
            .flat_map(|area| top_row_of(AreaCoord::from(area)))
            .collect();
        // Two O's per area never make a line
        let o_moves: Vec<Coord> = [(0, 1), (1, 1), (2, 1), (0, 2)]
            .into_iter()
            .flat_map(|area| {
                let area = AreaCoord::from(area);
                [
                    Coord::from_area_and_local(area, AreaCoord::new(0, 0), 3),
                    Coord::from_area_and_local(area, AreaCoord::new(2, 2), 3),
                ]
            })
            .collect();
        let moves = interleave(&x_moves, &o_moves);
        assert_eq!(moves.len(), 17);
        force_all(&mut board, &moves[..16]);
        assert_eq!(board.state(), GameState::InProgress);
        assert_eq!(board.current_piece(), X);

        assert_eq!(board.force_move(moves[16]), Ok(true));
        assert_eq!(board.state(), GameState::GameOver(GameOutcome::Win(X)));
        // The turn does not pass on the winning move
        assert_eq!(board.current_piece(), X);
        assert!(board.allowed_moves().is_empty());
        assert_eq!(board.won_area_count(), 3);
        assert_eq!(
            board.winning_lines().last(),
            Some(&WinningLine {
                scope: WinScope::Board,
                winner: X,
                line: Line::Row(0),
            })
        );

        // Nothing is accepted anymore
        assert!(!board.make_a_move(Coord::new(4, 4)));
        assert_eq!(board.force_move(Coord::new(4, 4)), Ok(false));
        assert_eq!(board.check_move(Coord::new(4, 4)), Err(IllegalMove::GameOver));
    }

    /// Cross takes the top row of each of `x_areas` in order, while nought
    /// never holds more than `n - 1` tiles of an area.
    fn line_of_areas_moves(n: u8, x_areas: &[AreaCoord]) -> Vec<Coord> {
        let x_moves: Vec<Coord> = x_areas
            .iter()
            .flat_map(|&area| (0..n).map(move |i| Coord::from_area_and_local(area, AreaCoord::new(i, 0), n)))
            .collect();
        let o_moves: Vec<Coord> = AreaCoord::all(n)
            .flat_map(|area| (0..n - 1).map(move |i| Coord::from_area_and_local(area, AreaCoord::new(i, 1), n)))
            .take(x_moves.len() - 1)
            .collect();
        interleave(&x_moves, &o_moves)
    }

    #[test]
    fn lines_of_areas_in_every_direction() {
        let cases: [(u8, &[(u8, u8)], Line); 9] = [
            (3, &[(0, 0), (0, 1), (0, 2)], Line::Column(0)),
            (3, &[(2, 0), (2, 1), (2, 2)], Line::Column(2)),
            (3, &[(0, 0), (1, 1), (2, 2)], Line::MainDiagonal),
            (3, &[(2, 0), (1, 1), (0, 2)], Line::AntiDiagonal),
            (3, &[(0, 2), (1, 2), (2, 2)], Line::Row(2)),
            (2, &[(0, 0), (1, 0)], Line::Row(0)),
            (2, &[(1, 0), (1, 1)], Line::Column(1)),
            (2, &[(0, 0), (1, 1)], Line::MainDiagonal),
            (2, &[(1, 0), (0, 1)], Line::AntiDiagonal),
        ];
        for (n, areas, line) in cases {
            let areas: Vec<AreaCoord> = areas.iter().map(|&a| AreaCoord::from(a)).collect();
            let moves = line_of_areas_moves(n, &areas);
            let (last, before) = moves.split_last().unwrap();

            let mut board = Board::new(Pieces::noughts_and_crosses(), n);
            force_all(&mut board, before);
            assert_eq!(board.state(), GameState::InProgress, "{:?}", line);
            assert_eq!(board.won_area_count(), usize::from(n) - 1, "{:?}", line);

            assert_eq!(board.force_move(*last), Ok(true));
            assert_eq!(board.outcome(), Some(GameOutcome::Win(X)), "{:?}", line);
            assert_eq!(
                board.winning_lines().last(),
                Some(&WinningLine {
                    scope: WinScope::Board,
                    winner: X,
                    line,
                })
            );
            assert_eq!(board.areas_won_by(O), 0);
        }
    }

    #[test]
    fn all_areas_drawn_is_a_draw() {
        // Full, but without a line
        const FIVE_CROSSES: [&str; 3] = ["XOX", "XOO", "OXX"];
        let mut crosses = Vec::new();
        let mut noughts = Vec::new();
        for (idx, area) in AreaCoord::all(3).enumerate() {
            // Five areas with five crosses and four with five noughts, 41 vs. 40 tiles
            let swap = idx % 2 == 1;
            for local in AreaCoord::all(3) {
                let c = FIVE_CROSSES[usize::from(local.y)].as_bytes()[usize::from(local.x)];
                let coord = Coord::from_area_and_local(area, local, 3);
                if (c == b'X') != swap {
                    crosses.push(coord);
                } else {
                    noughts.push(coord);
                }
            }
        }
        assert_eq!((crosses.len(), noughts.len()), (41, 40));
        let moves = interleave(&crosses, &noughts);

        let mut board = Board::noughts_and_crosses();
        force_all(&mut board, &moves[..80]);
        assert_eq!(board.state(), GameState::InProgress);
        force_all(&mut board, &moves[80..]);
        assert_eq!(board.state(), GameState::GameOver(GameOutcome::Draw));
        assert_eq!(board.tiles().count_empty(), 0);
        assert_eq!(board.won_area_count(), 0);
        assert!(board.winning_lines().is_empty());
    }

    #[test]
    fn decided_areas_without_a_line_of_areas_is_a_draw() {
        // Winners per area, without a line on the super-board:
        // X O X
        // X O O
        // O X X
        let x_areas = [(0, 0), (2, 0), (0, 1), (1, 2), (2, 2)].map(AreaCoord::from);
        let o_areas = [(1, 0), (1, 1), (2, 1), (0, 2)].map(AreaCoord::from);
        let x_moves: Vec<Coord> = x_areas.iter().flat_map(|&a| top_row_of(a)).collect();
        // Two spare noughts in cross areas, off their top row
        let mut o_moves = vec![
            Coord::from_area_and_local(x_areas[0], AreaCoord::new(0, 2), 3),
            Coord::from_area_and_local(x_areas[1], AreaCoord::new(0, 2), 3),
        ];
        o_moves.extend(o_areas.iter().flat_map(|&a| top_row_of(a)));
        let moves = interleave(&x_moves, &o_moves);
        assert_eq!(moves.len(), 29);

        let mut board = Board::noughts_and_crosses();
        force_all(&mut board, &moves[..28]);
        assert_eq!(board.state(), GameState::InProgress);
        assert_eq!(board.won_area_count(), 8);
        force_all(&mut board, &moves[28..]);
        assert_eq!(board.state(), GameState::GameOver(GameOutcome::Draw));
        assert_eq!(board.areas_won_by(X), 5);
        assert_eq!(board.areas_won_by(O), 4);
        assert_eq!(board.winning_lines().len(), 9);
    }

    #[test]
    fn observer_sees_the_other_move() {
        let mut board = Board::noughts_and_crosses();
        board.register_observer(O).unwrap();
        assert!(board.make_a_move(Coord::new(2, 7)));
        assert_eq!(
            board.drain_mutations(O),
            Ok(vec![Mutation {
                coord: Coord::new(2, 7),
                piece: X
            }])
        );
        assert_eq!(board.drain_mutations(O), Ok(vec![]));
        assert_eq!(
            board.drain_mutations(X),
            Err(BoardError::UnregisteredObserver(X))
        );
    }

    #[test]
    fn reset_clears_logs_but_keeps_observers() {
        let mut board = Board::noughts_and_crosses();
        board.register_observer(X).unwrap();
        board.make_a_move(Coord::new(0, 0));
        board.reset();
        assert_eq!(board.drain_mutations(X), Ok(vec![]));
        assert_eq!(board.allowed_moves().len(), 81);
        assert_eq!(board.last_move(), None);
    }

    #[test]
    fn misuse_is_an_error() {
        let mut board = Board::noughts_and_crosses();
        assert_eq!(
            board.set_tile(Coord::new(0, 0), Piece(2), false),
            Err(BoardError::UnknownPiece(Piece(2)))
        );
        assert_eq!(
            board.force_move(Coord::new(9, 0)),
            Err(BoardError::OutOfBounds { x: 9, y: 0, side: 9 })
        );
        assert_eq!(
            board.tile(Coord::new(0, 10)),
            Err(BoardError::OutOfBounds { x: 0, y: 10, side: 9 })
        );
        assert_eq!(
            board.register_observer(Piece(5)),
            Err(BoardError::UnknownPiece(Piece(5)))
        );
    }

    #[test]
    fn set_tile_only_writes() {
        let mut board = Board::noughts_and_crosses();
        assert_eq!(board.set_tile(Coord::new(1, 1), O, false), Ok(true));
        assert_eq!(board.set_tile(Coord::new(1, 1), X, false), Ok(false));
        assert_eq!(board.tile(Coord::new(1, 1)), Ok(Some(O)));
        assert_eq!(board.current_piece(), X);
        assert_eq!(board.allowed_moves().len(), 81);
    }

    #[test]
    fn three_pieces_take_turns() {
        let pieces = Pieces::new(vec![
            PieceInfo::new("cross", 'X'),
            PieceInfo::new("nought", 'O'),
            PieceInfo::new("triangle", 'T'),
        ]);
        let mut board = Board::new(pieces, 3);
        for coord in [Coord::new(4, 4), Coord::new(3, 3), Coord::new(1, 1)] {
            assert!(board.make_a_move(coord));
        }
        assert_eq!(board.tile(Coord::new(1, 1)), Ok(Some(Piece(2))));
        assert_eq!(board.turn(), 0);
    }

    #[test]
    #[should_panic]
    fn too_small() {
        Board::new(Pieces::noughts_and_crosses(), 1);
    }
}
