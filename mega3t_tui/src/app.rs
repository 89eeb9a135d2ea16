use mega3t::{Board, Coord, Piece, Pieces, Player, RandomPlayer};
use ratatui::crossterm::event::KeyCode;
use tracing::{debug, warn};

/// The computer side in a game against the AI.
struct Opponent {
    piece: Piece,
    player: RandomPlayer,
}

/// Everything the terminal shows, and what the keys do to it.
pub struct App {
    board: Board,
    cursor: Coord,
    /// Whether Enter places a piece regardless of the allowed moves.
    force: bool,
    allow_force: bool,
    ai: Option<Opponent>,
    message: Option<String>,
}

impl App {
    /// With `ai`, the human plays cross and the AI plays nought.
    pub fn new(n_rows: u8, ai: Option<RandomPlayer>, allow_force: bool) -> Self {
        let board = Board::new(Pieces::noughts_and_crosses(), n_rows);
        let ai = ai.and_then(|player| {
            let piece = board.pieces().nth(1)?;
            Some(Opponent { piece, player })
        });
        let mut app = Self {
            cursor: Coord::default(),
            board,
            force: false,
            allow_force,
            ai,
            message: None,
        };
        app.restart();
        app
    }

    /// Returns whether the application should quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(-1, 0),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(1, 0),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(0, -1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(0, 1),
            KeyCode::Enter | KeyCode::Char(' ') => self.play_at_cursor(),
            KeyCode::Char('r') => self.restart(),
            KeyCode::Char('f') if self.allow_force => {
                self.force = !self.force;
                self.message = Some(String::from(if self.force {
                    "Forced moves on"
                } else {
                    "Forced moves off"
                }));
            }
            _ => {}
        }
        false
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    pub fn force(&self) -> bool {
        self.force
    }

    pub fn allow_force(&self) -> bool {
        self.allow_force
    }

    pub fn vs_ai(&self) -> bool {
        self.ai.is_some()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn move_cursor(&mut self, dx: i16, dy: i16) {
        let max = i16::from(self.board.side()) - 1;
        let x = (i16::from(self.cursor.x) + dx).clamp(0, max);
        let y = (i16::from(self.cursor.y) + dy).clamp(0, max);
        self.cursor = Coord::new(x as u8, y as u8);
    }

    fn play_at_cursor(&mut self) {
        self.message = None;
        let coord = self.cursor;
        if self.force {
            match self.board.force_move(coord) {
                Ok(true) => {}
                Ok(false) => self.message = Some(String::from("The game is over")),
                Err(err) => self.message = Some(err.to_string()),
            }
        } else if let Err(err) = self.board.check_move(coord) {
            self.message = Some(err.to_string());
            return;
        } else {
            self.board.make_a_move(coord);
        }
        self.let_ai_move();
    }

    fn let_ai_move(&mut self) {
        let Some(ai) = &mut self.ai else {
            return;
        };
        if self.board.is_game_over() || self.board.current_piece() != ai.piece {
            return;
        }
        let mutations = self.board.drain_mutations(ai.piece).unwrap_or_default();
        let coord = ai.player.play(mutations, self.board.allowed_moves());
        if !self.board.make_a_move(coord) {
            warn!(%coord, "AI picked a move that is not allowed");
            let first = self.board.allowed_moves().iter().next();
            if let Some(coord) = first {
                self.board.make_a_move(coord);
            }
        }
        debug!(%coord, "AI moved");
    }

    fn restart(&mut self) {
        self.board.reset();
        let middle = self.board.side() / 2;
        self.cursor = Coord::new(middle, middle);
        self.message = None;
        let n_rows = self.board.n_rows();
        if let Some(ai) = &mut self.ai {
            if let Err(err) = self.board.register_observer(ai.piece) {
                warn!(%err, "Could not follow the AI's moves");
            }
            ai.player.new_game(ai.piece, n_rows, self.board.pieces());
        }
    }
}
