use std::collections::BTreeSet;

use mega3t::{Coord, GameOutcome, GameState, Piece, WinScope};
use ratatui::{prelude::*, widgets::*};

use crate::app::App;

const PIECE_COLORS: [Color; 5] = [
    Color::Blue,
    Color::Red,
    Color::Green,
    Color::Magenta,
    Color::Cyan,
];

fn piece_color(piece: Piece) -> Color {
    PIECE_COLORS[piece.index() % PIECE_COLORS.len()]
}

pub fn draw(frame: &mut Frame, app: &App) {
    let main_layout = Layout::new(
        Direction::Vertical,
        [Constraint::Min(0), Constraint::Length(5)],
    )
    .split(frame.size());
    frame.render_widget(BoardWidget { app }, main_layout[0]);
    frame.render_widget(status(app), main_layout[1]);
}

fn status(app: &App) -> Paragraph<'static> {
    let board = app.board();
    let name = |piece: Piece| {
        board
            .piece_info(piece)
            .map(|info| info.name.clone())
            .unwrap_or_else(|_| piece.to_string())
    };
    let headline = match board.state() {
        GameState::InProgress => format!("Turn: {}", name(board.current_piece())),
        GameState::GameOver(GameOutcome::Win(winner)) => {
            format!("GAME OVER: {} wins", name(winner))
        }
        GameState::GameOver(GameOutcome::Draw) => String::from("GAME OVER: draw"),
    };
    let mut first_line = vec![Span::styled(headline, Style::new().bold())];
    if app.force() {
        first_line.push(Span::styled("  [forced moves]", Style::new().yellow()));
    }
    let mut help = String::from("arrows/hjkl: move  enter/space: play  r: restart  q: quit");
    if app.allow_force() {
        help.push_str("  f: force");
    }
    let title = if app.vs_ai() {
        " Mega3T vs AI "
    } else {
        " Mega3T "
    };
    Paragraph::new(vec![
        Line::from(first_line),
        Line::from(app.message().unwrap_or_default().to_string()),
        Line::from(Span::styled(help, Style::new().dark_gray())),
    ])
    .block(Block::new().borders(Borders::all()).title(title))
}

/// The tile grid, with gaps and lines between the areas.
pub struct BoardWidget<'a> {
    pub app: &'a App,
}

impl BoardWidget<'_> {
    /// Size of the grid in terminal cells.
    fn size(n_rows: u16) -> (u16, u16) {
        let side = n_rows * n_rows;
        (2 * side + 2 * (n_rows - 1) - 1, side + n_rows - 1)
    }
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let board = self.app.board();
        let n = board.n_rows();
        let n16 = u16::from(n);
        let (width, height) = Self::size(n16);
        let x0 = area.x + area.width.saturating_sub(width) / 2;
        let y0 = area.y + area.height.saturating_sub(height) / 2;
        let mut put = |x: u16, y: u16, s: &str, style: Style| {
            if x < area.right() && y < area.bottom() {
                buf.set_string(x, y, s, style);
            }
        };

        // Area separators
        for k in 1..n16 {
            let col = x0 + 2 * k * n16 + 2 * k - 2;
            let row = y0 + k * n16 + k - 1;
            for dy in 0..height {
                put(col, y0 + dy, "│", Style::new());
            }
            for dx in 0..width {
                put(x0 + dx, row, "─", Style::new());
            }
        }
        for kx in 1..n16 {
            for ky in 1..n16 {
                let col = x0 + 2 * kx * n16 + 2 * kx - 2;
                let row = y0 + ky * n16 + ky - 1;
                put(col, row, "┼", Style::new());
            }
        }

        let mut area_lines: BTreeSet<Coord> = BTreeSet::new();
        let mut board_line: BTreeSet<Coord> = BTreeSet::new();
        for line in board.winning_lines() {
            let coords = line.fine_coords(n);
            match line.scope {
                WinScope::Area(_) => area_lines.extend(coords),
                WinScope::Board => board_line.extend(coords),
            }
        }

        for (x, y, slot) in board.tiles().iter() {
            let coord = Coord::new(x, y);
            let mut style = Style::new();
            if board.allowed_moves().contains(coord) {
                style = style.bg(Color::DarkGray);
            }
            if let Ok(Some(winner)) = board.area(coord.area(n)) {
                style = style.fg(piece_color(winner)).add_modifier(Modifier::DIM);
            }
            if let Some(piece) = slot {
                style = style.fg(piece_color(piece));
            }
            if area_lines.contains(&coord) {
                style = style.add_modifier(Modifier::BOLD);
            }
            if board_line.contains(&coord) {
                style = style.bg(Color::Yellow);
            }
            if board.last_move() == Some(coord) {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            if self.app.cursor() == coord {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let symbol = match slot {
                Some(piece) => board
                    .piece_info(piece)
                    .map(|info| info.abbr)
                    .unwrap_or('?')
                    .to_string(),
                None => String::from("·"),
            };
            let (x, y) = (u16::from(x), u16::from(y));
            put(x0 + 2 * x + 2 * (x / n16), y0 + y + y / n16, &symbol, style);
        }
    }
}
