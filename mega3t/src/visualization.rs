use crate::{AreaCoord, Board, Piece};

/// Renders the tiles of the board as text.
///
/// One line per row of tiles, `.` for an empty tile and the piece's
/// abbreviation otherwise. Areas are separated by `|` and `-` lines.
/// Won areas are listed below the tiles.
pub fn visualize_board(board: &Board) -> String {
    let n = board.n_rows();
    let area_width = 2 * usize::from(n) - 1;
    let separator = vec!["-".repeat(area_width); usize::from(n)].join("-+-");

    let mut lines = Vec::with_capacity(usize::from(board.side() + n));
    for y in 0..board.side() {
        if y > 0 && y % n == 0 {
            lines.push(separator.clone());
        }
        let row: Vec<String> = (0..n)
            .map(|area_x| {
                let tiles: Vec<String> = (0..n)
                    .map(|local_x| match board.tiles().at(area_x * n + local_x, y) {
                        Some(piece) => abbr(board, piece).to_string(),
                        None => String::from("."),
                    })
                    .collect();
                tiles.join(" ")
            })
            .collect();
        lines.push(row.join(" | "));
    }
    for area in AreaCoord::all(n) {
        if let Some(winner) = board.areas().at(area.x, area.y) {
            lines.push(format!("Area {} won by {}", area, abbr(board, winner)));
        }
    }
    lines.join("\n")
}

fn abbr(board: &Board, piece: Piece) -> char {
    board.piece_info(piece).map(|info| info.abbr).unwrap_or('?')
}
