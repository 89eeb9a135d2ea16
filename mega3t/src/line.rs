use serde::{Deserialize, Serialize};

use crate::{AreaCoord, Grid, Piece};

/// A straight line through an `n x n` square.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Line {
    /// All positions with the given `y`.
    Row(u8),
    /// All positions with the given `x`.
    Column(u8),
    /// From `(0, 0)` to `(n-1, n-1)`.
    MainDiagonal,
    /// From `(0, n-1)` to `(n-1, 0)`.
    AntiDiagonal,
}

impl Line {
    /// The lines passing through `at`, in the order they are checked:
    /// row, column, then whichever diagonals `at` lies on.
    pub fn through(at: AreaCoord, n: u8) -> impl Iterator<Item = Line> {
        let mut lines = vec![Line::Row(at.y), Line::Column(at.x)];
        if at.x == at.y {
            lines.push(Line::MainDiagonal);
        }
        if u16::from(at.x) + u16::from(at.y) + 1 == u16::from(n) {
            lines.push(Line::AntiDiagonal);
        }
        lines.into_iter()
    }

    /// The `n` positions on this line.
    pub fn cells(self, n: u8) -> impl Iterator<Item = AreaCoord> {
        (0..n).map(move |i| match self {
            Line::Row(y) => AreaCoord::new(i, y),
            Line::Column(x) => AreaCoord::new(x, i),
            Line::MainDiagonal => AreaCoord::new(i, i),
            Line::AntiDiagonal => AreaCoord::new(i, n - 1 - i),
        })
    }
}

/// Checks whether the last move at `at` completed a line for `mover`.
///
/// Only lines through `at` are considered. A line is complete when every
/// one of its slots holds `mover`. Returns the first complete line.
///
/// This works at any scale: on the working copy of one area, with `at`
/// local to that area, and on the grid of areas, with `at` the area that
/// was just won.
pub fn check_has_line(mover: Piece, at: AreaCoord, grid: &Grid) -> Option<Line> {
    let n = grid.side();
    Line::through(at, n).find(|line| line.cells(n).all(|pos| grid.at(pos.x, pos.y) == Some(mover)))
}
