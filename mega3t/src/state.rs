use serde::{Deserialize, Serialize};

use crate::{AreaCoord, Coord, Line, Piece};

/// How a finished game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Piece),
    /// No tile is left to play and nobody completed a line of areas.
    Draw,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    InProgress,
    /// Terminal until the board is reset.
    GameOver(GameOutcome),
}

impl GameState {
    pub fn is_over(self) -> bool {
        matches!(self, GameState::GameOver(_))
    }

    pub fn outcome(self) -> Option<GameOutcome> {
        match self {
            GameState::InProgress => None,
            GameState::GameOver(outcome) => Some(outcome),
        }
    }
}

/// Where a winning line was completed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinScope {
    /// Inside one area. The line's positions are tiles local to this area.
    Area(AreaCoord),
    /// On the super-board. The line's positions are areas.
    Board,
}

/// A completed line, kept so that front-ends can highlight it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningLine {
    pub scope: WinScope,
    pub winner: Piece,
    pub line: Line,
}

impl WinningLine {
    /// The positions of the line in its own frame, see [`WinScope`].
    pub fn cells(&self, n_rows: u8) -> impl Iterator<Item = AreaCoord> {
        self.line.cells(n_rows)
    }

    /// The line in tile coordinates.
    ///
    /// For a line of areas, this is every tile of those areas.
    pub fn fine_coords(&self, n_rows: u8) -> Vec<Coord> {
        match self.scope {
            WinScope::Area(area) => self
                .cells(n_rows)
                .map(|local| Coord::from_area_and_local(area, local, n_rows))
                .collect(),
            WinScope::Board => self
                .cells(n_rows)
                .flat_map(|area| area.tiles(n_rows))
                .collect(),
        }
    }
}
