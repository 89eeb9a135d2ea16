use serde::{Deserialize, Serialize};

/// A coordinate on the fine tile grid.
///
/// Both components are in `0..n_rows²`. `x` grows to the right and `y`
/// grows downwards. The ordering is x-major, which is the order in which
/// allowed moves are listed.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

/// A position in an `n_rows x n_rows` square.
///
/// Used for areas on the super-board and for cells inside one area,
/// since both are squares of the same size.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct AreaCoord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// The area containing this tile.
    pub fn area(self, n_rows: u8) -> AreaCoord {
        AreaCoord::new(self.x / n_rows, self.y / n_rows)
    }

    /// The position of this tile inside its area.
    ///
    /// This is also the area that the next player is sent to.
    pub fn local(self, n_rows: u8) -> AreaCoord {
        AreaCoord::new(self.x % n_rows, self.y % n_rows)
    }

    pub fn from_area_and_local(area: AreaCoord, local: AreaCoord, n_rows: u8) -> Self {
        Self::new(area.x * n_rows + local.x, area.y * n_rows + local.y)
    }
}

impl AreaCoord {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Every position of an `n_rows x n_rows` square, x-major.
    pub fn all(n_rows: u8) -> impl Iterator<Item = AreaCoord> {
        (0..n_rows).flat_map(move |x| (0..n_rows).map(move |y| AreaCoord::new(x, y)))
    }

    /// The tiles of this area, x-major.
    pub fn tiles(self, n_rows: u8) -> impl Iterator<Item = Coord> {
        AreaCoord::all(n_rows).map(move |local| Coord::from_area_and_local(self, local, n_rows))
    }
}

impl From<(u8, u8)> for Coord {
    fn from((x, y): (u8, u8)) -> Self {
        Self::new(x, y)
    }
}

impl From<(u8, u8)> for AreaCoord {
    fn from((x, y): (u8, u8)) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl std::fmt::Display for AreaCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
