use std::collections::BTreeSet;

use crate::{AreaCoord, Coord, Grid};

/// The tiles that may be played on the upcoming turn.
///
/// Iterates in x-major order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AllowedMoves(BTreeSet<Coord>);

impl AllowedMoves {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.0.contains(&coord)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.0.iter().copied()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn to_vec(&self) -> Vec<Coord> {
        self.iter().collect()
    }
}

impl FromIterator<Coord> for AllowedMoves {
    fn from_iter<T: IntoIterator<Item = Coord>>(iter: T) -> Self {
        Self(BTreeSet::from_iter(iter))
    }
}

impl<'a> IntoIterator for &'a AllowedMoves {
    type Item = Coord;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, Coord>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

/// The allowed moves after a move at `last`.
///
/// The next player is sent to the area whose position on the super-board
/// matches the position of `last` inside its own area. If that area is
/// decided or has no empty tile left, every empty tile of every undecided
/// area is allowed.
pub(crate) fn allowed_moves_after(tiles: &Grid, areas: &Grid, n_rows: u8, last: Coord) -> AllowedMoves {
    let target = last.local(n_rows);
    if areas.at(target.x, target.y).is_none() {
        let moves: AllowedMoves = empty_tiles_of_area(tiles, n_rows, target).collect();
        if !moves.is_empty() {
            return moves;
        }
    }
    open_moves(tiles, areas, n_rows)
}

/// Every empty tile in an undecided area.
pub(crate) fn open_moves(tiles: &Grid, areas: &Grid, n_rows: u8) -> AllowedMoves {
    AreaCoord::all(n_rows)
        .filter(|area| areas.at(area.x, area.y).is_none())
        .flat_map(|area| empty_tiles_of_area(tiles, n_rows, area))
        .collect()
}

fn empty_tiles_of_area(tiles: &Grid, n_rows: u8, area: AreaCoord) -> impl Iterator<Item = Coord> + '_ {
    area.tiles(n_rows)
        .filter(move |coord| tiles.at(coord.x, coord.y).is_none())
}
