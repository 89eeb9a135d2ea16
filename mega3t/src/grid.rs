use crate::{BoardError, Piece};

/// A square array of slots, each either empty or holding a [`Piece`].
///
/// The board keeps two of these: the tile grid (`n_rows² x n_rows²`) and
/// the grid of areas (`n_rows x n_rows`). A slot is addressed as `(x, y)`
/// with both components in `0..side`; anything else is an
/// [`BoardError::OutOfBounds`] error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    side: u8,
    /// Slot `(x, y)` lives at `x * side + y`.
    slots: Vec<Option<Piece>>,
}

impl Grid {
    /// Creates an empty grid.
    pub fn new(side: u8) -> Self {
        Self {
            side,
            slots: vec![None; usize::from(side) * usize::from(side)],
        }
    }

    pub fn side(&self) -> u8 {
        self.side
    }

    pub fn get(&self, x: u8, y: u8) -> Result<Option<Piece>, BoardError> {
        let idx = self.index(x, y)?;
        Ok(self.slots[idx])
    }

    /// Writes `piece` into the slot at `(x, y)`.
    ///
    /// Returns `Ok(false)` without writing if the slot is occupied, unless
    /// `force` is set, in which case the old value is overwritten.
    pub fn set(&mut self, x: u8, y: u8, piece: Piece, force: bool) -> Result<bool, BoardError> {
        let idx = self.index(x, y)?;
        let slot = &mut self.slots[idx];
        if slot.is_some() && !force {
            return Ok(false);
        }
        *slot = Some(piece);
        Ok(true)
    }

    /// Copies the `side x side` square whose top-left slot is `(x0, y0)`.
    ///
    /// Panics if the square does not fit into this grid.
    pub fn sub_grid(&self, x0: u8, y0: u8, side: u8) -> Grid {
        assert!(u16::from(x0) + u16::from(side) <= u16::from(self.side));
        assert!(u16::from(y0) + u16::from(side) <= u16::from(self.side));
        let mut sub = Grid::new(side);
        for x in 0..side {
            for y in 0..side {
                let offset = sub.offset(x, y);
                sub.slots[offset] = self.at(x0 + x, y0 + y);
            }
        }
        sub
    }

    /// Empties every slot.
    pub fn clear(&mut self) {
        self.slots.fill(None);
    }

    pub fn count_empty(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_none()).count()
    }

    /// How many slots hold `piece`.
    pub fn count(&self, piece: Piece) -> usize {
        self.slots
            .iter()
            .filter(|&&slot| slot == Some(piece))
            .count()
    }

    /// All slots with their coordinates, x-major.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u8, Option<Piece>)> + '_ {
        self.slots.iter().enumerate().map(|(idx, &slot)| {
            let side = usize::from(self.side);
            ((idx / side) as u8, (idx % side) as u8, slot)
        })
    }

    /// Unchecked read, for positions that are valid by construction.
    pub(crate) fn at(&self, x: u8, y: u8) -> Option<Piece> {
        debug_assert!(x < self.side && y < self.side);
        self.slots[self.offset(x, y)]
    }

    fn offset(&self, x: u8, y: u8) -> usize {
        usize::from(x) * usize::from(self.side) + usize::from(y)
    }

    fn index(&self, x: u8, y: u8) -> Result<usize, BoardError> {
        if x < self.side && y < self.side {
            Ok(self.offset(x, y))
        } else {
            Err(BoardError::OutOfBounds {
                x,
                y,
                side: self.side,
            })
        }
    }
}
