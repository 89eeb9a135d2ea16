use mega3t::{Coord, IllegalMove};

#[derive(Debug)]
/// A move by a bot that the board did not accept.
pub struct RejectedMove {
    pub coord: Coord,
    /// How many moves were made before this one.
    pub move_idx: usize,
    pub err: IllegalMove,
}

impl std::error::Error for RejectedMove {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.err)
    }
}

impl std::fmt::Display for RejectedMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tried to play {} as move #{}", self.coord, self.move_idx + 1)
    }
}
