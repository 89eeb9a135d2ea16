use serde::{Deserialize, Serialize};

use crate::{BoardError, InvalidPieces};

/// The identity of one participant in a game.
///
/// A piece is the position of its participant in the [`Pieces`] registry of
/// the board, so two pieces are the same participant exactly when they are equal.
/// Names, markers and colors live in [`PieceInfo`] and play no part in the rules.
///
/// Pieces are handed out by the registry. One that arrives from elsewhere
/// (e.g. deserialized from a bot) is checked against the registry before use,
/// and the board rejects an unknown one with [`BoardError::UnknownPiece`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Piece(pub(crate) u8);

impl Piece {
    /// The position of this piece in its registry, which is also its turn index.
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "piece #{}", self.0)
    }
}

/// Presentation metadata for a participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceInfo {
    pub name: String,
    /// Single character used when rendering the board as text.
    pub abbr: char,
}

impl PieceInfo {
    pub fn new(name: &str, abbr: char) -> Self {
        Self {
            name: String::from(name),
            abbr,
        }
    }
}

/// The fixed, ordered set of participants of a game.
///
/// The order is the turn order: the first piece moves first.
/// Serialized as a plain list, and checked like [`Pieces::try_new()`] when
/// deserialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PieceInfo>", into = "Vec<PieceInfo>")]
pub struct Pieces {
    infos: Vec<PieceInfo>,
}

impl Pieces {
    /// Creates a registry from the participants' metadata, in turn order.
    ///
    /// # Panics
    ///
    /// If `infos` is empty or has more than 255 entries.
    pub fn new(infos: Vec<PieceInfo>) -> Self {
        match Self::try_new(infos) {
            Ok(pieces) => pieces,
            Err(err) => panic!("{}", err),
        }
    }

    pub fn try_new(infos: Vec<PieceInfo>) -> Result<Self, InvalidPieces> {
        if infos.is_empty() {
            Err(InvalidPieces::Empty)
        } else if infos.len() > usize::from(u8::MAX) {
            Err(InvalidPieces::TooMany(infos.len()))
        } else {
            Ok(Self { infos })
        }
    }

    /// Cross, then nought.
    pub fn noughts_and_crosses() -> Self {
        Self::new(vec![
            PieceInfo::new("cross", 'X'),
            PieceInfo::new("nought", 'O'),
        ])
    }

    pub fn len(&self) -> usize {
        self.infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    pub fn contains(&self, piece: Piece) -> bool {
        piece.index() < self.infos.len()
    }

    /// The piece at position `idx` of the turn order.
    pub fn nth(&self, idx: usize) -> Option<Piece> {
        (idx < self.infos.len()).then(|| Piece(idx as u8))
    }

    pub fn info(&self, piece: Piece) -> Result<&PieceInfo, BoardError> {
        self.infos
            .get(piece.index())
            .ok_or(BoardError::UnknownPiece(piece))
    }

    /// All pieces in turn order.
    pub fn iter(&self) -> impl Iterator<Item = Piece> {
        (0..self.infos.len() as u8).map(Piece)
    }

    pub fn infos(&self) -> &[PieceInfo] {
        &self.infos
    }
}

impl TryFrom<Vec<PieceInfo>> for Pieces {
    type Error = InvalidPieces;

    fn try_from(infos: Vec<PieceInfo>) -> Result<Self, Self::Error> {
        Self::try_new(infos)
    }
}

impl From<Pieces> for Vec<PieceInfo> {
    fn from(pieces: Pieces) -> Self {
        pieces.infos
    }
}
