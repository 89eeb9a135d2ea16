use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{BoardError, Coord, Piece};

/// A tile that was claimed by a piece.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mutation {
    pub coord: Coord,
    pub piece: Piece,
}

/// One log of moves per observer, so autonomous players can catch up on what
/// happened since they last acted.
///
/// Every recorded move is appended to every observer's log. Draining a log
/// returns its entries in the order they were recorded and empties it, without
/// touching the logs of other observers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MutationFeed {
    logs: BTreeMap<Piece, Vec<Mutation>>,
}

impl MutationFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a log for `observer`. Registering twice keeps the existing log.
    pub fn register(&mut self, observer: Piece) {
        self.logs.entry(observer).or_default();
    }

    pub fn is_registered(&self, observer: Piece) -> bool {
        self.logs.contains_key(&observer)
    }

    pub fn observers(&self) -> impl Iterator<Item = Piece> + '_ {
        self.logs.keys().copied()
    }

    pub fn record(&mut self, coord: Coord, piece: Piece) {
        for log in self.logs.values_mut() {
            log.push(Mutation { coord, piece });
        }
    }

    /// Takes everything recorded since the last drain of `observer`.
    pub fn drain(&mut self, observer: Piece) -> Result<Vec<Mutation>, BoardError> {
        self.logs
            .get_mut(&observer)
            .map(std::mem::take)
            .ok_or(BoardError::UnregisteredObserver(observer))
    }

    /// Empties all logs. Observers stay registered.
    pub fn clear(&mut self) {
        for log in self.logs.values_mut() {
            log.clear();
        }
    }
}
