pub use board::*;
pub use coords::*;
pub use env::*;
pub use errors::*;
pub use grid::*;
pub use legality::AllowedMoves;
pub use line::*;
pub use mutations::*;
pub use piece::*;
pub use player::*;
pub use protocol::*;
pub use state::*;
pub use turn::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod coords;
mod env;
mod errors;
mod grid;
mod legality;
mod line;
mod mutations;
mod piece;
mod player;
mod protocol;
mod state;
mod turn;
mod visualization;
