use std::collections::BTreeSet;

use clap::Parser;
use mega3t::{AllowedMoves, Board, Coord, GameOutcome, Mutation, Piece, Pieces, Player};
use mega3t_bot_utils::{Bot, BoardTracker};
use rand::rngs::StdRng;
use rand::seq::{IteratorRandom, SliceRandom};
use rand::SeedableRng;
use tracing::{debug, warn};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);
    let seed = args.seed.unwrap_or_else(rand::random);
    let rng = StdRng::seed_from_u64(seed);

    GreedyBot::new(rng).run()
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Wins the game if it can, otherwise wins an area if it can, and avoids
/// handing the opponent a free choice of area.
struct GreedyBot {
    rng: StdRng,
    tracker: BoardTracker,
    piece: Option<Piece>,
}

impl GreedyBot {
    fn new(rng: StdRng) -> Self {
        Self {
            rng,
            tracker: BoardTracker::new(),
            piece: None,
        }
    }

    fn best_moves(board: &Board, me: Piece) -> Vec<Coord> {
        let mut top_choices = Vec::new();
        let mut top_score = 0;
        for coord in board.allowed_moves() {
            let score = Self::score(board, me, coord);
            match score.cmp(&top_score) {
                std::cmp::Ordering::Less => {}
                std::cmp::Ordering::Equal => top_choices.push(coord),
                std::cmp::Ordering::Greater => {
                    top_choices = vec![coord];
                    top_score = score;
                }
            }
        }
        top_choices
    }

    fn score(board: &Board, me: Piece, coord: Coord) -> usize {
        let mut after = board.clone();
        if !after.make_a_move(coord) {
            return 0;
        }
        if after.outcome() == Some(GameOutcome::Win(me)) {
            return 4;
        }
        if after.areas_won_by(me) > board.areas_won_by(me) {
            return 3;
        }
        let n_rows = after.n_rows();
        let next_areas: BTreeSet<_> = after
            .allowed_moves()
            .iter()
            .map(|c| c.area(n_rows))
            .collect();
        if next_areas.len() > 1 {
            1
        } else {
            2
        }
    }
}

impl Player for GreedyBot {
    fn new_game(&mut self, piece: Piece, n_rows: u8, pieces: &Pieces) {
        self.piece = Some(piece);
        if let Err(err) = self.tracker.new_game(n_rows, pieces) {
            warn!(%err, "Cannot track this game, playing randomly");
        }
    }

    fn play(&mut self, mutations: Vec<Mutation>, allowed_moves: &AllowedMoves) -> Coord {
        let best = match (self.piece, self.tracker.replay(&mutations)) {
            (Some(me), Ok(board)) if board.allowed_moves() == allowed_moves => {
                Self::best_moves(board, me)
            }
            (_, Err(err)) => {
                warn!(%err, "Lost track of the game, playing randomly");
                Vec::new()
            }
            _ => {
                warn!("Tracked board disagrees with the judge, playing randomly");
                Vec::new()
            }
        };
        debug!(num_choices = best.len(), "Picking among the best moves");
        match best.choose(&mut self.rng) {
            Some(&coord) => coord,
            None => allowed_moves
                .iter()
                .choose(&mut self.rng)
                .unwrap_or_default(),
        }
    }
}
