use std::collections::HashMap;
use std::path::PathBuf;

use clap::Parser;
use judge::{play_game, GameResult, Player, PlayerConfig, Recorder};
use mega3t::{DEFAULT_N_ROWS, MAX_N_ROWS};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Path to the config JSON files of players
    #[clap(num_args(2..), value_delimiter = ' ')]
    player_configs: Vec<PathBuf>,

    /// How many games to play per pair of players
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Rows of areas on the board, which is also the rows of tiles in an area
    #[arg(long, default_value_t = DEFAULT_N_ROWS, value_parser = clap::value_parser!(u8).range(2..=i64::from(MAX_N_ROWS)))]
    n_rows: u8,

    /// Stop a matchup as soon as one player makes an illegal move
    #[arg(short, long, default_value_t = false)]
    stop_on_illegal_move: bool,

    /// Record the game's interactions as JSON files into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Default)]
struct MatchScore {
    wins: [usize; 2],
    illegal_moves: [usize; 2],
    draws: usize,
}

impl MatchScore {
    fn num_games(&self) -> usize {
        self.wins[0] + self.wins[1] + self.draws
    }

    /// Percentages of wins by either player and of draws.
    fn percentages(&self) -> [f32; 3] {
        let total = self.num_games().max(1) as f32;
        [
            self.wins[0] as f32 / total * 100.0,
            self.wins[1] as f32 / total * 100.0,
            self.draws as f32 / total * 100.0,
        ]
    }
}

struct MatchupSettings<'a> {
    num_games: usize,
    n_rows: u8,
    stop_on_illegal_move: bool,
    rng: &'a mut StdRng,
    recorder: &'a mut Option<Recorder>,
}

fn play_matchup(
    players: [&mut Player; 2],
    settings: &mut MatchupSettings,
) -> anyhow::Result<MatchScore> {
    let names = [players[0].name.clone(), players[1].name.clone()];
    let [player_1, player_2] = players;
    let mut score = MatchScore::default();

    for game_idx in 0..settings.num_games {
        let result = play_game(
            &mut *settings.rng,
            player_1,
            player_2,
            settings.n_rows,
            &mut *settings.recorder,
        )?;
        match result {
            GameResult::WonByPlayer { player_idx } => {
                debug!(winner = names[player_idx], game_idx);
                score.wins[player_idx] += 1;
            }
            GameResult::Tie => {
                debug!(game_idx, "Draw");
                score.draws += 1;
            }
            GameResult::IllegalMoveByPlayer { player_idx, err } => {
                info!(player = names[player_idx], game_idx, "Illegal move by player");
                let mut err_dyn = &err as &dyn std::error::Error;
                while let Some(src_err) = err_dyn.source() {
                    info!("{}", err_dyn);
                    err_dyn = src_err;
                }
                info!("{}", err_dyn);
                if settings.stop_on_illegal_move {
                    break;
                }
                score.wins[1 - player_idx] += 1;
                score.illegal_moves[player_idx] += 1;
            }
        }
    }

    let through_illegal = |loser: usize| {
        if score.illegal_moves[loser] > 0 {
            format!(
                " ({} through illegal moves by player {})",
                score.illegal_moves[loser],
                loser + 1
            )
        } else {
            String::new()
        }
    };
    eprintln!(
        "End result:\n- {} wins by {}{}\n- {} wins by {}{}\n- {} draws",
        score.wins[0],
        names[0],
        through_illegal(1),
        score.wins[1],
        names[1],
        through_illegal(0),
        score.draws
    );

    Ok(score)
}

// prints an upper triangular matrix of the results of the tournament
fn print_tournament_results(
    player_configs: &[PlayerConfig],
    match_results: &HashMap<(usize, usize), MatchScore>,
) {
    let rule = "---------------------|";
    println!("\nTournament results (p1 win %, p2 win %, draw %):\n");
    print!(" {:19} |", "p1 ↓           p2 →");
    for config in player_configs.iter().rev() {
        print!(" {:19} |", config.nick);
    }
    println!();
    for (i, config) in player_configs.iter().enumerate() {
        println!("{}", rule.repeat(player_configs.len() - i + 1));
        print!(" {:19} |", config.nick);
        for j in (0..player_configs.len()).rev() {
            if i >= j {
                print!("    ");
            } else if let Some(score) = match_results.get(&(i, j)) {
                let [win_1, win_2, draw] = score.percentages();
                print!("{:5.1}% {:5.1}% {:5.1}% |", win_1, win_2, draw);
            } else {
                print!(" {:19} |", "N/A");
            }
        }
        println!();
    }
    println!("{}", rule);
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, n_rows = args.n_rows);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut recorder = match args.record_games_to_directory {
        Some(dir_path) => Some(Recorder::new(dir_path)?),
        None => None,
    };

    let player_configs = args
        .player_configs
        .iter()
        .map(|path| PlayerConfig::load(path))
        .collect::<Result<Vec<PlayerConfig>, anyhow::Error>>()?;

    let mut settings = MatchupSettings {
        num_games: args.num_games,
        n_rows: args.n_rows,
        stop_on_illegal_move: args.stop_on_illegal_move,
        rng: &mut rng,
        recorder: &mut recorder,
    };
    let mut match_results = HashMap::new();
    for i1 in 0..player_configs.len() {
        for i2 in i1 + 1..player_configs.len() {
            let mut player_1 = Player::from_config(&player_configs[i1])?;
            let mut player_2 = Player::from_config(&player_configs[i2])?;
            let score = play_matchup([&mut player_1, &mut player_2], &mut settings)?;
            match_results.insert((i1, i2), score);
        }
    }

    if player_configs.len() > 2 {
        print_tournament_results(&player_configs, &match_results);
    }

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
