use std::fs::File;
use std::io::{self, stdout, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use mega3t::{RandomPlayer, DEFAULT_N_ROWS, MAX_N_ROWS};
use ratatui::{
    crossterm::{
        event::{self, Event, KeyCode},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    },
    prelude::*,
};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod app;
mod ui;

use app::App;

#[derive(Parser)]
struct Args {
    /// Rows of areas on the board, which is also the rows of tiles in an area
    #[arg(long, default_value_t = DEFAULT_N_ROWS, value_parser = clap::value_parser!(u8).range(2..=i64::from(MAX_N_ROWS)))]
    n_rows: u8,

    /// Play against a random AI instead of another human
    #[arg(long, default_value_t = false)]
    vs_ai: bool,

    /// RNG seed for the AI
    #[arg(long)]
    seed: Option<u64>,

    /// Let the `f` key toggle forced moves, which ignore the rules
    #[arg(long, default_value_t = false)]
    allow_force: bool,

    /// Write logs to this file, since the terminal is taken
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        initialize_logging(path, args.log_level)?;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, n_rows = args.n_rows, vs_ai = args.vs_ai);
    let ai = args.vs_ai.then(|| RandomPlayer::from_seed(seed));
    let mut app = App::new(args.n_rows, ai, args.allow_force);

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // Restore the terminal before reporting any error
    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;
        if let Some(code) = next_key()? {
            if app.handle_key(code) {
                return Ok(());
            }
        }
    }
}

fn next_key() -> io::Result<Option<KeyCode>> {
    if event::poll(std::time::Duration::from_millis(16))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == event::KeyEventKind::Press {
                return Ok(Some(key.code));
            }
        }
    }
    Ok(None)
}

fn initialize_logging(path: &Path, level: LevelFilter) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .init();
    Ok(())
}
