mod board_tracking;
pub use board_tracking::*;

use mega3t::{AllowedMoves, Okay, Player, Request};

/// A trait to simplify writing bots.
///
/// Every [`Player`] is a bot: [`Bot::run()`] serves it over the judge's
/// JSON-lines protocol.
pub trait Bot: Player {
    fn run(&mut self) -> anyhow::Result<()> {
        // Communication happens through stdin/stdout.
        // Stderr can be used for logging.
        let mut stdin = std::io::stdin().lock();
        let mut stdout = std::io::stdout().lock();
        let mut buf = String::new();

        loop {
            // Read the next line into buf
            buf.clear(); // because stdin.read_line() appends to the buffer
            use std::io::BufRead;
            let num_bytes_read = stdin.read_line(&mut buf)?;
            if num_bytes_read == 0 {
                // 0 bytes read means EOF - the judge has exited.
                break Ok(());
            }

            let req = serde_json::from_str::<Request>(buf.trim_end())?;

            match req {
                Request::NewGame {
                    piece,
                    n_rows,
                    pieces,
                } => {
                    self.new_game(piece, n_rows, &pieces);
                    serde_json::to_writer(&mut stdout, &Okay())?;
                }
                Request::PlayTurn {
                    mutations,
                    allowed_moves,
                } => {
                    let allowed_moves = AllowedMoves::from_iter(allowed_moves);
                    serde_json::to_writer(&mut stdout, &self.play(mutations, &allowed_moves))?
                }
                Request::Bye => break Ok(()),
            }
            use std::io::Write;
            writeln!(stdout)?;
            stdout.flush()?;
        }
    }
}

impl<P: Player> Bot for P {}
