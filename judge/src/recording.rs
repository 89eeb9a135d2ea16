use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Writes the requests and responses of each game to a numbered JSON file.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    requests: Vec<RequestToPlayer>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            requests: Vec::new(),
        })
    }

    /// Stores one exchange. Both sides are JSON documents.
    pub fn store_request(&mut self, player: &str, request: &str, response: &str) -> anyhow::Result<()> {
        self.requests.push(RequestToPlayer {
            player: String::from(player),
            request: serde_json::from_str(request)?,
            response: serde_json::from_str(response)?,
        });
        Ok(())
    }

    /// Writes everything stored since the last call to `game_NNNNNN.json`.
    pub fn write_game_recording(&mut self) -> anyhow::Result<PathBuf> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let writer = BufWriter::new(File::create(&filepath)?);
        let requests = std::mem::take(&mut self.requests);
        serde_json::to_writer_pretty(writer, &requests)?;
        self.num += 1;
        Ok(filepath)
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct RequestToPlayer {
    pub player: String,
    pub request: Value,
    pub response: Value,
}
