use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use anyhow::Context;
use mega3t::Request;
use serde::Deserialize;
use tracing::{trace, warn};

use crate::recording::Recorder;

/// How to start a bot, read from a JSON file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PlayerConfig {
    pub name: String,
    /// Short name for the tournament table.
    pub nick: String,
    /// The executable and its arguments.
    pub cmd: Vec<String>,
}

impl PlayerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read player config '{}'", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid player config '{}'", path.display()))?;
        if config.cmd.is_empty() {
            anyhow::bail!("Player config '{}' has an empty cmd", path.display());
        }
        Ok(config)
    }
}

/// A bot running as a child process.
pub struct Player {
    pub name: String,
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    // A re-usable buffer for IO.
    // Should always be empty before and after perform_request().
    buf: String,
}

impl Player {
    pub fn new(name: &str, cmd: &[String]) -> anyhow::Result<Self> {
        let (executable, args) = cmd.split_first().context("Empty command")?;
        let mut child = Command::new(executable)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .with_context(|| format!("Could not start '{}'", executable))?;

        let stdin = child.stdin.take().context("Could not access stdin")?;
        let stdout = child.stdout.take().context("Could not access stdout")?;
        Ok(Self {
            name: String::from(name),
            child,
            stdin,
            stdout: BufReader::new(stdout),
            buf: String::new(),
        })
    }

    pub fn from_config(config: &PlayerConfig) -> anyhow::Result<Self> {
        Self::new(&config.name, &config.cmd)
    }

    pub fn perform_request<T: serde::de::DeserializeOwned + std::fmt::Debug>(
        &mut self,
        recorder: &mut Option<Recorder>,
        req: &Request,
    ) -> anyhow::Result<T> {
        let mut req_json = serde_json::to_string(req)?;
        trace!(name: "Sending request", player = &self.name, request = %req_json);
        req_json.push('\n');
        self.stdin.write_all(req_json.as_bytes())?;
        self.stdin.flush()?;
        self.buf.clear();
        if self.stdout.read_line(&mut self.buf)? == 0 {
            anyhow::bail!("{} closed its output", self.name);
        }
        let serialized_response = self.buf.trim_end();
        let response = serde_json::from_str::<T>(serialized_response).with_context(|| {
            format!("Invalid response from {}: {}", self.name, serialized_response)
        })?;
        trace!(name: "Received response", player = &self.name, response = %serialized_response);

        if let Some(recorder) = recorder {
            recorder.store_request(&self.name, &req_json, serialized_response)?;
        }
        self.buf.clear();
        Ok(response)
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        // The bot may already be gone, in which case there is nothing to do
        let bye = serde_json::to_string(&Request::Bye).unwrap_or_default();
        if writeln!(self.stdin, "{}", bye).and_then(|_| self.stdin.flush()).is_err() {
            return;
        }
        if let Err(err) = self.child.wait() {
            warn!(player = &self.name, %err, "Could not wait for bot to exit");
        }
    }
}
