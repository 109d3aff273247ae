use clap::{Parser, Subcommand};
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::DEFAULT_ENDPOINT;

#[derive(Debug, Parser)]
#[command(name = "moodtune", version, about = "Turn a city and a mood into a playlist")]
pub struct Cli {
    /// Playlist generation endpoint
    #[arg(long, global = true, env = "MOODTUNE_ENDPOINT", default_value = DEFAULT_ENDPOINT, value_parser = parse_endpoint)]
    pub endpoint: Url,

    /// Give up on a request after this many seconds (no limit by default)
    #[arg(long, global = true, env = "MOODTUNE_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, env = "MOODTUNE_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit one query, print the result and exit
    Generate {
        #[arg(long)]
        city: String,
        #[arg(long)]
        mood: String,
    },
}

impl Cli {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn is_interactive(&self) -> bool {
        self.command.is_none()
    }
}

fn parse_endpoint(value: &str) -> Result<Url, String> {
    let url = Url::parse(value).map_err(|e| format!("invalid endpoint URL: {}", e))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported endpoint scheme '{}'", other)),
    }
}
