use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "scribe",
    about = "Scribe: transcript analysis service",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a TOML config file (defaults to ./scribe.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Answer from a local scripted backend instead of the completion API
    #[arg(long, global = true)]
    pub offline: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Analyze a single transcript
    Analyze(AnalyzeArgs),
    /// Analyze several transcripts concurrently
    Batch(BatchArgs),
    /// Show the effective configuration
    Config,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Override the bind address
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    pub transcript: String,
}

#[derive(Args)]
pub struct BatchArgs {
    /// Transcripts given inline
    pub transcripts: Vec<String>,

    /// Read transcripts from a file, one per line
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Report every item instead of failing on the first error
    #[arg(long)]
    pub report: bool,
}
