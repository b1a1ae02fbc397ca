use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "dbferry")]
#[command(about = "Back up PostgreSQL tables to daily CSV extracts and ship them off-host", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the config file [default: ~/.dbferry/config.toml]
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one backup pass. This is the default, so a bare `dbferry` from a
    /// scheduler does the same thing.
    Run,

    /// Show the latest recorded backup date and the days a run would back
    /// up, without touching anything
    Status,

    /// Write a sample config file to the config path
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}
