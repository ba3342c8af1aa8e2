//! `docportal`: terminal front-end for the document search and index services.
//!
//! ```bash
//! docportal search "hybrid search"
//! docportal upload file:///home/me/paper.pdf
//! docportal health
//! docportal            # interactive prompt
//! docportal init-config
//! ```

mod platform;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use platform::app::{self, OneShot};
use platform::config;

#[derive(Parser)]
#[command(name = "docportal", version, about)]
struct Cli {
    /// Path to the RON config file
    #[arg(long, global = true, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Search endpoint, overriding the config file
    #[arg(long, global = true, env = "DOCPORTAL_SEARCH_URL")]
    search_url: Option<String>,

    /// Index endpoint, overriding the config file
    #[arg(long, global = true, env = "DOCPORTAL_INDEX_URL")]
    index_url: Option<String>,

    /// Mirror the log to the terminal
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Search the indexed documents
    Search {
        /// Query text; multiple words are joined with spaces
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Submit a document location for indexing
    Upload {
        /// File path or URL the index service can read
        location: String,
    },
    /// Probe the health endpoints of both services
    Health,
    /// Start the interactive prompt (the default)
    Interactive,
    /// Write a config file with the default settings
    InitConfig {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let request = match cli.command.unwrap_or(Command::Interactive) {
        Command::InitConfig { force } => {
            config::write_default(&cli.config, force)?;
            println!("Wrote default settings to {}", cli.config.display());
            return Ok(ExitCode::SUCCESS);
        }
        Command::Search { query } => Some(OneShot::Search(query.join(" "))),
        Command::Upload { location } => Some(OneShot::Upload(location)),
        Command::Health => Some(OneShot::Health),
        Command::Interactive => None,
    };

    let mut settings = config::load(&cli.config)?;
    settings.apply_overrides(cli.search_url, cli.index_url);
    settings.log.install(cli.verbose)?;

    match request {
        Some(request) => {
            let succeeded = app::run_once(&settings, request)?;
            Ok(if succeeded {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        None => {
            app::run_interactive(&settings)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
