use anyhow::Result;
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use tracing::{info, Level};

use githistory::config::Config;
use githistory::history::mine_data;
use githistory::output::Reporter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Repository paths to analyze
    #[arg(required = true, num_args = 1..)]
    paths: Vec<PathBuf>,

    /// Branch to read history from (default: master)
    #[arg(short, long)]
    branch: Option<String>,

    /// Directory for authors.csv and repos.csv (default: current directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also dump the full history as JSON
    #[arg(long)]
    json: bool,

    /// Config file (default: githistory.toml in the current directory, if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable progress bars
    #[arg(long)]
    no_progress: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(branch) = cli.branch {
        config.history.branch = branch;
    }
    if let Some(dir) = cli.output_dir {
        config.output.directory = dir;
    }
    if cli.json {
        config.output.json = true;
    }
    if cli.no_progress {
        config.output.progress = false;
    }

    println!(
        "{}",
        "GitHistory - Commit Authorship Across Repositories"
            .bright_cyan()
            .bold()
    );
    println!(
        "Branch: {}\n",
        config.history.branch.as_str().bright_white()
    );

    let reporter = Reporter::new(&config.output)?;

    info!("Starting history extraction...");
    let history = mine_data(&cli.paths, &config)?;

    let written = reporter.generate_report(&history, &mut std::io::stdout().lock())?;

    println!(
        "{} {} files written",
        "Reports complete!".bright_green().bold(),
        written.len()
    );

    Ok(())
}
