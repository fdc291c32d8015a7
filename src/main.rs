//! tagnotes - CLI entry point.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tagnotes::config::{Config, DEFAULT_REV, RunOptions, check_git_installed};
use tagnotes::error::ConfigError;
use tagnotes::git::repo::{current_branch, open_repository};
use tagnotes::{GitCli, generate_notes};

/// Extract ticket references from the commits between the latest deployment tags.
#[derive(Parser, Debug)]
#[command(name = "tagnotes")]
#[command(about = "Extract ticket references from the commits between deployment tags")]
#[command(version)]
struct Cli {
    /// Path to the git repository
    #[arg(long)]
    path: Option<PathBuf>,

    /// Starting tag (with --end: explicit range; alone: start plus depth)
    #[arg(long)]
    start: Option<String>,

    /// Ending tag (requires --start)
    #[arg(long)]
    end: Option<String>,

    /// Number of tagged commits to span (-1 = unbounded)
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    tag_count: i64,

    /// Only print ticket lines matching this pattern
    #[arg(long)]
    find: Option<String>,

    /// Branch or revision whose history is walked
    #[arg(long, default_value = DEFAULT_REV)]
    rev: String,

    /// Fetch tags from this remote before walking
    #[arg(long, value_name = "REMOTE")]
    fetch: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Show detailed diagnostics
    #[arg(short, long)]
    verbose: bool,
}

impl From<Cli> for RunOptions {
    fn from(cli: Cli) -> Self {
        Self {
            path: cli.path,
            start: cli.start,
            end: cli.end,
            tag_count: cli.tag_count,
            find: cli.find,
            rev: cli.rev,
            fetch: cli.fetch,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let json = cli.json;
    let config = match Config::from_options(cli.into()) {
        Ok(config) => config,
        Err(ConfigError::MissingPath) => {
            eprintln!("{}", ConfigError::MissingPath);
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e).context("Invalid configuration"),
    };

    // Step 1: Check prerequisites
    check_git_installed(&config.git).context("git is required")?;

    let repo = open_repository(&config.repo_path)
        .context("Run tagnotes with --path pointing at a git repository")?;
    let branch = current_branch(&repo);
    info!(branch = ?branch, rev = %config.rev, "Opened repository");

    // Step 2: Optionally refresh tags
    let provider = GitCli::from_config(&config);
    if let Some(remote) = &config.fetch_remote {
        info!(remote = %remote, "Fetching tags");
        provider
            .fetch_tags(remote)
            .with_context(|| format!("Failed to fetch tags from {}", remote))?;
    }

    // Step 3: Select the window and extract ticket lines
    let report = generate_notes(&provider, &config)
        .context("Failed to read commit history")?
        .with_branch(branch);

    // Step 4: Print
    if json {
        println!("{}", report.to_json().context("Failed to serialize report")?);
    } else {
        report
            .write_text(&mut io::stdout().lock(), &mut io::stderr().lock())
            .context("Failed to write output")?;
    }

    Ok(ExitCode::SUCCESS)
}

/// Log to stderr; RUST_LOG overrides the verbosity flag.
fn init_tracing(verbose: bool) {
    let default = if verbose { "warn,tagnotes=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
