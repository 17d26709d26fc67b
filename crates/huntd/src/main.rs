//! huntd - Developer activity analytics from local git repositories
//!
//! Point it at a directory and it finds every repository beneath it, reads
//! their histories in parallel and reports streaks, languages, repository
//! health, velocity and achievements. Nothing is written to any repository.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use huntd::display::{format_achievements, format_comparison, format_summary, title, Colors};
use huntd::{ScanFilter, Scanner};
use huntd_core::Config;

#[derive(Parser)]
#[command(name = "huntd")]
#[command(about = "Developer activity analytics from local git repositories")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
#[command(after_help = r#"EXAMPLES:
    huntd                              # Scan the current directory
    huntd ~/code --since 2025-01-01    # Scan ~/code from January on
    huntd scan ~/code --author ada     # Only commits by a matching author
    huntd compare ~/work ~/oss         # Two trees side by side
    huntd achievements --json          # Badge states as JSON

Set RUST_LOG=huntd=debug for progress on stderr.
"#)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    scan: ScanArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Full summary for one directory tree (default)
    Scan(ScanArgs),

    /// Two directory trees scanned independently, side by side
    Compare {
        left: PathBuf,
        right: PathBuf,

        #[command(flatten)]
        opts: ScanOptions,
    },

    /// Achievement states only
    Achievements(ScanArgs),
}

#[derive(Args, Clone)]
struct ScanArgs {
    /// Directory to scan (default: current)
    path: Option<PathBuf>,

    #[command(flatten)]
    opts: ScanOptions,
}

#[derive(Args, Clone)]
struct ScanOptions {
    /// Only commits on or after this day (YYYY-MM-DD)
    #[arg(long)]
    since: Option<String>,

    /// Only commits on or before this day (YYYY-MM-DD)
    #[arg(long)]
    until: Option<String>,

    /// Only commits whose author name or email contains this text
    #[arg(long)]
    author: Option<String>,

    /// Concurrent git queries (default from config: 8)
    #[arg(long)]
    workers: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl ScanArgs {
    fn target(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

impl ScanOptions {
    fn scanner(&self) -> Result<Scanner> {
        let config = Config::load_default().context("Failed to load config")?;
        let filter = ScanFilter::parse(
            self.since.as_deref(),
            self.until.as_deref(),
            self.author.as_deref(),
        )?;
        let mut scanner = Scanner::new(config, filter);
        if let Some(workers) = self.workers {
            scanner = scanner.with_workers(workers);
        }
        Ok(scanner)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Scan(args)) => cmd_scan(&args),
        Some(Commands::Compare { left, right, opts }) => cmd_compare(&left, &right, &opts),
        Some(Commands::Achievements(args)) => cmd_achievements(&args),
        None => cmd_scan(&cli.scan),
    }
}

fn cmd_scan(args: &ScanArgs) -> Result<()> {
    let target = args.target();
    let report = args
        .opts
        .scanner()?
        .scan(&target, Utc::now())
        .with_context(|| format!("Failed to scan {}", target.display()))?;

    if args.opts.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_summary(&report, &Colors::auto()));
    }
    Ok(())
}

fn cmd_compare(left: &Path, right: &Path, opts: &ScanOptions) -> Result<()> {
    let comparison = opts
        .scanner()?
        .compare(left, right, Utc::now())
        .context("Failed to compare directories")?;

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
    } else {
        print!("{}", format_comparison(&comparison, &Colors::auto()));
    }
    Ok(())
}

fn cmd_achievements(args: &ScanArgs) -> Result<()> {
    let target = args.target();
    let report = args
        .opts
        .scanner()?
        .scan(&target, Utc::now())
        .with_context(|| format!("Failed to scan {}", target.display()))?;

    if args.opts.json {
        println!("{}", serde_json::to_string_pretty(&report.achievements)?);
        return Ok(());
    }

    let colors = Colors::auto();
    let unlocked = report.achievements.iter().filter(|a| a.unlocked).count();
    println!(
        "{}",
        title(
            &format!("Achievements: {}/{} unlocked", unlocked, report.achievements.len()),
            &colors
        )
    );
    print!("{}", format_achievements(&report.achievements, &colors));
    Ok(())
}
