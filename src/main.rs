use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

use tailscale_updater::config::UpdaterConfig;
use tailscale_updater::updater::{UpdateOutcome, Updater};
use tailscale_updater::upstream::HttpListing;
use tailscale_updater::vcs::ProcessRunner;

#[derive(Parser)]
#[command(name = "tailscale-updater")]
#[command(version, about = "Bump the pinned Tailscale version when a newer stable release exists")]
struct Cli {
    /// JSON config file; missing fields use the built-in defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding config.json, build.json and Dockerfile
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Release listing URL
    #[arg(long)]
    url: Option<String>,

    /// Report whether an update is available without writing or committing
    #[arg(long)]
    dry_run: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _guard = match init_logging(cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::from(1);
        }
    };

    match run(cli) {
        Ok(outcome) => {
            println!("{}", describe(&outcome));
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<UpdateOutcome> {
    let mut config = match &cli.config {
        Some(path) => UpdaterConfig::load(path)?,
        None => UpdaterConfig::default(),
    };
    if let Some(dir) = cli.dir {
        config.addon_dir = dir;
    }
    if let Some(url) = cli.url {
        config.upstream_url = url;
    }
    config.dry_run |= cli.dry_run;

    let listing = HttpListing::new(&config.upstream_url, config.fetch_timeout())
        .context("create HTTP client")?;
    let updater = Updater::new(config, listing, ProcessRunner::new())?;

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(updater.run())
        .context("update check failed")
}

fn init_logging(log_file: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Some(log_file) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let dir = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = log_file
        .file_name()
        .with_context(|| format!("log file {:?} has no file name", log_file))?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)
        .with_context(|| format!("open log file {:?}", log_file))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(Some(guard))
}

fn describe(outcome: &UpdateOutcome) -> String {
    match outcome {
        UpdateOutcome::UpToDate { local, upstream } => {
            format!("up to date: local {} / upstream {}", local, upstream)
        }
        UpdateOutcome::Updated { previous, current } => {
            format!("updated {} -> {}", previous, current)
        }
        UpdateOutcome::WouldUpdate { previous, current } => {
            format!("update available {} -> {} (dry run)", previous, current)
        }
    }
}
