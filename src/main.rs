use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use gitsync::config::{AppConfig, LogFormat, LoggingConfig};
use gitsync::exec::GitCli;
use gitsync::render::{self, OutputMode, RepoStatus, EXIT_ERROR};
use gitsync::{RepoContext, Syncer};

#[derive(Parser)]
#[command(name = "gitsync", about = "Run git sync operations and classify the outcome")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Working tree to operate on (overrides repository.path)
    #[arg(short, long)]
    repo: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge a branch into the current branch
    Merge { src: String },
    /// Pull a remote branch and merge it
    PullMerge { remote: String, branch: String },
    /// Rebase the current branch onto a new base
    Rebase { base: String },
    /// Pull a remote branch and rebase onto it
    PullRebase { remote: String, branch: String },
    /// Continue an interrupted rebase
    Continue,
    /// Skip the current commit of an interrupted rebase
    Skip,
    /// Abort an in-progress rebase (best effort)
    AbortRebase,
    /// Abort an in-progress merge (best effort)
    AbortMerge,
    /// Push a local branch to a remote branch
    Push {
        src: String,
        remote: String,
        dst: String,
    },
    /// Commit the given files
    Commit {
        #[arg(short, long)]
        message: String,
        /// Stage the files on top of the current index before committing
        #[arg(short, long)]
        include: bool,
        #[arg(required = true)]
        files: Vec<String>,
    },
    /// Report whether a merge or rebase is in progress
    Status,
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    let layer = match logging.format {
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry().with(filter).with(layer).init();
}

async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<u8> {
    let mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let work_tree = cli.repo.unwrap_or(config.repository.path);
    let repo = RepoContext::locate(&work_tree).await?;
    let git = GitCli::from_config(&config.git, &work_tree)?;
    let syncer = Syncer::new(Arc::new(git), repo);

    tracing::debug!(work_tree = %work_tree.display(), git_dir = %syncer.repo().git_dir().display(), "Using repository");

    let outcome = match cli.command {
        Command::Merge { src } => syncer.merge(&src).await?,
        Command::PullMerge { remote, branch } => syncer.pull_merge(&remote, &branch).await?,
        Command::Rebase { base } => syncer.rebase(&base).await?,
        Command::PullRebase { remote, branch } => syncer.pull_rebase(&remote, &branch).await?,
        Command::Continue => syncer.continue_rebase().await?,
        Command::Skip => syncer.skip_rebase_commit().await?,
        Command::Push { src, remote, dst } => syncer.push(&src, &remote, &dst).await?,
        Command::AbortRebase => {
            syncer.abort_rebase().await;
            return Ok(0);
        }
        Command::AbortMerge => {
            syncer.abort_merge().await;
            return Ok(0);
        }
        Command::Commit {
            message,
            include,
            files,
        } => {
            let stdout = if include {
                syncer.commit_include(&files, &message).await
            } else {
                syncer.commit(&files, &message).await
            };
            print!("{stdout}");
            return Ok(0);
        }
        Command::Status => {
            let status = RepoStatus {
                merge_in_progress: syncer.merge_in_progress(),
                rebase_in_progress: syncer.rebase_in_progress(),
            };
            println!("{}", render::render_status(&status, mode)?);
            return Ok(0);
        }
    };

    println!("{}", render::render_outcome(&outcome, mode)?);
    Ok(render::exit_code(outcome.severity()))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("gitsync: {e}");
            return ExitCode::from(EXIT_ERROR);
        }
    };

    init_tracing(&config.logging);

    match run(cli, config).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("gitsync: {e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
