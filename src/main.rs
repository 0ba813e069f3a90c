use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tail_follow::{FollowConfig, Tail};
use tracing_subscriber::EnvFilter;

/// Print the last lines of a file, then keep printing lines as they are
/// appended.
#[derive(Parser, Debug)]
#[command(name = "tail-follow", version, about)]
struct Cli {
    /// File to follow
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Number of trailing lines to print before following
    #[arg(short = 'n', long, value_name = "NUM", default_value_t = tail_follow::DEFAULT_INITIAL_LINES)]
    lines: usize,

    /// Seconds to sleep between polls when no new line is available
    #[arg(short = 's', long, value_name = "SECONDS", default_value = "1", value_parser = parse_interval)]
    sleep_interval: Duration,

    /// Log scan and poll activity to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn parse_interval(value: &str) -> Result<Duration, String> {
    let seconds: f64 = value
        .parse()
        .map_err(|e| format!("invalid number of seconds '{}': {}", value, e))?;
    Duration::try_from_secs_f64(seconds)
        .map_err(|e| format!("invalid number of seconds '{}': {}", value, e))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Lines go to stdout, diagnostics to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(if cli.verbose { "debug" } else { "warn" }))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!(?cli, "parsed CLI arguments");

    let config = FollowConfig::default()
        .with_initial_lines(cli.lines)
        .with_poll_interval(cli.sleep_interval);

    let tail = match Tail::new(&cli.file) {
        Ok(tail) => tail,
        Err(e) => {
            eprintln!("tail-follow: {}", e);
            process::exit(1);
        }
    };

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    if let Err(e) = tail.follow_until(&config, shutdown).await {
        eprintln!("tail-follow: error reading {}: {}", cli.file.display(), e);
        process::exit(1);
    }
}
