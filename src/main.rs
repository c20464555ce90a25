//! Alamendah binary entrypoint kept minimal. Command handlers live in `args`.

mod args;

use std::fmt::{self, Write as _};
use std::fs::OpenOptions;
use std::sync::OnceLock;

use clap::Parser;

struct AlamendahTimer;

impl tracing_subscriber::fmt::time::FormatTime for AlamendahTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        // "YYYY-MM-DD-T HH:MM:SS"
        let ts = chrono::Local::now().format("%Y-%m-%d-T %H:%M:%S");
        write!(w, "{ts}")
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Install the global tracing subscriber.
///
/// Inputs:
/// - `args`: Parsed arguments (level, verbosity, log file).
///
/// Details:
/// - `RUST_LOG` wins over the command-line level.
/// - Logs go to `--log-file` when it can be opened, otherwise to stderr, so stdout
///   stays clean for command output.
fn init_logging(args: &args::Args) {
    let level = args::determine_log_level(args);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level));

    let file = args.log_file.as_ref().map(|path| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map(|file| (file, path))
    });

    match file {
        Some(Ok((file, path))) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(AlamendahTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %path.display(), "logging initialized");
        }
        other => {
            let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(true)
                .with_writer(non_blocking)
                .with_timer(AlamendahTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            if let Some(Err(e)) = other {
                tracing::warn!(error = %e, "failed to open log file; using stderr");
            }
        }
    }
}

#[tokio::main]
async fn main() {
    let args = args::Args::parse();
    init_logging(&args);

    tracing::debug!(command = ?args.command, "Alamendah starting");
    let code = match args::run(&args).await {
        Ok(()) => 0,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("error: {err}");
            1
        }
    };
    tracing::debug!("Alamendah exited");
    if code != 0 {
        std::process::exit(code);
    }
}
