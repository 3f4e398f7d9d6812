//! Logging Module
//!
//! Structured logging for the server:
//! - JSON file log in a daily rolling file under the log directory
//! - Human-readable (or JSON) stdout log
//! - `log` crate events redirected into `tracing`
//! - Rotated files from previous days gzip-compressed in the background

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;

/// File name prefix of the rolling log.
const LOG_FILE_PREFIX: &str = "campaign-keep.log";

/// Initialize the logging system.
///
/// This sets up:
/// 1. A file logger (JSON formatted) in `log_dir`, rotated daily.
/// 2. A stdout logger, pretty by default or JSON when configured.
/// 3. Redirects standard `log` crate events to `tracing` (installed by
///    the subscriber's `init`).
///
/// `RUST_LOG` takes precedence over the configured filter.
///
/// Returns a `WorkerGuard` which must be kept alive for the duration of the application
/// to ensure buffered logs are flushed on shutdown.
pub fn init(config: &LoggingConfig, log_dir: &Path) -> WorkerGuard {
    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(log_dir) {
            eprintln!("Failed to create logs directory: {}", e);
        }
    }

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = || {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.filter))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_filter(env_filter());

    let stdout_layer = if config.json_stdout {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stdout)
            .json()
            .with_filter(env_filter())
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stdout)
            .pretty()
            .with_filter(env_filter())
            .boxed()
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer)
        .init();

    // Compress after init so the log macros inside are captured
    let log_dir_clone = log_dir.to_path_buf();
    std::thread::spawn(move || {
        compress_old_logs(log_dir_clone);
    });

    tracing::info!(
        "Logging initialized. Writing to: {:?} (daily rolling)",
        log_dir.join(LOG_FILE_PREFIX)
    );

    guard
}

/// True for rotated files (`<prefix>.YYYY-MM-DD`) that are not today's and
/// not already compressed.
fn should_compress(file_name: &str, today_suffix: &str) -> bool {
    file_name
        .strip_prefix(LOG_FILE_PREFIX)
        .and_then(|rest| rest.strip_prefix('.'))
        .is_some_and(|date| date != today_suffix && !date.ends_with(".gz"))
}

/// Compress old log files in the background
fn compress_old_logs(log_dir: PathBuf) {
    let today_suffix = chrono::Utc::now().format("%Y-%m-%d").to_string();

    let Ok(entries) = fs::read_dir(&log_dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if should_compress(name, &today_suffix) {
            match compress_file(&path) {
                Ok(()) => tracing::info!("Compressed old log: {:?}", path),
                Err(e) => tracing::warn!("Failed to compress old log {:?}: {}", path, e),
            }
        }
    }
}

fn compress_file(path: &Path) -> io::Result<()> {
    let file = fs::File::open(path)?;
    let mut reader = io::BufReader::new(file);

    let mut gz_path_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No filename"))?
        .to_os_string();
    gz_path_name.push(".gz");
    let parent_dir = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No parent directory"))?;
    let gz_path = parent_dir.join(gz_path_name);

    // Skip if already exists
    if gz_path.exists() {
        return Ok(());
    }

    let output = fs::File::create(&gz_path)?;
    let mut encoder = GzEncoder::new(output, Compression::default());

    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?;

    fs::remove_file(path)?;

    Ok(())
}
