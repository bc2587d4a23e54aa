//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production environments
//! Features:
//! - Console output, pretty or JSON
//! - Daily rotating application logs (deleted after 14 days)
//! - Permanent audit logs for report saves, clears and exports (never deleted)

use std::fs;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Days an application log file is kept
const APP_LOG_RETENTION_DAYS: i64 = 14;

/// Clean up old application log files (older than 14 days)
///
/// Only `app/app.YYYY-MM-DD.log` files are considered; audit logs are kept.
pub fn cleanup_old_logs(log_dir: &Path) -> anyhow::Result<usize> {
    let cutoff = chrono::Local::now().date_naive() - chrono::Duration::days(APP_LOG_RETENTION_DAYS);

    let app_log_dir = log_dir.join("app");
    if !app_log_dir.exists() {
        return Ok(0);
    }

    let mut removed = 0;
    for entry in fs::read_dir(app_log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(date_part) = name
            .strip_prefix("app.")
            .and_then(|d| d.strip_suffix(".log"))
            && let Ok(date) = chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            && date < cutoff
        {
            fs::remove_file(&path)?;
            removed += 1;
            tracing::info!(file = %name, "Deleted old log file");
        }
    }

    Ok(removed)
}

fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

fn rolling(dir: &Path, prefix: &str) -> anyhow::Result<RollingFileAppender> {
    fs::create_dir_all(dir)?;
    Ok(RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .build(dir)?)
}

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn")
/// * `json_format` - Whether to use JSON format (true for production, false for development)
/// * `log_dir` - Optional directory for file logging (e.g., Some("./work_dir/logs"))
///
/// # Examples
/// ```no_run
/// # use till::utils::logger::init_logger_with_file;
/// // Development setup (console only)
/// init_logger_with_file("debug", false, None)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let mut layers: Vec<BoxedLayer> = Vec::new();

    // Console layer
    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .with_filter(level_filter(level))
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .with_filter(level_filter(level))
            .boxed()
    };
    layers.push(console_layer);

    if let Some(dir) = log_dir {
        let log_dir = Path::new(dir);

        // Application logs (rotated daily, subject to 14-day cleanup)
        // Only log to app file if target is NOT "audit"
        let app_log = rolling(&log_dir.join("app"), "app")?;
        layers.push(
            fmt::layer()
                .json()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::sync::Mutex::new(app_log))
                .with_filter(level_filter(level))
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
                    meta.target() != "audit"
                }))
                .boxed(),
        );

        // Permanent audit logs (never deleted)
        let audit_log = rolling(&log_dir.join("audit"), "audit")?;
        layers.push(
            fmt::layer()
                .json()
                .with_target(true)
                .with_writer(std::sync::Mutex::new(audit_log))
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
                    meta.target() == "audit"
                }))
                .boxed(),
        );
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_removes_only_old_app_logs() {
        let dir = tempfile::tempdir().unwrap();
        let app_dir = dir.path().join("app");
        fs::create_dir_all(&app_dir).unwrap();

        let old = chrono::Local::now().date_naive() - chrono::Duration::days(30);
        let recent = chrono::Local::now().date_naive();
        let old_name = format!("app.{}.log", old.format("%Y-%m-%d"));
        let recent_name = format!("app.{}.log", recent.format("%Y-%m-%d"));
        fs::write(app_dir.join(&old_name), b"old").unwrap();
        fs::write(app_dir.join(&recent_name), b"new").unwrap();
        fs::write(app_dir.join("notes.txt"), b"keep").unwrap();

        let removed = cleanup_old_logs(dir.path()).unwrap();
        assert_eq!(removed, 1);
        assert!(!app_dir.join(old_name).exists());
        assert!(app_dir.join(recent_name).exists());
        assert!(app_dir.join("notes.txt").exists());
    }

    #[test]
    fn test_cleanup_without_app_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(cleanup_old_logs(dir.path()).unwrap(), 0);
    }
}
