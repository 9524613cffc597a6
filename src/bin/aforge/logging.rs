use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Filter directives, e.g. `info` or `admet_forge=debug`.
pub const LOG_VAR: &str = "ADMET_FORGE_LOG";
/// When set, logs are also written to daily files in this directory.
pub const LOG_DIR_VAR: &str = "ADMET_FORGE_LOG_DIR";

const LOG_FILE_PREFIX: &str = "aforge.log";

fn parse_filter(directives: Option<&str>, quiet: bool) -> Result<EnvFilter, ParseError> {
    let default = if quiet { "warn" } else { "info" };
    match directives {
        Some(directives) if !quiet && !directives.trim().is_empty() => {
            EnvFilter::try_new(directives)
        }
        _ => Ok(EnvFilter::new(default)),
    }
}

fn stderr_filter(directives: Option<&str>, quiet: bool) -> EnvFilter {
    parse_filter(directives, quiet).unwrap_or_else(|e| {
        let directives = directives.unwrap_or_default();
        eprintln!("warning: ignoring {LOG_VAR}='{directives}' ({e}); logging at info");
        EnvFilter::new("info")
    })
}

fn file_appender(log_dir: &Path) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(log_dir)
}

/// Installs the global subscriber from the environment. Keep the returned
/// guard alive until exit so buffered file logs are flushed.
pub fn init(quiet: bool) -> Option<WorkerGuard> {
    let directives = std::env::var(LOG_VAR).ok();
    let log_dir = std::env::var_os(LOG_DIR_VAR)
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from);
    init_with(directives.as_deref(), log_dir.as_deref(), quiet)
}

fn init_with(directives: Option<&str>, log_dir: Option<&Path>, quiet: bool) -> Option<WorkerGuard> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(stderr_filter(directives, quiet));

    let Some(log_dir) = log_dir else {
        let _ = tracing_subscriber::registry().with(stderr_layer).try_init();
        return None;
    };

    let appender = match file_appender(log_dir) {
        Ok(appender) => appender,
        Err(e) => {
            let _ = tracing_subscriber::registry().with(stderr_layer).try_init();
            tracing::warn!(
                dir = %log_dir.display(),
                error = %e,
                "file logging disabled: cannot open log directory"
            );
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_filter(EnvFilter::new("debug"));

    let _ = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init();
    Some(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn unusable_log_dir_falls_back_to_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, "").unwrap();

        let guard = init_with(None, Some(&file.join("logs")), false);
        assert!(guard.is_none());
    }

    #[test]
    fn log_dir_is_created_on_demand() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("nested").join("logs");
        assert!(file_appender(&logs).is_ok());
        assert!(logs.is_dir());
    }

    #[test]
    fn malformed_directives_fall_back_to_info() {
        assert!(parse_filter(Some("admet_forge=loud"), false).is_err());

        let filter = stderr_filter(Some("admet_forge=loud"), false);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn quiet_overrides_directives() {
        let filter = stderr_filter(Some("debug"), true);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));

        let filter = stderr_filter(Some("debug"), false);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }
}
