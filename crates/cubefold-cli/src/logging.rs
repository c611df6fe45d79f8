use crate::error::Result;
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};

/// Maps `-v` repetitions and `-q` to the console log level.
pub fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(level_filter(verbosity, quiet))
        .with(stderr_layer);

    if let Some(path) = log_file {
        let file = File::create(&path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_thread_ids(true)
            .with_target(true);

        subscriber.with(file_layer).init();
    } else {
        subscriber.init();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use serial_test::serial;
    use std::sync::Once;
    use tracing::{debug, error, info, trace, warn};

    static INIT: Once = Once::new();

    fn ensure_global_logger_is_set() {
        INIT.call_once(|| {
            setup_logging(3, false, None).expect("Failed to set up global logger for tests");
        });
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_filter(0, false), LevelFilter::WARN);
        assert_eq!(level_filter(1, false), LevelFilter::INFO);
        assert_eq!(level_filter(2, false), LevelFilter::DEBUG);
        assert_eq!(level_filter(7, false), LevelFilter::TRACE);
        assert_eq!(level_filter(3, true), LevelFilter::ERROR);
    }

    #[test]
    #[serial]
    fn initialization_and_macros_work() {
        ensure_global_logger_is_set();

        error!("This is an error");
        warn!("This is a warning");
        info!(step = 42, "This is info");
        debug!("This is debug");
        trace!("This is trace");
    }

    #[test]
    #[serial]
    fn file_layer_writes_plain_text() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("search.log");

        let file = File::create(&log_path).unwrap();
        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_thread_ids(true);
        let subscriber = tracing_subscriber::registry().with(file_layer);

        tracing::subscriber::with_default(subscriber, || {
            debug!(evaluated = 2000, "Chunk scanned.");
        });

        let content = std::fs::read_to_string(log_path).unwrap();
        assert!(content.contains("Chunk scanned."));
        assert!(content.contains("evaluated=2000"));
        assert!(content.contains("DEBUG"));
        assert!(content.contains("ThreadId"));
    }

    #[test]
    #[serial]
    fn invalid_log_file_path_propagates_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a log file.
        let result = setup_logging(0, false, Some(temp_dir.path().to_path_buf()));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
