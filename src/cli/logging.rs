use anyhow::{bail, Result};
use log::{log, LevelFilter};
use std::fs;
use std::path::PathBuf;

static LOG_LEVELS: [log::LevelFilter; 6] = [
    LevelFilter::Off,
    LevelFilter::Error,
    LevelFilter::Warn,
    LevelFilter::Info,
    LevelFilter::Debug,
    LevelFilter::Trace,
];

/// Directory the log file is written to.
pub fn get_log_dir() -> PathBuf {
    std::env::temp_dir().join("dplc")
}

/// Maps a verbosity count to a [`LevelFilter`].
pub fn level_filter(verbosity: usize) -> Result<LevelFilter> {
    match LOG_LEVELS.get(verbosity) {
        Some(level) => Ok(*level),
        None => bail!(
            "Verbosity must be between 0 and {}, not {}!",
            LOG_LEVELS.len() - 1,
            verbosity
        ),
    }
}

/// Setup logger.
pub fn setup_logger(verbosity: usize, filename: &str) -> Result<()> {
    let level = match level_filter(verbosity)? {
        LevelFilter::Off => return Ok(()),
        level => level,
    };

    let path: PathBuf = get_log_dir();

    fs::create_dir_all(&path)?;

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{:.1}][{}][{}:{}] {}",
                record.level(),
                chrono::Local::now().format("%H:%M:%S.%6f"),
                record.target().rsplit("::").next().unwrap_or_default(),
                record.line().unwrap_or(0),
                message
            ));
        })
        .level(level)
        .chain(
            std::fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(path.join(format!("{}.log", filename)))?,
        )
        .apply()?;

    if let Some(level) = log::max_level().to_level() {
        log!(level, "Log started");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_filter_test() -> Result<()> {
        assert_eq!(level_filter(0)?, LevelFilter::Off);
        assert_eq!(level_filter(1)?, LevelFilter::Error);
        assert_eq!(level_filter(5)?, LevelFilter::Trace);
        assert!(level_filter(6).is_err());

        Ok(())
    }
}
