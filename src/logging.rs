// Tracing setup. Events go to `<log_dir>/r2d2.log` only: the terminal
// belongs to the spinner.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_FILE_NAME: &str = "r2d2.log";

/// Map a `-v` count to a level filter.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Create `log_dir` if needed and install a subscriber appending plain
/// text to the log file. `RUST_LOG` overrides the verbosity.
///
/// Returns the path of the log file.
pub fn init_logging(log_dir: &Path, verbosity: u8) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(log_dir)?;
    let path = log_dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("r2d2={0},r2d2_cli={0}", level_for(verbosity))));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()?;

    Ok(path)
}
