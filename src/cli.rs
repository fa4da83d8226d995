// Command-line arguments for the `r2d2` binary.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::settings::{self, Settings};

/// Ask the Millenium Falcon computer for the odds of saving Endor from the Death Star.
#[derive(Parser, Debug)]
#[command(name = "r2d2", version, about)]
pub struct CliArgs {
    /// Millenium Falcon settings file (autonomy, departure, destination, routes)
    #[arg(value_name = "MILLENIUM_FALCON")]
    pub millenium_falcon: PathBuf,

    /// Empire settings file (countdown, bounty hunter locations)
    #[arg(value_name = "EMPIRE")]
    pub empire: PathBuf,

    /// Base URL of the Millenium Falcon backend (BACKEND_URL is also read in any letter case)
    #[arg(long, value_name = "URL", env = "BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Dotenv file consulted for BACKEND_URL when neither the flag nor the variable is set
    #[arg(long, value_name = "FILE", default_value = ".env")]
    pub env_file: PathBuf,

    /// Give up on the backend after this many seconds (waits forever by default)
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Directory receiving r2d2.log, created if absent
    #[arg(long, value_name = "DIR", default_value = "logs")]
    pub log_dir: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Do not write a log file
    #[arg(long, default_value_t = false)]
    pub no_log: bool,
}

impl CliArgs {
    pub fn settings(&self) -> crate::Result<Settings> {
        let backend_url = self
            .backend_url
            .clone()
            .or_else(settings::backend_url_from_env);
        let settings = Settings::load(backend_url, &self.env_file)?;
        Ok(settings.with_timeout(self.timeout.map(Duration::from_secs)))
    }
}
