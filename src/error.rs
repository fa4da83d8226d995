// Error taxonomy for a query to the Millenium Falcon computer.
// The binary maps every variant to exit code 1; the display strings are
// what the user sees behind the droid prefix on the status line.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Millenium Falcon settings file doesn't exist: {}", .0.display())]
    MissingFalconSettings(PathBuf),

    #[error("Empire settings file doesn't exist: {}", .0.display())]
    MissingEmpireSettings(PathBuf),

    #[error("Cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Millenium Falcon address is not a valid URL: {url}")]
    InvalidUrl {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Millenium Falcon at {url} did not answer in time.")]
    Timeout {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Cannot communicate with Millenium Falcon at {url}.")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Millenium Falcon answered with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Millenium Falcon sent an unreadable mission: {0}")]
    InvalidMission(#[from] serde_json::Error),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Cannot load settings from {}: {source}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}
