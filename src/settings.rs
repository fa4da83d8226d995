// Runtime settings of the client.
//
// Built once in `main` and handed to `Computer::new` by reference. The
// backend URL comes from (highest first) an explicit override (the
// `--backend-url` flag or a `BACKEND_URL` env var in any letter case),
// a `BACKEND_URL=` entry in a dotenv file, then the hardcoded default.

use std::ffi::OsString;
use std::path::Path;
use std::time::Duration;

use tracing::warn;

use crate::error::{Error, Result};

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Key looked up in the environment and in the dotenv file.
pub const BACKEND_URL_KEY: &str = "BACKEND_URL";

/// Immutable client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base URL of the Millenium Falcon backend, without the `/r2d2` route.
    pub backend_url: String,
    /// Request timeout. `None` waits as long as the backend needs.
    pub timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            timeout: None,
        }
    }
}

impl Settings {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Settings {
            backend_url: backend_url.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve settings from an explicit override, then `env_file`, then
    /// the default. A missing dotenv file is fine; an unreadable one is not.
    pub fn load(backend_url: Option<String>, env_file: &Path) -> Result<Self> {
        if let Some(url) = backend_url {
            return Ok(Settings::new(url));
        }

        let entries = match dotenvy::from_path_iter(env_file) {
            Ok(entries) => entries,
            Err(e) if e.not_found() => return Ok(Settings::default()),
            Err(source) => {
                return Err(Error::Settings {
                    path: env_file.to_path_buf(),
                    source,
                })
            }
        };

        let mut found = None;
        for entry in entries {
            match entry {
                Ok((key, value)) if key.eq_ignore_ascii_case(BACKEND_URL_KEY) => {
                    found = Some(value)
                }
                Ok(_) => {}
                Err(dotenvy::Error::LineParse(line, at)) => {
                    warn!("Skipping malformed line in {}: {line:?} (at {at})", env_file.display());
                }
                Err(source) => {
                    return Err(Error::Settings {
                        path: env_file.to_path_buf(),
                        source,
                    })
                }
            }
        }

        Ok(found.map(Settings::new).unwrap_or_default())
    }

    /// Full URL of the probability endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/r2d2", self.backend_url.trim_end_matches('/'))
    }
}

/// `BACKEND_URL` from the process environment, matched in any letter case.
pub fn backend_url_from_env() -> Option<String> {
    find_backend_url(std::env::vars_os())
}

fn find_backend_url(vars: impl IntoIterator<Item = (OsString, OsString)>) -> Option<String> {
    vars.into_iter()
        .find(|(key, _)| {
            key.to_str()
                .is_some_and(|k| k.eq_ignore_ascii_case(BACKEND_URL_KEY))
        })
        .and_then(|(_, value)| value.into_string().ok())
}
