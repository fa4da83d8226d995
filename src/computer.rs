// Client for the Millenium Falcon computer: a small blocking HTTP client
// that uploads both settings files to `{backend_url}/r2d2` and reads back
// the mission probability.

use std::fs;
use std::path::Path;

use reqwest::blocking::{multipart, Client};
use tracing::{debug, error, info};

use crate::error::{Error, Result};
use crate::mission::Mission;
use crate::settings::Settings;
use crate::status::Status;

/// Multipart field carrying the Empire settings file.
pub const EMPIRE_FIELD: &str = "empire";
/// Multipart field carrying the Millenium Falcon settings file.
pub const FALCON_FIELD: &str = "millenium_falcon";

const DROID_WORRIED: &str = "DrruurRRP tanaNDuh?";
const DROID_HAPPY: &str = "WOOOAH twee-vwoop VRrrUHD DEda dah!";

/// Holds a reqwest blocking client and the endpoint it talks to.
#[derive(Clone)]
pub struct Computer {
    client: Client,
    endpoint: String,
}

impl Computer {
    /// Build a client for the backend described by `settings`.
    pub fn new(settings: &Settings) -> Result<Self> {
        // No timeout unless `--timeout` is given.
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(Error::Client)?;
        Ok(Computer {
            client,
            endpoint: settings.endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Ask the computer for the odds of saving Endor.
    ///
    /// Both paths must exist; the Falcon file is checked first. The files
    /// are forwarded untouched. `status` sees `start` once, then exactly one
    /// of `succeed` or `fail`.
    pub fn ask(
        &self,
        millenium_falcon: &Path,
        empire: &Path,
        status: &mut dyn Status,
    ) -> Result<Mission> {
        status.start(&format!(
            "{DROID_WORRIED} Connection with Millenium Falcon initiated..."
        ));
        debug!("Starts to communicate with Millenium Falcon at {}", self.endpoint);

        match self.query(millenium_falcon, empire) {
            Ok(mission) => {
                let odds = mission.formatted();
                info!("Millenium Falcon gave a result: you have {odds} of chance to save Endor!");
                status.succeed(&format!(
                    "{DROID_HAPPY} You have {odds} of chance to save Endor!"
                ));
                Ok(mission)
            }
            Err(e) => {
                error!("{e}");
                status.fail(&format!("{DROID_WORRIED} {e}"));
                Err(e)
            }
        }
    }

    fn query(&self, millenium_falcon: &Path, empire: &Path) -> Result<Mission> {
        if !millenium_falcon.exists() {
            return Err(Error::MissingFalconSettings(millenium_falcon.to_path_buf()));
        }
        if !empire.exists() {
            return Err(Error::MissingEmpireSettings(empire.to_path_buf()));
        }

        // Both files are read before any connection is opened.
        let falcon_part = file_part(millenium_falcon)?;
        let empire_part = file_part(empire)?;
        let form = multipart::Form::new()
            .part(EMPIRE_FIELD, empire_part)
            .part(FALCON_FIELD, falcon_part);

        let res = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .map_err(|e| self.transport_error(e))?;

        let status = res.status();
        let body = res.text().map_err(|e| self.transport_error(e))?;
        if !status.is_success() {
            return Err(Error::Status { status, body });
        }
        Mission::from_json(&body)
    }

    fn transport_error(&self, source: reqwest::Error) -> Error {
        let url = self.endpoint.clone();
        if source.is_builder() {
            Error::InvalidUrl { url, source }
        } else if source.is_timeout() {
            Error::Timeout { url, source }
        } else {
            Error::Connection { url, source }
        }
    }
}

/// Read `path` into a binary multipart part named after the file.
fn file_part(path: &Path) -> Result<multipart::Part> {
    let contents = fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let part = multipart::Part::bytes(contents);
    Ok(match path.file_name().and_then(|name| name.to_str()) {
        Some(name) => part.file_name(name.to_string()),
        None => part,
    })
}
