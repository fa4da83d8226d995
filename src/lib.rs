// Library root
// -----------
// The `r2d2` binary (`main.rs`) is a thin wrapper over these modules.
//
// Module responsibilities:
// - `computer`: HTTP interaction with the Millenium Falcon backend
//   (multipart upload of both settings files, mission parsing).
// - `settings`: immutable client configuration and where it comes from.
// - `mission`: the backend's answer and how a probability is displayed.
// - `status`: observer notified of query phases; terminal spinner.
// - `cli`, `logging`, `error`: argument parsing, tracing setup, errors.
//
// `Computer::ask` never touches the terminal directly, so it can be driven
// with `status::Silent` from tests or other programs.
pub mod cli;
pub mod computer;
pub mod error;
pub mod logging;
pub mod mission;
pub mod settings;
pub mod status;

pub use computer::Computer;
pub use error::{Error, Result};
pub use mission::Mission;
pub use settings::Settings;
