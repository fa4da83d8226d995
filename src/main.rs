// Entrypoint for the r2d2 CLI.
// - Keeps `main` small: parse args, set up logging, build settings and a
//   client, then ask the computer once.
// - Every failure exits with code 1. Query failures are shown on the status
//   line; setup failures are printed here.

use std::process::ExitCode;

use clap::Parser;
use r2d2_cli::{cli::CliArgs, logging, status::Spinner, Computer};

fn main() -> ExitCode {
    let args = CliArgs::parse();
    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("r2d2: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(args: &CliArgs) -> anyhow::Result<ExitCode> {
    if !args.no_log {
        logging::init_logging(&args.log_dir, args.verbose)?;
    }

    let settings = args.settings()?;
    tracing::debug!("Using backend {}", settings.backend_url);
    let computer = Computer::new(&settings)?;

    let mut spinner = Spinner::new()?;
    match computer.ask(&args.millenium_falcon, &args.empire, &mut spinner) {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(_) => Ok(ExitCode::from(1)),
    }
}
