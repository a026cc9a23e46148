//=========================================================================
// FlappyBird: Entry Point
//
// Initializes logging and crash reporting, then hands control to the
// application until the player quits.
//
// Log level defaults to `info`; override with `RUST_LOG`.
//
//=========================================================================

use std::error::Error;
use std::process::ExitCode;

use flappy_runtime::core::crash::CrashReporter;
use flappy_runtime::{ApplicationBuilder, ApplicationError};
use log::error;

const SETTINGS_PATH: &str = "settings.toml";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let _crash = CrashReporter::register();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            let mut source = err.source();
            while let Some(cause) = source {
                error!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), ApplicationError> {
    let mut app = ApplicationBuilder::new()
        .with_config_path(SETTINGS_PATH)
        .build()?;
    app.startup()?;
    app.run()
}
