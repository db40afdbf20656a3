use std::path::PathBuf;
use clap::Parser;
use log::info;
use msgbox::IconType;
use notepins_pairing::{init_logging, run};
use notepins_pairing::error::{error_msgbox, AppRunError, ConfigError};

#[derive(Parser, Debug)]
#[command(author, version)]
#[command(about = "Pair and monitor Memoket NotePins devices (simulated).", long_about = None)]
struct Args {
    /// Read pairing timings from this JSON file instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), AppRunError> {
    init_logging();
    info!(concat!("NotePins Pairing ", env!("CARGO_PKG_VERSION")));

    let args = Args::parse();

    match run(args.config) {
        Err(AppRunError::ConfigError { source: ConfigError::CanNotLock { .. } }) => {
            msgbox::create(
                concat!("NotePins Pairing ", env!("CARGO_PKG_VERSION")),
                "This application has already been started",
                IconType::Error,
            ).expect("Could not create msgbox");
            Ok(())
        },
        Err(err) => {
            error_msgbox("Unexpected error", &err);
            Err(err)
        }
        Ok(_) => Ok(())
    }
}
