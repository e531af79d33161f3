#[macro_use] extern crate clap;

pub mod graphics;
pub mod interface;
pub mod lessons;
pub mod logging;

use std::error::Error;
use std::process;

use log::{error, info};

use interface::cli::{self, CliError};
use logging::{init_logging, LoggingConfig};

fn main() {
    let config = match cli::parse_from(std::env::args_os()) {
        Ok(config) => config,
        Err(CliError::Clap(e)) => e.exit(),
        Err(CliError::Config(e)) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    init_logging(LoggingConfig { env_filter: config.log_filter.clone() });

    match lessons::run(&config) {
        Ok(frames) => info!("window closed after {} frames", frames),
        Err(e) => {
            if e.is_shader_failure() {
                error!("shader program setup failed, not entering the frame loop");
            }

            error!("{}", e);
            if let Some(cause) = e.source() {
                error!("caused by: {}", cause);
            }

            process::exit(1);
        }
    }
}
