#[macro_use]
extern crate clap;

mod camera;
mod demos;
mod geometry;
mod interface;
mod logging;

use std::process;

use interface::cli;
use logging::{init_logging, LoggingConfig};

fn main() {
    let config = match cli::demo_config(std::env::args_os()) {
        Ok(config) => config,
        Err(e) => match e.downcast::<clap::Error>() {
            Ok(e) => e.exit(),
            Err(e) => {
                eprintln!("error: {:#}", e);
                process::exit(1);
            }
        },
    };

    init_logging(LoggingConfig { filter: config.log_filter.clone() });

    if let Err(e) = demos::run(&config) {
        log::error!("{:#}", e);
        eprintln!("error: {:?}", e);
        process::exit(1);
    }
}
