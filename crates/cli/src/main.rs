#![forbid(unsafe_code)]

mod config;
mod session;

use std::env;
use std::io;
use std::process;

use config::{Command, Config, FILE_ENV, USAGE};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = match Config::from_args(env::args().skip(1), env::var(FILE_ENV).ok()) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            println!("{USAGE}");
            return;
        }
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };

    log::debug!("{config:?}");
    if let Err(err) = session::run(&config, &mut io::stdout().lock()) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}
