use clap::Parser;
use log::error;

mod audio;
mod config;
mod keymap;
mod run;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = config::Config::parse();
    if let Err(e) = run::run(&config) {
        error!("{}", e);
        std::process::exit(1);
    }
}
