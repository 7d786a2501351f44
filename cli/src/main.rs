//! Pet Battler terminal client

use std::io;

use anyhow::Result;
use battler_cli::config::Args;
use battler_cli::http::HttpApi;
use battler_cli::shell;
use battler_core::session::Session;
use clap::Parser;

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    let config = args.config();
    let api = HttpApi::new(&config);
    log::info!(target: "battler", "using game service at {}", api.base());

    let mut session = Session::new(api, config);
    let stdin = io::stdin();
    shell::run(&mut session, stdin.lock(), io::stdout())
}
