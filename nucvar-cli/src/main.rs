mod config;
mod extract;

use anyhow::Result;
use clap::{Arg, ArgAction, Command};

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "nucvar";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Turn aligned sequences into substitution, insertion and deletion calls against a reference.")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("More logging: -v for info, -vv for debug (RUST_LOG overrides)"),
        )
        .subcommand(extract::cli::create_extract_cli())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logging(matches.get_count("verbose"));

    match matches.subcommand() {
        //
        // EXTRACT
        //
        Some((extract::cli::EXTRACT_CMD, matches)) => {
            extract::handlers::run_extract(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
