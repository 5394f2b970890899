mod track;

use anyhow::Result;
use clap::Command;
use env_logger::Env;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "gematria";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Genome mappability score (GMS) tracks for genome browsers.")
        .subcommand_required(true)
        .subcommand(track::cli::create_track_cli())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // TRACK
        //
        Some((track::cli::TRACK_CMD, matches)) => {
            let level = if matches.get_flag("verbose") {
                "debug"
            } else {
                "info"
            };
            env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

            track::handlers::run_track(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
