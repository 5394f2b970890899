use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::{info, warn};

use gematria_gms::{RunConfig, gms_main};

///
/// Merge the run configuration: command line flags over the config file over defaults.
///
fn run_config(matches: &ArgMatches) -> Result<RunConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => RunConfig::try_from(path.as_path())
            .with_context(|| format!("Failed to read config file {}", path.display()))?,
        None => RunConfig::default(),
    };

    if let Some(length) = matches.get_one::<usize>("length") {
        config.read_length = *length;
    }
    if let Some(reads) = matches.get_one::<String>("reads") {
        config.reads = reads.clone();
    }
    if let Some(formats) = matches.get_one::<String>("formats") {
        config.formats = formats.split(',').map(String::from).collect();
    }
    if let Some(threads) = matches.get_one::<usize>("threads") {
        config.threads = Some(*threads);
    }
    if let Some(igvtools) = matches.get_one::<PathBuf>("igvtools") {
        config.igvtools = Some(igvtools.clone());
    }
    if matches.get_flag("keep-intermediate") {
        config.keep_intermediate = true;
    }

    Ok(config)
}

pub fn run_track(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<PathBuf>("input")
        .expect("A path to the reference genome is required.");
    let signal = matches
        .get_one::<PathBuf>("signal")
        .expect("A path to the raw uniqueness signal is required.");
    let output = matches.get_one::<PathBuf>("output").unwrap_or(input);

    let config = run_config(matches)?;

    let report = gms_main(input, signal, output, &config)
        .with_context(|| format!("Failed to build tracks for {}", input.display()))?;

    for (format, path) in &report.produced {
        info!("Wrote {} track: {}", format, path.display());
    }
    for format in &report.dropped {
        warn!("{} track was not produced", format);
    }

    Ok(())
}
