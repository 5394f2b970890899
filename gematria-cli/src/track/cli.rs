use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, value_parser};

pub const TRACK_CMD: &str = "track";

pub fn create_track_cli() -> Command {
    Command::new(TRACK_CMD)
        .about("Build mappability score tracks from a raw uniqueness signal.")
        .arg(
            Arg::new("input")
                .long("input")
                .short('i')
                .value_parser(value_parser!(PathBuf))
                .help("Reference genome in FASTA format, optionally gzipped")
                .required(true),
        )
        .arg(
            Arg::new("signal")
                .long("signal")
                .short('s')
                .value_parser(value_parser!(PathBuf))
                .help("Raw uniqueness signal of the genome (.npy or packed .bin)")
                .required(true),
        )
        .arg(
            Arg::new("length")
                .long("length")
                .short('l')
                .value_parser(value_parser!(usize))
                .help("Read length [default: 100]"),
        )
        .arg(
            Arg::new("reads")
                .long("reads")
                .short('r')
                .help("Reads model: S (single end), N:<mu>:<sigma> or U:<min>:<max> (paired end) [default: S]"),
        )
        .arg(
            Arg::new("formats")
                .long("formats")
                .short('f')
                .help("Comma separated output formats: wig, bed, bw, bigbed, tdf or all [default: wig]"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_parser(value_parser!(PathBuf))
                .help("Output prefix, every format writes <prefix>.<ext> [default: the input path]"),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .short('t')
                .value_parser(value_parser!(usize))
                .help("Number of worker threads [default: all cores]"),
        )
        .arg(
            Arg::new("igvtools")
                .long("igvtools")
                .value_parser(value_parser!(PathBuf))
                .help("Path to igvtools.jar, needed for tdf output"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_parser(value_parser!(PathBuf))
                .help("TOML file with run parameters; command line flags take precedence"),
        )
        .arg(
            Arg::new("keep-intermediate")
                .long("keep-intermediate")
                .action(ArgAction::SetTrue)
                .help("Keep the wig/bed files converted formats are built from"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .help("Log per-chromosome progress"),
        )
}
