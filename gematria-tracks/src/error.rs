use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for track writing and conversion.
#[derive(Error, Debug)]
pub enum TrackError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Unknown track format: {0}")]
    UnknownFormat(String),

    /// A chromosome produced no scores to encode.
    #[error("Score track for chromosome '{0}' is empty")]
    EmptyTrack(String),

    #[error("Invalid run on chromosome '{chrom}': start {start}, span {span}")]
    InvalidRun { chrom: String, start: u64, span: u64 },

    #[error("Chromosome '{0}' was not declared in the bigWig header")]
    UndeclaredChromosome(String),

    #[error("Chromosome '{0}' is too long for bigWig/bigBed coordinates")]
    ChromosomeTooLong(String),

    #[error("BigWig error: {0}")]
    BigWig(String),

    #[error("BigBed error: {0}")]
    BigBed(String),

    #[error("Malformed bed line {line} in {path:?}")]
    MalformedBed { path: PathBuf, line: usize },

    #[error("Converter '{program}' failed: {reason}")]
    ConverterFailed { program: String, reason: String },

    #[error("Converter produced no output file: {0:?}")]
    MissingOutput(PathBuf),

    #[error(transparent)]
    Core(#[from] gematria_core::CoreError),
}

/// Result type alias for track operations.
pub type Result<T> = std::result::Result<T, TrackError>;
