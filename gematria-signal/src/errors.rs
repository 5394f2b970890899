use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignalError {
    /// Bad run parameters; raised before any signal is processed.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error(
        "Raw signal is too short: chromosome '{chrom}' needs positions {start}..{end} but the signal has {available} values"
    )]
    SignalTooShort {
        chrom: String,
        start: usize,
        end: usize,
        available: usize,
    },

    #[error("Unsupported raw signal file (expected .npy or .bin): {0}")]
    UnsupportedSignalFile(String),

    #[error("Raw signal file is empty: {0}")]
    EmptySignal(String),

    #[error("Failed to read npy signal: {0}")]
    Npy(#[from] ndarray_npy::ReadNpyError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SignalError>;
