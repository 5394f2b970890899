use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Can't read file: {0}")]
    FileReadError(String),

    #[error("No sequences found in FASTA file: {0}")]
    EmptyFasta(String),

    #[error("Sequence data found before the first FASTA header in: {0}")]
    MissingHeader(String),

    #[error("Duplicate chromosome name: {0}")]
    DuplicateChromosome(String),

    #[error("Error parsing chromosome sizes, line {line}: {reason}")]
    ChromSizesParseError { line: usize, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
