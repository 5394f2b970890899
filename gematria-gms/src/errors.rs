use thiserror::Error;

use crate::config::GmsConfigError;

#[derive(Error, Debug)]
pub enum GmsError {
    #[error(transparent)]
    Config(#[from] GmsConfigError),

    #[error(transparent)]
    Core(#[from] gematria_core::CoreError),

    #[error(transparent)]
    Signal(#[from] gematria_signal::SignalError),

    #[error(transparent)]
    Track(#[from] gematria_tracks::TrackError),

    #[error("No valid output format in '{0}'")]
    NoFormats(String),

    #[error("Unable to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GmsError>;
