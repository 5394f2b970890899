//! # Genome browser track writers
//!
//! Every writer receives a chromosome's [`ScoreTrack`](gematria_signal::ScoreTrack),
//! compresses it into runs of equal scores and emits one record per run:
//!
//! - [`WigWriter`]: fixedStep wiggle text
//! - [`BedWriter`]: bed9 intervals, colored by score
//! - [`BigWigWriter`]: binary indexed bigWig
//!
//! The [`convert`] module turns finished bed and wiggle files into bigBed and TDF.
//!
pub mod bed;
pub mod bigwig;
pub mod convert;
pub mod error;
pub mod format;
pub mod runs;
pub mod wig;
pub mod writer;

// re-exports
pub use bed::BedWriter;
pub use bigwig::BigWigWriter;
pub use error::*;
pub use format::{TrackFormat, parse_formats};
pub use runs::{Run, runs};
pub use wig::WigWriter;
pub use writer::TrackWriter;
