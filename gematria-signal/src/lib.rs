//! # Signal processing for genome mappability scores
//!
//! Turns the genome-wide raw uniqueness signal (one value per read start position) into
//! per-chromosome [`ScoreTrack`]s:
//!
//! 1. [`ChromosomeSplitter`] slices the raw signal per chromosome, in genome order.
//! 2. [`PairedSignalSynthesizer`] spreads mapping evidence with the [`InsertSizeKernel`]
//!    of the reads model (a no-op for single-end reads).
//! 3. [`SmoothingFilter`] averages over one read length, scales to 0-100 and rounds.
//!
//! [`TrackBuilder`] chains steps 2 and 3 for a single chromosome.
//!
pub mod convolve;
pub mod errors;
pub mod kernel;
pub mod paired;
pub mod raw;
pub mod smoothing;
pub mod split;

// re-exports
pub use errors::*;
pub use kernel::{InsertSizeKernel, InsertSizeModel};
pub use paired::PairedSignalSynthesizer;
pub use raw::load_raw_signal;
pub use smoothing::{SENTINEL, ScoreTrack, SmoothingFilter};
pub use split::{ChromosomeSplitter, check_read_length, split_signal};

///
/// Builds the [`ScoreTrack`] of one chromosome from its slice of the raw signal.
///
#[derive(Debug, Clone)]
pub struct TrackBuilder {
    synthesizer: PairedSignalSynthesizer,
    filter: SmoothingFilter,
}

impl TrackBuilder {
    pub fn new(model: &InsertSizeModel, read_length: usize) -> Result<Self> {
        model.validate()?;
        Ok(TrackBuilder {
            synthesizer: PairedSignalSynthesizer::new(model),
            filter: SmoothingFilter::new(read_length)?,
        })
    }

    pub fn build(&self, signal: &[f64]) -> ScoreTrack {
        let evidence = self.synthesizer.synthesize(signal);
        self.filter.apply(&evidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_track_builder_single_end() {
        let builder = TrackBuilder::new(&InsertSizeModel::Single, 2).unwrap();
        let track = builder.build(&[1.0, 0.0, 1.0]);

        assert_eq!(track.values(), &[50, 50, 50, 50, SENTINEL]);
    }

    #[rstest]
    fn test_track_builder_rejects_oversized_kernel() {
        let model = InsertSizeModel::Uniform { min: 0, max: i64::MAX };
        let result = TrackBuilder::new(&model, 10);
        assert!(matches!(result, Err(SignalError::Configuration(_))));
    }

    #[rstest]
    fn test_track_builder_paired_raises_scores() {
        let signal = [1.0, 0.0, 0.0, 1.0];
        let single = TrackBuilder::new(&InsertSizeModel::Single, 2)
            .unwrap()
            .build(&signal);
        let paired = TrackBuilder::new(&InsertSizeModel::Uniform { min: 1, max: 3 }, 2)
            .unwrap()
            .build(&signal);

        assert_eq!(single.len(), paired.len());
        assert!(
            paired
                .scores()
                .iter()
                .zip(single.scores())
                .all(|(p, s)| p >= s)
        );
    }
}
