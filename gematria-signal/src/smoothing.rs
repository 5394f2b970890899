use crate::convolve::convolve;
use crate::errors::{Result, SignalError};

/// Terminates every [`ScoreTrack`].
pub const SENTINEL: i32 = -1;

///
/// Per-base mappability scores of one chromosome, nominally in `0..=100`, terminated by
/// [`SENTINEL`].
///
/// Values are never clamped: the convolution ramps at the chromosome edges are kept as
/// computed.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreTrack {
    values: Vec<i32>,
}

impl ScoreTrack {
    /// Wrap already rounded scores, appending the sentinel.
    pub fn from_scores(mut scores: Vec<i32>) -> Self {
        scores.push(SENTINEL);
        ScoreTrack { values: scores }
    }

    /// All values, sentinel included.
    pub fn values(&self) -> &[i32] {
        &self.values
    }

    /// Scores only, without the trailing sentinel.
    pub fn scores(&self) -> &[i32] {
        &self.values[..self.values.len() - 1]
    }

    /// Number of scores, sentinel excluded.
    pub fn len(&self) -> usize {
        self.values.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

///
/// Flat moving average over one read length, scaled to 0-100.
///
/// The signal is convolved (full mode) with `read_length` weights of `100 / read_length`,
/// so a chromosome with `R` read starts yields `R + read_length - 1` scores, one per base.
/// Every value is rounded half to even.
///
#[derive(Debug, Clone)]
pub struct SmoothingFilter {
    mask: Vec<f64>,
}

impl SmoothingFilter {
    pub fn new(read_length: usize) -> Result<Self> {
        if read_length == 0 {
            return Err(SignalError::Configuration(
                "read length must be a positive integer".to_string(),
            ));
        }

        Ok(SmoothingFilter {
            mask: vec![100.0 / read_length as f64; read_length],
        })
    }

    pub fn read_length(&self) -> usize {
        self.mask.len()
    }

    pub fn apply(&self, signal: &[f64]) -> ScoreTrack {
        let scores = convolve(signal, &self.mask)
            .into_iter()
            .map(|v| v.round_ties_even() as i32)
            .collect();

        ScoreTrack::from_scores(scores)
    }
}
