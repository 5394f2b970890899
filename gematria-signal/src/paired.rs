use std::borrow::Cow;

use rayon::prelude::*;

use crate::convolve::convolve;
use crate::kernel::{InsertSizeKernel, InsertSizeModel};

///
/// Blends paired-read evidence into a per-chromosome uniqueness signal.
///
/// A read that maps ambiguously can still be placed through its mate. The signal is
/// convolved with the insert-size kernel and the result is read shifted forward and
/// backward by the kernel offset; their mean pulls each position up in proportion to the
/// headroom it has left:
///
/// `final[i] = s[i] + (1 - s[i]) * (left[i] + right[i]) / 2`
///
/// Single-end reads carry no such evidence and the signal passes through untouched.
///
#[derive(Debug, Clone)]
pub struct PairedSignalSynthesizer {
    kernel: Option<InsertSizeKernel>,
}

impl PairedSignalSynthesizer {
    pub fn new(model: &InsertSizeModel) -> Self {
        let kernel = model.is_paired().then(|| model.kernel());
        PairedSignalSynthesizer { kernel }
    }

    pub fn kernel(&self) -> Option<&InsertSizeKernel> {
        self.kernel.as_ref()
    }

    pub fn synthesize<'a>(&self, signal: &'a [f64]) -> Cow<'a, [f64]> {
        match &self.kernel {
            None => Cow::Borrowed(signal),
            Some(kernel) => Cow::Owned(blend(signal, kernel)),
        }
    }
}

fn blend(signal: &[f64], kernel: &InsertSizeKernel) -> Vec<f64> {
    let reads = signal.len();
    let offset = kernel.offset;
    let unique = convolve(signal, &kernel.weights);
    let n = unique.len();

    // left: `offset` zeros prepended, first `reads` values kept
    // right: `offset` zeros appended, last `reads` values kept
    let right_start = (n + offset).saturating_sub(reads);

    signal
        .par_iter()
        .enumerate()
        .map(|(i, &s)| {
            let left = if i >= offset { unique[i - offset] } else { 0.0 };
            let j = right_start + i;
            let right = if j < n { unique[j] } else { 0.0 };
            s + (1.0 - s) * (left + right) / 2.0
        })
        .collect()
}
