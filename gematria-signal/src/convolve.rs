use rayon::prelude::*;

///
/// Full linear convolution of `signal` with `kernel`.
///
/// The output has `signal.len() + kernel.len() - 1` values, element `i` being
/// `sum(signal[i - k] * kernel[k])` over every `k` where both indices are valid. No
/// boundary trimming is applied, so both edges carry the partial-overlap ramps.
/// Each element is summed in ascending kernel order, independently of the thread count.
///
/// Returns an empty vector if either input is empty.
///
pub fn convolve(signal: &[f64], kernel: &[f64]) -> Vec<f64> {
    if signal.is_empty() || kernel.is_empty() {
        return Vec::new();
    }

    let n = signal.len() + kernel.len() - 1;
    let last_signal = signal.len() - 1;
    let last_kernel = kernel.len() - 1;

    (0..n)
        .into_par_iter()
        .map(|i| {
            let lo = i.saturating_sub(last_signal);
            let hi = i.min(last_kernel);
            (lo..=hi).map(|k| signal[i - k] * kernel[k]).sum::<f64>()
        })
        .collect()
}
