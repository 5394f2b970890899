use std::fs;
use std::path::Path;

use log::info;
use ndarray::Array1;
use ndarray_npy::read_npy;

use crate::errors::{Result, SignalError};

///
/// On-disk layouts of the raw uniqueness signal.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawSignalFormat {
    /// 1-D float64 NumPy array.
    Npy,
    /// One bit per genome position, most significant bit first.
    PackedBits,
}

impl RawSignalFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("npy") => Ok(RawSignalFormat::Npy),
            Some("bin") => Ok(RawSignalFormat::PackedBits),
            _ => Err(SignalError::UnsupportedSignalFile(
                path.display().to_string(),
            )),
        }
    }
}

///
/// Load the genome-wide raw uniqueness signal produced by the external engine.
///
/// # Arguments
/// - path: `.npy` (float64 array) or `.bin` (packed bits) file
///
pub fn load_raw_signal<P: AsRef<Path>>(path: P) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let signal = match RawSignalFormat::from_path(path)? {
        RawSignalFormat::Npy => {
            let arr: Array1<f64> = read_npy(path)?;
            arr.into_raw_vec()
        }
        RawSignalFormat::PackedBits => unpack_bits(&fs::read(path)?),
    };

    if signal.is_empty() {
        return Err(SignalError::EmptySignal(path.display().to_string()));
    }

    info!(
        "Loaded raw signal with {} positions from {}",
        signal.len(),
        path.display()
    );

    Ok(signal)
}

/// Expand bytes to one value per bit, most significant bit first.
fn unpack_bits(bytes: &[u8]) -> Vec<f64> {
    bytes
        .iter()
        .flat_map(|byte| (0..8).rev().map(move |bit| ((byte >> bit) & 1) as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;
    use ndarray_npy::write_npy;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_unpack_bits_msb_first() {
        let bits = unpack_bits(&[0b1000_0001, 0b0110_0000]);
        assert_eq!(
            bits,
            vec![
                1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0
            ]
        );
    }

    #[rstest]
    fn test_load_npy_signal() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("raw.npy");
        write_npy(&path, &array![1.0, 0.5, 0.0]).unwrap();

        let signal = load_raw_signal(&path).unwrap();
        assert_eq!(signal, vec![1.0, 0.5, 0.0]);
    }

    #[rstest]
    fn test_load_packed_signal() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("track.bin");
        fs::write(&path, [0xF0u8]).unwrap();

        let signal = load_raw_signal(&path).unwrap();
        assert_eq!(signal, vec![1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[rstest]
    fn test_load_empty_packed_signal() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("track.bin");
        fs::write(&path, b"").unwrap();

        assert!(matches!(
            load_raw_signal(&path),
            Err(SignalError::EmptySignal(_))
        ));
    }

    #[rstest]
    #[case("signal.txt")]
    #[case("signal")]
    fn test_unsupported_signal_file(#[case] name: &str) {
        let result = load_raw_signal(Path::new(name));
        assert!(matches!(result, Err(SignalError::UnsupportedSignalFile(_))));
    }
}
