use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use gematria_signal::InsertSizeModel;
use gematria_tracks::{TrackFormat, parse_formats};

pub const DEFAULT_READ_LENGTH: usize = 100;
pub const DEFAULT_READS_MODEL: &str = "S";
pub const DEFAULT_FORMAT: &str = "wig";

#[derive(Error, Debug)]
pub enum GmsConfigError {
    #[error("Invalid configuration file: {0}")]
    InvalidFile(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

///
/// Parameters of one track building run.
///
/// Can be read from a TOML file; missing keys fall back to the defaults:
///
/// ```toml
/// read_length = 100
/// reads = "N:300:30"
/// formats = ["wig", "bw"]
/// threads = 8
/// igvtools = "exe/igvtools.jar"
/// ```
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Sequencing read length.
    pub read_length: usize,
    /// Reads-model specifier: `S`, `N:<mu>:<sigma>` or `U:<min>:<max>`.
    pub reads: String,
    /// Requested output formats.
    pub formats: Vec<String>,
    /// Worker threads; `None` uses all available cores.
    pub threads: Option<usize>,
    /// igvtools jar, needed for `tdf` output.
    pub igvtools: Option<PathBuf>,
    /// Java runtime used to run igvtools.
    pub java: PathBuf,
    /// Keep the intermediate wig/bed files of converted formats next to the outputs.
    pub keep_intermediate: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            read_length: DEFAULT_READ_LENGTH,
            reads: DEFAULT_READS_MODEL.to_string(),
            formats: vec![DEFAULT_FORMAT.to_string()],
            threads: None,
            igvtools: None,
            java: PathBuf::from("java"),
            keep_intermediate: false,
        }
    }
}

impl RunConfig {
    pub fn reads_model(&self) -> gematria_signal::Result<InsertSizeModel> {
        self.reads.parse()
    }

    pub fn track_formats(&self) -> Vec<TrackFormat> {
        parse_formats(&self.formats)
    }

    pub fn num_threads(&self) -> usize {
        self.threads
            .filter(|&t| t > 0)
            .unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(|c| c.into())
                    .unwrap_or(1)
            })
    }
}

impl TryFrom<&Path> for RunConfig {
    type Error = GmsConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            return Err(GmsConfigError::InvalidFile(format!(
                "expected a .toml file, got {}",
                path.display()
            )));
        }
        let toml_str = read_to_string(path)?;
        let config = toml::from_str(&toml_str)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.read_length, 100);
        assert_eq!(config.reads_model().unwrap(), InsertSizeModel::Single);
        assert_eq!(config.track_formats(), vec![TrackFormat::Wig]);
        assert!(config.num_threads() >= 1);
    }

    #[rstest]
    fn test_try_from_toml() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("gms.toml");
        std::fs::write(
            &path,
            "read_length = 36\nreads = \"U:10:25\"\nformats = [\"bed\", \"bigwig\"]\nthreads = 2\n",
        )
        .unwrap();

        let config = RunConfig::try_from(path.as_path()).unwrap();

        assert_eq!(config.read_length, 36);
        assert_eq!(
            config.reads_model().unwrap(),
            InsertSizeModel::Uniform { min: 10, max: 25 }
        );
        assert_eq!(
            config.track_formats(),
            vec![TrackFormat::Bed, TrackFormat::BigWig]
        );
        assert_eq!(config.num_threads(), 2);
        assert_eq!(config.java, PathBuf::from("java"));
    }

    #[rstest]
    fn test_unknown_key_is_rejected() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("gms.toml");
        std::fs::write(&path, "read_lenght = 36\n").unwrap();

        let result = RunConfig::try_from(path.as_path());
        assert!(matches!(result, Err(GmsConfigError::Toml(_))));
    }

    #[rstest]
    fn test_wrong_extension() {
        let result = RunConfig::try_from(Path::new("gms.yaml"));
        assert!(matches!(result, Err(GmsConfigError::InvalidFile(_))));
    }
}
