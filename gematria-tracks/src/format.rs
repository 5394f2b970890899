use std::fmt::{self, Display};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::warn;

use crate::error::TrackError;

///
/// Output formats a mappability track can be written in.
///
/// `Wig`, `Bed` and `BigWig` are written directly from the score tracks; `BigBed` and
/// `Tdf` are converted afterwards from a finished `Bed` or `Wig` file.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackFormat {
    Wig,
    Bed,
    BigWig,
    BigBed,
    Tdf,
}

impl TrackFormat {
    pub const ALL: [TrackFormat; 5] = [
        TrackFormat::Wig,
        TrackFormat::Bed,
        TrackFormat::Tdf,
        TrackFormat::BigWig,
        TrackFormat::BigBed,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            TrackFormat::Wig => "wig",
            TrackFormat::Bed => "bed",
            TrackFormat::BigWig => "bw",
            TrackFormat::BigBed => "bigbed",
            TrackFormat::Tdf => "tdf",
        }
    }

    /// The directly written format a converted format is built from.
    pub fn source(&self) -> Option<TrackFormat> {
        match self {
            TrackFormat::BigBed => Some(TrackFormat::Bed),
            TrackFormat::Tdf => Some(TrackFormat::Wig),
            _ => None,
        }
    }

    pub fn is_converted(&self) -> bool {
        self.source().is_some()
    }

    /// `<prefix>.<extension>`
    pub fn output_path(&self, prefix: &Path) -> PathBuf {
        let mut path = prefix.as_os_str().to_owned();
        path.push(".");
        path.push(self.extension());
        PathBuf::from(path)
    }
}

impl FromStr for TrackFormat {
    type Err = TrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wig" => Ok(TrackFormat::Wig),
            "bed" => Ok(TrackFormat::Bed),
            "bw" | "bigwig" => Ok(TrackFormat::BigWig),
            "bigbed" => Ok(TrackFormat::BigBed),
            "tdf" => Ok(TrackFormat::Tdf),
            _ => Err(TrackError::UnknownFormat(s.to_string())),
        }
    }
}

impl Display for TrackFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

///
/// Parse a comma separated list of output formats, e.g. `wig,bed,bw`.
///
/// Names are case-insensitive, `bigwig` is an alias of `bw` and `all` expands to every
/// format. Unknown names are skipped with a warning and duplicates are dropped, keeping
/// first-seen order.
///
pub fn parse_formats<S: AsRef<str>>(names: &[S]) -> Vec<TrackFormat> {
    let mut formats: Vec<TrackFormat> = Vec::new();

    for name in names
        .iter()
        .flat_map(|n| n.as_ref().split(','))
        .map(str::trim)
        .filter(|n| !n.is_empty())
    {
        let parsed: Vec<TrackFormat> = if name.eq_ignore_ascii_case("all") {
            TrackFormat::ALL.to_vec()
        } else {
            match name.parse::<TrackFormat>() {
                Ok(format) => vec![format],
                Err(e) => {
                    warn!("{}; skipping", e);
                    continue;
                }
            }
        };

        for format in parsed {
            if !formats.contains(&format) {
                formats.push(format);
            }
        }
    }

    formats
}
