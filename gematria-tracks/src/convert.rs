//! Converters from finished text tracks to indexed formats.
//!
//! Both converters read their source track together with the chromosome-sizes side file
//! written in genome order. A failing conversion only costs its own output format; callers
//! are expected to log the error and carry on.
//!
use std::collections::HashMap;
use std::fs::{File, create_dir_all, remove_file};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use bigtools::beddata::BedParserStreamingIterator;
use bigtools::{BedEntry, BigBedWrite};
use gematria_core::utils::read_chrom_sizes;
use log::{debug, info, warn};
use tokio::runtime;

use crate::error::{Result, TrackError};

///
/// Build a bigBed file from a bed file written by [`BedWriter`](crate::BedWriter).
///
/// # Arguments
/// - bed: the source bed file, runs in genome order
/// - chrom_sizes: path to the chromosome-sizes side file
/// - output: the bigBed file to create
/// - threads: worker threads for compression
///
pub fn bed_to_bigbed(bed: &Path, chrom_sizes: &Path, output: &Path, threads: usize) -> Result<PathBuf> {
    info!("Converting {} to bigBed", bed.display());

    let mut sizes: HashMap<String, u32> = HashMap::new();
    for (name, size) in read_chrom_sizes(chrom_sizes)? {
        let size = u32::try_from(size).map_err(|_| TrackError::ChromosomeTooLong(name.clone()))?;
        sizes.insert(name, size);
    }

    let entries = read_bed_entries(bed)?;
    debug!("Read {} bed entries from {}", entries.len(), bed.display());

    if let Some(parent) = output.parent() {
        create_dir_all(parent)?;
    }

    let runtime = runtime::Builder::new_multi_thread()
        .worker_threads(threads.max(1))
        .build()?;

    let mut bb_out =
        BigBedWrite::create_file(output, sizes).map_err(|e| TrackError::BigBed(e.to_string()))?;
    bb_out.options.max_zooms = 8;

    let data = BedParserStreamingIterator::wrap_iter(
        entries.into_iter().map(Ok::<_, std::io::Error>),
        true,
    );

    if let Err(e) = bb_out.write(data, runtime) {
        if let Err(e) = remove_file(output) {
            warn!("Unable to remove partial bigBed {}: {}", output.display(), e);
        }
        return Err(TrackError::BigBed(e.to_string()));
    }

    Ok(output.to_path_buf())
}

fn read_bed_entries(bed: &Path) -> Result<Vec<(String, BedEntry)>> {
    let reader = BufReader::new(File::open(bed)?);
    let mut entries = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() {
            continue;
        }

        let malformed = || TrackError::MalformedBed {
            path: bed.to_path_buf(),
            line: index + 1,
        };

        let mut fields = line.splitn(4, '\t');
        let chrom = fields.next().ok_or_else(malformed)?;
        let start = fields
            .next()
            .and_then(|s| s.parse::<u32>().ok())
            .ok_or_else(malformed)?;
        let end = fields
            .next()
            .and_then(|s| s.parse::<u32>().ok())
            .ok_or_else(malformed)?;
        let rest = fields.next().unwrap_or_default().to_string();

        entries.push((chrom.to_string(), BedEntry { start, end, rest }));
    }

    Ok(entries)
}

///
/// Location of the igvtools jar and the java runtime used to run it.
///
#[derive(Debug, Clone)]
pub struct IgvTools {
    pub java: PathBuf,
    pub jar: PathBuf,
}

impl IgvTools {
    pub fn new<P: Into<PathBuf>>(jar: P) -> Self {
        IgvTools {
            java: PathBuf::from("java"),
            jar: jar.into(),
        }
    }

    pub fn with_java<P: Into<PathBuf>>(mut self, java: P) -> Self {
        self.java = java.into();
        self
    }
}

///
/// Build a TDF file from a wiggle file written by [`WigWriter`](crate::WigWriter) with
/// `igvtools toTDF`.
///
/// igvtools runs inside a scratch directory so its log file never lands in the working
/// directory. A missing jar, a non-zero exit status or a missing output file are all
/// reported as errors.
///
pub fn wig_to_tdf(igvtools: &IgvTools, wig: &Path, chrom_sizes: &Path, output: &Path) -> Result<PathBuf> {
    info!("Converting {} to TDF", wig.display());

    let failed = |reason: String| TrackError::ConverterFailed {
        program: "igvtools".to_string(),
        reason,
    };

    if !igvtools.jar.is_file() {
        return Err(failed(format!(
            "jar not found at {}",
            igvtools.jar.display()
        )));
    }

    let jar = std::path::absolute(&igvtools.jar)?;
    let wig = std::path::absolute(wig)?;
    let chrom_sizes = std::path::absolute(chrom_sizes)?;
    let output = std::path::absolute(output)?;
    if let Some(parent) = output.parent() {
        create_dir_all(parent)?;
    }

    let scratch = tempfile::tempdir()?;

    let status = Command::new(&igvtools.java)
        .arg("-Djava.awt.headless=true")
        .arg("-Xmx1500m")
        .arg("-jar")
        .arg(&jar)
        .arg("toTDF")
        .arg(&wig)
        .arg(&output)
        .arg(&chrom_sizes)
        .current_dir(scratch.path())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| failed(format!("unable to run {}: {}", igvtools.java.display(), e)))?;

    if !status.success() {
        return Err(failed(format!("exited with {}", status)));
    }

    if !output.is_file() {
        return Err(TrackError::MissingOutput(output));
    }

    Ok(output)
}
