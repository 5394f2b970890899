//! # Genome mappability score tracks
//!
//! Runs the whole pipeline for one genome: validates the run configuration, splits the raw
//! uniqueness signal per chromosome, computes every chromosome's score track on a rayon
//! pool and fans it out to one writer per requested format. Converted formats (`bigbed`,
//! `tdf`) are produced from the finished bed and wiggle files at the end.
//!
//! ```no_run
//! use std::path::Path;
//! use gematria_gms::{RunConfig, gms_main};
//!
//! let config = RunConfig {
//!     read_length: 36,
//!     formats: vec!["wig".to_string(), "bw".to_string()],
//!     ..Default::default()
//! };
//! let report = gms_main(
//!     Path::new("genome.fa"),
//!     Path::new("genome.uniqueness.npy"),
//!     Path::new("out/genome"),
//!     &config,
//! )
//! .unwrap();
//! ```
pub mod config;
pub mod errors;

use std::path::{Path, PathBuf};
use std::time::Instant;

use indicatif::ProgressBar;
use log::{debug, info, warn};
use rayon::prelude::*;
use tempfile::TempDir;

use gematria_core::Genome;
use gematria_core::utils::write_chrom_sizes;
use gematria_signal::{ScoreTrack, TrackBuilder, check_read_length, load_raw_signal, split_signal};
use gematria_tracks::convert::{IgvTools, bed_to_bigbed, wig_to_tdf};
use gematria_tracks::{TrackError, TrackFormat, TrackWriter};

// re-exports
pub use config::RunConfig;
pub use errors::*;

/// Files produced by a run, and the formats that could not be produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GmsReport {
    pub produced: Vec<(TrackFormat, PathBuf)>,
    pub dropped: Vec<TrackFormat>,
}

impl GmsReport {
    pub fn path(&self, format: TrackFormat) -> Option<&Path> {
        self.produced
            .iter()
            .find(|(f, _)| *f == format)
            .map(|(_, p)| p.as_path())
    }
}

///
/// Where each directly written format goes.
///
/// Requested formats land at `<prefix>.<ext>`; sources only needed by a converter go to a
/// scratch directory unless intermediates are kept.
///
struct OutputPlan {
    direct: Vec<(TrackFormat, PathBuf, bool)>,
    converted: Vec<TrackFormat>,
    sizes: Option<PathBuf>,
    scratch: Option<TempDir>,
}

impl OutputPlan {
    fn new(formats: &[TrackFormat], prefix: &Path, keep_intermediate: bool) -> Result<Self> {
        let converted: Vec<TrackFormat> = formats
            .iter()
            .copied()
            .filter(TrackFormat::is_converted)
            .collect();

        let needs_scratch = !keep_intermediate && !converted.is_empty();
        let scratch = if needs_scratch {
            Some(tempfile::tempdir()?)
        } else {
            None
        };
        let scratch_path = |ext: &str| -> Option<PathBuf> {
            scratch.as_ref().map(|dir| dir.path().join(format!("track.{ext}")))
        };

        let mut direct = Vec::new();
        for format in TrackFormat::ALL {
            let requested = formats.contains(&format);
            let needed = converted.iter().any(|c| c.source() == Some(format));
            if format.is_converted() || !(requested || needed) {
                continue;
            }
            let path = if requested || keep_intermediate {
                format.output_path(prefix)
            } else {
                scratch_path(format.extension()).unwrap_or_else(|| format.output_path(prefix))
            };
            direct.push((format, path, requested || keep_intermediate));
        }

        let sizes = if converted.is_empty() {
            None
        } else if keep_intermediate {
            let mut sizes = prefix.as_os_str().to_owned();
            sizes.push(".sizes");
            Some(PathBuf::from(sizes))
        } else {
            scratch_path("sizes")
        };

        Ok(OutputPlan {
            direct,
            converted,
            sizes,
            scratch,
        })
    }
}

///
/// Build the mappability score tracks of a genome.
///
/// # Arguments
/// - fasta: reference genome, optionally gzipped
/// - signal: raw uniqueness signal of the whole genome (`.npy` or packed `.bin`)
/// - prefix: output prefix; every format writes `<prefix>.<ext>`
/// - config: run parameters
///
/// Configuration problems (bad reads model, read length, chromosome shorter than a read,
/// a signal too short for the genome) are reported before any file is created. A failing
/// converter only drops its own format, see [`GmsReport::dropped`].
///
pub fn gms_main(fasta: &Path, signal: &Path, prefix: &Path, config: &RunConfig) -> Result<GmsReport> {
    let total = Instant::now();

    let model = config.reads_model()?;
    let builder = TrackBuilder::new(&model, config.read_length)?;

    let genome = Genome::from_fasta(fasta)?;
    check_read_length(&genome, config.read_length)?;
    info!(
        "Genome {}: {} chromosomes, {} bases",
        fasta.display(),
        genome.len(),
        genome.total_length()
    );

    let formats = config.track_formats();
    if formats.is_empty() {
        return Err(GmsError::NoFormats(config.formats.join(",")));
    }

    let raw = load_raw_signal(signal)?;
    let slices = split_signal(&raw, &genome, config.read_length)?;

    let threads = config.num_threads();
    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
    info!(
        "Building tracks with read length {} and reads model {} on {} threads",
        config.read_length, model, threads
    );

    let plan = OutputPlan::new(&formats, prefix, config.keep_intermediate)?;

    let mut writers: Vec<Box<dyn TrackWriter>> = Vec::with_capacity(plan.direct.len());
    for (format, path, _) in &plan.direct {
        match format.create_writer(path, &genome, threads) {
            Ok(writer) => writers.push(writer),
            Err(e) => {
                if let Err(finish_error) = finish_writers(writers) {
                    warn!("Unable to finish tracks after a failed open: {}", finish_error);
                }
                return Err(e.into());
            }
        }
    }

    let mut outcome: Result<()> = Ok(());
    let bar = ProgressBar::new(slices.len() as u64);

    'batches: for batch in slices.chunks(threads) {
        let tracks: Vec<(String, ScoreTrack, f64)> = pool.install(|| {
            batch
                .par_iter()
                .map(|(chrom, signal)| {
                    let start = Instant::now();
                    let track = builder.build(signal);
                    (chrom.name.clone(), track, start.elapsed().as_secs_f64())
                })
                .collect()
        });

        for (chrom, track, elapsed) in tracks {
            debug!("{}: {} scores in {:.3}s", chrom, track.len(), elapsed);
            for writer in writers.iter_mut() {
                if let Err(e) = writer.write_track(&chrom, &track) {
                    outcome = Err(e.into());
                    break 'batches;
                }
            }
            bar.inc(1);
        }
    }
    bar.finish_and_clear();

    let finished = finish_writers(writers);
    outcome?;
    let finished = finished?;

    let mut report = GmsReport::default();
    for ((format, path, keep), written) in plan.direct.iter().zip(finished) {
        debug!("Finished {} track {}", format, written.display());
        if *keep {
            report.produced.push((*format, path.clone()));
        }
    }

    if let Some(sizes) = &plan.sizes {
        write_chrom_sizes(sizes, &genome)?;
    }

    for format in &plan.converted {
        match convert(*format, &plan, prefix, config, threads) {
            Ok(path) => report.produced.push((*format, path)),
            Err(e) => {
                warn!("Dropping {} output: {}", format, e);
                report.dropped.push(*format);
            }
        }
    }

    if let Some(scratch) = plan.scratch {
        scratch.close()?;
    }

    info!("Done in {:.2}s", total.elapsed().as_secs_f64());
    Ok(report)
}

/// Finish every writer, even after a failure, and return the first error.
fn finish_writers(writers: Vec<Box<dyn TrackWriter>>) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::with_capacity(writers.len());
    let mut first_error = None;

    for writer in writers {
        match writer.finish() {
            Ok(path) => paths.push(path),
            Err(e) => {
                warn!("Unable to finish track: {}", e);
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    match first_error {
        Some(e) => Err(e.into()),
        None => Ok(paths),
    }
}

fn convert(
    format: TrackFormat,
    plan: &OutputPlan,
    prefix: &Path,
    config: &RunConfig,
    threads: usize,
) -> gematria_tracks::Result<PathBuf> {
    let source = format
        .source()
        .and_then(|source| plan.direct.iter().find(|(f, _, _)| *f == source))
        .map(|(_, path, _)| path)
        .ok_or_else(|| TrackError::UnknownFormat(format.to_string()))?;
    let sizes = plan
        .sizes
        .as_ref()
        .ok_or_else(|| TrackError::MissingOutput(prefix.to_path_buf()))?;
    let output = format.output_path(prefix);

    match format {
        TrackFormat::BigBed => bed_to_bigbed(source, sizes, &output, threads),
        TrackFormat::Tdf => {
            let jar = config.igvtools.as_ref().ok_or_else(|| TrackError::ConverterFailed {
                program: "igvtools".to_string(),
                reason: "no igvtools jar configured".to_string(),
            })?;
            let igvtools = IgvTools::new(jar).with_java(&config.java);
            wig_to_tdf(&igvtools, source, sizes, &output)
        }
        _ => Err(TrackError::UnknownFormat(format.to_string())),
    }
}
