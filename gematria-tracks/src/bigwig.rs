use std::collections::HashMap;
use std::fs::{File, create_dir_all, remove_file};
use std::path::{Path, PathBuf};

use bigtools::beddata::BedParserStreamingIterator;
use bigtools::{BigWigWrite, InputSortType, Value};
use gematria_core::Genome;
use log::{debug, warn};
use tokio::runtime;

use crate::error::{Result, TrackError};
use crate::format::TrackFormat;
use crate::writer::{TrackWriter, check_run, chrom_id};

///
/// bigWig output.
///
/// The chromosome header (name and length of every chromosome of the genome) is declared
/// when the writer is created; appending to any other chromosome is an error. Runs are
/// collected per chromosome and the indexed file is built by `bigtools` on
/// [`finish`](TrackWriter::finish).
///
pub struct BigWigWriter {
    path: PathBuf,
    writer: BigWigWrite<File>,
    chrom_sizes: HashMap<String, u32>,
    chroms: Vec<(String, Vec<Value>)>,
    threads: usize,
}

impl BigWigWriter {
    pub fn create(path: &Path, genome: &Genome, threads: usize) -> Result<Self> {
        if let Some(parent) = path.parent() {
            create_dir_all(parent)?;
        }

        let chrom_sizes = chrom_size_map(genome)?;

        let mut writer = BigWigWrite::create_file(path, chrom_sizes.clone())
            .map_err(|e| TrackError::BigWig(e.to_string()))?;
        writer.options.compress = true;
        writer.options.input_sort_type = InputSortType::START;

        Ok(BigWigWriter {
            path: path.to_path_buf(),
            writer,
            chrom_sizes,
            chroms: Vec::new(),
            threads: threads.max(1),
        })
    }
}

/// bigWig/bigBed headers store chromosome lengths as `u32`.
pub(crate) fn chrom_size_map(genome: &Genome) -> Result<HashMap<String, u32>> {
    genome
        .iter()
        .map(|chrom| {
            let size = u32::try_from(chrom.length)
                .map_err(|_| TrackError::ChromosomeTooLong(chrom.name.clone()))?;
            Ok((chrom.name.clone(), size))
        })
        .collect()
}

impl TrackWriter for BigWigWriter {
    fn format(&self) -> TrackFormat {
        TrackFormat::BigWig
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn append(&mut self, chrom: &str, start: u64, span: u64, value: i32) -> Result<()> {
        check_run(chrom, start, span)?;
        let chrom = chrom_id(chrom);

        if !self.chrom_sizes.contains_key(chrom) {
            return Err(TrackError::UndeclaredChromosome(chrom.to_string()));
        }

        let start = start - 1;
        let end = start + span;
        let value = Value {
            start: u32::try_from(start)
                .map_err(|_| TrackError::ChromosomeTooLong(chrom.to_string()))?,
            end: u32::try_from(end).map_err(|_| TrackError::ChromosomeTooLong(chrom.to_string()))?,
            value: value as f32,
        };

        if let Some((current, values)) = self.chroms.last_mut() {
            if current == chrom {
                values.push(value);
                return Ok(());
            }
        }
        self.chroms.push((chrom.to_string(), vec![value]));

        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<PathBuf> {
        let BigWigWriter {
            path,
            mut writer,
            chroms,
            threads,
            ..
        } = *self;

        let runtime = if threads == 1 {
            writer.options.channel_size = 0;
            runtime::Builder::new_current_thread().build()?
        } else {
            runtime::Builder::new_multi_thread()
                .worker_threads(threads)
                .build()?
        };

        let n_runs: usize = chroms.iter().map(|(_, values)| values.len()).sum();
        debug!("Writing {} runs to {}", n_runs, path.display());

        let entries = chroms.into_iter().flat_map(|(chrom, values)| {
            values
                .into_iter()
                .map(move |value| Ok::<_, std::io::Error>((chrom.clone(), value)))
        });

        // chromosomes arrive in genome order, not sorted by name
        let data = BedParserStreamingIterator::wrap_iter(entries, true);

        if let Err(e) = writer.write(data, runtime) {
            if let Err(e) = remove_file(&path) {
                warn!("Unable to remove partial bigWig {}: {}", path.display(), e);
            }
            return Err(TrackError::BigWig(e.to_string()));
        }

        Ok(path)
    }
}
