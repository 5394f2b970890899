use std::path::{Path, PathBuf};

use gematria_core::Genome;
use gematria_signal::ScoreTrack;

use crate::bed::BedWriter;
use crate::bigwig::BigWigWriter;
use crate::error::{Result, TrackError};
use crate::format::TrackFormat;
use crate::runs::runs;
use crate::wig::WigWriter;

///
/// A run-length encoded track output.
///
/// Writers are opened by their constructor, receive one [`append`](TrackWriter::append)
/// per run and must be [`finish`](TrackWriter::finish)ed to flush everything to disk.
/// Chromosomes have to be written one at a time, in genome order: some formats keep
/// state between calls.
///
pub trait TrackWriter {
    fn format(&self) -> TrackFormat;

    fn path(&self) -> &Path;

    ///
    /// Emit one record.
    ///
    /// # Arguments
    /// - chrom: chromosome name
    /// - start: 1-based position of the first base
    /// - span: number of bases covered
    /// - value: score of every covered base
    ///
    fn append(&mut self, chrom: &str, start: u64, span: u64, value: i32) -> Result<()>;

    /// Flush and close the output, returning its path.
    fn finish(self: Box<Self>) -> Result<PathBuf>;

    ///
    /// Run-length encode a chromosome's score track and append every run.
    ///
    fn write_track(&mut self, chrom: &str, track: &ScoreTrack) -> Result<()> {
        if track.is_empty() {
            return Err(TrackError::EmptyTrack(chrom.to_string()));
        }

        for run in runs(track.scores()) {
            self.append(chrom, run.start, run.span, run.value)?;
        }

        Ok(())
    }
}

impl TrackFormat {
    ///
    /// Open a writer for this format at `path`.
    ///
    /// `genome` provides the chromosome header of binary formats; `threads` is the number
    /// of worker threads binary formats may use when finishing.
    ///
    /// Converted formats (`bigbed`, `tdf`) have no writer of their own.
    ///
    pub fn create_writer(
        &self,
        path: &Path,
        genome: &Genome,
        threads: usize,
    ) -> Result<Box<dyn TrackWriter>> {
        match self {
            TrackFormat::Wig => Ok(Box::new(WigWriter::create(path)?)),
            TrackFormat::Bed => Ok(Box::new(BedWriter::create(path)?)),
            TrackFormat::BigWig => Ok(Box::new(BigWigWriter::create(path, genome, threads)?)),
            TrackFormat::BigBed | TrackFormat::Tdf => Err(TrackError::UnknownFormat(format!(
                "{} is converted from {}, not written directly",
                self,
                self.source().map(|s| s.to_string()).unwrap_or_default()
            ))),
        }
    }
}

/// Chromosome identifier as written to text formats: the name up to the first whitespace.
pub(crate) fn chrom_id(chrom: &str) -> &str {
    chrom.split_whitespace().next().unwrap_or(chrom)
}

pub(crate) fn check_run(chrom: &str, start: u64, span: u64) -> Result<()> {
    if start == 0 || span == 0 {
        return Err(TrackError::InvalidRun {
            chrom: chrom.to_string(),
            start,
            span,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use gematria_core::Chromosome;

    #[rstest]
    #[case("chr1", "chr1")]
    #[case("chr1 Homo sapiens", "chr1")]
    #[case("", "")]
    fn test_chrom_id(#[case] chrom: &str, #[case] expected: &str) {
        assert_eq!(chrom_id(chrom), expected);
    }

    #[rstest]
    fn test_converted_formats_have_no_writer() {
        let genome = Genome::new(vec![Chromosome::new("chr1", 10)]).unwrap();
        let tempdir = tempfile::tempdir().unwrap();

        let result = TrackFormat::Tdf.create_writer(&tempdir.path().join("x.tdf"), &genome, 1);
        assert!(matches!(result, Err(TrackError::UnknownFormat(_))));
    }

    #[rstest]
    fn test_write_track_rejects_empty_track() {
        let genome = Genome::new(vec![Chromosome::new("chr1", 10)]).unwrap();
        let tempdir = tempfile::tempdir().unwrap();
        let mut writer = TrackFormat::Bed
            .create_writer(&tempdir.path().join("x.bed"), &genome, 1)
            .unwrap();

        let result = writer.write_track("chr1", &ScoreTrack::from_scores(vec![]));
        assert!(matches!(result, Err(TrackError::EmptyTrack(_))));
    }
}
